//! Request and response shapes of the intake operations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::Rating;
use crate::roster::{Employee, EmployeeId};
use crate::storage::SubmissionMetadata;

/// Who the client claims to be
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluatorClaim {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub number: Option<Value>,
}

/// Unvalidated submission as received from a client
///
/// Every field is optional so that gaps surface as a validation failure
/// instead of a decoding error. Rating and reason values stay loosely typed
/// until validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default)]
    pub evaluator: Option<EvaluatorClaim>,
    #[serde(default)]
    pub ratings: Option<Map<String, Value>>,
    #[serde(default)]
    pub reasons: Option<Map<String, Value>>,
    #[serde(default)]
    pub timestamp: Option<Value>,
}

/// A submission that passed every stateless check
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSubmission {
    pub evaluator: Employee,
    pub ratings: BTreeMap<EmployeeId, Rating>,
    pub reasons: BTreeMap<EmployeeId, String>,
    pub timestamp: Value,
}

/// Returned to the client after a successful submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionAck {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
    pub metadata: SubmissionMetadata,
}

/// Aggregate progress of the feedback round
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStats {
    pub total_employees: usize,
    pub total_submissions: u64,
    #[serde(rename = "remainingSubmissions")]
    pub remaining: i64,
    /// Percentage with one decimal, e.g. `"12.5"`
    pub completion_percentage: String,
    pub last_updated: DateTime<Utc>,
}

/// Public view of an employee in submission status replies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    pub name: String,
    pub designation: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id,
            name: employee.name.clone(),
            designation: employee.designation.clone(),
        }
    }
}

/// Whether a given employee has already submitted
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionStatus {
    pub has_submitted: bool,
    pub submitted_at: Option<String>,
    #[serde(rename = "employee")]
    pub employee_info: EmployeeSummary,
}
