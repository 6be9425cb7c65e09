//! Stateless validation of a submission against the roster
//!
//! Checks run in a fixed order and stop at the first failure:
//! required fields, evaluator identity, completeness of the rating map,
//! rating range, and written reasons for extreme ratings. The duplicate
//! check needs storage and lives in the service.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use super::types::{EvaluatorClaim, SubmissionRequest, ValidatedSubmission};
use super::Rating;
use crate::error::{FeedbackError, Result};
use crate::roster::{Employee, EmployeeId, Roster};

/// Run every stateless check and return the strongly typed submission
pub fn validate_submission(
    roster: &Roster,
    request: &SubmissionRequest,
) -> Result<ValidatedSubmission> {
    let (claim, raw_ratings, timestamp) = require_fields(request)?;
    let evaluator = verify_identity(roster, claim)?;
    let rated = check_completeness(roster, evaluator, raw_ratings)?;
    let ratings = parse_ratings(rated)?;

    let empty = Map::new();
    let raw_reasons = request.reasons.as_ref().unwrap_or(&empty);
    require_reasons(roster, &ratings, raw_reasons)?;

    Ok(ValidatedSubmission {
        evaluator: evaluator.clone(),
        reasons: collect_reasons(&ratings, raw_reasons),
        ratings,
        timestamp: timestamp.clone(),
    })
}

fn require_fields(
    request: &SubmissionRequest,
) -> Result<(&EvaluatorClaim, &Map<String, Value>, &Value)> {
    let claim = request.evaluator.as_ref().ok_or(FeedbackError::MissingFields)?;
    let ratings = request.ratings.as_ref().ok_or(FeedbackError::MissingFields)?;
    let timestamp = request
        .timestamp
        .as_ref()
        .filter(|v| is_truthy(v))
        .ok_or(FeedbackError::MissingFields)?;

    if claim.number.is_none() || claim.name.is_none() {
        return Err(FeedbackError::MissingFields);
    }

    Ok((claim, ratings, timestamp))
}

fn verify_identity<'r>(roster: &'r Roster, claim: &EvaluatorClaim) -> Result<&'r Employee> {
    let raw_number = claim.number.as_ref().ok_or(FeedbackError::MissingFields)?;
    let name = claim.name.as_deref().ok_or(FeedbackError::MissingFields)?;

    // Only a JSON integer matches; "5" is not the number 5
    let employee = raw_number
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .and_then(|n| roster.find_by_number(n))
        .ok_or_else(|| FeedbackError::UnknownEmployee {
            number: display_value(raw_number),
        })?;

    if employee.name.to_lowercase() != name.to_lowercase() {
        return Err(FeedbackError::NameMismatch {
            number: employee.number,
        });
    }

    if let Some(claimed_id) = claim.id.as_ref().filter(|v| !v.is_null()) {
        if !id_matches(claimed_id, employee.id) {
            return Err(FeedbackError::IdMismatch {
                number: employee.number,
            });
        }
    }

    Ok(employee)
}

fn check_completeness<'a>(
    roster: &Roster,
    evaluator: &Employee,
    ratings: &'a Map<String, Value>,
) -> Result<Vec<(EmployeeId, &'a Value)>> {
    let own_key = evaluator.id.to_string();
    if ratings.contains_key(&own_key) {
        return Err(FeedbackError::SelfRating);
    }

    let expected = roster.len().saturating_sub(1);
    if ratings.len() != expected {
        return Err(FeedbackError::RatingCountMismatch {
            expected,
            received: ratings.len(),
        });
    }

    ratings
        .iter()
        .map(|(key, value)| {
            canonical_roster_id(roster, key)
                .map(|id| (id, value))
                .ok_or_else(|| FeedbackError::UnknownRatee(key.clone()))
        })
        .collect()
}

fn parse_ratings(rated: Vec<(EmployeeId, &Value)>) -> Result<BTreeMap<EmployeeId, Rating>> {
    rated
        .into_iter()
        .map(|(id, value)| {
            lenient_integer(value)
                .and_then(Rating::new)
                .map(|rating| (id, rating))
                .ok_or_else(|| FeedbackError::InvalidRatingValue {
                    employee: id.to_string(),
                    value: display_value(value),
                })
        })
        .collect()
}

fn require_reasons(
    roster: &Roster,
    ratings: &BTreeMap<EmployeeId, Rating>,
    reasons: &Map<String, Value>,
) -> Result<()> {
    for (id, rating) in ratings.iter().filter(|(_, r)| r.needs_reason()) {
        let has_reason = reasons
            .get(&id.to_string())
            .and_then(Value::as_str)
            .is_some_and(|text| !text.trim().is_empty());

        if !has_reason {
            let employee = roster
                .find_by_id(*id)
                .map(|e| e.name.clone())
                .unwrap_or_else(|| format!("Employee #{id}"));
            return Err(FeedbackError::MissingReason {
                employee,
                rating: rating.value(),
            });
        }
    }

    Ok(())
}

/// String reasons for rated employees, kept as typed
fn collect_reasons(
    ratings: &BTreeMap<EmployeeId, Rating>,
    reasons: &Map<String, Value>,
) -> BTreeMap<EmployeeId, String> {
    reasons
        .iter()
        .filter_map(|(key, value)| {
            let id = canonical_id(key)?;
            let text = value.as_str()?;
            ratings.contains_key(&id).then(|| (id, text.to_string()))
        })
        .collect()
}

/// Id for a map key written in canonical decimal form; `"01"` and `"+1"` are not ids
fn canonical_id(key: &str) -> Option<EmployeeId> {
    let id = key.parse::<EmployeeId>().ok()?;
    (id.to_string() == key).then_some(id)
}

fn canonical_roster_id(roster: &Roster, key: &str) -> Option<EmployeeId> {
    canonical_id(key).filter(|id| roster.contains(*id))
}

fn id_matches(claimed: &Value, id: EmployeeId) -> bool {
    match claimed {
        Value::Number(n) => n.as_u64() == Some(u64::from(id.0)),
        Value::String(s) => s.parse::<EmployeeId>() == Ok(id),
        _ => false,
    }
}

/// Integer reading of a rating value
///
/// Integers pass through, floats truncate, and strings contribute their
/// leading integer (`" 7"` and `"7 stars"` both read as 7).
pub fn lenient_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

/// Leading integer of a string, ignoring leading whitespace and trailing junk
pub fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude = digits[..end].parse::<i64>().ok()?;

    Some(if negative { -magnitude } else { magnitude })
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
