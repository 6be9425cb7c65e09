//! Fixed employee roster
//!
//! The roster is the set of people who both evaluate and get evaluated. It is
//! built once when the process starts and shared read-only afterwards; there
//! is no mutation API.
//!
//! # Examples
//!
//! ```rust
//! use peer_feedback::roster::{EmployeeId, Roster};
//!
//! let roster = Roster::builtin();
//! let by_number = roster.find_by_number(5).unwrap();
//! let by_id = roster.find_by_id(EmployeeId(5)).unwrap();
//! assert_eq!(by_number, by_id);
//! ```

mod builtin;
#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of an employee, used as the key of rating and reason maps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(pub u32);

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for EmployeeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>().map(EmployeeId)
    }
}

/// A single roster entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    /// Public-facing number the employee identifies themselves with
    pub number: u32,
    pub name: String,
    pub designation: String,
}

/// Errors raised while building a roster
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Roster must contain at least one employee")]
    Empty,

    #[error("Duplicate employee id in roster: {0}")]
    DuplicateId(EmployeeId),

    #[error("Duplicate employee number in roster: {0}")]
    DuplicateNumber(u32),

    #[error("Failed to read roster file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse roster file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable employee table with O(1) lookups by number and by id
#[derive(Debug, Clone)]
pub struct Roster {
    employees: Vec<Employee>,
    by_number: HashMap<u32, usize>,
    by_id: HashMap<EmployeeId, usize>,
}

impl Roster {
    /// Build a roster, rejecting empty lists and duplicate ids or numbers
    pub fn new(employees: Vec<Employee>) -> Result<Self, RosterError> {
        if employees.is_empty() {
            return Err(RosterError::Empty);
        }

        let mut seen_ids = HashSet::with_capacity(employees.len());
        let mut seen_numbers = HashSet::with_capacity(employees.len());
        for employee in &employees {
            if !seen_ids.insert(employee.id) {
                return Err(RosterError::DuplicateId(employee.id));
            }
            if !seen_numbers.insert(employee.number) {
                return Err(RosterError::DuplicateNumber(employee.number));
            }
        }

        Ok(Self::indexed(employees))
    }

    /// The roster shipped with the service
    pub fn builtin() -> Self {
        let employees = builtin::EMPLOYEES
            .iter()
            .map(|&(id, number, name, designation)| Employee {
                id: EmployeeId(id),
                number,
                name: name.to_string(),
                designation: designation.to_string(),
            })
            .collect();

        Self::indexed(employees)
    }

    fn indexed(employees: Vec<Employee>) -> Self {
        let by_number = employees
            .iter()
            .enumerate()
            .map(|(i, e)| (e.number, i))
            .collect();
        let by_id = employees
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id, i))
            .collect();

        Self {
            employees,
            by_number,
            by_id,
        }
    }

    /// Load a roster from a JSON array of employees
    pub fn from_json_file(path: &Path) -> Result<Self, RosterError> {
        let contents = std::fs::read_to_string(path)?;
        let employees: Vec<Employee> = serde_json::from_str(&contents)?;
        Self::new(employees)
    }

    pub fn find_by_number(&self, number: u32) -> Option<&Employee> {
        self.by_number.get(&number).map(|&i| &self.employees[i])
    }

    pub fn find_by_id(&self, id: EmployeeId) -> Option<&Employee> {
        self.by_id.get(&id).map(|&i| &self.employees[i])
    }

    pub fn contains(&self, id: EmployeeId) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Employee> {
        self.employees.iter()
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }
}
