//! Tests for the employee roster

use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn employee(id: u32, number: u32, name: &str) -> Employee {
    Employee {
        id: EmployeeId(id),
        number,
        name: name.to_string(),
        designation: "Clerk".to_string(),
    }
}

#[test]
fn test_builtin_roster_shape() {
    let roster = Roster::builtin();

    assert_eq!(roster.len(), 53);
    assert!(!roster.is_empty());
    // Id 15 was never issued
    assert!(roster.find_by_id(EmployeeId(15)).is_none());
    assert_eq!(roster.find_by_number(74).unwrap().name, "Vilas Shette");
}

#[test]
fn test_builtin_roster_passes_validation() {
    let roster = Roster::builtin();
    let rebuilt = Roster::new(roster.employees().to_vec());
    assert!(rebuilt.is_ok());
}

#[test]
fn test_lookups_agree_for_every_employee() {
    let roster = Roster::builtin();

    for employee in roster.iter() {
        let by_number = roster.find_by_number(employee.number).unwrap();
        let by_id = roster.find_by_id(employee.id).unwrap();
        assert_eq!(by_number, by_id);
        assert_eq!(by_number, employee);
    }
}

#[test]
fn test_unknown_lookups() {
    let roster = Roster::builtin();

    assert!(roster.find_by_number(0).is_none());
    assert!(roster.find_by_number(999).is_none());
    assert!(!roster.contains(EmployeeId(999)));
}

#[test]
fn test_new_rejects_empty() {
    assert!(matches!(Roster::new(Vec::new()), Err(RosterError::Empty)));
}

#[test]
fn test_new_rejects_duplicate_id() {
    let result = Roster::new(vec![employee(1, 1, "A"), employee(1, 2, "B")]);
    assert!(matches!(result, Err(RosterError::DuplicateId(EmployeeId(1)))));
}

#[test]
fn test_new_rejects_duplicate_number() {
    let result = Roster::new(vec![employee(1, 7, "A"), employee(2, 7, "B")]);
    assert!(matches!(result, Err(RosterError::DuplicateNumber(7))));
}

#[test]
fn test_number_and_id_may_differ() {
    let roster = Roster::new(vec![employee(10, 100, "A"), employee(20, 200, "B")]).unwrap();

    assert_eq!(roster.find_by_number(100).unwrap().id, EmployeeId(10));
    assert!(roster.find_by_number(10).is_none());
    assert_eq!(roster.find_by_id(EmployeeId(20)).unwrap().number, 200);
}

#[test]
fn test_from_json_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "number": 11, "name": "Asha Rao", "designation": "Clerk"}},
            {{"id": 2, "number": 12, "name": "Vivek Jain", "designation": "Technician"}}
        ]"#
    )
    .unwrap();

    let roster = Roster::from_json_file(file.path()).unwrap();
    assert_eq!(roster.len(), 2);
    assert_eq!(roster.find_by_number(12).unwrap().name, "Vivek Jain");
}

#[test]
fn test_from_json_file_rejects_malformed() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "not json").unwrap();

    assert!(matches!(
        Roster::from_json_file(file.path()),
        Err(RosterError::Parse(_))
    ));
}

#[test]
fn test_employee_id_parsing() {
    assert_eq!("42".parse::<EmployeeId>().unwrap(), EmployeeId(42));
    assert!("abc".parse::<EmployeeId>().is_err());
    assert!("-1".parse::<EmployeeId>().is_err());
    assert_eq!(EmployeeId(7).to_string(), "7");
}
