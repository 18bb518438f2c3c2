use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::EmployeeFields;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name, position, and department are required")]
    MissingRequired,
    #[error("Salary must be a number")]
    InvalidSalary,
}

/// Candidate record as submitted by a client.
///
/// Every field is optional on the wire so that a missing field surfaces as a
/// validation message rather than a decoding failure. `salary` is kept as raw
/// JSON because clients send numbers, numeric strings, empty strings or null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub salary: Option<Value>,
}

impl EmployeeDraft {
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        department: impl Into<String>,
        salary: Option<f64>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            position: Some(position.into()),
            department: Some(department.into()),
            salary: salary.map(Value::from),
        }
    }

    /// Required fields first, then salary; the first failure wins.
    pub fn validate(self) -> Result<EmployeeFields, ValidationError> {
        let name = required(self.name)?;
        let position = required(self.position)?;
        let department = required(self.department)?;
        let salary = coerce_salary(self.salary.as_ref())?;
        Ok(EmployeeFields {
            name,
            position,
            department,
            salary,
        })
    }
}

fn required(value: Option<String>) -> Result<String, ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(ValidationError::MissingRequired),
    }
}

/// Absent, null and blank strings mean "no salary on record".
pub fn coerce_salary(value: Option<&Value>) -> Result<Option<f64>, ValidationError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or(ValidationError::InvalidSalary),
        Some(Value::String(text)) => parse_salary_text(text),
        Some(_) => Err(ValidationError::InvalidSalary),
    }
}

pub fn parse_salary_text(text: &str) -> Result<Option<f64>, ValidationError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .map(Some)
        .ok_or(ValidationError::InvalidSalary)
}
