use serde::{Deserialize, Serialize};

/// A persisted employee row as returned by the API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: Option<f64>,
}

/// The four mutable fields of an employee after validation.
#[derive(Clone, Debug, PartialEq)]
pub struct EmployeeFields {
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: Option<f64>,
}
