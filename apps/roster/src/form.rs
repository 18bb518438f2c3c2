use products_hr::{Employee, EmployeeDraft, parse_salary_text};

use crate::{ClientError, column::Column};

const REQUIRED_MESSAGE: &str = "Fill in Name, Position, Department";

/// The in-progress form. Every field is free text until submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub name: String,
    pub position: String,
    pub department: String,
    pub salary: String,
}

impl EmployeeForm {
    pub fn from_employee(employee: &Employee) -> Self {
        Self {
            name: employee.name.clone(),
            position: employee.position.clone(),
            department: employee.department.clone(),
            salary: employee
                .salary
                .map(|salary| salary.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn set(&mut self, field: Column, value: impl Into<String>) {
        let value = value.into();
        match field {
            Column::Name => self.name = value,
            Column::Position => self.position = value,
            Column::Department => self.department = value,
            Column::Salary => self.salary = value,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Pre-submit checks; blank salary becomes null.
    pub fn to_draft(&self) -> Result<EmployeeDraft, ClientError> {
        if [&self.name, &self.position, &self.department]
            .iter()
            .any(|value| value.trim().is_empty())
        {
            return Err(ClientError::Validation(REQUIRED_MESSAGE.to_string()));
        }
        let salary = parse_salary_text(&self.salary)
            .map_err(|err| ClientError::Validation(err.to_string()))?;
        Ok(EmployeeDraft::new(
            self.name.trim(),
            self.position.trim(),
            self.department.trim(),
            salary,
        ))
    }
}
