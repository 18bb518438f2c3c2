//! HR vertical slice: the employee record as it travels over the wire, and the
//! rules a candidate record must satisfy before it is persisted.
//!
//! The server treats these rules as authoritative; the client runs the same
//! checks before submitting so obvious mistakes never leave the form.

mod draft;
mod employee;
mod wire;

pub use draft::{EmployeeDraft, ValidationError, coerce_salary, parse_salary_text};
pub use employee::{Employee, EmployeeFields};
pub use wire::{
    DeleteReceipt, ErrorBody, HealthStatus, DELETED_MESSAGE, INTERNAL_ERROR_MESSAGE,
    NOT_FOUND_MESSAGE,
};
