//! Client side of the roster: a locally cached copy of the employee list that
//! is loaded once and then reconciled from the single record each mutation
//! returns, plus the form, filter, sort and rendering logic of the grid.

pub mod api;
pub mod column;
mod error;
pub mod filter;
pub mod form;
pub mod grid;
pub mod shell;
pub mod sort;
pub mod view;

pub use api::{EmployeeApi, HttpEmployeeApi};
pub use error::{ClientError, Operation};
pub use grid::{Confirm, DeleteOutcome, GridState};
