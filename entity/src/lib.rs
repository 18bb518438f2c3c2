//! sea-orm entities backing the roster store.

pub mod employees;
