pub mod config;
mod employees;
pub mod http;
pub mod setup;

#[cfg(test)]
mod testing;
