//! Table provisioning and sample data for local development.

use anyhow::{Context, Result};
use platform_db::DbPool;
use products_hr::EmployeeFields;
use tracing::info;

const SAMPLE_EMPLOYEES: &[(&str, &str, &str, Option<f64>)] = &[
    ("Aarav Sharma", "Software Engineer", "Engineering", Some(85000.0)),
    ("Priya Nair", "Product Manager", "Product", Some(95000.0)),
    ("Rohan Mehta", "Data Analyst", "Analytics", Some(65000.0)),
    ("Sneha Iyer", "HR Specialist", "Human Resources", None),
    ("Vikram Rao", "DevOps Engineer", "Engineering", Some(78000.0)),
];

/// Create the table if needed and optionally seed it. Returns the row count.
pub async fn provision(pool: &DbPool, seed: bool) -> Result<u64> {
    platform_db::ensure_schema(pool)
        .await
        .context("failed to create employees table")?;
    info!("employees table ready");
    if seed {
        seed_samples(pool).await?;
    }
    let total = platform_db::employee_count(pool)
        .await
        .context("failed to count employees")?;
    info!(total, "total employees in database");
    Ok(total)
}

/// Insert the sample rows unless the table already holds data.
pub async fn seed_samples(pool: &DbPool) -> Result<usize> {
    let existing = platform_db::employee_count(pool)
        .await
        .context("failed to count employees")?;
    if existing > 0 {
        info!(existing, "employees table not empty; skipping sample data");
        return Ok(0);
    }
    for (name, position, department, salary) in SAMPLE_EMPLOYEES {
        let fields = EmployeeFields {
            name: name.to_string(),
            position: position.to_string(),
            department: department.to_string(),
            salary: *salary,
        };
        platform_db::insert_employee(pool, fields)
            .await
            .with_context(|| format!("failed to insert sample employee {name}"))?;
    }
    info!(inserted = SAMPLE_EMPLOYEES.len(), "sample employees inserted");
    Ok(SAMPLE_EMPLOYEES.len())
}
