//! Join-row access for the employee/department and employee/position links.
//!
//! Both join tables share one shape, `(employee_id, <target>_id)`, so every
//! function takes a [`Link`] naming the table to work on.

use std::collections::HashMap;

use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::models::employee::EmployeeSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    Department,
    Position,
}

impl Link {
    fn table(self) -> &'static str {
        match self {
            Link::Department => "employee_departments",
            Link::Position => "employee_positions",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Link::Department => "department_id",
            Link::Position => "position_id",
        }
    }
}

/// `(employee_id, target_id)` pairs for the given employees.
pub async fn linked_ids<'e, E: PgExecutor<'e>>(
    executor: E,
    link: Link,
    employee_ids: &[i64],
) -> Result<Vec<(i64, i64)>, sqlx::Error> {
    let sql = format!(
        "SELECT employee_id, {col} FROM {table} WHERE employee_id = ANY($1) ORDER BY employee_id, {col}",
        col = link.column(),
        table = link.table(),
    );
    sqlx::query_as::<_, (i64, i64)>(&sql)
        .bind(employee_ids)
        .fetch_all(executor)
        .await
}

/// Inserts one join row per target id in a single statement.
pub async fn attach<'e, E: PgExecutor<'e>>(
    executor: E,
    link: Link,
    employee_id: i64,
    target_ids: &[i64],
) -> Result<(), sqlx::Error> {
    if target_ids.is_empty() {
        return Ok(());
    }

    fan_out_query(link, employee_id, target_ids)
        .build()
        .execute(executor)
        .await?;
    Ok(())
}

/// `INSERT ... VALUES ($1, $2), ($3, $4), ...` with one row per target id.
fn fan_out_query(link: Link, employee_id: i64, target_ids: &[i64]) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::new(format!(
        "INSERT INTO {} (employee_id, {}) ",
        link.table(),
        link.column()
    ));
    query.push_values(target_ids, |mut row, target_id| {
        row.push_bind(employee_id).push_bind(*target_id);
    });
    query
}

pub async fn detach_all<'e, E: PgExecutor<'e>>(
    executor: E,
    link: Link,
    employee_id: i64,
) -> Result<u64, sqlx::Error> {
    let sql = format!("DELETE FROM {} WHERE employee_id = $1", link.table());
    let result = sqlx::query(&sql).bind(employee_id).execute(executor).await?;
    Ok(result.rows_affected())
}

pub async fn count_for_target<'e, E: PgExecutor<'e>>(
    executor: E,
    link: Link,
    target_id: i64,
) -> Result<i64, sqlx::Error> {
    let sql = format!("SELECT COUNT(*) FROM {} WHERE {} = $1", link.table(), link.column());
    sqlx::query_scalar::<_, i64>(&sql)
        .bind(target_id)
        .fetch_one(executor)
        .await
}

pub async fn employees_for_target<'e, E: PgExecutor<'e>>(
    executor: E,
    link: Link,
    target_id: i64,
) -> Result<Vec<EmployeeSummary>, sqlx::Error> {
    let sql = format!(
        "SELECT e.id, e.name FROM {table} l JOIN employees e ON l.employee_id = e.id WHERE l.{col} = $1 ORDER BY e.id",
        table = link.table(),
        col = link.column(),
    );
    sqlx::query_as::<_, EmployeeSummary>(&sql)
        .bind(target_id)
        .fetch_all(executor)
        .await
}

/// Groups `(employee_id, target_id)` pairs by employee.
pub fn group_by_employee(pairs: Vec<(i64, i64)>) -> HashMap<i64, Vec<i64>> {
    let mut grouped: HashMap<i64, Vec<i64>> = HashMap::new();
    for (employee_id, target_id) in pairs {
        grouped.entry(employee_id).or_default().push(target_id);
    }
    grouped
}
