use sqlx::{PgExecutor, Postgres, QueryBuilder};

use crate::models::salary::{Salary, SalaryFields, SalaryStatus};

/// Period and status filters over `created_at` (read in UTC) and `status`.
/// All present filters must match.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SalaryFilter {
    pub month: Option<i32>,
    pub quarter: Option<i32>,
    pub year: Option<i32>,
    pub status: Option<String>,
}

impl SalaryFilter {
    pub fn push_where(&self, query: &mut QueryBuilder<'_, Postgres>) {
        let mut keyword = " WHERE ";
        let periods = [
            ("MONTH", self.month),
            ("QUARTER", self.quarter),
            ("YEAR", self.year),
        ];
        for (field, value) in periods {
            if let Some(value) = value {
                query
                    .push(keyword)
                    .push(format!("EXTRACT({} FROM created_at AT TIME ZONE 'UTC')::INT = ", field))
                    .push_bind(value);
                keyword = " AND ";
            }
        }
        if let Some(status) = &self.status {
            query.push(keyword).push("status = ").push_bind(status.clone());
        }
    }
}

pub async fn list<'e, E: PgExecutor<'e>>(
    executor: E,
    filter: &SalaryFilter,
) -> Result<Vec<Salary>, sqlx::Error> {
    let mut query: QueryBuilder<'_, Postgres> = QueryBuilder::new("SELECT * FROM salaries");
    filter.push_where(&mut query);
    query.push(" ORDER BY id");
    query.build_query_as::<Salary>().fetch_all(executor).await
}

/// Sum of `total_salary` over matching rows; 0 when none match.
pub async fn total<'e, E: PgExecutor<'e>>(executor: E, filter: &SalaryFilter) -> Result<i64, sqlx::Error> {
    let mut query: QueryBuilder<'_, Postgres> =
        QueryBuilder::new("SELECT COALESCE(SUM(total_salary), 0)::BIGINT FROM salaries");
    filter.push_where(&mut query);
    query.build_query_scalar::<i64>().fetch_one(executor).await
}

pub async fn find<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Option<Salary>, sqlx::Error> {
    sqlx::query_as::<_, Salary>("SELECT * FROM salaries WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn insert<'e, E: PgExecutor<'e>>(executor: E, fields: &SalaryFields) -> Result<Salary, sqlx::Error> {
    sqlx::query_as::<_, Salary>(
        r#"
        INSERT INTO salaries
            (employee_id, employee_name, basic_salary, coefficient, bonus, fine, total_salary, working_days, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(fields.employee_id)
    .bind(&fields.employee_name)
    .bind(fields.basic_salary)
    .bind(fields.coefficient)
    .bind(fields.bonus)
    .bind(fields.fine)
    .bind(fields.total_salary)
    .bind(fields.working_days)
    .bind(fields.status.as_str())
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: PgExecutor<'e>>(
    executor: E,
    id: i64,
    fields: &SalaryFields,
) -> Result<Option<Salary>, sqlx::Error> {
    sqlx::query_as::<_, Salary>(
        r#"
        UPDATE salaries SET
            employee_id = $1,
            employee_name = $2,
            basic_salary = $3,
            coefficient = $4,
            bonus = $5,
            fine = $6,
            total_salary = $7,
            working_days = $8,
            status = $9,
            updated_at = NOW()
        WHERE id = $10
        RETURNING *
        "#,
    )
    .bind(fields.employee_id)
    .bind(&fields.employee_name)
    .bind(fields.basic_salary)
    .bind(fields.coefficient)
    .bind(fields.bonus)
    .bind(fields.fine)
    .bind(fields.total_salary)
    .bind(fields.working_days)
    .bind(fields.status.as_str())
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn set_status<'e, E: PgExecutor<'e>>(
    executor: E,
    id: i64,
    status: SalaryStatus,
) -> Result<Option<Salary>, sqlx::Error> {
    sqlx::query_as::<_, Salary>(
        "UPDATE salaries SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM salaries WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
