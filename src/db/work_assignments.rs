use sqlx::PgExecutor;

use crate::models::work_assignment::{WorkAssignment, WorkAssignmentFields};

pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<WorkAssignment>, sqlx::Error> {
    sqlx::query_as::<_, WorkAssignment>("SELECT * FROM work_assignments ORDER BY id")
        .fetch_all(executor)
        .await
}

pub async fn find<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Option<WorkAssignment>, sqlx::Error> {
    sqlx::query_as::<_, WorkAssignment>("SELECT * FROM work_assignments WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    fields: &WorkAssignmentFields,
) -> Result<WorkAssignment, sqlx::Error> {
    sqlx::query_as::<_, WorkAssignment>(
        r#"
        INSERT INTO work_assignments (employee_id, employee_name, assignment, start_date, end_date, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(fields.employee_id)
    .bind(&fields.employee_name)
    .bind(&fields.assignment)
    .bind(fields.start_date)
    .bind(fields.end_date)
    .bind(fields.status.as_str())
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E: PgExecutor<'e>>(
    executor: E,
    id: i64,
    fields: &WorkAssignmentFields,
) -> Result<Option<WorkAssignment>, sqlx::Error> {
    sqlx::query_as::<_, WorkAssignment>(
        r#"
        UPDATE work_assignments SET
            employee_id = $1,
            employee_name = $2,
            assignment = $3,
            start_date = $4,
            end_date = $5,
            status = $6,
            updated_at = NOW()
        WHERE id = $7
        RETURNING *
        "#,
    )
    .bind(fields.employee_id)
    .bind(&fields.employee_name)
    .bind(&fields.assignment)
    .bind(fields.start_date)
    .bind(fields.end_date)
    .bind(fields.status.as_str())
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM work_assignments WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
