use sqlx::PgExecutor;

use crate::models::employee::{Employee, EmployeeFields};

pub async fn list<'e, E: PgExecutor<'e>>(executor: E) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id")
        .fetch_all(executor)
        .await
}

pub async fn list_by_ids<'e, E: PgExecutor<'e>>(
    executor: E,
    ids: &[i64],
) -> Result<Vec<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ANY($1) ORDER BY id")
        .bind(ids)
        .fetch_all(executor)
        .await
}

pub async fn find<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
        .bind(id)
        .fetch_optional(executor)
        .await
}

pub async fn find_by_email<'e, E: PgExecutor<'e>>(
    executor: E,
    email: &str,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE email = $1")
        .bind(email)
        .fetch_optional(executor)
        .await
}

pub async fn email_exists<'e, E: PgExecutor<'e>>(executor: E, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM employees WHERE email = $1)")
        .bind(email)
        .fetch_one(executor)
        .await
}

pub async fn insert<'e, E: PgExecutor<'e>>(
    executor: E,
    fields: &EmployeeFields,
) -> Result<Employee, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        INSERT INTO employees
            (name, email, password, national_id, date_of_birth, phone, address, role, status, gender)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.password_hash)
    .bind(&fields.national_id)
    .bind(fields.date_of_birth)
    .bind(&fields.phone)
    .bind(&fields.address)
    .bind(&fields.role)
    .bind(&fields.status)
    .bind(&fields.gender)
    .fetch_one(executor)
    .await
}

/// Overwrites every column; a `None` password keeps the stored hash.
pub async fn update<'e, E: PgExecutor<'e>>(
    executor: E,
    id: i64,
    fields: &EmployeeFields,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as::<_, Employee>(
        r#"
        UPDATE employees SET
            name = $1,
            email = $2,
            password = COALESCE($3, password),
            national_id = $4,
            date_of_birth = $5,
            phone = $6,
            address = $7,
            role = $8,
            status = $9,
            gender = $10,
            updated_at = NOW()
        WHERE id = $11
        RETURNING *
        "#,
    )
    .bind(&fields.name)
    .bind(&fields.email)
    .bind(&fields.password_hash)
    .bind(&fields.national_id)
    .bind(fields.date_of_birth)
    .bind(&fields.phone)
    .bind(&fields.address)
    .bind(&fields.role)
    .bind(&fields.status)
    .bind(&fields.gender)
    .bind(id)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(executor)
        .await?;
    Ok(result.rows_affected())
}
