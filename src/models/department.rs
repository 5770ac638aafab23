use serde::Serialize;

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub description: String,
}
