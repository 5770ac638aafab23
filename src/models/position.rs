use serde::Serialize;

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Position {
    pub id: i64,
    pub title: String,
    pub description: String,
}
