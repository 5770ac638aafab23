use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::utils::date::option_ymd;

pub const ADMIN_ROLE: &str = "Admin";
pub const DEFAULT_ROLE: &str = "Employee";
pub const DEFAULT_STATUS: &str = "active";

/// Employee row. `password` holds the argon2 hash and is serialized as-is.
#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub national_id: String,
    #[serde(with = "option_ymd")]
    pub date_of_birth: Option<NaiveDate>,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub status: String,
    pub gender: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Writable columns shared by insert and full-record update.
#[derive(Debug, Clone)]
pub struct EmployeeFields {
    pub name: String,
    pub email: String,
    /// Already hashed. On update `None` keeps the stored hash.
    pub password_hash: Option<String>,
    pub national_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub phone: String,
    pub address: String,
    pub role: String,
    pub status: String,
    pub gender: String,
}

#[derive(Serialize, Debug)]
pub struct EmployeeWithAssociations {
    #[serde(flatten)]
    pub employee: Employee,
    pub department_ids: Vec<i64>,
    pub position_ids: Vec<i64>,
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct EmployeeSummary {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
pub(crate) fn sample_employee(role: &str) -> Employee {
    let now = Utc::now();
    Employee {
        id: 7,
        name: "Tran Thi Mai".to_string(),
        email: "mai.tran@example.com".to_string(),
        password: Some("$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string()),
        national_id: "079201001234".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1995, 4, 12),
        phone: "0901234567".to_string(),
        address: "12 Le Loi, District 1".to_string(),
        role: role.to_string(),
        status: DEFAULT_STATUS.to_string(),
        gender: "female".to_string(),
        created_at: now,
        updated_at: now,
    }
}
