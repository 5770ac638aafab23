use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::employee::Employee;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SalaryStatus {
    #[default]
    Unpaid,
    Paid,
}

impl SalaryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SalaryStatus::Unpaid => "unpaid",
            SalaryStatus::Paid => "paid",
        }
    }

    /// A paid salary stays paid; every other move is allowed.
    pub fn can_transition_to(self, next: SalaryStatus) -> bool {
        !(self == SalaryStatus::Paid && next == SalaryStatus::Unpaid)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status: {}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for SalaryStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(SalaryStatus::Unpaid),
            "paid" => Ok(SalaryStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for SalaryStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct Salary {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub basic_salary: i64,
    pub coefficient: i64,
    pub bonus: i64,
    pub fine: i64,
    pub total_salary: i64,
    pub working_days: i32,
    #[sqlx(try_from = "String")]
    pub status: SalaryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Writable salary columns; `employee_name` is the snapshot taken from the employee row.
#[derive(Debug, Clone)]
pub struct SalaryFields {
    pub employee_id: i64,
    pub employee_name: String,
    pub basic_salary: i64,
    pub coefficient: i64,
    pub bonus: i64,
    pub fine: i64,
    pub total_salary: i64,
    pub working_days: i32,
    pub status: SalaryStatus,
}

#[derive(Serialize, Debug)]
pub struct SalaryWithEmployee {
    #[serde(flatten)]
    pub salary: Salary,
    pub employee: Employee,
}
