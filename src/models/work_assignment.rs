use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::models::employee::Employee;
use crate::models::salary::UnknownStatus;
use crate::utils::date::{option_ymd, ymd};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentStatus {
    #[default]
    Incomplete,
    Complete,
}

impl AssignmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssignmentStatus::Incomplete => "incomplete",
            AssignmentStatus::Complete => "complete",
        }
    }
}

impl FromStr for AssignmentStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomplete" => Ok(AssignmentStatus::Incomplete),
            "complete" => Ok(AssignmentStatus::Complete),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for AssignmentStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(sqlx::FromRow, Serialize, Debug, Clone)]
pub struct WorkAssignment {
    pub id: i64,
    pub employee_id: i64,
    pub employee_name: String,
    pub assignment: String,
    #[serde(with = "ymd")]
    pub start_date: NaiveDate,
    #[serde(with = "option_ymd")]
    pub end_date: Option<NaiveDate>,
    #[sqlx(try_from = "String")]
    pub status: AssignmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WorkAssignmentFields {
    pub employee_id: i64,
    pub employee_name: String,
    pub assignment: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: AssignmentStatus,
}

#[derive(Serialize, Debug)]
pub struct WorkAssignmentWithEmployee {
    #[serde(flatten)]
    pub work_assignment: WorkAssignment,
    pub employee: Option<Employee>,
}
