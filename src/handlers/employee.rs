use actix_web::{web, HttpResponse};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sqlx::{PgConnection, PgPool};
use validator::Validate;

use crate::db::memberships::{self, Link};
use crate::db::{departments, employees, positions};
use crate::errors::AppError;
use crate::models::employee::{
    Employee, EmployeeFields, EmployeeWithAssociations, DEFAULT_ROLE, DEFAULT_STATUS,
};
use crate::utils::date::option_ymd;
use crate::utils::password::{hash_password, verify_password};
use crate::utils::validation::{dedup_ids, validate_password, validate_payload};

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

fn default_status() -> String {
    DEFAULT_STATUS.to_string()
}

#[derive(Deserialize, Validate)]
pub struct RegisterEmployee {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(custom = "validate_password")]
    password: String,
    #[validate(length(min = 1, max = 20))]
    national_id: String,
    #[serde(default, with = "option_ymd")]
    date_of_birth: Option<NaiveDate>,
    #[validate(length(min = 1, max = 20))]
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default = "default_role")]
    role: String,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    gender: String,
}

/// Body of create and full-record update.
#[derive(Deserialize, Validate)]
pub struct EmployeePayload {
    #[validate(length(min = 1, max = 100))]
    name: String,
    #[validate(email)]
    email: String,
    #[validate(custom = "validate_password")]
    password: Option<String>,
    #[validate(length(min = 1, max = 20))]
    national_id: String,
    #[serde(default, with = "option_ymd")]
    date_of_birth: Option<NaiveDate>,
    #[validate(length(min = 1, max = 20))]
    phone: String,
    #[serde(default)]
    address: String,
    #[serde(default = "default_role")]
    role: String,
    #[serde(default = "default_status")]
    status: String,
    #[serde(default)]
    gender: String,
    department_ids: Option<Vec<i64>>,
    position_ids: Option<Vec<i64>>,
}

impl EmployeePayload {
    fn to_fields(&self, password_hash: Option<String>) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            email: self.email.clone(),
            password_hash,
            national_id: self.national_id.clone(),
            date_of_birth: self.date_of_birth,
            phone: self.phone.clone(),
            address: self.address.clone(),
            role: self.role.clone(),
            status: self.status.clone(),
            gender: self.gender.clone(),
        }
    }

    fn password_hash(&self) -> Result<Option<String>, AppError> {
        self.password.as_deref().map(hash_password).transpose()
    }
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    message: &'static str,
    #[serde(rename = "isAdmin")]
    is_admin: bool,
    id: i64,
    name: String,
    email: String,
    phone: String,
    address: String,
    gender: String,
    #[serde(with = "option_ymd")]
    date_of_birth: Option<NaiveDate>,
    status: String,
    role: String,
    department_ids: Vec<i64>,
    position_ids: Vec<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LoginResponse {
    fn new(associated: EmployeeWithAssociations) -> Self {
        let EmployeeWithAssociations {
            employee,
            department_ids,
            position_ids,
        } = associated;
        LoginResponse {
            message: "Login successful",
            is_admin: employee.is_admin(),
            id: employee.id,
            name: employee.name,
            email: employee.email,
            phone: employee.phone,
            address: employee.address,
            gender: employee.gender,
            date_of_birth: employee.date_of_birth,
            status: employee.status,
            role: employee.role,
            department_ids,
            position_ids,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

/// Attaches department and position ids read from the join tables.
async fn with_associations(
    pool: &PgPool,
    employees: Vec<Employee>,
) -> Result<Vec<EmployeeWithAssociations>, AppError> {
    let ids: Vec<i64> = employees.iter().map(|e| e.id).collect();
    let mut department_links =
        memberships::group_by_employee(memberships::linked_ids(pool, Link::Department, &ids).await?);
    let mut position_links =
        memberships::group_by_employee(memberships::linked_ids(pool, Link::Position, &ids).await?);

    Ok(employees
        .into_iter()
        .map(|employee| EmployeeWithAssociations {
            department_ids: department_links.remove(&employee.id).unwrap_or_default(),
            position_ids: position_links.remove(&employee.id).unwrap_or_default(),
            employee,
        })
        .collect())
}

async fn with_associations_one(
    pool: &PgPool,
    employee: Employee,
) -> Result<EmployeeWithAssociations, AppError> {
    with_associations(pool, vec![employee])
        .await?
        .pop()
        .ok_or_else(|| AppError::InternalServerError("Failed to load employee".to_string()))
}

/// Checks every target exists, then inserts the join rows.
async fn attach_checked(
    conn: &mut PgConnection,
    link: Link,
    employee_id: i64,
    target_ids: &[i64],
) -> Result<(), AppError> {
    for &target_id in target_ids {
        let exists = match link {
            Link::Department => departments::exists(&mut *conn, target_id).await?,
            Link::Position => positions::exists(&mut *conn, target_id).await?,
        };
        if !exists {
            let kind = match link {
                Link::Department => "department",
                Link::Position => "position",
            };
            return Err(AppError::BadRequest(format!("Invalid {} ID: {}", kind, target_id)));
        }
    }
    memberships::attach(&mut *conn, link, employee_id, target_ids).await?;
    Ok(())
}

pub async fn register_employee(
    pool: web::Data<PgPool>,
    payload: web::Json<RegisterEmployee>,
) -> Result<HttpResponse, AppError> {
    let payload = payload.into_inner();
    validate_payload(&payload)?;

    if employees::email_exists(pool.get_ref(), &payload.email).await? {
        log::warn!("Registration refused, email already in use: {}", payload.email);
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let fields = EmployeeFields {
        password_hash: Some(hash_password(&payload.password)?),
        name: payload.name,
        email: payload.email,
        national_id: payload.national_id,
        date_of_birth: payload.date_of_birth,
        phone: payload.phone,
        address: payload.address,
        role: payload.role,
        status: payload.status,
        gender: payload.gender,
    };
    let employee = employees::insert(pool.get_ref(), &fields).await?;
    log::info!("Registered employee {} <{}>", employee.id, employee.email);

    Ok(HttpResponse::Created().json(employee))
}

pub async fn login_employee(
    pool: web::Data<PgPool>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest("Email and password are required".to_string()));
    }

    let employee = employees::find_by_email(pool.get_ref(), &payload.email)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    let password_ok = employee
        .password
        .as_deref()
        .map(|hash| verify_password(&payload.password, hash))
        .unwrap_or(false);
    if !password_ok {
        log::warn!("Failed login for employee {}", employee.id);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let associated = with_associations_one(pool.get_ref(), employee).await?;
    Ok(HttpResponse::Ok().json(LoginResponse::new(associated)))
}

pub async fn get_employees(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let employees = employees::list(pool.get_ref()).await?;
    let employees = with_associations(pool.get_ref(), employees).await?;
    Ok(HttpResponse::Ok().json(employees))
}

pub async fn create_employee(
    pool: web::Data<PgPool>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    validate_payload(&payload.0)?;

    let department_ids = dedup_ids(payload.department_ids.as_deref().unwrap_or_default());
    let position_ids = dedup_ids(payload.position_ids.as_deref().unwrap_or_default());
    let fields = payload.to_fields(payload.password_hash()?);

    // The row and its join rows land together or not at all.
    let mut tx = pool.begin().await?;
    let employee = employees::insert(&mut *tx, &fields).await?;
    attach_checked(&mut tx, Link::Department, employee.id, &department_ids).await?;
    attach_checked(&mut tx, Link::Position, employee.id, &position_ids).await?;
    tx.commit().await?;

    log::info!(
        "Created employee {} with {} department(s) and {} position(s)",
        employee.id,
        department_ids.len(),
        position_ids.len()
    );

    Ok(HttpResponse::Created().json(EmployeeWithAssociations {
        employee,
        department_ids,
        position_ids,
    }))
}

pub async fn update_employee(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
    payload: web::Json<EmployeePayload>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    if employees::find(pool.get_ref(), id).await?.is_none() {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    validate_payload(&payload.0)?;
    let fields = payload.to_fields(payload.password_hash()?);

    let mut tx = pool.begin().await?;
    let employee = employees::update(&mut *tx, id, &fields)
        .await?
        .ok_or_else(|| AppError::NotFound("Employee not found".to_string()))?;

    // Associations are only re-synced when the payload names them.
    if let Some(ids) = &payload.department_ids {
        memberships::detach_all(&mut *tx, Link::Department, id).await?;
        attach_checked(&mut tx, Link::Department, id, &dedup_ids(ids)).await?;
    }
    if let Some(ids) = &payload.position_ids {
        memberships::detach_all(&mut *tx, Link::Position, id).await?;
        attach_checked(&mut tx, Link::Position, id, &dedup_ids(ids)).await?;
    }
    tx.commit().await?;

    let employee = with_associations_one(pool.get_ref(), employee).await?;
    Ok(HttpResponse::Ok().json(employee))
}

pub async fn delete_employee(
    pool: web::Data<PgPool>,
    id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let id = id.into_inner();

    if employees::find(pool.get_ref(), id).await?.is_none() {
        return Err(AppError::NotFound("Employee not found".to_string()));
    }

    let mut tx = pool.begin().await?;
    let departments_removed = memberships::detach_all(&mut *tx, Link::Department, id).await?;
    let positions_removed = memberships::detach_all(&mut *tx, Link::Position, id).await?;
    employees::delete(&mut *tx, id).await?;
    tx.commit().await?;

    log::info!(
        "Deleted employee {} and {} join row(s)",
        id,
        departments_removed + positions_removed
    );

    Ok(HttpResponse::Ok().json(json!({
        "message": "Employee deleted successfully",
    })))
}
