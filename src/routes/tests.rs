use actix_web::http::StatusCode;
use actix_web::middleware::NormalizePath;
use actix_web::{test, web, App};
use chrono::{Datelike, Utc};
use serde_json::{json, Value};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use super::configure;

macro_rules! test_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($pool))
                .wrap(NormalizePath::trim())
                .configure(configure),
        )
        .await
    };
}

/// Pool that never connects; enough for requests rejected before any query.
fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .connect_lazy("postgres://postgres@localhost/unused")
        .expect("lazy pool")
}

async fn database_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = PgPool::connect(&url).await.expect("pool creation failed");
    crate::db::run_migrations(&pool).await.expect("migrations failed");
    pool
}

fn unique(prefix: &str) -> String {
    format!("{}{}", prefix, rand::random::<u32>())
}

fn employee_body(tag: &str, role: &str) -> Value {
    json!({
        "name": format!("Employee {}", tag),
        "email": format!("{}@example.com", tag),
        "password": "secret1",
        "national_id": format!("ID{}", tag),
        "phone": format!("P{}", tag),
        "date_of_birth": "1992-07-21",
        "address": "1 Nguyen Hue",
        "role": role,
        "gender": "male",
    })
}

// ---- requests rejected before touching the database ----

#[actix_web::test]
async fn non_numeric_id_is_bad_request() {
    let app = test_app!(lazy_pool());

    let req = test::TestRequest::put().uri("/api/v1/salaries/abc/pay").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "error": "Invalid ID" }));
}

#[actix_web::test]
async fn malformed_json_is_bad_request() {
    let app = test_app!(lazy_pool());

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input data"));
}

#[actix_web::test]
async fn login_requires_email_and_password() {
    let app = test_app!(lazy_pool());

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/login")
        .set_json(json!({ "email": "someone@example.com" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email and password are required");
}

#[actix_web::test]
async fn register_rejects_short_password_and_bad_email() {
    let app = test_app!(lazy_pool());

    let mut body = employee_body("short", "Employee");
    body["password"] = json!("12345");
    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let mut body = employee_body("bademail", "Employee");
    body["email"] = json!("not-an-email");
    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn register_rejects_malformed_birth_date() {
    let app = test_app!(lazy_pool());

    let mut body = employee_body("baddate", "Employee");
    body["date_of_birth"] = json!("21/07/1992");
    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn salary_statistics_validate_filters() {
    let app = test_app!(lazy_pool());

    for uri in [
        "/api/v1/salaries/stats?status=pending",
        "/api/v1/salaries/stats?year=twenty",
        "/api/v1/salaries/stats/?month=13a",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
    }
}

#[actix_web::test]
async fn work_assignment_rejects_end_before_start() {
    let app = test_app!(lazy_pool());

    let req = test::TestRequest::post()
        .uri("/api/v1/workassignments")
        .set_json(json!({
            "employee_id": 1,
            "assignment": "Inventory count",
            "start_date": "2024-06-10",
            "end_date": "2024-06-01",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "end_date must not be before start_date");
}

#[actix_web::test]
async fn unknown_route_is_not_found() {
    let app = test_app!(lazy_pool());

    let req = test::TestRequest::get().uri("/api/v1/payrolls").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

// ---- full round trips against PostgreSQL ----

#[actix_web::test]
#[ignore = "requires database"]
async fn register_hashes_password_and_rejects_duplicate_email() {
    let app = test_app!(database_pool().await);
    let body = employee_body(&unique("reg"), "Employee");

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let stored = created["password"].as_str().unwrap();
    assert_ne!(stored, "secret1");
    assert!(stored.starts_with("$argon2"));
    assert_eq!(created["role"], "Employee");
    assert_eq!(created["date_of_birth"], "1992-07-21");

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Email already registered");
}

#[actix_web::test]
#[ignore = "requires database"]
async fn login_reports_admin_flag_and_rejects_bad_credentials() {
    let app = test_app!(database_pool().await);
    let tag = unique("admin");
    let body = employee_body(&tag, "Admin");

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/login")
        .set_json(json!({ "email": body["email"], "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: Value = test::read_body_json(resp).await;
    assert_eq!(login["isAdmin"], true);
    assert_eq!(login["department_ids"], json!([]));
    assert!(login.get("password").is_none());

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/login")
        .set_json(json!({ "email": body["email"], "password": "secret2" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/employees/login")
        .set_json(json!({ "email": format!("nobody-{}@example.com", tag), "password": "secret1" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn department_delete_is_refused_while_referenced() {
    let app = test_app!(database_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/departments")
        .set_json(json!({ "name": unique("Logistics "), "description": "Warehouses" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let department: Value = test::read_body_json(resp).await;
    let department_id = department["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/departments")
        .set_json(json!({ "name": department["name"] }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let mut body = employee_body(&unique("dept"), "Employee");
    body["department_ids"] = json!([department_id]);
    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let employee: Value = test::read_body_json(resp).await;
    let employee_id = employee["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/departments/{}", department_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/employees/{}", employee_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/departments/{}", department_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/v1/departments").to_request();
    let departments: Value = test::call_and_read_body_json(&app, req).await;
    assert!(departments
        .as_array()
        .unwrap()
        .iter()
        .all(|d| d["id"].as_i64() != Some(department_id)));
}

#[actix_web::test]
#[ignore = "requires database"]
async fn deleting_employee_removes_its_join_rows() {
    let app = test_app!(database_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/departments")
        .set_json(json!({ "name": unique("Audit ") }))
        .to_request();
    let department: Value = test::call_and_read_body_json(&app, req).await;
    let department_id = department["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/positions")
        .set_json(json!({ "title": unique("Auditor "), "description": "Reviews books" }))
        .to_request();
    let position: Value = test::call_and_read_body_json(&app, req).await;
    let position_id = position["id"].as_i64().unwrap();

    let mut body = employee_body(&unique("join"), "Employee");
    body["department_ids"] = json!([department_id, department_id]);
    body["position_ids"] = json!([position_id]);
    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&body).to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;
    let employee_id = employee["id"].as_i64().unwrap();
    assert_eq!(employee["department_ids"], json!([department_id]));
    assert_eq!(employee["position_ids"], json!([position_id]));

    let department_members = format!("/api/v1/departments/{}/employees", department_id);
    let position_members = format!("/api/v1/positions/{}/employees", position_id);

    let req = test::TestRequest::get().uri(&department_members).to_request();
    let members: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(members, json!([{ "id": employee_id, "name": employee["name"] }]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/employees/{}", employee_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    for uri in [&department_members, &position_members] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let members: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(members, json!([]), "{}", uri);
    }

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/positions/{}", position_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn create_employee_with_unknown_department_leaves_nothing_behind() {
    let app = test_app!(database_pool().await);

    let mut body = employee_body(&unique("atomic"), "Employee");
    body["department_ids"] = json!([i64::MAX]);
    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&body).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    // Same email, phone and national id go through once the bad link is dropped.
    body["department_ids"] = json!([]);
    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&body).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn update_employee_resyncs_named_associations_only() {
    let app = test_app!(database_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/departments")
        .set_json(json!({ "name": unique("Sales ") }))
        .to_request();
    let department: Value = test::call_and_read_body_json(&app, req).await;
    let department_id = department["id"].as_i64().unwrap();

    let mut body = employee_body(&unique("upd"), "Employee");
    body["department_ids"] = json!([department_id]);
    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&body).to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;
    let uri = format!("/api/v1/employees/{}", employee["id"]);

    body.as_object_mut().unwrap().remove("department_ids");
    body.as_object_mut().unwrap().remove("password");
    body["address"] = json!("99 Hai Ba Trung");
    let req = test::TestRequest::put().uri(&uri).set_json(&body).to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["address"], "99 Hai Ba Trung");
    assert_eq!(updated["department_ids"], json!([department_id]));
    assert_eq!(updated["password"], employee["password"]);

    body["department_ids"] = json!([]);
    let req = test::TestRequest::put().uri(&uri).set_json(&body).to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["department_ids"], json!([]));

    let req = test::TestRequest::put()
        .uri("/api/v1/employees/9223372036854775807")
        .set_json(&body)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn salary_lifecycle_and_statistics() {
    let app = test_app!(database_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(employee_body(&unique("pay"), "Employee"))
        .to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;
    let employee_id = employee["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/salaries")
        .set_json(json!({ "employee_id": i64::MAX, "basic_salary": 1, "coefficient": 1,
                          "bonus": 0, "fine": 0, "total_salary": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/api/v1/salaries")
        .set_json(json!({
            "employee_id": employee_id,
            "basic_salary": 8_000_000,
            "coefficient": 2,
            "bonus": 1_000_000,
            "fine": 200_000,
            "total_salary": 16_800_000,
            "working_days": 22,
            "status": "paid",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let salary: Value = test::read_body_json(resp).await;
    assert_eq!(salary["status"], "unpaid");
    assert_eq!(salary["employee_name"], employee["name"]);
    let salary_uri = format!("/api/v1/salaries/{}", salary["id"]);

    let req = test::TestRequest::get().uri(&salary_uri).to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["employee"]["id"], employee_id);

    for _ in 0..2 {
        let req = test::TestRequest::put().uri(&format!("{}/pay", salary_uri)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let paid: Value = test::read_body_json(resp).await;
        assert_eq!(paid["status"], "paid");
    }

    let mut replacement = salary.clone();
    replacement["status"] = json!("unpaid");
    let req = test::TestRequest::put().uri(&salary_uri).set_json(&replacement).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri("/api/v1/salaries/stats?status=Paid")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let year = Utc::now().year();
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/salaries?year={}", year))
        .to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let expected: i64 = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["total_salary"].as_i64().unwrap())
        .sum();
    assert!(expected >= 16_800_000);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/salaries/stats?year={}", year))
        .to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"].as_i64(), Some(expected));

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/salaries/stats?year={}", year - 100))
        .to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["total"], 0);

    // The salary row still points at the employee.
    let employee_uri = format!("/api/v1/employees/{}", employee_id);
    let req = test::TestRequest::delete().uri(&employee_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::delete().uri(&salary_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::delete().uri(&salary_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::delete().uri(&employee_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn work_assignment_defaults_and_snapshot() {
    let app = test_app!(database_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(employee_body(&unique("trip"), "Employee"))
        .to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/workassignments")
        .set_json(json!({
            "employee_id": employee["id"],
            "assignment": "Open the Hai Phong office",
            "start_date": "2024-09-01",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["data"]["status"], "incomplete");
    assert_eq!(created["data"]["employee_name"], employee["name"]);
    assert_eq!(created["data"]["start_date"], "2024-09-01");
    let uri = format!("/api/v1/workassignments/{}", created["data"]["id"]);

    let req = test::TestRequest::put()
        .uri(&uri)
        .set_json(json!({
            "employee_id": employee["id"],
            "assignment": "Open the Hai Phong office",
            "start_date": "2024-09-01",
            "end_date": "2024-09-20",
            "status": "complete",
        }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "complete");
    assert_eq!(updated["end_date"], "2024-09-20");

    let req = test::TestRequest::get().uri("/api/v1/workassignments").to_request();
    let listed: Value = test::call_and_read_body_json(&app, req).await;
    let entry = listed
        .as_array()
        .unwrap()
        .iter()
        .find(|a| a["id"] == created["data"]["id"])
        .cloned()
        .unwrap();
    assert_eq!(entry["employee"]["id"], employee["id"]);

    let req = test::TestRequest::delete().uri(&uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn position_delete_is_refused_while_held() {
    let app = test_app!(database_pool().await);

    let req = test::TestRequest::post()
        .uri("/api/v1/positions")
        .set_json(json!({ "title": unique("Cashier "), "description": "Front desk" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let position: Value = test::read_body_json(resp).await;
    let position_id = position["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/v1/positions")
        .set_json(json!({ "title": position["title"] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Position already exists");

    let mut body = employee_body(&unique("pos"), "Employee");
    body["position_ids"] = json!([position_id]);
    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&body).to_request();
    let employee: Value = test::call_and_read_body_json(&app, req).await;
    let employee_id = employee["id"].as_i64().unwrap();

    let position_uri = format!("/api/v1/positions/{}", position_id);
    let req = test::TestRequest::delete().uri(&position_uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Cannot delete position because it has employees");

    // The refused delete left both the position and the link in place.
    let req = test::TestRequest::get()
        .uri(&format!("{}/employees", position_uri))
        .to_request();
    let holders: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(holders, json!([{ "id": employee_id, "name": employee["name"] }]));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/employees/{}", employee_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::delete().uri(&position_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::delete().uri(&position_uri).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
#[ignore = "requires database"]
async fn duplicate_phone_or_national_id_is_conflict() {
    let app = test_app!(database_pool().await);
    let first = employee_body(&unique("dup"), "Employee");

    let req = test::TestRequest::post().uri("/api/v1/employees").set_json(&first).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let mut same_phone = employee_body(&unique("dup"), "Employee");
    same_phone["phone"] = first["phone"].clone();
    let req = test::TestRequest::post()
        .uri("/api/v1/employees/register")
        .set_json(&same_phone)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Phone number already registered");

    let mut same_national_id = employee_body(&unique("dup"), "Employee");
    same_national_id["national_id"] = first["national_id"].clone();
    let req = test::TestRequest::post()
        .uri("/api/v1/employees")
        .set_json(&same_national_id)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "National ID already registered");
}
