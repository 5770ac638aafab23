use actix_web::{web, HttpRequest};

use crate::errors::AppError;
use crate::handlers::{department, employee, position, salary, work_assignment};

#[cfg(test)]
mod tests;

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid input data: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req: &HttpRequest| {
        log::debug!("Rejected path {}: {}", req.path(), err);
        AppError::BadRequest("Invalid ID".to_string()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        AppError::BadRequest(format!("Invalid query parameters: {}", err)).into()
    })
}

/// Registers every resource under `/api/v1`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .app_data(query_config())
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/employees")
                        .route("/login", web::post().to(employee::login_employee))
                        .route("/register", web::post().to(employee::register_employee))
                        .route("", web::get().to(employee::get_employees))
                        .route("", web::post().to(employee::create_employee))
                        .route("/{id}", web::put().to(employee::update_employee))
                        .route("/{id}", web::delete().to(employee::delete_employee)),
                )
                .service(
                    web::scope("/departments")
                        .route("", web::get().to(department::get_departments))
                        .route(
                            "/{department_id}/employees",
                            web::get().to(department::get_employees_by_department),
                        )
                        .route("", web::post().to(department::create_department))
                        .route("/{id}", web::put().to(department::update_department))
                        .route("/{id}", web::delete().to(department::delete_department)),
                )
                .service(
                    web::scope("/positions")
                        .route("", web::get().to(position::get_positions))
                        .route(
                            "/{position_id}/employees",
                            web::get().to(position::get_employees_by_position),
                        )
                        .route("", web::post().to(position::create_position))
                        .route("/{id}", web::put().to(position::update_position))
                        .route("/{id}", web::delete().to(position::delete_position)),
                )
                .service(
                    // `/stats` before `/{id}` so it is not read as an id.
                    web::scope("/salaries")
                        .route("/stats", web::get().to(salary::get_salary_statistics))
                        .route("", web::get().to(salary::get_salaries))
                        .route("/{id}", web::get().to(salary::get_salary))
                        .route("", web::post().to(salary::create_salary))
                        .route("/{id}", web::put().to(salary::update_salary))
                        .route("/{id}", web::delete().to(salary::delete_salary))
                        .route("/{id}/pay", web::put().to(salary::pay_salary)),
                )
                .service(
                    web::scope("/workassignments")
                        .route("", web::get().to(work_assignment::get_work_assignments))
                        .route("", web::post().to(work_assignment::create_work_assignment))
                        .route("/{id}", web::put().to(work_assignment::update_work_assignment))
                        .route("/{id}", web::delete().to(work_assignment::delete_work_assignment)),
                ),
        );
}
