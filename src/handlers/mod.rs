pub mod course;

use actix_cors::Cors;
use actix_web::{error::InternalError, web, HttpResponse};

use crate::errors::CustomError;

/// Registers every catalog route. Shared by the server and the test app.
pub fn configure(cfg: &mut web::ServiceConfig){
    cfg.app_data(query_config())
    .service(
        web::scope("/courses")
        .service(course::get_courses_handler)
        .service(course::delete_all_courses_handler)
        .service(course::delete_course_handler)
    );
}

/// Development CORS policy: one browser origin, anything else goes.
pub fn cors(origin:&str) -> Cors{
    Cors::default()
    .allowed_origin(origin)
    .allow_any_method()
    .allow_any_header()
    .supports_credentials()
}

/// Bad query strings (unknown category, non-numeric page) are a 422 with a JSON body.
fn query_config() -> web::QueryConfig{
    web::QueryConfig::default().error_handler(|err, _req|{
        let body = CustomError::new(err.to_string());
        tracing::debug!(error = %body, "rejected query string");
        InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(body)).into()
    })
}
