use actix_web::{delete, get, web, HttpResponse, Responder, ResponseError};
use sqlx::{pool::PoolConnection, Sqlite};

use crate::{errors::CustomError, models::course, schema::{course::CourseQuery, DeleteAllResponse, MessageResponse}, GlobalState};

// one pooled connection per request, returned to the pool on drop
async fn acquire(data:&GlobalState) -> Result<PoolConnection<Sqlite>, HttpResponse>{
    data.pool.acquire().await.map_err(|e|{
        tracing::error!(error = %e, "failed to acquire a database connection");
        CustomError::new("Database unavailable").error_response()
    })
}

#[get("")]
pub async fn get_courses_handler(data:web::Data<GlobalState>, query:web::Query<CourseQuery>) -> impl Responder{
    let filter = query.filter();

    tracing::debug!(
        search = ?filter.search,
        category = filter.category.map(|c| c.code()),
        sort = ?filter.sort,
        limit = filter.limit,
        offset = filter.offset,
        "listing courses"
    );

    let mut conn = match acquire(&data).await {
        Ok(conn) => conn,
        Err(res) => return res,
    };

    match course::get_courses(&mut conn, &filter).await {
        Ok(courses) => HttpResponse::Ok().json(courses),
        Err(e) => e.error_response(),
    }
}

#[delete("/delete/{id}")]
pub async fn delete_course_handler(data:web::Data<GlobalState>, path:web::Path<i64>) -> impl Responder{
    let id = path.into_inner();

    let mut conn = match acquire(&data).await {
        Ok(conn) => conn,
        Err(res) => return res,
    };

    match course::delete_course_by_id(&mut conn, id).await {
        Ok(true) => {
            tracing::info!(id, "course deleted");
            HttpResponse::Ok().json(MessageResponse{message: format!("Course with id {id} deleted successfully")})
        },
        Ok(false) => HttpResponse::NotFound().json(CustomError::new(format!("Course with id {id} not found"))),
        Err(e) => e.error_response(),
    }
}

#[delete("/delete")]
pub async fn delete_all_courses_handler(data:web::Data<GlobalState>) -> impl Responder{
    let mut conn = match acquire(&data).await {
        Ok(conn) => conn,
        Err(res) => return res,
    };

    match course::delete_all_courses(&mut conn).await {
        Ok(deleted) => {
            tracing::info!(deleted, "all courses deleted");
            HttpResponse::Ok().json(DeleteAllResponse{message: "All courses deleted".to_string(), deleted})
        },
        Err(e) => e.error_response(),
    }
}
