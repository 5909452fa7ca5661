use actix_web::{body::MessageBody, dev::ServiceResponse, test, web, App, Error};
use actix_service::Service;
use actix_http::Request;
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};

use crate::{db, handlers, schema::course::NewCourse, seed, GlobalState};

pub const TEST_ORIGIN: &str = "http://localhost:5173";

/// Fresh in-memory catalog with the schema in place.
///
/// A single connection that never expires: the database lives only as long
/// as that connection does.
pub async fn memory_pool() -> SqlitePool {

    let options = SqliteConnectOptions::new().in_memory(true);

    let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .min_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await
    .expect("Cant open the in-memory database");

    db::init_schema(&pool).await.expect("Cant create the courses table");

    pool
}

/// Builds the app exactly as `main` does (minus access logging) over a pool
/// seeded with `fixtures`.
pub async fn init(fixtures: Vec<NewCourse>) -> (impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error>, SqlitePool) {

    let pool = memory_pool().await;

    if !fixtures.is_empty() {
        seed::seed_courses(&pool, &fixtures).await.expect("Cant insert the fixtures");
    }

    let app_data = web::Data::new(GlobalState{pool: pool.clone()});

    let app = test::init_service(
        App::new()
            .wrap(handlers::cors(TEST_ORIGIN))
            .app_data(app_data)
            .configure(handlers::configure)
    ).await;

    (app, pool)
}
