use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use errors::AppError;
use sqlx::SqlitePool;
use tracing_subscriber::EnvFilter;

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod schema;
mod seed;
#[cfg(test)]
mod test_init_app;

struct GlobalState{
    pool: SqlitePool
}

#[actix_web::main]
async fn main() -> Result<(), AppError> {

    dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;

    let pool = db::connect(&config.database_url, config.max_connections).await?;
    db::init_schema(&pool).await?;

    if let Some(path) = &config.seed_file {
        let courses = seed::load_seed_file(path)?;
        seed::seed_courses(&pool, &courses).await?;
    }

    let courses = {
        let mut conn = pool.acquire().await.map_err(|_e| AppError::DbConnect)?;
        models::course::count_courses(&mut conn).await.map_err(|_e| AppError::InternalError)?
    };

    tracing::info!(database = %config.database_url, courses, "catalog database ready");

    let app_data = web::Data::new(GlobalState{pool});
    let cors_origin = config.cors_origin.clone();

    tracing::info!(address = %config.server_address, cors_origin = %config.cors_origin, "starting server");

    HttpServer::new(
        move||{
            App::new()
            .wrap(handlers::cors(&cors_origin))
            .wrap(Logger::default())
            .app_data(app_data.clone())
            .configure(handlers::configure)
        }
    ).bind(&config.server_address)
    .map_err(|_e|AppError::SocketBind)?
    .run()
    .await
    .map_err(|_e|AppError::ServerStart)?;

    Ok(())

}
