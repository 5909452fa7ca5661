use std::str::FromStr;

use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, SqlitePool};

use crate::{errors::AppError, models::course::create_courses_table};

/// Opens the catalog database, creating the file on first run.
pub async fn connect(database_url:&str, max_connections:u32) -> Result<SqlitePool, AppError>{

    let options = SqliteConnectOptions::from_str(database_url)
    .map_err(|e|{
        tracing::error!(error = %e, database_url, "invalid database url");
        AppError::DbConnect
    })?
    .create_if_missing(true);

    SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect_with(options)
    .await
    .map_err(|e|{
        tracing::error!(error = %e, database_url, "failed to open the database");
        AppError::DbConnect
    })
}

pub async fn init_schema(pool:&SqlitePool) -> Result<(), AppError>{

    let mut conn = pool.acquire().await.map_err(|_e| AppError::DbConnect)?;

    create_courses_table(&mut conn).await.map_err(|_e| AppError::Schema)
}
