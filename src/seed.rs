use std::path::Path;

use sqlx::SqlitePool;

use crate::{errors::AppError, models::course::{delete_all_courses, insert_course}, schema::course::NewCourse};

pub fn load_seed_file(path:&Path) -> Result<Vec<NewCourse>, AppError>{
    let raw = std::fs::read_to_string(path)
    .map_err(|e| AppError::Seed(format!("cant read {}: {e}", path.display())))?;

    serde_json::from_str(&raw)
    .map_err(|e| AppError::Seed(format!("cant parse {}: {e}", path.display())))
}

/// Replaces the whole table with `courses` in a single transaction.
pub async fn seed_courses(pool:&SqlitePool, courses:&[NewCourse]) -> Result<u64, AppError>{

    let mut tx = pool.begin().await.map_err(|e| AppError::Seed(e.to_string()))?;

    let removed = delete_all_courses(&mut tx).await.map_err(|e| AppError::Seed(e.error))?;

    for course in courses {
        insert_course(&mut tx, course).await.map_err(|e| AppError::Seed(e.error))?;
    }

    tx.commit().await.map_err(|e| AppError::Seed(e.to_string()))?;

    tracing::info!(removed, inserted = courses.len(), "catalog seeded");

    Ok(courses.len() as u64)
}
