use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::{errors::CustomError, schema::course::{fold_search_text, CourseFilter, NewCourse}};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Course{
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    pub customers: i64,
    pub image: String,
}

const SELECT_COURSES: &str = "SELECT id, name, description, price, category, customers, image FROM courses";

pub async fn create_courses_table(conn:&mut SqliteConnection) -> Result<(), CustomError>{

    sqlx::query(
        r#"
            CREATE TABLE IF NOT EXISTS courses (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                search_name TEXT NOT NULL,
                description TEXT NOT NULL,
                price INTEGER NOT NULL,
                category TEXT NOT NULL,
                customers INTEGER NOT NULL,
                image TEXT NOT NULL
            )
        "#
    )
    .execute(conn)
    .await
    .map_err(|e|{
        tracing::error!(error = %e, "failed to create courses table");
        CustomError::new("Error while creating the courses table")
    })?;

    Ok(())
}

fn escape_like(term:&str) -> String{
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Composes the listing query: name search, then category, then ordering,
/// then the page window. The order of the clauses is fixed.
pub fn build_courses_query(filter:&CourseFilter) -> QueryBuilder<'static, Sqlite>{
    let mut builder = QueryBuilder::new(SELECT_COURSES);
    let mut has_where = false;

    if let Some(search) = &filter.search {
        builder.push(" WHERE search_name LIKE ");
        builder.push_bind(format!("%{}%", escape_like(search)));
        builder.push(" ESCAPE '\\'");
        has_where = true;
    }

    if let Some(category) = filter.category {
        builder.push(if has_where { " AND " } else { " WHERE " });
        builder.push("category = ");
        builder.push_bind(category.label());
    }

    if let Some(sort) = filter.sort {
        builder.push(" ORDER BY ");
        builder.push(sort.order_by());
    }

    // SQLite integers are signed; clamp the window rather than wrap
    builder.push(" LIMIT ");
    builder.push_bind(i64::from(filter.limit));
    builder.push(" OFFSET ");
    builder.push_bind(i64::try_from(filter.offset).unwrap_or(i64::MAX));

    builder
}

pub async fn get_courses(conn:&mut SqliteConnection, filter:&CourseFilter) -> Result<Vec<Course>, CustomError>{

    let mut builder = build_courses_query(filter);

    let result = builder
        .build_query_as::<Course>()
        .fetch_all(conn)
        .await;

    match result {
        Ok(val) => Ok(val),
        Err(e) => {
            tracing::error!(error = %e, "failed to fetch courses");
            Err(CustomError::new("Error while fetching the courses"))
        }
    }
}

/// Returns `false` when no course has this id.
pub async fn delete_course_by_id(conn:&mut SqliteConnection, id:i64) -> Result<bool, CustomError>{

    let result = sqlx::query(
        r#"
            DELETE FROM courses
            WHERE id = ?
        "#
    )
    .bind(id)
    .execute(conn)
    .await
    .map_err(|e|{
        tracing::error!(error = %e, id, "failed to delete course");
        CustomError::new("Error while deleting the course")
    })?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_all_courses(conn:&mut SqliteConnection) -> Result<u64, CustomError>{

    let result = sqlx::query("DELETE FROM courses")
    .execute(conn)
    .await
    .map_err(|e|{
        tracing::error!(error = %e, "failed to delete all courses");
        CustomError::new("Error while deleting all the courses")
    })?;

    Ok(result.rows_affected())
}

pub async fn insert_course(conn:&mut SqliteConnection, course:&NewCourse) -> Result<i64, CustomError>{

    let result = sqlx::query(
        r#"
            INSERT INTO courses (name, search_name, description, price, category, customers, image)
            VALUES (?, ?, ?, ?, ?, ?, ?)
        "#
    )
    .bind(&course.name)
    .bind(fold_search_text(&course.name))
    .bind(&course.description)
    .bind(course.price)
    .bind(&course.category)
    .bind(course.customers)
    .bind(&course.image)
    .execute(conn)
    .await
    .map_err(|e|{
        tracing::error!(error = %e, name = %course.name, "failed to insert course");
        CustomError::new("Error while creating a course")
    })?;

    Ok(result.last_insert_rowid())
}

pub async fn count_courses(conn:&mut SqliteConnection) -> Result<i64, CustomError>{

    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM courses")
    .fetch_one(conn)
    .await
    .map_err(|e|{
        tracing::error!(error = %e, "failed to count courses");
        CustomError::new("Error while counting the courses")
    })
}

#[cfg(test)]
mod tests{
    use sqlx::{Connection, Execute};

    use super::*;
    use crate::schema::course::{Category, CourseQuery, SortOrder};

    fn new_course(name:&str, price:i64, category:Category, customers:i64) -> NewCourse{
        NewCourse{
            name: name.to_string(),
            description: format!("{name} description"),
            price,
            category: category.label().to_string(),
            customers,
            image: "/templates/img/IT1.jpeg".to_string(),
        }
    }

    async fn memory_conn() -> SqliteConnection{
        let mut conn = SqliteConnection::connect("sqlite::memory:").await.unwrap();
        create_courses_table(&mut conn).await.unwrap();
        conn
    }

    #[test]
    fn test_plain_query_only_windows(){
        let mut builder = build_courses_query(&CourseQuery::default().filter());
        assert_eq!(builder.build().sql(), format!("{SELECT_COURSES} LIMIT ? OFFSET ?"));
    }

    #[test]
    fn test_clause_order(){
        let filter = CourseFilter{
            search: Some("python".to_string()),
            category: Some(Category::Programming),
            sort: Some(SortOrder::Popularity),
            limit: 12,
            offset: 12,
        };

        let mut builder = build_courses_query(&filter);
        let query = builder.build();

        assert_eq!(
            query.sql(),
            format!("{SELECT_COURSES} WHERE search_name LIKE ? ESCAPE '\\' AND category = ? ORDER BY customers DESC LIMIT ? OFFSET ?")
        );
    }

    #[test]
    fn test_category_without_search_opens_where(){
        let filter = CourseFilter{category: Some(Category::Design), ..CourseQuery::default().filter()};
        let mut builder = build_courses_query(&filter);
        let query = builder.build();
        assert!(query.sql().contains(" WHERE category = ?"));
        assert!(!query.sql().contains(" AND "));
    }

    #[test]
    fn test_escape_like(){
        assert_eq!(escape_like("100%_off\\"), "100\\%\\_off\\\\");
        assert_eq!(escape_like("python"), "python");
    }

    #[actix_web::test]
    async fn test_search_treats_wildcards_literally(){
        let mut conn = memory_conn().await;
        insert_course(&mut conn, &new_course("Скидка 100% на Figma", 20000, Category::Design, 10)).await.unwrap();
        insert_course(&mut conn, &new_course("Figma для начинающих", 20000, Category::Design, 122)).await.unwrap();

        let filter = CourseQuery{search: Some("100%".to_string()), ..Default::default()}.filter();
        let courses = get_courses(&mut conn, &filter).await.unwrap();
        assert_eq!(courses.len(), 1);

        let filter = CourseQuery{search: Some("_".to_string()), ..Default::default()}.filter();
        assert!(get_courses(&mut conn, &filter).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_search_folds_cyrillic_case(){
        let mut conn = memory_conn().await;
        insert_course(&mut conn, &new_course("Дизайн презентаций", 15000, Category::Design, 91)).await.unwrap();
        insert_course(&mut conn, &new_course("Motion-дизайн", 30000, Category::Design, 47)).await.unwrap();

        for term in ["Дизайн", "дизайн", "ДИЗАЙН"] {
            let filter = CourseQuery{search: Some(term.to_string()), ..Default::default()}.filter();
            let courses = get_courses(&mut conn, &filter).await.unwrap();
            assert_eq!(courses.len(), 2, "search {term}");
        }

        let filter = CourseQuery{search: Some("ПРЕЗЕНТАЦИЙ".to_string()), ..Default::default()}.filter();
        let courses = get_courses(&mut conn, &filter).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Дизайн презентаций");
    }

    #[actix_web::test]
    async fn test_delete_course_by_id(){
        let mut conn = memory_conn().await;
        let id = insert_course(&mut conn, &new_course("Git и командная разработка", 11000, Category::Programming, 140)).await.unwrap();

        assert!(!delete_course_by_id(&mut conn, id + 1).await.unwrap());
        assert_eq!(count_courses(&mut conn).await.unwrap(), 1);

        assert!(delete_course_by_id(&mut conn, id).await.unwrap());
        assert_eq!(count_courses(&mut conn).await.unwrap(), 0);

        // second delete of the same id is a not-found no-op
        assert!(!delete_course_by_id(&mut conn, id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_delete_all_courses(){
        let mut conn = memory_conn().await;
        for customers in [1, 2, 3] {
            insert_course(&mut conn, &new_course("SQL для аналитиков", 19000, Category::DataAnalytics, customers)).await.unwrap();
        }

        assert_eq!(delete_all_courses(&mut conn).await.unwrap(), 3);
        assert_eq!(delete_all_courses(&mut conn).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn test_write_path_does_not_check_category(){
        let mut conn = memory_conn().await;
        let mut course = new_course("Гитара", 5000, Category::Design, 3);
        course.category = "Музыка".to_string();
        insert_course(&mut conn, &course).await.unwrap();

        let courses = get_courses(&mut conn, &CourseQuery::default().filter()).await.unwrap();
        assert_eq!(courses[0].category, "Музыка");
    }
}
