//! Postgres-backed book information repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::BookInformationRepository;
use crate::{
    error::{AppError, AppResult},
    models::book::{BookInformation, NewBookInformation},
};

#[derive(Clone)]
pub struct PgBookInformationRepository {
    pool: Pool<Postgres>,
}

impl PgBookInformationRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Turn a unique-index violation on the title into a `Conflict`
fn map_title_conflict(err: sqlx::Error, title: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict(format!("Book information '{}' already exists", title))
        }
        _ => AppError::Database(err),
    }
}

/// Escape LIKE metacharacters so the term matches literally
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl BookInformationRepository for PgBookInformationRepository {
    async fn list_all(&self) -> AppResult<Vec<BookInformation>> {
        let rows = sqlx::query_as::<_, BookInformation>(
            "SELECT id, title, stock, available FROM book_informations ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<BookInformation>> {
        let row = sqlx::query_as::<_, BookInformation>(
            "SELECT id, title, stock, available FROM book_informations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn search(&self, term: &str) -> AppResult<Vec<BookInformation>> {
        let rows = sqlx::query_as::<_, BookInformation>(
            r"
            SELECT id, title, stock, available FROM book_informations
            WHERE title ILIKE $1 ESCAPE '\'
            ORDER BY id
            ",
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create(&self, book: &NewBookInformation) -> AppResult<BookInformation> {
        let row = sqlx::query_as::<_, BookInformation>(
            r#"
            INSERT INTO book_informations (title, stock, available)
            VALUES ($1, $2, $3)
            RETURNING id, title, stock, available
            "#,
        )
        .bind(&book.title)
        .bind(book.stock)
        .bind(book.available)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_title_conflict(e, &book.title))?;

        tracing::debug!(book_id = row.id, "Inserted book information");
        Ok(row)
    }

    async fn update(&self, book: &BookInformation) -> AppResult<BookInformation> {
        sqlx::query_as::<_, BookInformation>(
            r#"
            UPDATE book_informations
            SET title = $2, stock = $3, available = $4
            WHERE id = $1
            RETURNING id, title, stock, available
            "#,
        )
        .bind(book.id)
        .bind(&book.title)
        .bind(book.stock)
        .bind(book.available)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_title_conflict(e, &book.title))?
        .ok_or_else(|| AppError::NotFound(format!("Book information {} not found", book.id)))
    }

    async fn delete(&self, book: &BookInformation) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM book_informations WHERE id = $1")
            .bind(book.id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Book information {} not found",
                book.id
            )));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("gatsby"), "%gatsby%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\"), "%c:\\\\%");
    }

    #[test]
    fn test_non_unique_errors_stay_database_errors() {
        let err = map_title_conflict(sqlx::Error::RowNotFound, "Dune");
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }
}
