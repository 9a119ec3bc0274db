//! SQLite-backed book repository.

use sqlx::SqlitePool;
use thiserror::Error;

use bookrack_http::error::AppError;

use super::models::{Book, BookFields, NewBook};

pub const CREATE_TABLE_SQL: &str = "\
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date_added TEXT NOT NULL,
    book_name TEXT NOT NULL UNIQUE,
    author TEXT NOT NULL,
    genre TEXT NOT NULL,
    rating REAL NOT NULL
);";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("a book named '{0}' already exists")]
    DuplicateName(String),

    #[error("book {0} not found")]
    NotFound(i64),

    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateName(_) => AppError::conflict(vec![], err.to_string()),
            StoreError::NotFound(_) => AppError::not_found(err.to_string()),
            StoreError::Database(e) => AppError::Internal(e.into()),
        }
    }
}

/// Per-request handle over the shared pool.
pub struct BookStore {
    pool: SqlitePool,
}

impl BookStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the `books` table if absent. Idempotent.
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// All books, ascending by name.
    pub async fn list_all(&self) -> Result<Vec<Book>, StoreError> {
        let books = sqlx::query_as::<_, Book>("SELECT * FROM books ORDER BY book_name")
            .fetch_all(&self.pool)
            .await?;
        Ok(books)
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<Book>, StoreError> {
        let book = sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    pub async fn insert(&self, book: &NewBook) -> Result<i64, StoreError> {
        let result = sqlx::query(
            "INSERT INTO books (date_added, book_name, author, genre, rating) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&book.date_added)
        .bind(&book.book_name)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.rating)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_or_db(e, &book.book_name))?;

        Ok(result.last_insert_rowid())
    }

    /// Update the mutable fields of an existing book in place.
    pub async fn update(&self, id: i64, fields: &BookFields) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE books SET book_name = ?, author = ?, genre = ?, rating = ? WHERE id = ?",
        )
        .bind(&fields.book_name)
        .bind(&fields.author)
        .bind(&fields.genre)
        .bind(fields.rating)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| duplicate_or_db(e, &fields.book_name))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn duplicate_or_db(err: sqlx::Error, name: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            StoreError::DuplicateName(name.to_string())
        }
        _ => StoreError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> BookStore {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = BookStore::new(pool);
        store.init_schema().await.unwrap();
        store
    }

    fn dune() -> NewBook {
        NewBook {
            date_added: "2026-08-29".to_string(),
            book_name: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: "SciFi".to_string(),
            rating: 4.5,
        }
    }

    fn foundation() -> NewBook {
        NewBook {
            date_added: "2026-08-29".to_string(),
            book_name: "Foundation".to_string(),
            author: "Asimov".to_string(),
            genre: "SciFi".to_string(),
            rating: 4.8,
        }
    }

    #[tokio::test]
    async fn init_schema_is_idempotent() {
        let store = test_store().await;
        store.init_schema().await.unwrap();
    }

    #[tokio::test]
    async fn inserted_books_list_in_name_order() {
        let store = test_store().await;
        store.insert(&foundation()).await.unwrap();
        store.insert(&dune()).await.unwrap();

        let books = store.list_all().await.unwrap();
        let names: Vec<&str> = books.iter().map(|b| b.book_name.as_str()).collect();
        assert_eq!(names, vec!["Dune", "Foundation"]);
    }

    #[tokio::test]
    async fn duplicate_name_is_rejected() {
        let store = test_store().await;
        store.insert(&dune()).await.unwrap();

        let err = store.insert(&dune()).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(name) if name == "Dune"));
    }

    #[tokio::test]
    async fn get_by_id_returns_none_for_missing_row() {
        let store = test_store().await;
        assert!(store.get_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_changes_fields_but_not_date_added() {
        let store = test_store().await;
        let id = store.insert(&dune()).await.unwrap();

        store
            .update(
                id,
                &BookFields {
                    book_name: "Dune Messiah".to_string(),
                    author: "Frank Herbert".to_string(),
                    genre: "Science Fiction".to_string(),
                    rating: 4.0,
                },
            )
            .await
            .unwrap();

        let book = store.get_by_id(id).await.unwrap().unwrap();
        assert_eq!(book.book_name, "Dune Messiah");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.rating, 4.0);
        assert_eq!(book.date_added, "2026-08-29");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = test_store().await;
        let err = store
            .update(
                7,
                &BookFields {
                    book_name: "x".to_string(),
                    author: "y".to_string(),
                    genre: "z".to_string(),
                    rating: 1.0,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(7)));
    }

    #[tokio::test]
    async fn update_to_existing_name_is_duplicate() {
        let store = test_store().await;
        store.insert(&dune()).await.unwrap();
        let id = store.insert(&foundation()).await.unwrap();

        let err = store
            .update(
                id,
                &BookFields {
                    book_name: "Dune".to_string(),
                    author: "Asimov".to_string(),
                    genre: "SciFi".to_string(),
                    rating: 4.8,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateName(_)));
    }

    #[tokio::test]
    async fn delete_removes_row() {
        let store = test_store().await;
        let id = store.insert(&dune()).await.unwrap();

        store.delete(id).await.unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_missing_id_is_not_found() {
        let store = test_store().await;
        let err = store.delete(99).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(99)));
    }
}
