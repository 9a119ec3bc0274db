use serde::{Deserialize, Serialize};

/// A catalogued book, one row in the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    /// `YYYY-MM-DD`, stamped at creation and never changed afterwards.
    pub date_added: String,
    pub book_name: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
}

/// Field set for inserting a new book.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub date_added: String,
    pub book_name: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
}

/// Mutable fields for an in-place update; `date_added` is untouchable.
#[derive(Debug, Clone)]
pub struct BookFields {
    pub book_name: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
}
