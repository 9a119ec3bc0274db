//! Add/Edit form validation.

use serde::Deserialize;

use bookrack_http::forms::{required, FieldErrors};

/// Raw add/edit submission; fields are optional so absence and emptiness
/// both surface as "required" rather than extractor rejections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookSubmit {
    pub book_name: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub rating: Option<String>,
}

/// Validated book fields ready for the store.
#[derive(Debug, Clone)]
pub struct BookData {
    pub book_name: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
}

impl BookSubmit {
    pub fn validate(&self) -> Result<BookData, FieldErrors> {
        let mut errors = FieldErrors::new();

        let book_name = required(&mut errors, "book_name", &self.book_name);
        let author = required(&mut errors, "author", &self.author);
        let genre = required(&mut errors, "genre", &self.genre);
        let rating_raw = required(&mut errors, "rating", &self.rating);

        // The rating column is REAL; free text has to survive the numeric
        // coercion boundary here.
        let rating = match rating_raw.parse::<f64>() {
            Ok(r) => r,
            Err(_) => {
                if !rating_raw.is_empty() {
                    errors.push("rating", "Rating must be a number");
                }
                0.0
            }
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(BookData {
            book_name,
            author,
            genre,
            rating,
        })
    }

    pub fn value(&self, field: &str) -> &str {
        match field {
            "book_name" => self.book_name.as_deref(),
            "author" => self.author.as_deref(),
            "genre" => self.genre.as_deref(),
            "rating" => self.rating.as_deref(),
            _ => None,
        }
        .unwrap_or("")
    }
}
