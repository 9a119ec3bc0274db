pub mod forms;
pub mod models;
pub mod repository;
pub mod views;

use async_trait::async_trait;
use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use serde::Deserialize;
use time::macros::format_description;
use time::OffsetDateTime;

use bookrack_http::error::AppError;
use bookrack_http::flash::{flash_redirect, rendered, Flash, FlashMessage};
use bookrack_http::forms::FieldErrors;
use bookrack_kernel::{AppState, InitCtx, Migration, Module};

use forms::BookSubmit;
use models::{Book, BookFields, NewBook};
use repository::{BookStore, StoreError, CREATE_TABLE_SQL};

/// Book catalog module: dashboard, add/edit/delete, schema bootstrap, search.
pub struct CatalogModule;

impl CatalogModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for CatalogModule {
    fn name(&self) -> &'static str {
        "catalog"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "catalog module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/dashboard", get(dashboard))
            .route("/add", get(add_page).post(add_submit))
            .route("/createdb", get(create_db).post(create_db))
            .route("/delete/{id}", get(delete_book).post(delete_book))
            .route("/edit/{id}", get(edit_page).post(edit_submit))
            .route("/search", axum::routing::post(search))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(serde_json::json!({
            "paths": {
                "/search": {
                    "post": {
                        "summary": "Search books by name substring",
                        "tags": ["Catalog"],
                        "requestBody": {
                            "content": {
                                "application/x-www-form-urlencoded": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "searchQuery": { "type": "string" }
                                        },
                                        "required": ["searchQuery"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "200": {
                                "description": "Matching books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "422": {
                                "description": "Missing query",
                                "content": {
                                    "application/json": {
                                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "integer", "format": "int64" },
                            "date_added": { "type": "string", "description": "YYYY-MM-DD" },
                            "book_name": { "type": "string" },
                            "author": { "type": "string" },
                            "genre": { "type": "string" },
                            "rating": { "type": "number", "format": "double" }
                        },
                        "required": ["id", "date_added", "book_name", "author", "genre", "rating"]
                    }
                }
            }
        }))
    }

    fn migrations(&self) -> Vec<Migration> {
        vec![Migration {
            id: "001_create_books",
            up: CREATE_TABLE_SQL,
        }]
    }
}

/// Create a new instance of the catalog module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(CatalogModule::new())
}

/// Case-insensitive substring filter on `book_name`.
pub fn filter_by_name(books: Vec<Book>, query: &str) -> Vec<Book> {
    let needle = query.to_lowercase();
    books
        .into_iter()
        .filter(|book| book.book_name.to_lowercase().contains(&needle))
        .collect()
}

fn today() -> anyhow::Result<String> {
    let date = OffsetDateTime::now_utc()
        .date()
        .format(format_description!("[year]-[month]-[day]"))?;
    Ok(date)
}

async fn dashboard(State(state): State<AppState>, flash: Flash) -> Result<Response, AppError> {
    let store = BookStore::new(state.db.clone());
    let books = store.list_all().await?;
    Ok(rendered(
        views::dashboard(flash.message(), &books),
        flash.is_some(),
    ))
}

async fn add_page() -> Response {
    rendered(
        views::book_form("Add Book", "/add", &BookSubmit::default(), &FieldErrors::new()),
        false,
    )
}

async fn add_submit(
    State(state): State<AppState>,
    Form(input): Form<BookSubmit>,
) -> Result<Response, AppError> {
    let data = match input.validate() {
        Ok(data) => data,
        Err(errors) => {
            return Ok(rendered(
                views::book_form("Add Book", "/add", &input, &errors),
                false,
            ));
        }
    };

    let store = BookStore::new(state.db.clone());
    let new_book = NewBook {
        date_added: today()?,
        book_name: data.book_name,
        author: data.author,
        genre: data.genre,
        rating: data.rating,
    };

    match store.insert(&new_book).await {
        Ok(id) => {
            tracing::info!(id, book_name = %new_book.book_name, "book added");
            Ok(flash_redirect(
                "/dashboard",
                FlashMessage::success("Book added to your catalog"),
            ))
        }
        Err(StoreError::DuplicateName(_)) => {
            let mut errors = FieldErrors::new();
            errors.push("book_name", "A book with this name already exists");
            Ok(rendered(
                views::book_form("Add Book", "/add", &input, &errors),
                false,
            ))
        }
        Err(e) => Err(e.into()),
    }
}

async fn create_db(State(state): State<AppState>) -> Result<&'static str, AppError> {
    let store = BookStore::new(state.db.clone());
    store.init_schema().await?;
    Ok("Database Created Successfully")
}

async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let store = BookStore::new(state.db.clone());
    store.delete(id).await?;
    tracing::info!(id, "book deleted");
    Ok(Redirect::to("/dashboard").into_response())
}

async fn edit_page(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let store = BookStore::new(state.db.clone());
    let book = store
        .get_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("book {} not found", id)))?;

    let values = BookSubmit {
        book_name: Some(book.book_name),
        author: Some(book.author),
        genre: Some(book.genre),
        rating: Some(book.rating.to_string()),
    };
    let action = format!("/edit/{}", id);
    Ok(rendered(
        views::book_form("Edit Book", &action, &values, &FieldErrors::new()),
        false,
    ))
}

async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(input): Form<BookSubmit>,
) -> Result<Response, AppError> {
    let action = format!("/edit/{}", id);

    let data = match input.validate() {
        Ok(data) => data,
        Err(errors) => {
            return Ok(rendered(
                views::book_form("Edit Book", &action, &input, &errors),
                false,
            ));
        }
    };

    let store = BookStore::new(state.db.clone());
    let fields = BookFields {
        book_name: data.book_name,
        author: data.author,
        genre: data.genre,
        rating: data.rating,
    };

    match store.update(id, &fields).await {
        Ok(()) => {
            tracing::info!(id, "book updated");
            Ok(Redirect::to("/dashboard").into_response())
        }
        Err(StoreError::DuplicateName(_)) => {
            let mut errors = FieldErrors::new();
            errors.push("book_name", "A book with this name already exists");
            Ok(rendered(
                views::book_form("Edit Book", &action, &input, &errors),
                false,
            ))
        }
        Err(e) => Err(e.into()),
    }
}

#[derive(Debug, Deserialize)]
struct SearchSubmit {
    #[serde(rename = "searchQuery")]
    search_query: Option<String>,
}

async fn search(
    State(state): State<AppState>,
    Form(input): Form<SearchSubmit>,
) -> Result<Json<Vec<Book>>, AppError> {
    let query = match input.search_query {
        Some(q) => q,
        None => {
            let mut errors = FieldErrors::new();
            errors.push("searchQuery", "This field is required");
            return Err(AppError::validation(errors.details(), "searchQuery is required"));
        }
    };

    let store = BookStore::new(state.db.clone());
    let books = store.list_all().await?;
    Ok(Json(filter_by_name(books, &query)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use bookrack_auth::StaticCredentials;
    use bookrack_kernel::settings::Settings;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn sample(name: &str) -> Book {
        Book {
            id: 1,
            date_added: "2026-08-29".to_string(),
            book_name: name.to_string(),
            author: "a".to_string(),
            genre: "g".to_string(),
            rating: 4.0,
        }
    }

    #[test]
    fn filter_matches_case_insensitive_substring() {
        let books = vec![sample("Dune"), sample("Foundation")];
        let matches = filter_by_name(books, "dun");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].book_name, "Dune");
    }

    #[test]
    fn filter_with_empty_query_matches_everything() {
        let books = vec![sample("Dune"), sample("Foundation")];
        assert_eq!(filter_by_name(books, "").len(), 2);
    }

    async fn test_app() -> Router {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = BookStore::new(pool.clone());
        store.init_schema().await.unwrap();

        let state = AppState::new(
            Arc::new(Settings::default()),
            pool,
            Arc::new(StaticCredentials::default()),
        );
        CatalogModule::new().routes().with_state(state)
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn add_then_dashboard_lists_book_with_current_date() {
        let app = test_app().await;

        // Stamping happens inside the request; bracket it so a test run
        // straddling UTC midnight still passes.
        let date_before = today().unwrap();
        let response = app
            .clone()
            .oneshot(form_post(
                "/add",
                "book_name=Dune&author=Herbert&genre=SciFi&rating=4.5",
            ))
            .await
            .unwrap();
        let date_after = today().unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get("location").unwrap(),
            "/dashboard"
        );

        let response = app
            .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("Dune"));
        assert!(body.contains("Herbert"));
        assert!(body.contains(&date_before) || body.contains(&date_after));
    }

    #[tokio::test]
    async fn add_with_missing_fields_redisplays_form() {
        let app = test_app().await;

        let response = app
            .oneshot(form_post("/add", "book_name=Dune&rating=4.5"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        assert!(body.contains("This field is required"));
        // Submitted values are preserved.
        assert!(body.contains(r#"value="Dune""#));
    }

    #[tokio::test]
    async fn duplicate_add_redisplays_with_name_error() {
        let app = test_app().await;
        let form = "book_name=Dune&author=Herbert&genre=SciFi&rating=4.5";

        app.clone().oneshot(form_post("/add", form)).await.unwrap();
        let response = app.oneshot(form_post("/add", form)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("A book with this name already exists"));
    }

    #[tokio::test]
    async fn delete_missing_book_is_404() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/delete/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn edit_updates_in_place_and_preserves_date() {
        let app = test_app().await;

        let date_before = today().unwrap();
        app.clone()
            .oneshot(form_post(
                "/add",
                "book_name=Dune&author=Herbert&genre=SciFi&rating=4.5",
            ))
            .await
            .unwrap();
        let date_after = today().unwrap();

        let response = app
            .clone()
            .oneshot(form_post(
                "/edit/1",
                "book_name=Dune+Messiah&author=Frank+Herbert&genre=SciFi&rating=4.0",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let response = app
            .oneshot(Request::builder().uri("/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_string(response).await;
        assert!(body.contains("Dune Messiah"));
        // date_added was stamped at add time and must survive the edit.
        assert!(body.contains(&date_before) || body.contains(&date_after));
    }

    #[tokio::test]
    async fn edit_missing_book_is_404() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/edit/42").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_edit_redisplays_with_name_error() {
        let app = test_app().await;
        app.clone()
            .oneshot(form_post(
                "/add",
                "book_name=Dune&author=Herbert&genre=SciFi&rating=4.5",
            ))
            .await
            .unwrap();
        app.clone()
            .oneshot(form_post(
                "/add",
                "book_name=Foundation&author=Asimov&genre=SciFi&rating=4.8",
            ))
            .await
            .unwrap();

        let response = app
            .oneshot(form_post(
                "/edit/2",
                "book_name=Dune&author=Asimov&genre=SciFi&rating=4.8",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("A book with this name already exists"));
    }

    #[tokio::test]
    async fn createdb_returns_plain_confirmation() {
        let app = test_app().await;
        let response = app
            .oneshot(Request::builder().uri("/createdb").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "Database Created Successfully");
    }

    #[tokio::test]
    async fn search_returns_matching_books_as_json() {
        let app = test_app().await;

        for form in [
            "book_name=Dune&author=Herbert&genre=SciFi&rating=4.5",
            "book_name=Foundation&author=Asimov&genre=SciFi&rating=4.8",
        ] {
            app.clone().oneshot(form_post("/add", form)).await.unwrap();
        }

        let response = app
            .oneshot(form_post("/search", "searchQuery=dun"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_string(response).await;
        let matches: Vec<Book> = serde_json::from_str(&body).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].book_name, "Dune");
    }

    #[tokio::test]
    async fn search_without_query_is_validation_error() {
        let app = test_app().await;
        let response = app.oneshot(form_post("/search", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
