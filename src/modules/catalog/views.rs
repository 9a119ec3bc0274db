//! Server-rendered pages for the catalog module.

use bookrack_http::flash::FlashMessage;
use bookrack_http::forms::FieldErrors;
use bookrack_http::html::{escape, field_error, layout};

use super::forms::BookSubmit;
use super::models::Book;

pub fn dashboard(flash: Option<&FlashMessage>, books: &[Book]) -> String {
    let mut rows = String::new();
    for book in books {
        rows.push_str(&format!(
            r#"<tr>
<td>{id}</td>
<td>{date}</td>
<td>{name}</td>
<td>{author}</td>
<td>{genre}</td>
<td>{rating}</td>
<td><a class="btn btn-sm btn-outline-secondary" href="/edit/{id}">Edit</a>
<a class="btn btn-sm btn-outline-danger" href="/delete/{id}">Delete</a></td>
</tr>
"#,
            id = book.id,
            date = escape(&book.date_added),
            name = escape(&book.book_name),
            author = escape(&book.author),
            genre = escape(&book.genre),
            rating = book.rating,
        ));
    }

    let body = format!(
        r#"<h1>My Books</h1>
<p><a class="btn btn-primary" href="/add">Add Book</a></p>
<table class="table table-striped">
<thead><tr><th>Id</th><th>Date Added</th><th>Name</th><th>Author</th><th>Genre</th><th>Rating</th><th></th></tr></thead>
<tbody>
{rows}</tbody>
</table>"#,
        rows = rows
    );

    layout("Dashboard", flash, &body)
}

/// Shared add/edit form; `action` distinguishes the two controllers.
pub fn book_form(title: &str, action: &str, values: &BookSubmit, errors: &FieldErrors) -> String {
    let mut fields = String::new();
    for (name, label) in [
        ("book_name", "Book Name"),
        ("author", "Author"),
        ("genre", "Genre"),
        ("rating", "Rating"),
    ] {
        fields.push_str(&format!(
            r#"<div class="mb-3">
<label class="form-label" for="{name}">{label}</label>
<input class="form-control" type="text" id="{name}" name="{name}" value="{value}">
{error}</div>
"#,
            name = name,
            label = label,
            value = escape(values.value(name)),
            error = field_error(errors, name),
        ));
    }

    let body = format!(
        r#"<h1>{title}</h1>
<form method="post" action="{action}">
{fields}<button class="btn btn-primary" type="submit">{title}</button>
</form>
<p class="mt-3"><a href="/dashboard">Back to dashboard</a></p>"#,
        title = escape(title),
        action = escape(action),
        fields = fields
    );

    layout(title, None, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_lists_book_fields() {
        let books = vec![Book {
            id: 1,
            date_added: "2026-08-29".to_string(),
            book_name: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: "SciFi".to_string(),
            rating: 4.5,
        }];
        let page = dashboard(None, &books);
        assert!(page.contains("Dune"));
        assert!(page.contains("Herbert"));
        assert!(page.contains("/edit/1"));
        assert!(page.contains("/delete/1"));
    }

    #[test]
    fn book_form_prefills_values_and_errors() {
        let values = BookSubmit {
            book_name: Some("Dune".to_string()),
            ..Default::default()
        };
        let mut errors = FieldErrors::new();
        errors.push("author", "This field is required");

        let page = book_form("Edit Book", "/edit/1", &values, &errors);
        assert!(page.contains(r#"value="Dune""#));
        assert!(page.contains("This field is required"));
        assert!(page.contains(r#"action="/edit/1""#));
    }
}
