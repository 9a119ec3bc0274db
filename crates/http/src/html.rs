//! Minimal server-rendered HTML helpers shared by page controllers.

use crate::flash::FlashMessage;
use crate::forms::FieldErrors;

/// Escape text for safe interpolation into HTML.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared document shell.
pub fn layout(title: &str, flash: Option<&FlashMessage>, body: &str) -> String {
    let notice = match flash {
        Some(f) => format!(
            r#"<div class="alert alert-{}" role="alert">{}</div>"#,
            f.level.as_str(),
            escape(&f.message)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" rel="stylesheet">
</head>
<body>
<div class="container py-4">
{notice}
{body}
</div>
</body>
</html>
"#,
        title = escape(title),
        notice = notice,
        body = body
    )
}

/// Inline annotation for a form field, empty when the field is clean.
pub fn field_error(errors: &FieldErrors, field: &str) -> String {
    match errors.get(field) {
        Some(message) => format!(
            r#"<div class="invalid-feedback d-block">{}</div>"#,
            escape(message)
        ),
        None => String::new(),
    }
}
