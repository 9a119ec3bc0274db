//! Server-rendered pages for the auth module.

use bookrack_http::flash::FlashMessage;
use bookrack_http::forms::FieldErrors;
use bookrack_http::html::{escape, field_error, layout};

pub fn login(flash: Option<&FlashMessage>, username: &str, errors: &FieldErrors) -> String {
    let body = format!(
        r#"<h1>Log In</h1>
<form method="post" action="/">
<div class="mb-3">
<label class="form-label" for="username">Username</label>
<input class="form-control" type="text" id="username" name="username" value="{username}">
{username_error}</div>
<div class="mb-3">
<label class="form-label" for="password">Password</label>
<input class="form-control" type="password" id="password" name="password">
{password_error}</div>
<button class="btn btn-primary" type="submit">Log In</button>
</form>
<p class="mt-3"><a href="/signup">Sign Up</a></p>"#,
        username = escape(username),
        username_error = field_error(errors, "username"),
        password_error = field_error(errors, "password"),
    );

    layout("Log In", flash, &body)
}

pub fn signup() -> String {
    let mut fields = String::new();
    for (name, label, kind) in [
        ("email", "Email", "text"),
        ("username", "Username", "text"),
        ("password", "Password", "password"),
        ("confirm_password", "Confirm Password", "password"),
    ] {
        fields.push_str(&format!(
            r#"<div class="mb-3">
<label class="form-label" for="{name}">{label}</label>
<input class="form-control" type="{kind}" id="{name}" name="{name}">
</div>
"#,
            name = name,
            label = label,
            kind = kind,
        ));
    }

    let body = format!(
        r#"<h1>Sign Up</h1>
<form method="post">
{fields}<button class="btn btn-primary" type="submit">Sign Up</button>
</form>
<p class="mt-3"><a href="/">Back to login</a></p>"#,
        fields = fields
    );

    layout("Sign Up", None, &body)
}
