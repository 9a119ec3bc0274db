pub mod forms;
pub mod views;

use async_trait::async_trait;
use axum::{
    extract::State,
    response::Response,
    routing::get,
    Form, Router,
};

use bookrack_http::flash::{flash_redirect, rendered, Flash, FlashMessage};
use bookrack_http::forms::FieldErrors;
use bookrack_kernel::{AppState, InitCtx, Module};

use forms::LoginSubmit;

/// Auth module: login page with credential verification, plus the
/// (unfinished) signup page.
pub struct AuthModule;

impl AuthModule {
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Module for AuthModule {
    fn name(&self) -> &'static str {
        "auth"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        if ctx.settings.auth.secret.is_none() {
            tracing::warn!("auth.secret is not configured; running with insecure default");
        }
        tracing::info!(module = self.name(), "auth module initialized");
        Ok(())
    }

    fn routes(&self) -> Router<AppState> {
        Router::new()
            .route("/", get(login_page).post(login_submit))
            // Signup has no POST handler: the feature was never finished
            // and there is no user entity to store.
            .route("/signup", get(signup_page))
    }
}

/// Create a new instance of the auth module
pub fn create_module() -> std::sync::Arc<dyn Module> {
    std::sync::Arc::new(AuthModule::new())
}

async fn login_page(flash: Flash) -> Response {
    rendered(
        views::login(flash.message(), "", &FieldErrors::new()),
        flash.is_some(),
    )
}

async fn login_submit(State(state): State<AppState>, Form(input): Form<LoginSubmit>) -> Response {
    let data = match input.validate() {
        Ok(data) => data,
        Err(errors) => {
            return rendered(views::login(None, input.username_value(), &errors), false);
        }
    };

    if state.credentials.verify(&data.username, &data.password) {
        flash_redirect("/dashboard", FlashMessage::success("You have been logged in!"))
    } else {
        let notice =
            FlashMessage::danger("Login Unsuccessful. Please check username and password");
        rendered(
            views::login(Some(&notice), input.username_value(), &FieldErrors::new()),
            false,
        )
    }
}

async fn signup_page() -> Response {
    rendered(views::signup(), false)
}
