use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_sessions::{
    Expiry, SessionManagerLayer,
    cookie::{SameSite, time::Duration},
};

use crate::{
    Config, Ctx,
    web::templates::{Auth, HomeTemplate, HtmlTemplate},
};

mod bill;
mod csrf;
mod error;
pub mod session;
mod templates;
mod user;

pub type Result<T> = std::result::Result<T, error::Error>;

pub const SESSION_EXPIRATION_SEC: i64 = 60 * 30; // 30 min
pub const CSRF_TOKEN: &str = "csrf_token";
pub const SESSION_USER: &str = "session_user";

pub fn router(ctx: Ctx, cfg: &Config) -> Router {
    let sessions = SessionManagerLayer::new(ctx.session_store.clone())
        .with_secure(cfg.cookie_secure)
        .with_domain(cfg.domain.clone())
        .with_same_site(SameSite::Strict)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(
            SESSION_EXPIRATION_SEC,
        )))
        .with_http_only(true);

    let web = Router::new()
        .nest_service(
            "/static",
            ServeDir::new(format!("{}/static", env!("CARGO_MANIFEST_DIR"))),
        )
        .route("/health", get(health))
        .route("/", get(home))
        .route("/bills", get(bill::ssr::list))
        .route("/bills/new", get(bill::ssr::new_bill))
        .route("/bill/{id}/receipt", get(bill::ssr::receipt))
        .route("/user/login", get(user::login))
        .route("/user/do_login", post(user::do_login))
        .route("/user/logout", get(user::logout))
        .layer(sessions);
    Router::new().merge(web).with_state(ctx)
}

async fn health() -> Result<&'static str> {
    Ok("OK")
}

#[tracing::instrument(level = tracing::Level::DEBUG)]
pub async fn home(auth: Auth) -> Result<impl IntoResponse> {
    Ok(HtmlTemplate(HomeTemplate { auth }))
}
