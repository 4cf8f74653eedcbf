use axum::{
    Form,
    response::{IntoResponse, Redirect},
};
use tower_sessions::Session;
use tracing::error;

mod data;

use crate::web::{
    Result, SESSION_USER,
    csrf::{gen_csrf, verify_csrf},
    error::Error,
    templates::{Auth, AuthUser, HtmlTemplate, LoginTemplate},
    user::data::LoginData,
};

#[tracing::instrument(level = tracing::Level::DEBUG, skip(session, auth))]
pub async fn login(session: Session, auth: Auth) -> Result<impl IntoResponse> {
    tracing::debug!("login called");
    let template = LoginTemplate {
        auth,
        csrf_token: gen_csrf(&session).await.map_err(|_| Error::Internal)?,
    };
    Ok(HtmlTemplate(template))
}

/// Places `{ type, email }` into the session. There is no credential check
/// here, the session context is simply established for the bill pages.
#[tracing::instrument(level = tracing::Level::DEBUG, skip(session, payload))]
pub async fn do_login(session: Session, Form(payload): Form<LoginData>) -> Result<impl IntoResponse> {
    tracing::debug!("do login called");

    verify_csrf(&payload.csrf_token, &session)
        .await
        .map_err(|_| Error::Unauthorized)?;
    if !payload.validate() {
        return Err(Error::BadRequest("invalid payload".to_string()));
    }

    session
        .insert(
            SESSION_USER,
            AuthUser {
                user_type: payload.user_type.clone(),
                email: payload.email.clone(),
            },
        )
        .await
        .map_err(|e| {
            error!("error putting user in session: {e}");
            Error::Internal
        })?;

    Ok(Redirect::to("/bills").into_response())
}

#[tracing::instrument(level = tracing::Level::DEBUG, skip(session))]
pub async fn logout(session: Session) -> Result<impl IntoResponse> {
    tracing::debug!("logout called");
    session.delete().await.map_err(|e| {
        error!("Error logging out: {e}");
        Error::Internal
    })?;
    Ok(Redirect::to("/"))
}
