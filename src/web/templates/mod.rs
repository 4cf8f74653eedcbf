use askama::Template;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::{
    gateway::bill::FetchError,
    web::{SESSION_USER, bill::data::FormattedBill},
};

use super::error::Error;

pub struct HtmlTemplate<T>(pub T);

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub error: String,
}

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(e) => {
                tracing::error!("Error rendering template: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error rendering template",
                )
                    .into_response()
            }
        }
    }
}

/// The session user as the login form stored it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_type: String,
    pub email: String,
}

/// Extracts the session user, if any. Pages decide themselves whether a
/// missing user is acceptable.
#[derive(Debug, Clone, Default)]
pub struct Auth(pub Option<AuthUser>);

impl Auth {
    pub fn user(&self) -> Option<&AuthUser> {
        self.0.as_ref()
    }

    pub fn require(&self) -> std::result::Result<&AuthUser, Error> {
        self.0.as_ref().ok_or(Error::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for Auth
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;
        let user = match session.get::<AuthUser>(SESSION_USER).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("Error reading user from session: {e}");
                None
            }
        };
        Ok(Auth(user))
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub auth: Auth,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub auth: Auth,
    pub csrf_token: String,
}

#[derive(Template)]
#[template(path = "bills.html")]
pub struct BillsTemplate {
    pub auth: Auth,
    pub email: String,
    pub bills: Vec<FormattedBill>,
}

#[derive(Template)]
#[template(path = "receipt.html")]
pub struct ReceiptTemplate {
    pub name: String,
    pub receipt_url: String,
}

#[derive(Template)]
#[template(path = "new_bill.html")]
pub struct NewBillTemplate {
    pub auth: Auth,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let response = match self {
            Error::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                String::from("Internal Server Error"),
            ),
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, String::from("Unauthorized")),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Fetch(e) => {
                let status = match e {
                    FetchError::NotFound => StatusCode::NOT_FOUND,
                    FetchError::Server => StatusCode::INTERNAL_SERVER_ERROR,
                    FetchError::Gateway(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.to_string())
            }
        };

        (
            response.0,
            HtmlTemplate(ErrorTemplate { error: response.1 }),
        )
            .into_response()
    }
}
