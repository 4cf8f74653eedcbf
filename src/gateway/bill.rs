use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::gateway::RestStore;

/// A bill fetch either yields records or exactly one of these kinds.
/// The display strings are what the user sees on the error page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Erreur 404")]
    NotFound,
    #[error("Erreur 500")]
    Server,
    #[error("{0}")]
    Gateway(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn label(&self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BillStatus::Pending => "status-pending",
            BillStatus::Accepted => "status-accepted",
            BillStatus::Refused => "status-refused",
        }
    }
}

/// An expense bill as the remote API serves it. Read-only once fetched.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    pub id: String,
    /// Calendar date in wire form (ISO `YYYY-MM-DD`), kept raw so a
    /// malformed value can still be displayed as-is.
    pub date: String,
    pub amount: f64,
    pub status: BillStatus,
    #[serde(default)]
    pub receipt_url: Option<Url>,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[async_trait]
pub trait BillStore: Send + Sync {
    /// List all bills submitted by the given employee.
    async fn list(&self, email: &str) -> Result<Vec<BillRecord>, FetchError>;
    /// Fetch a single bill; `Ok(None)` if the API has no such bill.
    async fn get_by_id(&self, id: &str) -> Result<Option<BillRecord>, FetchError>;
}

#[async_trait]
impl BillStore for RestStore {
    async fn list(&self, email: &str) -> Result<Vec<BillRecord>, FetchError> {
        let mut url = endpoint(&self.base_url, "bills")?;
        url.query_pairs_mut().append_pair("email", email);

        let resp = self.client.get(url).send().await.map_err(transport)?;
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }

        let bills: Vec<BillRecord> = resp.json().await.map_err(transport)?;
        Ok(bills)
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<BillRecord>, FetchError> {
        let url = endpoint(&self.base_url, &format!("bills/{id}"))?;

        let resp = self.client.get(url).send().await.map_err(transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(status_error(resp.status()));
        }

        let bill: BillRecord = resp.json().await.map_err(transport)?;
        Ok(Some(bill))
    }
}

fn endpoint(base_url: &Url, path: &str) -> Result<Url, FetchError> {
    base_url
        .join(path)
        .map_err(|e| FetchError::Gateway(format!("invalid endpoint {path}: {e}")))
}

fn transport(e: reqwest::Error) -> FetchError {
    FetchError::Gateway(e.to_string())
}

fn status_error(status: StatusCode) -> FetchError {
    if status == StatusCode::NOT_FOUND {
        FetchError::NotFound
    } else if status.is_server_error() {
        FetchError::Server
    } else {
        FetchError::Gateway(format!("Erreur {}", status.as_u16()))
    }
}
