use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::error;

use crate::{
    Ctx,
    web::{
        Result,
        bill::{data::FormattedBill, format::format_bills},
        error::Error,
        templates::{Auth, BillsTemplate, HtmlTemplate, NewBillTemplate, ReceiptTemplate},
    },
};

use crate::gateway::bill::{BillStore, FetchError};

/// Fetches the employee's bills (one gateway call per invocation, no retry)
/// and hands back the display list. Failures keep their kind so the error
/// page can show the matching message.
pub async fn load_bills(
    store: &dyn BillStore,
    email: &str,
) -> std::result::Result<Vec<FormattedBill>, FetchError> {
    let bills = store.list(email).await?;
    Ok(format_bills(bills))
}

#[tracing::instrument(level = tracing::Level::DEBUG, skip(ctx, auth))]
pub async fn list(auth: Auth, State(ctx): State<Ctx>) -> Result<impl IntoResponse> {
    let user = auth.require()?.clone();

    let bills = load_bills(ctx.bill_store.as_ref(), &user.email)
        .await
        .map_err(|e| {
            error!("Error fetching bills for {}: {e}", user.email);
            e
        })?;

    Ok(HtmlTemplate(BillsTemplate {
        auth,
        email: user.email,
        bills,
    }))
}

#[tracing::instrument(level = tracing::Level::DEBUG, skip(ctx, auth))]
pub async fn receipt(
    auth: Auth,
    State(ctx): State<Ctx>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    auth.require()?;

    let bill = match ctx.bill_store.get_by_id(&id).await {
        Ok(Some(bill)) => bill,
        Ok(None) => return Err(Error::NotFound("bill not found".to_string())),
        Err(e) => {
            error!("Error fetching bill {id}: {e}");
            return Err(e.into());
        }
    };

    let receipt_url = bill
        .receipt_url
        .ok_or_else(|| Error::NotFound("no receipt attached".to_string()))?;

    Ok(HtmlTemplate(ReceiptTemplate {
        name: bill.name,
        receipt_url: receipt_url.to_string(),
    }))
}

/// The new-bill form is reachable for any session user; the employee/other
/// distinction is deliberately not enforced here.
#[tracing::instrument(level = tracing::Level::DEBUG, skip(auth))]
pub async fn new_bill(auth: Auth) -> Result<impl IntoResponse> {
    auth.require()?;
    Ok(HtmlTemplate(NewBillTemplate { auth }))
}
