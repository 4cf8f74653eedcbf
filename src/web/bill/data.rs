use url::Url;

/// Display projection of a bill, built per render and thrown away after.
#[derive(Debug, Clone)]
pub struct FormattedBill {
    pub id: String,
    pub date: String,
    pub amount: String,
    pub status_label: String,
    pub status_class: String,
    pub name: String,
    pub kind: String,
    pub receipt_url: Option<Url>,
}

impl FormattedBill {
    pub fn has_receipt(&self) -> bool {
        self.receipt_url.is_some()
    }
}
