use url::Url;

pub mod bill;

/// HTTP-backed store talking to the remote bills API.
pub struct RestStore {
    pub client: reqwest::Client,
    pub base_url: Url,
}

impl RestStore {
    pub fn new(base_url: Url) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self { client, base_url })
    }
}
