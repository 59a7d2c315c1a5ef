//! Authenticated retrieval of the submission payload.

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};

use crate::config::Config;
use crate::data::RawPayload;
use crate::error::{RefreshError, RefreshResult};

pub struct KoboClient {
    http: Client,
    base_url: String,
    asset_uid: String,
    token: String,
}

impl KoboClient {
    pub fn new(config: &Config) -> RefreshResult<Self> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            asset_uid: config.asset_uid.clone(),
            token: config.token.clone(),
        })
    }

    pub fn data_url(&self) -> String {
        format!("{}/api/v2/assets/{}/data.json", self.base_url, self.asset_uid)
    }

    pub fn fetch(&self) -> RefreshResult<RawPayload> {
        let url = self.data_url();
        info!(%url, "fetching submissions");

        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Token {}", self.token))
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RefreshError::Status { status, url });
        }

        let body = resp.text()?;
        debug!(len = body.len(), "payload received");

        Ok(serde_json::from_str(&body)?)
    }
}
