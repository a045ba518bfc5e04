/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */

use crate::v2::errors::OnfidoError;
use crate::v2::{ApiClient, HttpTransport, Transport};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use strum_macros::{EnumString, IntoStaticStr};

pub const API_VERSION: &str = "v2";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Region hosting the account the API token belongs to
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum Region {
    #[default]
    Eu,
    Us,
    Ca,
}

impl Region {
    pub fn origin(&self) -> &'static str {
        match self {
            Region::Eu => "https://api.onfido.com",
            Region::Us => "https://api.us.onfido.com",
            Region::Ca => "https://api.ca.onfido.com",
        }
    }

    /// Tokens issued outside the EU carry the region, e.g. `api_live_us.xxxx`
    pub fn from_token(token: &str) -> Self {
        if token.contains("_us.") {
            Region::Us
        } else if token.contains("_ca.") {
            Region::Ca
        } else {
            Region::Eu
        }
    }
}

/// Settings used to build a [`Client`]
#[derive(Clone)]
pub struct Config {
    pub api_token: String,
    pub region: Region,
    /// Overrides the region derived url, e.g. for a proxy
    pub base_url: Option<String>,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_token: String::new(),
            region: Region::default(),
            base_url: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: concat!("onfido-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    /// Config for a token, with the region taken from the token
    pub fn from_token(api_token: &str) -> Self {
        Self {
            api_token: api_token.into(),
            region: Region::from_token(api_token),
            ..Default::default()
        }
    }

    /// Reads `ONFIDO_API_TOKEN` (required), `ONFIDO_REGION`, `ONFIDO_API_URL` and
    /// `ONFIDO_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self, OnfidoError> {
        let api_token = std::env::var("ONFIDO_API_TOKEN")
            .map_err(|_| OnfidoError::Config("ONFIDO_API_TOKEN is not set".into()))?;
        let mut config = Self::from_token(&api_token);

        if let Ok(region) = std::env::var("ONFIDO_REGION") {
            config.region = Region::from_str(&region)
                .map_err(|_| OnfidoError::Config(format!("unknown region `{region}`")))?;
        }
        if let Ok(base_url) = std::env::var("ONFIDO_API_URL") {
            config.base_url = Some(base_url);
        }
        if let Ok(secs) = std::env::var("ONFIDO_TIMEOUT_SECS") {
            let secs = secs
                .parse::<u64>()
                .map_err(|_| OnfidoError::Config(format!("invalid timeout `{secs}`")))?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    pub fn base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("{}/{}/", self.region.origin(), API_VERSION))
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_token", &"xxx")
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Handle shared by every resource call and pager. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Client {
    api_client: Arc<ApiClient>,
}

impl Client {
    /// Creates a client that talks to the service over HTTPS
    pub fn new(config: Config) -> Result<Self, OnfidoError> {
        if config.api_token.is_empty() {
            return Err(OnfidoError::Config("api token is empty".into()));
        }
        let transport = HttpTransport::new(&config.api_token, config.timeout, &config.user_agent)?;
        Self::with_transport(&config.base_url(), Arc::new(transport))
    }

    /// Creates a client sending its requests through the given transport
    pub fn with_transport(
        base_url: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, OnfidoError> {
        Ok(Self {
            api_client: Arc::new(ApiClient::new(base_url, transport)?),
        })
    }

    /// Lower level access to the API
    pub fn api(&self) -> &ApiClient {
        &self.api_client
    }
}
