pub mod toml_config;

use crate::core::validation::validate_credentials;
use crate::utils::error::{DotFitError, Result};
use crate::utils::validation::{validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEV_WSDL_URL: &str = "https://devtest.dotfit.com/webservices/OrdersService.asmx?WSDL";
pub const PROD_WSDL_URL: &str = "https://www.dotfit.com/webservices/OrdersService.asmx?WSDL";

pub const CLUB_ID_VAR: &str = "CLUB_ID";
pub const CLUB_PASSWORD_VAR: &str = "CLUB_PASSWORD";
pub const WHOLESALE_ID_VAR: &str = "WHOLESALE_ID";
pub const ENVIRONMENT_VAR: &str = "DOTFIT_ENV";
pub const ENDPOINT_VAR: &str = "DOTFIT_URL";
pub const DEBUG_VAR: &str = "DOTFIT_DEBUG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Prod,
}

impl Environment {
    /// 未指定時預設為 dev
    pub fn from_selector(selector: Option<&str>) -> Result<Self> {
        selector.map_or(Ok(Self::Dev), str::parse)
    }

    pub fn wsdl_url(self) -> &'static str {
        match self {
            Self::Dev => DEV_WSDL_URL,
            Self::Prod => PROD_WSDL_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = DotFitError;

    fn from_str(selector: &str) -> Result<Self> {
        match selector {
            "dev" => Ok(Self::Dev),
            "prod" => Ok(Self::Prod),
            _ => Err(DotFitError::config("Unsupported environment. Use dev or prod")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dev => "dev",
            Self::Prod => "prod",
        })
    }
}

/// Raw credential input, as handed to the constructor or read from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsInput {
    #[serde(default, alias = "club_id")]
    pub club_id: Option<String>,
    #[serde(default, alias = "club_password")]
    pub club_password: Option<String>,
    #[serde(default, alias = "wholesale_id")]
    pub wholesale_id: Option<String>,
}

impl CredentialsInput {
    pub fn new(
        club_id: impl Into<String>,
        club_password: impl Into<String>,
        wholesale_id: impl Into<String>,
    ) -> Self {
        Self {
            club_id: Some(club_id.into()),
            club_password: Some(club_password.into()),
            wholesale_id: Some(wholesale_id.into()),
        }
    }
}

/// Validated club credentials. Only produced by `validate_credentials`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    club_id: String,
    club_password: String,
    wholesale_id: String,
}

impl Credentials {
    pub(crate) fn new(club_id: String, club_password: String, wholesale_id: String) -> Self {
        Self {
            club_id,
            club_password,
            wholesale_id,
        }
    }

    pub fn club_id(&self) -> &str {
        &self.club_id
    }

    pub fn club_password(&self) -> &str {
        &self.club_password
    }

    pub fn wholesale_id(&self) -> &str {
        &self.wholesale_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("club_id", &self.club_id)
            .field("club_password", &"<redacted>")
            .field("wholesale_id", &self.wholesale_id)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub credentials: Credentials,
    pub environment: Environment,
    pub endpoint: Url,
    pub debug: bool,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// 以明確參數建立：先驗證憑證，再解析環境
    pub fn new(credentials: CredentialsInput, environment: Option<&str>, debug: bool) -> Result<Self> {
        let credentials = validate_credentials(&credentials)?;
        let environment = Environment::from_selector(environment)?;
        let endpoint = Url::parse(environment.wsdl_url())?;

        Ok(Self {
            credentials,
            environment,
            endpoint,
            debug,
            timeout: None,
        })
    }

    /// 從環境變數建立（CLUB_ID、CLUB_PASSWORD、WHOLESALE_ID、DOTFIT_ENV、DOTFIT_URL、DOTFIT_DEBUG）
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = CredentialsInput {
            club_id: lookup(CLUB_ID_VAR),
            club_password: lookup(CLUB_PASSWORD_VAR),
            wholesale_id: lookup(WHOLESALE_ID_VAR),
        };
        let debug = lookup(DEBUG_VAR).as_deref().is_some_and(parse_flag);

        let config = Self::new(credentials, lookup(ENVIRONMENT_VAR).as_deref(), debug)?;
        match lookup(ENDPOINT_VAR) {
            Some(url) if !url.trim().is_empty() => config.with_endpoint(&url),
            _ => Ok(config),
        }
    }

    /// Points the adapter at a different WSDL URL than the environment default.
    pub fn with_endpoint(mut self, url: &str) -> Result<Self> {
        self.endpoint = validate_url("endpoint", url)?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("endpoint", self.endpoint.as_str())?;

        if self.timeout.is_some_and(|timeout| timeout.is_zero()) {
            return Err(DotFitError::config("\"timeout\" must be greater than zero"));
        }

        tracing::debug!("✅ Client configuration validation passed");
        Ok(())
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
