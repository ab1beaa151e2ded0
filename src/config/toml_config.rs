use crate::config::{ClientConfig, CredentialsInput};
use crate::utils::error::{DotFitError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 設定檔格式：
///
/// ```toml
/// [service]
/// environment = "dev"
/// debug = true
/// timeout_seconds = 30
///
/// [credentials]
/// club_id = "${CLUB_ID}"
/// club_password = "${CLUB_PASSWORD}"
/// wholesale_id = "${WHOLESALE_ID}"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub service: ServiceSection,
    #[serde(default)]
    pub credentials: CredentialsInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceSection {
    pub environment: Option<String>,
    pub endpoint: Option<String>,
    #[serde(default)]
    pub debug: bool,
    pub timeout_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content)
            .map_err(|e| DotFitError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${CLUB_ID})，未設定的變數視為設定錯誤
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| DotFitError::config(format!("invalid substitution pattern: {}", e)))?;

        let mut missing = Vec::new();
        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.push(var_name.to_string());
                String::new()
            })
        });

        if !missing.is_empty() {
            return Err(DotFitError::config(format!(
                "environment variable(s) referenced by config are not set: {}",
                missing.join(", ")
            )));
        }

        Ok(result.into_owned())
    }

    pub fn into_client_config(self) -> Result<ClientConfig> {
        let mut config = ClientConfig::new(
            self.credentials,
            self.service.environment.as_deref(),
            self.service.debug,
        )?;

        if let Some(endpoint) = self.service.endpoint.as_deref() {
            config = config.with_endpoint(endpoint)?;
        }
        if let Some(seconds) = self.service.timeout_seconds {
            config = config.with_timeout(Duration::from_secs(seconds));
        }

        Ok(config)
    }
}
