use thiserror::Error;

#[derive(Error, Debug)]
pub enum DotFitError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("HTTP {status} from service: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("SOAP fault ({code}): {reason}")]
    SoapFault { code: String, reason: String },

    #[error("XML parse error: {0}")]
    XmlParseError(#[from] roxmltree::Error),

    #[error("Unexpected response: {message}")]
    UnexpectedResponse { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl DotFitError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError {
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            message: message.into(),
        }
    }

    /// 遠端呼叫失敗（網路、HTTP、SOAP fault 或回應格式錯誤）
    pub fn is_transport_fault(&self) -> bool {
        matches!(
            self,
            Self::ApiError(_)
                | Self::HttpStatus { .. }
                | Self::SoapFault { .. }
                | Self::XmlParseError(_)
                | Self::UnexpectedResponse { .. }
        )
    }

    /// 原始訊息（不含分類前綴）
    pub fn message(&self) -> String {
        match self {
            Self::ConfigError { message }
            | Self::ValidationError { message }
            | Self::UnexpectedResponse { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DotFitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_category_prefix() {
        let err = DotFitError::config("Unsupported environment. Use dev or prod");
        assert_eq!(
            err.to_string(),
            "Configuration error: Unsupported environment. Use dev or prod"
        );
        assert_eq!(err.message(), "Unsupported environment. Use dev or prod");
    }

    #[test]
    fn test_transport_fault_classification() {
        let fault = DotFitError::SoapFault {
            code: "soap:Receiver".to_string(),
            reason: "Order not found".to_string(),
        };
        assert!(fault.is_transport_fault());
        assert!(DotFitError::unexpected("missing result").is_transport_fault());
        assert!(!DotFitError::validation("\"purchaseOrderNum\" is required").is_transport_fault());
        assert!(!DotFitError::config("\"clubId\" is required").is_transport_fault());
    }
}
