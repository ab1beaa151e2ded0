use crate::utils::error::{DotFitError, Result};
use url::Url;

/// Field-level checks return the bare message so callers can pick the error
/// category (configuration vs. order validation).
pub type FieldResult<T> = std::result::Result<T, String>;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(DotFitError::config(format!(
            "\"{}\" URL cannot be empty",
            field_name
        )));
    }

    let url = Url::parse(url_str).map_err(|e| {
        DotFitError::config(format!("\"{}\" has invalid URL format: {}", field_name, e))
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DotFitError::config(format!(
            "\"{}\" has unsupported URL scheme: {}",
            field_name, scheme
        ))),
    }
}

pub fn require_string<'a>(field_name: &str, value: &'a Option<String>) -> FieldResult<&'a str> {
    let value = value
        .as_deref()
        .ok_or_else(|| format!("\"{}\" is required", field_name))?;
    validate_non_empty_string(field_name, value)?;
    Ok(value)
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> FieldResult<()> {
    if value.trim().is_empty() {
        return Err(format!("\"{}\" is not allowed to be empty", field_name));
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: i64) -> FieldResult<()> {
    if value < 1 {
        return Err(format!("\"{}\" must be a positive number", field_name));
    }
    Ok(())
}

pub fn validate_numeric_string(field_name: &str, value: &str) -> FieldResult<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("\"{}\" must be a number", field_name));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("endpoint", "https://example.com/svc.asmx?WSDL").is_ok());
        assert!(validate_url("endpoint", "http://127.0.0.1:8080/wsdl").is_ok());
        assert!(validate_url("endpoint", "").is_err());
        assert!(validate_url("endpoint", "invalid-url").is_err());
        assert!(validate_url("endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_require_string() {
        let missing: Option<String> = None;
        let empty = Some("   ".to_string());
        let present = Some("CLUB42".to_string());

        assert_eq!(
            require_string("clubId", &missing).unwrap_err(),
            "\"clubId\" is required"
        );
        assert_eq!(
            require_string("clubId", &empty).unwrap_err(),
            "\"clubId\" is not allowed to be empty"
        );
        assert_eq!(require_string("clubId", &present).unwrap(), "CLUB42");
    }

    #[test]
    fn test_numeric_checks() {
        assert!(validate_positive_number("Quantity", 1).is_ok());
        assert!(validate_positive_number("Quantity", 0).is_err());
        assert!(validate_numeric_string("wholesaleUserID", "1234").is_ok());
        assert!(validate_numeric_string("wholesaleUserID", "12a4").is_err());
        assert!(validate_numeric_string("wholesaleUserID", "").is_err());
    }
}
