use crate::utils::error::{ClientError, Result};
use regex::Regex;
use url::Url;

const MOBILE_PATTERN: &str = r"^1[3-9]\d{9}$";

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Sanity check for configured endpoints only. The runtime trust decision for
/// scanned endpoints never goes through a URL parser (see core::trust).
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClientError::InvalidConfigValue {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_empty_list(field_name: &str, values: &[String]) -> Result<()> {
    if values.is_empty() {
        return Err(ClientError::MissingConfig {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

pub fn validate_mobile(field_name: &str, value: &str) -> Result<()> {
    let pattern = Regex::new(MOBILE_PATTERN)?;
    if !pattern.is_match(value) {
        return Err(ClientError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a valid mobile number".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_base", "https://example.com").is_ok());
        assert!(validate_url("api_base", "http://example.com").is_ok());
        assert!(validate_url("api_base", "").is_err());
        assert!(validate_url("api_base", "invalid-url").is_err());
        assert!(validate_url("api_base", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("username", "zhangsan").is_ok());
        assert!(validate_non_empty_string("username", "   ").is_err());
    }

    #[test]
    fn test_validate_mobile() {
        assert!(validate_mobile("mobile", "13800138000").is_ok());
        assert!(validate_mobile("mobile", "12345").is_err());
        assert!(validate_mobile("mobile", "12800138000").is_err());
        assert!(validate_mobile("mobile", "1380013800a").is_err());
    }
}
