//! Configuration validation logic.

use regex::Regex;
use url::Url;

use crate::config::loader::Config;
use crate::error::{Error, Result};

/// Loose address shape check; the server has the final say.
const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_api_url(&config.api.url)?;
    validate_email(&config.account.email)?;
    validate_password(&config.account.password)?;
    validate_page_size(config.api.page_size)?;

    if config.output.media_folder.as_os_str().is_empty() {
        return Err(Error::MissingConfig("media_folder".to_string()));
    }

    Ok(())
}

/// Validate the API base URL.
pub fn validate_api_url(api_url: &str) -> Result<()> {
    if api_url.trim().is_empty() {
        return Err(Error::MissingConfig("api url".to_string()));
    }

    let url = Url::parse(api_url.trim()).map_err(|e| Error::ConfigValidation {
        field: "url".to_string(),
        message: format!("'{}' is not a valid URL: {}", api_url, e),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(Error::ConfigValidation {
            field: "url".to_string(),
            message: format!("Unsupported URL scheme '{}'", url.scheme()),
        });
    }

    Ok(())
}

/// Validate the account email.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::MissingConfig("email".to_string()));
    }

    let pattern = Regex::new(EMAIL_PATTERN).map_err(|e| Error::Config(e.to_string()))?;
    if !pattern.is_match(email) {
        return Err(Error::ConfigValidation {
            field: "email".to_string(),
            message: format!("'{}' does not look like an email address", email),
        });
    }

    Ok(())
}

/// Validate the account password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::MissingConfig("password".to_string()));
    }

    // Check for placeholder values
    let lower = password.to_lowercase();
    if lower.contains("replaceme") || lower == "your_password" {
        return Err(Error::ConfigValidation {
            field: "password".to_string(),
            message: "Password appears to be a placeholder. Please provide your actual password."
                .to_string(),
        });
    }

    Ok(())
}

/// Validate the feed page size.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: "Page size must be at least 1".to_string(),
        });
    }

    Ok(())
}
