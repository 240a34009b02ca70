//! Semantic configuration checks.
//!
//! Serde handles the syntactic layer; this module catches configs that parse
//! but cannot work: malformed upstream URLs, a prefix that can never match,
//! zero timeouts.

use url::Url;

use crate::config::schema::ProxyConfig;

/// A single semantic validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field (e.g., "routes.backend_url").
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed configuration, collecting all failures.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_base_url(&config.routes.backend_url, "routes.backend_url", &mut errors);
    check_base_url(&config.routes.frontend_url, "routes.frontend_url", &mut errors);

    if !config.routes.api_prefix.starts_with('/') {
        errors.push(ValidationError {
            field: "routes.api_prefix".into(),
            message: "must start with '/'".into(),
        });
    }

    check_url(&config.token.metadata_url, "token.metadata_url", &mut errors);

    if config.token.fetch_timeout_secs == 0 {
        errors.push(ValidationError {
            field: "token.fetch_timeout_secs".into(),
            message: "must be non-zero".into(),
        });
    }
    if config.timeouts.upstream_secs == 0 {
        errors.push(ValidationError {
            field: "timeouts.upstream_secs".into(),
            message: "must be non-zero".into(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(value: &str, field: &str, errors: &mut Vec<ValidationError>) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => errors.push(ValidationError {
            field: field.into(),
            message: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError {
            field: field.into(),
            message: format!("not a valid URL: {}", e),
        }),
    }
}

fn check_base_url(value: &str, field: &str, errors: &mut Vec<ValidationError>) {
    check_url(value, field, errors);

    // The forwarded path is appended verbatim; a trailing slash would
    // produce double slashes in every upstream URL.
    if value.ends_with('/') {
        errors.push(ValidationError {
            field: field.into(),
            message: "must not end with '/'".into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProxyConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ProxyConfig::default()).is_ok());
    }

    #[test]
    fn test_rejects_bad_upstream_url() {
        let mut config = ProxyConfig::default();
        config.routes.backend_url = "not a url".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "routes.backend_url"));
    }

    #[test]
    fn test_rejects_trailing_slash() {
        let mut config = ProxyConfig::default();
        config.routes.frontend_url = "https://frontend.example.com/".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.message.contains("end with '/'")));
    }

    #[test]
    fn test_rejects_prefix_without_leading_slash() {
        let mut config = ProxyConfig::default();
        config.routes.api_prefix = "api/".into();

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "routes.api_prefix"));
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = ProxyConfig::default();
        config.timeouts.upstream_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(|e| e.field == "timeouts.upstream_secs"));
    }
}
