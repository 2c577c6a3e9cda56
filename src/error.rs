use thiserror::Error;

/// pydoc-scrape error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Tag not found: <{tag}> {attrs}")]
    TagNotFound { tag: String, attrs: String },

    #[error("Attribute `{attr}` missing on <{tag}>")]
    MissingAttribute { tag: String, attr: String },

    #[error("Nothing found: no <{tag}> containing {marker:?}")]
    MarkerNotFound { tag: String, marker: String },

    #[error("Report aborted, page unavailable: {url}")]
    ReportAborted { url: String },

    #[error("Cannot derive a file name from {0}")]
    NoFileName(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for pydoc-scrape operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a missing-tag error
    pub fn tag_not_found(tag: impl Into<String>, attrs: impl Into<String>) -> Self {
        Error::TagNotFound {
            tag: tag.into(),
            attrs: attrs.into(),
        }
    }

    /// Create a missing-attribute error
    pub fn missing_attribute(tag: impl Into<String>, attr: impl Into<String>) -> Self {
        Error::MissingAttribute {
            tag: tag.into(),
            attr: attr.into(),
        }
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True for errors caused by the scraped page not having the expected shape
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::TagNotFound { .. } | Error::MissingAttribute { .. } | Error::MarkerNotFound { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_tag_not_found_display() {
        let err = Error::tag_not_found("section", "id=\"numerical-index\"");
        assert_eq!(
            err.to_string(),
            "Tag not found: <section> id=\"numerical-index\""
        );
        assert!(err.is_structural());
    }

    #[test]
    fn test_marker_not_found_display() {
        let err = Error::MarkerNotFound {
            tag: "ul".to_string(),
            marker: "All versions".to_string(),
        };
        assert!(err.to_string().contains("All versions"));
        assert!(err.is_structural());
    }

    #[test]
    fn test_config_validation_display() {
        let err = Error::config_validation("timeout_secs must be at least 1");
        assert_eq!(
            err.to_string(),
            "Config validation error: timeout_secs must be at least 1"
        );
        assert!(!err.is_structural());
    }

    #[test]
    fn test_report_aborted_display() {
        let err = Error::ReportAborted {
            url: "https://peps.python.org/pep-0008/".to_string(),
        };
        assert!(err.to_string().contains("pep-0008"));
    }

    #[test]
    fn test_other_error() {
        let err = Error::other("something went wrong");
        assert_eq!(err.to_string(), "something went wrong");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
