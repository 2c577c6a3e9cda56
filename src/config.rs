use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use url::Url;

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "pydoc-scrape.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub http: HttpConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub pep: PepConfig,
}

/// Remote roots every scraped link is resolved against
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub main_doc_url: String,
    pub pep_doc_url: String,
}

/// HTTP session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Local filesystem layout. Relative directories live under `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub base_dir: PathBuf,
    pub downloads_dir: PathBuf,
    pub results_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub cache_dir: PathBuf,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// PEP reconciliation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PepConfig {
    /// Status code from the index table -> statuses valid for it
    pub expected_status: BTreeMap<String, Vec<String>>,
}

/// Output format
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One line per row on stdout
    #[default]
    Console,
    /// Boxed table on stdout
    Pretty,
    /// CSV file under the results directory
    File,
    /// JSON file under the results directory
    Json,
    /// HTML file under the results directory
    Html,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            main_doc_url: "https://docs.python.org/3/".to_string(),
            pep_doc_url: "https://peps.python.org/".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("pydoc-scrape/{}", env!("CARGO_PKG_VERSION")),
            timeout_secs: 30,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            downloads_dir: PathBuf::from("downloads"),
            results_dir: PathBuf::from("results"),
            logs_dir: PathBuf::from("logs"),
            cache_dir: PathBuf::from(".http_cache"),
        }
    }
}

impl Default for PepConfig {
    fn default() -> Self {
        let table: [(&str, &[&str]); 8] = [
            ("A", &["Active", "Accepted"]),
            ("D", &["Deferred"]),
            ("F", &["Final"]),
            ("P", &["Provisional"]),
            ("R", &["Rejected"]),
            ("S", &["Superseded"]),
            ("W", &["Withdrawn"]),
            ("", &["Draft", "Active"]),
        ];
        let expected_status = table
            .iter()
            .map(|(code, statuses)| {
                (
                    code.to_string(),
                    statuses.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { expected_status }
    }
}

impl PathsConfig {
    fn resolve(&self, dir: &Path) -> PathBuf {
        self.base_dir.join(dir)
    }

    pub fn downloads(&self) -> PathBuf {
        self.resolve(&self.downloads_dir)
    }

    pub fn results(&self) -> PathBuf {
        self.resolve(&self.results_dir)
    }

    pub fn logs(&self) -> PathBuf {
        self.resolve(&self.logs_dir)
    }

    pub fn cache(&self) -> PathBuf {
        self.resolve(&self.cache_dir)
    }
}

impl SiteConfig {
    pub fn main_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.main_doc_url)?)
    }

    pub fn pep_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.pep_doc_url)?)
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, output: Option<OutputFormat>) {
        if let Some(format) = output {
            self.output.format = format;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("main_doc_url", &self.site.main_doc_url),
            ("pep_doc_url", &self.site.pep_doc_url),
        ] {
            Url::parse(value)
                .map_err(|e| Error::config_validation(format!("{} is not a URL: {}", name, e)))?;
            // Relative links only resolve under the root when it is a directory URL
            if !value.ends_with('/') {
                return Err(Error::config_validation(format!(
                    "{} must end with '/'",
                    name
                )));
            }
        }

        if self.http.timeout_secs == 0 {
            return Err(Error::config_validation("timeout_secs must be at least 1"));
        }

        if let Some((code, _)) = self
            .pep
            .expected_status
            .iter()
            .find(|(_, statuses)| statuses.is_empty())
        {
            return Err(Error::config_validation(format!(
                "expected_status for code {:?} is empty",
                code
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.main_doc_url, "https://docs.python.org/3/");
        assert_eq!(config.site.pep_doc_url, "https://peps.python.org/");
        assert_eq!(config.output.format, OutputFormat::Console);
        assert_eq!(config.pep.expected_status.len(), 8);
        assert_eq!(
            config.pep.expected_status[""],
            vec!["Draft".to_string(), "Active".to_string()]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_paths_under_base_dir() {
        let mut config = Config::default();
        config.paths.base_dir = PathBuf::from("/srv/scrape");
        assert_eq!(config.paths.downloads(), PathBuf::from("/srv/scrape/downloads"));
        assert_eq!(config.paths.results(), PathBuf::from("/srv/scrape/results"));
        assert_eq!(config.paths.logs(), PathBuf::from("/srv/scrape/logs"));
        assert_eq!(config.paths.cache(), PathBuf::from("/srv/scrape/.http_cache"));
    }

    #[test]
    fn test_load_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[site]
main_doc_url = "https://docs.example.org/3/"

[http]
timeout_secs = 5

[output]
format = "json"

[pep.expected_status]
"0" = ["Active", "Draft"]
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.site.main_doc_url, "https://docs.example.org/3/");
        assert_eq!(config.site.pep_doc_url, "https://peps.python.org/");
        assert_eq!(config.http.timeout_secs, 5);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.pep.expected_status.len(), 1);
        assert_eq!(config.pep.expected_status["0"], vec!["Active", "Draft"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load(Path::new("/nonexistent/pydoc-scrape.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/pydoc-scrape.toml"));
        assert_eq!(config.site.main_doc_url, "https://docs.python.org/3/");
    }

    #[test]
    fn test_validation_url_without_trailing_slash() {
        let mut config = Config::default();
        config.site.main_doc_url = "https://docs.python.org/3".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_bad_url() {
        let mut config = Config::default();
        config.site.pep_doc_url = "not a url/".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = Config::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_status_set() {
        let mut config = Config::default();
        config.pep.expected_status.insert("X".to_string(), vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_merge_cli_output() {
        let mut config = Config::default();
        config.merge_cli(Some(OutputFormat::Pretty));
        assert_eq!(config.output.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_merge_cli_keeps_file_format() {
        let mut config = Config::default();
        config.output.format = OutputFormat::Html;
        config.merge_cli(None);
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn test_output_format_parsing() {
        let toml_str = r#"format = "file""#;
        let output: OutputConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(output.format, OutputFormat::File);
    }
}
