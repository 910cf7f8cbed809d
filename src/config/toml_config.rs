use crate::utils::error::{Result, SorterError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub organizer: OrganizerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrganizerSection {
    pub root: Option<String>,
    pub dry_run: Option<bool>,
    pub report_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub format: Option<String>,
    pub monitor: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| SorterError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SorterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SorterError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn log_format(&self) -> Result<Option<LogFormat>> {
        self.logging
            .format
            .as_deref()
            .map(str::parse)
            .transpose()
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(root) = &self.organizer.root {
            validate_path("organizer.root", root)?;
        }

        if let Some(report) = &self.organizer.report_path {
            validate_path("organizer.report_path", report)?;
            validate_file_extension("organizer.report_path", report, &["csv"])?;
        }

        self.log_format()?;
        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[organizer]
root = "/photos/inbox"
dry_run = true
report_path = "moves.csv"

[logging]
verbose = true
format = "json"
monitor = false
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.organizer.root.as_deref(), Some("/photos/inbox"));
        assert_eq!(config.organizer.dry_run, Some(true));
        assert_eq!(config.log_format().unwrap(), Some(LogFormat::Json));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_all_sections_optional() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.organizer.root.is_none());
        assert!(config.logging.format.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DATE_SORTER_TEST_ROOT", "/mnt/camera");

        let toml_content = r#"
[organizer]
root = "${DATE_SORTER_TEST_ROOT}/dcim"
report_path = "${DATE_SORTER_TEST_UNSET_VAR}.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.organizer.root.as_deref(), Some("/mnt/camera/dcim"));
        assert_eq!(
            config.organizer.report_path.as_deref(),
            Some("${DATE_SORTER_TEST_UNSET_VAR}.csv")
        );

        std::env::remove_var("DATE_SORTER_TEST_ROOT");
    }

    #[test]
    fn test_config_validation() {
        let bad_report = TomlConfig::from_toml_str("[organizer]\nreport_path = \"moves.txt\"\n").unwrap();
        assert!(bad_report.validate().is_err());

        let bad_format = TomlConfig::from_toml_str("[logging]\nformat = \"xml\"\n").unwrap();
        assert!(bad_format.validate().is_err());

        let empty_root = TomlConfig::from_toml_str("[organizer]\nroot = \"\"\n").unwrap();
        assert!(empty_root.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            TomlConfig::from_toml_str("[organizer\nroot = 1"),
            Err(SorterError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[organizer]\nroot = \"/photos\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.organizer.root.as_deref(), Some("/photos"));
        assert!(TomlConfig::from_file("/definitely/not/here.toml").is_err());
    }
}
