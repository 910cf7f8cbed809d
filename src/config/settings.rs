use crate::config::toml_config::TomlConfig;
use crate::utils::error::{Result, SorterError};
use crate::utils::logger::LogFormat;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const FOLDER_PROMPT: &str = "Enter the folder path: ";

/// Effective run settings after merging the config file and command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub root: Option<PathBuf>,
    pub dry_run: bool,
    pub report_path: Option<PathBuf>,
    pub json: bool,
    pub log_format: LogFormat,
    pub monitor: bool,
    pub verbose: bool,
}

impl Settings {
    pub fn from_file(file: &TomlConfig) -> Result<Self> {
        file.validate()?;
        Ok(Self {
            root: file.organizer.root.as_ref().map(PathBuf::from),
            dry_run: file.organizer.dry_run.unwrap_or(false),
            report_path: file.organizer.report_path.as_ref().map(PathBuf::from),
            json: false,
            log_format: file.log_format()?.unwrap_or_default(),
            monitor: file.logging.monitor.unwrap_or(false),
            verbose: file.logging.verbose.unwrap_or(false),
        })
    }

    /// The configured root, or one line read from `input` after printing the prompt.
    pub fn root_or_prompt<R: BufRead, W: Write>(&self, input: R, output: W) -> Result<PathBuf> {
        match &self.root {
            Some(root) => Ok(root.clone()),
            None => prompt_for_folder(input, output),
        }
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        if let Some(root) = &self.root {
            validate_path("root", &root.to_string_lossy())?;
        }
        if let Some(report) = &self.report_path {
            let report = report.to_string_lossy();
            validate_path("report", &report)?;
            validate_file_extension("report", &report, &["csv"])?;
        }
        Ok(())
    }
}

pub fn prompt_for_folder<R: BufRead, W: Write>(mut input: R, mut output: W) -> Result<PathBuf> {
    write!(output, "{}", FOLDER_PROMPT)?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Err(SorterError::InvalidRoot {
            path: PathBuf::new(),
        });
    }
    Ok(PathBuf::from(answer))
}
