use crate::config::settings::Settings;
use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "date-sorter")]
#[command(about = "Sort files into year/month folders by capture or modification date")]
pub struct CliConfig {
    /// Folder to organize. Prompted for when omitted.
    pub folder: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Report planned moves without touching the filesystem
    #[arg(long)]
    pub dry_run: bool,

    /// Write a CSV ledger of every file visited
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Log output format: text or json
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log process statistics
    #[arg(long)]
    pub monitor: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Config file values first, then command-line flags on top.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::from_file(&TomlConfig::from_file(path)?)?,
            None => Settings::default(),
        };

        if let Some(folder) = &self.folder {
            settings.root = Some(folder.clone());
        }
        if let Some(report) = &self.report {
            settings.report_path = Some(report.clone());
        }
        if let Some(format) = &self.log_format {
            settings.log_format = format.parse()?;
        }
        settings.dry_run |= self.dry_run;
        settings.json |= self.json;
        settings.monitor |= self.monitor;
        settings.verbose |= self.verbose;

        Ok(settings)
    }
}
