use crate::domain::model::OrganizeEvent;
use crate::domain::ports::ReportSink;
use crate::utils::error::{Result, SorterError};
use serde::Serialize;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Progress lines on stdout plus structured tracing events.
#[derive(Debug, Clone)]
pub struct LogSink {
    echo: bool,
}

impl LogSink {
    pub fn new(echo: bool) -> Self {
        Self { echo }
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(true)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl ReportSink for LogSink {
    fn record(&mut self, event: &OrganizeEvent) {
        match event {
            OrganizeEvent::Moved { from, to, date } => {
                tracing::debug!(
                    "{} -> {} ({} {:04}-{:02}-{:02} {})",
                    from.display(),
                    to.display(),
                    date.origin,
                    date.year,
                    date.month,
                    date.day,
                    date.time
                );
                if self.echo {
                    println!("Moved {} to {}", display_name(from), to.display());
                }
            }
            OrganizeEvent::AlreadyInPlace { path } => {
                tracing::debug!("Already in place: {}", path.display());
                if self.echo {
                    println!("Kept {} (already in place)", path.display());
                }
            }
            OrganizeEvent::SkippedHidden { path } => {
                tracing::debug!("Skipping hidden file {}", path.display());
                if self.echo {
                    println!("Skipping hidden file {}", path.display());
                }
            }
            OrganizeEvent::Failed { path, reason } => {
                tracing::warn!("Skipping {}: {}", path.display(), reason);
                if self.echo {
                    println!("Skipping {}: {}", path.display(), reason);
                }
            }
        }
    }
}

/// Collects events in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    events: Vec<OrganizeEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[OrganizeEvent] {
        &self.events
    }

    pub fn of_kind(&self, kind: &str) -> Vec<&OrganizeEvent> {
        self.events.iter().filter(|e| e.kind() == kind).collect()
    }
}

impl ReportSink for MemorySink {
    fn record(&mut self, event: &OrganizeEvent) {
        self.events.push(event.clone());
    }
}

#[derive(Debug, Serialize)]
struct LedgerRow<'a> {
    event: &'a str,
    source: String,
    destination: String,
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    time: Option<&'a str>,
    origin: Option<String>,
    reason: Option<&'a str>,
}

impl<'a> From<&'a OrganizeEvent> for LedgerRow<'a> {
    fn from(event: &'a OrganizeEvent) -> Self {
        let mut row = LedgerRow {
            event: event.kind(),
            source: event.path().display().to_string(),
            destination: String::new(),
            year: None,
            month: None,
            day: None,
            time: None,
            origin: None,
            reason: None,
        };
        match event {
            OrganizeEvent::Moved { to, date, .. } => {
                row.destination = to.display().to_string();
                row.year = Some(date.year);
                row.month = Some(date.month);
                row.day = Some(date.day);
                row.time = Some(date.time.as_str());
                row.origin = Some(date.origin.to_string());
            }
            OrganizeEvent::AlreadyInPlace { path } => {
                row.destination = path.display().to_string();
            }
            OrganizeEvent::Failed { reason, .. } => row.reason = Some(reason.as_str()),
            OrganizeEvent::SkippedHidden { .. } => {}
        }
        row
    }
}

/// CSV ledger of every event, one row each.
///
/// Write failures are held until `finish` so a broken report never interrupts the run.
pub struct CsvReportSink {
    path: PathBuf,
    writer: csv::Writer<File>,
    error: Option<csv::Error>,
}

impl CsvReportSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let writer = csv::Writer::from_path(&path)?;
        tracing::debug!("Writing move ledger to {}", path.display());
        Ok(Self {
            path,
            writer,
            error: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for CsvReportSink {
    fn record(&mut self, event: &OrganizeEvent) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.writer.serialize(LedgerRow::from(event)) {
            tracing::error!("Report {} stopped: {}", self.path.display(), e);
            self.error = Some(e);
        }
    }

    fn finish(&mut self) -> Result<()> {
        if let Some(e) = self.error.take() {
            return Err(SorterError::Report(e));
        }
        self.writer.flush()?;
        Ok(())
    }
}
