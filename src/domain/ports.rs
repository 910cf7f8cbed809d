use crate::domain::model::{DateOrigin, OrganizeEvent};
use crate::utils::error::Result;
use chrono::NaiveDateTime;
use std::path::Path;

/// One link in the date resolution chain.
///
/// `Ok(None)` means "no opinion, ask the next source"; an `Err` is logged by the
/// resolver and treated the same way.
pub trait DateSource {
    fn name(&self) -> &'static str;
    fn origin(&self) -> DateOrigin;
    fn date_for(&self, path: &Path) -> Result<Option<NaiveDateTime>>;
}

/// Receives one event per file visited.
pub trait ReportSink {
    fn record(&mut self, event: &OrganizeEvent);

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// The move primitive. Implementations must not overwrite an existing destination.
pub trait Mover {
    fn ensure_dir(&self, dir: &Path) -> Result<()>;
    fn relocate(&self, from: &Path, to: &Path) -> Result<()>;

    fn is_dry_run(&self) -> bool {
        false
    }
}

impl<M: Mover + ?Sized> Mover for Box<M> {
    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        (**self).ensure_dir(dir)
    }

    fn relocate(&self, from: &Path, to: &Path) -> Result<()> {
        (**self).relocate(from, to)
    }

    fn is_dry_run(&self) -> bool {
        (**self).is_dry_run()
    }
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn record(&mut self, event: &OrganizeEvent) {
        (**self).record(event)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn record(&mut self, event: &OrganizeEvent) {
        (**self).record(event)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl<S: ReportSink> ReportSink for Option<S> {
    fn record(&mut self, event: &OrganizeEvent) {
        if let Some(sink) = self {
            sink.record(event);
        }
    }

    fn finish(&mut self) -> Result<()> {
        match self {
            Some(sink) => sink.finish(),
            None => Ok(()),
        }
    }
}

/// Fan out to two sinks.
impl<A: ReportSink, B: ReportSink> ReportSink for (A, B) {
    fn record(&mut self, event: &OrganizeEvent) {
        self.0.record(event);
        self.1.record(event);
    }

    fn finish(&mut self) -> Result<()> {
        self.0.finish()?;
        self.1.finish()
    }
}
