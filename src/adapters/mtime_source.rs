use crate::domain::model::DateOrigin;
use crate::domain::ports::DateSource;
use crate::utils::error::Result;
use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;

/// Last-modified timestamp, converted to local calendar time.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModifiedTimeSource;

impl ModifiedTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl DateSource for ModifiedTimeSource {
    fn name(&self) -> &'static str {
        "modified_time"
    }

    fn origin(&self) -> DateOrigin {
        DateOrigin::ModifiedTime
    }

    fn date_for(&self, path: &Path) -> Result<Option<NaiveDateTime>> {
        let modified = fs::metadata(path)?.modified()?;
        let local: DateTime<Local> = modified.into();
        Ok(Some(local.naive_local()))
    }
}
