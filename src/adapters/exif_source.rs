use crate::domain::model::DateOrigin;
use crate::domain::ports::DateSource;
use crate::utils::error::{Result, SorterError};
use chrono::NaiveDateTime;
use exif::{In, Reader, Tag, Value};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// EXIF stores capture dates as `YYYY:MM:DD HH:MM:SS`.
pub const CAPTURE_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Reads `DateTimeOriginal` from the primary image of any container the EXIF
/// reader understands (JPEG, TIFF, HEIF, PNG, WebP).
#[derive(Debug, Default, Clone, Copy)]
pub struct ExifDateSource;

impl ExifDateSource {
    pub fn new() -> Self {
        Self
    }
}

impl DateSource for ExifDateSource {
    fn name(&self) -> &'static str {
        "exif"
    }

    fn origin(&self) -> DateOrigin {
        DateOrigin::Metadata
    }

    fn date_for(&self, path: &Path) -> Result<Option<NaiveDateTime>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let exif = Reader::new().read_from_container(&mut reader)?;

        let Some(field) = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY) else {
            return Ok(None);
        };

        let raw = match &field.value {
            Value::Ascii(values) => values.first(),
            _ => None,
        }
        .ok_or(SorterError::MissingCaptureDate)?;

        parse_capture_date(&String::from_utf8_lossy(raw)).map(Some)
    }
}

pub fn parse_capture_date(value: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim_end_matches('\0').trim();
    NaiveDateTime::parse_from_str(trimmed, CAPTURE_DATE_FORMAT).map_err(|source| {
        SorterError::DateParse {
            value: trimmed.to_string(),
            source,
        }
    })
}
