#![allow(dead_code)]

use chrono::{Local, TimeZone};
use filetime::FileTime;
use std::path::Path;

/// Little-endian TIFF block: IFD0 -> Exif IFD -> DateTimeOriginal.
pub fn tiff_with_capture_date(date: &str) -> Vec<u8> {
    let mut value = date.as_bytes().to_vec();
    value.push(0);
    assert!(value.len() > 4, "ASCII value must live outside the entry");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    // IFD0 at 8: one entry, ExifIFDPointer -> 26
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes());
    tiff.extend_from_slice(&4u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&26u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD at 26: DateTimeOriginal, ASCII, value at 44
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes());
    tiff.extend_from_slice(&2u16.to_le_bytes());
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&44u32.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    assert_eq!(tiff.len(), 44);
    tiff.extend_from_slice(&value);
    tiff
}

/// Little-endian TIFF block whose only tag is Orientation.
pub fn tiff_without_capture_date() -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&8u32.to_le_bytes());

    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x0112u16.to_le_bytes());
    tiff.extend_from_slice(&3u16.to_le_bytes());
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&[1, 0, 0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff
}

/// SOI, one APP1 "Exif" segment, EOI.
pub fn jpeg_with_tiff(tiff: &[u8]) -> Vec<u8> {
    let mut jpeg = vec![0xFF, 0xD8, 0xFF, 0xE1];
    let segment_len = (2 + 6 + tiff.len()) as u16;
    jpeg.extend_from_slice(&segment_len.to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(tiff);
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

pub fn write_photo(path: &Path, capture_date: &str) {
    std::fs::write(path, jpeg_with_tiff(&tiff_with_capture_date(capture_date))).unwrap();
}

/// Pins the modification time to a local wall-clock time.
pub fn set_local_mtime(path: &Path, y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) {
    let local = Local
        .with_ymd_and_hms(y, m, d, h, mi, s)
        .single()
        .expect("unambiguous local time");
    filetime::set_file_mtime(path, FileTime::from_unix_time(local.timestamp(), 0)).unwrap();
}
