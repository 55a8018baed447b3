//! the date-taken cascade: filename, then exif, then mtime

use std::fs;
use std::io::BufReader;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use exif::{In, Tag, Value};

/// only these can carry a DateTimeOriginal tag worth opening the file for
const EXIF_EXTS: &[&str] = &["jpg", "jpeg", "png"];

/// Best-guess date taken for a media file. The filename is checked first
/// because pulling exif data means opening the file and is slow; mtime is
/// the last resort for things like synced downloads.
pub fn resolve(path: &Path) -> NaiveDate
{
    date_from_filename(path)
        .or_else(|| date_from_exif(path))
        .unwrap_or_else(|| date_from_mtime(path))
}

/// Cameras and phones name media with two conventions:
///   IMG_yyyyMMdd_hhmmss.jpg
///   yyyyMMdd_hhmmss.jpg
/// Pull the date straight out of the name when it fits either shape.
pub fn date_from_filename(path: &Path) -> Option<NaiveDate>
{
    let stem = path.file_stem()?.to_str()?;
    let mut tokens = stem.split('_');
    let first = tokens.next()?;
    let token = if first == "IMG" { tokens.next()? } else { first };

    if token.len() != 8 || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // strict; an impossible calendar date (month 13...) is just a miss
    NaiveDate::parse_from_str(token, "%Y%m%d").ok()
}

/// DateTimeOriginal (0x9003) from the exif container, read without
/// decoding any pixel data. Every failure mode is a miss, never an error.
pub fn date_from_exif(path: &Path) -> Option<NaiveDate>
{
    let ext = path.extension()?.to_str()?.to_lowercase();
    if !EXIF_EXTS.contains(&ext.as_str()) {
        return None;
    }

    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("exif read failed for {}: {}", path.display(), e);
            return None;
        }
    };
    let mut buf = BufReader::new(file);
    let exif = match exif::Reader::new().read_from_container(&mut buf) {
        Ok(x) => x,
        Err(e) => {
            eprintln!("exif read failed for {}: {}", path.display(), e);
            return None;
        }
    };

    let field = exif.get_field(Tag::DateTimeOriginal, In::PRIMARY)?;
    let raw = match &field.value {
        Value::Ascii(lines) if !lines.is_empty() => String::from_utf8_lossy(&lines[0]),
        _ => return None,
    };
    parse_exif_datetime(&raw)
}

/// exif dates look like "2024:05:01 09:44:55"; swapping the first two
/// colons for hyphens leaves an ordinary date-time string
fn parse_exif_datetime(raw: &str) -> Option<NaiveDate>
{
    let trimmed = raw.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    let fixed = trimmed.replacen(':', "-", 2);
    NaiveDateTime::parse_from_str(&fixed, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|dt| dt.date())
}

/// Last-write time of the file, local date portion only. If even that
/// can't be read (file vanished mid-run) fall back to today; the move
/// attempt will surface the real error.
pub fn date_from_mtime(path: &Path) -> NaiveDate
{
    match fs::metadata(path).and_then(|md| md.modified()) {
        Ok(t) => DateTime::<Local>::from(t).date_naive(),
        Err(e) => {
            eprintln!("no mtime for {}: {}", path.display(), e);
            Local::now().date_naive()
        }
    }
}
