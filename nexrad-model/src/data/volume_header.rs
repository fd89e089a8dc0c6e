use std::fmt::Debug;

#[cfg(feature = "chrono")]
use crate::util::get_datetime;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Duration, Utc};

/// The archive file's fixed 24-byte leading header, present regardless of compression or message
/// format. Decoded once and never modified afterward.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeHeader {
    tape_filename: [u8; 9],
    extension_number: [u8; 3],
    modified_julian_date: u32,
    milliseconds: u32,
    icao: [u8; 4],
}

impl VolumeHeader {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        tape_filename: [u8; 9],
        extension_number: [u8; 3],
        modified_julian_date: u32,
        milliseconds: u32,
        icao: [u8; 4],
    ) -> Self {
        Self {
            tape_filename,
            extension_number,
            modified_julian_date,
            milliseconds,
            icao,
        }
    }

    /// The archive tape filename, e.g. `ARCHIVE2.`.
    pub fn tape_filename(&self) -> Option<String> {
        ascii_trimmed(&self.tape_filename)
    }

    /// The archive extension number, e.g. `001`.
    pub fn extension_number(&self) -> Option<String> {
        ascii_trimmed(&self.extension_number)
    }

    /// Modified Julian date (days since 1 January 1970) of the start of this volume.
    pub fn modified_julian_date(&self) -> u32 {
        self.modified_julian_date
    }

    /// Milliseconds past midnight, GMT, of the start of this volume.
    pub fn milliseconds(&self) -> u32 {
        self.milliseconds
    }

    /// The four-letter ICAO identifier of the originating radar site, e.g. `KHGX`.
    pub fn icao(&self) -> Option<String> {
        ascii_trimmed(&self.icao)
    }

    /// This volume's start instant in UTC.
    #[cfg(feature = "chrono")]
    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        get_datetime(
            self.modified_julian_date as u16,
            Duration::milliseconds(self.milliseconds as i64),
        )
    }
}

fn ascii_trimmed(bytes: &[u8]) -> Option<String> {
    let text = std::str::from_utf8(bytes).ok()?;
    Some(text.trim().to_string())
}

impl Debug for VolumeHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VolumeHeader")
            .field("tape_filename", &self.tape_filename())
            .field("extension_number", &self.extension_number())
            .field("modified_julian_date", &self.modified_julian_date)
            .field("milliseconds", &self.milliseconds)
            .field("icao", &self.icao())
            .finish()
    }
}
