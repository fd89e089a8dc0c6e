//!
//! # nexrad-decode
//! Decoding functions for NEXRAD Level II weather radar archive files: de-frames the outer BZ2
//! container, decodes Message 31 and legacy Message 1 radial records and Message 5 volume
//! coverage pattern descriptors, and assembles the result into a [`nexrad_model::data::RadarFile`].
//!

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::correctness)]

pub mod container;
pub mod messages;
pub mod reader;
pub mod result;
mod util;

use nexrad_model::data::{build_scans, RadarFile, VolumeHeader};
use result::Result;

/// Decodes a complete NEXRAD Level II archive file from its raw bytes into a [`RadarFile`].
pub fn decode(bytes: &[u8]) -> Result<RadarFile> {
    let container = container::decode(bytes)?;

    let volume_header = VolumeHeader::new(
        container.header.tape_filename,
        container.header.extension_number,
        container.header.modified_julian_date,
        container.header.milliseconds,
        container.header.icao,
    );

    let start_time = util::get_datetime(
        volume_header.modified_julian_date() as u16,
        chrono::Duration::milliseconds(volume_header.milliseconds() as i64),
    );
    log::debug!(
        "decoding volume for site {:?}, start {:?}",
        volume_header.icao(),
        start_time,
    );

    let decoded = messages::decode_payload(&container.payload)?;

    let elevation_numbers: Vec<u8> = decoded
        .radials
        .iter()
        .map(|radial| radial.elevation_number())
        .collect();
    let scans = build_scans(&elevation_numbers);

    log::debug!(
        "decoded {} radials across {} scans",
        decoded.radials.len(),
        scans.len()
    );

    Ok(RadarFile::new(
        volume_header,
        decoded.coverage_pattern,
        decoded.radials,
        scans,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_truncated_input() {
        assert!(decode(&[0u8; 4]).is_err());
    }

    #[test]
    fn rejects_unknown_compression_discriminator() {
        let mut bytes = vec![0u8; 24 + 12];
        bytes[24 + 4] = b'X';
        bytes[24 + 5] = b'Y';
        assert!(decode(&bytes).is_err());
    }
}
