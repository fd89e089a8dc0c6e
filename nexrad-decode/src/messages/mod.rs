//!
//! Decodes the message records that make up a de-framed archive payload, dispatching each one
//! by its 16-byte header's message type.
//!

pub mod header;
pub mod message1;
pub mod message31;
pub mod message5;

use crate::reader::ByteReader;
use crate::result::Result;
use header::MESSAGE_HEADER_SIZE;
use nexrad_model::data::{Radial, VolumeCoveragePattern};

/// The fixed total size (header included) of a legacy message record. Message types 1 and 5,
/// and any type this crate doesn't otherwise recognize, are always padded out to this size.
const LEGACY_RECORD_SIZE: usize = 2432;

pub struct DecodedMessages {
    pub radials: Vec<Radial>,
    pub coverage_pattern: Option<VolumeCoveragePattern>,
}

/// Walks the decompressed message payload from offset 0, decoding every Message 31, Message 1,
/// and Message 5 record it finds and skipping everything else by the legacy fixed stride.
pub fn decode_payload(payload: &[u8]) -> Result<DecodedMessages> {
    let root = ByteReader::new(payload);

    let mut radials = Vec::new();
    let mut coverage_pattern = None;
    let mut pos = 0usize;

    while pos + MESSAGE_HEADER_SIZE <= payload.len() {
        let mut header_reader = root.at(pos)?;
        let message_header = header::decode(&mut header_reader)?;
        let body_start = pos + MESSAGE_HEADER_SIZE;

        match message_header.message_type {
            31 => {
                let body_len = (message_header.size as usize * 2).saturating_sub(4);
                let record = root.at(body_start)?;
                radials.push(message31::decode_record(record)?);
                pos = body_start + body_len;
            }
            1 => {
                let record = root.at(body_start)?;
                radials.push(message1::decode_record(record)?);
                pos += LEGACY_RECORD_SIZE;
            }
            5 => {
                let record = root.at(body_start)?;
                coverage_pattern = Some(message5::decode_record(record)?);
                pos += LEGACY_RECORD_SIZE;
            }
            other => {
                log::trace!("skipping message type {other} at offset {pos}");
                pos += LEGACY_RECORD_SIZE;
            }
        }
    }

    Ok(DecodedMessages {
        radials,
        coverage_pattern,
    })
}
