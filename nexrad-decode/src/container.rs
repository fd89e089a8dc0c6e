//!
//! De-frames a NEXRAD Level II archive file's outer container into the volume header and the
//! concatenated, decompressed message payload `P` that follows it.
//!

use crate::result::{Error, Result};
use bzip2::read::BzDecoder;
use std::io::Read;

const VOLUME_HEADER_SIZE: usize = 24;
const COMPRESSION_RECORD_SIZE: usize = 12;
const BZ2_STREAM_MIN_GAP: usize = 100;

/// The raw 24-byte volume header fields, decoded ahead of the compressed payload.
pub struct RawVolumeHeader {
    pub tape_filename: [u8; 9],
    pub extension_number: [u8; 3],
    pub modified_julian_date: u32,
    pub milliseconds: u32,
    pub icao: [u8; 4],
}

pub struct Container {
    pub header: RawVolumeHeader,
    /// The concatenated, decompressed message payload following the volume header.
    pub payload: Vec<u8>,
}

/// De-frames `bytes` into the volume header and its decompressed message payload.
pub fn decode(bytes: &[u8]) -> Result<Container> {
    if bytes.len() < VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE {
        return Err(Error::BufferTooShort {
            offset: 0,
            needed: VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE,
            available: bytes.len(),
        });
    }

    let header = decode_volume_header(bytes)?;

    let compression_record = &bytes[VOLUME_HEADER_SIZE..VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE];
    let discriminator = [compression_record[4], compression_record[5]];

    let payload = match discriminator {
        [b'B', b'Z'] => decode_compressed_payload(bytes)?,
        [0, 0] | [0x09, 0x80] => bytes[VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE..].to_vec(),
        other => return Err(Error::UnknownCompression(other)),
    };

    Ok(Container { header, payload })
}

fn decode_volume_header(bytes: &[u8]) -> Result<RawVolumeHeader> {
    let mut tape_filename = [0u8; 9];
    tape_filename.copy_from_slice(&bytes[0..9]);

    let mut extension_number = [0u8; 3];
    extension_number.copy_from_slice(&bytes[9..12]);

    let modified_julian_date = u32::from_be_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);
    let milliseconds = u32::from_be_bytes([bytes[16], bytes[17], bytes[18], bytes[19]]);

    let mut icao = [0u8; 4];
    icao.copy_from_slice(&bytes[20..24]);

    Ok(RawVolumeHeader {
        tape_filename,
        extension_number,
        modified_julian_date,
        milliseconds,
        icao,
    })
}

/// Scans the compressed region of `bytes` for independent BZ2 streams, decompresses each, and
/// concatenates the results. The leading 12 bytes of the concatenated decompressed output are
/// then dropped, since the archive carries the compression record forward into the first
/// stream's decompressed bytes.
fn decode_compressed_payload(bytes: &[u8]) -> Result<Vec<u8>> {
    let starts = find_stream_starts(bytes);

    let mut decompressed = Vec::new();
    let mut attempted = 0usize;
    let mut succeeded = 0usize;

    for (index, &start) in starts.iter().enumerate() {
        let end = starts.get(index + 1).copied().unwrap_or(bytes.len());
        attempted += 1;

        let mut buf = Vec::new();
        match BzDecoder::new(&bytes[start..end]).read_to_end(&mut buf) {
            Ok(_) => {
                succeeded += 1;
                decompressed.extend_from_slice(&buf);
            }
            Err(err) => {
                log::warn!("failed to decompress bzip2 stream {index} at offset {start}: {err}");
            }
        }
    }

    if succeeded == 0 {
        return Err(Error::DecompressionFailed(attempted));
    }

    if decompressed.len() > COMPRESSION_RECORD_SIZE {
        decompressed.drain(0..COMPRESSION_RECORD_SIZE);
    }

    Ok(decompressed)
}

/// Finds the start offset of each BZ2 stream following the volume header. The stream's 4-byte
/// control word (the word immediately preceding its `"BZh"` magic) is the primary signal — it
/// gives the stream's own declared length, so the next stream's control word is expected exactly
/// that many bytes later, and its magic 4 bytes after that. A position reached this way is
/// trusted directly, without the minimum-gap check. Only when that trusted position doesn't pan
/// out (no usable control word, or no magic where expected) does this fall back to a byte-by-byte
/// `"BZh"` scan, which is guarded by a minimum gap to avoid matching bytes that happen to look
/// like the magic inside compressed data.
fn find_stream_starts(bytes: &[u8]) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut pos = VOLUME_HEADER_SIZE + 4;
    let mut trusted = true;

    while pos + 3 <= bytes.len() {
        let found = is_bz2_magic(&bytes[pos..]) && (trusted || far_enough_from_previous(&starts, pos));

        if found {
            starts.push(pos);

            let control_word_offset = pos.saturating_sub(4);
            let declared_len = (control_word_offset >= VOLUME_HEADER_SIZE)
                .then(|| {
                    i32::from_be_bytes([
                        bytes[control_word_offset],
                        bytes[control_word_offset + 1],
                        bytes[control_word_offset + 2],
                        bytes[control_word_offset + 3],
                    ])
                    .unsigned_abs() as usize
                })
                .filter(|&len| len > 0);

            match declared_len {
                Some(len) => {
                    // The next stream's control word sits exactly `len` bytes later, and its
                    // magic 4 bytes after that; trust that position directly.
                    pos += len + 4;
                    trusted = true;
                }
                None => {
                    pos += 1;
                    trusted = false;
                }
            }
            continue;
        }

        trusted = false;
        pos += 1;
    }

    if starts.is_empty() {
        // No magic found at all (e.g. a corrupted or truncated first stream); fall back to
        // treating everything after the compression record as a single stream.
        starts.push(VOLUME_HEADER_SIZE + 4);
    }

    starts
}

/// When falling back to a byte-by-byte `"BZh"` scan (no usable control word), require each match
/// to be at least [`BZ2_STREAM_MIN_GAP`] bytes past the previous stream start, since compressed
/// data can otherwise coincidentally contain the magic bytes. Does not gate a position reached
/// directly via a control word's declared length.
fn far_enough_from_previous(starts: &[usize], candidate: usize) -> bool {
    match starts.last() {
        Some(&previous) => candidate - previous >= BZ2_STREAM_MIN_GAP,
        None => true,
    }
}

fn is_bz2_magic(data: &[u8]) -> bool {
    data.len() >= 4 && &data[0..3] == b"BZh" && data[3].is_ascii_digit() && data[3] != b'0'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_bz2_magic() {
        assert!(is_bz2_magic(b"BZh9rest"));
        assert!(!is_bz2_magic(b"BZh0rest"));
        assert!(!is_bz2_magic(b"BZhXrest"));
        assert!(!is_bz2_magic(b"xyz"));
    }

    #[test]
    fn uncompressed_discriminator_skips_to_payload() {
        let mut bytes = vec![0u8; VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE + 4];
        bytes[VOLUME_HEADER_SIZE + 4] = 0;
        bytes[VOLUME_HEADER_SIZE + 5] = 0;
        bytes[VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE] = 0xAB;
        let container = decode(&bytes).unwrap();
        assert_eq!(container.payload[0], 0xAB);
    }

    #[test]
    fn unknown_discriminator_is_an_error() {
        let mut bytes = vec![0u8; VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE];
        bytes[VOLUME_HEADER_SIZE + 4] = b'X';
        bytes[VOLUME_HEADER_SIZE + 5] = b'Y';
        assert!(matches!(decode(&bytes), Err(Error::UnknownCompression(_))));
    }

    // The following two fixtures are real bzip2 streams (each compressing a distinct 16-byte
    // ASCII message) assembled behind a volume header and compression record, one control word
    // per stream, exactly as the container format lays them out.

    const TWO_STREAM_FILE: [u8; 148] = [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x42, 0x5a,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x34, 0x42, 0x5a, 0x68, 0x39, 0x31,
        0x41, 0x59, 0x26, 0x53, 0x59, 0x1d, 0x92, 0x2a, 0x85, 0x00, 0x00, 0x03, 0x16, 0x00, 0x00,
        0x02, 0x22, 0x47, 0x9c, 0x00, 0x20, 0x00, 0x31, 0x00, 0xd3, 0x4d, 0x04, 0x00, 0x7a, 0x85,
        0x64, 0x86, 0x42, 0x05, 0xb9, 0xcd, 0xde, 0x2e, 0xe4, 0x8a, 0x70, 0xa1, 0x20, 0x3b, 0x24,
        0x55, 0x0a, 0x00, 0x00, 0x00, 0x34, 0x42, 0x5a, 0x68, 0x39, 0x31, 0x41, 0x59, 0x26, 0x53,
        0x59, 0x6b, 0x3e, 0xbc, 0x0f, 0x00, 0x00, 0x02, 0x96, 0x00, 0x00, 0x02, 0x22, 0x46, 0x9c,
        0x80, 0x20, 0x00, 0x31, 0x00, 0xd3, 0x4d, 0x04, 0x01, 0x91, 0xa0, 0x16, 0x45, 0xd1, 0x30,
        0x97, 0x28, 0x9f, 0x17, 0x72, 0x45, 0x38, 0x50, 0x90, 0x6b, 0x3e, 0xbc, 0x0f,
    ];

    const TWO_STREAM_FILE_SECOND_TRUNCATED: [u8; 106] = [
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x42, 0x5a,
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x34, 0x42, 0x5a, 0x68, 0x39, 0x31,
        0x41, 0x59, 0x26, 0x53, 0x59, 0x1d, 0x92, 0x2a, 0x85, 0x00, 0x00, 0x03, 0x16, 0x00, 0x00,
        0x02, 0x22, 0x47, 0x9c, 0x00, 0x20, 0x00, 0x31, 0x00, 0xd3, 0x4d, 0x04, 0x00, 0x7a, 0x85,
        0x64, 0x86, 0x42, 0x05, 0xb9, 0xcd, 0xde, 0x2e, 0xe4, 0x8a, 0x70, 0xa1, 0x20, 0x3b, 0x24,
        0x55, 0x0a, 0x00, 0x00, 0x00, 0x0a, 0x42, 0x5a, 0x68, 0x39, 0x31, 0x41, 0x59, 0x26, 0x53,
        0x59,
    ];

    #[test]
    fn multi_stream_payload_is_decompressed_and_concatenated_in_order() {
        let container = decode(&TWO_STREAM_FILE).unwrap();
        assert_eq!(container.payload, b"-ONEHELLO-STREAM-TWO");
    }

    #[test]
    fn truncated_final_stream_is_skipped_not_fatal() {
        let container = decode(&TWO_STREAM_FILE_SECOND_TRUNCATED).unwrap();
        assert_eq!(container.payload, b"-ONE");
    }

    #[test]
    fn every_stream_failing_is_an_error() {
        let mut bytes = vec![0u8; VOLUME_HEADER_SIZE + COMPRESSION_RECORD_SIZE];
        bytes[VOLUME_HEADER_SIZE + 4] = b'B';
        bytes[VOLUME_HEADER_SIZE + 5] = b'Z';
        bytes.extend_from_slice(&[0, 0, 0, 4]);
        bytes.extend_from_slice(b"BZh9");
        assert!(matches!(decode(&bytes), Err(Error::DecompressionFailed(_))));
    }
}
