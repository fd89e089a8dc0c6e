//!
//! Message type 31, "Digital Radar Data": the modern variable-length radial record. A 28-byte
//! fixed header is followed by up to ten 4-byte absolute offsets (measured from the start of
//! this header) to data blocks; which block a pointer addresses is determined by peeking its
//! three-character ASCII name at the target offset, not by the pointer's position in the list.
//!

use crate::reader::ByteReader;
use crate::result::Result;
use nexrad_model::data::{GateBlock, Location, Moment, Radial, RadialStatus};

const FIXED_HEADER_SIZE: usize = 28;
const POINTER_COUNT: usize = 10;
pub const HEADER_SIZE: usize = FIXED_HEADER_SIZE + POINTER_COUNT * 4;

#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub id: [u8; 4],
    pub collection_time_ms: u32,
    pub collection_date: u16,
    pub azimuth_number: u16,
    pub azimuth_angle: f32,
    pub azimuth_resolution: u8,
    pub radial_status: u8,
    pub elevation_number: u8,
    pub elevation_angle: f32,
    pub radial_length: u16,
    pub data_block_count: u16,
    pub pointers: [u32; POINTER_COUNT],
}

pub fn decode_header(reader: &mut ByteReader) -> Result<Header> {
    let id = reader.read_array::<4>()?;
    let collection_time_ms = reader.read_u32()?;
    let collection_date = reader.read_u16()?;
    let azimuth_number = reader.read_u16()?;
    let azimuth_angle = reader.read_f32()?;
    let azimuth_resolution = reader.read_u8()?;
    let radial_status = reader.read_u8()?;
    let elevation_number = reader.read_u8()?;
    let _reserved = reader.read_u8()?;
    let elevation_angle = reader.read_f32()?;
    let radial_length = reader.read_u16()?;
    let data_block_count = reader.read_u16()?;

    debug_assert_eq!(reader.position(), FIXED_HEADER_SIZE);

    let mut pointers = [0u32; POINTER_COUNT];
    for slot in pointers.iter_mut() {
        *slot = reader.read_u32()?;
    }

    Ok(Header {
        id,
        collection_time_ms,
        collection_date,
        azimuth_number,
        azimuth_angle,
        azimuth_resolution,
        radial_status,
        elevation_number,
        elevation_angle,
        radial_length,
        data_block_count,
        pointers,
    })
}

struct VolumeBlock {
    location: Location,
    vcp_number: u16,
}

fn decode_volume_block(reader: &mut ByteReader) -> Result<VolumeBlock> {
    let _id = reader.read_array::<4>()?;
    let _lrtup = reader.read_u16()?;
    let _version_major = reader.read_u8()?;
    let _version_minor = reader.read_u8()?;
    let latitude = reader.read_f32()?;
    let longitude = reader.read_f32()?;
    let height_meters = reader.read_i16()?;
    let feedhorn_height_meters = reader.read_u16()?;
    let _calibration_constant = reader.read_f32()?;
    let _tx_power_h = reader.read_f32()?;
    let _tx_power_v = reader.read_f32()?;
    let _zdr_calibration = reader.read_f32()?;
    let _initial_phase = reader.read_f32()?;
    let vcp_number = reader.read_u16()?;
    let _processing_status = reader.read_u16()?;

    Ok(VolumeBlock {
        location: Location {
            latitude,
            longitude,
            height_meters,
            feedhorn_height_meters,
        },
        vcp_number,
    })
}

struct RadialBlock {
    unambiguous_range_meters: f32,
    nyquist_velocity_mps: f32,
}

fn decode_radial_block(reader: &mut ByteReader) -> Result<RadialBlock> {
    let _id = reader.read_array::<4>()?;
    let _lrtup = reader.read_u16()?;
    let unambiguous_range_raw = reader.read_u16()?;
    let _noise_h = reader.read_f32()?;
    let _noise_v = reader.read_f32()?;
    let nyquist_velocity_raw = reader.read_i16()?;
    let _radial_flags = reader.read_u16()?;
    let _calib_h = reader.read_f32()?;
    let _calib_v = reader.read_f32()?;

    Ok(RadialBlock {
        unambiguous_range_meters: unambiguous_range_raw as f32 * 10.0,
        nyquist_velocity_mps: nyquist_velocity_raw as f32 * 0.01,
    })
}

fn decode_generic_block(reader: &mut ByteReader) -> Result<GateBlock> {
    let _id = reader.read_array::<4>()?;
    let _reserved = reader.read_array::<4>()?;
    let ngates = reader.read_u16()?;
    let first_gate_raw = reader.read_i16()?;
    let gate_spacing_raw = reader.read_i16()?;
    let _thresh = reader.read_i16()?;
    let _snr_thresh = reader.read_i16()?;
    let _flags = reader.read_u8()?;
    let word_size_bits = reader.read_u8()?;
    let scale = reader.read_f32()?;
    let offset = reader.read_f32()?;

    let mut gates = Vec::with_capacity(ngates as usize);
    for _ in 0..ngates {
        let code = match word_size_bits {
            8 => reader.read_u8()? as u16,
            _ => reader.read_u16()?,
        };
        gates.push(code);
    }

    Ok(GateBlock {
        first_gate_meters: first_gate_raw as f32,
        gate_spacing_meters: gate_spacing_raw as f32,
        word_size_bits,
        scale,
        offset,
        gates,
    })
}

/// Decodes a single Message 31 record starting at `record`, dispatching its data block
/// pointers by the block's peeked name rather than by pointer slot.
pub fn decode_record(record: ByteReader) -> Result<Radial> {
    // Pointers are offsets from the start of this record, but `record` may itself be
    // positioned partway into a larger buffer (e.g. after a preceding MessageHeader), so each
    // pointer must be resolved relative to `record`'s own starting position.
    let base = record.position();

    let mut header_reader = record;
    let header = decode_header(&mut header_reader)?;

    let mut radial = Radial::new(
        header.collection_date,
        header.collection_time_ms,
        header.azimuth_number,
        header.azimuth_angle,
        header.elevation_number,
        header.elevation_angle,
        RadialStatus::from_code(header.radial_status),
    );

    for &pointer in header.pointers.iter() {
        if pointer == 0 {
            continue;
        }

        let absolute = base + pointer as usize;

        let name_reader = record.at(absolute + 1)?;
        let name = {
            let mut r = name_reader;
            r.read_ascii(3)?
        };

        let mut block_reader = record.at(absolute)?;
        match name.as_str() {
            "VOL" => {
                let block = decode_volume_block(&mut block_reader)?;
                radial.set_location(block.location);
                radial.set_vcp_number(block.vcp_number);
            }
            "RAD" => {
                let block = decode_radial_block(&mut block_reader)?;
                radial.set_unambiguous_range_meters(block.unambiguous_range_meters);
                radial.set_nyquist_velocity_mps(block.nyquist_velocity_mps);
            }
            "ELV" => {
                // Atmospheric attenuation and the per-elevation calibration constant are not
                // part of this spec's external interface; the block is skipped.
            }
            "REF" => radial.set_moment(Moment::Reflectivity, decode_generic_block(&mut block_reader)?),
            "VEL" => radial.set_moment(Moment::Velocity, decode_generic_block(&mut block_reader)?),
            "SW" => radial.set_moment(Moment::SpectrumWidth, decode_generic_block(&mut block_reader)?),
            "ZDR" => radial.set_moment(
                Moment::DifferentialReflectivity,
                decode_generic_block(&mut block_reader)?,
            ),
            "PHI" => radial.set_moment(Moment::DifferentialPhase, decode_generic_block(&mut block_reader)?),
            "RHO" => radial.set_moment(
                Moment::CorrelationCoefficient,
                decode_generic_block(&mut block_reader)?,
            ),
            "CFP" => radial.set_moment(Moment::ClutterFilterPower, decode_generic_block(&mut block_reader)?),
            other => {
                log::debug!("skipping unrecognized Message 31 data block name {other:?}");
            }
        }
    }

    Ok(radial)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    fn push_u32(buf: &mut Vec<u8>, v: u32) {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    fn push_f32(buf: &mut Vec<u8>, v: f32) {
        buf.extend_from_slice(&v.to_be_bytes());
    }
    fn push_i16(buf: &mut Vec<u8>, v: i16) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Builds a minimal Message 31 record with a single REF data block pointed to from
    /// pointer slot 0, proving dispatch follows the peeked block name rather than treating
    /// slot 0 as "always VOL".
    fn build_record_with_ref_in_slot_zero() -> Vec<u8> {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"ABCD"); // id
        push_u32(&mut buf, 123_456); // collection_time_ms
        push_u16(&mut buf, 20000); // collection_date
        push_u16(&mut buf, 1); // azimuth_number
        push_f32(&mut buf, 10.0); // azimuth_angle
        buf.push(2); // azimuth_resolution
        buf.push(0); // radial_status
        buf.push(3); // elevation_number
        buf.push(0); // reserved
        push_f32(&mut buf, 0.5); // elevation_angle
        push_u16(&mut buf, 0); // radial_length
        push_u16(&mut buf, 1); // data_block_count
        assert_eq!(buf.len(), FIXED_HEADER_SIZE);

        let data_block_offset = (FIXED_HEADER_SIZE + POINTER_COUNT * 4) as u32;
        push_u32(&mut buf, data_block_offset);
        for _ in 1..POINTER_COUNT {
            push_u32(&mut buf, 0);
        }
        assert_eq!(buf.len(), HEADER_SIZE);

        buf.extend_from_slice(b"DREF"); // type + name
        buf.extend_from_slice(&[0u8; 4]); // reserved
        push_u16(&mut buf, 2); // ngates
        push_i16(&mut buf, 0); // first_gate
        push_i16(&mut buf, 250); // gate_spacing
        push_i16(&mut buf, 0); // thresh
        push_i16(&mut buf, 0); // snr_thresh
        buf.push(0); // flags
        buf.push(16); // word_size_bits
        push_f32(&mut buf, 2.0); // scale
        push_f32(&mut buf, 66.0); // offset
        push_u16(&mut buf, 10); // gate 0
        push_u16(&mut buf, 20); // gate 1

        buf
    }

    #[test]
    fn dispatches_blocks_by_peeked_name_not_pointer_slot() {
        let buf = build_record_with_ref_in_slot_zero();
        let radial = decode_record(ByteReader::new(&buf)).unwrap();
        assert!(radial.moment(Moment::Reflectivity).is_some());
        assert!(radial.moment(Moment::Velocity).is_none());

        let block = radial.moment(Moment::Reflectivity).unwrap();
        assert_eq!(block.ngates(), 2);
        assert_eq!(block.decode_at(0, false), (10.0 - 66.0) / 2.0);
    }
}
