//!
//! Message type 1, "Digital Radar Data" (legacy format): a fixed 100-byte header followed by up
//! to three contiguous, fixed-position byte arrays of gate codes (reflectivity, velocity, and
//! spectrum width). Unlike Message 31, this format carries no scale/offset fields of its own —
//! each moment uses an implicit, fixed conversion.
//!

use crate::reader::ByteReader;
use crate::result::Result;
use nexrad_model::data::{GateBlock, Moment, Radial, RadialStatus};

pub const HEADER_SIZE: usize = 100;

const REFLECTIVITY_SCALE: f32 = 2.0;
const REFLECTIVITY_OFFSET: f32 = 66.0;
const SPECTRUM_WIDTH_SCALE: f32 = 2.0;
const SPECTRUM_WIDTH_OFFSET: f32 = 129.0;
const VELOCITY_OFFSET: f32 = 129.0;

#[derive(Debug, Clone, Copy)]
pub struct Header {
    pub collection_time_ms: u32,
    pub modified_julian_date: u16,
    pub unambiguous_range_raw: u16,
    pub azimuth_angle_raw: u16,
    pub azimuth_number: u16,
    pub radial_status: u16,
    pub elevation_angle_raw: u16,
    pub elevation_number: u16,
    pub surveillance_first_gate_range: i16,
    pub doppler_first_gate_range: i16,
    pub surveillance_gate_interval: u16,
    pub doppler_gate_interval: u16,
    pub num_surveillance_gates: u16,
    pub num_doppler_gates: u16,
    pub sector_number: u16,
    pub calibration_constant: f32,
    pub reflectivity_pointer: u16,
    pub velocity_pointer: u16,
    pub spectrum_width_pointer: u16,
    pub doppler_velocity_resolution: u16,
    pub vcp_number: u16,
}

/// Coded angle to degrees, per the Message 1 convention: `value * 180 / 32768`.
fn angle_degrees(raw: u16) -> f32 {
    raw as f32 * 180.0 / 32768.0
}

pub fn decode_header(reader: &mut ByteReader) -> Result<Header> {
    let collection_time_ms = reader.read_u32()?;
    let modified_julian_date = reader.read_u16()?;
    let unambiguous_range_raw = reader.read_u16()?;
    let azimuth_angle_raw = reader.read_u16()?;
    let azimuth_number = reader.read_u16()?;
    let radial_status = reader.read_u16()?;
    let elevation_angle_raw = reader.read_u16()?;
    let elevation_number = reader.read_u16()?;
    let surveillance_first_gate_range = reader.read_i16()?;
    let doppler_first_gate_range = reader.read_i16()?;
    let surveillance_gate_interval = reader.read_u16()?;
    let doppler_gate_interval = reader.read_u16()?;
    let num_surveillance_gates = reader.read_u16()?;
    let num_doppler_gates = reader.read_u16()?;
    let sector_number = reader.read_u16()?;
    let calibration_constant = reader.read_f32()?;
    let reflectivity_pointer = reader.read_u16()?;
    let velocity_pointer = reader.read_u16()?;
    let spectrum_width_pointer = reader.read_u16()?;
    let doppler_velocity_resolution = reader.read_u16()?;
    let vcp_number = reader.read_u16()?;
    reader.skip(54)?;

    Ok(Header {
        collection_time_ms,
        modified_julian_date,
        unambiguous_range_raw,
        azimuth_angle_raw,
        azimuth_number,
        radial_status,
        elevation_angle_raw,
        elevation_number,
        surveillance_first_gate_range,
        doppler_first_gate_range,
        surveillance_gate_interval,
        doppler_gate_interval,
        num_surveillance_gates,
        num_doppler_gates,
        sector_number,
        calibration_constant,
        reflectivity_pointer,
        velocity_pointer,
        spectrum_width_pointer,
        doppler_velocity_resolution,
        vcp_number,
    })
}

#[allow(clippy::too_many_arguments)]
fn read_gate_block(
    record: ByteReader,
    base: usize,
    pointer: u16,
    ngates: u16,
    first_gate: i16,
    gate_spacing: u16,
    scale: f32,
    offset: f32,
) -> Result<Option<GateBlock>> {
    if pointer == 0 || ngates == 0 {
        return Ok(None);
    }

    let mut reader = record.at(base + pointer as usize)?;
    let mut gates = Vec::with_capacity(ngates as usize);
    for _ in 0..ngates {
        gates.push(reader.read_u8()? as u16);
    }

    Ok(Some(GateBlock {
        first_gate_meters: first_gate as f32,
        gate_spacing_meters: gate_spacing as f32,
        word_size_bits: 8,
        scale,
        offset,
        gates,
    }))
}

/// Decodes a single, fixed-length Message 1 record starting at `record`.
pub fn decode_record(record: ByteReader) -> Result<Radial> {
    // Gate pointers are offsets from the start of this record, but `record` may itself be
    // positioned partway into a larger buffer (e.g. after a preceding MessageHeader), so each
    // pointer must be resolved relative to `record`'s own starting position.
    let base = record.position();

    let mut header_reader = record;
    let header = decode_header(&mut header_reader)?;

    let mut radial = Radial::new(
        header.modified_julian_date,
        header.collection_time_ms,
        header.azimuth_number,
        angle_degrees(header.azimuth_angle_raw),
        header.elevation_number as u8,
        angle_degrees(header.elevation_angle_raw),
        RadialStatus::from_code(header.radial_status as u8),
    );

    radial.set_unambiguous_range_meters(header.unambiguous_range_raw as f32 * 10.0);

    let velocity_scale = match header.doppler_velocity_resolution {
        4 => 1.0,
        _ => 2.0,
    };

    if let Some(block) = read_gate_block(
        record,
        base,
        header.reflectivity_pointer,
        header.num_surveillance_gates,
        header.surveillance_first_gate_range,
        header.surveillance_gate_interval,
        REFLECTIVITY_SCALE,
        REFLECTIVITY_OFFSET,
    )? {
        radial.set_moment(Moment::Reflectivity, block);
    }

    if let Some(block) = read_gate_block(
        record,
        base,
        header.velocity_pointer,
        header.num_doppler_gates,
        header.doppler_first_gate_range,
        header.doppler_gate_interval,
        velocity_scale,
        VELOCITY_OFFSET,
    )? {
        radial.set_moment(Moment::Velocity, block);
    }

    if let Some(block) = read_gate_block(
        record,
        base,
        header.spectrum_width_pointer,
        header.num_doppler_gates,
        header.doppler_first_gate_range,
        header.doppler_gate_interval,
        SPECTRUM_WIDTH_SCALE,
        SPECTRUM_WIDTH_OFFSET,
    )? {
        radial.set_moment(Moment::SpectrumWidth, block);
    }

    radial.set_vcp_number(header.vcp_number);

    Ok(radial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_decodes_expected_size() {
        let mut buf = vec![0u8; HEADER_SIZE];
        buf[0..4].copy_from_slice(&500u32.to_be_bytes());
        let mut reader = ByteReader::new(&buf);
        let header = decode_header(&mut reader).unwrap();
        assert_eq!(reader.position(), HEADER_SIZE);
        assert_eq!(header.collection_time_ms, 500);
    }

    #[test]
    fn velocity_scale_depends_on_doppler_resolution() {
        assert_eq!(
            match 4u16 {
                4 => 1.0,
                _ => 2.0,
            },
            1.0
        );
        assert_eq!(
            match 2u16 {
                4 => 1.0,
                _ => 2.0,
            },
            2.0
        );
    }
}
