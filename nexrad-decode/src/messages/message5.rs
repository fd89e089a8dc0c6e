//!
//! Message type 5, "Volume Coverage Pattern": a 22-byte header followed by one 46-byte record
//! per elevation cut.
//!

use crate::reader::ByteReader;
use crate::result::Result;
use nexrad_model::data::{ElevationCut, VolumeCoveragePattern};

pub const HEADER_SIZE: usize = 22;
pub const ELEVATION_CUT_SIZE: usize = 46;

struct Header {
    pattern_type: u16,
    pattern_number: u16,
    number_of_elevation_cuts: u16,
    version: u8,
    clutter_map_group_number: u8,
    doppler_velocity_resolution: u8,
    pulse_width: u8,
}

fn decode_header(reader: &mut ByteReader) -> Result<Header> {
    let _message_size = reader.read_u16()?;
    let pattern_type = reader.read_u16()?;
    let pattern_number = reader.read_u16()?;
    let number_of_elevation_cuts = reader.read_u16()?;
    let version = reader.read_u8()?;
    let clutter_map_group_number = reader.read_u8()?;
    let doppler_velocity_resolution = reader.read_u8()?;
    let pulse_width = reader.read_u8()?;
    let _reserved_1 = reader.read_u32()?;
    let _vcp_sequencing = reader.read_u16()?;
    let _vcp_supplemental_data = reader.read_u16()?;
    let _reserved_2 = reader.read_u16()?;

    Ok(Header {
        pattern_type,
        pattern_number,
        number_of_elevation_cuts,
        version,
        clutter_map_group_number,
        doppler_velocity_resolution,
        pulse_width,
    })
}

fn decode_elevation_cut(reader: &mut ByteReader) -> Result<ElevationCut> {
    let cut = ElevationCut {
        elevation_angle_raw: reader.read_u16()?,
        channel_configuration: reader.read_u8()?,
        waveform_type: reader.read_u8()?,
        super_resolution_control: reader.read_u8()?,
        surveillance_prf_number: reader.read_u8()?,
        surveillance_pulse_count: reader.read_u16()?,
        azimuth_rate_raw: reader.read_u16()?,
        reflectivity_threshold_raw: reader.read_i16()?,
        velocity_threshold_raw: reader.read_i16()?,
        spectrum_width_threshold_raw: reader.read_i16()?,
        differential_reflectivity_threshold_raw: reader.read_i16()?,
        differential_phase_threshold_raw: reader.read_i16()?,
        correlation_coefficient_threshold_raw: reader.read_i16()?,
        sector_1_edge_angle_raw: reader.read_u16()?,
        sector_1_doppler_prf_number: reader.read_u16()?,
        sector_1_doppler_pulse_count: reader.read_u16()?,
        supplemental_data: reader.read_u16()?,
        sector_2_edge_angle_raw: reader.read_u16()?,
        sector_2_doppler_prf_number: reader.read_u16()?,
        sector_2_doppler_pulse_count: reader.read_u16()?,
        ebc_angle_raw: reader.read_u16()?,
        sector_3_edge_angle_raw: reader.read_u16()?,
        sector_3_doppler_prf_number: reader.read_u16()?,
        sector_3_doppler_pulse_count: reader.read_u16()?,
    };
    let _reserved = reader.read_u16()?;
    Ok(cut)
}

pub fn decode_record(mut reader: ByteReader) -> Result<VolumeCoveragePattern> {
    let header = decode_header(&mut reader)?;

    let mut cuts = Vec::with_capacity(header.number_of_elevation_cuts as usize);
    for _ in 0..header.number_of_elevation_cuts {
        cuts.push(decode_elevation_cut(&mut reader)?);
    }

    Ok(VolumeCoveragePattern {
        pattern_number: header.pattern_number,
        pattern_type: header.pattern_type,
        version: header.version,
        clutter_map_group_number: header.clutter_map_group_number,
        doppler_velocity_resolution: header.doppler_velocity_resolution,
        pulse_width: header.pulse_width,
        cuts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_u16(buf: &mut Vec<u8>, v: u16) {
        buf.extend_from_slice(&v.to_be_bytes());
    }

    #[test]
    fn decodes_single_cut_with_literal_angle_formula() {
        let mut buf = Vec::new();
        push_u16(&mut buf, 0); // message_size
        push_u16(&mut buf, 2); // pattern_type
        push_u16(&mut buf, 212); // pattern_number
        push_u16(&mut buf, 1); // number_of_elevation_cuts
        buf.push(1); // version
        buf.push(0); // clutter_map_group_number
        buf.push(4); // doppler_velocity_resolution
        buf.push(1); // pulse_width
        buf.extend_from_slice(&0u32.to_be_bytes()); // reserved_1
        push_u16(&mut buf, 0); // vcp_sequencing
        push_u16(&mut buf, 0); // vcp_supplemental_data
        push_u16(&mut buf, 0); // reserved_2
        assert_eq!(buf.len(), HEADER_SIZE);

        let before_cut = buf.len();
        push_u16(&mut buf, 8192); // elevation_angle_raw: 8192 * 360/65536 = 45 degrees
        buf.extend_from_slice(&[0u8; ELEVATION_CUT_SIZE - 2]);
        assert_eq!(buf.len() - before_cut, ELEVATION_CUT_SIZE);

        let vcp = decode_record(ByteReader::new(&buf)).unwrap();
        assert_eq!(vcp.pattern_number, 212);
        assert_eq!(vcp.cuts.len(), 1);
        assert!((vcp.target_angle_degrees(0).unwrap() - 45.0).abs() < 1e-4);
    }
}
