/// One elevation cut's parameters from a Message 5 Volume Coverage Pattern descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElevationCut {
    /// Raw coded elevation angle; degrees = `raw * 360.0 / 65536.0`.
    pub elevation_angle_raw: u16,
    pub channel_configuration: u8,
    pub waveform_type: u8,
    pub super_resolution_control: u8,
    pub surveillance_prf_number: u8,
    pub surveillance_pulse_count: u16,
    pub azimuth_rate_raw: u16,
    pub reflectivity_threshold_raw: i16,
    pub velocity_threshold_raw: i16,
    pub spectrum_width_threshold_raw: i16,
    pub differential_reflectivity_threshold_raw: i16,
    pub differential_phase_threshold_raw: i16,
    pub correlation_coefficient_threshold_raw: i16,
    pub sector_1_edge_angle_raw: u16,
    pub sector_1_doppler_prf_number: u16,
    pub sector_1_doppler_pulse_count: u16,
    pub supplemental_data: u16,
    pub sector_2_edge_angle_raw: u16,
    pub sector_2_doppler_prf_number: u16,
    pub sector_2_doppler_pulse_count: u16,
    pub ebc_angle_raw: u16,
    pub sector_3_edge_angle_raw: u16,
    pub sector_3_doppler_prf_number: u16,
    pub sector_3_doppler_pulse_count: u16,
}

impl ElevationCut {
    /// The cut's target elevation angle in degrees.
    pub fn elevation_angle_degrees(&self) -> f32 {
        self.elevation_angle_raw as f32 * 360.0 / 65536.0
    }
}

/// The file's Volume Coverage Pattern descriptor, decoded from a Message 5 record.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolumeCoveragePattern {
    pub pattern_number: u16,
    pub pattern_type: u16,
    pub version: u8,
    pub clutter_map_group_number: u8,
    pub doppler_velocity_resolution: u8,
    pub pulse_width: u8,
    pub cuts: Vec<ElevationCut>,
}

impl VolumeCoveragePattern {
    /// The target elevation angle, in degrees, of cut `index`, if present.
    pub fn target_angle_degrees(&self, index: usize) -> Option<f32> {
        self.cuts.get(index).map(|cut| cut.elevation_angle_degrees())
    }
}
