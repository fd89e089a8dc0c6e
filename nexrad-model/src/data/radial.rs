use std::fmt::Debug;

use crate::data::location::Location;
use crate::data::moment::{GateBlock, Moment};

#[cfg(feature = "chrono")]
use crate::util::get_datetime;
#[cfg(feature = "chrono")]
use chrono::{DateTime, Duration, Utc};

/// A radial's position within its elevation scan, carried through from whichever wire format
/// produced it (Message 31's `radial_status` byte, or Message 1's equivalent field).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RadialStatus {
    ElevationStart,
    IntermediateRadialData,
    ElevationEnd,
    VolumeScanStart,
    VolumeScanEnd,
    ElevationStartVcpFinal,
    Unknown(u8),
}

impl RadialStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => RadialStatus::ElevationStart,
            1 => RadialStatus::IntermediateRadialData,
            2 => RadialStatus::ElevationEnd,
            3 => RadialStatus::VolumeScanStart,
            4 => RadialStatus::VolumeScanEnd,
            5 => RadialStatus::ElevationStartVcpFinal,
            other => RadialStatus::Unknown(other),
        }
    }
}

/// One decoded radial (ray), unified from either a Message 31 or a legacy Message 1 record.
#[derive(Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Radial {
    collection_modified_julian_date: u16,
    collection_milliseconds: u32,
    azimuth_number: u16,
    azimuth_angle_degrees: f32,
    elevation_number: u8,
    elevation_angle_degrees: f32,
    radial_status: RadialStatus,

    location: Option<Location>,
    vcp_number: Option<u16>,

    nyquist_velocity_mps: Option<f32>,
    unambiguous_range_meters: Option<f32>,

    reflectivity: Option<GateBlock>,
    velocity: Option<GateBlock>,
    spectrum_width: Option<GateBlock>,
    differential_reflectivity: Option<GateBlock>,
    differential_phase: Option<GateBlock>,
    correlation_coefficient: Option<GateBlock>,
    clutter_filter_power: Option<GateBlock>,
}

impl Radial {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        collection_modified_julian_date: u16,
        collection_milliseconds: u32,
        azimuth_number: u16,
        azimuth_angle_degrees: f32,
        elevation_number: u8,
        elevation_angle_degrees: f32,
        radial_status: RadialStatus,
    ) -> Self {
        Self {
            collection_modified_julian_date,
            collection_milliseconds,
            azimuth_number,
            azimuth_angle_degrees,
            elevation_number,
            elevation_angle_degrees,
            radial_status,
            location: None,
            vcp_number: None,
            nyquist_velocity_mps: None,
            unambiguous_range_meters: None,
            reflectivity: None,
            velocity: None,
            spectrum_width: None,
            differential_reflectivity: None,
            differential_phase: None,
            correlation_coefficient: None,
            clutter_filter_power: None,
        }
    }

    pub fn collection_modified_julian_date(&self) -> u16 {
        self.collection_modified_julian_date
    }

    pub fn collection_milliseconds(&self) -> u32 {
        self.collection_milliseconds
    }

    #[cfg(feature = "chrono")]
    pub fn collection_time(&self) -> Option<DateTime<Utc>> {
        get_datetime(
            self.collection_modified_julian_date,
            Duration::milliseconds(self.collection_milliseconds as i64),
        )
    }

    pub fn azimuth_number(&self) -> u16 {
        self.azimuth_number
    }

    pub fn azimuth_angle_degrees(&self) -> f32 {
        self.azimuth_angle_degrees
    }

    pub fn elevation_number(&self) -> u8 {
        self.elevation_number
    }

    pub fn elevation_angle_degrees(&self) -> f32 {
        self.elevation_angle_degrees
    }

    pub fn radial_status(&self) -> RadialStatus {
        self.radial_status
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    pub fn set_location(&mut self, location: Location) {
        self.location = Some(location);
    }

    pub fn vcp_number(&self) -> Option<u16> {
        self.vcp_number
    }

    pub fn set_vcp_number(&mut self, vcp_number: u16) {
        self.vcp_number = Some(vcp_number);
    }

    pub fn nyquist_velocity_mps(&self) -> Option<f32> {
        self.nyquist_velocity_mps
    }

    pub fn set_nyquist_velocity_mps(&mut self, value: f32) {
        self.nyquist_velocity_mps = Some(value);
    }

    pub fn unambiguous_range_meters(&self) -> Option<f32> {
        self.unambiguous_range_meters
    }

    pub fn set_unambiguous_range_meters(&mut self, value: f32) {
        self.unambiguous_range_meters = Some(value);
    }

    /// The gate block for a given moment, if this radial carries it.
    pub fn moment(&self, moment: Moment) -> Option<&GateBlock> {
        match moment {
            Moment::Reflectivity => self.reflectivity.as_ref(),
            Moment::Velocity => self.velocity.as_ref(),
            Moment::SpectrumWidth => self.spectrum_width.as_ref(),
            Moment::DifferentialReflectivity => self.differential_reflectivity.as_ref(),
            Moment::DifferentialPhase => self.differential_phase.as_ref(),
            Moment::CorrelationCoefficient => self.correlation_coefficient.as_ref(),
            Moment::ClutterFilterPower => self.clutter_filter_power.as_ref(),
        }
    }

    pub fn set_moment(&mut self, moment: Moment, block: GateBlock) {
        let slot = match moment {
            Moment::Reflectivity => &mut self.reflectivity,
            Moment::Velocity => &mut self.velocity,
            Moment::SpectrumWidth => &mut self.spectrum_width,
            Moment::DifferentialReflectivity => &mut self.differential_reflectivity,
            Moment::DifferentialPhase => &mut self.differential_phase,
            Moment::CorrelationCoefficient => &mut self.correlation_coefficient,
            Moment::ClutterFilterPower => &mut self.clutter_filter_power,
        };
        *slot = Some(block);
    }

    /// Every moment present on this radial, in the canonical REF/VEL/SW/ZDR/PHI/RHO/CFP order.
    pub fn moments_present(&self) -> Vec<Moment> {
        [
            Moment::Reflectivity,
            Moment::Velocity,
            Moment::SpectrumWidth,
            Moment::DifferentialReflectivity,
            Moment::DifferentialPhase,
            Moment::CorrelationCoefficient,
            Moment::ClutterFilterPower,
        ]
        .into_iter()
        .filter(|m| self.moment(*m).is_some())
        .collect()
    }
}

impl Debug for Radial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Radial")
            .field("azimuth_number", &self.azimuth_number)
            .field("azimuth_angle_degrees", &self.azimuth_angle_degrees)
            .field("elevation_number", &self.elevation_number)
            .field("elevation_angle_degrees", &self.elevation_angle_degrees)
            .field("radial_status", &self.radial_status)
            .field("moments_present", &self.moments_present())
            .finish()
    }
}
