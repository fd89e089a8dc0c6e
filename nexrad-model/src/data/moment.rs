use std::fmt;

/// The seven base-data quantities a radial may carry, one per Message 31 moment data block (or
/// one of the three moments a legacy Message 1 record carries).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Moment {
    Reflectivity,
    Velocity,
    SpectrumWidth,
    DifferentialReflectivity,
    DifferentialPhase,
    CorrelationCoefficient,
    ClutterFilterPower,
}

impl Moment {
    /// The three-character block/moment name used on the wire and in error messages, e.g. `"REF"`.
    pub fn name(&self) -> &'static str {
        match self {
            Moment::Reflectivity => "REF",
            Moment::Velocity => "VEL",
            Moment::SpectrumWidth => "SW",
            Moment::DifferentialReflectivity => "ZDR",
            Moment::DifferentialPhase => "PHI",
            Moment::CorrelationCoefficient => "RHO",
            Moment::ClutterFilterPower => "CFP",
        }
    }

    /// Parses a moment name, accepting the wire spelling (`"SW "` with a trailing pad space is
    /// trimmed by the caller before reaching here).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "REF" => Some(Moment::Reflectivity),
            "VEL" => Some(Moment::Velocity),
            "SW" => Some(Moment::SpectrumWidth),
            "ZDR" => Some(Moment::DifferentialReflectivity),
            "PHI" => Some(Moment::DifferentialPhase),
            "RHO" => Some(Moment::CorrelationCoefficient),
            "CFP" => Some(Moment::ClutterFilterPower),
            _ => None,
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The raw gate-code sentinel meaning "below threshold / no echo".
pub const BELOW_THRESHOLD: u16 = 0;

/// The raw gate-code sentinel meaning "range folded".
pub const RANGE_FOLDED: u16 = 1;

/// One moment's decoded data block for a single radial: its geometry, scale/offset, and the raw
/// gate codes as read from the wire (not yet converted to physical units).
#[derive(Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateBlock {
    pub first_gate_meters: f32,
    pub gate_spacing_meters: f32,
    pub word_size_bits: u8,
    pub scale: f32,
    pub offset: f32,
    /// Raw gate codes widened to `u16` regardless of the wire word size.
    pub gates: Vec<u16>,
}

impl GateBlock {
    pub fn ngates(&self) -> usize {
        self.gates.len()
    }

    /// The range, in meters, of gate `index`: `first_gate + index * gate_spacing`.
    pub fn range_at(&self, index: usize) -> f32 {
        self.first_gate_meters + index as f32 * self.gate_spacing_meters
    }

    /// The full arithmetic range sequence for this block, one entry per gate.
    pub fn ranges(&self) -> Vec<f32> {
        (0..self.ngates()).map(|i| self.range_at(i)).collect()
    }

    /// Decodes gate `index` to a physical value, or `NaN` if the raw code is one of the two
    /// missing sentinels (0 = below threshold, 1 = range folded). This mapping happens
    /// unconditionally before scale/offset is applied, per the missing-code law.
    ///
    /// When `raw` is true, any non-sentinel code is returned unconverted.
    pub fn decode_at(&self, index: usize, raw: bool) -> f32 {
        decode_gate_code(self.gates[index], self.scale, self.offset, raw)
    }
}

/// Decodes a single raw gate code to a physical value under the scheme shared by every moment:
/// the two reserved low codes map to the missing sentinel before any scale/offset is considered.
pub fn decode_gate_code(code: u16, scale: f32, offset: f32, raw: bool) -> f32 {
    if code == BELOW_THRESHOLD || code == RANGE_FOLDED {
        return f32::NAN;
    }
    if raw {
        code as f32
    } else {
        (code as f32 - offset) / scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_codes_map_to_nan_regardless_of_scale_or_raw() {
        assert!(decode_gate_code(BELOW_THRESHOLD, 2.0, 66.0, false).is_nan());
        assert!(decode_gate_code(RANGE_FOLDED, 2.0, 66.0, false).is_nan());
        assert!(decode_gate_code(BELOW_THRESHOLD, 2.0, 66.0, true).is_nan());
    }

    #[test]
    fn non_sentinel_codes_apply_scale_and_offset() {
        assert_eq!(decode_gate_code(10, 2.0, 66.0, false), (10.0 - 66.0) / 2.0);
        assert_eq!(decode_gate_code(10, 2.0, 66.0, true), 10.0);
    }

    #[test]
    fn ranges_form_an_arithmetic_sequence_from_first_gate_and_spacing() {
        let block = GateBlock {
            first_gate_meters: 2125.0,
            gate_spacing_meters: 250.0,
            word_size_bits: 16,
            scale: 2.0,
            offset: 66.0,
            gates: vec![10, 20, 30, 40],
        };
        let ranges = block.ranges();
        assert_eq!(ranges.len(), block.ngates());
        for (i, window) in ranges.windows(2).enumerate() {
            assert_eq!(window[1] - window[0], 250.0, "gap at index {i}");
        }
        assert_eq!(ranges[0], 2125.0);
    }

    #[test]
    fn parse_round_trips_with_name() {
        for moment in [
            Moment::Reflectivity,
            Moment::Velocity,
            Moment::SpectrumWidth,
            Moment::DifferentialReflectivity,
            Moment::DifferentialPhase,
            Moment::CorrelationCoefficient,
            Moment::ClutterFilterPower,
        ] {
            assert_eq!(Moment::parse(moment.name()), Some(moment));
        }
    }
}
