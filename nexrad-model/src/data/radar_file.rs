use crate::data::coverage_pattern::VolumeCoveragePattern;
use crate::data::gate_array::GateArray;
use crate::data::location::Location;
use crate::data::moment::Moment;
use crate::data::radial::Radial;
use crate::data::scan::ScanIndex;
use crate::data::times::Times;
use crate::data::volume_header::VolumeHeader;
use crate::result::{Error, Result};

/// One elevation scan's geometry and moment availability, as returned by
/// `RadarFile::scan_info`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanInfo {
    pub elevation_number: u8,
    pub ray_count: usize,
    pub moments_present: Vec<Moment>,
}

/// The fully decoded contents of one NEXRAD Level II archive file: the volume header, the
/// coverage pattern (if a Message 5 record was present), every decoded radial in stream order,
/// and the scan partition over those radials.
///
/// `RadarFile` owns every decoded array; it holds no reference back to the original input
/// buffer.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RadarFile {
    volume_header: VolumeHeader,
    coverage_pattern: Option<VolumeCoveragePattern>,
    radials: Vec<Radial>,
    scans: Vec<ScanIndex>,
}

impl RadarFile {
    pub fn new(
        volume_header: VolumeHeader,
        coverage_pattern: Option<VolumeCoveragePattern>,
        radials: Vec<Radial>,
        scans: Vec<ScanIndex>,
    ) -> Self {
        Self {
            volume_header,
            coverage_pattern,
            radials,
            scans,
        }
    }

    pub fn volume_header(&self) -> &VolumeHeader {
        &self.volume_header
    }

    pub fn radials(&self) -> &[Radial] {
        &self.radials
    }

    /// The volume coverage pattern's numeric identifier, preferring the Message 5 descriptor if
    /// present and otherwise falling back to the `vcp` field carried in a radial's VOL block.
    pub fn vcp_pattern(&self) -> Option<u16> {
        self.coverage_pattern
            .as_ref()
            .map(|vcp| vcp.pattern_number)
            .or_else(|| self.radials.iter().find_map(|r| r.vcp_number()))
    }

    /// The radar station's geodetic position, from the first radial carrying a VOL block, if any.
    pub fn location(&self) -> Option<Location> {
        self.radials.iter().find_map(|r| r.location())
    }

    pub fn scan_count(&self) -> usize {
        self.scans.len()
    }

    fn selected_scan_indices(&self, scans: Option<&[usize]>) -> Vec<usize> {
        match scans {
            Some(indices) => indices.to_vec(),
            None => (0..self.scans.len()).collect(),
        }
    }

    fn scan_at(&self, index: usize) -> Option<&ScanIndex> {
        self.scans.get(index)
    }

    /// Geometry and moment-availability summary for each selected scan (all scans, in scan
    /// order, if `scans` is `None`). Indices past `scan_count()` are silently omitted.
    pub fn scan_info(&self, scans: Option<&[usize]>) -> Vec<ScanInfo> {
        self.selected_scan_indices(scans)
            .into_iter()
            .filter_map(|scan_index| self.scan_at(scan_index))
            .map(|scan| {
                let moments_present = scan
                    .radial_indices()
                    .first()
                    .map(|&ray| self.radials[ray].moments_present())
                    .unwrap_or_default();
                ScanInfo {
                    elevation_number: scan.elevation_number(),
                    ray_count: scan.len(),
                    moments_present,
                }
            })
            .collect()
    }

    /// The arithmetic range sequence, in meters, for `moment` within `scan`, using the scan's
    /// first radial as the geometry reference. Returns an empty sequence if `scan` is
    /// out-of-range (per contract, this is not an error); raises `MomentNotPresent` if the scan
    /// exists but its reference radial lacks the moment.
    pub fn get_range(&self, scan: usize, moment: Moment) -> Result<Vec<f32>> {
        let Some(scan_ref) = self.scan_at(scan) else {
            return Ok(Vec::new());
        };
        let Some(&first_ray) = scan_ref.radial_indices().first() else {
            return Ok(Vec::new());
        };
        match self.radials[first_ray].moment(moment) {
            Some(block) => Ok(block.ranges()),
            None => Err(Error::MomentNotPresent(moment.name().to_string())),
        }
    }

    fn rays_for(&self, scans: Option<&[usize]>) -> Vec<usize> {
        self.selected_scan_indices(scans)
            .into_iter()
            .filter_map(|scan_index| self.scan_at(scan_index))
            .flat_map(|scan| scan.radial_indices().iter().copied())
            .collect()
    }

    pub fn get_azimuth_angles(&self, scans: Option<&[usize]>) -> Vec<f32> {
        self.rays_for(scans)
            .into_iter()
            .map(|ray| self.radials[ray].azimuth_angle_degrees())
            .collect()
    }

    pub fn get_elevation_angles(&self, scans: Option<&[usize]>) -> Vec<f32> {
        self.rays_for(scans)
            .into_iter()
            .map(|ray| self.radials[ray].elevation_angle_degrees())
            .collect()
    }

    /// The coverage pattern's target elevation angle for each selected scan (one entry per scan,
    /// not per ray); `None` where no coverage pattern or no matching cut exists.
    pub fn get_target_angles(&self, scans: Option<&[usize]>) -> Vec<Option<f32>> {
        self.selected_scan_indices(scans)
            .into_iter()
            .map(|scan_index| {
                self.coverage_pattern
                    .as_ref()
                    .and_then(|vcp| vcp.target_angle_degrees(scan_index))
            })
            .collect()
    }

    pub fn get_nyquist_vel(&self, scans: Option<&[usize]>) -> Vec<Option<f32>> {
        self.rays_for(scans)
            .into_iter()
            .map(|ray| self.radials[ray].nyquist_velocity_mps())
            .collect()
    }

    pub fn get_unambiguous_range(&self, scans: Option<&[usize]>) -> Vec<Option<f32>> {
        self.rays_for(scans)
            .into_iter()
            .map(|ray| self.radials[ray].unambiguous_range_meters())
            .collect()
    }

    /// The volume's base instant and, for each selected ray, its offset from that base.
    pub fn get_times(&self, scans: Option<&[usize]>) -> Times {
        let base_ms = self.volume_header.milliseconds() as i64;
        let time_offset = self
            .rays_for(scans)
            .into_iter()
            .map(|ray| {
                let collect_ms = self.radials[ray].collection_milliseconds() as i64;
                (collect_ms - base_ms) as f64 / 1000.0
            })
            .collect();
        Times {
            base_ms,
            time_offset,
        }
    }

    /// A dense `[total_rays x max_ngates]` array of decoded values for `moment` across the
    /// selected scans. Rays lacking the moment are filled entirely with the missing sentinel
    /// (`NaN`); gates beyond a ray's own gate count are padded the same way.
    pub fn get_data(
        &self,
        moment: Moment,
        max_ngates: usize,
        scans: Option<&[usize]>,
        raw: bool,
    ) -> GateArray {
        let rays = self.rays_for(scans);
        let mut data = vec![f32::NAN; rays.len() * max_ngates];

        for (row, &ray) in rays.iter().enumerate() {
            if let Some(block) = self.radials[ray].moment(moment) {
                let n = block.ngates().min(max_ngates);
                for i in 0..n {
                    data[row * max_ngates + i] = block.decode_at(i, raw);
                }
            }
        }

        GateArray::new(rays.len(), max_ngates, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::moment::GateBlock;
    use crate::data::radial::RadialStatus;

    fn radial_with_ref(
        elevation_number: u8,
        azimuth_number: u16,
        collection_ms: u32,
    ) -> Radial {
        let mut radial = Radial::new(
            20000,
            collection_ms,
            azimuth_number,
            azimuth_number as f32 * 0.5,
            elevation_number,
            0.5,
            RadialStatus::IntermediateRadialData,
        );
        radial.set_moment(
            Moment::Reflectivity,
            GateBlock {
                first_gate_meters: 0.0,
                gate_spacing_meters: 250.0,
                word_size_bits: 16,
                scale: 2.0,
                offset: 66.0,
                gates: vec![10, 20],
            },
        );
        radial
    }

    fn sample_file() -> RadarFile {
        let base_ms = 1_000;
        let radials = vec![
            radial_with_ref(1, 0, base_ms),
            radial_with_ref(1, 1, base_ms + 500),
            radial_with_ref(2, 0, base_ms + 1500),
        ];
        let elevation_numbers: Vec<u8> = radials.iter().map(|r| r.elevation_number()).collect();
        let scans = build_scans(&elevation_numbers);
        RadarFile::new(
            VolumeHeader::new(*b"ARCHIVE2.", *b"001", 20000, base_ms as u32, *b"KHGX"),
            None,
            radials,
            scans,
        )
    }

    #[test]
    fn get_range_out_of_range_scan_is_empty_not_an_error() {
        let file = sample_file();
        let result = file.get_range(file.scan_count() + 5, Moment::Reflectivity);
        assert_eq!(result.unwrap(), Vec::<f32>::new());
    }

    #[test]
    fn get_range_missing_moment_on_in_range_scan_is_an_error() {
        let file = sample_file();
        let err = file.get_range(0, Moment::DifferentialReflectivity).unwrap_err();
        assert!(matches!(err, Error::MomentNotPresent(ref name) if name == "ZDR"));
    }

    #[test]
    fn get_times_offsets_reconstruct_collection_ms() {
        let file = sample_file();
        let times = file.get_times(None);
        for (i, &offset) in times.time_offset.iter().enumerate() {
            let ray_index = file
                .scans
                .iter()
                .flat_map(|s| s.radial_indices().iter().copied())
                .nth(i)
                .unwrap();
            let expected_ms = file.radials[ray_index].collection_milliseconds() as i64;
            assert_eq!((offset * 1000.0).round() as i64 + times.base_ms, expected_ms);
        }
    }

    #[test]
    fn get_data_pads_missing_moment_rows_with_nan() {
        let file = sample_file();
        let data = file.get_data(Moment::Velocity, 4, None, false);
        assert_eq!(data.rows(), 3);
        assert_eq!(data.cols(), 4);
        assert!(data.data().iter().all(|v| v.is_nan()));
    }
}
