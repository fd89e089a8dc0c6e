//! Snapshot test for the scan/moment summary derived from a small synthetic set of radials.

use insta::assert_debug_snapshot;
use nexrad_model::data::{build_scans, GateBlock, Moment, Radial, RadialStatus, RadarFile, VolumeHeader};

fn radial_with_ref(elevation_number: u8, azimuth_number: u16, collection_ms: u32) -> Radial {
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
fn scan_info_summarizes_geometry_and_moments_present() {
    let file = sample_file();
    let info = file.scan_info(None);

    assert_eq!(info.len(), 2);
    assert_debug_snapshot!(info, @r#"
    [
        ScanInfo {
            elevation_number: 1,
            ray_count: 2,
            moments_present: [
                Reflectivity,
            ],
        },
        ScanInfo {
            elevation_number: 2,
            ray_count: 1,
            moments_present: [
                Reflectivity,
            ],
        },
    ]
    "#);
}
