//!
//! This module contains models representing decoded NEXRAD weather radar data. These models and
//! their APIs are intended to be ergonomic and understandable; they do not exactly match the
//! encoded on-disk structure from the archive formats that produce them.
//!

mod volume_header;
pub use volume_header::*;

mod location;
pub use location::*;

mod moment;
pub use moment::*;

mod radial;
pub use radial::*;

mod scan;
pub use scan::*;

mod coverage_pattern;
pub use coverage_pattern::*;

mod times;
pub use times::*;

mod gate_array;
pub use gate_array::*;

mod radar_file;
pub use radar_file::*;
