/// The result of `RadarFile::get_times`: a volume-relative base instant and, for each selected
/// ray, its offset from that base.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Times {
    /// The volume header's start instant, in milliseconds past midnight of its Modified Julian
    /// Date, combined into a single millisecond count for arithmetic against per-ray timestamps.
    pub base_ms: i64,
    /// Seconds since `base_ms`, one entry per selected ray.
    pub time_offset: Vec<f64>,
}
