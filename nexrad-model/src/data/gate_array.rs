/// A dense, row-major `[rows x cols]` buffer of decoded moment values, as produced by
/// `RadarFile::get_data`. Missing gates (whether from a reserved raw code or from the moment
/// being entirely absent on a ray) are always `f32::NAN`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateArray {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl GateArray {
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// The full flat row-major buffer.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// The gate values for ray `row`.
    pub fn row(&self, row: usize) -> &[f32] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }
}
