/// One elevation scan (sweep): the ordered indices, into the flat radial sequence, of every
/// radial sharing an `elevation_number`. Constructed once by the scan indexer; never mutated
/// afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScanIndex {
    elevation_number: u8,
    radial_indices: Vec<usize>,
}

impl ScanIndex {
    pub fn new(elevation_number: u8, radial_indices: Vec<usize>) -> Self {
        Self {
            elevation_number,
            radial_indices,
        }
    }

    pub fn elevation_number(&self) -> u8 {
        self.elevation_number
    }

    pub fn radial_indices(&self) -> &[usize] {
        &self.radial_indices
    }

    pub fn len(&self) -> usize {
        self.radial_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radial_indices.is_empty()
    }
}

/// Partitions an ordered radial sequence into scans by `elevation_number`, preserving the
/// first-seen order of radials within each scan, then sorts the resulting scans ascending by
/// elevation number.
pub fn build_scans(elevation_numbers: &[u8]) -> Vec<ScanIndex> {
    let mut order: Vec<u8> = Vec::new();
    let mut buckets: std::collections::HashMap<u8, Vec<usize>> = std::collections::HashMap::new();

    for (index, &elevation_number) in elevation_numbers.iter().enumerate() {
        if !buckets.contains_key(&elevation_number) {
            order.push(elevation_number);
        }
        buckets.entry(elevation_number).or_default().push(index);
    }

    let mut scans: Vec<ScanIndex> = order
        .into_iter()
        .map(|elevation_number| {
            let indices = buckets.remove(&elevation_number).unwrap_or_default();
            ScanIndex::new(elevation_number, indices)
        })
        .collect();

    scans.sort_by_key(|scan| scan.elevation_number());
    scans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partitions_preserve_order_and_are_disjoint() {
        let elevations = [2, 2, 1, 1, 3, 2];
        let scans = build_scans(&elevations);

        assert_eq!(scans.len(), 3);
        assert_eq!(scans[0].elevation_number(), 1);
        assert_eq!(scans[0].radial_indices(), &[2, 3]);
        assert_eq!(scans[1].elevation_number(), 2);
        assert_eq!(scans[1].radial_indices(), &[0, 1, 5]);
        assert_eq!(scans[2].elevation_number(), 3);
        assert_eq!(scans[2].radial_indices(), &[4]);

        let mut all_indices: Vec<usize> = scans.iter().flat_map(|s| s.radial_indices().to_vec()).collect();
        all_indices.sort_unstable();
        assert_eq!(all_indices, vec![0, 1, 2, 3, 4, 5]);
    }
}
