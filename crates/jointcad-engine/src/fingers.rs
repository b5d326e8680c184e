/// The alternating tab/gap transition sequence for one axis of joint,
/// shared by every panel with an edge on that axis. `points[2k..2k+2]` is a
/// tab (material present) region; `points[2k+1..2k+3]` is a gap region.
/// Computed once per assembly and memoised — the shared reference is what
/// guarantees mating panels interlock exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct FingerData {
    pub points: Vec<f64>,
    pub inner_offset: f64,
    pub max_joint_length: f64,
    pub finger_width: f64,
}

impl FingerData {
    /// Number of alternating regions (always odd, so the sequence starts and
    /// ends on a tab region and corners stay solid).
    pub fn region_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Tab (material-present) regions as `(start, end)` pairs.
    pub fn tab_regions(&self) -> Vec<(f64, f64)> {
        (0..self.region_count())
            .step_by(2)
            .map(|i| (self.points[i], self.points[i + 1]))
            .collect()
    }

    /// Gap (material-absent) regions as `(start, end)` pairs.
    pub fn gap_regions(&self) -> Vec<(f64, f64)> {
        (1..self.region_count())
            .step_by(2)
            .map(|i| (self.points[i], self.points[i + 1]))
            .collect()
    }
}

/// Derive the finger transition sequence for one axis of joint length
/// `dim_axis`, given the assembly's material parameters.
///
/// `inner_offset = thickness + finger_gap * finger_width` (the stated lower
/// bound, taken as equality). The usable span is divided into the
/// nearest odd number of equal-width regions so the pattern both starts and
/// ends on a tab, matching every mating panel's corners.
pub fn compute_finger_data(dim_axis: f64, thickness: f64, finger_width: f64, finger_gap: f64) -> FingerData {
    let inner_offset = thickness + finger_gap * finger_width;
    let max_joint_length = (dim_axis - 2.0 * thickness).max(0.0);
    let usable_span = (dim_axis - 2.0 * inner_offset).max(0.0);

    if usable_span <= 0.0 || finger_width <= 0.0 {
        return FingerData {
            points: vec![inner_offset, dim_axis - inner_offset],
            inner_offset,
            max_joint_length,
            finger_width,
        };
    }

    let raw_n = (usable_span / finger_width).round().max(1.0) as i64;
    let n = if raw_n % 2 == 0 { raw_n + 1 } else { raw_n };
    let actual_width = usable_span / n as f64;

    let points = (0..=n)
        .map(|i| inner_offset + i as f64 * actual_width)
        .collect();

    FingerData {
        points,
        inner_offset,
        max_joint_length,
        finger_width: actual_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_count_is_odd() {
        let fd = compute_finger_data(100.0, 3.0, 10.0, 1.5);
        assert_eq!(fd.region_count() % 2, 1);
    }

    #[test]
    fn points_span_the_full_dimension_symmetrically() {
        let fd = compute_finger_data(100.0, 3.0, 10.0, 1.5);
        assert!((fd.points[0] - fd.inner_offset).abs() < 1e-9);
        let last = *fd.points.last().unwrap();
        assert!((last - (100.0 - fd.inner_offset)).abs() < 1e-9);
    }

    #[test]
    fn same_inputs_produce_byte_identical_sequence() {
        let a = compute_finger_data(100.0, 3.0, 10.0, 1.5);
        let b = compute_finger_data(100.0, 3.0, 10.0, 1.5);
        assert_eq!(a, b);
    }

    #[test]
    fn tab_and_gap_regions_partition_points() {
        let fd = compute_finger_data(100.0, 3.0, 10.0, 1.5);
        assert_eq!(fd.tab_regions().len(), fd.gap_regions().len() + 1);
    }
}
