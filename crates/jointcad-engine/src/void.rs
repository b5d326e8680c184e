use jointcad_ir::{Axis, Bounds3D, SplitMode};
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::ids::alloc_node_id;
use crate::subassembly::SubAssembly;

/// Split info carried by the "second" child a subdivide produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitData {
    pub axis: Axis,
    pub position: f64,
    pub percentage: f64,
}

/// A grid descriptor, preserved on the parent void across clone so the
/// dividers it implies can span the full parent extent rather than each
/// child's individual bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct GridInfo {
    pub axes: Vec<(Axis, Vec<f64>)>,
}

/// An interior rectangular region of an assembly: a leaf, subdivided into
/// sibling children, or hosting a sub-assembly. Never more than one of the
/// latter two.
#[derive(Debug, Clone)]
pub struct Void {
    pub id: String,
    pub bounds: Bounds3D,
    pub split: Option<SplitData>,
    pub grid: Option<GridInfo>,
    pub children: Vec<Void>,
    pub sub_assembly: Option<Box<SubAssembly>>,
}

impl Void {
    pub fn leaf(bounds: Bounds3D) -> Self {
        Self {
            id: alloc_node_id("void"),
            bounds,
            split: None,
            grid: None,
            children: Vec::new(),
            sub_assembly: None,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty() && self.sub_assembly.is_none()
    }

    /// Resolve `position`/`mode` to an absolute coordinate along `axis`
    /// within this void's bounds.
    fn absolute_position(&self, axis: Axis, position: f64, mode: SplitMode) -> f64 {
        let low = self.bounds.origin(axis);
        match mode {
            SplitMode::Absolute => low + position,
            SplitMode::Percentage => low + position * self.bounds.extent(axis),
        }
    }

    fn split_bounds(&self, axis: Axis, abs_position: f64, thickness: f64) -> (Bounds3D, Bounds3D) {
        let low = self.bounds.origin(axis);
        let high = low + self.bounds.extent(axis);
        let mut a = self.bounds;
        let mut b = self.bounds;
        set_axis_range(&mut a, axis, low, abs_position - thickness / 2.0);
        set_axis_range(&mut b, axis, abs_position + thickness / 2.0, high);
        (a, b)
    }

    /// Subdivide this leaf void at `(axis, position, mode)`, producing
    /// exactly two children whose bounds are separated by a `thickness`-wide
    /// divider slab.
    pub fn subdivide(&mut self, axis: Axis, position: f64, mode: SplitMode, thickness: f64) -> EngineResult<()> {
        if !self.is_leaf() {
            return Err(EngineError::InvariantViolation(
                "cannot subdivide a non-leaf void".into(),
            ));
        }
        let abs = self.absolute_position(axis, position, mode);
        let low = self.bounds.origin(axis);
        let span = self.bounds.extent(axis);
        let (bounds_a, bounds_b) = self.split_bounds(axis, abs, thickness);

        let mut child_a = Void::leaf(bounds_a);
        let mut child_b = Void::leaf(bounds_b);
        child_b.split = Some(SplitData {
            axis,
            position: abs,
            percentage: if span > 0.0 { (abs - low) / span } else { 0.0 },
        });
        child_a.split = None;

        self.children = vec![child_a, child_b];
        self.grid = None;
        Ok(())
    }

    /// Relocate the split position of a void previously subdivided by a
    /// single `subdivide` call (not a grid), recomputing both children's
    /// bounds. The new position must land strictly inside the void's legal
    /// range (leaving at least `thickness` of material on each side).
    pub fn move_divider(&mut self, new_position: f64, mode: SplitMode, thickness: f64) -> EngineResult<()> {
        if self.grid.is_some() {
            return Err(EngineError::InvariantViolation(
                "cannot move a single divider within a grid-subdivided void".into(),
            ));
        }
        let axis = match self.children.as_slice() {
            [_, second] => second
                .split
                .ok_or_else(|| EngineError::InvariantViolation("void is not subdivided".into()))?
                .axis,
            _ => {
                return Err(EngineError::InvariantViolation(
                    "void is not subdivided into exactly two children".into(),
                ))
            }
        };
        let abs = self.absolute_position(axis, new_position, mode);
        let low = self.bounds.origin(axis);
        let high = low + self.bounds.extent(axis);
        if abs - thickness / 2.0 <= low || abs + thickness / 2.0 >= high {
            return Err(EngineError::InvariantViolation(
                "divider position leaves no room for both sides".into(),
            ));
        }
        let (bounds_a, bounds_b) = self.split_bounds(axis, abs, thickness);
        let span = self.bounds.extent(axis);
        self.children[0].bounds = bounds_a;
        self.children[1].bounds = bounds_b;
        self.children[1].split = Some(SplitData {
            axis,
            position: abs,
            percentage: if span > 0.0 { (abs - low) / span } else { 0.0 },
        });
        Ok(())
    }

    /// Tile this leaf with a 1-D or 2-D grid of child voids along up to two
    /// perpendicular axes. A third axis is rejected (unassemblable).
    pub fn grid_subdivide(&mut self, specs: &[(Axis, Vec<f64>, SplitMode)], thickness: f64) -> EngineResult<()> {
        if !self.is_leaf() {
            return Err(EngineError::InvariantViolation(
                "cannot subdivide a non-leaf void".into(),
            ));
        }
        if specs.is_empty() || specs.len() > 2 {
            warn!(count = specs.len(), "grid subdivision requires 1 or 2 axes");
            return Err(EngineError::InvariantViolation(
                "grid subdivision supports only 1 or 2 perpendicular axes".into(),
            ));
        }

        let mut segments_per_axis: Vec<(Axis, Vec<(f64, f64)>)> = Vec::new();
        for (axis, positions, mode) in specs {
            let mut abs_positions: Vec<f64> = positions
                .iter()
                .map(|p| self.absolute_position(*axis, *p, *mode))
                .collect();
            abs_positions.sort_by(|a, b| a.partial_cmp(b).unwrap());
            segments_per_axis.push((*axis, axis_segments(self.bounds, *axis, &abs_positions, thickness)));
        }

        let mut children = Vec::new();
        cartesian_children(self.bounds, &segments_per_axis, 0, &mut children);
        self.children = children;
        self.grid = Some(GridInfo {
            axes: specs.iter().map(|(a, p, _)| (*a, p.clone())).collect(),
        });
        Ok(())
    }

    /// Remove subdivision, returning to a leaf. A hosted sub-assembly, if
    /// any, is untouched.
    pub fn clear_subdivision(&mut self) {
        self.children.clear();
        self.grid = None;
    }

    pub fn create_sub_assembly(&mut self, sub: SubAssembly) -> EngineResult<()> {
        if !self.children.is_empty() {
            return Err(EngineError::InvariantViolation(
                "cannot host a sub-assembly in a subdivided void".into(),
            ));
        }
        self.sub_assembly = Some(Box::new(sub));
        Ok(())
    }

    pub fn remove_sub_assembly(&mut self) {
        self.sub_assembly = None;
    }

    pub fn find(&self, id: &str) -> Option<&Void> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut Void> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }
}

fn set_axis_range(bounds: &mut Bounds3D, axis: Axis, low: f64, high: f64) {
    let extent = (high - low).max(0.0);
    match axis {
        Axis::X => {
            bounds.x = low;
            bounds.w = extent;
        }
        Axis::Y => {
            bounds.y = low;
            bounds.h = extent;
        }
        Axis::Z => {
            bounds.z = low;
            bounds.d = extent;
        }
    }
}

fn axis_segments(bounds: Bounds3D, axis: Axis, cuts: &[f64], thickness: f64) -> Vec<(f64, f64)> {
    let low = bounds.origin(axis);
    let high = low + bounds.extent(axis);
    let mut edges = vec![low];
    edges.extend(cuts.iter().copied());
    edges.push(high);

    let mut segments = Vec::new();
    for w in edges.windows(2) {
        let (mut a, mut b) = (w[0], w[1]);
        if a != low {
            a += thickness / 2.0;
        }
        if b != high {
            b -= thickness / 2.0;
        }
        segments.push((a, b.max(a)));
    }
    segments
}

fn cartesian_children(
    base: Bounds3D,
    segments_per_axis: &[(Axis, Vec<(f64, f64)>)],
    index: usize,
    out: &mut Vec<Void>,
) {
    if index == segments_per_axis.len() {
        out.push(Void::leaf(base));
        return;
    }
    let (axis, segments) = &segments_per_axis[index];
    for (a, b) in segments {
        let mut bounds = base;
        set_axis_range(&mut bounds, *axis, *a, *b);
        cartesian_children(bounds, segments_per_axis, index + 1, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube() -> Void {
        Void::leaf(Bounds3D::new(0.0, 0.0, 0.0, 100.0, 60.0, 100.0))
    }

    #[test]
    fn subdivide_then_clear_restores_leaf_bounds() {
        let mut v = cube();
        let original = v.bounds;
        v.subdivide(Axis::X, 50.0, SplitMode::Absolute, 3.0).unwrap();
        assert_eq!(v.children.len(), 2);
        v.clear_subdivision();
        assert!(v.is_leaf());
        assert_eq!(v.bounds, original);
    }

    #[test]
    fn subdivide_children_sum_to_parent_minus_thickness() {
        let mut v = cube();
        v.subdivide(Axis::X, 50.0, SplitMode::Absolute, 3.0).unwrap();
        let a = &v.children[0];
        let b = &v.children[1];
        let gap = b.bounds.x - (a.bounds.x + a.bounds.w);
        assert!((gap - 3.0).abs() < 1e-9);
    }

    #[test]
    fn subdivide_rejects_non_leaf() {
        let mut v = cube();
        v.subdivide(Axis::X, 50.0, SplitMode::Absolute, 3.0).unwrap();
        let err = v.subdivide(Axis::Y, 30.0, SplitMode::Absolute, 3.0).unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn grid_subdivide_two_axes_yields_four_children() {
        let mut v = cube();
        v.grid_subdivide(
            &[
                (Axis::X, vec![50.0], SplitMode::Absolute),
                (Axis::Z, vec![50.0], SplitMode::Absolute),
            ],
            3.0,
        )
        .unwrap();
        assert_eq!(v.children.len(), 4);
    }

    #[test]
    fn grid_subdivide_rejects_three_axes() {
        let mut v = cube();
        let err = v
            .grid_subdivide(
                &[
                    (Axis::X, vec![50.0], SplitMode::Absolute),
                    (Axis::Y, vec![30.0], SplitMode::Absolute),
                    (Axis::Z, vec![50.0], SplitMode::Absolute),
                ],
                3.0,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::InvariantViolation(_)));
    }

    #[test]
    fn move_divider_updates_children() {
        let mut v = cube();
        v.subdivide(Axis::X, 50.0, SplitMode::Absolute, 3.0).unwrap();
        v.move_divider(60.0, SplitMode::Absolute, 3.0).unwrap();
        assert!((v.children[1].bounds.x - 61.5).abs() < 1e-9);
    }
}
