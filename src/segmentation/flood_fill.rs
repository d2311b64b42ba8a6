//! Breadth-first flood fill over the boundary-marked grid
//!
//! Seeds are taken in row-major order from the first unassigned cell. Each
//! fill grows through unassigned 4-connected neighbours; boundary cells are
//! claimed without propagating, and only when they lie right of or below the
//! cell that reaches them, so every boundary cell goes to exactly one grain.

use log::{debug, warn};

use crate::crystal::CrystalSymmetry;
use crate::io::error::{GrainError, Result, invariant_violation};
use crate::map::boundary::{BoundaryMap, ensure_same_shape};
use crate::map::labels::{Label, LabelMap};
use crate::map::orientation::OrientationMap;
use crate::segmentation::grain::Grain;

/// Snapshot reported after each grain is finalized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentationProgress {
    /// Grains finalized so far
    pub grains_found: usize,
    /// Cells claimed by those grains
    pub cells_assigned: usize,
    /// Cells in the grid
    pub cells_total: usize,
}

/// Label grid plus grains in discovery order
///
/// Grain `i` in the list carries ID `i + 1`.
#[derive(Debug, Clone)]
pub struct Segmentation {
    labels: LabelMap,
    grains: Vec<Grain>,
    symmetry: CrystalSymmetry,
}

impl Segmentation {
    pub(crate) const fn from_parts(
        labels: LabelMap,
        grains: Vec<Grain>,
        symmetry: CrystalSymmetry,
    ) -> Self {
        Self {
            labels,
            grains,
            symmetry,
        }
    }

    /// Per-cell labels
    pub const fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Grains ordered by ID
    pub fn grains(&self) -> &[Grain] {
        &self.grains
    }

    /// Symmetry family the grains were built with
    pub const fn symmetry(&self) -> CrystalSymmetry {
        self.symmetry
    }

    /// Number of grains
    pub fn len(&self) -> usize {
        self.grains.len()
    }

    /// Whether no grain was found
    pub fn is_empty(&self) -> bool {
        self.grains.is_empty()
    }

    /// Grain with the given 1-based ID
    pub fn grain(&self, id: u32) -> Option<&Grain> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.grains.get(index)
    }

    /// Grain covering `[row, col]`
    pub fn grain_at(&self, row: usize, col: usize) -> Option<&Grain> {
        self.labels
            .grain_id(row, col)
            .and_then(|id| self.grain(id))
    }

    /// Boundary cells that no fill reached
    pub fn unclaimed_boundary_count(&self) -> usize {
        self.labels.count(Label::Boundary)
    }

    /// Split into labels and grains
    pub fn into_parts(self) -> (LabelMap, Vec<Grain>) {
        (self.labels, self.grains)
    }
}

/// Partition the grid into grains separated by boundary cells
///
/// # Errors
///
/// Returns an error if:
/// - The boundary map and orientation grid differ in shape
/// - The finished label grid fails its post-condition checks
pub fn segment_grains(
    boundaries: &BoundaryMap,
    orientations: &OrientationMap,
    symmetry: CrystalSymmetry,
) -> Result<Segmentation> {
    segment_grains_with_progress(boundaries, orientations, symmetry, |_| {})
}

/// [`segment_grains`] reporting progress after each finalized grain
///
/// # Errors
///
/// Returns an error if:
/// - The boundary map and orientation grid differ in shape
/// - The finished label grid fails its post-condition checks
pub fn segment_grains_with_progress<F>(
    boundaries: &BoundaryMap,
    orientations: &OrientationMap,
    symmetry: CrystalSymmetry,
    mut observer: F,
) -> Result<Segmentation>
where
    F: FnMut(SegmentationProgress),
{
    ensure_same_shape(boundaries, orientations)?;

    let (rows, cols) = orientations.dim();
    let cells_total = rows * cols;
    let mut labels = LabelMap::new(boundaries.to_label_array());
    let mut grains: Vec<Grain> = Vec::new();
    let mut cells_assigned = 0;
    let mut cursor = 0;

    while let Some(seed) = next_unassigned(&labels, &mut cursor) {
        let id = u32::try_from(grains.len() + 1).map_err(|_overflow| GrainError::InvalidInput {
            reason: "grain count exceeds u32 range".to_string(),
        })?;

        let grain = flood_fill(&mut labels, orientations, seed, id, symmetry)?;
        cells_assigned += grain.len();
        grains.push(grain);

        observer(SegmentationProgress {
            grains_found: grains.len(),
            cells_assigned,
            cells_total,
        });
    }

    check_postconditions(&labels, &grains)?;

    let unclaimed = labels.count(Label::Boundary);
    if unclaimed > 0 {
        warn!("{unclaimed} boundary cells were not reachable by any grain");
    }
    debug!(
        "segmented {rows}x{cols} grid into {} grains ({cells_assigned} cells claimed)",
        grains.len()
    );

    Ok(Segmentation::from_parts(labels, grains, symmetry))
}

// Cells only ever leave the unassigned state, so the scan never moves backwards
fn next_unassigned(labels: &LabelMap, cursor: &mut usize) -> Option<[usize; 2]> {
    let cols = labels.dim().1;
    let offset = labels
        .as_array()
        .iter()
        .skip(*cursor)
        .position(|&raw| Label::from_raw(raw) == Label::Unassigned)?;
    *cursor += offset;
    Some([*cursor / cols, *cursor % cols])
}

fn flood_fill(
    labels: &mut LabelMap,
    orientations: &OrientationMap,
    seed: [usize; 2],
    id: u32,
    symmetry: CrystalSymmetry,
) -> Result<Grain> {
    let dim = orientations.dim();
    let orientation_at =
        |[row, col]: [usize; 2]| orientations.get(row, col).copied().unwrap_or_default();

    let mut grain = Grain::new(id, symmetry, seed, orientation_at(seed))?;
    labels.set(seed[0], seed[1], Label::Grain(id));

    let mut frontier = vec![seed];
    while !frontier.is_empty() {
        let mut next_frontier = Vec::new();

        for &current in &frontier {
            for neighbour in neighbours(current, dim) {
                match labels.get(neighbour[0], neighbour[1]) {
                    Some(Label::Unassigned) => {
                        grain.add_point(neighbour, orientation_at(neighbour))?;
                        labels.set(neighbour[0], neighbour[1], Label::Grain(id));
                        next_frontier.push(neighbour);
                    }
                    Some(Label::Boundary)
                        if neighbour[0] > current[0] || neighbour[1] > current[1] =>
                    {
                        grain.add_point(neighbour, orientation_at(neighbour))?;
                        labels.set(neighbour[0], neighbour[1], Label::Grain(id));
                    }
                    _ => {}
                }
            }
        }

        frontier = next_frontier;
    }

    Ok(grain)
}

// Right, left, down, up; no wraparound, no diagonals
fn neighbours([row, col]: [usize; 2], (rows, cols): (usize, usize)) -> impl Iterator<Item = [usize; 2]> {
    [
        (col + 1 < cols).then_some([row, col + 1]),
        col.checked_sub(1).map(|left| [row, left]),
        (row + 1 < rows).then_some([row + 1, col]),
        row.checked_sub(1).map(|up| [up, col]),
    ]
    .into_iter()
    .flatten()
}

fn check_postconditions(labels: &LabelMap, grains: &[Grain]) -> Result<()> {
    let unassigned = labels.count(Label::Unassigned);
    if unassigned > 0 {
        return Err(invariant_violation(
            "labels_assigned",
            &format!("{unassigned} cells left unassigned after flood fill"),
        ));
    }

    let (rows, cols) = labels.dim();
    let claimed: usize = grains.iter().map(Grain::len).sum();
    let unclaimed = labels.count(Label::Boundary);
    if claimed + unclaimed != rows * cols {
        return Err(invariant_violation(
            "grain_partition",
            &format!(
                "{claimed} claimed + {unclaimed} unclaimed cells != {} grid cells",
                rows * cols
            ),
        ));
    }

    for (index, grain) in grains.iter().enumerate() {
        if usize::try_from(grain.id()).ok() != Some(index + 1) {
            return Err(invariant_violation(
                "contiguous_ids",
                &format!("grain at position {index} has ID {}", grain.id()),
            ));
        }
        if let Some(&[row, col]) = grain
            .coords()
            .iter()
            .find(|&&[row, col]| labels.grain_id(row, col) != Some(grain.id()))
        {
            return Err(invariant_violation(
                "grain_partition",
                &format!("cell [{row}, {col}] of grain {} is labelled differently", grain.id()),
            ));
        }
    }

    Ok(())
}
