//! Grain label grid
//!
//! Raw `i32` cells: 0 unassigned, -1 boundary, -2 ignored, positive values
//! are 1-based grain IDs.

use ndarray::Array2;

use crate::io::configuration::{BOUNDARY_LABEL, IGNORED_LABEL, UNASSIGNED_LABEL};

/// Decoded label cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    /// Not yet claimed
    Unassigned,
    /// Boundary cell no grain claimed
    Boundary,
    /// Member of a discarded small grain
    Ignored,
    /// Member of the grain with this ID
    Grain(u32),
}

impl Label {
    /// Decode a raw cell value; negative values other than the sentinels read as ignored
    pub const fn from_raw(raw: i32) -> Self {
        match raw {
            UNASSIGNED_LABEL => Self::Unassigned,
            BOUNDARY_LABEL => Self::Boundary,
            id if id > 0 => Self::Grain(id.unsigned_abs()),
            _ => Self::Ignored,
        }
    }

    /// Encode as a raw cell value
    pub const fn to_raw(self) -> i32 {
        match self {
            Self::Unassigned => UNASSIGNED_LABEL,
            Self::Boundary => BOUNDARY_LABEL,
            Self::Ignored => IGNORED_LABEL,
            Self::Grain(id) => id as i32,
        }
    }
}

/// Per-cell grain labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Array2<i32>,
}

impl LabelMap {
    /// Wrap a raw label array
    pub const fn new(labels: Array2<i32>) -> Self {
        Self { labels }
    }

    /// Grid dimensions (rows, cols)
    pub fn dim(&self) -> (usize, usize) {
        self.labels.dim()
    }

    /// Raw value at `[row, col]`
    pub fn raw(&self, row: usize, col: usize) -> Option<i32> {
        self.labels.get([row, col]).copied()
    }

    /// Decoded label at `[row, col]`
    pub fn get(&self, row: usize, col: usize) -> Option<Label> {
        self.raw(row, col).map(Label::from_raw)
    }

    /// Grain ID at `[row, col]`, if the cell belongs to a grain
    pub fn grain_id(&self, row: usize, col: usize) -> Option<u32> {
        match self.get(row, col) {
            Some(Label::Grain(id)) => Some(id),
            _ => None,
        }
    }

    /// Number of cells with the given label
    pub fn count(&self, label: Label) -> usize {
        let raw = label.to_raw();
        self.labels.iter().filter(|&&value| value == raw).count()
    }

    /// Largest grain ID present (0 when there are no grains)
    pub fn max_grain_id(&self) -> u32 {
        self.labels
            .iter()
            .filter_map(|&value| match Label::from_raw(value) {
                Label::Grain(id) => Some(id),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }

    /// Underlying array
    pub const fn as_array(&self) -> &Array2<i32> {
        &self.labels
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, label: Label) {
        if let Some(cell) = self.labels.get_mut([row, col]) {
            *cell = label.to_raw();
        }
    }
}
