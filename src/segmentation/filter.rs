//! Small-grain removal
//!
//! Grains below a size threshold are dropped and their cells marked ignored.
//! Survivors keep their discovery order and are renumbered from 1. Discarded
//! cells are not merged into neighbouring grains.

use log::debug;

use crate::io::error::{GrainError, Result};
use crate::map::labels::Label;
use crate::segmentation::flood_fill::Segmentation;

/// Discard grains with fewer than `min_size` points
///
/// # Errors
///
/// Returns `InvalidInput` if the surviving grain count does not fit a `u32` ID
pub fn filter_small_grains(segmentation: Segmentation, min_size: usize) -> Result<Segmentation> {
    let symmetry = segmentation.symmetry();
    let (mut labels, grains) = segmentation.into_parts();
    let total = grains.len();
    let mut kept = Vec::with_capacity(total);

    for mut grain in grains {
        if grain.len() < min_size {
            for &[row, col] in grain.coords() {
                labels.set(row, col, Label::Ignored);
            }
            continue;
        }

        let id = u32::try_from(kept.len() + 1).map_err(|_overflow| GrainError::InvalidInput {
            reason: "grain count exceeds u32 range".to_string(),
        })?;
        if grain.id() != id {
            for &[row, col] in grain.coords() {
                labels.set(row, col, Label::Grain(id));
            }
            grain.set_id(id);
        }
        kept.push(grain);
    }

    debug!(
        "small-grain filter (min {min_size} points) kept {} of {total} grains",
        kept.len()
    );

    Ok(Segmentation::from_parts(labels, kept, symmetry))
}
