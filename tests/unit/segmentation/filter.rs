//! Tests for small-grain removal

#[cfg(test)]
mod tests {
    use crate::row_mask;
    use grainseg::map::Label;
    use grainseg::{CrystalSymmetry, OrientationMap, Quat, Segmentation, filter_small_grains, segment_grains};

    fn segment_row(cols: usize, flagged: &[usize]) -> Segmentation {
        let orientations = OrientationMap::uniform(1, cols, Quat::IDENTITY).unwrap();
        segment_grains(&row_mask(cols, flagged), &orientations, CrystalSymmetry::Cubic).unwrap()
    }

    // Small grains are dropped and survivors renumbered from 1
    // Verified by keeping the original IDs
    #[test]
    fn test_small_grain_dropped_and_renumbered() {
        let segmentation = segment_row(23, &[2]);
        let sizes: Vec<usize> = segmentation.grains().iter().map(|grain| grain.len()).collect();
        assert_eq!(sizes, vec![3, 20]);

        let filtered = filter_small_grains(segmentation, 5).unwrap();
        assert_eq!(filtered.len(), 1);
        let survivor = filtered.grain(1).unwrap();
        assert_eq!(survivor.id(), 1);
        assert_eq!(survivor.len(), 20);
        assert_eq!(filtered.labels().grain_id(0, 10), Some(1));
        for col in 0..3 {
            assert_eq!(filtered.labels().get(0, col), Some(Label::Ignored));
        }
    }

    // Survivors keep discovery order around a dropped grain
    // Verified by sorting survivors by size
    #[test]
    fn test_middle_grain_dropped() {
        let segmentation = segment_row(32, &[11, 14]);
        let sizes: Vec<usize> = segmentation.grains().iter().map(|grain| grain.len()).collect();
        assert_eq!(sizes, vec![12, 3, 17]);

        let filtered = filter_small_grains(segmentation, 5).unwrap();
        let sizes: Vec<usize> = filtered.grains().iter().map(|grain| grain.len()).collect();
        assert_eq!(sizes, vec![12, 17]);
        assert_eq!(filtered.labels().grain_id(0, 20), Some(2));
        assert_eq!(filtered.labels().count(Label::Ignored), 3);
        assert_eq!(filtered.labels().max_grain_id(), 2);
        assert_eq!(filtered.grain_at(0, 31).map(|grain| grain.id()), Some(2));
    }

    // A threshold of one keeps everything
    // Verified by using <= for the size comparison
    #[test]
    fn test_min_size_one_keeps_all() {
        let segmentation = segment_row(32, &[11, 14]);
        let before = segmentation.labels().clone();
        let filtered = filter_small_grains(segmentation, 1).unwrap();
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered.labels(), &before);
    }

    // Dropping every grain leaves an empty segmentation
    // Verified by always keeping the largest grain
    #[test]
    fn test_all_grains_dropped() {
        let filtered = filter_small_grains(segment_row(6, &[]), 10).unwrap();
        assert!(filtered.is_empty());
        assert_eq!(filtered.labels().count(Label::Ignored), 6);
    }
}
