//! Phase window selection
//!
//! Classifies folded samples into in-transit, out-of-transit, ingress and egress
//! sets around phase zero. Masks are index-aligned with the phase array.

/// Out-of-transit samples lie at least this many window widths from mid-transit
pub const OOT_WIDTH_MULTIPLIER: f64 = 3.0;

/// Boolean masks over a phase array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowMasks {
    /// `|phase| <= width`
    pub in_transit: Vec<bool>,
    /// `|phase| >= 3 * width`
    pub out_of_transit: Vec<bool>,
}

/// Boolean masks for the two halves of the transit window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeMasks {
    /// `-width <= phase < 0`
    pub ingress: Vec<bool>,
    /// `0 < phase <= width`
    pub egress: Vec<bool>,
}

/// Window selector for partitioning folded samples
pub struct WindowSelector;

impl WindowSelector {
    /// In-transit and out-of-transit masks for a half-width `width`
    pub fn select(phase: &[f64], width: f64) -> WindowMasks {
        let oot_limit = OOT_WIDTH_MULTIPLIER * width;
        WindowMasks {
            in_transit: phase.iter().map(|p| p.abs() <= width).collect(),
            out_of_transit: phase.iter().map(|p| p.abs() >= oot_limit).collect(),
        }
    }

    /// Ingress and egress masks for a half-width `width`.
    ///
    /// A sample exactly at phase zero belongs to neither side.
    pub fn edges(phase: &[f64], width: f64) -> EdgeMasks {
        EdgeMasks {
            ingress: phase.iter().map(|&p| p >= -width && p < 0.0).collect(),
            egress: phase.iter().map(|&p| p > 0.0 && p <= width).collect(),
        }
    }
}

/// Number of set entries in a mask
pub fn count(mask: &[bool]) -> usize {
    mask.iter().filter(|&&m| m).count()
}

/// Values whose mask entry is set
pub fn masked(values: &[f64], mask: &[bool]) -> Vec<f64> {
    values
        .iter()
        .zip(mask)
        .filter_map(|(&v, &keep)| keep.then_some(v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_boundaries_inclusive() {
        let phase = [-0.3, -0.1, -0.05, 0.0, 0.1, 0.2, 0.3, 0.45];
        let masks = WindowSelector::select(&phase, 0.1);

        assert_eq!(
            masks.in_transit,
            vec![false, true, true, true, true, false, false, false]
        );
        // 3 * 0.1 in floating point is slightly above 0.3
        assert_eq!(count(&masks.out_of_transit), 1);
        assert!(masks.out_of_transit[7]);
    }

    #[test]
    fn test_edges_exclude_zero() {
        let phase = [-0.06, -0.05, -0.01, 0.0, 0.01, 0.05, 0.06];
        let edges = WindowSelector::edges(&phase, 0.05);

        assert_eq!(
            edges.ingress,
            vec![false, true, true, false, false, false, false]
        );
        assert_eq!(
            edges.egress,
            vec![false, false, false, false, true, true, false]
        );
    }

    #[test]
    fn test_empty_phase_gives_empty_masks() {
        let masks = WindowSelector::select(&[], 0.1);
        assert!(masks.in_transit.is_empty());
        assert!(masks.out_of_transit.is_empty());
    }

    #[test]
    fn test_masked_values() {
        let values = [1.0, 2.0, 3.0];
        assert_eq!(masked(&values, &[true, false, true]), vec![1.0, 3.0]);
        assert_eq!(count(&[true, false, true]), 2);
    }
}
