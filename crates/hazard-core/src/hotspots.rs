//! Hotspot selector: the k highest-risk cells, highest first.
//!
//! Ordering is total: risk descending, then cell index ascending, with NaN
//! ranked below every number. Partial selection and a full sort therefore
//! produce identical output.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Number of hotspots reported when the caller does not ask for a count.
pub const DEFAULT_TOP_K: usize = 10;

/// One ranked cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    pub cell_id: usize,
    pub risk: f32,
}

/// Ranking order between cells `a` and `b`; `Less` means `a` ranks higher.
#[inline]
fn rank_order(risk: &[f32], a: usize, b: usize) -> Ordering {
    let (ra, rb) = (risk[a], risk[b]);
    match (ra.is_nan(), rb.is_nan()) {
        (true, true) => a.cmp(&b),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => rb
            .partial_cmp(&ra)
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b)),
    }
}

fn to_hotspots(risk: &[f32], order: &[usize]) -> Vec<Hotspot> {
    order.iter().map(|&i| Hotspot { cell_id: i, risk: risk[i] }).collect()
}

/// Top `k` cells by risk. Returns all cells when `k` exceeds the grid and an
/// empty list when `k == 0`.
///
/// Selects the top `k` with `select_nth_unstable_by`, then sorts only that
/// prefix: O(N + k log k).
pub fn top_hotspots(risk: &[f32], k: usize) -> Vec<Hotspot> {
    let n = risk.len();
    let k = k.min(n);
    if k == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..n).collect();
    if k < n {
        order.select_nth_unstable_by(k - 1, |&a, &b| rank_order(risk, a, b));
        order.truncate(k);
    }
    order.sort_unstable_by(|&a, &b| rank_order(risk, a, b));
    to_hotspots(risk, &order)
}

/// Reference implementation: sort every cell, keep the first `k`.
pub fn top_hotspots_sorted(risk: &[f32], k: usize) -> Vec<Hotspot> {
    let mut order: Vec<usize> = (0..risk.len()).collect();
    order.sort_by(|&a, &b| rank_order(risk, a, b));
    order.truncate(k);
    to_hotspots(risk, &order)
}

/// Highest-risk cell, with the same tie-break as [`top_hotspots`].
pub fn max_risk(risk: &[f32]) -> Option<Hotspot> {
    (0..risk.len())
        .min_by(|&a, &b| rank_order(risk, a, b))
        .map(|i| Hotspot { cell_id: i, risk: risk[i] })
}

/// Split hotspots into parallel index and value arrays.
pub fn unzip_hotspots(hotspots: &[Hotspot]) -> (Vec<usize>, Vec<f32>) {
    hotspots.iter().map(|h| (h.cell_id, h.risk)).unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn picks_top_two_in_descending_order() {
        let (idx, vals) = unzip_hotspots(&top_hotspots(&[0.2, 0.9, 0.5], 2));
        assert_eq!(idx, vec![1, 2]);
        assert_eq!(vals, vec![0.9, 0.5]);
    }

    #[test]
    fn k_larger_than_grid_returns_everything() {
        let (idx, vals) = unzip_hotspots(&top_hotspots(&[0.5], 10));
        assert_eq!(idx, vec![0]);
        assert_eq!(vals, vec![0.5]);
    }

    #[test]
    fn k_zero_and_empty_input_give_nothing() {
        assert!(top_hotspots(&[0.3, 0.4], 0).is_empty());
        assert!(top_hotspots(&[], 5).is_empty());
        assert!(max_risk(&[]).is_none());
    }

    #[test]
    fn ties_go_to_the_lower_index() {
        let idx: Vec<usize> = top_hotspots(&[0.5, 0.7, 0.5, 0.7], 3)
            .iter()
            .map(|h| h.cell_id)
            .collect();
        assert_eq!(idx, vec![1, 3, 0]);
    }

    #[test]
    fn nan_ranks_last() {
        let hs = top_hotspots(&[f32::NAN, 0.1, 0.3], 3);
        assert_eq!(hs[0].cell_id, 2);
        assert_eq!(hs[1].cell_id, 1);
        assert_eq!(hs[2].cell_id, 0);
        assert_eq!(max_risk(&[f32::NAN, 0.1]).unwrap().cell_id, 1);
    }

    #[test]
    fn max_risk_matches_first_hotspot() {
        let risk = [0.4, 0.8, 0.8, 0.1];
        assert_eq!(max_risk(&risk), top_hotspots(&risk, 1).first().copied());
        assert_eq!(max_risk(&risk).unwrap().cell_id, 1);
    }

    /// Every returned value dominates every value left out, and the partial
    /// selection agrees with the full sort (including on heavy ties).
    #[test]
    fn selection_matches_full_sort_on_random_input() {
        let mut rng = StdRng::seed_from_u64(7);
        for &n in &[1usize, 2, 17, 500, 5_000] {
            // Quantise so ties are common.
            let risk: Vec<f32> = (0..n).map(|_| (rng.gen::<f32>() * 20.0).floor() / 20.0).collect();
            for &k in &[1usize, 3, 10, n / 2, n, n + 5] {
                let fast = top_hotspots(&risk, k);
                assert_eq!(fast, top_hotspots_sorted(&risk, k), "n={n} k={k}");
                assert_eq!(fast.len(), k.min(n));

                for w in fast.windows(2) {
                    assert!(w[0].risk >= w[1].risk);
                }
                if let Some(lowest) = fast.last() {
                    let chosen: std::collections::HashSet<usize> =
                        fast.iter().map(|h| h.cell_id).collect();
                    for (i, &r) in risk.iter().enumerate() {
                        if !chosen.contains(&i) {
                            assert!(lowest.risk >= r);
                        }
                    }
                }
            }
        }
    }
}
