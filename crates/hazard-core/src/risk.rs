//! Risk combiner: per-cell logistic model over susceptibility and trigger.
//!
//! risk = logistic(a · susceptibility + b · trigger − c)
//!
//! Every cell is scored independently. Inputs are not range-checked; values
//! outside [0, 1] go through the same formula.

use serde::{Deserialize, Serialize};

use crate::error::{ensure_len, Result};

/// Numerically stable `1 / (1 + e^(−x))`.
#[inline]
pub fn logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Coefficients of the logistic risk model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskModel {
    /// Susceptibility weight.
    pub a: f64,
    /// Trigger weight.
    pub b: f64,
    /// Offset subtracted before the logistic.
    pub c: f64,
}

impl Default for RiskModel {
    fn default() -> Self {
        Self { a: 2.0, b: 3.5, c: 2.5 }
    }
}

impl RiskModel {
    /// Risk for a single cell.
    #[inline]
    pub fn score(&self, susceptibility: f32, trigger: f32) -> f32 {
        logistic(self.a * susceptibility as f64 + self.b * trigger as f64 - self.c) as f32
    }
}

/// Score every cell with the default model.
pub fn compute_risk(susceptibility: &[f32], trigger: &[f32]) -> Result<Vec<f32>> {
    compute_risk_with_model(&RiskModel::default(), susceptibility, trigger)
}

pub fn compute_risk_with_model(
    model: &RiskModel,
    susceptibility: &[f32],
    trigger: &[f32],
) -> Result<Vec<f32>> {
    let mut out = vec![0.0f32; susceptibility.len()];
    compute_risk_into(model, susceptibility, trigger, &mut out)?;
    Ok(out)
}

/// Score every cell into `out`, which must be as long as both inputs.
pub fn compute_risk_into(
    model: &RiskModel,
    susceptibility: &[f32],
    trigger: &[f32],
    out: &mut [f32],
) -> Result<()> {
    ensure_len("trigger", susceptibility.len(), trigger.len())?;
    ensure_len("risk buffer", susceptibility.len(), out.len())?;

    #[cfg(feature = "threading")]
    {
        use rayon::prelude::*;
        out.par_iter_mut()
            .zip(susceptibility.par_iter().zip(trigger.par_iter()))
            .for_each(|(r, (&s, &t))| *r = model.score(s, t));
    }

    #[cfg(not(feature = "threading"))]
    for (r, (&s, &t)) in out.iter_mut().zip(susceptibility.iter().zip(trigger)) {
        *r = model.score(s, t);
    }

    Ok(())
}

// ── Risk levels ───────────────────────────────────────────────────────────────

/// Dashboard band for a risk value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// Below 0.40.
    Low,
    /// From 0.40 up to 0.60.
    Watch,
    /// From 0.60 up to 0.80.
    MedHigh,
    /// 0.80 and above.
    High,
}

impl RiskLevel {
    pub fn from_risk(risk: f32) -> Self {
        if risk >= 0.80 {
            RiskLevel::High
        } else if risk >= 0.60 {
            RiskLevel::MedHigh
        } else if risk >= 0.40 {
            RiskLevel::Watch
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Watch => "watch",
            RiskLevel::MedHigh => "med_high",
            RiskLevel::High => "high",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HazardError;
    use approx::assert_relative_eq;

    #[test]
    fn logistic_matches_closed_form() {
        assert_relative_eq!(logistic(0.0), 0.5);
        assert_relative_eq!(logistic(1.85), 1.0 / (1.0 + (-1.85f64).exp()), epsilon = 1e-15);
        assert_relative_eq!(logistic(-1.95), 1.0 / (1.0 + 1.95f64.exp()), epsilon = 1e-15);
    }

    #[test]
    fn logistic_does_not_overflow_for_large_arguments() {
        assert!(logistic(-1000.0).is_finite());
        assert!(logistic(1000.0).is_finite());
        assert!(logistic(-1000.0) >= 0.0 && logistic(1000.0) <= 1.0);
    }

    /// Worked example: high/high and low/low cells.
    #[test]
    fn two_cell_example() {
        let risk = compute_risk(&[0.9, 0.1], &[0.9, 0.1]).unwrap();
        assert_relative_eq!(risk[0], 0.8641, epsilon = 1e-4);
        assert_relative_eq!(risk[1], 0.1245, epsilon = 1e-4);
    }

    #[test]
    fn output_strictly_inside_unit_interval() {
        let steps: Vec<f32> = (0..=20).map(|i| i as f32 / 20.0).collect();
        for &s in &steps {
            for &t in &steps {
                let r = RiskModel::default().score(s, t);
                assert!(r > 0.0 && r < 1.0, "risk({s}, {t}) = {r}");
            }
        }
    }

    #[test]
    fn monotone_in_each_input() {
        let m = RiskModel::default();
        let steps: Vec<f32> = (0..=50).map(|i| i as f32 / 50.0).collect();
        for &fixed in &[0.0f32, 0.3, 0.7, 1.0] {
            for w in steps.windows(2) {
                assert!(m.score(w[1], fixed) >= m.score(w[0], fixed));
                assert!(m.score(fixed, w[1]) >= m.score(fixed, w[0]));
            }
        }
    }

    /// Swapping two cells swaps their risk and touches nothing else.
    #[test]
    fn cells_are_scored_independently() {
        let s = [0.1, 0.5, 0.9, 0.3];
        let t = [0.8, 0.2, 0.4, 0.6];
        let base = compute_risk(&s, &t).unwrap();

        let s2 = [0.9, 0.5, 0.1, 0.3];
        let t2 = [0.4, 0.2, 0.8, 0.6];
        let swapped = compute_risk(&s2, &t2).unwrap();

        assert_eq!(swapped, vec![base[2], base[1], base[0], base[3]]);
    }

    #[test]
    fn deterministic() {
        let s: Vec<f32> = (0..100).map(|i| (i as f32 * 0.37) % 1.0).collect();
        let t: Vec<f32> = (0..100).map(|i| (i as f32 * 0.11) % 1.0).collect();
        assert_eq!(compute_risk(&s, &t).unwrap(), compute_risk(&s, &t).unwrap());
    }

    #[test]
    fn out_of_range_inputs_pass_through() {
        let r = compute_risk(&[-1.0, 2.0], &[-1.0, 2.0]).unwrap();
        assert_relative_eq!(r[0] as f64, logistic(-2.0 - 3.5 - 2.5), epsilon = 1e-6);
        assert_relative_eq!(r[1] as f64, logistic(4.0 + 7.0 - 2.5), epsilon = 1e-6);
    }

    #[test]
    fn mismatched_lengths_fail() {
        let err = compute_risk(&[0.1, 0.2, 0.3], &[0.1, 0.2]).unwrap_err();
        match err {
            HazardError::LengthMismatch { expected, actual, .. } => {
                assert_eq!((expected, actual), (3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn short_output_buffer_fails() {
        let mut out = [0.0f32; 1];
        let res = compute_risk_into(&RiskModel::default(), &[0.1, 0.2], &[0.1, 0.2], &mut out);
        assert!(matches!(res, Err(HazardError::LengthMismatch { .. })));
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(compute_risk(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn custom_model_coefficients_apply() {
        let m = RiskModel { a: 0.0, b: 0.0, c: 0.0 };
        let r = compute_risk_with_model(&m, &[0.9], &[0.9]).unwrap();
        assert_relative_eq!(r[0], 0.5);
    }

    #[cfg(feature = "threading")]
    #[test]
    fn parallel_scoring_matches_serial_loop() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(21);
        let s: Vec<f32> = (0..10_000).map(|_| rng.gen()).collect();
        let t: Vec<f32> = (0..10_000).map(|_| rng.gen()).collect();
        let model = RiskModel::default();
        let serial: Vec<f32> = s.iter().zip(&t).map(|(&s, &t)| model.score(s, t)).collect();
        assert_eq!(compute_risk(&s, &t).unwrap(), serial);
    }

    #[test]
    fn risk_level_bands() {
        assert_eq!(RiskLevel::from_risk(0.95), RiskLevel::High);
        assert_eq!(RiskLevel::from_risk(0.80), RiskLevel::High);
        assert_eq!(RiskLevel::from_risk(0.79), RiskLevel::MedHigh);
        assert_eq!(RiskLevel::from_risk(0.60), RiskLevel::MedHigh);
        assert_eq!(RiskLevel::from_risk(0.45), RiskLevel::Watch);
        assert_eq!(RiskLevel::from_risk(0.10), RiskLevel::Low);
        assert_eq!(RiskLevel::MedHigh.as_str(), "med_high");
    }
}
