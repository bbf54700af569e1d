//! Sequential Minimal Optimization (SMO) solver
//!
//! Solves the soft-margin SVM dual problem by repeatedly optimizing pairs of
//! dual coefficients (Platt's two-variable working set). The outer loop
//! alternates between full sweeps and sweeps over non-bound coefficients
//! only; a per-example error cache keeps step acceptance O(N).

use crate::cache::{ErrorCache, KernelCache};
use crate::core::{Result, Sample, SolveOutcome, SolverConfig, SvmError};
use crate::kernel::Kernel;
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Minimum relative coefficient change for a step to be accepted
const STEP_EPS: f64 = 0.001;

/// SMO solver for one binary problem
///
/// Produces a dual coefficient per training example and a scalar threshold.
/// The solver owns no training state between calls; all working state lives
/// for the duration of a single [`solve`](SmoSolver::solve).
pub struct SmoSolver<K: Kernel> {
    kernel: Arc<K>,
    config: SolverConfig,
}

impl<K: Kernel> SmoSolver<K> {
    /// Create a new solver with the given kernel and configuration
    pub fn new(kernel: Arc<K>, config: SolverConfig) -> Self {
        Self { kernel, config }
    }

    /// Get the solver configuration
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Solve the dual problem for a binary dataset
    ///
    /// # Errors
    /// `EmptyDataset` for an empty slice, `InvalidParameter` when C is not
    /// strictly positive, `InvalidLabel` when a label is not -1 or +1.
    pub fn solve(&self, samples: &[Sample]) -> Result<SolveOutcome> {
        if samples.is_empty() {
            return Err(SvmError::EmptyDataset);
        }
        if !(self.config.c > 0.0 && self.config.c.is_finite()) {
            return Err(SvmError::InvalidParameter(format!(
                "C must be positive and finite, got {}",
                self.config.c
            )));
        }
        for sample in samples {
            if sample.label != 1.0 && sample.label != -1.0 {
                return Err(SvmError::InvalidLabel(sample.label));
            }
        }

        let rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let n = samples.len();
        let mut state = Working {
            samples,
            kernel: self.kernel.as_ref(),
            cache: KernelCache::with_memory_limit(self.config.cache_size),
            alphas: vec![0.0; n],
            threshold: 0.0,
            errors: ErrorCache::new(n),
            rng,
            c: self.config.c,
            tolerance: self.config.tolerance,
        };
        Ok(state.run(self.config.max_passes))
    }
}

/// Mutable solving state, alive for one `solve` call
struct Working<'a, K: Kernel> {
    samples: &'a [Sample],
    kernel: &'a K,
    cache: KernelCache,
    alphas: Vec<f64>,
    threshold: f64,
    errors: ErrorCache,
    rng: StdRng,
    c: f64,
    tolerance: f64,
}

impl<K: Kernel> Working<'_, K> {
    fn run(&mut self, max_passes: usize) -> SolveOutcome {
        let n = self.samples.len();

        // The decision function starts at zero, so every error is -label.
        for i in 0..n {
            self.errors.set(i, -self.samples[i].label);
        }

        let mut examine_all = true;
        let mut passes = 0;
        let mut converged = true;

        loop {
            let mut num_changed = 0;
            for i in 0..n {
                if (examine_all || non_bound(self.alphas[i], self.c)) && self.examine(i) {
                    num_changed += 1;
                }
            }
            passes += 1;
            debug!(
                "pass {}: {} accepted steps ({} sweep)",
                passes,
                num_changed,
                if examine_all { "full" } else { "non-bound" }
            );

            if examine_all {
                examine_all = false;
            } else if num_changed == 0 {
                examine_all = true;
            }
            // A full sweep with no accepted step means every example
            // satisfies the KKT test within tolerance.
            if num_changed == 0 && !examine_all {
                break;
            }
            if passes >= max_passes {
                warn!("solver did not converge within {max_passes} passes");
                converged = false;
                break;
            }
        }

        let threshold = self.finalize_threshold();
        debug!(
            "solved in {} passes, kernel cache hit rate {:.2}",
            passes,
            self.cache.hit_rate()
        );

        SolveOutcome {
            alphas: std::mem::take(&mut self.alphas),
            threshold,
            converged,
            passes,
        }
    }

    /// Kernel matrix entry K(i, j), served from the LRU cache when possible
    fn k(&mut self, i: usize, j: usize) -> f64 {
        kernel_entry(&mut self.cache, self.kernel, self.samples, i, j)
    }

    /// Try to optimize example `i0`; true when a step was accepted
    fn examine(&mut self, i0: usize) -> bool {
        let n = self.samples.len();
        let alpha0 = self.alphas[i0];
        let label0 = self.samples[i0].label;
        let error0 = self.errors.get(i0);

        // KKT optimality test: a violating example can either grow its
        // coefficient (negative side) or shrink it (positive side).
        let r0 = label0 * error0;
        let violates = (r0 < -self.tolerance && alpha0 < self.c)
            || (r0 > self.tolerance && alpha0 > 0.0);
        if !violates {
            return false;
        }

        // Second-choice heuristic: the largest |E1 - E0| over non-bound
        // coefficients promises the largest step.
        let i1 = self.second_choice(i0, error0);
        if self.step(i0, i1) {
            return true;
        }

        // The heuristic pick failed; scan the non-bound coefficients from a
        // randomized offset, then the bound ones.
        let offset = self.rng.random_range(0..n);
        for j in 0..n {
            let i = (j + offset) % n;
            if i != i1 && non_bound(self.alphas[i], self.c) && self.step(i0, i) {
                return true;
            }
        }
        for j in 0..n {
            let i = (j + offset) % n;
            if i != i1 && !non_bound(self.alphas[i], self.c) && self.step(i0, i) {
                return true;
            }
        }
        false
    }

    /// Pick the second working-set index for `i0`, maximizing |E1 - E0|
    /// over non-bound coefficients; returns `i0` itself when none qualify
    /// (the subsequent step rejects it and the caller falls back to scans).
    fn second_choice(&self, i0: usize, error0: f64) -> usize {
        let mut best = i0;
        let mut max_delta = 0.0;
        for (i, &alpha) in self.alphas.iter().enumerate() {
            if !non_bound(alpha, self.c) {
                continue;
            }
            let delta = (self.errors.get(i) - error0).abs();
            if delta > max_delta {
                max_delta = delta;
                best = i;
            }
        }
        best
    }

    /// Attempt a joint update of alphas `i0` and `i1`
    ///
    /// Rejections (equal indices, empty box, non-negative curvature, change
    /// below the noise floor) are silent; the caller keeps searching.
    fn step(&mut self, i0: usize, i1: usize) -> bool {
        if i0 == i1 {
            return false;
        }

        let label0 = self.samples[i0].label;
        let label1 = self.samples[i1].label;
        let alpha0 = self.alphas[i0];
        let alpha1 = self.alphas[i1];

        let (low, high) = feasible_box(alpha0, alpha1, label0, label1, self.c);
        if low >= high {
            return false;
        }

        let error0 = self.errors.get(i0);
        let error1 = self.errors.get(i1);

        let k01 = self.k(i0, i1);
        let k00 = self.k(i0, i0);
        let k11 = self.k(i1, i1);

        // Second derivative of the objective along the constraint line;
        // a valid kernel gives eta < 0, anything else is numerical
        // degeneracy and the step is skipped.
        let eta = 2.0 * k01 - k00 - k11;
        if eta >= 0.0 {
            return false;
        }

        let mut alpha1_new = clip(alpha1 + label1 * (error1 - error0) / eta, low, high);
        if (alpha1_new - alpha1).abs() < STEP_EPS * (alpha1_new + alpha1 + STEP_EPS) {
            return false;
        }

        // First coefficient follows from label0*a0 + label1*a1 = const;
        // clamping it to the box re-derives the second.
        let s = label0 * label1;
        let mut alpha0_new = alpha0 + s * (alpha1 - alpha1_new);
        if alpha0_new < 0.0 {
            alpha0_new = 0.0;
            alpha1_new = alpha1 + s * alpha0;
        } else if alpha0_new > self.c {
            alpha0_new = self.c;
            alpha1_new = alpha1 + s * (alpha0 - self.c);
        }

        let d_alpha0 = label0 * (alpha0_new - alpha0);
        let d_alpha1 = label1 * (alpha1_new - alpha1);

        // Threshold delta from whichever updated coefficient sits strictly
        // inside the box; the average when neither does.
        let d0 = error0 + d_alpha0 * k00 + d_alpha1 * k01;
        let d1 = error1 + d_alpha0 * k01 + d_alpha1 * k11;
        let d_threshold = if non_bound(alpha0_new, self.c) {
            d0
        } else if non_bound(alpha1_new, self.c) {
            d1
        } else {
            (d0 + d1) / 2.0
        };

        self.threshold -= d_threshold;
        self.alphas[i0] = alpha0_new;
        self.alphas[i1] = alpha1_new;

        let Self {
            samples,
            kernel,
            cache,
            errors,
            ..
        } = self;
        errors.update(i0, d_alpha0, i1, d_alpha1, -d_threshold, |a, b| {
            kernel_entry(cache, *kernel, *samples, a, b)
        });

        true
    }

    /// Mid-margin threshold from the tightest per-class decision bounds
    ///
    /// With the threshold held at zero, the smallest decision value over
    /// positive examples and the largest over negative examples bracket the
    /// margin; the final threshold centers it.
    fn finalize_threshold(&mut self) -> f64 {
        let n = self.samples.len();
        let mut positive_min = f64::INFINITY;
        let mut negative_max = f64::NEG_INFINITY;

        for i in 0..n {
            let mut f = 0.0;
            for j in 0..n {
                let alpha_j = self.alphas[j];
                if alpha_j > 0.0 {
                    let label_j = self.samples[j].label;
                    let k_ij = self.k(i, j);
                    f += alpha_j * label_j * k_ij;
                }
            }
            if self.samples[i].label > 0.0 {
                positive_min = positive_min.min(f);
            } else {
                negative_max = negative_max.max(f);
            }
        }

        if positive_min.is_finite() && negative_max.is_finite() {
            -(negative_max + positive_min) / 2.0
        } else {
            // Single-class input: no opposite bound exists, keep the
            // running threshold.
            self.threshold
        }
    }
}

/// Check for a coefficient strictly inside the box (0, C)
fn non_bound(alpha: f64, c: f64) -> bool {
    alpha > 0.0 && alpha < c
}

fn clip(x: f64, low: f64, high: f64) -> f64 {
    x.max(low).min(high)
}

/// Box bounds [L, H] for the second coefficient, from the equality
/// constraint and label agreement
fn feasible_box(alpha0: f64, alpha1: f64, label0: f64, label1: f64, c: f64) -> (f64, f64) {
    if label0 != label1 {
        let diff = alpha1 - alpha0;
        (0.0_f64.max(diff), c.min(c + diff))
    } else {
        let sum = alpha0 + alpha1;
        (0.0_f64.max(sum - c), c.min(sum))
    }
}

fn kernel_entry<K: Kernel>(
    cache: &mut KernelCache,
    kernel: &K,
    samples: &[Sample],
    i: usize,
    j: usize,
) -> f64 {
    if let Some(value) = cache.get(i, j) {
        value
    } else {
        let value = kernel.compute(&samples[i].features, &samples[j].features);
        cache.put(i, j, value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FeatureVector;
    use crate::kernel::LinearKernel;
    use approx::assert_relative_eq;

    fn seeded_config() -> SolverConfig {
        SolverConfig {
            seed: Some(42),
            ..SolverConfig::default()
        }
    }

    fn solve(samples: &[Sample], config: SolverConfig) -> SolveOutcome {
        let solver = SmoSolver::new(Arc::new(LinearKernel::new()), config);
        solver.solve(samples).expect("solve should succeed")
    }

    #[test]
    fn test_empty_dataset_rejected() {
        let solver = SmoSolver::new(Arc::new(LinearKernel::new()), seeded_config());
        assert!(matches!(solver.solve(&[]), Err(SvmError::EmptyDataset)));
    }

    #[test]
    fn test_invalid_label_rejected() {
        let solver = SmoSolver::new(Arc::new(LinearKernel::new()), seeded_config());
        let samples = vec![Sample::new(FeatureVector::new(vec![1.0]), 0.5)];
        assert!(matches!(
            solver.solve(&samples),
            Err(SvmError::InvalidLabel(l)) if l == 0.5
        ));
    }

    #[test]
    fn test_non_positive_c_rejected() {
        let config = SolverConfig {
            c: 0.0,
            ..seeded_config()
        };
        let solver = SmoSolver::new(Arc::new(LinearKernel::new()), config);
        let samples = vec![Sample::new(FeatureVector::new(vec![1.0]), 1.0)];
        assert!(matches!(
            solver.solve(&samples),
            Err(SvmError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_two_point_problem_exact() {
        // Points at ±2 on a line. The optimum is alpha = 1/8 for both and a
        // centered threshold of zero.
        let samples = vec![
            Sample::new(FeatureVector::new(vec![2.0]), 1.0),
            Sample::new(FeatureVector::new(vec![-2.0]), -1.0),
        ];
        let outcome = solve(&samples, seeded_config());

        assert!(outcome.converged);
        assert_relative_eq!(outcome.alphas[0], 0.125, epsilon = 1e-6);
        assert_relative_eq!(outcome.alphas[1], 0.125, epsilon = 1e-6);
        assert_relative_eq!(outcome.threshold, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_alphas_stay_in_box() {
        let samples = vec![
            Sample::new(FeatureVector::new(vec![1.0, 1.2]), 1.0),
            Sample::new(FeatureVector::new(vec![0.9, 1.0]), 1.0),
            Sample::new(FeatureVector::new(vec![1.1, 0.8]), 1.0),
            Sample::new(FeatureVector::new(vec![-1.0, -1.1]), -1.0),
            Sample::new(FeatureVector::new(vec![-0.8, -1.0]), -1.0),
            Sample::new(FeatureVector::new(vec![-1.2, -0.9]), -1.0),
        ];
        let config = SolverConfig {
            c: 0.5,
            ..seeded_config()
        };
        let outcome = solve(&samples, config);

        for &alpha in &outcome.alphas {
            assert!((0.0..=0.5).contains(&alpha), "alpha out of box: {alpha}");
        }
    }

    #[test]
    fn test_kkt_holds_at_termination() {
        let samples = vec![
            Sample::new(FeatureVector::new(vec![2.0, 0.0]), 1.0),
            Sample::new(FeatureVector::new(vec![3.0, 1.0]), 1.0),
            Sample::new(FeatureVector::new(vec![-2.0, 0.0]), -1.0),
            Sample::new(FeatureVector::new(vec![-3.0, -1.0]), -1.0),
        ];
        let config = seeded_config();
        let outcome = solve(&samples, config.clone());
        assert!(outcome.converged);

        let kernel = LinearKernel::new();
        for (i, sample) in samples.iter().enumerate() {
            let f: f64 = outcome.threshold
                + samples
                    .iter()
                    .zip(outcome.alphas.iter())
                    .map(|(s, &a)| a * s.label * kernel.compute(&sample.features, &s.features))
                    .sum::<f64>();
            let r = sample.label * (f - sample.label);
            let alpha = outcome.alphas[i];
            // No example may still violate the KKT test.
            assert!(
                !(r < -config.tolerance && alpha < config.c),
                "example {i} can still grow its coefficient (r = {r})"
            );
            assert!(
                !(r > config.tolerance && alpha > 0.0),
                "example {i} can still shrink its coefficient (r = {r})"
            );
        }
    }

    #[test]
    fn test_pass_guard_reports_non_convergence() {
        let samples = vec![
            Sample::new(FeatureVector::new(vec![1.0, 1.0]), 1.0),
            Sample::new(FeatureVector::new(vec![-1.0, -1.0]), -1.0),
            Sample::new(FeatureVector::new(vec![1.0, -1.0]), 1.0),
            Sample::new(FeatureVector::new(vec![-1.0, 1.0]), -1.0),
        ];
        let config = SolverConfig {
            max_passes: 1,
            ..seeded_config()
        };
        let outcome = solve(&samples, config);

        assert!(!outcome.converged);
        assert_eq!(outcome.passes, 1);
    }

    #[test]
    fn test_same_seed_same_result() {
        let samples = vec![
            Sample::new(FeatureVector::new(vec![1.0, 0.4]), 1.0),
            Sample::new(FeatureVector::new(vec![0.8, 0.9]), 1.0),
            Sample::new(FeatureVector::new(vec![1.2, 0.7]), 1.0),
            Sample::new(FeatureVector::new(vec![-0.9, -0.6]), -1.0),
            Sample::new(FeatureVector::new(vec![-1.1, -0.3]), -1.0),
            Sample::new(FeatureVector::new(vec![-0.7, -1.0]), -1.0),
        ];
        let a = solve(&samples, seeded_config());
        let b = solve(&samples, seeded_config());

        assert_eq!(a.alphas, b.alphas);
        assert_eq!(a.threshold, b.threshold);
        assert_eq!(a.passes, b.passes);
    }

    #[test]
    fn test_feasible_box_different_labels() {
        let (low, high) = feasible_box(0.2, 0.6, 1.0, -1.0, 1.0);
        assert_relative_eq!(low, 0.4);
        assert_relative_eq!(high, 1.0);
    }

    #[test]
    fn test_feasible_box_same_labels() {
        let (low, high) = feasible_box(0.7, 0.8, 1.0, 1.0, 1.0);
        assert_relative_eq!(low, 0.5);
        assert_relative_eq!(high, 1.0);
    }
}
