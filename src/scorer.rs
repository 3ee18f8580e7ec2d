//! Exact and asymptotic scores for a partition over one sample table.
//!
//! Group likelihoods and priors are conditionally independent given the
//! partition, so every score here is a pure per-group sum. That additivity is
//! what makes incremental search tractable: a mutation touching one or two
//! groups requires recomputing only those groups' statistics, never a full
//! rescan of the dataset.
//!
//! The Bayesian scores use the Jeffreys prior (Dirichlet concentration 1/2),
//! the convention of de Mulatier, Mazza & Marsili, [Statistical Inference of
//! Minimally Complex Models][mcm], whose closed form for one group of `r`
//! variables with observed joint-state counts `k_s` summing to `N` is
//!
//! ```text
//! ln Γ(q^r/2) − ln Γ(N + q^r/2) + Σ_s [ln Γ(k_s + 1/2) − ln Γ(1/2)]
//! ```
//!
//! [mcm]: https://arxiv.org/abs/2008.00520

use crate::error::{McmError, Result};
use crate::partition::{Partition, VariableSet};
use crate::sample::SampleTable;
use statrs::function::gamma::ln_gamma;
use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Groups larger than this get an asymptotic evidence prefactor: the exact
/// form is a difference of two enormous lgamma values whose leading digits
/// cancel, leaving no precision.
const EXACT_PREFACTOR_MAX_VARS: usize = 25;

/// Computes scores for partitions over one immutable [`SampleTable`].
///
/// The scorer memoizes per-group log-evidence keyed by the group's variable
/// bitmask; a group's statistics are recomputed exactly when its membership
/// changes, because changed membership means a different mask. Not safe for
/// concurrent use.
pub struct Scorer {
    table: SampleTable,
    evidence_cache: RefCell<HashMap<u128, f64>>,
}

impl Scorer {
    /// Creates a scorer owning the given table.
    pub fn new(table: SampleTable) -> Self {
        Scorer {
            table,
            evidence_cache: RefCell::new(HashMap::new()),
        }
    }

    /// The sample table this scorer was built over.
    pub fn table(&self) -> &SampleTable {
        &self.table
    }

    fn check_partition(&self, partition: &Partition) -> Result<()> {
        if partition.n() != self.table.n() {
            return Err(McmError::range(
                "Number of variables in the data doesn't match the number of variables in the given MCM.",
            ));
        }
        Ok(())
    }

    /// The observed joint-outcome counts of one group: a sparse histogram
    /// over that group's masked states.
    fn group_counts(&self, mask: u128) -> HashMap<u128, u32> {
        let mut counts = HashMap::new();
        for &(state, count) in self.table.states() {
            *counts.entry(state & mask).or_insert(0) += count;
        }
        counts
    }

    /// q^r as a float; exact for every group size this crate accepts.
    fn joint_states(&self, r: usize) -> f64 {
        (self.table.q() as f64).powi(r as i32)
    }

    /// The exact Dirichlet-multinomial marginal log-likelihood of one group's
    /// counts, memoized by the group's bitmask.
    pub(crate) fn log_evidence_of_group(&self, group: &VariableSet) -> f64 {
        let mask = self.table.mask_of(group);
        if let Some(&cached) = self.evidence_cache.borrow().get(&mask) {
            return cached;
        }

        let r = group.len();
        let n_samples = f64::from(self.table.n_samples());
        let half_ln_pi = 0.5 * PI.ln();

        // ln Γ(k + 1/2) − ln Γ(1/2) per observed joint state; Γ(1/2) = √π.
        let mut log_evidence: f64 = self
            .group_counts(mask)
            .values()
            .map(|&count| ln_gamma(f64::from(count) + 0.5) - half_ln_pi)
            .sum();

        if r > EXACT_PREFACTOR_MAX_VARS {
            log_evidence -= n_samples * r as f64 * (self.table.q() as f64).ln();
        } else {
            let half_qr = self.joint_states(r) / 2.0;
            log_evidence += ln_gamma(half_qr) - ln_gamma(n_samples + half_qr);
        }

        self.evidence_cache.borrow_mut().insert(mask, log_evidence);
        log_evidence
    }

    fn log_likelihood_of_group(&self, group: &VariableSet) -> f64 {
        let mask = self.table.mask_of(group);
        let n_samples = f64::from(self.table.n_samples());
        self.group_counts(mask)
            .values()
            .map(|&count| f64::from(count) * (f64::from(count) / n_samples).ln())
            .sum()
    }

    fn complexity_parametric_of_group(&self, group: &VariableSet) -> f64 {
        let free_parameters = self.joint_states(group.len()) - 1.0;
        let n_samples = f64::from(self.table.n_samples());
        (free_parameters / 2.0) * (n_samples / (2.0 * PI)).ln()
    }

    fn complexity_geometric_of_group(&self, group: &VariableSet) -> f64 {
        let half_qr = self.joint_states(group.len()) / 2.0;
        half_qr * PI.ln() - ln_gamma(half_qr)
    }

    fn per_icc<F>(&self, partition: &Partition, score: F) -> Result<Vec<f64>>
    where
        F: Fn(&VariableSet) -> f64,
    {
        self.check_partition(partition)?;
        Ok(partition.groups().iter().map(|g| score(g)).collect())
    }

    /// The exact Bayesian log marginal likelihood of the dataset under this
    /// partition's independence structure: the sum of each group's
    /// Dirichlet-multinomial marginal. This is a closed form, not an
    /// approximation.
    pub fn log_evidence(&self, partition: &Partition) -> Result<f64> {
        Ok(self.log_evidence_icc(partition)?.iter().sum())
    }

    /// Per-group log-evidence contributions, in canonical group order.
    pub fn log_evidence_icc(&self, partition: &Partition) -> Result<Vec<f64>> {
        self.per_icc(partition, |g| self.log_evidence_of_group(g))
    }

    /// The maximum multinomial log-likelihood of the dataset under this
    /// partition, using each group's observed joint-outcome frequencies.
    pub fn log_likelihood(&self, partition: &Partition) -> Result<f64> {
        Ok(self.log_likelihood_icc(partition)?.iter().sum())
    }

    /// Per-group log-likelihood contributions, in canonical group order.
    pub fn log_likelihood_icc(&self, partition: &Partition) -> Result<Vec<f64>> {
        self.per_icc(partition, |g| self.log_likelihood_of_group(g))
    }

    /// The parametric complexity of this partition: each group's
    /// free-parameter count `q^|group| − 1` at the usual per-parameter rate
    /// `ln(N / 2π) / 2`.
    pub fn complexity_parametric(&self, partition: &Partition) -> Result<f64> {
        Ok(self.complexity_parametric_icc(partition)?.iter().sum())
    }

    /// Per-group parametric complexity, in canonical group order.
    pub fn complexity_parametric_icc(&self, partition: &Partition) -> Result<Vec<f64>> {
        self.per_icc(partition, |g| self.complexity_parametric_of_group(g))
    }

    /// The geometric complexity of this partition: each group's
    /// Fisher-information volume under the Jeffreys prior. Negative once a
    /// group's joint-state space is large.
    pub fn complexity_geometric(&self, partition: &Partition) -> Result<f64> {
        Ok(self.complexity_geometric_icc(partition)?.iter().sum())
    }

    /// Per-group geometric complexity, in canonical group order.
    pub fn complexity_geometric_icc(&self, partition: &Partition) -> Result<Vec<f64>> {
        self.per_icc(partition, |g| self.complexity_geometric_of_group(g))
    }

    /// The minimum description length of the dataset under this partition:
    /// exactly `log_likelihood − complexity_parametric − complexity_geometric`,
    /// the asymptotic expansion of [`log_evidence`](Scorer::log_evidence).
    pub fn minimum_description_length(&self, partition: &Partition) -> Result<f64> {
        Ok(self.minimum_description_length_icc(partition)?.iter().sum())
    }

    /// Per-group description length, in canonical group order.
    pub fn minimum_description_length_icc(&self, partition: &Partition) -> Result<Vec<f64>> {
        self.per_icc(partition, |g| {
            self.log_likelihood_of_group(g)
                - self.complexity_parametric_of_group(g)
                - self.complexity_geometric_of_group(g)
        })
    }

    /// The Shannon entropy (in nats) over the `N` samples of the spin
    /// operator `Σ coeffs[v] · row[v] mod q`: a generalized parity of the
    /// sample, weighted by `coeffs`.
    ///
    /// Fails with a `RangeError` when `coeffs` is not length `n` or contains
    /// a value outside `[0, q)`.
    pub fn entropy_of_spin_operator(&self, coeffs: &[u8]) -> Result<f64> {
        if coeffs.len() != self.table.n() {
            return Err(McmError::range(
                "The given spin operator doesn't contain n elements.",
            ));
        }
        if coeffs.iter().any(|&c| c as usize >= self.table.q()) {
            return Err(McmError::range(
                "The vector should only contain values between 0 and q-1.",
            ));
        }

        let q = self.table.q();
        let mut distribution = vec![0u64; q];
        for &(state, count) in self.table.states() {
            let spin = coeffs
                .iter()
                .enumerate()
                .fold(0usize, |acc, (v, &coeff)| {
                    acc + coeff as usize * self.table.value(state, v) as usize
                })
                % q;
            distribution[spin] += u64::from(count);
        }

        let total = f64::from(self.table.n_samples());
        Ok(distribution
            .iter()
            .filter(|&&weight| weight > 0)
            .map(|&weight| {
                let p = weight as f64 / total;
                -p * p.ln()
            })
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn fair_coin_pair() -> Scorer {
        // Two perfectly correlated binary variables, 8 samples.
        let rows: Vec<Vec<u8>> = (0..8).map(|i| vec![i & 1, i & 1]).collect();
        Scorer::new(SampleTable::from_rows(&rows, 2, 2).unwrap())
    }

    #[test]
    fn single_group_evidence_matches_hand_computation() {
        let scorer = fair_coin_pair();
        let complete = Partition::complete(2);

        // Counts {4, 4} over q^2 = 4 joint states, N = 8:
        // lnΓ(2) − lnΓ(10) + 2·(lnΓ(4.5) − lnΓ(0.5))
        let expected = ln_gamma(2.0) - ln_gamma(10.0)
            + 2.0 * (ln_gamma(4.5) - ln_gamma(0.5));
        assert_relative_eq!(
            scorer.log_evidence(&complete).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn likelihood_of_deterministic_pair() {
        let scorer = fair_coin_pair();
        let complete = Partition::complete(2);
        let independent = Partition::independent(2);

        // Jointly there are two states with probability 1/2 each, exactly as
        // much randomness as either variable alone.
        let expected = 8.0 * (0.5f64).ln();
        assert_relative_eq!(
            scorer.log_likelihood(&complete).unwrap(),
            expected,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            scorer.log_likelihood(&independent).unwrap(),
            2.0 * expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn spin_operator_entropy() {
        let scorer = fair_coin_pair();
        // The XOR of two perfectly correlated variables is constant.
        assert_relative_eq!(
            scorer.entropy_of_spin_operator(&[1, 1]).unwrap(),
            0.0,
            epsilon = 1e-12
        );
        // Either variable alone is a fair coin.
        assert_relative_eq!(
            scorer.entropy_of_spin_operator(&[1, 0]).unwrap(),
            (2.0f64).ln(),
            max_relative = 1e-12
        );
    }
}
