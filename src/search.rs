//! Search strategies over the lattice of partitions.
//!
//! All four strategies maximize the exact log-evidence of a [`Scorer`]'s
//! dataset. Because the score is a per-group sum, each candidate mutation is
//! rescored by recomputing only the one or two groups it touches; the
//! [`Scorer`]'s per-group memoization does the rest.
//!
//! An engine holds the record of its most recent run: the method, the initial
//! partition (when the method has one), the best partition found, and the
//! ordered trajectory of every total log-evidence it evaluated. The best
//! partition is returned annotated as optimized, carrying its total and
//! per-group log-evidence.

use crate::error::{McmError, Result};
use crate::partition::{Partition, VariableSet};
use crate::scorer::Scorer;
use log::{debug, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Which strategy produced the engine's current run record.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SearchMethod {
    /// Every set-partition, scored once.
    Exhaustive,
    /// Randomized local moves with a cooling schedule.
    SimulatedAnnealing,
    /// Greedy agglomerative merging down to the complete model.
    GreedyMerging,
    /// Greedy divisive moves up to the independence model.
    GreedyDivisive,
}

struct Run {
    method: SearchMethod,
    mcm_in: Option<Partition>,
    mcm_out: Partition,
    trajectory: Vec<f64>,
}

/// Mutable search state: the working groups with their per-group evidence and
/// running total.
#[derive(Clone)]
struct Working {
    groups: Vec<VariableSet>,
    per_icc: Vec<f64>,
    total: f64,
}

impl Working {
    fn from_partition(scorer: &Scorer, partition: &Partition) -> Working {
        let groups = partition.groups().to_vec();
        let per_icc: Vec<f64> = groups
            .iter()
            .map(|g| scorer.log_evidence_of_group(g))
            .collect();
        let total = per_icc.iter().sum();
        Working {
            groups,
            per_icc,
            total,
        }
    }

    fn n_icc(&self) -> usize {
        self.groups.len()
    }

    /// Converts the working state into a canonical, optimized partition:
    /// groups reordered by smallest member, annotated with the recorded
    /// evidence.
    fn into_partition(self, n: usize) -> Partition {
        let mut pairs: Vec<(VariableSet, f64)> =
            self.groups.into_iter().zip(self.per_icc).collect();
        pairs.sort_by_key(|(group, _)| group.smallest());
        let (groups, per_icc): (Vec<_>, Vec<_>) = pairs.into_iter().unzip();
        let mut partition = Partition::from_groups(n, groups);
        partition.annotate(self.total, per_icc);
        partition
    }
}

/// Runs the four partition-search strategies and records their results.
///
/// Engines are deterministic given a seed; [`SearchEngine::new`] seeds from
/// entropy. The annealing tunables are plain fields and may be adjusted
/// between runs.
pub struct SearchEngine {
    /// Iteration budget for simulated annealing.
    pub sa_max_iterations: usize,
    /// Starting temperature of the cooling schedule.
    pub sa_initial_temperature: f64,
    /// The temperature is re-evaluated every this many iterations.
    pub sa_update_schedule: usize,
    /// Annealing stops once the temperature drops below this floor.
    pub sa_temperature_floor: f64,
    rng: StdRng,
    run: Option<Run>,
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new()
    }
}

impl SearchEngine {
    /// Creates an engine seeded from system entropy.
    pub fn new() -> Self {
        SearchEngine::with_rng(StdRng::from_entropy())
    }

    /// Creates an engine with a fixed seed, for reproducible annealing runs.
    pub fn with_seed(seed: u64) -> Self {
        SearchEngine::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        SearchEngine {
            sa_max_iterations: 50_000,
            sa_initial_temperature: 100.0,
            sa_update_schedule: 100,
            sa_temperature_floor: 1e-9,
            rng,
            run: None,
        }
    }

    /// The initial partition of the most recent run.
    ///
    /// Fails with a `StateError` before any run, and after an exhaustive run,
    /// which enumerates from nothing.
    pub fn mcm_in(&self) -> Result<&Partition> {
        let run = self
            .run
            .as_ref()
            .ok_or_else(|| McmError::state("No search has been ran yet."))?;
        run.mcm_in
            .as_ref()
            .ok_or_else(|| McmError::state("Exhaustive search does not have an initial MCM."))
    }

    /// The strategy that produced the most recent run.
    ///
    /// Fails with a `StateError` before any run.
    pub fn method(&self) -> Result<SearchMethod> {
        self.run
            .as_ref()
            .map(|run| run.method)
            .ok_or_else(|| McmError::state("No search has been ran yet."))
    }

    /// The best partition of the most recent run, annotated as optimized.
    ///
    /// Fails with a `StateError` before any run.
    pub fn mcm_out(&self) -> Result<&Partition> {
        self.run
            .as_ref()
            .map(|run| &run.mcm_out)
            .ok_or_else(|| McmError::state("No search has been ran yet."))
    }

    /// Every total log-evidence the most recent run evaluated, in evaluation
    /// order.
    ///
    /// Fails with a `StateError` before any run.
    pub fn log_evidence_trajectory(&self) -> Result<&[f64]> {
        self.run
            .as_ref()
            .map(|run| run.trajectory.as_slice())
            .ok_or_else(|| McmError::state("No search has been ran yet."))
    }

    /// Resolves the initial partition of a run: the caller's, validated
    /// against the dataset, or the named default.
    fn resolve_mcm_in(
        scorer: &Scorer,
        mcm_in: Option<&Partition>,
        default: fn(usize) -> Partition,
    ) -> Result<Partition> {
        let n = scorer.table().n();
        match mcm_in {
            Some(partition) => {
                if partition.n() != n {
                    return Err(McmError::range(
                        "Number of variables in the data doesn't match the number of variables in the given MCM.",
                    ));
                }
                Ok(Partition::from_groups(n, partition.groups().to_vec()))
            }
            None => Ok(default(n)),
        }
    }

    /// Scores every set-partition of the dataset's variables exactly once and
    /// keeps the maximum. The number of partitions visited is the Bell number
    /// of `n`, so this is a correctness oracle for small systems, not a
    /// strategy for large ones. There is no early exit.
    ///
    /// Enumeration generates restricted growth strings: entry `v` of the
    /// string is the group label of variable `v`, and each label's first
    /// occurrence is already canonical.
    pub fn exhaustive(&mut self, scorer: &Scorer) -> Result<Partition> {
        let n = scorer.table().n();
        debug!("exhaustive search over {} variables", n);

        let mut a = vec![0usize; n];
        let mut b = vec![1usize; n];
        let mut trajectory = Vec::new();
        let mut best_total = f64::NEG_INFINITY;
        let mut best_rgs = a.clone();

        loop {
            let total: f64 = groups_from_rgs(&a)
                .iter()
                .map(|g| scorer.log_evidence_of_group(g))
                .sum();
            trajectory.push(total);
            if total > best_total {
                best_total = total;
                best_rgs.copy_from_slice(&a);
            }
            if !next_rgs(&mut a, &mut b) {
                break;
            }
        }

        debug!(
            "exhaustive search evaluated {} partitions, best log-evidence {}",
            trajectory.len(),
            best_total
        );

        let working = Working::from_partition(
            scorer,
            &Partition::from_groups(n, groups_from_rgs(&best_rgs)),
        );
        Ok(self.record(SearchMethod::Exhaustive, None, working, trajectory, n))
    }

    /// Simulated annealing over elementary moves: a single-variable move, a
    /// random group split, or a random pair merge, chosen uniformly among the
    /// kinds applicable to the working partition. A proposal that does not
    /// lower the score is accepted immediately; one that lowers it by `Δ` is
    /// accepted with probability `exp(Δ/T)` under a logarithmic cooling
    /// schedule. The best partition ever visited is kept regardless of where
    /// the walk ends, and a final merging pass polishes it to a local
    /// optimum.
    ///
    /// Nondeterministic: repeated runs may return group-order relabelings of
    /// the same optimum. Defaults to the independence model when `mcm_in` is
    /// not given.
    pub fn simulated_annealing(
        &mut self,
        scorer: &Scorer,
        mcm_in: Option<&Partition>,
    ) -> Result<Partition> {
        let n = scorer.table().n();
        let initial = SearchEngine::resolve_mcm_in(scorer, mcm_in, Partition::independent)?;

        let mut working = Working::from_partition(scorer, &initial);
        let mut best = working.clone();
        let mut trajectory = vec![working.total];
        let mut temperature = self.sa_initial_temperature;

        debug!(
            "annealing from {} groups at temperature {}",
            working.n_icc(),
            temperature
        );

        for iteration in 0..self.sa_max_iterations {
            if iteration % self.sa_update_schedule == 0 {
                temperature =
                    self.sa_initial_temperature / (1.0 + ((1 + iteration) as f64).ln());
                if temperature < self.sa_temperature_floor {
                    debug!("temperature floor reached at iteration {}", iteration);
                    break;
                }
            }

            let proposal = match self.propose(scorer, &working) {
                Some(proposal) => proposal,
                // A one-variable system has no moves at all.
                None => break,
            };
            let delta = proposal.delta();
            trajectory.push(working.total + delta);

            let accept =
                delta >= 0.0 || self.rng.gen::<f64>() < (delta / temperature).exp();
            if accept {
                proposal.apply(&mut working);
                if working.total > best.total {
                    trace!(
                        "iteration {}: new best log-evidence {}",
                        iteration,
                        working.total
                    );
                    best = working.clone();
                }
            }
        }

        // The walk rarely ends exactly on a local optimum; greedy merging
        // from the best visited partition is cheap and only improves it.
        merge_to_local_optimum(scorer, &mut best, &mut trajectory);

        debug!("annealing best log-evidence {}", best.total);
        Ok(self.record(
            SearchMethod::SimulatedAnnealing,
            Some(initial),
            best,
            trajectory,
            n,
        ))
    }

    /// Greedy agglomerative merging: at every level, evaluates all pairwise
    /// group merges and commits the single best one, even when it lowers the
    /// score, until the complete model is reached. The reported result is
    /// the best level visited, not necessarily the last. Defaults to the
    /// independence model when `mcm_in` is not given.
    pub fn hierarchical_greedy_merging(
        &mut self,
        scorer: &Scorer,
        mcm_in: Option<&Partition>,
    ) -> Result<Partition> {
        let n = scorer.table().n();
        let initial = SearchEngine::resolve_mcm_in(scorer, mcm_in, Partition::independent)?;

        let mut working = Working::from_partition(scorer, &initial);
        let mut best = working.clone();
        let mut trajectory = vec![working.total];

        while working.n_icc() > 1 {
            let (i, j, merged_evidence, delta) = best_merge(scorer, &working);
            trace!(
                "merging groups {} and {}: log-evidence change {}",
                i,
                j,
                delta
            );
            commit_merge(&mut working, i, j, merged_evidence, delta);
            trajectory.push(working.total);
            if working.total > best.total {
                best = working.clone();
            }
        }

        debug!("greedy merging best log-evidence {}", best.total);
        Ok(self.record(
            SearchMethod::GreedyMerging,
            Some(initial),
            best,
            trajectory,
            n,
        ))
    }

    /// Greedy divisive search, the mirror of merging: starting from the
    /// complete model, every step evaluates moving each variable housed in a
    /// multi-variable group into every other existing group or a fresh
    /// singleton, and commits the single best move. A strictly improving move
    /// is preferred; otherwise the best group-splitting move is committed
    /// (even when it lowers the score) so the search always reaches the
    /// independence model. The reported result is the best level visited.
    /// Defaults to the complete model when `mcm_in` is not given.
    pub fn hierarchical_greedy_divisive(
        &mut self,
        scorer: &Scorer,
        mcm_in: Option<&Partition>,
    ) -> Result<Partition> {
        let n = scorer.table().n();
        let initial = SearchEngine::resolve_mcm_in(scorer, mcm_in, Partition::complete)?;

        let mut working = Working::from_partition(scorer, &initial);
        let mut best = working.clone();
        let mut trajectory = vec![working.total];

        while working.groups.iter().any(|g| g.len() > 1) {
            let candidate = best_variable_move(scorer, &working);
            trace!(
                "moving variable {} out of group {}: log-evidence change {}",
                candidate.variable,
                candidate.source,
                candidate.delta
            );
            candidate.apply(&mut working);
            trajectory.push(working.total);
            if working.total > best.total {
                best = working.clone();
            }
        }

        debug!("greedy division best log-evidence {}", best.total);
        Ok(self.record(
            SearchMethod::GreedyDivisive,
            Some(initial),
            best,
            trajectory,
            n,
        ))
    }

    fn record(
        &mut self,
        method: SearchMethod,
        mcm_in: Option<Partition>,
        best: Working,
        trajectory: Vec<f64>,
        n: usize,
    ) -> Partition {
        let mcm_out = best.into_partition(n);
        self.run = Some(Run {
            method,
            mcm_in,
            mcm_out: mcm_out.clone(),
            trajectory,
        });
        mcm_out
    }

    /// Draws one elementary move uniformly among the kinds applicable to the
    /// working partition, or `None` if no move exists.
    fn propose(&mut self, scorer: &Scorer, working: &Working) -> Option<Proposal> {
        let can_merge = working.n_icc() >= 2;
        let splittable: Vec<usize> = (0..working.n_icc())
            .filter(|&g| working.groups[g].len() >= 2)
            .collect();
        let can_split = !splittable.is_empty();
        let can_move = can_merge && can_split;

        let mut kinds = Vec::with_capacity(3);
        if can_merge {
            kinds.push(0);
        }
        if can_split {
            kinds.push(1);
        }
        if can_move {
            kinds.push(2);
        }
        let kind = *pick(&mut self.rng, &kinds)?;

        Some(match kind {
            0 => {
                let i = self.rng.gen_range(0..working.n_icc());
                let mut j = self.rng.gen_range(0..working.n_icc() - 1);
                if j >= i {
                    j += 1;
                }
                let (i, j) = (i.min(j), i.max(j));
                let merged = working.groups[i].union(&working.groups[j]);
                let merged_evidence = scorer.log_evidence_of_group(&merged);
                let delta = merged_evidence - working.per_icc[i] - working.per_icc[j];
                Proposal::Merge {
                    i,
                    j,
                    merged_evidence,
                    delta,
                }
            }
            1 => {
                let g = *pick(&mut self.rng, &splittable).unwrap();
                let mut members: Vec<usize> = working.groups[g].iter().collect();
                members.shuffle(&mut self.rng);
                let cut = self.rng.gen_range(1..members.len());
                let left: VariableSet = members[..cut].iter().copied().collect();
                let right: VariableSet = members[cut..].iter().copied().collect();
                let left_evidence = scorer.log_evidence_of_group(&left);
                let right_evidence = scorer.log_evidence_of_group(&right);
                let delta = left_evidence + right_evidence - working.per_icc[g];
                Proposal::Split {
                    g,
                    left,
                    right,
                    left_evidence,
                    right_evidence,
                    delta,
                }
            }
            _ => {
                let source = *pick(&mut self.rng, &splittable).unwrap();
                let members: Vec<usize> = working.groups[source].iter().collect();
                let variable = *pick(&mut self.rng, &members).unwrap();
                let mut target = self.rng.gen_range(0..working.n_icc() - 1);
                if target >= source {
                    target += 1;
                }
                let shrunk = working.groups[source].without(variable);
                let grown = working.groups[target].union(&VariableSet::new(&[variable]));
                let shrunk_evidence = scorer.log_evidence_of_group(&shrunk);
                let grown_evidence = scorer.log_evidence_of_group(&grown);
                let delta = shrunk_evidence + grown_evidence
                    - working.per_icc[source]
                    - working.per_icc[target];
                Proposal::Move {
                    source,
                    target,
                    shrunk,
                    grown,
                    shrunk_evidence,
                    grown_evidence,
                    delta,
                }
            }
        })
    }
}

fn pick<'a, T>(rng: &mut StdRng, options: &'a [T]) -> Option<&'a T> {
    options.choose(rng)
}

/// One evaluated annealing proposal, ready to apply.
enum Proposal {
    Merge {
        i: usize,
        j: usize,
        merged_evidence: f64,
        delta: f64,
    },
    Split {
        g: usize,
        left: VariableSet,
        right: VariableSet,
        left_evidence: f64,
        right_evidence: f64,
        delta: f64,
    },
    Move {
        source: usize,
        target: usize,
        shrunk: VariableSet,
        grown: VariableSet,
        shrunk_evidence: f64,
        grown_evidence: f64,
        delta: f64,
    },
}

impl Proposal {
    fn delta(&self) -> f64 {
        match self {
            Proposal::Merge { delta, .. }
            | Proposal::Split { delta, .. }
            | Proposal::Move { delta, .. } => *delta,
        }
    }

    fn apply(self, working: &mut Working) {
        let delta = self.delta();
        match self {
            Proposal::Merge {
                i,
                j,
                merged_evidence,
                ..
            } => {
                let other = working.groups.remove(j);
                working.per_icc.remove(j);
                working.groups[i] = working.groups[i].union(&other);
                working.per_icc[i] = merged_evidence;
            }
            Proposal::Split {
                g,
                left,
                right,
                left_evidence,
                right_evidence,
                ..
            } => {
                working.groups[g] = left;
                working.per_icc[g] = left_evidence;
                working.groups.push(right);
                working.per_icc.push(right_evidence);
            }
            Proposal::Move {
                source,
                target,
                shrunk,
                grown,
                shrunk_evidence,
                grown_evidence,
                ..
            } => {
                working.groups[source] = shrunk;
                working.per_icc[source] = shrunk_evidence;
                working.groups[target] = grown;
                working.per_icc[target] = grown_evidence;
            }
        }
        working.total += delta;
    }
}

/// The best pairwise merge of the working partition: `(i, j, merged evidence,
/// score change)`, ties broken by the first (lowest-index) pair.
fn best_merge(scorer: &Scorer, working: &Working) -> (usize, usize, f64, f64) {
    debug_assert!(working.n_icc() >= 2);
    let mut best: Option<(usize, usize, f64, f64)> = None;
    for i in 0..working.n_icc() {
        for j in (i + 1)..working.n_icc() {
            let merged = working.groups[i].union(&working.groups[j]);
            let merged_evidence = scorer.log_evidence_of_group(&merged);
            let delta = merged_evidence - working.per_icc[i] - working.per_icc[j];
            if best.map_or(true, |(_, _, _, best_delta)| delta > best_delta) {
                best = Some((i, j, merged_evidence, delta));
            }
        }
    }
    best.expect("at least two groups to merge")
}

fn commit_merge(working: &mut Working, i: usize, j: usize, merged_evidence: f64, delta: f64) {
    let other = working.groups.remove(j);
    working.per_icc.remove(j);
    working.groups[i] = working.groups[i].union(&other);
    working.per_icc[i] = merged_evidence;
    working.total += delta;
}

/// Repeatedly commits the best strictly-improving merge. This is the
/// agglomerative procedure run to its natural stopping point, used to polish
/// the annealer's best partition.
fn merge_to_local_optimum(scorer: &Scorer, working: &mut Working, trajectory: &mut Vec<f64>) {
    while working.n_icc() > 1 {
        let (i, j, merged_evidence, delta) = best_merge(scorer, working);
        if delta <= 0.0 {
            break;
        }
        commit_merge(working, i, j, merged_evidence, delta);
        trajectory.push(working.total);
    }
}

/// One committed divisive step: variable `variable` leaves group `source` for
/// either group `target` or a fresh singleton.
#[derive(Clone)]
struct VariableMove {
    variable: usize,
    source: usize,
    /// `None` means a new singleton group.
    target: Option<usize>,
    shrunk_evidence: f64,
    grown_evidence: f64,
    delta: f64,
}

impl VariableMove {
    fn apply(self, working: &mut Working) {
        working.groups[self.source].remove(self.variable);
        working.per_icc[self.source] = self.shrunk_evidence;
        match self.target {
            Some(target) => {
                working.groups[target].insert(self.variable);
                working.per_icc[target] = self.grown_evidence;
            }
            None => {
                working.groups.push(VariableSet::new(&[self.variable]));
                working.per_icc.push(self.grown_evidence);
            }
        }
        working.total += self.delta;
    }
}

/// Evaluates every candidate move of a variable out of a multi-variable group
/// and picks the committed one: the best strictly-improving move if any
/// exists, otherwise the best singleton-creating move, so the partition
/// always makes progress toward the independence model. Ties break toward
/// the lowest variable, then the lowest target.
fn best_variable_move(scorer: &Scorer, working: &Working) -> VariableMove {
    fn better_than(candidate: &VariableMove, best: &Option<VariableMove>) -> bool {
        best.as_ref().map_or(true, |b| candidate.delta > b.delta)
    }

    let mut best_improving: Option<VariableMove> = None;
    let mut best_splitting: Option<VariableMove> = None;

    for source in 0..working.n_icc() {
        if working.groups[source].len() < 2 {
            continue;
        }
        for variable in working.groups[source].iter() {
            let shrunk = working.groups[source].without(variable);
            let shrunk_evidence = scorer.log_evidence_of_group(&shrunk);
            let freed = shrunk_evidence - working.per_icc[source];

            // A fresh singleton destination.
            let singleton_evidence =
                scorer.log_evidence_of_group(&VariableSet::new(&[variable]));
            let candidate = VariableMove {
                variable,
                source,
                target: None,
                shrunk_evidence,
                grown_evidence: singleton_evidence,
                delta: freed + singleton_evidence,
            };
            if better_than(&candidate, &best_splitting) {
                best_splitting = Some(candidate.clone());
            }
            if candidate.delta > 0.0 && better_than(&candidate, &best_improving) {
                best_improving = Some(candidate);
            }

            // Every other existing group as a destination.
            for target in 0..working.n_icc() {
                if target == source {
                    continue;
                }
                let grown = working.groups[target].union(&VariableSet::new(&[variable]));
                let grown_evidence = scorer.log_evidence_of_group(&grown);
                let candidate = VariableMove {
                    variable,
                    source,
                    target: Some(target),
                    shrunk_evidence,
                    grown_evidence,
                    delta: freed + grown_evidence - working.per_icc[target],
                };
                if candidate.delta > 0.0 && better_than(&candidate, &best_improving) {
                    best_improving = Some(candidate);
                }
            }
        }
    }

    best_improving
        .or(best_splitting)
        .expect("some group still has two variables")
}

/// Expands a restricted growth string into canonical groups.
fn groups_from_rgs(rgs: &[usize]) -> Vec<VariableSet> {
    let mut groups: Vec<VariableSet> = Vec::new();
    for (v, &label) in rgs.iter().enumerate() {
        if label == groups.len() {
            groups.push(VariableSet::new(&[v]));
        } else {
            groups[label].insert(v);
        }
    }
    groups
}

/// Advances `a` to the next restricted growth string, maintaining in `b` the
/// bound `b[v] = 1 + max(a[..v])`. Returns `false` once every string has been
/// generated. Visiting all strings visits every set-partition exactly once,
/// Bell(n) in total.
fn next_rgs(a: &mut [usize], b: &mut [usize]) -> bool {
    let n = a.len();
    if n <= 1 {
        return false;
    }
    if a[n - 1] != b[n - 1] {
        a[n - 1] += 1;
        return true;
    }
    let mut j = n - 2;
    while j > 0 && a[j] == b[j] {
        j -= 1;
    }
    if j == 0 {
        return false;
    }
    a[j] += 1;
    if a[j] == b[j] {
        b[j + 1] = b[j] + 1;
    }
    for i in (j + 1)..n {
        a[i] = 0;
        b[i] = b[j + 1];
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count_rgs(n: usize) -> usize {
        let mut a = vec![0usize; n];
        let mut b = vec![1usize; n];
        let mut count = 1;
        while next_rgs(&mut a, &mut b) {
            count += 1;
        }
        count
    }

    #[test]
    fn rgs_counts_are_bell_numbers() {
        assert_eq!(count_rgs(1), 1);
        assert_eq!(count_rgs(2), 2);
        assert_eq!(count_rgs(3), 5);
        assert_eq!(count_rgs(4), 15);
        assert_eq!(count_rgs(5), 52);
        assert_eq!(count_rgs(6), 203);
    }

    #[test]
    fn rgs_strings_are_unique_partitions() {
        use std::collections::HashSet;
        let mut a = vec![0usize; 4];
        let mut b = vec![1usize; 4];
        let mut seen = HashSet::new();
        loop {
            assert!(seen.insert(a.clone()), "duplicate partition {:?}", a);
            if !next_rgs(&mut a, &mut b) {
                break;
            }
        }
        assert_eq!(seen.len(), 15);
    }
}
