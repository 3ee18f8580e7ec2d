//! Partitions of a set of categorical variables into independent groups.
//!
//! A [`Partition`] assigns each of `n` variables (indexed `0..n`) to at most
//! one group, called an ICC (independent complete component). Group labels are
//! always contiguous: if the partition has `k` groups, their labels are
//! exactly `0..k`, assigned at construction in order of each group's smallest
//! member. Mutations preserve contiguity but not that ordering, so group
//! indices are only stable between mutations, never across them.

use crate::codec;
use crate::error::{McmError, Result};
use rand::Rng;
use smallvec::SmallVec;
use sorted_iter::assume::AssumeSortedByItemExt;
use sorted_iter::sorted_iterator::SortedByItem;
use sorted_iter::SortedIterator;
use std::iter;

/// A set of variable indices, kept sorted and deduplicated.
///
/// Sets smaller than the inline capacity avoid heap allocations, which matters
/// because search strategies build and discard millions of candidate groups.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableSet(SmallVec<[usize; 2]>);

impl VariableSet {
    /// Creates a variable set containing the specified variables.
    ///
    /// It's okay if the provided slice contains duplicates.
    pub fn new(ids: &[usize]) -> Self {
        let mut v = SmallVec::from_slice(ids);
        v.sort_unstable();
        v.dedup();
        VariableSet(v)
    }

    /// The number of variables in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the set contains no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the variables in this set, in ascending order.
    ///
    /// ```
    /// use mincomp::VariableSet;
    ///
    /// let abc = VariableSet::new(&[2, 3, 1]);
    /// let mut it = abc.iter();
    /// assert_eq!(it.next(), Some(1));
    /// assert_eq!(it.next(), Some(2));
    /// assert_eq!(it.next(), Some(3));
    /// assert_eq!(it.next(), None);
    /// ```
    pub fn iter(&self) -> impl Iterator<Item = usize> + SortedByItem + Clone + '_ {
        self.0.iter().copied().assume_sorted_by_item()
    }

    /// Returns `true` if the given variable is in this set.
    pub fn contains(&self, variable: usize) -> bool {
        self.0.binary_search(&variable).is_ok()
    }

    /// The smallest variable in this set, if any.
    pub fn smallest(&self) -> Option<usize> {
        self.0.first().copied()
    }

    /// Returns the union of this set with another.
    pub fn union(&self, other: &Self) -> Self {
        self.iter().union(other.iter()).collect()
    }

    /// Returns `true` if the two sets share no variables.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.iter().intersection(other.iter()).next().is_none()
    }

    /// Adds a variable to the set. Adding a variable twice is a no-op.
    pub(crate) fn insert(&mut self, variable: usize) {
        if let Err(at) = self.0.binary_search(&variable) {
            self.0.insert(at, variable);
        }
    }

    /// Removes a variable from the set, if present.
    pub(crate) fn remove(&mut self, variable: usize) {
        if let Ok(at) = self.0.binary_search(&variable) {
            self.0.remove(at);
        }
    }

    /// Returns a copy of this set without the given variable.
    pub(crate) fn without(&self, variable: usize) -> Self {
        let mut copy = self.clone();
        copy.remove(variable);
        copy
    }
}

impl std::fmt::Debug for VariableSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

impl iter::FromIterator<usize> for VariableSet {
    /// Creates a variable set containing the specified variables.
    ///
    /// It's okay if the provided iterator contains duplicates.
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut v = SmallVec::from_iter(iter);
        v.sort_unstable();
        v.dedup();
        VariableSet(v)
    }
}

/// The ways a [`Partition`] can be constructed.
///
/// Raw label vectors and membership matrices are validated and canonicalized
/// once, at this boundary; afterwards the partition lives in a single internal
/// representation.
#[derive(Clone, Debug)]
pub enum PartitionInit {
    /// One entry per variable: the group label, or any negative value for an
    /// unassigned variable. Labels may be arbitrary (non-contiguous, out of
    /// order); they are canonicalized by first occurrence.
    Labels(Vec<i64>),
    /// One row per group, one 0/1 column per variable.
    Matrix(Vec<Vec<u8>>),
    /// Every variable in its own group (`n_icc == n`).
    Independent,
    /// All variables in a single group (`n_icc == 1`).
    Complete,
    /// Each variable assigned to a uniformly random group.
    Random,
}

/// A mutable partition of `{0..n-1}` into contiguously-labeled groups,
/// possibly leaving some variables unassigned.
///
/// ```
/// use mincomp::{Partition, PartitionInit};
///
/// // Labels 7 and 3 are canonicalized by first occurrence to 0 and 1.
/// let p = Partition::new(4, PartitionInit::Labels(vec![7, 3, 7, -1])).unwrap();
/// assert_eq!(p.labels(), vec![0, 1, 0, -1]);
/// assert_eq!(p.n_icc(), 2);
/// assert_eq!(p.rank(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Partition {
    n: usize,
    groups: Vec<VariableSet>,
    optimized: bool,
    log_evidence: f64,
    log_evidence_per_icc: Vec<f64>,
}

impl Partition {
    /// Constructs a partition of `n` variables from the given specification.
    ///
    /// Fails with a `RangeError` when an index or column count disagrees with
    /// `n`, and with a `ValueError` when matrix entries are not 0/1 or a
    /// variable is assigned to more than one group.
    pub fn new(n: usize, init: PartitionInit) -> Result<Self> {
        let groups = match init {
            PartitionInit::Labels(labels) => codec::groups_from_labels(n, &labels)?,
            PartitionInit::Matrix(rows) => codec::groups_from_matrix(n, &rows)?,
            PartitionInit::Independent => (0..n).map(|v| VariableSet::new(&[v])).collect(),
            PartitionInit::Complete => vec![(0..n).collect()],
            PartitionInit::Random => {
                return Ok(Partition::random(n, &mut rand::thread_rng()));
            }
        };
        Ok(Partition::from_groups(n, groups))
    }

    /// The independence model: every variable in its own group.
    pub fn independent(n: usize) -> Self {
        Partition::from_groups(n, (0..n).map(|v| VariableSet::new(&[v])).collect())
    }

    /// The complete model: all variables in one group.
    pub fn complete(n: usize) -> Self {
        Partition::from_groups(n, vec![(0..n).collect()])
    }

    /// A random partition of all `n` variables into nonempty groups, drawn by
    /// assigning each variable a uniform group label and dropping empty
    /// groups.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let labels: Vec<i64> = (0..n).map(|_| rng.gen_range(0..n.max(1)) as i64).collect();
        let groups = codec::groups_from_labels(n, &labels).expect("generated labels are in range");
        Partition::from_groups(n, groups)
    }

    /// Constructs a partition from a label vector. See
    /// [`PartitionInit::Labels`].
    pub fn from_labels(n: usize, labels: &[i64]) -> Result<Self> {
        Ok(Partition::from_groups(n, codec::groups_from_labels(n, labels)?))
    }

    /// Constructs a partition from a membership matrix. See
    /// [`PartitionInit::Matrix`].
    pub fn from_matrix(n: usize, rows: &[Vec<u8>]) -> Result<Self> {
        Ok(Partition::from_groups(n, codec::groups_from_matrix(n, rows)?))
    }

    /// Constructs a partition from a dynamically-shaped array: a 1-D array is
    /// interpreted as a label vector and a 2-D array as a membership matrix.
    /// Anything else fails with a `ShapeError`.
    pub fn from_array(n: usize, array: &codec::PartitionArray) -> Result<Self> {
        Ok(Partition::from_groups(n, codec::groups_from_array(n, array)?))
    }

    pub(crate) fn from_groups(n: usize, groups: Vec<VariableSet>) -> Self {
        debug_assert!(groups.iter().all(|g| !g.is_empty()));
        Partition {
            n,
            groups,
            optimized: false,
            log_evidence: f64::NEG_INFINITY,
            log_evidence_per_icc: Vec::new(),
        }
    }

    /// The number of variables this partition is over, assigned or not.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The number of groups (ICCs).
    pub fn n_icc(&self) -> usize {
        self.groups.len()
    }

    /// The number of variables assigned to some group.
    pub fn rank(&self) -> usize {
        self.groups.iter().map(VariableSet::len).sum()
    }

    /// Returns `true` once a search engine has annotated this partition as the
    /// best partition of a completed run. Cleared by any mutation.
    pub fn is_optimized(&self) -> bool {
        self.optimized
    }

    /// The groups of this partition, indexed by current group label.
    pub fn groups(&self) -> &[VariableSet] {
        &self.groups
    }

    /// The members of group `g`.
    ///
    /// # Panics
    ///
    /// Panics if `g >= n_icc()`.
    pub fn group(&self, g: usize) -> &VariableSet {
        &self.groups[g]
    }

    /// The group label of variable `v`, or `None` if it is unassigned.
    pub fn group_of(&self, v: usize) -> Option<usize> {
        self.groups.iter().position(|g| g.contains(v))
    }

    /// The label-vector representation: entry `v` is the group label of
    /// variable `v`, or `-1` if unassigned.
    pub fn labels(&self) -> Vec<i64> {
        codec::labels_from_groups(self.n, &self.groups)
    }

    /// The membership-matrix representation: one row of 0/1 per group.
    pub fn matrix(&self) -> Vec<Vec<u8>> {
        codec::matrix_from_groups(self.n, &self.groups)
    }

    /// Returns `true` if both partitions assign the same variables to the same
    /// groups, regardless of group labels. This is the equality that holds
    /// between repeated nondeterministic search runs that find the same
    /// optimum.
    pub fn same_membership(&self, other: &Partition) -> bool {
        if self.n != other.n || self.groups.len() != other.groups.len() {
            return false;
        }
        let mut mine = self.groups.clone();
        let mut theirs = other.groups.clone();
        mine.sort();
        theirs.sort();
        mine == theirs
    }

    fn check_index(&self, v: usize) -> Result<()> {
        if v >= self.n {
            return Err(McmError::range(
                "The variable index should be between 0 and n-1.",
            ));
        }
        Ok(())
    }

    /// Moves the unassigned variable `v` into group `target_group`.
    ///
    /// If `target_group` names an existing group, `v` joins it; otherwise a
    /// new group is created at the next label. Callers must not assume the
    /// literal `target_group` value is preserved for new groups.
    ///
    /// ```
    /// use mincomp::Partition;
    ///
    /// let mut p = Partition::from_labels(3, &[0, 0, -1]).unwrap();
    /// p.move_variable_in(2, 99).unwrap();
    /// assert_eq!(p.labels(), vec![0, 0, 1]);
    /// ```
    pub fn move_variable_in(&mut self, v: usize, target_group: usize) -> Result<()> {
        self.check_index(v)?;
        if self.group_of(v).is_some() {
            return Err(McmError::state(
                "This variable is already present in the partition.",
            ));
        }
        if target_group < self.groups.len() {
            self.groups[target_group].insert(v);
        } else {
            self.groups.push(VariableSet::new(&[v]));
        }
        self.clear_annotation();
        Ok(())
    }

    /// Removes the assigned variable `v` from its group. If the group becomes
    /// empty it is deleted, and every higher group label shifts down by one to
    /// keep labels contiguous.
    pub fn move_variable_out(&mut self, v: usize) -> Result<()> {
        self.check_index(v)?;
        let g = self.group_of(v).ok_or_else(|| {
            McmError::state("This variable is not present in the partition.")
        })?;
        self.groups[g].remove(v);
        if self.groups[g].is_empty() {
            self.groups.remove(g);
        }
        self.clear_annotation();
        Ok(())
    }

    /// Moves the assigned variable `v` to `target_group`: an atomic
    /// [`move_variable_out`](Partition::move_variable_out) followed by
    /// [`move_variable_in`](Partition::move_variable_in). Note that the
    /// move-out may delete `v`'s old group and shift labels, so `target_group`
    /// is interpreted against the shifted labels.
    pub fn move_variable(&mut self, v: usize, target_group: usize) -> Result<()> {
        self.move_variable_out(v)?;
        self.move_variable_in(v, target_group)
    }

    /// The best total log-evidence recorded by a completed search.
    ///
    /// Fails with a `StateError` if no search has annotated this partition.
    pub fn log_evidence(&self) -> Result<f64> {
        if !self.optimized {
            return Err(McmError::state("No search has been ran yet."));
        }
        Ok(self.log_evidence)
    }

    /// The per-group log-evidence breakdown recorded by a completed search,
    /// indexed by group label.
    ///
    /// Fails with a `StateError` if no search has annotated this partition.
    pub fn log_evidence_per_icc(&self) -> Result<&[f64]> {
        if !self.optimized {
            return Err(McmError::state("No search has been ran yet."));
        }
        Ok(&self.log_evidence_per_icc)
    }

    pub(crate) fn annotate(&mut self, log_evidence: f64, per_icc: Vec<f64>) {
        debug_assert_eq!(per_icc.len(), self.groups.len());
        self.optimized = true;
        self.log_evidence = log_evidence;
        self.log_evidence_per_icc = per_icc;
    }

    fn clear_annotation(&mut self) {
        self.optimized = false;
        self.log_evidence = f64::NEG_INFINITY;
        self.log_evidence_per_icc.clear();
    }
}
