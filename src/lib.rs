#![warn(missing_docs)]
#![doc(test(no_crate_inject))]
#![doc(test(attr(deny(unused, future_incompatible))))]

//! This crate provides an implementation of Minimally Complex Model selection,
//! as described by these papers:
//!
//! - de Mulatier, Mazza, Marsili, [Statistical Inference of Minimally Complex
//!   Models][mcm], 2021
//! - Rissanen, [Fisher Information and Stochastic Complexity][nml], 1996, for
//!   the description-length expansion
//!
//! [mcm]: https://arxiv.org/abs/2008.00520
//! [nml]: https://ieeexplore.ieee.org/document/481776
//!
//! An MCM partitions `n` categorical variables (all sharing an alphabet of `q`
//! outcomes) into independent complete components: within a group every
//! interaction is retained, and distinct groups are statistically independent.
//! That structure gives the model's Bayesian evidence a closed form that is a
//! sum over groups, so comparing partitions never requires fitting anything.
//!
//! The crate splits the problem across four types:
//!
//! - [`SampleTable`] ingests and stores the observed rows,
//! - [`Partition`] represents one candidate grouping,
//! - [`Scorer`] computes exact and asymptotic scores of a partition over a
//!   table,
//! - [`SearchEngine`] looks for the best-scoring partition, exhaustively or
//!   heuristically.

pub use sorted_iter;

pub mod codec;
mod error;
mod partition;
mod sample;
mod scorer;
mod search;

pub use crate::codec::PartitionArray;
pub use crate::error::{McmError, Result};
pub use crate::partition::{Partition, PartitionInit, VariableSet};
pub use crate::sample::SampleTable;
pub use crate::scorer::Scorer;
pub use crate::search::{SearchEngine, SearchMethod};
