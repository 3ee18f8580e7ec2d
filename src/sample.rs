//! Storage and ingestion of observed samples.
//!
//! A [`SampleTable`] holds `N` jointly observed outcomes of `n` categorical
//! variables, each with the same alphabet `0..q`. Rows are bit-packed into
//! `u128` words, `ceil(log2 q)` bits per variable, and deduplicated into
//! (state, count) pairs. The number of observations usually dwarfs the number
//! of distinct outcomes, so all downstream statistics run over unique states.
//! The packing also makes per-group statistics a single mask-and-count pass:
//! a group of variables is a bitmask, and a sample's joint outcome within that
//! group is `state & mask`.

use crate::error::{McmError, Result};
use crate::partition::{Partition, VariableSet};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// An immutable table of `N` observed rows of `n` categorical values in
/// `[0, q)`.
#[derive(Clone, Debug)]
pub struct SampleTable {
    n: usize,
    q: usize,
    n_samples: u32,
    bits_per_var: u32,
    /// Unique packed rows with their observation counts, in ascending state
    /// order so that iteration is deterministic.
    states: Vec<(u128, u32)>,
}

impl SampleTable {
    fn check_dimensions(n: usize, q: usize) -> Result<u32> {
        if n < 1 {
            return Err(McmError::range("The system size should be at least 1."));
        }
        if q < 2 {
            return Err(McmError::range(
                "The number of states per variable should be at least 2.",
            ));
        }
        let bits_per_var = (q as f64).log2().ceil() as u32;
        if n as u32 * bits_per_var > 128 {
            return Err(McmError::range(
                "The dataset does not fit in 128 bits per sample.",
            ));
        }
        Ok(bits_per_var)
    }

    /// Builds a table from in-memory rows. The table must contain at least
    /// one row (`RangeError` otherwise), and every row must have exactly `n`
    /// values (`ShapeError` otherwise), each in `[0, q)` (`RangeError`
    /// otherwise).
    pub fn from_rows(rows: &[Vec<u8>], n: usize, q: usize) -> Result<Self> {
        let bits_per_var = SampleTable::check_dimensions(n, q)?;
        if rows.is_empty() {
            return Err(McmError::range(
                "The dataset should contain at least one sample.",
            ));
        }
        let mut counts = BTreeMap::new();
        for row in rows {
            if row.len() != n {
                return Err(McmError::shape("Each row should contain exactly n values."));
            }
            let mut state: u128 = 0;
            for (i, &value) in row.iter().enumerate() {
                if value as usize >= q {
                    return Err(McmError::range(
                        "The dataset should only contain values between 0 and q-1.",
                    ));
                }
                state |= (value as u128) << (i as u32 * bits_per_var);
            }
            *counts.entry(state).or_insert(0u32) += 1;
        }
        Ok(SampleTable {
            n,
            q,
            n_samples: rows.len() as u32,
            bits_per_var,
            states: counts.into_iter().collect(),
        })
    }

    /// Loads a table from the persisted dataset format: one row per line, the
    /// first `n` bytes of each line being ASCII digits in `[0, q)`. The
    /// remainder of a line is ignored. `n` and `q` are supplied by the
    /// caller, never inferred.
    pub fn from_file<P: AsRef<Path>>(path: P, n: usize, q: usize) -> Result<Self> {
        SampleTable::from_reader(BufReader::new(File::open(path)?), n, q)
    }

    /// Like [`from_file`](SampleTable::from_file), reading from any buffered
    /// source. Malformed lines fail with a `FormatError` naming the line.
    pub fn from_reader<R: BufRead>(reader: R, n: usize, q: usize) -> Result<Self> {
        let bits_per_var = SampleTable::check_dimensions(n, q)?;
        if q > 10 {
            return Err(McmError::range(
                "The persisted format stores one digit per value, so q is at most 10.",
            ));
        }
        let mut counts = BTreeMap::new();
        let mut n_samples: u32 = 0;
        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let bytes = line.as_bytes();
            if bytes.len() < n {
                return Err(McmError::format(format!(
                    "line {}: contains fewer than n values",
                    lineno + 1
                )));
            }
            let mut state: u128 = 0;
            for (i, &byte) in bytes[..n].iter().enumerate() {
                let value = byte.wrapping_sub(b'0');
                if value as usize >= q {
                    return Err(McmError::format(format!(
                        "line {}: the dataset should only contain values between 0 and q-1",
                        lineno + 1
                    )));
                }
                state |= (value as u128) << (i as u32 * bits_per_var);
            }
            *counts.entry(state).or_insert(0u32) += 1;
            n_samples += 1;
        }
        if n_samples == 0 {
            return Err(McmError::range(
                "The dataset should contain at least one sample.",
            ));
        }
        Ok(SampleTable {
            n,
            q,
            n_samples,
            bits_per_var,
            states: counts.into_iter().collect(),
        })
    }

    /// Writes this table in the persisted dataset format, one row per line,
    /// repeating rows according to their counts.
    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        if self.q > 10 {
            return Err(McmError::range(
                "The persisted format stores one digit per value, so q is at most 10.",
            ));
        }
        let mut out = BufWriter::new(File::create(path)?);
        let mut line = vec![0u8; self.n + 1];
        line[self.n] = b'\n';
        for &(state, count) in &self.states {
            for (i, byte) in line[..self.n].iter_mut().enumerate() {
                *byte = b'0' + self.value(state, i);
            }
            for _ in 0..count {
                out.write_all(&line)?;
            }
        }
        out.flush()?;
        Ok(())
    }

    /// The number of variables per row.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The alphabet size shared by all variables.
    pub fn q(&self) -> usize {
        self.q
    }

    /// The total number of observed rows, counting duplicates.
    pub fn n_samples(&self) -> u32 {
        self.n_samples
    }

    /// The number of distinct rows.
    pub fn n_unique(&self) -> usize {
        self.states.len()
    }

    /// Decodes the table back into plain rows, one per distinct state, paired
    /// with its count.
    pub fn unique_rows(&self) -> impl Iterator<Item = (Vec<u8>, u32)> + '_ {
        self.states.iter().map(move |&(state, count)| {
            ((0..self.n).map(|i| self.value(state, i)).collect(), count)
        })
    }

    /// The Shannon entropy of the joint outcome distribution, in base-`q`
    /// units. A cheap diagnostic: it is `n` for uniform noise and lower for
    /// structured data.
    pub fn entropy(&self) -> f64 {
        let total = f64::from(self.n_samples);
        let ln_q = (self.q as f64).ln();
        self.states
            .iter()
            .map(|&(_, count)| {
                let p = f64::from(count) / total;
                -p * p.ln() / ln_q
            })
            .sum()
    }

    pub(crate) fn states(&self) -> &[(u128, u32)] {
        &self.states
    }

    pub(crate) fn value(&self, state: u128, variable: usize) -> u8 {
        let mask = (1u128 << self.bits_per_var) - 1;
        ((state >> (variable as u32 * self.bits_per_var)) & mask) as u8
    }

    /// The bitmask selecting every variable in `set`.
    pub(crate) fn mask_of(&self, set: &VariableSet) -> u128 {
        let var_mask = (1u128 << self.bits_per_var) - 1;
        set.iter()
            .map(|v| var_mask << (v as u32 * self.bits_per_var))
            .fold(0, |acc, m| acc | m)
    }
}

impl Partition {
    /// Samples `n_samples` synthetic rows from the model this partition
    /// describes, fitted to `table`: each group's joint outcome is drawn
    /// i.i.d. from that group's empirical frequencies in `table`, and groups
    /// are sampled independently of each other.
    ///
    /// Fails with a `StateError` unless every variable is assigned
    /// (`rank == n`), and with a `RangeError` if the partition and table
    /// disagree on `n` or `n_samples` is zero.
    pub fn generate_data_object<R: Rng + ?Sized>(
        &self,
        n_samples: u32,
        table: &SampleTable,
        rng: &mut R,
    ) -> Result<SampleTable> {
        if self.n() != table.n() {
            return Err(McmError::range(
                "Number of variables in the data doesn't match the number of variables in the given MCM.",
            ));
        }
        if n_samples == 0 {
            return Err(McmError::range(
                "The dataset should contain at least one sample.",
            ));
        }
        if self.rank() != self.n() {
            return Err(McmError::state(
                "Synthetic data can only be generated when every variable is assigned to a group.",
            ));
        }

        // One empirical joint distribution per group, over that group's
        // observed masked states.
        let samplers: Vec<(Vec<u128>, WeightedIndex<u32>)> = self
            .groups()
            .iter()
            .map(|group| {
                let mask = table.mask_of(group);
                let mut counts = BTreeMap::new();
                for &(state, count) in table.states() {
                    *counts.entry(state & mask).or_insert(0u32) += count;
                }
                let (states, weights): (Vec<u128>, Vec<u32>) = counts.into_iter().unzip();
                let sampler = WeightedIndex::new(weights)
                    .expect("a sample table always has at least one observed state");
                (states, sampler)
            })
            .collect();

        let mut counts = BTreeMap::new();
        for _ in 0..n_samples {
            let mut state: u128 = 0;
            for (states, sampler) in &samplers {
                state |= states[sampler.sample(rng)];
            }
            *counts.entry(state).or_insert(0u32) += 1;
        }
        Ok(SampleTable {
            n: table.n(),
            q: table.q(),
            n_samples,
            bits_per_var: table.bits_per_var,
            states: counts.into_iter().collect(),
        })
    }

    /// Like [`generate_data_object`](Partition::generate_data_object), but
    /// writes the sampled rows to `path` in the persisted dataset format.
    pub fn generate_data_file<R: Rng + ?Sized, P: AsRef<Path>>(
        &self,
        n_samples: u32,
        table: &SampleTable,
        rng: &mut R,
        path: P,
    ) -> Result<()> {
        self.generate_data_object(n_samples, table, rng)?
            .write_file(path)
    }
}
