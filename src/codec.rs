//! Canonicalization of raw partition inputs.
//!
//! Raw partitions arrive as label vectors or membership matrices with
//! arbitrary spelling. This module validates them once and rewrites them into
//! the canonical form: group labels `0..k` assigned by first occurrence when
//! scanning variables in index order (equivalently, ordered by each group's
//! smallest member), with any negative label meaning "unassigned". Identical
//! partitions spelled differently therefore compare equal after construction.

use crate::error::{McmError, Result};
use crate::partition::VariableSet;
use std::collections::HashMap;

/// A dynamically-shaped partition input: a flat buffer plus its shape.
///
/// This is the tagged union at the crate boundary. A 1-D array is a label
/// vector, a 2-D array is a membership matrix, and anything else is rejected
/// with a `ShapeError` by [`Partition::from_array`][crate::Partition::from_array].
#[derive(Clone, Debug)]
pub struct PartitionArray {
    shape: Vec<usize>,
    data: Vec<i64>,
}

impl PartitionArray {
    /// Wraps a flat buffer with its shape.
    ///
    /// Fails with a `ValueError` if the shape does not account for exactly
    /// `data.len()` elements.
    pub fn new(shape: &[usize], data: Vec<i64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(McmError::value(
                "The array shape does not match the number of elements.",
            ));
        }
        Ok(PartitionArray {
            shape: shape.to_vec(),
            data,
        })
    }

    /// The shape of the array, one extent per dimension.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
}

/// Rewrites a label vector into canonical form: each label's first occurrence
/// is assigned the next unused index, and every negative label becomes `-1`.
///
/// Canonicalization is idempotent.
///
/// ```
/// use mincomp::codec::canonicalize_labels;
///
/// let canonical = canonicalize_labels(&[9, -3, 9, 4]);
/// assert_eq!(canonical, vec![0, -1, 0, 1]);
/// assert_eq!(canonicalize_labels(&canonical), canonical);
/// ```
pub fn canonicalize_labels(labels: &[i64]) -> Vec<i64> {
    let mut seen = HashMap::new();
    labels
        .iter()
        .map(|&label| {
            if label < 0 {
                -1
            } else {
                let next = seen.len() as i64;
                *seen.entry(label).or_insert(next)
            }
        })
        .collect()
}

/// Validates a label vector against `n` and groups its variables.
pub(crate) fn groups_from_labels(n: usize, labels: &[i64]) -> Result<Vec<VariableSet>> {
    if labels.len() != n {
        return Err(McmError::range(
            "The label vector should contain exactly n entries.",
        ));
    }
    let mut groups: Vec<VariableSet> = Vec::new();
    let mut seen = HashMap::new();
    for (v, &label) in labels.iter().enumerate() {
        if label < 0 {
            continue;
        }
        if label >= n as i64 {
            return Err(McmError::range(
                "A group label should be between 0 and n-1.",
            ));
        }
        let next = groups.len();
        let g = *seen.entry(label).or_insert(next);
        if g == groups.len() {
            groups.push(VariableSet::new(&[v]));
        } else {
            groups[g].insert(v);
        }
    }
    Ok(groups)
}

/// Validates a membership matrix against `n` and groups its variables.
///
/// Fails with a `RangeError` when a row does not have `n` columns, and with a
/// `ValueError` when an entry is not 0/1 or a variable appears in more than
/// one row. Empty rows are dropped; the surviving groups are ordered by their
/// smallest member so that the result is canonical.
pub(crate) fn groups_from_matrix(n: usize, rows: &[Vec<u8>]) -> Result<Vec<VariableSet>> {
    let mut groups: Vec<VariableSet> = Vec::new();
    let mut assigned = VariableSet::new(&[]);
    for row in rows {
        if row.len() != n {
            return Err(McmError::range(
                "Each matrix row should contain exactly n entries.",
            ));
        }
        let mut group = VariableSet::new(&[]);
        for (v, &cell) in row.iter().enumerate() {
            match cell {
                0 => {}
                1 => group.insert(v),
                _ => {
                    return Err(McmError::value(
                        "Entries of the 2D array should be either 0 or 1.",
                    ));
                }
            }
        }
        if !group.is_disjoint(&assigned) {
            return Err(McmError::value(
                "Invalid partition because the same variable occurs in multiple components.",
            ));
        }
        assigned = assigned.union(&group);
        if !group.is_empty() {
            groups.push(group);
        }
    }
    groups.sort_by_key(|g| g.smallest());
    Ok(groups)
}

/// Dispatches a [`PartitionArray`] on its shape: 1-D as a label vector, 2-D as
/// a membership matrix.
pub(crate) fn groups_from_array(n: usize, array: &PartitionArray) -> Result<Vec<VariableSet>> {
    match array.shape.as_slice() {
        &[_] => groups_from_labels(n, &array.data),
        &[rows, cols] => {
            let mut matrix: Vec<Vec<u8>> = Vec::with_capacity(rows);
            if cols == 0 {
                matrix.resize(rows, Vec::new());
            }
            for row in array.data.chunks(cols.max(1)) {
                let row: Vec<u8> = row
                    .iter()
                    .map(|&cell| {
                        if cell == 0 || cell == 1 {
                            Ok(cell as u8)
                        } else {
                            Err(McmError::value(
                                "Entries of the 2D array should be either 0 or 1.",
                            ))
                        }
                    })
                    .collect::<Result<_>>()?;
                matrix.push(row);
            }
            groups_from_matrix(n, &matrix)
        }
        _ => Err(McmError::shape("The partition should be a 1D or 2D array.")),
    }
}

/// Converts canonical groups back into a label vector, `-1` for unassigned.
pub(crate) fn labels_from_groups(n: usize, groups: &[VariableSet]) -> Vec<i64> {
    let mut labels = vec![-1; n];
    for (g, group) in groups.iter().enumerate() {
        for v in group.iter() {
            labels[v] = g as i64;
        }
    }
    labels
}

/// Converts canonical groups into a membership matrix, one 0/1 row per group.
pub(crate) fn matrix_from_groups(n: usize, groups: &[VariableSet]) -> Vec<Vec<u8>> {
    groups
        .iter()
        .map(|group| {
            let mut row = vec![0; n];
            for v in group.iter() {
                row[v] = 1;
            }
            row
        })
        .collect()
}
