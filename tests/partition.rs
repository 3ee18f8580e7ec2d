use mincomp::codec::{canonicalize_labels, PartitionArray};
use mincomp::{Partition, PartitionInit};

#[test]
fn labels_are_canonicalized_by_first_occurrence() {
    let p = Partition::from_labels(6, &[5, 2, 5, -7, 2, 0]).unwrap();
    assert_eq!(p.labels(), vec![0, 1, 0, -1, 1, 2]);
    assert_eq!(p.n_icc(), 3);
    assert_eq!(p.rank(), 5);

    // The public canonicalizer agrees and is idempotent.
    let canonical = canonicalize_labels(&[5, 2, 5, -7, 2, 0]);
    assert_eq!(canonical, vec![0, 1, 0, -1, 1, 2]);
    assert_eq!(canonicalize_labels(&canonical), canonical);
}

#[test]
fn matrix_and_labels_agree() {
    let p = Partition::from_labels(4, &[0, 1, 0, 1]).unwrap();
    assert_eq!(p.matrix(), vec![vec![1, 0, 1, 0], vec![0, 1, 0, 1]]);

    let q = Partition::from_matrix(4, &p.matrix()).unwrap();
    assert_eq!(q.labels(), p.labels());

    // Matrix rows in any order name the same partition.
    let r = Partition::from_matrix(4, &[vec![0, 1, 0, 1], vec![1, 0, 1, 0]]).unwrap();
    assert_eq!(r.labels(), p.labels());
}

#[test]
fn array_shape_dispatch() {
    let labels = PartitionArray::new(&[4], vec![0, 1, 0, 1]).unwrap();
    let p = Partition::from_array(4, &labels).unwrap();
    assert_eq!(p.n_icc(), 2);

    let matrix = PartitionArray::new(&[2, 4], vec![1, 0, 1, 0, 0, 1, 0, 1]).unwrap();
    let q = Partition::from_array(4, &matrix).unwrap();
    assert_eq!(q.labels(), p.labels());

    let cube = PartitionArray::new(&[2, 2, 2], vec![0; 8]).unwrap();
    let err = Partition::from_array(4, &cube).unwrap_err();
    assert_eq!(err.to_string(), "The partition should be a 1D or 2D array.");

    let err = PartitionArray::new(&[3], vec![0, 1]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The array shape does not match the number of elements."
    );
}

#[test]
fn matrix_entries_must_be_binary() {
    let err = Partition::from_matrix(3, &[vec![1, 0, 2]]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Entries of the 2D array should be either 0 or 1."
    );

    let err = Partition::from_matrix(3, &[vec![1, 1, 0], vec![0, 1, 1]]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid partition because the same variable occurs in multiple components."
    );
}

#[test]
fn named_constructions() {
    let ind = Partition::new(4, PartitionInit::Independent).unwrap();
    assert_eq!(ind.labels(), vec![0, 1, 2, 3]);

    let com = Partition::new(4, PartitionInit::Complete).unwrap();
    assert_eq!(com.labels(), vec![0, 0, 0, 0]);

    for _ in 0..25 {
        let r = Partition::new(6, PartitionInit::Random).unwrap();
        assert_eq!(r.rank(), 6);
        assert_eq!(r.labels(), canonicalize_labels(&r.labels()));
    }
}

#[test]
fn moving_a_variable_out_and_back_restores_membership() {
    let original = Partition::from_labels(5, &[0, 1, 0, 2, 1]).unwrap();
    let mut p = original.clone();
    let home = p.group_of(3).unwrap();
    p.move_variable_out(3).unwrap();
    assert_eq!(p.rank(), 4);
    p.move_variable_in(3, home).unwrap();
    assert!(p.same_membership(&original));
}

#[test]
fn move_errors() {
    let mut p = Partition::from_labels(3, &[0, 0, -1]).unwrap();

    let err = p.move_variable_in(0, 0).unwrap_err();
    assert_eq!(
        err.to_string(),
        "This variable is already present in the partition."
    );

    let err = p.move_variable_out(2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "This variable is not present in the partition."
    );

    let err = p.move_variable_out(7).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The variable index should be between 0 and n-1."
    );
}

#[test]
fn evidence_annotations_require_a_search() {
    let p = Partition::independent(3);
    assert!(!p.is_optimized());
    let err = p.log_evidence().unwrap_err();
    assert_eq!(err.to_string(), "No search has been ran yet.");
    let err = p.log_evidence_per_icc().unwrap_err();
    assert_eq!(err.to_string(), "No search has been ran yet.");
}

#[test]
fn emptied_groups_disappear_and_labels_stay_contiguous() {
    let mut p = Partition::from_labels(4, &[0, 1, 1, 2]).unwrap();
    p.move_variable_out(0).unwrap();
    assert_eq!(p.labels(), vec![-1, 0, 0, 1]);

    // Moving into a label beyond the current groups creates a new group.
    p.move_variable_in(0, 40).unwrap();
    assert_eq!(p.n_icc(), 3);
    assert_eq!(p.group_of(0), Some(2));
}
