use approx::assert_relative_eq;
use mincomp::{Partition, SampleTable, Scorer};
use std::io::Write;

/// Three binary variables: 0 and 1 copy the same coin, 2 is an independent
/// coin. Exactly balanced: every (coin, coin) combination appears 16 times.
fn coupled_pair_table() -> SampleTable {
    let rows: Vec<Vec<u8>> = (0..64u32)
        .map(|i| {
            let a = (i & 1) as u8;
            let b = (i >> 1 & 1) as u8;
            vec![a, a, b]
        })
        .collect();
    SampleTable::from_rows(&rows, 3, 2).unwrap()
}

fn partitions_of_three() -> Vec<Partition> {
    vec![
        Partition::independent(3),
        Partition::complete(3),
        Partition::from_labels(3, &[0, 0, 1]).unwrap(),
        Partition::from_labels(3, &[0, 1, 0]).unwrap(),
        Partition::from_labels(3, &[0, 1, 1]).unwrap(),
    ]
}

#[test]
fn every_score_is_additive_over_groups() {
    let scorer = Scorer::new(coupled_pair_table());
    for p in partitions_of_three() {
        assert_relative_eq!(
            scorer.log_evidence(&p).unwrap(),
            scorer.log_evidence_icc(&p).unwrap().iter().sum::<f64>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            scorer.log_likelihood(&p).unwrap(),
            scorer.log_likelihood_icc(&p).unwrap().iter().sum::<f64>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            scorer.complexity_parametric(&p).unwrap(),
            scorer
                .complexity_parametric_icc(&p)
                .unwrap()
                .iter()
                .sum::<f64>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            scorer.complexity_geometric(&p).unwrap(),
            scorer
                .complexity_geometric_icc(&p)
                .unwrap()
                .iter()
                .sum::<f64>(),
            max_relative = 1e-12
        );
    }
}

#[test]
fn description_length_is_likelihood_minus_complexities() {
    let scorer = Scorer::new(coupled_pair_table());
    for p in partitions_of_three() {
        let expected = scorer.log_likelihood(&p).unwrap()
            - scorer.complexity_parametric(&p).unwrap()
            - scorer.complexity_geometric(&p).unwrap();
        assert_relative_eq!(
            scorer.minimum_description_length(&p).unwrap(),
            expected,
            max_relative = 1e-12
        );
    }
}

#[test]
fn evidence_prefers_the_generating_structure() {
    let scorer = Scorer::new(coupled_pair_table());
    let truth = Partition::from_labels(3, &[0, 0, 1]).unwrap();
    let true_score = scorer.log_evidence(&truth).unwrap();
    for p in partitions_of_three() {
        if p.same_membership(&truth) {
            continue;
        }
        assert!(
            scorer.log_evidence(&p).unwrap() < true_score,
            "{:?} scored at least as well as the generating structure",
            p.labels()
        );
    }
}

#[test]
fn scores_work_beyond_binary_alphabets() {
    // Variables 0 and 1 copy the same trit, variable 2 cycles independently.
    let rows: Vec<Vec<u8>> = (0..81u32)
        .map(|i| {
            let a = (i % 3) as u8;
            let b = ((i / 3) % 3) as u8;
            vec![a, a, b]
        })
        .collect();
    let scorer = Scorer::new(SampleTable::from_rows(&rows, 3, 3).unwrap());
    let truth = Partition::from_labels(3, &[0, 0, 1]).unwrap();
    let independent = Partition::independent(3);
    assert!(
        scorer.log_evidence(&truth).unwrap() > scorer.log_evidence(&independent).unwrap()
    );
    // One trit carries ln 3 nats; two perfect copies still carry ln 3.
    assert_relative_eq!(
        scorer.log_likelihood(&truth).unwrap(),
        -2.0 * 81.0 * 3.0f64.ln(),
        max_relative = 1e-12
    );
}

#[test]
fn dimension_mismatch_is_rejected() {
    let scorer = Scorer::new(coupled_pair_table());
    let p = Partition::independent(4);
    let err = scorer.log_evidence(&p).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Number of variables in the data doesn't match the number of variables in the given MCM."
    );
}

#[test]
fn spin_operator_entropy_and_errors() {
    let scorer = Scorer::new(coupled_pair_table());

    // Variables 0 and 1 are perfect copies, so their parity is constant.
    assert_relative_eq!(
        scorer.entropy_of_spin_operator(&[1, 1, 0]).unwrap(),
        0.0,
        epsilon = 1e-12
    );

    let err = scorer.entropy_of_spin_operator(&[1, 1]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The given spin operator doesn't contain n elements."
    );

    let err = scorer.entropy_of_spin_operator(&[1, 2, 0]).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The vector should only contain values between 0 and q-1."
    );
}

#[test]
fn table_validates_rows() {
    let err = SampleTable::from_rows(&[vec![0, 1]], 3, 2).unwrap_err();
    assert_eq!(err.to_string(), "Each row should contain exactly n values.");

    let err = SampleTable::from_rows(&[vec![0, 1, 2]], 3, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The dataset should only contain values between 0 and q-1."
    );
}

#[test]
fn empty_datasets_are_rejected() {
    let err = SampleTable::from_rows(&[], 2, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The dataset should contain at least one sample."
    );

    let err = SampleTable::from_reader(std::io::empty(), 2, 2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "The dataset should contain at least one sample."
    );
}

#[test]
fn dataset_files_round_trip() {
    let table = coupled_pair_table();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.dat");
    table.write_file(&path).unwrap();

    let back = SampleTable::from_file(&path, 3, 2).unwrap();
    assert_eq!(back.n_samples(), table.n_samples());
    assert_eq!(
        back.unique_rows().collect::<Vec<_>>(),
        table.unique_rows().collect::<Vec<_>>()
    );
}

#[test]
fn malformed_dataset_lines_name_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.dat");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "010").unwrap();
    writeln!(file, "0a0").unwrap();
    drop(file);

    let err = SampleTable::from_file(&path, 3, 2).unwrap_err();
    assert!(err.to_string().starts_with("line 2:"), "{}", err);

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "01").unwrap();
    drop(file);
    let err = SampleTable::from_file(&path, 3, 2).unwrap_err();
    assert!(err.to_string().contains("fewer than n values"), "{}", err);
}

#[test]
fn synthetic_data_respects_the_model() {
    use rand::SeedableRng;
    let table = coupled_pair_table();
    let p = Partition::from_labels(3, &[0, 0, 1]).unwrap();
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let synthetic = p.generate_data_object(500, &table, &mut rng).unwrap();
    assert_eq!(synthetic.n_samples(), 500);
    for (row, _) in synthetic.unique_rows() {
        assert_eq!(row[0], row[1]);
    }

    // Generation requires every variable to be assigned, and at least one
    // sample so the emitted table is itself a valid dataset.
    let partial = Partition::from_labels(3, &[0, 0, -1]).unwrap();
    assert!(partial.generate_data_object(10, &table, &mut rng).is_err());
    assert!(p.generate_data_object(0, &table, &mut rng).is_err());
}
