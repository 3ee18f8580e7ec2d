use mincomp::{Partition, SampleTable, Scorer, SearchEngine};
use std::env;
use std::process::exit;

fn usage() -> ! {
    eprintln!("usage: mincomp <dataset> <n> <q> [exhaustive|annealing|merging|divisive]");
    exit(2);
}

fn report(scorer: &Scorer, best: &Partition) -> mincomp::Result<()> {
    println!();
    println!("best MCM: {:?}", best.groups());
    println!("  log-evidence: {:.5}", best.log_evidence()?);
    for (g, evidence) in best.log_evidence_per_icc()?.iter().enumerate() {
        println!("    ICC {} {:?}: {:.5}", g, best.group(g), evidence);
    }
    println!("  max log-likelihood: {:.5}", scorer.log_likelihood(best)?);
    println!(
        "  parametric complexity: {:.5}",
        scorer.complexity_parametric(best)?
    );
    println!(
        "  geometric complexity: {:.5}",
        scorer.complexity_geometric(best)?
    );
    println!(
        "  minimum description length: {:.5}",
        scorer.minimum_description_length(best)?
    );
    Ok(())
}

fn main() -> mincomp::Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let (path, n, q, method) = match args.as_slice() {
        [_, path, n, q] => (path, n, q, "annealing"),
        [_, path, n, q, method] => (path, n, q, method.as_str()),
        _ => usage(),
    };
    let n: usize = n.parse().unwrap_or_else(|_| usage());
    let q: usize = q.parse().unwrap_or_else(|_| usage());

    let table = SampleTable::from_file(path, n, q)?;
    println!("data: {} variables over alphabet 0..{}", table.n(), table.q());
    println!("  samples: {} ({} unique)", table.n_samples(), table.n_unique());
    println!("  entropy: {:.5} (base q)", table.entropy());

    let scorer = Scorer::new(table);
    let mut engine = SearchEngine::new();
    let best = match method {
        "exhaustive" => engine.exhaustive(&scorer)?,
        "annealing" => engine.simulated_annealing(&scorer, None)?,
        "merging" => engine.hierarchical_greedy_merging(&scorer, None)?,
        "divisive" => engine.hierarchical_greedy_divisive(&scorer, None)?,
        _ => usage(),
    };

    println!(
        "  search evaluated {} partitions",
        engine.log_evidence_trajectory()?.len()
    );
    report(&scorer, &best)
}
