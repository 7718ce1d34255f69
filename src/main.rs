use anyhow::{Result, anyhow, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;

use isd_solver::algorithm::{
    IsdGeneric, SubIsd, SubIsdLeeBrickell, SubIsdMmt, SubIsdPrange, SubIsdSieving,
    SubIsdSternDumer,
};
use isd_solver::core::{Matrix, Vector};
use isd_solver::tools::{ConfigMap, SdpGenerator, parse_file};

#[derive(Debug, Serialize)]
struct SolveReport {
    algo: String,
    n: usize,
    k: usize,
    w: usize,
    trials: usize,
    solved: usize,
    iterations: Vec<u64>,
    avg_iterations: f64,
    solutions: Vec<String>,
}

fn main() {
    let matches = Command::new("isd-solver")
        .version("0.1.0")
        .about("Information-set decoding solver for syndrome decoding challenges")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Challenge instance file (decodingchallenge.org format)"),
        )
        .arg(
            Arg::new("gen")
                .short('g')
                .long("gen")
                .action(ArgAction::SetTrue)
                .help("Generate a random instance instead of reading a file"),
        )
        .arg(
            Arg::new("genrandom")
                .long("genrandom")
                .action(ArgAction::SetTrue)
                .help("Generated instance gets a uniform syndrome instead of a planted error"),
        )
        .arg(
            Arg::new("algo")
                .short('a')
                .long("algo")
                .default_value("P")
                .help("Algorithm: P (Prange), LB (Lee-Brickell), SD (Stern/Dumer), MMT, SV (sieving, experimental)"),
        )
        .arg(
            Arg::new("trials")
                .short('t')
                .long("trials")
                .value_parser(clap::value_parser!(usize))
                .default_value("1")
                .help("Number of solve trials"),
        )
        .arg(
            Arg::new("params")
                .num_args(0..=3)
                .value_parser(clap::value_parser!(usize))
                .help("Generation parameters: n [k [w]]"),
        )
        .arg(Arg::new("n").long("n").value_parser(clap::value_parser!(usize)).help("Code length"))
        .arg(Arg::new("k").long("k").value_parser(clap::value_parser!(usize)).help("Code dimension"))
        .arg(Arg::new("w").long("w").value_parser(clap::value_parser!(usize)).help("Error weight"))
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64))
                .help("Seed for generation and the solver permutation"),
        )
        .arg(
            Arg::new("max-iterations")
                .long("max-iterations")
                .value_parser(clap::value_parser!(u64))
                .default_value("0")
                .help("Abort a trial after this many iterations (0 = unbounded)"),
        )
        .arg(Arg::new("l").long("l").help("ISD parameter l (sub-ISD key width in bits)"))
        .arg(
            Arg::new("u")
                .long("u")
                .allow_hyphen_values(true)
                .help("Column swaps per iteration (-1 = auto)"),
        )
        .arg(Arg::new("updatetype").long("updatetype").help("Update strategy: 1,2,3,4,10,12,13,14"))
        .arg(
            Arg::new("verifysolution")
                .long("verifysolution")
                .action(ArgAction::SetTrue)
                .help("Verify every candidate against the original instance (default)"),
        )
        .arg(
            Arg::new("no-verifysolution")
                .long("no-verifysolution")
                .action(ArgAction::SetTrue)
                .help("Skip candidate verification"),
        )
        .arg(Arg::new("p").short('p').long("p").help("Sub-ISD subset size"))
        .arg(Arg::new("l1").long("l1").help("MMT first-level key bits"))
        .arg(Arg::new("bucketsize").long("bucketsize").help("MMT first-level bucket depth"))
        .arg(Arg::new("alpha").long("alpha").help("Sieving intersection weight"))
        .arg(Arg::new("list-size").long("list-size").alias("N").help("Sieving list size"))
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(["human", "json"])
                .default_value("human")
                .help("Output format"),
        )
        .get_matches();

    if let Err(e) = run(&matches) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Collect the module options into the string->string configuration map
/// every module parses its own names from.
fn build_config_map(matches: &ArgMatches) -> ConfigMap {
    let mut cfg = ConfigMap::new();
    for name in ["l", "u", "updatetype", "p", "l1", "bucketsize", "alpha"] {
        if let Some(v) = matches.get_one::<String>(name) {
            cfg.insert(name.to_string(), v.clone());
        }
    }
    if let Some(v) = matches.get_one::<String>("list-size") {
        cfg.insert("N".to_string(), v.clone());
    }
    if matches.get_flag("verifysolution") {
        cfg.insert("verifysolution".to_string(), String::new());
    }
    if matches.get_flag("no-verifysolution") {
        cfg.insert("no-verifysolution".to_string(), String::new());
    }
    cfg
}

enum InstanceSource {
    File { h: Matrix, s: Vector, w: usize },
    Generated(SdpGenerator),
}

impl InstanceSource {
    fn instance(&self) -> (&Matrix, &Vector, usize) {
        match self {
            InstanceSource::File { h, s, w } => (h, s, *w),
            InstanceSource::Generated(g) => (g.h(), g.s(), g.w()),
        }
    }

    fn advance(&mut self) -> Result<()> {
        if let InstanceSource::Generated(g) = self {
            g.regenerate()?;
        }
        Ok(())
    }
}

fn build_source(matches: &ArgMatches) -> Result<InstanceSource> {
    if let Some(path) = matches.get_one::<String>("file") {
        let parsed = parse_file(path)?;
        let s = parsed
            .s
            .ok_or_else(|| anyhow!("instance file carries no syndrome; nothing to decode"))?;
        let w = matches
            .get_one::<usize>("w")
            .copied()
            .or(parsed.w)
            .ok_or_else(|| anyhow!("no weight bound: the file has no w and --w was not given"))?;
        println!("Parsed instance {}: n={}, k={}, w={}", path, parsed.n, parsed.k, w);
        return Ok(InstanceSource::File { h: parsed.h, s, w });
    }
    if !matches.get_flag("gen") {
        bail!("either --file or --gen is required (see --help)");
    }
    let positional: Vec<usize> =
        matches.get_many::<usize>("params").map(|v| v.copied().collect()).unwrap_or_default();
    let n = matches
        .get_one::<usize>("n")
        .copied()
        .or(positional.first().copied())
        .ok_or_else(|| anyhow!("--gen requires the code length (positional n or --n)"))?;
    let k = matches.get_one::<usize>("k").copied().or(positional.get(1).copied());
    let w = matches.get_one::<usize>("w").copied().or(positional.get(2).copied());
    let mut generator = match matches.get_one::<u64>("seed") {
        Some(&seed) => SdpGenerator::with_seed(seed),
        None => SdpGenerator::new(),
    };
    if matches.get_flag("genrandom") {
        generator.generate(n, k, w)?;
    } else {
        generator.generate_planted(n, k, w)?;
    }
    println!(
        "Generated instance: n={}, k={}, w={}, seed={}",
        generator.n(),
        generator.k(),
        generator.w(),
        generator.seed()
    );
    Ok(InstanceSource::Generated(generator))
}

fn run(matches: &ArgMatches) -> Result<()> {
    let algo = matches.get_one::<String>("algo").expect("defaulted").to_uppercase();
    let trials = *matches.get_one::<usize>("trials").expect("defaulted");
    let max_iterations = *matches.get_one::<u64>("max-iterations").expect("defaulted");
    let format = matches.get_one::<String>("format").expect("defaulted").clone();
    let seed = matches.get_one::<u64>("seed").copied();
    let cfg = build_config_map(matches);
    let mut source = build_source(matches)?;

    if algo == "SV" {
        eprintln!("warning: the sieving algorithm is experimental");
    }

    let report = match algo.as_str() {
        "P" => run_trials(SubIsdPrange::new, &algo, &cfg, &mut source, trials, seed, max_iterations)?,
        "LB" => run_trials(SubIsdLeeBrickell::new, &algo, &cfg, &mut source, trials, seed, max_iterations)?,
        "SD" => run_trials(SubIsdSternDumer::new, &algo, &cfg, &mut source, trials, seed, max_iterations)?,
        "MMT" => run_trials(SubIsdMmt::new, &algo, &cfg, &mut source, trials, seed, max_iterations)?,
        "SV" => run_trials(SubIsdSieving::new, &algo, &cfg, &mut source, trials, seed, max_iterations)?,
        other => bail!("unknown algorithm {:?}; expected P, LB, SD, MMT or SV", other),
    };

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        _ => print_human(&report),
    }
    if report.solved < report.trials {
        bail!("{} of {} trials did not finish", report.trials - report.solved, report.trials);
    }
    Ok(())
}

fn run_trials<S: SubIsd>(
    make_sub: impl Fn() -> S,
    algo: &str,
    cfg: &ConfigMap,
    source: &mut InstanceSource,
    trials: usize,
    seed: Option<u64>,
    max_iterations: u64,
) -> Result<SolveReport> {
    let (h0, _, w0) = source.instance();
    let mut report = SolveReport {
        algo: algo.to_string(),
        n: h0.columns(),
        k: h0.columns() - h0.rows(),
        w: w0,
        trials,
        solved: 0,
        iterations: Vec::new(),
        avg_iterations: 0.0,
        solutions: Vec::new(),
    };
    for trial in 0..trials {
        if trial > 0 {
            source.advance()?;
        }
        let (h, s, w) = source.instance();
        let mut solver = IsdGeneric::new(make_sub());
        solver.load_config(cfg)?;
        if let Some(seed) = seed {
            solver.set_seed(seed.wrapping_add(trial as u64));
        }
        solver.initialize(&h.view(), &s.view(), w)?;
        solver.prepare_loop()?;
        let mut solved = false;
        loop {
            if solver.loop_next()? {
                solved = true;
                break;
            }
            if max_iterations > 0 && solver.iterations() >= max_iterations {
                break;
            }
        }
        report.iterations.push(solver.iterations());
        if solved {
            report.solved += 1;
            report.solutions.push(solver.get_solution()?.to_string());
        }
    }
    let total: u64 = report.iterations.iter().sum();
    report.avg_iterations = total as f64 / trials.max(1) as f64;
    Ok(report)
}

fn print_human(report: &SolveReport) {
    println!(
        "n={}, k={}, w={}, algo={}, trials={}",
        report.n, report.k, report.w, report.algo, report.trials
    );
    for solution in &report.solutions {
        println!("Solution found:");
        println!("{}", solution);
    }
    println!("Solved {} of {} trials", report.solved, report.trials);
    println!("Average number of iterations: {:.2}", report.avg_iterations);
    if report.avg_iterations > 0.0 {
        println!("Inverse of average number of iterations: {:.6}", 1.0 / report.avg_iterations);
    }
}
