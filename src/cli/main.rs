use std::{io::BufReader, path::PathBuf, str::FromStr};

use cubist_sat::{
    config::Config, context::Context, cubifier::Cubifier, reports::Report,
    structures::literal::{CLiteral, Literal},
};

fn main() {
    let mut config = Config::default();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        println!("c A path to a DIMACS formula is required");
        std::process::exit(1);
    }

    parse_args(&args, &mut config);

    let path = match PathBuf::from_str(args.last().expect("no path")) {
        Ok(path) => path,
        Err(_) => {
            println!("c Unable to interpret a path from: {:?}", args.last());
            std::process::exit(1);
        }
    };
    println!("c Reading DIMACS file from {path:?}");

    let file = match std::fs::File::open(&path) {
        Ok(file) => file,
        Err(_) => {
            println!("c Failed to open {path:?}");
            std::process::exit(1);
        }
    };

    let mut ctx = Context::from_config(config);

    let parse_result = match path.extension() {
        Some(extension) if *extension == *"xz" => {
            ctx.read_dimacs(BufReader::new(xz2::read::XzDecoder::new(&file)))
        }
        _ => ctx.read_dimacs(BufReader::new(&file)),
    };
    if let Err(issue) = parse_result {
        println!("c Failed to parse the formula: {issue:?}");
        std::process::exit(1);
    }

    let mut cubifier = Cubifier::from_config(&ctx.config);
    let report = ctx.interleaved_solve(&mut cubifier);

    println!("s {report}");

    if let (Report::Satisfiable, Some(model)) = (report, &ctx.model) {
        let mut valuation = String::from("v");
        for (atom, value) in model.iter().enumerate() {
            let literal = CLiteral::new(atom as u32, *value);
            valuation.push_str(&format!(" {literal}"));
        }
        valuation.push_str(" 0");
        println!("{valuation}");
    }

    cubifier.report_stats();

    match report {
        Report::Satisfiable => std::process::exit(10),
        Report::Unsatisfiable => std::process::exit(20),
        Report::Unknown => std::process::exit(0),
    }
}

/// Parse CLI arguments into a [Config] struct.
///
/// If an unrecognised argument or invalid option is found a message is sent and the process is terminated.
fn parse_args(args: &[String], config: &mut Config) {
    macro_rules! set_or_exit {
        ($option:expr, $split:expr) => {{
            let (min, max) = $option.min_max();
            match $split.next().and_then(|request| request.parse().ok()) {
                Some(value) if $option.set(value) => {
                    println!("c {} set to: {value}", $option.name);
                }
                _ => {
                    println!("{} requires a value between {min:?} and {max:?}", $option.name);
                    std::process::exit(1);
                }
            }
        }};
    }

    for arg in args.iter().skip(1).rev().skip(1) {
        let mut split = arg.split("=");
        match split.next() {
            // The cases should be in lexicographic order.
            Some("--always_search") => {
                println!("c Cube search will run every iteration");
                config.cubifier.always_search.value = true;
            }

            Some("--conflict_limit") => set_or_exit!(config.conflict_limit, split),

            Some("--k_c") => set_or_exit!(config.cubifier.k_c, split),

            Some("--k_t") => set_or_exit!(config.cubifier.k_t, split),

            Some("--luby") => set_or_exit!(config.luby_restarts, split),

            Some("--max_cubify") => set_or_exit!(config.cubifier.max_cubify, split),

            Some("--polarity_lean") => set_or_exit!(config.polarity_lean, split),

            Some("--preprocess") => {
                println!("c Pure literals will be assigned before solving");
                config.preprocessing.value = true;
            }

            Some("--propagation_limit") => set_or_exit!(config.propagation_limit, split),

            Some("--random_decision_bias") => set_or_exit!(config.random_decision_bias, split),

            Some("--restart_base") => set_or_exit!(config.restart_base, split),

            Some("--restart_first") => set_or_exit!(config.restart_first, split),

            Some(_) | None => {
                println!("Unable to parse argument: {arg:?}");
                std::process::exit(1);
            }
        }
    }
}
