use std::io::{self, BufRead};
use std::process;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use proplogic::parse_formula;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Formulas to parse. Formulas are read from stdin, one per line, when none are given.
    #[arg(value_name = "FORMULA")]
    formulas: Vec<String>,

    /// Print the syntax tree of each formula after its canonical rendering.
    #[arg(short, long)]
    tree: bool,
}

fn report(source: &str, tree: bool) -> bool {
    match parse_formula(source) {
        Ok(formula) => {
            info!(depth = formula.depth(), variables = ?formula.variables(), "parsed formula");
            println!("{formula}");

            if tree {
                println!("{formula:#?}");
            }

            true
        }
        Err(err) => {
            error!("{source:?}: {err}");
            false
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut failed = 0usize;

    if args.formulas.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    error!("could not read stdin: {err}");
                    process::exit(1);
                }
            };

            if !line.trim().is_empty() && !report(&line, args.tree) {
                failed += 1;
            }
        }
    } else {
        for source in &args.formulas {
            if !report(source, args.tree) {
                failed += 1;
            }
        }
    }

    if failed > 0 {
        process::exit(1);
    }
}
