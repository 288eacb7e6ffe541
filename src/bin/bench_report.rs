//! Ad-hoc CLI for running the sample programs outside of `cargo bench`.
//!
//! This is informational only - the cross-backend equivalence law is
//! enforced by the integration tests, not by this binary.

use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use triptych::closure::lower;
use triptych::compiler::compile;
use triptych::context::Context;
use triptych::evaluator::evaluate;
use triptych::expr::Expr;
use triptych::programs::{fibonacci, insertion_sort_alternating_sum};
use triptych::vm::run;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Program {
    Fibonacci,
    InsertionSort,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Backend {
    Evaluator,
    Closure,
    Bytecode,
    All,
}

/// Run a sample program on one or all backends and report wall-clock time.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Which sample program to run.
    #[arg(value_enum, default_value_t = Program::Fibonacci)]
    program: Program,

    /// Which backend(s) to run.
    #[arg(short, long, value_enum, default_value_t = Backend::All)]
    backend: Backend,

    /// Number of iterations to time (averaged).
    #[arg(short, long, default_value_t = 1)]
    iterations: u32,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (tree, seed): (Expr, fn() -> Context) = match cli.program {
        Program::Fibonacci => (fibonacci(), || {
            let mut ctx = Context::new(256);
            ctx.set(0.0, 1000.0);
            ctx
        }),
        Program::InsertionSort => (insertion_sort_alternating_sum(), || {
            let mut ctx = Context::new(256);
            ctx.set(0.0, 100.0);
            for i in 1..=100 {
                ctx.set(i as f64, (100 - i) as f64);
            }
            ctx
        }),
    };

    let run_backend = |name: &str, f: &dyn Fn(&mut Context) -> f64| {
        let mut last = 0.0;
        let start = Instant::now();
        for _ in 0..cli.iterations {
            let mut ctx = seed();
            last = f(&mut ctx);
        }
        let elapsed = start.elapsed();
        println!(
            "{name:>10}: {:>12.3?} total, {:>12.3?}/iter, result = {last}",
            elapsed,
            elapsed / cli.iterations.max(1),
        );
    };

    let compiled = compile(&tree);
    let closure = lower(&tree);

    match cli.backend {
        Backend::Evaluator | Backend::All => {
            run_backend("evaluator", &|ctx| evaluate(&tree, ctx));
        }
        _ => {}
    }
    match cli.backend {
        Backend::Closure | Backend::All => {
            run_backend("closure", &|ctx| closure.call(ctx));
        }
        _ => {}
    }
    match cli.backend {
        Backend::Bytecode | Backend::All => {
            run_backend("bytecode", &|ctx| run(&compiled, ctx).unwrap());
        }
        _ => {}
    }
}
