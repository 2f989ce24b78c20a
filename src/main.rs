//! nm - classical numerical methods on built-in textbook problems.
//!
//! # Usage
//!
//! ```bash
//! nm rootfinding --eq 2 --interval 1
//! nm --json --trace gauss 3
//! RUST_LOG=debug nm newton-systems 1
//! ```

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use nm_core::Vector;
use nm_core::report::{self, ReportError, RootFindingParams, ROOT_FINDING_EPS};

/// Numerical methods with step traces
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print a JSON report instead of plain text
    #[arg(long, global = true)]
    json: bool,

    /// Record per-iteration traces (JSON output only)
    #[arg(long, global = true, overrides_with = "no_trace")]
    trace: bool,

    /// Do not record traces
    #[arg(long = "no-trace", global = true, overrides_with = "trace")]
    no_trace: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bisection, regula falsi, secant and Newton on one equation
    Rootfinding {
        /// Equation (1-4)
        #[arg(long, default_value_t = 1)]
        eq: usize,

        /// Built-in interval (1 or 2)
        #[arg(long, default_value_t = 1)]
        interval: usize,

        /// Left end of a custom interval
        #[arg(long, requires = "b", allow_negative_numbers = true)]
        a: Option<f64>,

        /// Right end of a custom interval
        #[arg(long, requires = "a", allow_negative_numbers = true)]
        b: Option<f64>,

        /// Newton starting point (default: interval midpoint)
        #[arg(long, allow_negative_numbers = true)]
        x0: Option<f64>,

        /// Tolerance
        #[arg(long, default_value_t = ROOT_FINDING_EPS)]
        eps: f64,
    },

    /// Gaussian elimination with 3 significant digits
    Gauss {
        /// System (1-4)
        #[arg(default_value_t = 1)]
        system: usize,
    },

    /// Two Jacobi and Gauss-Seidel sweeps from the zero vector
    Iterative {
        /// System (1-4)
        #[arg(default_value_t = 1)]
        system: usize,
    },

    /// Newton's method for nonlinear systems
    NewtonSystems {
        /// System (1-4)
        #[arg(default_value_t = 4)]
        system: usize,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(ReportError::Selection(message)) => {
            eprintln!("{message}");
            ExitCode::from(2)
        }
        Err(ReportError::Numerical(e)) => {
            log::debug!("solver failed: {}", e.kind());
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> report::Result<()> {
    let trace = args.trace && !args.no_trace;
    log::debug!("running {:?} (json: {}, trace: {trace})", args.command, args.json);

    match args.command {
        Command::Rootfinding {
            eq,
            interval,
            a,
            b,
            x0,
            eps,
        } => {
            let params = RootFindingParams {
                equation: eq,
                interval,
                bounds: a.zip(b),
                x0,
                eps,
            };
            let r = report::rootfinding(&params, trace)?;
            if args.json {
                println!("{}", report::to_json(&r)?);
            } else {
                println!("Eq({}), interval [{}, {}]", r.eq, r.a, r.b);
                for m in &r.methods {
                    println!("  {:<12} = {}", m.name, m.x);
                }
            }
        }
        Command::Gauss { system } => {
            let r = report::gauss(system, trace)?;
            if args.json {
                println!("{}", report::to_json(&r)?);
            } else {
                print_solution(&r.x);
            }
        }
        Command::Iterative { system } => {
            let r = report::iterative(system, trace)?;
            if args.json {
                println!("{}", report::to_json(&r)?);
            } else {
                for m in &r.methods {
                    println!("{} x^({}) = {}", display_name(m.name), r.iterations, m.x);
                }
            }
        }
        Command::NewtonSystems { system } => {
            let r = report::newton_systems(system, trace)?;
            if args.json {
                println!("{}", report::to_json(&r)?);
            } else {
                print_solution(&r.x);
            }
        }
    }

    Ok(())
}

fn display_name(name: &str) -> &str {
    match name {
        "jacobi" => "Jacobi",
        "gaussSeidel" => "Gauss-Seidel",
        other => other,
    }
}

fn print_solution(x: &Vector) {
    println!("Solution x = {x}");
}
