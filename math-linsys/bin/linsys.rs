//! Solve a dense linear system from the command line
//!
//! Input is either a text file holding the augmented matrix (first line `n`,
//! then `n` rows of `n + 1` numbers) or a JSON file `{"a": [[..]], "b": [..]}`.
//!
//! Usage:
//!     cargo run --bin linsys -- data/system3.txt --method lu
//!     cargo run --bin linsys -- --random 8 --method gauss-seidel --json

use anyhow::{Context, bail};
use clap::{Parser, ValueEnum};
use math_linsys::testing::random_diagonally_dominant;
use math_linsys::{
    DenseMatrix, DominancePolicy, IterativeMethod, LinsysError, Method, StationaryConfig,
    factorize_lu, solve,
};
use ndarray::Array1;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "linsys", about = "Solve a dense linear system A·x = b")]
struct Cli {
    /// System file (text augmented matrix or JSON)
    input: Option<PathBuf>,

    /// Input format (auto picks JSON for a .json extension)
    #[arg(long, value_enum, default_value_t = FormatChoice::Auto)]
    format: FormatChoice,

    /// Generate a random strictly diagonally dominant system of this size instead of reading a file
    #[arg(long, conflicts_with = "input")]
    random: Option<usize>,

    /// Entries of the random system are drawn from (-range, range)
    #[arg(long, default_value_t = 100.0, value_parser = parse_range)]
    range: f64,

    /// Optional random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Solver to use
    #[arg(long, value_enum, default_value_t = MethodChoice::Gauss)]
    method: MethodChoice,

    /// Relative tolerance for the iterative solvers
    #[arg(long, default_value_t = 1e-8)]
    tol: f64,

    /// Maximum number of sweeps for the iterative solvers
    #[arg(long, default_value_t = 100)]
    max_iter: usize,

    /// Iterate even if the matrix is not strictly diagonally dominant
    #[arg(long)]
    allow_non_dominant: bool,

    /// Log progress every N sweeps (0 = quiet)
    #[arg(long, default_value_t = 0)]
    print_interval: usize,

    /// Print the P, L and U factors (lu method only)
    #[arg(long)]
    show_factors: bool,

    /// Emit the result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatChoice {
    Auto,
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodChoice {
    Gauss,
    Lu,
    Jacobi,
    GaussSeidel,
}

/// JSON system description
#[derive(Debug, Deserialize)]
struct SystemFile {
    a: Vec<Vec<f64>>,
    b: Vec<f64>,
}

#[derive(Debug, Serialize)]
struct SolveReport {
    method: String,
    n: usize,
    x: Vec<f64>,
    iterations: usize,
    residual: f64,
    duration_us: u128,
    #[serde(skip_serializing_if = "Option::is_none")]
    exact_error: Option<f64>,
}

fn parse_range(s: &str) -> Result<f64, String> {
    let range: f64 = s.parse().map_err(|e| format!("invalid number '{}': {}", s, e))?;
    if range.is_finite() && range > 0.0 {
        Ok(range)
    } else {
        Err(format!("range must be a positive finite number, got {}", s))
    }
}

fn parse_text(contents: &str) -> anyhow::Result<(DenseMatrix<f64>, Array1<f64>)> {
    let mut tokens = contents.split_whitespace();
    let n: usize = tokens
        .next()
        .context("empty input: expected the system size on the first line")?
        .parse()
        .context("invalid system size")?;

    let values = tokens
        .map(|t| t.parse::<f64>().with_context(|| format!("invalid number '{}'", t)))
        .collect::<anyhow::Result<Vec<f64>>>()?;
    let expected = n
        .checked_add(1)
        .and_then(|cols| cols.checked_mul(n))
        .with_context(|| format!("system size {} is too large", n))?;
    if values.len() != expected {
        bail!(
            "expected {} coefficients for a {}x{} augmented matrix, found {}",
            expected,
            n,
            n + 1,
            values.len()
        );
    }

    let rows: Vec<Vec<f64>> = values.chunks(n + 1).map(|c| c[..n].to_vec()).collect();
    let b: Array1<f64> = values.chunks(n + 1).map(|c| c[n]).collect();
    Ok((DenseMatrix::from_rows(&rows)?, b))
}

fn parse_json(contents: &str) -> anyhow::Result<(DenseMatrix<f64>, Array1<f64>)> {
    let system: SystemFile = serde_json::from_str(contents).context("invalid JSON system")?;
    Ok((DenseMatrix::from_rows(&system.a)?, Array1::from(system.b)))
}

fn load_system(
    path: &Path,
    format: FormatChoice,
) -> anyhow::Result<(DenseMatrix<f64>, Array1<f64>)> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))?;
    let is_json = match format {
        FormatChoice::Json => true,
        FormatChoice::Text => false,
        FormatChoice::Auto => path.extension().is_some_and(|ext| ext == "json"),
    };
    if is_json {
        parse_json(&contents)
    } else {
        parse_text(&contents)
    }
}

fn build_method(cli: &Cli) -> Method<f64> {
    let iterative = |method| {
        Method::Iterative(StationaryConfig {
            method,
            max_iterations: cli.max_iter,
            tolerance: cli.tol,
            dominance: if cli.allow_non_dominant {
                DominancePolicy::Warn
            } else {
                DominancePolicy::Reject
            },
            print_interval: cli.print_interval,
        })
    };
    match cli.method {
        MethodChoice::Gauss => Method::Gauss,
        MethodChoice::Lu => Method::Lu,
        MethodChoice::Jacobi => iterative(IterativeMethod::Jacobi),
        MethodChoice::GaussSeidel => iterative(IterativeMethod::GaussSeidel),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let (a, b, exact) = match (cli.random, &cli.input) {
        (Some(n), _) => {
            let mut rng = match cli.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let system = random_diagonally_dominant(n, cli.range, &mut rng);
            (system.a, system.b, Some(system.x))
        }
        (None, Some(path)) => {
            let (a, b) = load_system(path, cli.format)?;
            (a, b, None)
        }
        (None, None) => bail!("provide an input file or --random N"),
    };

    if cli.show_factors && matches!(cli.method, MethodChoice::Lu) {
        let lu = factorize_lu(&a)?;
        println!("P =\n{}", lu.p().as_array());
        println!("L =\n{}", lu.l().as_array());
        println!("U =\n{}", lu.u().as_array());
        println!("det(A) = {:.6e}", lu.determinant());
    }

    let method = build_method(&cli);
    let start = Instant::now();
    let solution = match solve(&a, &b, &method) {
        Ok(solution) => solution,
        Err(err @ LinsysError::NonConvergence { .. }) => {
            if let Some(best) = err.best_iterate() {
                eprintln!("last iterate: {}", best);
            }
            return Err(err.into());
        }
        Err(err) => return Err(err.into()),
    };
    let duration = start.elapsed();

    let exact_error = exact.map(|x| {
        (&solution.x - &x)
            .iter()
            .fold(0.0_f64, |acc, v| acc.max(v.abs()))
    });

    let report = SolveReport {
        method: method.name().to_string(),
        n: a.nrows(),
        x: solution.x.to_vec(),
        iterations: solution.iterations,
        residual: solution.residual,
        duration_us: duration.as_micros(),
        exact_error,
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("method: {}  (n = {})", report.method, report.n);
        for (i, xi) in report.x.iter().enumerate() {
            println!("x{} = {:.10}", i + 1, xi);
        }
        if report.iterations > 0 {
            println!("iterations: {}", report.iterations);
        }
        println!("residual ‖Ax - b‖∞ = {:.3e}", report.residual);
        if let Some(err) = report.exact_error {
            println!("max error vs exact solution = {:.3e}", err);
        }
    }

    Ok(())
}
