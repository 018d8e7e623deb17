use std::collections::HashMap;
use std::error::Error;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use relp_prox::algorithm::OptimizationResult;
use relp_prox::algorithm::outer_approximation::{ApproximationSettings, ApproxManager, OuterApproximation};
use relp_prox::algorithm::proximal::{ProximalTerm, RefinementSettings, refine};
use relp_prox::algorithm::proximal::relaxation::Relaxation;
use relp_prox::data::linear_program::cut::{Cut, CutKey};
use relp_prox::data::linear_program::variable::VariableDomain;
use relp_prox::data::number_types::rational::RationalBig;
use relp_prox::data::number_types::traits::RealField;

/// Minimize a proximal term `(x - target)^2` over a lazily refined outer approximation.
#[derive(Parser)]
#[command(version, author = "Bram van den Heuvel <bram@vandenheuvel.online>")]
struct Opts {
    /// Lower bound of the variable
    #[arg(long, allow_hyphen_values = true)]
    lower: String,
    /// Upper bound of the variable
    #[arg(long, allow_hyphen_values = true)]
    upper: String,
    /// Reference point of the proximal term
    #[arg(long, allow_hyphen_values = true)]
    target: String,
    /// Restrict the variable to integer values
    #[arg(long)]
    integer: bool,
    /// Number of cuts to start with
    #[arg(long, default_value_t = 2)]
    initial_cuts: usize,
    /// Largest accepted value of x^2 - y, 1/100 if absent
    #[arg(long)]
    tolerance: Option<String>,
    /// Maximum number of solves
    #[arg(long, default_value_t = 1000)]
    max_iterations: usize,
    /// Compute with arbitrary precision rationals, numbers can be given as fractions like 31/5
    #[arg(long)]
    exact: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = Opts::parse();
    if opts.exact {
        run::<RationalBig>(&opts)
    } else {
        run::<f64>(&opts)
    }
}

fn parse<F>(option: &str, value: &str) -> Result<F>
where
    F: FromStr,
    F::Err: Error + Send + Sync + 'static,
{
    value.parse().with_context(|| format!("invalid value for --{option}: \"{value}\""))
}

fn run<F>(opts: &Opts) -> Result<()>
where
    F: RealField + FromStr,
    F::Err: Error + Send + Sync + 'static,
{
    let lower = parse::<F>("lower", &opts.lower)?;
    let upper = parse::<F>("upper", &opts.upper)?;
    let target = parse::<F>("target", &opts.target)?;
    let tolerance = match &opts.tolerance {
        Some(tolerance) => parse::<F>("tolerance", tolerance)?,
        None => RefinementSettings::<F>::default().tolerance,
    };

    let domain = if opts.integer {
        VariableDomain::integer(lower, upper)
    } else {
        VariableDomain::continuous(lower, upper)
    };

    let variable = "x";
    let mut store: HashMap<(&str, CutKey), Cut<F>> = HashMap::new();
    let mut relaxation = Relaxation::new(&domain, &variable)?;
    let settings = ApproximationSettings { initial_cut_quantity: opts.initial_cuts };
    let mut manager = ApproxManager::new(&domain, variable, &settings, &mut store, &mut relaxation)?;
    info!(variable_type = ?manager.variable_type(), nr_cuts = manager.nr_cuts(), "approximation created");

    let term = ProximalTerm::new(target);
    let settings = RefinementSettings { tolerance, max_iterations: opts.max_iterations };
    match refine(&mut manager, &mut relaxation, &term, &mut store, &settings) {
        OptimizationResult::FiniteOptimum(summary) => {
            let solution = &summary.solution;
            if !summary.converged {
                println!("Iteration limit reached, the last solution is not within tolerance.");
            }
            println!("x = {}", solution.x);
            println!("y = {}", solution.y);
            println!("linearized term = {}", solution.objective);
            println!("exact term = {}", term.exact(&solution.x));
            println!("{} solves, {} cuts:", summary.nr_iterations, summary.nr_cuts);
            for cut in relaxation.cuts() {
                println!("    {}", cut.to_linear_constraint("x", "y"));
            }
        },
        OptimizationResult::Infeasible => println!("Problem is not feasible."),
    }

    Ok(())
}
