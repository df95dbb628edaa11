// scripts/convergence.rs
use clap::Parser;
use gbm_pricer::analysis::convergence::DEFAULT_SAMPLE_SIZES;
use gbm_pricer::analysis::{run_convergence_study, DistributionSummary, Histogram};
use gbm_pricer::math_utils::Timer;
use gbm_pricer::output::{write_convergence_csv, write_histogram_csv};
use gbm_pricer::{price_simulation, OptionContract, PricingError, PricingResult};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Monte Carlo vs Black-Scholes convergence study for a European call
#[derive(Parser, Debug)]
#[command(name = "convergence", author, version, about, long_about = None)]
struct Args {
    /// Initial asset price
    #[arg(long, default_value_t = 100.0)]
    s0: f64,

    /// Strike price
    #[arg(short = 'k', long, default_value_t = 100.0)]
    strike: f64,

    /// Time to maturity in years
    #[arg(short = 't', long, default_value_t = 1.0)]
    maturity: f64,

    /// Risk-free rate (0.05 = 5%)
    #[arg(short = 'r', long, default_value_t = 0.05, allow_negative_numbers = true)]
    rate: f64,

    /// Volatility (0.2 = 20%)
    #[arg(long, default_value_t = 0.2)]
    sigma: f64,

    /// Seed shared by every run; omit with --random for an entropy seed
    #[arg(long, default_value_t = 42, conflicts_with = "random")]
    seed: u64,

    /// Use OS entropy instead of --seed
    #[arg(long)]
    random: bool,

    /// Comma-separated sample sizes for the convergence table
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    sizes: Option<Vec<i64>>,

    /// Sample count for the terminal-price distribution
    #[arg(long, default_value_t = 1_000_000, allow_negative_numbers = true)]
    dist_samples: i64,

    /// Histogram bins
    #[arg(long, default_value_t = 100)]
    bins: usize,

    /// Directory for CSV reports
    #[arg(short, long, default_value = "results")]
    output_dir: PathBuf,

    /// Rayon worker threads (defaults to all cores)
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> PricingResult<()> {
    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .map_err(|e| PricingError::InvalidConfiguration {
                field: "threads".to_string(),
                reason: e.to_string(),
            })?;
    }

    let contract = OptionContract::new(args.s0, args.strike, args.maturity, args.rate, args.sigma)?;
    let seed = if args.random { None } else { Some(args.seed) };
    let sizes = args
        .sizes
        .clone()
        .unwrap_or_else(|| DEFAULT_SAMPLE_SIZES.to_vec());

    println!("--- Starting Monte Carlo Analysis ---");
    println!(
        "Parameters: S0={}, K={}, T={}, r={}, sigma={}",
        contract.initial_price(),
        contract.strike(),
        contract.maturity(),
        contract.risk_free_rate(),
        contract.volatility()
    );
    println!(
        "CPU Cores: {} | Rayon Threads: {}",
        num_cpus::get(),
        rayon::current_num_threads()
    );

    // Convergence table
    println!("\n[Analysis] Running Convergence Check...");
    let study = run_convergence_study(&contract, &sizes, seed)?;
    println!(
        "[Benchmark] Black-Scholes Analytical Price: {:.6}",
        study.analytical_price
    );
    println!(
        "{:>10} {:>12} {:>12} {:>12} {:>12}",
        "N", "MC Price", "Error", "Std Err", "Time (ms)"
    );
    println!("{:-<62}", "");
    for p in &study.points {
        println!(
            "{:>10} {:>12.6} {:>12.6} {:>12.6} {:>12.2}",
            p.sample_count, p.mc_price, p.abs_error, p.standard_error, p.elapsed_ms
        );
    }
    if !study.is_error_shrinking() {
        info!("largest sample did not beat the smallest one on this seed");
    }

    // Terminal distribution
    println!("\n[Analysis] Generating Distribution Histogram...");
    let timer = Timer::start();
    let result = price_simulation(&contract, args.dist_samples, Some(study.base_seed))?;
    let histogram = Histogram::from_samples(&result.terminal_prices, args.bins)?;
    let summary = DistributionSummary::from_samples(&result.terminal_prices, &contract)?;
    info!(
        samples = summary.sample_count,
        elapsed_ms = timer.elapsed_ms(),
        "distribution sampled"
    );

    println!(
        "  N={} | mean={:.4} (theory {:.4}) | sd={:.4} | min={:.4} | max={:.4} | P(S_T > K)={:.4}",
        summary.sample_count,
        summary.mean,
        summary.theoretical_mean,
        summary.std_dev,
        summary.min,
        summary.max,
        summary.fraction_in_the_money
    );

    // Reports
    std::fs::create_dir_all(&args.output_dir).map_err(|source| PricingError::Io {
        path: args.output_dir.clone(),
        source,
    })?;
    let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
    let convergence_path = args
        .output_dir
        .join(format!("convergence_{}.csv", timestamp));
    let distribution_path = args
        .output_dir
        .join(format!("distribution_{}.csv", timestamp));

    write_convergence_csv(&convergence_path, &study)?;
    write_histogram_csv(&distribution_path, &histogram)?;

    println!("\nSaved '{}'", convergence_path.display());
    println!("Saved '{}'", distribution_path.display());
    Ok(())
}
