// src/output.rs
use crate::analysis::{ConvergenceStudy, Histogram};
use crate::error::{PricingError, PricingResult};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PricingError + '_ {
    move |source| PricingError::Io {
        path: path.to_path_buf(),
        source,
    }
}

pub fn write_convergence_csv(path: &Path, study: &ConvergenceStudy) -> PricingResult<()> {
    write_convergence(path, study).map_err(io_error(path))
}

fn write_convergence(path: &Path, study: &ConvergenceStudy) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    let c = &study.contract;
    writeln!(
        file,
        "# s0={},k={},t={},r={},sigma={},seed={}",
        c.initial_price(),
        c.strike(),
        c.maturity(),
        c.risk_free_rate(),
        c.volatility(),
        study.base_seed
    )?;
    writeln!(file, "# analytical_price={:.8}", study.analytical_price)?;
    writeln!(file, "paths,mc_price,abs_error,std_error,time_ms")?;
    for p in &study.points {
        writeln!(
            file,
            "{},{:.8},{:.8},{:.8},{:.3}",
            p.sample_count, p.mc_price, p.abs_error, p.standard_error, p.elapsed_ms
        )?;
    }
    file.flush()
}

pub fn write_histogram_csv(path: &Path, histogram: &Histogram) -> PricingResult<()> {
    write_histogram(path, histogram).map_err(io_error(path))
}

fn write_histogram(path: &Path, histogram: &Histogram) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    writeln!(file, "bin_start,bin_end,count,density")?;
    for (i, w) in histogram.edges.windows(2).enumerate() {
        writeln!(
            file,
            "{:.6},{:.6},{},{:.10}",
            w[0], w[1], histogram.counts[i], histogram.densities[i]
        )?;
    }
    file.flush()
}
