//! permfdr command-line interface

use clap::Parser;
use log::{info, LevelFilter};

use permfdr::cli::{Cli, Commands};
use permfdr::prelude::*;

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Commands::Adjust {
            intensities,
            design,
            fdr,
            permutations,
            seed,
            welch,
            output,
        } => run_adjust(
            &intensities,
            &design,
            fdr,
            permutations,
            seed,
            welch,
            output.as_deref(),
        ),
        Commands::Pvalues {
            intensities,
            design,
            welch,
            output,
        } => run_pvalues(&intensities, &design, welch, &output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn observed_for(
    welch: bool,
    intensities: &IntensityMatrix,
    design: &Design,
) -> Result<Vec<f64>> {
    if welch {
        observed_pvalues(&WelchT, intensities, design)
    } else {
        observed_pvalues(&StudentT, intensities, design)
    }
}

fn run_adjust(
    intensities_path: &str,
    design_path: &str,
    fdr: f64,
    permutations: usize,
    seed: Option<u64>,
    welch: bool,
    output_path: Option<&str>,
) -> Result<()> {
    let loaded = read_intensities(intensities_path)?;
    let design = read_design(design_path, &loaded.unit_ids)?;

    info!(
        "loaded {} units x {} features ({} control, {} treatment)",
        loaded.matrix.n_units(),
        loaded.matrix.n_features(),
        design.n_control(),
        design.n_treatment()
    );

    let observed = observed_for(welch, &loaded.matrix, &design)?;

    let params = FdrParams {
        n_perms: permutations,
        seed,
    };
    let threshold = if welch {
        adjust_fdr_threshold_with(&WelchT, &observed, fdr, &design, &loaded.matrix, &params)?
    } else {
        adjust_fdr_threshold(&observed, fdr, &design, &loaded.matrix, &params)?
    };

    let sorted = sorted_ascending(&observed);
    let n_discoveries = count_hits(&sorted, threshold);

    let summary = AdjustSummary {
        threshold,
        target_fdr: fdr,
        n_perms: permutations,
        n_features: loaded.matrix.n_features(),
        n_discoveries,
    };

    println!("Adjusted rejection threshold: {:.6}", summary.threshold);
    println!(
        "Discoveries: {} of {} features at target FDR {}",
        summary.n_discoveries, summary.n_features, summary.target_fdr
    );

    if let Some(path) = output_path {
        let json = serde_json::to_string_pretty(&summary)?;
        std::fs::write(path, json)?;
        info!("wrote summary to {}", path);
    }

    Ok(())
}

fn run_pvalues(
    intensities_path: &str,
    design_path: &str,
    welch: bool,
    output_path: &str,
) -> Result<()> {
    let loaded = read_intensities(intensities_path)?;
    let design = read_design(design_path, &loaded.unit_ids)?;

    let pvalues = observed_for(welch, &loaded.matrix, &design)?;
    write_pvalues(output_path, &loaded.feature_names, &pvalues)?;

    info!(
        "wrote {} p-values to {}",
        pvalues.len(),
        output_path
    );
    Ok(())
}
