use std::path::PathBuf;

use clap::Parser;
use indicatif::ProgressBar;
use nullomer::abc::Protein;
use nullomer::codon::Baseline;
use nullomer::count::PeptideCounter;
use nullomer::count::DEFAULT_MEMORY_LIMIT;
use nullomer_cli::Output;
use nullomer_io::corpus;
use nullomer_io::error::Error;
use nullomer_io::peptides;

/// Count the occurrences of every peptide of a given length in a corpus.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Parameters {
    /// file containing the sequences, such as a UniProtKB XML dump
    input: PathBuf,
    /// file to write the peptide counts to
    output: PathBuf,
    /// length of the peptides to count
    peptide_length: usize,

    /// do not output peptides seen fewer times than this
    #[arg(short = 'c', long = "output_cutoff", default_value_t = 0)]
    output_cutoff: u64,
    /// chance model used to compute the occurrence rate
    #[arg(long, default_value_t = Baseline::Codon)]
    baseline: Baseline,
    /// maximum size of the count table, in bytes
    #[arg(long, default_value_t = DEFAULT_MEMORY_LIMIT)]
    memory_limit: usize,
    /// do not show progress bars
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Error> {
    let params = Parameters::parse();
    nullomer_cli::init_logger();

    let mut counter =
        PeptideCounter::<Protein>::with_limit(params.peptide_length, params.memory_limit)?;

    let pbar = nullomer_cli::progress_bar(&params.input, params.quiet)?;
    let mut sequences = corpus::read(nullomer_cli::open_input(&params.input, &pbar)?);
    for sequence in sequences.by_ref() {
        counter.count_sequence(&sequence?);
    }
    pbar.finish_and_clear();

    let stats = counter.stats();
    log::info!(
        "found {} sequences in {} lines of {}",
        sequences.sequences(),
        sequences.lines(),
        params.input.display()
    );
    log::info!(
        "counted {} peptides ({} sequences rejected, {} too short)",
        stats.peptides,
        stats.rejected,
        stats.too_short
    );

    let model = params.baseline.model();
    let report = counter.report(params.output_cutoff, &*model);
    log::info!(
        "writing {} peptides (total = {}, baseline = {}) to {}",
        report.len(),
        report.total(),
        params.baseline,
        params.output.display()
    );

    let wbar = if params.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(report.len() as u64)
    };
    let mut writer = peptides::Writer::new(Output::create(&params.output)?)?;
    for row in wbar.wrap_iter(report) {
        writer.write_row(&row)?;
    }
    wbar.finish_and_clear();
    writer.into_inner()?.finish()?;

    Ok(())
}
