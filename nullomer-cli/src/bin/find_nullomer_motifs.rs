use std::io::BufRead;
use std::path::PathBuf;

use clap::Parser;
use nullomer::abc::Protein;
use nullomer::codon::CodonLookup;
use nullomer::count::DEFAULT_MEMORY_LIMIT;
use nullomer::matcher::MotifMatcher;
use nullomer_cli::Output;
use nullomer_io::error::Error;
use nullomer_io::motifs;

/// Rank the motifs of a given length by the number of nullomers they explain.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Parameters {
    /// peptide count report, as written by `count_peptides`
    input: PathBuf,
    /// file to write the motif ranking to
    output: PathBuf,
    /// length of the motifs to enumerate
    motif_length: usize,

    /// maximum size of the motif tally table, in bytes
    #[arg(long, default_value_t = DEFAULT_MEMORY_LIMIT)]
    memory_limit: usize,
    /// do not show progress bars
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<(), Error> {
    let params = Parameters::parse();
    nullomer_cli::init_logger();

    let mut matcher =
        MotifMatcher::<Protein>::with_limit(params.motif_length, params.memory_limit)?;

    let pbar = nullomer_cli::progress_bar(&params.input, params.quiet)?;
    let mut reader = nullomer_cli::open_input(&params.input, &pbar)?;
    let mut buffer = Vec::new();
    while reader.read_until(b'\n', &mut buffer)? > 0 {
        matcher.scan_bytes(&buffer);
        buffer.clear();
    }
    pbar.finish_and_clear();

    let stats = matcher.stats();
    log::info!(
        "found {} nullomers in {} rows of {} ({} malformed)",
        stats.nullomers,
        stats.rows,
        params.input.display(),
        stats.malformed
    );

    let report = matcher.finish(&CodonLookup::standard())?;
    log::info!(
        "writing {} motifs to {}",
        report.len(),
        params.output.display()
    );
    let output = Output::create(&params.output)?;
    let mut writer = motifs::Writer::new(output)?;
    for row in report {
        writer.write_row(&row)?;
    }
    writer.into_inner()?.finish()?;

    Ok(())
}
