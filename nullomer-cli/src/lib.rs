//! Shared plumbing of the `count_peptides` and `find_nullomer_motifs` tools.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;

const PROGRESS_TEMPLATE: &str =
    "[{elapsed_precise}] {bar:40.cyan/blue} {percent_precise}% {bytes}/{total_bytes} {msg}";

/// Check whether a path should be handled as gzip-compressed.
pub fn is_gzip<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().extension().map_or(false, |ext| ext == "gz")
}

/// Initialize logging, at `info` level unless `RUST_LOG` says otherwise.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

/// Create a progress bar tracking the bytes read from a file.
pub fn progress_bar<P: AsRef<Path>>(path: P, quiet: bool) -> Result<ProgressBar, std::io::Error> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }
    let length = std::fs::metadata(path)?.len();
    let style = ProgressStyle::with_template(PROGRESS_TEMPLATE)
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    Ok(ProgressBar::new(length).with_style(style))
}

/// Open a file for buffered reading, decompressing it if needed.
///
/// Progress is reported on the raw bytes read from the file, before
/// decompression.
pub fn open_input<P: AsRef<Path>>(
    path: P,
    pbar: &ProgressBar,
) -> Result<Box<dyn BufRead>, std::io::Error> {
    let file = pbar.wrap_read(File::open(path.as_ref())?);
    if is_gzip(path) {
        let decoder = MultiGzDecoder::new(BufReader::new(file));
        Ok(Box::new(BufReader::new(decoder)))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

// --- Output ------------------------------------------------------------------

/// An output file, compressed with gzip if its path ends in `.gz`.
pub enum Output {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
}

impl Output {
    /// Create the output file at the given path.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let file = File::create(path.as_ref()).map(BufWriter::new)?;
        if is_gzip(path) {
            Ok(Output::Gzip(GzEncoder::new(file, Compression::default())))
        } else {
            Ok(Output::Plain(file))
        }
    }

    /// Write the gzip trailer if any and flush the file.
    pub fn finish(self) -> Result<(), std::io::Error> {
        match self {
            Output::Plain(mut w) => w.flush(),
            Output::Gzip(w) => w.finish()?.flush(),
        }
    }
}

impl Write for Output {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self {
            Output::Plain(w) => w.write(buf),
            Output::Gzip(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self {
            Output::Plain(w) => w.flush(),
            Output::Gzip(w) => w.flush(),
        }
    }
}
