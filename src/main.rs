use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use freq_huffman::{report, text, FrequencyTable, HuffmanTree};
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
enum Error {
    /// just relaying io::Error
    #[error(transparent)]
    Io(#[from] io::Error),

    /// a named input file could not be read
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    /// a named output file could not be created
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    /// neither a table nor a sample text was given
    #[error("no frequency table given")]
    NoTable,

    /// there is no input from stdin
    #[error("input must be piped through stdin")]
    NoStdin,

    /// building, encoding or decoding failed
    #[error(transparent)]
    Huffman(#[from] freq_huffman::Error),
}

// options
use clap::{ArgGroup, Parser, Subcommand};

/// represent all acceptable arguments
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(group(ArgGroup::new("source").required(true).args(&["table", "sample"])))]
struct Args {
    /// frequency table, one `symbol frequency` entry per line
    #[clap(short, long, parse(from_os_str))]
    table: Option<PathBuf>,

    /// text whose normalized letter counts make the frequency table
    #[clap(short, long, parse(from_os_str))]
    sample: Option<PathBuf>,

    /// log filter used when RUST_LOG is not set
    #[clap(long, default_value = "warn")]
    log_level: String,

    #[clap(subcommand)]
    mode: Mode,
}
#[derive(Subcommand)]
enum Mode {
    /// prints each symbol with its code
    Codebook,

    /// encodes plaintext lines from stdin
    Encode,

    /// decodes bitstring lines from stdin
    Decode,

    /// encodes a clear text file and decodes an encoded file into a report
    Report {
        /// plaintext, one message per line
        #[clap(long, parse(from_os_str))]
        clear: PathBuf,

        /// bitstrings, one message per line
        #[clap(long, parse(from_os_str))]
        encoded: PathBuf,

        /// report destination, replaced if it exists
        #[clap(short, long, parse(from_os_str), default_value = "output.txt")]
        output: PathBuf,
    },
}

fn read_file(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })
}

fn create_file(path: &Path) -> Result<BufWriter<File>, Error> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Write {
            path: path.to_owned(),
            source,
        })
}

fn load_table(args: &Args) -> Result<FrequencyTable, Error> {
    let table = match (&args.table, &args.sample) {
        (Some(path), _) => read_file(path)?.parse::<FrequencyTable>()?,
        (None, Some(path)) => text::sample_table(&read_file(path)?)?,
        (None, None) => return Err(Error::NoTable),
    };
    Ok(table)
}

/// abort when stdin is a terminal rather than piped input
fn ensure_piped() -> Result<(), Error> {
    if atty::is(atty::Stream::Stdin) {
        return Err(Error::NoStdin);
    }
    Ok(())
}

fn main() -> Result<(), Error> {
    // get arguments
    let args = Args::parse();

    // logs go to stderr, stdout only carries results
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    // prepare stdout with buffering
    let stdout = io::stdout();
    let mut stdout = BufWriter::new(stdout.lock());
    macro_rules! println {
        ($($arg:tt)*) => ({
            writeln!(stdout, $($arg)*)?;
        })
    }

    let table = load_table(&args)?;
    let tree = HuffmanTree::new(&table)?;
    info!(symbols = table.len(), "built tree");

    // run each subcommands
    match args.mode {
        Mode::Codebook => println!("{}", report::format_codebook(&tree)),
        Mode::Encode => {
            ensure_piped()?;
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = text::normalize(&line?);
                if line.is_empty() {
                    continue;
                }
                println!("{}", tree.encode(&line)?);
            }
        }
        Mode::Decode => {
            ensure_piped()?;
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                println!("{}", tree.decode(line)?);
            }
        }
        Mode::Report {
            clear,
            encoded,
            output,
        } => {
            let clear_text = read_file(&clear)?;
            let encoded_text = read_file(&encoded)?;
            let clear: Vec<String> = text::clear_messages(&clear_text).collect();
            let encoded: Vec<&str> = text::encoded_messages(&encoded_text).collect();
            info!(
                clear = clear.len(),
                encoded = encoded.len(),
                "loaded messages"
            );

            let mut file = create_file(&output)?;
            report::write_report(&mut file, &table, &tree, &clear, &encoded)?;
            file.flush()?;
            println!("report written to {}", output.display());
        }
    }
    stdout.flush()?;
    Ok(())
}
