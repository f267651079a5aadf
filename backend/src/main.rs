use clap::Parser;
use miette::{MietteHandlerOpts, Result};
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use tracing::info;

use sublines::{ReaderKind, SublinesError, summarize, utils::logging};

#[derive(Parser)]
#[command(
    name = "sublines",
    version,
    about = "Sum the lengths of every escaped-newline subline of a log"
)]
struct Cli {
    /// Log file to read; standard input when omitted
    input: Option<PathBuf>,
    /// Strategy used to walk the input
    #[arg(short, long, value_enum, default_value_t = ReaderKind::Splitter)]
    reader: ReaderKind,
    /// Repeat for more detailed logs on stderr
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    miette::set_hook(Box::new(|_| {
        Box::new(MietteHandlerOpts::new().context_lines(3).build())
    }))?;
    logging::init(cli.verbose)?;

    let summary = match &cli.input {
        Some(path) => {
            info!(path = %path.display(), reader = ?cli.reader, "reading file");
            let file = File::open(path).map_err(|source| SublinesError::Open {
                path: path.clone(),
                source,
            })?;
            summarize(cli.reader, BufReader::new(file))?
        }
        None => {
            info!(reader = ?cli.reader, "reading standard input");
            summarize(cli.reader, io::stdin().lock())?
        }
    };

    println!("Total: {}", summary.total);
    Ok(())
}
