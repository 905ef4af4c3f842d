use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meanlib::{
    Accumulator, Config, Kind, MaxSize, MeanError, StreamConfig, Value, geometric_mean,
    harmonic_mean, mean, weighted_mean,
};
use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

#[derive(Debug, Parser)]
#[command(version, about)]
struct CLI {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Arithmetic mean of the given values.
    Mean {
        #[arg(allow_hyphen_values = true)]
        values: Vec<Value>,
    },

    /// Weighted mean of the given values.
    Weighted {
        /// Comma-separated values.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        values: Vec<Value>,

        /// Comma-separated weights, one per value.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        weights: Vec<Value>,
    },

    /// Geometric mean of the given values.
    Geometric {
        #[arg(allow_hyphen_values = true)]
        values: Vec<Value>,
    },

    /// Harmonic mean of the given values.
    Harmonic {
        #[arg(allow_hyphen_values = true)]
        values: Vec<Value>,
    },

    /// Read values from stdin and print the running mean after each line.
    Stream {
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum)]
        kind: Option<Kind>,

        #[arg(long)]
        max_size: Option<MaxSize>,
    },
}

fn main() {
    env_logger::Builder::new()
        .format_timestamp_millis()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    if let Err(error) = run_cli() {
        log::error!("{error:#?}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<()> {
    let args = CLI::parse();
    log::debug!("{args:#?}");

    match args.command {
        Command::Mean { values } => print_mean(mean(&values)),
        Command::Weighted { values, weights } => {
            print_mean(weighted_mean(&values, &weights).context("failed to compute weighted mean")?)
        }
        Command::Geometric { values } => {
            print_mean(geometric_mean(&values).context("failed to compute geometric mean")?)
        }
        Command::Harmonic { values } => {
            print_mean(harmonic_mean(&values).context("failed to compute harmonic mean")?)
        }
        Command::Stream {
            config,
            kind,
            max_size,
        } => {
            let mut stream = match config {
                Some(file) => {
                    Config::from_file(&file)
                        .with_context(|| format!("failed to load {file:?}"))?
                        .stream
                }
                None => StreamConfig::default(),
            };
            if let Some(kind) = kind {
                stream.kind = kind;
            }
            if max_size.is_some() {
                stream.max_size = max_size;
            }
            run_stream(&stream)?;
        }
    }

    Ok(())
}

fn run_stream(stream: &StreamConfig) -> Result<()> {
    let mut acc = stream.build().context("failed to construct accumulator")?;
    log::info!(
        "streaming {:?} mean (max size: {:?})",
        stream.kind,
        stream.max_size.map(MaxSize::get)
    );

    let mut stdout = io::stdout().lock();
    for (i_line, line) in io::stdin().lock().lines().enumerate() {
        let line = line.context("failed to read line from stdin")?;
        let fields: Vec<_> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        // A rejected line leaves the accumulator as it was.
        match push_fields(acc.as_mut(), &fields) {
            Ok(mean) => writeln!(stdout, "{}", format_mean(mean)).context("failed to write mean")?,
            Err(error) => log::warn!("skipped line {}: {error}", i_line + 1),
        }
    }

    stdout.flush().context("failed to flush stdout")?;

    Ok(())
}

fn push_fields(acc: &mut dyn Accumulator, fields: &[&str]) -> Result<Option<Value>, MeanError> {
    let values = fields
        .iter()
        .map(|field| field.parse())
        .collect::<Result<Vec<Value>, _>>()?;
    match values.as_slice() {
        [value] => acc.update(*value),
        _ => acc.update_list(&values),
    }
}

fn print_mean(mean: Option<Value>) {
    println!("{}", format_mean(mean));
}

fn format_mean(mean: Option<Value>) -> String {
    mean.map_or_else(|| "none".to_string(), |val| val.to_string())
}
