use crate::accumulator::{Accumulator, RunningMean};
use crate::window::{Arithmetic, Geometric, Harmonic, MaxSize, MeanKind, Window};
use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use serde::Deserialize;
use std::{fs, path::Path};

/// Configuration of the `stream` command.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Accumulator settings.
    #[serde(default)]
    pub stream: StreamConfig,
}

#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamConfig {
    /// Which mean to maintain.
    #[serde(default)]
    pub kind: Kind,
    /// Maximum number of retained values (`None` for an unbounded window).
    ///
    /// Accepts an integer or a string holding one.
    pub max_size: Option<MaxSize>,
}

/// Mean maintained by a streaming accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    /// Running mean of every value, no window.
    Simple,
    #[default]
    Arithmetic,
    Geometric,
    Harmonic,
}

impl Config {
    /// Load a [`Config`] from a file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let text = fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::parse(&text)
    }

    /// Parse and validate a [`Config`] from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.stream.validate().context("invalid stream settings")
    }
}

impl StreamConfig {
    fn validate(&self) -> Result<()> {
        if self.kind == Kind::Simple && self.max_size.is_some() {
            bail!("max_size is not supported by the simple running mean");
        }
        Ok(())
    }

    /// Construct the accumulator these settings describe.
    pub fn build(&self) -> Result<Box<dyn Accumulator>> {
        self.validate()?;

        let acc: Box<dyn Accumulator> = match self.kind {
            Kind::Simple => Box::new(RunningMean::new()),
            Kind::Arithmetic => Box::new(new_window::<Arithmetic>(self.max_size)),
            Kind::Geometric => Box::new(new_window::<Geometric>(self.max_size)),
            Kind::Harmonic => Box::new(new_window::<Harmonic>(self.max_size)),
        };
        Ok(acc)
    }
}

fn new_window<K: MeanKind>(max_size: Option<MaxSize>) -> Window<K> {
    match max_size {
        Some(max_size) => Window::with_max_size(max_size),
        None => Window::new(),
    }
}
