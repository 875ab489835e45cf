//! Command-line filtering of JSON documents with fuzzy predicates.
//!
//! The binary reads a JSON document (or newline-delimited JSON), keeps the
//! values that fuzzily contain the query, and prints them back as JSON.
//!
//! ```text
//! $ echo '[{"name": "John Doe"}, {"name": "Jane Smith"}]' | fuzzy-filter doe
//! [
//!   {
//!     "name": "John Doe"
//!   }
//! ]
//! ```

pub mod logging;

use std::fs::{self, File};
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use fuzzy_predicate::{FuzzyPredicate, KeySpec, MatchConfig, Metric};
use serde_json::Value;
use tracing::{debug, info};

/// Keep the JSON values that fuzzily contain a query.
#[derive(Debug, Clone, Parser)]
#[command(name = "fuzzy-filter", version, about)]
pub struct Cli {
    /// Text or number to search for (overrides the config file)
    pub query: Option<String>,

    /// Only search values under this key (repeatable)
    #[arg(short = 'k', long = "key", value_name = "KEY")]
    pub keys: Vec<String>,

    /// Match text by similarity ratio at or above this threshold
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Similarity metric: sorensen-dice, jaro-winkler, levenshtein
    #[arg(short, long)]
    pub metric: Option<Metric>,

    /// YAML or JSON file with match settings
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Read documents from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Read and write newline-delimited JSON
    #[arg(long)]
    pub lines: bool,

    /// Print the number of matches instead of the matches
    #[arg(long)]
    pub count: bool,

    /// Treat the query as text even if it looks like a number
    #[arg(long)]
    pub text: bool,

    /// Maximum nesting depth searched
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Resolves the match settings: config file first, then flags on top.
    pub fn match_config(&self) -> Result<MatchConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => MatchConfig::default(),
        };

        if let Some(query) = &self.query {
            config.query = query_value(query, self.text);
        }
        if !self.keys.is_empty() {
            config.keys = KeySpec::Many(self.keys.clone());
        }
        if self.threshold.is_some() {
            config.threshold = self.threshold;
        }
        if let Some(metric) = self.metric {
            config.metric = metric;
        }
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }

        Ok(config)
    }

    /// Builds the predicate from the resolved settings.
    pub fn predicate(&self) -> Result<FuzzyPredicate> {
        let config = self.match_config()?;
        debug!(?config, "resolved match settings");
        config.build().context("invalid match settings")
    }
}

/// Runs the filter, reading from `stdin` unless `--input` names a file.
///
/// Returns the number of matching documents.
pub fn run(cli: &Cli, stdin: impl Read, mut out: impl Write) -> Result<usize> {
    let predicate = cli.predicate()?;

    let documents = match &cli.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open input {}", path.display()))?;
            read_documents(file, cli.lines)?
        }
        None => read_documents(stdin, cli.lines)?,
    };

    let matches = predicate.filter(&documents);
    info!(
        documents = documents.len(),
        matches = matches.len(),
        "filtered"
    );

    if cli.count {
        writeln!(out, "{}", matches.len())?;
    } else if cli.lines {
        for document in &matches {
            serde_json::to_writer(&mut out, document)?;
            writeln!(out)?;
        }
    } else {
        serde_json::to_writer_pretty(&mut out, &matches)?;
        writeln!(out)?;
    }
    out.flush()?;

    Ok(matches.len())
}

/// Reads the candidates to filter.
///
/// A top-level array yields its elements; any other document is a single
/// candidate. With `lines`, every non-blank line is one candidate.
pub fn read_documents(reader: impl Read, lines: bool) -> Result<Vec<Value>> {
    if lines {
        let mut documents = Vec::new();
        for (index, line) in BufReader::new(reader).lines().enumerate() {
            let line = line.context("failed to read input")?;
            if line.trim().is_empty() {
                continue;
            }
            let document = serde_json::from_str(&line)
                .with_context(|| format!("invalid JSON on line {}", index + 1))?;
            documents.push(document);
        }
        return Ok(documents);
    }

    let document: Value = serde_json::from_reader(reader).context("invalid JSON input")?;
    Ok(match document {
        Value::Array(items) => items,
        other => vec![other],
    })
}

/// Interprets a command-line query, preferring a number when it parses as one.
pub fn query_value(query: &str, force_text: bool) -> Value {
    if !force_text {
        if let Ok(number) = query.trim().parse::<serde_json::Number>() {
            return Value::Number(number);
        }
    }
    Value::String(query.to_string())
}

fn load_config(path: &Path) -> Result<MatchConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => MatchConfig::from_json_str(&text),
        _ => MatchConfig::from_yaml_str(&text),
    };
    config.with_context(|| format!("failed to load config {}", path.display()))
}
