//! Locating generated artifacts by name prefix and writing stripped copies
//! into a destination asset folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::background::WHITEISH_THRESHOLD;
use crate::strip_background_bytes;

/// Logical names of the decoration assets generated for the web project.
pub const DEFAULT_ASSET_NAMES: &[&str] = &[
    "space_suit",
    "wizard_hat",
    "sunglasses",
    "star_cookie",
    "moon_milk",
    "toy_rocket",
];

const PNG_EXTENSION: &str = ".png";

/// Entries that look like a generated artifact for `name`, in listing order.
pub fn matching_sources<'a>(
    entries: &'a [String],
    name: &'a str,
) -> impl Iterator<Item = &'a str> + 'a {
    entries
        .iter()
        .map(String::as_str)
        .filter(move |entry| entry.starts_with(name) && entry.ends_with(PNG_EXTENSION))
}

/// First entry matching `name`. Artifacts carry a timestamp suffix, so the
/// first one in listing order wins.
pub fn select_source<'a>(entries: &'a [String], name: &'a str) -> Option<&'a str> {
    matching_sources(entries, name).next()
}

/// `moon_milk` -> `moon-milk.png`
pub fn destination_file_name(name: &str) -> String {
    format!("{}{PNG_EXTENSION}", name.replace('_', "-"))
}

/// File names of `dir` in the order the OS lists them. Names that are not
/// valid UTF-8 cannot match a logical name and are dropped.
pub fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let entry = entry.with_context(|| format!("reading entry of {}", dir.display()))?;
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }
    Ok(names)
}

#[derive(Clone, Debug)]
pub struct BatchConfig {
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub names: Vec<String>,
    pub threshold: u8,
}

impl BatchConfig {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            names: DEFAULT_ASSET_NAMES.iter().map(|s| s.to_string()).collect(),
            threshold: WHITEISH_THRESHOLD,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetOutcome {
    pub name: String,
    pub source: PathBuf,
    pub destination: PathBuf,
    pub cleared: usize,
}

#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    pub processed: Vec<AssetOutcome>,
    pub missing: Vec<String>,
}

fn process_one(source: &Path, destination: &Path, threshold: u8) -> Result<usize> {
    let bytes = fs::read(source).context("read failed")?;
    let (png, cleared) = strip_background_bytes(&bytes, threshold)?;
    fs::write(destination, png).context("write failed")?;
    Ok(cleared)
}

/// Run the whole batch.
///
/// Only environment failures (destination not creatable, source not
/// listable) abort the run. A file that fails to decode or save is logged and
/// the next matching candidate is tried; a name with no usable candidate is
/// reported as missing.
pub fn process_assets(config: &BatchConfig) -> Result<BatchReport> {
    fs::create_dir_all(&config.dest_dir)
        .with_context(|| format!("creating {}", config.dest_dir.display()))?;
    let entries = list_entries(&config.source_dir)?;
    Ok(process_entries(config, &entries))
}

/// Batch over an already listed source directory. `entries` order decides
/// which candidate is tried first; the destination directory must exist.
pub fn process_entries(config: &BatchConfig, entries: &[String]) -> BatchReport {
    log::info!(
        "processing {} asset(s) from {}",
        config.names.len(),
        config.source_dir.display()
    );

    let mut report = BatchReport::default();

    for name in &config.names {
        let destination = config.dest_dir.join(destination_file_name(name));
        let mut outcome = None;

        for filename in matching_sources(entries, name) {
            let source = config.source_dir.join(filename);
            match process_one(&source, &destination, config.threshold) {
                Ok(cleared) => {
                    log::info!("processed {filename} -> {}", destination.display());
                    outcome = Some(AssetOutcome {
                        name: name.clone(),
                        source,
                        destination: destination.clone(),
                        cleared,
                    });
                    break;
                }
                Err(e) => log::error!("failed to process {filename}: {e:#}"),
            }
        }

        match outcome {
            Some(o) => report.processed.push(o),
            None => {
                log::warn!("could not find image for {name}");
                report.missing.push(name.clone());
            }
        }
    }

    report
}
