use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use upkeep_core::Ledger;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerSource {
    Local(PathBuf),
    Remote(String),
}

impl LedgerSource {
    pub fn parse(input: &str) -> Self {
        if input.starts_with("http://") || input.starts_with("https://") {
            LedgerSource::Remote(input.to_string())
        } else {
            LedgerSource::Local(PathBuf::from(input))
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, LedgerSource::Remote(_))
    }

    pub fn describe(&self) -> String {
        match self {
            LedgerSource::Local(path) => path.display().to_string(),
            LedgerSource::Remote(url) => url.clone(),
        }
    }
}

pub struct LedgerStore {
    source: LedgerSource,
}

impl LedgerStore {
    pub fn new(source: LedgerSource) -> Self {
        LedgerStore { source }
    }

    pub fn source(&self) -> &LedgerSource {
        &self.source
    }

    pub fn load(&self) -> Result<Option<Ledger>> {
        match &self.source {
            LedgerSource::Local(path) => load_local(path),
            LedgerSource::Remote(url) => fetch_remote(url).map(Some),
        }
    }

    pub fn save(&self, ledger: &Ledger) -> Result<()> {
        match &self.source {
            LedgerSource::Local(path) => save_local(path, ledger),
            LedgerSource::Remote(url) => {
                anyhow::bail!("cannot write ledger to remote source: {url}")
            }
        }
    }
}

fn load_local(path: &Path) -> Result<Option<Ledger>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(err).with_context(|| format!("failed reading ledger: {}", path.display()));
        }
    };

    let ledger = Ledger::from_json(&raw)
        .with_context(|| format!("failed parsing ledger: {}", path.display()))?;
    Ok(Some(ledger))
}

fn save_local(path: &Path, ledger: &Ledger) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating ledger directory: {}", parent.display())
            })?;
        }
    }

    let content = ledger.to_json()?;
    fs::write(path, content).with_context(|| format!("failed writing ledger: {}", path.display()))
}

fn fetch_remote(url: &str) -> Result<Ledger> {
    let client = reqwest::blocking::Client::builder()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .build()
        .context("failed building ledger http client")?;

    let response = client
        .get(url)
        .send()
        .with_context(|| format!("failed fetching ledger: {url}"))?;
    if !response.status().is_success() {
        anyhow::bail!("failed fetching ledger: {url} returned {}", response.status());
    }

    let raw = response
        .text()
        .with_context(|| format!("failed reading ledger body: {url}"))?;
    Ledger::from_json(&raw).with_context(|| format!("failed parsing ledger: {url}"))
}
