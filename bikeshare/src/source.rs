use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Where to read an input from
#[derive(Clone, Debug, PartialEq)]
pub enum Source {
    Path(PathBuf),
    Url(String),
}

impl Source {
    /// Reads the entire input. There are no retries; a failure here is fatal for the caller.
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            Source::Path(path) => Ok(fs_err::read(path)?),
            Source::Url(url) => {
                debug!("Fetching {url}");
                let resp = reqwest::blocking::get(url)
                    .and_then(|resp| resp.error_for_status())
                    .with_context(|| format!("fetching {url}"))?;
                let bytes = resp.bytes().with_context(|| format!("reading {url}"))?;
                Ok(bytes.to_vec())
            }
        }
    }
}

impl FromStr for Source {
    type Err = anyhow::Error;

    fn from_str(x: &str) -> Result<Self> {
        if x.is_empty() {
            bail!("Empty source");
        }
        if x.starts_with("http://") || x.starts_with("https://") {
            Ok(Source::Url(x.to_string()))
        } else {
            Ok(Source::Path(PathBuf::from(x)))
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Source::Path(path) => write!(f, "{}", path.display()),
            Source::Url(url) => write!(f, "{url}"),
        }
    }
}
