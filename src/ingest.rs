//! Load the observation table from a filesystem path or an http(s) URL.
//!
//! The table is delimited text with the header
//! `datetime,tempmax,temp,tempmin,humidity,windspeed,winddir,precip,risk_label,risk_level`.
//! Columns are consumed by name; nothing is validated beyond CSV shape, and
//! record order is file order throughout.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use thiserror::Error;

use crate::models::{ObservationRecord, RawRow, normalize};

/// Failure modes while acquiring or decoding the table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed with HTTP {0}")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decode table: {0}")]
    Decode(#[from] csv::Error),
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Decode CSV rows from any reader.
///
/// Ragged rows are accepted (`flexible`): short rows leave their trailing
/// fields `None`, mirroring how absent cells flow through the pipeline.
pub fn decode_rows<R: Read>(reader: R) -> Result<Vec<RawRow>, SourceError> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        rows.push(row?);
    }
    Ok(rows)
}

/// Table source with a shared blocking HTTP client for URL inputs.
#[derive(Debug, Clone)]
pub struct DataSource {
    http: HttpClient,
}

impl Default for DataSource {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("pyri-rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self { http }
    }
}

impl DataSource {
    /// Load and normalize the table behind `input`, which is either a
    /// filesystem path or an `http://`/`https://` URL.
    pub fn load(&self, input: &str) -> Result<Vec<ObservationRecord>> {
        let rows = if input.starts_with("http://") || input.starts_with("https://") {
            let body = self
                .fetch_text(input)
                .with_context(|| format!("GET {input}"))?;
            decode_rows(body.as_bytes()).context("decode table body")?
        } else {
            self.read_rows(Path::new(input))
                .with_context(|| format!("load {input}"))?
        };
        Ok(normalize(rows))
    }

    fn read_rows(&self, path: &Path) -> Result<Vec<RawRow>, SourceError> {
        let file = File::open(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        decode_rows(file)
    }

    /// GET with a small retry ladder for transient failures (5xx and
    /// network errors); other statuses fail immediately.
    fn fetch_text(&self, url: &str) -> Result<String, SourceError> {
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(url).send() {
                Ok(r) if r.status().is_success() => return Ok(r.text()?),
                Ok(r) if r.status().is_server_error() => { /* retry */ }
                Ok(r) => return Err(SourceError::Status(r.status())),
                Err(_) => { /* retry */ }
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        // Final attempt surfaces whatever is still failing.
        let r = self.http.get(url).send()?;
        if r.status().is_success() {
            Ok(r.text()?)
        } else {
            Err(SourceError::Status(r.status()))
        }
    }
}
