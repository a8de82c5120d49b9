//! Handing resolved ticket URLs to the outside world.

use std::io::{self, Write};

use thiserror::Error;
use tracing::info;

/// Failure to open a URL. Always fatal.
#[derive(Error, Debug)]
#[error("Failed to open {url}")]
pub struct OpenError {
    /// URL that could not be opened.
    pub url: String,
    /// Underlying failure.
    #[source]
    pub source: io::Error,
}

impl OpenError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        45
    }
}

/// Something that can open a URL.
pub trait UrlOpener {
    /// Opens `url`.
    fn open(&mut self, url: &str) -> Result<(), OpenError>;
}

/// Opens URLs in the user's default browser.
#[derive(Debug, Default)]
pub struct BrowserOpener;

impl UrlOpener for BrowserOpener {
    fn open(&mut self, url: &str) -> Result<(), OpenError> {
        info!(url, "Opening URL in browser");
        webbrowser::open(url).map_err(|source| OpenError {
            url: url.to_string(),
            source,
        })
    }
}

/// Writes URLs, one per line, instead of opening them.
#[derive(Debug)]
pub struct PrintOpener<W: Write> {
    out: W,
}

impl<W: Write> PrintOpener<W> {
    /// Creates an opener that prints to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> UrlOpener for PrintOpener<W> {
    fn open(&mut self, url: &str) -> Result<(), OpenError> {
        writeln!(self.out, "{url}").map_err(|source| OpenError {
            url: url.to_string(),
            source,
        })
    }
}
