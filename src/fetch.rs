//! Retrieval of the raw feed document, with exponential backoff.
//!
//! The normalization pipeline never touches the network; this module is the
//! collaborator that hands it already-decoded text. It follows a trait-based
//! design:
//! - [`FetchAsync`]: Core trait for retrieving a document by location
//! - [`HttpFetcher`]: Fetches over HTTP(S) with `reqwest`
//! - [`FileFetcher`]: Reads a local export from disk
//! - [`RetryFetch`]: Decorator that adds retry logic to any `FetchAsync`
//!
//! # Retry Strategy
//!
//! - Exponential backoff starting at `base_delay` (1 second by default)
//! - Maximum delay capped at 30 seconds
//! - Random jitter (0-250ms) added to each delay

use rand::{rng, Rng};
use std::error::Error;
use std::fmt;
use std::time::{Duration as StdDuration, Instant};
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

/// Default number of retries after the first failed attempt.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Default initial backoff delay.
pub const DEFAULT_BASE_DELAY: StdDuration = StdDuration::from_secs(1);

/// Trait for async document retrieval.
pub trait FetchAsync {
    /// Retrieve the document at `location` as text.
    async fn fetch(&self, location: &str) -> Result<String, Box<dyn Error>>;
}

/// Wrapper that adds exponential backoff retry logic to any [`FetchAsync`] implementation.
///
/// The delay between retries follows this formula:
/// ```text
/// delay = min(base_delay * 2^(attempt-1), max_delay) + random_jitter(0..250ms)
/// ```
pub struct RetryFetch<T> {
    /// The underlying fetcher to wrap.
    inner: T,
    /// Maximum number of retry attempts before giving up.
    max_retries: usize,
    /// Initial delay between retries (doubles with each attempt).
    base_delay: StdDuration,
    /// Maximum delay cap to prevent excessive waiting.
    max_delay: StdDuration,
}

impl<T> RetryFetch<T>
where
    T: FetchAsync,
{
    /// Create a new retry wrapper around an existing [`FetchAsync`] implementation.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let fetcher = RetryFetch::new(HttpFetcher::new(), 3, Duration::from_secs(1));
    /// let text = fetcher.fetch("https://example.com/feed.csv").await?;
    /// ```
    pub fn new(inner: T, max_retries: usize, base_delay: StdDuration) -> Self {
        Self {
            inner,
            max_retries,
            base_delay,
            max_delay: StdDuration::from_secs(30),
        }
    }

    /// Delay before retry number `attempt` (1-based), without jitter.
    fn backoff(&self, attempt: usize) -> StdDuration {
        let shift = attempt.saturating_sub(1).min(31) as u32;
        self.base_delay
            .saturating_mul(1u32 << shift)
            .min(self.max_delay)
    }
}

impl<T> fmt::Debug for RetryFetch<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryFetch")
            .field("max_retries", &self.max_retries)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish()
    }
}

impl<T> FetchAsync for RetryFetch<T>
where
    T: FetchAsync,
{
    #[instrument(level = "info", skip_all, fields(%location))]
    async fn fetch(&self, location: &str) -> Result<String, Box<dyn Error>> {
        let total_t0 = Instant::now();
        let mut attempt = 0usize;

        loop {
            let attempt_t0 = Instant::now();
            match self.inner.fetch(location).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    attempt += 1;
                    let attempt_dt = attempt_t0.elapsed();
                    let total_dt = total_t0.elapsed();

                    if attempt > self.max_retries {
                        error!(
                            attempt,
                            max = self.max_retries,
                            elapsed_ms_attempt = attempt_dt.as_millis() as u64,
                            elapsed_ms_total = total_dt.as_millis() as u64,
                            error = %e,
                            "fetch() exhausted retries"
                        );
                        return Err(e);
                    }

                    let jitter_ms: u64 = rng().random_range(0..=250);
                    let delay = self.backoff(attempt) + StdDuration::from_millis(jitter_ms);

                    warn!(
                        attempt,
                        max = self.max_retries,
                        elapsed_ms_attempt = attempt_dt.as_millis() as u64,
                        ?delay,
                        error = %e,
                        "fetch() attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}

/// Fetches feed documents over HTTP(S).
///
/// Non-success status codes are treated as errors so they can be retried.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FetchAsync for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%location))]
    async fn fetch(&self, location: &str) -> Result<String, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(location).send().await?.error_for_status()?;
        let text = response.text().await?;
        info!(
            bytes = text.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched feed document"
        );
        Ok(text)
    }
}

/// Reads feed documents from the local file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

impl FetchAsync for FileFetcher {
    #[instrument(level = "info", skip_all, fields(%location))]
    async fn fetch(&self, location: &str) -> Result<String, Box<dyn Error>> {
        let text = tokio::fs::read_to_string(location).await?;
        info!(bytes = text.len(), "Read feed document");
        Ok(text)
    }
}

/// Where the raw feed document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedLocation {
    /// An HTTP(S) URL, fetched with retries.
    Url(String),
    /// A local file path, read once.
    File(String),
}

impl fmt::Display for FeedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedLocation::Url(url) => f.write_str(url),
            FeedLocation::File(path) => f.write_str(path),
        }
    }
}

/// Retrieve the raw feed document from `location`.
///
/// URLs are fetched through [`RetryFetch`] with the given retry settings;
/// files are read once.
#[instrument(level = "info", skip_all, fields(%location))]
pub async fn fetch_document(
    location: &FeedLocation,
    max_retries: usize,
    base_delay: StdDuration,
) -> Result<String, Box<dyn Error>> {
    let t0 = Instant::now();
    let res = match location {
        FeedLocation::Url(url) => {
            RetryFetch::new(HttpFetcher::new(), max_retries, base_delay)
                .fetch(url)
                .await
        }
        FeedLocation::File(path) => FileFetcher.fetch(path).await,
    };
    let dt = t0.elapsed();

    match &res {
        Ok(_) => info!(elapsed_ms_total = dt.as_millis() as u64, "fetch_document succeeded"),
        Err(e) => error!(elapsed_ms_total = dt.as_millis() as u64, error = %e, "fetch_document failed"),
    }
    res
}
