//! Staleness-driven refresh of the on-disk dataset cache.
//!
//! Decides whether the locally cached dataset file is missing or older
//! than the staleness threshold and, if so, replaces it from the remote
//! source in a single blocking GET. A fresh file is left untouched and
//! no network access is performed.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::error::FetchError;

/// Default staleness threshold: 7 days.
const DEFAULT_STALE: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Configuration for the dataset refresher.
#[derive(Debug, Clone)]
pub struct RefreshConfig {
    /// Directory the cached dataset file lives in.
    pub storage_dir: PathBuf,

    /// File name of the cached dataset within `storage_dir`.
    pub file_name: String,

    /// URL the dataset is fetched from.
    pub source_url: String,

    /// Maximum cache age before a refresh is attempted.
    /// Zero means "always refresh".
    pub stale_after: Duration,
}

impl RefreshConfig {
    /// Create a new config with the default staleness threshold (7 days).
    pub fn new(
        storage_dir: impl Into<PathBuf>,
        file_name: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            file_name: file_name.into(),
            source_url: source_url.into(),
            stale_after: DEFAULT_STALE,
        }
    }

    /// Set a custom staleness threshold.
    pub fn with_stale_after(mut self, stale_after: Duration) -> Self {
        self.stale_after = stale_after;
        self
    }

    /// Full path of the cached dataset file.
    pub fn target_path(&self) -> PathBuf {
        self.storage_dir.join(&self.file_name)
    }
}

/// Outcome of a refresh attempt. All three are non-fatal to the caller.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The file was missing or stale and has been replaced.
    Downloaded,

    /// The file is younger than the staleness threshold; nothing was
    /// fetched.
    Current,

    /// A fetch was attempted and failed; the prior cache (if any) is
    /// untouched.
    Failed(FetchError),
}

impl RefreshOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, RefreshOutcome::Failed(_))
    }
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshOutcome::Downloaded => f.write_str("downloaded"),
            RefreshOutcome::Current => f.write_str("current, not downloaded"),
            RefreshOutcome::Failed(e) => write!(f, "failed: {e}"),
        }
    }
}

/// Refreshes the on-disk dataset cache from a remote source.
///
/// The HTTP client has its request timeout disabled: each
/// [`refresh`](Self::refresh) performs one blocking call, and callers
/// needing bounded latency impose their own timeout around it.
pub struct Refresher {
    http: reqwest::blocking::Client,
    config: RefreshConfig,
}

impl Refresher {
    /// Create a new refresher with the given configuration.
    pub fn new(config: RefreshConfig) -> Result<Self, FetchError> {
        let http = reqwest::blocking::Client::builder().timeout(None).build()?;
        Ok(Self { http, config })
    }

    /// The refresher's configuration.
    pub fn config(&self) -> &RefreshConfig {
        &self.config
    }

    /// Refresh the cached dataset file if it is missing or stale.
    ///
    /// At most one fetch attempt is made, with no retries; invocation
    /// frequency is the caller's concern.
    pub fn refresh(&self) -> RefreshOutcome {
        let target = self.config.target_path();

        if let Some(age) = file_age(&target)
            && age < self.config.stale_after
        {
            debug!(file = %target.display(), age_secs = age.as_secs(), "alias dataset is current");
            return RefreshOutcome::Current;
        }

        match self.fetch_to(&target) {
            Ok(()) => {
                info!(file = %target.display(), url = %self.config.source_url, "alias dataset downloaded");
                RefreshOutcome::Downloaded
            }
            Err(e) => {
                warn!(file = %target.display(), error = %e, "alias dataset download failed");
                RefreshOutcome::Failed(e)
            }
        }
    }

    /// Fetch the dataset and replace `target`.
    ///
    /// The body is written to a temporary file in the storage directory
    /// and renamed over the target; a partial write never lands at the
    /// target path.
    fn fetch_to(&self, target: &Path) -> Result<(), FetchError> {
        let body = self
            .http
            .get(&self.config.source_url)
            .send()?
            .error_for_status()?
            .bytes()?;

        if !self.config.storage_dir.exists() {
            fs::create_dir_all(&self.config.storage_dir)?;
        }

        let mut tmp = NamedTempFile::new_in(&self.config.storage_dir)?;
        tmp.write_all(&body)?;
        tmp.persist(target)?;
        Ok(())
    }
}

/// Age of the file at `path`, or `None` if it does not exist.
///
/// A modification time in the future counts as age zero.
fn file_age(path: &Path) -> Option<Duration> {
    let modified = fs::metadata(path).ok()?.modified().ok()?;
    Some(
        SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;
    use tempfile::tempdir;

    /// Serve a single canned HTTP response on a loopback port.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = [0u8; 1024];
            let _ = stream.read(&mut request);
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{addr}/")
    }

    /// A loopback URL with nothing listening on it.
    fn dead_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/")
    }

    #[test]
    fn missing_file_is_downloaded() {
        let dir = tempdir().unwrap();
        let url = serve_once("200 OK", r#"{"results": []}"#);
        let refresher = Refresher::new(RefreshConfig::new(dir.path(), "peers.json", url)).unwrap();

        assert!(matches!(refresher.refresh(), RefreshOutcome::Downloaded));
        let written = fs::read_to_string(dir.path().join("peers.json")).unwrap();
        assert_eq!(written, r#"{"results": []}"#);
    }

    #[test]
    fn fresh_file_is_current_without_network() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("peers.json"), "cached").unwrap();

        // Any fetch against this URL would come back Failed, not Current.
        let config = RefreshConfig::new(dir.path(), "peers.json", dead_url())
            .with_stale_after(Duration::from_secs(3600));
        let refresher = Refresher::new(config).unwrap();

        assert!(matches!(refresher.refresh(), RefreshOutcome::Current));
        assert_eq!(
            fs::read_to_string(dir.path().join("peers.json")).unwrap(),
            "cached"
        );
    }

    #[test]
    fn zero_staleness_always_fetches() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("peers.json"), "cached").unwrap();

        let config = RefreshConfig::new(dir.path(), "peers.json", dead_url())
            .with_stale_after(Duration::ZERO);
        let refresher = Refresher::new(config).unwrap();

        // The file is brand new, but a zero threshold forces an attempt.
        assert!(refresher.refresh().is_failed());
    }

    #[test]
    fn stale_file_is_replaced() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("peers.json"), "old").unwrap();

        let url = serve_once("200 OK", "new");
        let config =
            RefreshConfig::new(dir.path(), "peers.json", url).with_stale_after(Duration::ZERO);
        let refresher = Refresher::new(config).unwrap();

        assert!(matches!(refresher.refresh(), RefreshOutcome::Downloaded));
        assert_eq!(
            fs::read_to_string(dir.path().join("peers.json")).unwrap(),
            "new"
        );
    }

    #[test]
    fn failed_fetch_leaves_prior_cache_untouched() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("peers.json"), "cached").unwrap();

        let config = RefreshConfig::new(dir.path(), "peers.json", dead_url())
            .with_stale_after(Duration::ZERO);
        let refresher = Refresher::new(config).unwrap();

        assert!(refresher.refresh().is_failed());
        assert_eq!(
            fs::read_to_string(dir.path().join("peers.json")).unwrap(),
            "cached"
        );
    }

    #[test]
    fn error_status_is_a_failure() {
        let dir = tempdir().unwrap();
        let url = serve_once("404 Not Found", "gone");
        let refresher = Refresher::new(RefreshConfig::new(dir.path(), "peers.json", url)).unwrap();

        assert!(refresher.refresh().is_failed());
        assert!(!dir.path().join("peers.json").exists());
    }

    #[test]
    fn creates_storage_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("aliases");

        let url = serve_once("200 OK", "body");
        let refresher = Refresher::new(RefreshConfig::new(&nested, "peers.json", url)).unwrap();

        assert!(matches!(refresher.refresh(), RefreshOutcome::Downloaded));
        assert!(nested.join("peers.json").exists());
    }

    #[test]
    fn default_staleness_is_seven_days() {
        let config = RefreshConfig::new("/tmp", "peers.json", "http://example.invalid/");
        assert_eq!(config.stale_after, Duration::from_secs(604_800));
    }

    #[test]
    fn target_path_joins_dir_and_file() {
        let config = RefreshConfig::new("/var/cache", "peers.json", "http://example.invalid/");
        assert_eq!(config.target_path(), PathBuf::from("/var/cache/peers.json"));
    }

    #[test]
    fn outcome_display() {
        assert_eq!(RefreshOutcome::Downloaded.to_string(), "downloaded");
        assert_eq!(RefreshOutcome::Current.to_string(), "current, not downloaded");
    }
}
