//! Remote existence checks for raw file URLs.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;
use tracing::trace;

/// Type alias for boxed futures returned by checkers.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Why a URL was classified as unreachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnreachableReason {
    /// The server answered with a status outside `200..400`.
    Status(u16),
    /// The request never produced a response (DNS, connect, timeout, ...).
    Transport(String),
}

impl fmt::Display for UnreachableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(status) => write!(f, "HTTP {status}"),
            Self::Transport(message) => write!(f, "request failed: {message}"),
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reachability {
    Reachable { status: u16 },
    Unreachable(UnreachableReason),
}

impl Reachability {
    /// Classify an HTTP status: `200..400` is reachable.
    pub fn from_status(status: u16) -> Self {
        if (200..400).contains(&status) {
            Self::Reachable { status }
        } else {
            Self::Unreachable(UnreachableReason::Status(status))
        }
    }

    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }
}

/// Decides whether a remote URL exists.
///
/// Implementations never fail: every error path is reported as
/// [`Reachability::Unreachable`].
pub trait ReachabilityChecker: Send + Sync {
    fn check<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Reachability>;
}

/// Checker issuing one `HEAD` request per URL.
#[derive(Debug, Clone)]
pub struct HttpChecker {
    client: Client,
}

impl HttpChecker {
    /// Create a checker whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("projtree/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl ReachabilityChecker for HttpChecker {
    fn check<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Reachability> {
        Box::pin(async move {
            let outcome = match self.client.head(url).send().await {
                Ok(response) => Reachability::from_status(response.status().as_u16()),
                Err(err) => {
                    Reachability::Unreachable(UnreachableReason::Transport(err.to_string()))
                }
            };
            trace!("HEAD {url} -> {outcome:?}");
            outcome
        })
    }
}
