use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::config::FetchSettings;
use crate::core::cache::PageCache;
use crate::core::error::{FetchError, FetchFailure};
use crate::features::fetcher::dto::Page;
use crate::features::fetcher::policy::{Clock, RetryPolicy, SystemClock};
use crate::features::fetcher::transport::Transport;

#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError>;
}

struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::new(None),
        }
    }

    async fn wait_turn(&self, clock: &dyn Clock) {
        let mut last_request = self.last_request.lock().await;
        if let Some(previous) = *last_request {
            let elapsed = clock.now().saturating_duration_since(previous);
            let remaining = self.min_interval.saturating_sub(elapsed);
            if !remaining.is_zero() {
                clock.sleep(remaining).await;
            }
        }
        *last_request = Some(clock.now());
    }
}

pub struct ResilientFetcher {
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    policy: RetryPolicy,
    limiter: RateLimiter,
    referer: Option<String>,
    cache: Option<PageCache>,
}

impl ResilientFetcher {
    pub fn new(transport: Arc<dyn Transport>, settings: &FetchSettings) -> Self {
        Self {
            transport,
            clock: Arc::new(SystemClock),
            policy: RetryPolicy::from_settings(settings),
            limiter: RateLimiter::new(settings.request_delay()),
            referer: None,
            cache: None,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn fetch_with_policy(
        &self,
        url: &Url,
        policy: &RetryPolicy,
    ) -> Result<Page, FetchError> {
        if let Some(page) = self.read_cached(url).await {
            return Ok(page);
        }

        let mut attempt = 0;
        loop {
            attempt += 1;
            self.limiter.wait_turn(self.clock.as_ref()).await;
            debug!(
                url = %url,
                attempt,
                max_attempts = policy.max_attempts,
                "requesting page"
            );

            let failure = match self.transport.get(url, self.referer.as_deref()).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    let page = Page::new(url.clone(), response.status, response.body, attempt);
                    self.store_cached(&page).await;
                    return Ok(page);
                }
                Ok(response) => FetchFailure::Status(response.status),
                Err(failure) => failure,
            };

            if !policy.should_retry(attempt, &failure) {
                warn!(url = %url, attempts = attempt, %failure, "giving up on page");
                return Err(FetchError {
                    url: url.to_string(),
                    failure,
                    attempts_made: attempt,
                });
            }

            let delay = policy.backoff_after(attempt);
            warn!(
                url = %url,
                attempt,
                %failure,
                backoff_ms = delay.as_millis() as u64,
                "attempt failed, backing off"
            );
            self.clock.sleep(delay).await;
        }
    }

    async fn read_cached(&self, url: &Url) -> Option<Page> {
        let cache = self.cache.as_ref()?;
        match cache.get(url.as_str()).await {
            Ok(Some(body)) => {
                debug!(url = %url, "serving page from cache");
                Some(Page::cached(url.clone(), body))
            }
            Ok(None) => None,
            Err(err) => {
                warn!(url = %url, error = %err, "page cache lookup failed");
                None
            }
        }
    }

    async fn store_cached(&self, page: &Page) {
        if let Some(cache) = &self.cache {
            if let Err(err) = cache.insert(page.url.as_str(), &page.body).await {
                warn!(url = %page.url, error = %err, "failed to cache page");
            }
        }
    }
}

#[async_trait]
impl PageSource for ResilientFetcher {
    async fn fetch(&self, url: &Url) -> Result<Page, FetchError> {
        self.fetch_with_policy(url, &self.policy).await
    }
}
