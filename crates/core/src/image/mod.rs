pub mod search;
pub mod stock;

use crate::image::search::{ImageProbe, ImageSearchClient};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Terminal tier: a generic gift image that is always returnable.
pub const DEFAULT_GIFT_IMAGE: &str =
    "https://images.unsplash.com/photo-1549465220-1a8b9238cd48?w=640";

/// How many ranked search results to probe before giving up on the tier.
const SEARCH_CANDIDATES: usize = 5;

const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 3;

/// Multi-tier image resolution: web search (probed), keyword stock images,
/// then a static default. Never fails; every tier error advances the chain.
pub struct ImageResolver {
    search: Option<Arc<dyn ImageSearchClient>>,
    probe: Arc<dyn ImageProbe>,
    search_timeout: Duration,
}

impl ImageResolver {
    pub fn new(search: Option<Arc<dyn ImageSearchClient>>, probe: Arc<dyn ImageProbe>) -> Self {
        Self {
            search,
            probe,
            search_timeout: Duration::from_secs(DEFAULT_SEARCH_TIMEOUT_SECS),
        }
    }

    /// No network tiers at all; stock keywords and the default still apply.
    pub fn offline() -> Self {
        Self::new(None, Arc::new(search::NoProbe))
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub async fn resolve(&self, name: &str, description: &str) -> String {
        if let Some(url) = self.try_web_search(name).await {
            return url;
        }

        let keyword_input = format!("{name} {description}");
        if let Some(url) = stock::stock_image_for(&keyword_input) {
            return url.to_string();
        }

        DEFAULT_GIFT_IMAGE.to_string()
    }

    async fn try_web_search(&self, term: &str) -> Option<String> {
        let search = self.search.as_ref()?;
        let query = clean_search_term(term);
        if query.is_empty() {
            return None;
        }

        let fetched = tokio::time::timeout(
            self.search_timeout,
            search.search_images(&query, SEARCH_CANDIDATES),
        )
        .await;

        let urls = match fetched {
            Ok(Ok(urls)) => urls,
            Ok(Err(err)) => {
                tracing::warn!(
                    provider = search.provider_name(),
                    query = %query,
                    error = %err,
                    "image search failed; advancing tier"
                );
                return None;
            }
            Err(_) => {
                tracing::warn!(
                    provider = search.provider_name(),
                    query = %query,
                    "image search timed out; advancing tier"
                );
                return None;
            }
        };

        for url in urls.into_iter().take(SEARCH_CANDIDATES) {
            if Url::parse(&url).is_err() {
                continue;
            }
            if self.probe.is_live_image(&url).await {
                return Some(url);
            }
        }
        None
    }
}

/// Collapse whitespace and drop punctuation the search API chokes on.
fn clean_search_term(term: &str) -> String {
    term.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingSearch;

    #[async_trait]
    impl ImageSearchClient for FailingSearch {
        fn provider_name(&self) -> &'static str {
            "failing"
        }

        async fn search_images(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<String>> {
            anyhow::bail!("search backend down")
        }
    }

    struct FixedSearch(Vec<String>);

    #[async_trait]
    impl ImageSearchClient for FixedSearch {
        fn provider_name(&self) -> &'static str {
            "fixed"
        }

        async fn search_images(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<String>> {
            Ok(self.0.clone())
        }
    }

    struct AcceptSecond;

    #[async_trait]
    impl ImageProbe for AcceptSecond {
        async fn is_live_image(&self, url: &str) -> bool {
            url.contains("second")
        }
    }

    struct RejectAll;

    #[async_trait]
    impl ImageProbe for RejectAll {
        async fn is_live_image(&self, _url: &str) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn first_probed_valid_search_result_wins() {
        let resolver = ImageResolver::new(
            Some(Arc::new(FixedSearch(vec![
                "not a url".to_string(),
                "https://example.com/first.jpg".to_string(),
                "https://example.com/second.jpg".to_string(),
            ]))),
            Arc::new(AcceptSecond),
        );
        let url = resolver.resolve("Mystery novel", "A thrilling read").await;
        assert_eq!(url, "https://example.com/second.jpg");
    }

    #[tokio::test]
    async fn search_failure_falls_through_to_stock_keywords() {
        let resolver =
            ImageResolver::new(Some(Arc::new(FailingSearch)), Arc::new(RejectAll));
        let url = resolver.resolve("Yoga mat", "Non-slip mat for stretching").await;
        assert_eq!(url, stock::stock_image_for("yoga").unwrap());
    }

    #[tokio::test]
    async fn every_tier_failing_yields_the_static_default() {
        let resolver =
            ImageResolver::new(Some(Arc::new(FailingSearch)), Arc::new(RejectAll));
        let url = resolver.resolve("Xyzzy", "Qwerty").await;
        assert_eq!(url, DEFAULT_GIFT_IMAGE);
        assert!(Url::parse(&url).is_ok());
    }

    #[tokio::test]
    async fn all_probes_rejecting_advances_past_the_search_tier() {
        let resolver = ImageResolver::new(
            Some(Arc::new(FixedSearch(vec![
                "https://example.com/a.jpg".to_string(),
                "https://example.com/b.jpg".to_string(),
            ]))),
            Arc::new(RejectAll),
        );
        let url = resolver.resolve("Unheard-of thing", "no keywords here").await;
        assert_eq!(url, DEFAULT_GIFT_IMAGE);
    }

    struct HangingSearch;

    #[async_trait]
    impl ImageSearchClient for HangingSearch {
        fn provider_name(&self) -> &'static str {
            "hanging"
        }

        async fn search_images(&self, _query: &str, _limit: usize) -> anyhow::Result<Vec<String>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec!["https://example.com/late.jpg".to_string()])
        }
    }

    #[tokio::test]
    async fn slow_search_times_out_and_advances_tier() {
        let resolver = ImageResolver::new(Some(Arc::new(HangingSearch)), Arc::new(RejectAll))
            .with_search_timeout(Duration::from_millis(20));
        let url = resolver.resolve("Yoga mat", "Non-slip mat for stretching").await;
        assert_eq!(url, stock::stock_image_for("yoga").unwrap());
    }

    #[tokio::test]
    async fn offline_resolver_still_produces_a_url() {
        let resolver = ImageResolver::offline();
        let url = resolver.resolve("Bluetooth speaker", "portable speaker").await;
        assert!(Url::parse(&url).is_ok());
    }

    #[test]
    fn cleans_search_terms() {
        assert_eq!(clean_search_term("  LEGO (Icons) - Bouquet!  "), "LEGO Icons Bouquet");
        assert_eq!(clean_search_term("***"), "");
    }
}
