pub mod brand;
pub mod catalog;
pub mod currency;
pub mod domain;
pub mod error;
pub mod image;
pub mod llm;
pub mod orchestrator;
pub mod price;
pub mod shops;
pub mod templates;

pub mod config {
    use anyhow::Context;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub anthropic_api_key: Option<String>,
        pub image_search_base_url: Option<String>,
        pub image_search_api_key: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                anthropic_api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
                image_search_base_url: std::env::var("IMAGE_SEARCH_BASE_URL").ok(),
                image_search_api_key: std::env::var("IMAGE_SEARCH_API_KEY").ok(),
            })
        }

        pub fn require_anthropic_api_key(&self) -> anyhow::Result<&str> {
            self.anthropic_api_key
                .as_deref()
                .context("ANTHROPIC_API_KEY is required")
        }

        pub fn require_image_search_api_key(&self) -> anyhow::Result<&str> {
            self.image_search_api_key
                .as_deref()
                .context("IMAGE_SEARCH_API_KEY is required")
        }
    }
}
