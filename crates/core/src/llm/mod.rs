pub mod anthropic;
pub mod error;
pub mod json;

use crate::domain::profile::RecipientProfile;
use crate::domain::recommendation::Candidate;

#[derive(Debug, Clone)]
pub enum Provider {
    Anthropic,
}

/// The generative backend seam. One call per request, no retries here; the
/// orchestrator's template fallback is the recovery path.
#[async_trait::async_trait]
pub trait GiftIdeaClient: Send + Sync {
    fn provider(&self) -> Provider;

    async fn generate_candidates(
        &self,
        profile: &RecipientProfile,
    ) -> anyhow::Result<Vec<Candidate>>;
}
