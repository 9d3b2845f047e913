use thiserror::Error;

/// Public failure modes of the pipeline. Everything else (backend outages,
/// unparsable prices, dead image tiers) is recovered internally and only
/// shows up in the logs.
#[derive(Debug, Error)]
pub enum RecommendError {
    /// The only fatal configuration state: nothing can produce candidates.
    #[error("no candidate source configured: generative backend missing and template table empty")]
    NoCandidateSource,

    /// Every enriched recommendation exceeded the budget. Distinguishable
    /// from an empty-success so callers never render a silent blank list.
    #[error("no recommendations within budget {budget}")]
    NoRecommendationsWithinBudget { budget: f64 },

    #[error("invalid recipient profile: {0}")]
    InvalidProfile(String),
}
