use crate::catalog;
use crate::currency;
use crate::domain::profile::RecipientProfile;
use crate::domain::recommendation::{
    clamp_match_percentage, Candidate, GiftRecommendation,
};
use crate::error::RecommendError;
use crate::image::ImageResolver;
use crate::llm::GiftIdeaClient;
use crate::price::{self, PriceRange};
use crate::shops;
use crate::templates::{self, TemplateGift};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::sync::Semaphore;

const DEFAULT_MAX_CONCURRENT_ENRICHMENTS: usize = 4;

/// Drives the whole pipeline: request candidates (generative backend or
/// template fallback), enrich each one concurrently, then apply the final
/// budget filter. All collaborators are injected; nothing global.
pub struct RecommendationOrchestrator {
    llm: Option<Arc<dyn GiftIdeaClient>>,
    images: ImageResolver,
    templates: Vec<TemplateGift>,
    base_seed: u64,
    max_concurrent: usize,
}

impl RecommendationOrchestrator {
    pub fn new(llm: Option<Arc<dyn GiftIdeaClient>>, images: ImageResolver) -> Self {
        Self {
            llm,
            images,
            templates: templates::TEMPLATE_GIFTS.to_vec(),
            base_seed: rand::random(),
            max_concurrent: DEFAULT_MAX_CONCURRENT_ENRICHMENTS,
        }
    }

    /// Pin shop pricing and stock flags for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    pub fn with_templates(mut self, templates: Vec<TemplateGift>) -> Self {
        self.templates = templates;
        self
    }

    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub async fn recommend(
        &self,
        profile: &RecipientProfile,
    ) -> Result<Vec<GiftRecommendation>, RecommendError> {
        if !(profile.budget > 0.0 && profile.budget.is_finite()) {
            return Err(RecommendError::InvalidProfile(format!(
                "budget must be a positive number (got {})",
                profile.budget
            )));
        }

        let candidates = self.request_candidates(profile).await?;
        tracing::info!(
            recipient = %profile.name,
            candidates_len = candidates.len(),
            "enriching candidates"
        );

        // Bounded pool; results gathered by index so enrichment concurrency
        // never reorders the output.
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let enriched: Vec<GiftRecommendation> = join_all(
            candidates
                .into_iter()
                .enumerate()
                .map(|(index, candidate)| {
                    let semaphore = Arc::clone(&semaphore);
                    async move {
                        // The semaphore outlives the gather and is never
                        // closed, so a failed acquire cannot occur.
                        let _permit = semaphore.acquire_owned().await.ok();
                        self.enrich(index, candidate, profile).await
                    }
                }),
        )
        .await;

        let filtered = filter_within_budget(enriched, profile.budget);
        if filtered.is_empty() {
            return Err(RecommendError::NoRecommendationsWithinBudget {
                budget: profile.budget,
            });
        }
        Ok(filtered)
    }

    async fn request_candidates(
        &self,
        profile: &RecipientProfile,
    ) -> Result<Vec<Candidate>, RecommendError> {
        if let Some(llm) = &self.llm {
            match llm.generate_candidates(profile).await {
                Ok(candidates) if !candidates.is_empty() => return Ok(candidates),
                Ok(_) => {
                    tracing::warn!("generative backend returned zero ideas; falling back to templates");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "generative backend failed; falling back to templates");
                }
            }
        }

        let fallback = templates::template_candidates(profile, &self.templates);
        if fallback.is_empty() {
            return Err(RecommendError::NoCandidateSource);
        }
        Ok(fallback)
    }

    async fn enrich(
        &self,
        index: usize,
        candidate: Candidate,
        profile: &RecipientProfile,
    ) -> GiftRecommendation {
        // Per-candidate RNG derived from the base seed and the input index,
        // so concurrency cannot perturb pricing.
        let mut rng =
            StdRng::seed_from_u64(self.base_seed ^ (index as u64).wrapping_mul(0x9E3779B97F4A7C15));

        let record = catalog::find(&candidate.name);

        // Catalog pricing is authoritative; the price hint is only parsed on
        // a catalog miss, and junk hints get a randomized placeholder.
        let raw_range = match record {
            Some(record) => record.price_range,
            None => match candidate.price_hint.as_deref() {
                Some(hint) => match price::parse_price_range(hint) {
                    Ok(range) => range,
                    Err(err) => {
                        tracing::warn!(
                            candidate = %candidate.name,
                            error = %err,
                            "unparsable price hint; substituting placeholder range"
                        );
                        PriceRange::placeholder(profile.budget, &mut rng)
                    }
                },
                None => PriceRange::placeholder(profile.budget, &mut rng),
            },
        };
        let range = raw_range.clamp_to_budget(profile.budget);

        let image = match record {
            Some(record) => record.image.to_string(),
            None => {
                self.images
                    .resolve(candidate.image_search_term(), &candidate.description)
                    .await
            }
        };

        let shop_listings = shops::build_shop_links(
            &range,
            &profile.currency,
            candidate.shop_search_term(),
            &profile.country,
            record,
            &mut rng,
        );

        GiftRecommendation {
            price: range.format(currency::symbol(&profile.currency)),
            match_percentage: clamp_match_percentage(candidate.match_percentage),
            name: candidate.name,
            description: candidate.description,
            matching_traits: candidate.matching_traits,
            image,
            shops: shop_listings,
        }
    }
}

/// Final defense-in-depth pass: re-parse each formatted price and drop
/// anything still over budget. Unparsable prices are kept (fail open).
pub fn filter_within_budget(
    recommendations: Vec<GiftRecommendation>,
    budget: f64,
) -> Vec<GiftRecommendation> {
    recommendations
        .into_iter()
        .filter(|rec| match price::parse_price_range(&rec.price) {
            Ok(range) if range.max > budget => {
                tracing::warn!(
                    name = %rec.name,
                    price = %rec.price,
                    budget,
                    "dropping recommendation over budget after enrichment"
                );
                false
            }
            Ok(_) => true,
            Err(_) => true,
        })
        .collect()
}
