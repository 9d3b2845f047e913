use crate::domain::recommendation::Candidate;
use anyhow::ensure;
use serde::{Deserialize, Serialize};

/// Most ideas the backend may return in one response; anything extra is cut.
pub const MAX_IDEAS: usize = 6;

/// Wire shape of one gift idea as emitted by the generative backend.
/// Looser than [`Candidate`]: every field the model tends to omit is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmGiftIdea {
    pub name: String,
    pub description: String,

    #[serde(default)]
    pub price: Option<String>,

    #[serde(default)]
    pub match_percentage: Option<i32>,

    #[serde(default)]
    pub matching_traits: Vec<String>,

    #[serde(default)]
    pub image_search_term: Option<String>,
    #[serde(default)]
    pub shop_search_term: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmGiftIdeas {
    pub ideas: Vec<LlmGiftIdea>,
}

impl LlmGiftIdeas {
    /// Validate the backend output and convert it into domain candidates.
    /// A response with zero usable ideas is a backend failure; the caller
    /// recovers via the template fallback.
    pub fn validate_and_into_candidates(self) -> anyhow::Result<Vec<Candidate>> {
        ensure!(
            !self.ideas.is_empty(),
            "LLM output must contain at least 1 gift idea"
        );

        let mut out = Vec::with_capacity(self.ideas.len().min(MAX_IDEAS));
        for idea in self.ideas.into_iter().take(MAX_IDEAS) {
            out.push(idea.validate_and_into_candidate()?);
        }
        Ok(out)
    }
}

impl LlmGiftIdea {
    fn validate_and_into_candidate(self) -> anyhow::Result<Candidate> {
        let name = self.name.trim().to_string();
        ensure!(!name.is_empty(), "gift idea name must be non-empty");

        let description = self.description.trim().to_string();
        ensure!(
            !description.is_empty(),
            "gift idea description must be non-empty"
        );

        let price_hint = self
            .price
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let matching_traits = self
            .matching_traits
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let non_empty = |v: Option<String>| {
            v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        };

        Ok(Candidate {
            name,
            description,
            price_hint,
            // Out-of-band values are clamped later, during enrichment.
            match_percentage: self.match_percentage.unwrap_or(80),
            matching_traits,
            image_search_term: non_empty(self.image_search_term),
            shop_search_term: non_empty(self.shop_search_term),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn idea(name: &str) -> serde_json::Value {
        json!({
            "name": name,
            "description": format!("{name} description"),
            "price": "£40 - £60",
            "match_percentage": 88,
            "matching_traits": ["Creative"],
        })
    }

    #[test]
    fn converts_valid_ideas() {
        let wire: LlmGiftIdeas =
            serde_json::from_value(json!({ "ideas": [idea("Sketchbook"), idea("Easel")] }))
                .unwrap();
        let candidates = wire.validate_and_into_candidates().unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].name, "Sketchbook");
        assert_eq!(candidates[0].price_hint.as_deref(), Some("£40 - £60"));
        assert_eq!(candidates[0].match_percentage, 88);
    }

    #[test]
    fn rejects_empty_idea_list() {
        let wire: LlmGiftIdeas = serde_json::from_value(json!({ "ideas": [] })).unwrap();
        assert!(wire.validate_and_into_candidates().is_err());
    }

    #[test]
    fn rejects_blank_name() {
        let wire: LlmGiftIdeas = serde_json::from_value(json!({
            "ideas": [{ "name": "  ", "description": "something" }]
        }))
        .unwrap();
        assert!(wire.validate_and_into_candidates().is_err());
    }

    #[test]
    fn truncates_to_max_ideas() {
        let ideas: Vec<_> = (0..10).map(|i| idea(&format!("Gift {i}"))).collect();
        let wire: LlmGiftIdeas = serde_json::from_value(json!({ "ideas": ideas })).unwrap();
        let candidates = wire.validate_and_into_candidates().unwrap();
        assert_eq!(candidates.len(), MAX_IDEAS);
    }

    #[test]
    fn defaults_missing_optionals() {
        let wire: LlmGiftIdeas = serde_json::from_value(json!({
            "ideas": [{ "name": "Mug", "description": "A mug", "price": "  " }]
        }))
        .unwrap();
        let candidates = wire.validate_and_into_candidates().unwrap();
        assert_eq!(candidates[0].price_hint, None);
        assert_eq!(candidates[0].match_percentage, 80);
        assert!(candidates[0].matching_traits.is_empty());
    }
}
