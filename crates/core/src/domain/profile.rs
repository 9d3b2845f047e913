use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything the caller knows about the person receiving the gift.
/// Supplied by the surrounding CRUD layer; immutable for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipientProfile {
    pub name: String,
    pub traits: BTreeSet<String>,
    pub interests: BTreeSet<String>,
    pub budget: f64,
    pub currency: String,
    pub country: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<String>,
}
