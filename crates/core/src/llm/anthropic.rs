use crate::config::Settings;
use crate::domain::contract::LlmGiftIdeas;
use crate::domain::profile::RecipientProfile;
use crate::domain::recommendation::Candidate;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::json;
use crate::llm::{GiftIdeaClient, Provider};
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-sonnet-latest";
const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TIMEOUT_SECS: u64 = 8;

const TOOL_NAME_EMIT_IDEAS: &str = "emit_gift_ideas";

#[derive(Debug, Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
}

impl AnthropicClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_anthropic_api_key()?.to_string();
        let base_url =
            std::env::var("ANTHROPIC_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = std::env::var("ANTHROPIC_MAX_TOKENS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        let timeout_secs = std::env::var("ANTHROPIC_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
            model,
            max_tokens,
        })
    }

    async fn create_message(
        &self,
        req: CreateMessageRequest,
    ) -> anyhow::Result<(serde_json::Value, CreateMessageResponse)> {
        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(&self.api_key)?);
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );

        let url = format!("{}/v1/messages", self.base_url.trim_end_matches('/'));
        let res = self
            .http
            .post(url)
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("Anthropic request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read Anthropic response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(LlmDiagnosticsError {
                provider: Provider::Anthropic,
                stage: "http",
                detail: format!("status={status}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        let raw_json = serde_json::from_str::<serde_json::Value>(&text)
            .with_context(|| format!("failed to parse Anthropic response JSON: {text}"))?;
        let parsed = serde_json::from_value::<CreateMessageResponse>(raw_json.clone())
            .context("failed to decode Anthropic response into CreateMessageResponse")?;
        Ok((raw_json, parsed))
    }

    fn tools() -> Vec<Tool> {
        // Minimal JSON schema for the gift idea contract. Strict and explicit
        // to maximize compliance.
        let schema = serde_json::json!({
            "type": "object",
            "additionalProperties": false,
            "required": ["ideas"],
            "properties": {
                "ideas": {
                    "type": "array",
                    "minItems": 4,
                    "maxItems": 6,
                    "items": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["name", "description", "price", "match_percentage", "matching_traits"],
                        "properties": {
                            "name": {"type": "string"},
                            "description": {"type": "string"},
                            "price": {"type": "string"},
                            "match_percentage": {"type": "integer"},
                            "matching_traits": {
                                "type": "array",
                                "items": {"type": "string"}
                            },
                            "image_search_term": {"type": ["string", "null"]},
                            "shop_search_term": {"type": ["string", "null"]}
                        }
                    }
                }
            }
        });

        vec![Tool {
            name: TOOL_NAME_EMIT_IDEAS,
            description: "Emit the final gift ideas as structured JSON",
            input_schema: schema,
        }]
    }

    fn tool_choice() -> ToolChoice {
        ToolChoice::Tool {
            name: TOOL_NAME_EMIT_IDEAS,
        }
    }

    fn system_prompt() -> String {
        // Keep strict and provider-agnostic: JSON only, no prose.
        [
            "You are a gift recommendation engine.",
            "Return ONLY valid JSON. Do not wrap in markdown. Do not include any extra keys.",
            "No trailing commas. No comments. Use double quotes for all JSON strings.",
            "Output schema:",
            "{",
            "  \"ideas\": [",
            "    {",
            "      \"name\": \"Nintendo Switch OLED\",",
            "      \"description\": \"Why this fits the recipient\",",
            "      \"price\": \"£260 - £300\",",
            "      \"match_percentage\": 88,",
            "      \"matching_traits\": [\"Tech-savvy\"],",
            "      \"image_search_term\": \"nintendo switch oled console\",",
            "      \"shop_search_term\": \"nintendo switch oled\"",
            "    }",
            "  ]",
            "}",
            "Rules:",
            "- ideas must have 4 to 6 entries",
            "- name must be a real, purchasable product (use real product names)",
            "- price must be a range in the recipient's currency symbol",
            "- every price must stay WITHIN the stated budget",
            "- match_percentage is an integer between 60 and 95",
            "- matching_traits must only use the recipient's own traits and interests",
        ]
        .join("\n")
    }

    fn user_prompt(profile: &RecipientProfile) -> String {
        let traits: Vec<&str> = profile.traits.iter().map(String::as_str).collect();
        let interests: Vec<&str> = profile.interests.iter().map(String::as_str).collect();
        let mut lines = vec![
            format!(
                "Task: Suggest gift ideas for {} within a hard budget of {} {}.",
                profile.name, profile.budget, profile.currency
            ),
            format!("Country: {}", profile.country),
            format!("Traits: {}", traits.join(", ")),
            format!("Interests: {}", interests.join(", ")),
        ];
        if let Some(gender) = &profile.gender {
            lines.push(format!("Gender: {gender}"));
        }
        if let Some(age_range) = &profile.age_range {
            lines.push(format!("Age range: {age_range}"));
        }
        if let Some(notes) = &profile.notes {
            lines.push(format!("Notes: {notes}"));
        }
        lines.join("\n")
    }

    fn repair_prompt(previous_output: &str) -> String {
        let schema = [
            "{",
            "  \"ideas\": [",
            "    {",
            "      \"name\": \"Nintendo Switch OLED\",",
            "      \"description\": \"Why this fits the recipient\",",
            "      \"price\": \"£260 - £300\",",
            "      \"match_percentage\": 88,",
            "      \"matching_traits\": [\"Tech-savvy\"],",
            "      \"image_search_term\": null,",
            "      \"shop_search_term\": null",
            "    }",
            "  ]",
            "}",
        ]
        .join("\n");

        format!(
            "Your previous message was NOT valid JSON.\n\n\
TASK: Output ONLY a single JSON object that exactly matches the schema and rules.\n\
- Do NOT include any markdown, prose, or code fences.\n\
- Do NOT include trailing commas or comments.\n\
- Use double quotes for all JSON strings.\n\
- ideas MUST have 4 to 6 entries.\n\
- Each idea MUST include keys: name, description, price, match_percentage, matching_traits.\n\n\
SCHEMA:\n{schema}\n\n\
INVALID OUTPUT (for reference only; DO NOT copy verbatim):\n{previous_output}"
        )
    }

    fn response_text(res: &CreateMessageResponse) -> anyhow::Result<String> {
        let mut out = String::new();
        for block in &res.content {
            match block {
                ContentBlock::Text { text } => {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                    out.push_str(text);
                }
                ContentBlock::ToolUse { .. } => {
                    // Prefer tool output parsing when tools are enabled.
                    // Callers should use `response_tool_ideas`.
                    continue;
                }
                ContentBlock::Thinking { .. } | ContentBlock::RedactedThinking { .. } => {
                    // Ignore.
                }
                ContentBlock::Unknown => {
                    // Ignore unknown blocks.
                }
            }
        }
        Ok(out)
    }

    fn response_tool_ideas(
        res: &CreateMessageResponse,
    ) -> anyhow::Result<Option<LlmGiftIdeas>> {
        for block in &res.content {
            if let ContentBlock::ToolUse { name, input, .. } = block {
                if name == TOOL_NAME_EMIT_IDEAS {
                    let parsed = serde_json::from_value::<LlmGiftIdeas>(input.clone())
                        .context("failed to decode tool_use.input into LlmGiftIdeas")?;
                    return Ok(Some(parsed));
                }
            }
        }
        Ok(None)
    }

    async fn try_parse_with_repairs(
        &self,
        initial_text: String,
        initial_raw_json: serde_json::Value,
    ) -> anyhow::Result<(Vec<Candidate>, serde_json::Value)> {
        match json::parse_candidates(&initial_text) {
            Ok(candidates) => return Ok((candidates, initial_raw_json)),
            Err(first_err) => {
                let mut last_err = first_err;
                let mut last_text = initial_text;
                let mut last_raw_json = initial_raw_json;

                // Repair attempts: 2
                for attempt in 1..=2u32 {
                    let repair_req = CreateMessageRequest {
                        model: self.model.clone(),
                        max_tokens: self.max_tokens,
                        system: Some(Self::system_prompt()),
                        messages: vec![Message {
                            role: "user",
                            content: Self::repair_prompt(&last_text),
                        }],
                        tools: Some(Self::tools()),
                        tool_choice: Some(Self::tool_choice()),
                    };

                    let (repair_raw_json, repair_res) = self.create_message(repair_req).await?;
                    let repair_text = Self::response_text(&repair_res)?;
                    match json::parse_candidates(&repair_text) {
                        Ok(candidates) => return Ok((candidates, repair_raw_json)),
                        Err(err) => {
                            last_err = err;
                            last_text = repair_text;
                            last_raw_json = repair_raw_json;
                            tracing::warn!(
                                attempt,
                                error = %last_err,
                                "LLM output still invalid after repair attempt"
                            );
                        }
                    }
                }

                Err(LlmDiagnosticsError {
                    provider: Provider::Anthropic,
                    stage: "parse_after_repair",
                    detail: format!("final_error={last_err}"),
                    raw_output: Some(last_text),
                    raw_response_json: Some(last_raw_json),
                }
                .into())
            }
        }
    }

    pub async fn generate_candidates_with_raw(
        &self,
        profile: &RecipientProfile,
    ) -> anyhow::Result<(Vec<Candidate>, serde_json::Value)> {
        let make_req = |max_tokens: u32| CreateMessageRequest {
            model: self.model.clone(),
            max_tokens,
            system: Some(Self::system_prompt()),
            messages: vec![Message {
                role: "user",
                content: Self::user_prompt(profile),
            }],
            tools: Some(Self::tools()),
            tool_choice: Some(Self::tool_choice()),
        };

        let (mut raw_json, mut res) = self.create_message(make_req(self.max_tokens)).await?;

        // If the model hit max_tokens, retry once with a higher ceiling.
        if matches!(res.stop_reason.as_deref(), Some("max_tokens")) {
            let bumped = self.max_tokens.saturating_mul(2).max(4096);
            tracing::warn!(
                from = self.max_tokens,
                to = bumped,
                "Anthropic stop_reason=max_tokens; retrying once with higher max_tokens"
            );
            let (rj, r) = self.create_message(make_req(bumped)).await?;
            raw_json = rj;
            res = r;
        }

        // Tool output path.
        if let Some(tool_ideas) = Self::response_tool_ideas(&res)? {
            let candidates = tool_ideas.validate_and_into_candidates()?;
            return Ok((candidates, raw_json));
        }

        // Fallback to text (should be rare).
        let text = Self::response_text(&res)?;
        self.try_parse_with_repairs(text, raw_json).await
    }
}

#[async_trait::async_trait]
impl GiftIdeaClient for AnthropicClient {
    fn provider(&self) -> Provider {
        Provider::Anthropic
    }

    async fn generate_candidates(
        &self,
        profile: &RecipientProfile,
    ) -> anyhow::Result<Vec<Candidate>> {
        let (candidates, _raw) = self.generate_candidates_with_raw(profile).await?;
        Ok(candidates)
    }
}

#[derive(Debug, Clone, Serialize)]
struct CreateMessageRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<Tool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<ToolChoice>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Deserialize)]
struct CreateMessageResponse {
    content: Vec<ContentBlock>,

    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
struct Tool {
    name: &'static str,
    description: &'static str,
    input_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
enum ToolChoice {
    #[serde(rename = "tool")]
    Tool { name: &'static str },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },

    #[serde(rename = "tool_use")]
    ToolUse {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: serde_json::Value,
    },

    #[serde(rename = "thinking")]
    Thinking {
        #[serde(default)]
        thinking: String,
        #[serde(default)]
        signature: String,
    },

    #[serde(rename = "redacted_thinking")]
    RedactedThinking {
        #[serde(default)]
        data: String,
    },

    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn profile() -> RecipientProfile {
        RecipientProfile {
            name: "Maya".to_string(),
            traits: BTreeSet::from(["Tech-savvy".to_string(), "Gaming".to_string()]),
            interests: BTreeSet::from(["Video Games".to_string()]),
            budget: 500.0,
            currency: "GBP".to_string(),
            country: "United Kingdom".to_string(),
            notes: None,
            gender: None,
            age_range: Some("25-34".to_string()),
        }
    }

    #[test]
    fn parses_tool_use_ideas_input() {
        let tool_input = json!({
            "ideas": (0..4).map(|i| json!({
                "name": format!("Gift {i}"),
                "description": "A thoughtful gift",
                "price": "£40 - £60",
                "match_percentage": 85,
                "matching_traits": ["Tech-savvy"],
            })).collect::<Vec<_>>(),
        });

        let res = CreateMessageResponse {
            content: vec![ContentBlock::ToolUse {
                id: "toolu_1".to_string(),
                name: TOOL_NAME_EMIT_IDEAS.to_string(),
                input: tool_input,
            }],
            stop_reason: None,
        };

        let parsed = AnthropicClient::response_tool_ideas(&res).unwrap().unwrap();
        let candidates = parsed.validate_and_into_candidates().unwrap();
        assert_eq!(candidates.len(), 4);
        assert_eq!(candidates[0].name, "Gift 0");
        assert_eq!(candidates[0].price_hint.as_deref(), Some("£40 - £60"));
    }

    #[test]
    fn user_prompt_embeds_budget_and_traits() {
        let prompt = AnthropicClient::user_prompt(&profile());
        assert!(prompt.contains("hard budget of 500 GBP"));
        assert!(prompt.contains("United Kingdom"));
        assert!(prompt.contains("Tech-savvy"));
        assert!(prompt.contains("Video Games"));
        assert!(prompt.contains("Age range: 25-34"));
    }

    #[test]
    fn response_text_concatenates_text_blocks_only() {
        let res = CreateMessageResponse {
            content: vec![
                ContentBlock::Text { text: "first".to_string() },
                ContentBlock::Unknown,
                ContentBlock::Text { text: "second".to_string() },
            ],
            stop_reason: None,
        };
        assert_eq!(AnthropicClient::response_text(&res).unwrap(), "first\nsecond");
    }
}
