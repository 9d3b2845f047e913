use crate::llm::Provider;
use serde_json::Value;
use thiserror::Error;

/// Backend failure that carries the raw model output, so operators can see
/// exactly what was produced when parsing or the HTTP call went wrong.
#[derive(Debug, Clone, Error)]
#[error("LLM error (provider={provider:?}, stage={stage}): {detail}")]
pub struct LlmDiagnosticsError {
    pub provider: Provider,
    pub stage: &'static str,
    pub detail: String,
    pub raw_output: Option<String>,
    pub raw_response_json: Option<Value>,
}
