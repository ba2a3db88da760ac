use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;

use super::{AdvisoryError, GenerationRequest, LanguageModel, Result};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Google Generative Language `generateContent` client.
pub struct GeminiModel {
    endpoint: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiModel {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisoryError::NotConfigured {
                message: e.to_string(),
            })?;
        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client,
        })
    }

    pub fn from_config(config: &AdvisorConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| AdvisoryError::NotConfigured {
                message: format!("environment variable `{}` is not set", config.api_key_env),
            })?;
        Self::new(
            config.endpoint.clone(),
            api_key,
            Duration::from_secs(config.timeout_secs),
        )
    }

    fn url_for(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

impl GenerateContentRequest {
    fn from_request(request: &GenerationRequest) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part {
                    text: request.prompt.clone(),
                }],
            }],
            generation_config: request
                .response_schema
                .clone()
                .map(|schema| GenerationConfig {
                    response_mime_type: "application/json".to_string(),
                    response_schema: schema,
                }),
        }
    }
}

impl GenerateContentResponse {
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .map(|part| part.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl LanguageModel for GeminiModel {
    fn name(&self) -> &'static str {
        "Gemini"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        let body = GenerateContentRequest::from_request(&request);
        let response = self
            .client
            .post(self.url_for(&request.model))
            .header(API_KEY_HEADER, &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AdvisoryError::Network {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(AdvisoryError::RequestFailed {
                message: format!("HTTP {}: {}", status, detail),
            });
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|e| AdvisoryError::InvalidResponse {
                    message: e.to_string(),
                })?;
        Ok(parsed.text())
    }
}
