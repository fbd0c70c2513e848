//! Remote embedding generation.
//!
//! Calls the hosted endpoint's `/embeddings` route, keyed by the same
//! (endpoint, api key) pair as the chat provider plus the configured
//! embeddings model.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use parlor_core::memory::Embedder;
use parlor_types::error::MemoryError;

/// Embedding client for an OpenAI-compatible hosted endpoint.
///
/// Does NOT derive Debug so the API key cannot leak through logging.
pub struct RemoteEmbedder {
    http: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    model: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingDatum>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingDatum {
    index: usize,
    embedding: Vec<f32>,
}

impl RemoteEmbedder {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: SecretString,
        model: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        let mut endpoint = endpoint.into();
        while endpoint.ends_with('/') {
            endpoint.pop();
        }

        Self {
            http,
            endpoint,
            api_key,
            model: model.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/embeddings", self.endpoint)
    }
}

/// Order response vectors by their declared index.
///
/// The service reports an index per datum; relying on arrival order
/// would silently misalign batch results.
fn vectors_in_order(mut data: Vec<EmbeddingDatum>) -> Vec<Vec<f32>> {
    data.sort_by_key(|d| d.index);
    data.into_iter().map(|d| d.embedding).collect()
}

impl Embedder for RemoteEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, MemoryError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = EmbeddingRequest {
            model: &self.model,
            input: texts,
        };

        let response = self
            .http
            .post(self.url())
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Embedding(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Embedding(format!("HTTP {status}: {body}")));
        }

        let parsed: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| MemoryError::Embedding(format!("malformed response: {e}")))?;

        Ok(vectors_in_order(parsed.data))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_shape() {
        let embedder = RemoteEmbedder::new(
            "https://example.openai.azure.com/openai/v1/",
            SecretString::from("test-key"),
            "text-embedding-3-small",
        );
        assert_eq!(
            embedder.url(),
            "https://example.openai.azure.com/openai/v1/embeddings"
        );
        assert_eq!(embedder.model_name(), "text-embedding-3-small");
    }

    #[test]
    fn test_vectors_in_order_sorts_by_index() {
        let data = vec![
            EmbeddingDatum {
                index: 1,
                embedding: vec![1.0],
            },
            EmbeddingDatum {
                index: 0,
                embedding: vec![0.0],
            },
        ];
        let vectors = vectors_in_order(data);
        assert_eq!(vectors, vec![vec![0.0], vec![1.0]]);
    }

    #[test]
    fn test_request_body_shape() {
        let texts = vec!["hello".to_string()];
        let body = EmbeddingRequest {
            model: "text-embedding-3-small",
            input: &texts,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "text-embedding-3-small");
        assert_eq!(json["input"][0], "hello");
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{
            "object": "list",
            "data": [{"object": "embedding", "index": 0, "embedding": [0.1, 0.2]}],
            "model": "text-embedding-3-small"
        }"#;
        let parsed: EmbeddingResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.len(), 1);
        assert_eq!(parsed.data[0].embedding, vec![0.1, 0.2]);
    }
}
