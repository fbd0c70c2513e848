//! Vector search memory store.
//!
//! Implements [`MemoryStore`] over a hosted vector search service's REST
//! surface: vector queries against a named index, documents uploaded
//! with their embedding field. Keyed by (search endpoint, search key).

use std::time::Duration;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use parlor_core::memory::MemoryStore;
use parlor_types::error::MemoryError;
use parlor_types::memory::{MemoryRecord, RankedMemory};

const API_VERSION: &str = "2024-07-01";

/// REST client for the vector search memory backend.
///
/// Does NOT derive Debug so the search key cannot leak through logging.
pub struct SearchMemoryClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
    index: String,
}

#[derive(Debug, Serialize)]
struct VectorQuery<'a> {
    kind: &'static str,
    vector: &'a [f32],
    fields: &'static str,
    k: usize,
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    top: usize,
    select: &'static str,
    #[serde(rename = "vectorQueries")]
    vector_queries: Vec<VectorQuery<'a>>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    value: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    #[serde(rename = "@search.score")]
    score: f32,
    id: Uuid,
    text: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct UploadDocument<'a> {
    #[serde(rename = "@search.action")]
    action: &'static str,
    id: Uuid,
    text: &'a str,
    created_at: DateTime<Utc>,
    embedding: &'a [f32],
}

#[derive(Debug, Serialize)]
struct UploadBatch<'a> {
    value: Vec<UploadDocument<'a>>,
}

impl SearchMemoryClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: SecretString,
        index: impl Into<String>,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
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
            index: index.into(),
        }
    }

    fn search_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/search?api-version={}",
            self.endpoint, self.index, API_VERSION
        )
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/indexes/{}/docs/index?api-version={}",
            self.endpoint, self.index, API_VERSION
        )
    }
}

fn hits_to_ranked(hits: Vec<SearchHit>) -> Vec<RankedMemory> {
    hits.into_iter()
        .map(|hit| RankedMemory {
            record: MemoryRecord {
                id: hit.id,
                text: hit.text,
                created_at: hit.created_at,
            },
            score: hit.score,
        })
        .collect()
}

impl MemoryStore for SearchMemoryClient {
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<RankedMemory>, MemoryError> {
        let body = SearchRequest {
            top: limit,
            select: "id,text,created_at",
            vector_queries: vec![VectorQuery {
                kind: "vector",
                vector: query_embedding,
                fields: "embedding",
                k: limit,
            }],
        };

        let response = self
            .http
            .post(self.search_url())
            .header("api-key", self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| MemoryError::Unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Search(format!("HTTP {status}: {body}")));
        }

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| MemoryError::Search(format!("malformed response: {e}")))?;

        Ok(hits_to_ranked(parsed.value))
    }

    async fn add(&self, record: &MemoryRecord, embedding: &[f32]) -> Result<(), MemoryError> {
        let batch = UploadBatch {
            value: vec![UploadDocument {
                action: "mergeOrUpload",
                id: record.id,
                text: &record.text,
                created_at: record.created_at,
                embedding,
            }],
        };

        let response = self
            .http
            .post(self.upload_url())
            .header("api-key", self.api_key.expose_secret())
            .json(&batch)
            .send()
            .await
            .map_err(|e| MemoryError::Unavailable(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MemoryError::Search(format!("HTTP {status}: {body}")));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_client() -> SearchMemoryClient {
        SearchMemoryClient::new(
            "https://example.search.windows.net/",
            SecretString::from("search-key"),
            "parlor-memory",
        )
    }

    #[test]
    fn test_url_shapes() {
        let client = make_client();
        assert_eq!(
            client.search_url(),
            "https://example.search.windows.net/indexes/parlor-memory/docs/search?api-version=2024-07-01"
        );
        assert_eq!(
            client.upload_url(),
            "https://example.search.windows.net/indexes/parlor-memory/docs/index?api-version=2024-07-01"
        );
    }

    #[test]
    fn test_search_request_body_shape() {
        let vector = vec![0.1_f32, 0.2];
        let body = SearchRequest {
            top: 5,
            select: "id,text,created_at",
            vector_queries: vec![VectorQuery {
                kind: "vector",
                vector: &vector,
                fields: "embedding",
                k: 5,
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["top"], 5);
        assert_eq!(json["vectorQueries"][0]["kind"], "vector");
        assert_eq!(json["vectorQueries"][0]["fields"], "embedding");
        assert_eq!(json["vectorQueries"][0]["k"], 5);
    }

    #[test]
    fn test_search_response_parsing() {
        let raw = r#"{
            "value": [
                {
                    "@search.score": 0.87,
                    "id": "0192f0c1-1234-7000-8000-000000000001",
                    "text": "user prefers tea",
                    "created_at": "2026-08-06T12:00:00Z"
                }
            ]
        }"#;
        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        let ranked = hits_to_ranked(parsed.value);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].record.text, "user prefers tea");
        assert!((ranked[0].score - 0.87).abs() < f32::EPSILON);
    }

    #[test]
    fn test_upload_body_carries_action_and_embedding() {
        let record = MemoryRecord::new("likes rust", Utc::now());
        let embedding = vec![0.5_f32; 3];
        let batch = UploadBatch {
            value: vec![UploadDocument {
                action: "mergeOrUpload",
                id: record.id,
                text: &record.text,
                created_at: record.created_at,
                embedding: &embedding,
            }],
        };
        let json = serde_json::to_value(&batch).unwrap();
        assert_eq!(json["value"][0]["@search.action"], "mergeOrUpload");
        assert_eq!(json["value"][0]["embedding"].as_array().unwrap().len(), 3);
    }
}
