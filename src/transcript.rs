//! Transcript retrieval from the captioning service.
//!
//! Talks to a timedtext-style endpoint returning `json3` caption payloads
//! (`events[].segs[].utf8`) and flattens all fragments into one text blob.

use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::config::CaptionConfig;
use crate::error::ExtractError;
use crate::model::Transcript;

#[derive(Debug, Deserialize)]
struct TimedTextResponse {
    #[serde(default)]
    events: Vec<CaptionEvent>,
}

#[derive(Debug, Deserialize)]
struct CaptionEvent {
    #[serde(default)]
    segs: Vec<CaptionSegment>,
}

#[derive(Debug, Deserialize)]
struct CaptionSegment {
    #[serde(default)]
    utf8: String,
}

/// Client for the external captioning service.
#[derive(Debug, Clone)]
pub struct CaptionClient {
    client: Client,
    base_url: String,
    lang: String,
}

impl CaptionClient {
    /// Create a new caption client from configuration
    pub fn new(config: &CaptionConfig, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_default();

        CaptionClient {
            client,
            base_url: config.base_url.clone(),
            lang: config.lang.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String, lang: String) -> Self {
        CaptionClient {
            client: Client::new(),
            base_url,
            lang,
        }
    }

    /// Fetch and flatten the transcript for a video id.
    ///
    /// Caption fragments are concatenated in the order the service returns
    /// them, separated by single spaces. An upstream failure, an unparseable
    /// payload, or zero fragments all signal
    /// [`ExtractError::TranscriptUnavailable`] — the service does not
    /// distinguish "no captions" from "empty captions".
    pub async fn fetch_transcript(&self, video_id: &str) -> Result<Transcript, ExtractError> {
        let url = format!(
            "{}/api/timedtext?v={}&lang={}&fmt=json3",
            self.base_url, video_id, self.lang
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ExtractError::TranscriptUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ExtractError::TranscriptUnavailable(format!(
                "captioning service returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExtractError::TranscriptUnavailable(e.to_string()))?;

        // The service answers 200 with an empty body when no track exists.
        let parsed: TimedTextResponse = serde_json::from_str(&body)
            .map_err(|_| ExtractError::TranscriptUnavailable("no caption track".to_string()))?;

        let fragments: Vec<String> = parsed
            .events
            .iter()
            .flat_map(|event| event.segs.iter())
            .map(|seg| seg.utf8.trim().to_string())
            .filter(|text| !text.is_empty())
            .collect();

        if fragments.is_empty() {
            return Err(ExtractError::TranscriptUnavailable(
                "caption track is empty".to_string(),
            ));
        }

        let text = fragments.join(" ");
        debug!("Fetched transcript for {video_id}: {} chars", text.len());

        Ok(Transcript {
            video_id: video_id.to_string(),
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    #[tokio::test]
    async fn test_fetch_transcript_joins_fragments() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/timedtext?v=abc123&lang=ko&fmt=json3")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "events": [
                        {"segs": [{"utf8": "first"}, {"utf8": "\n"}]},
                        {"segs": [{"utf8": "second"}]},
                        {"segs": [{"utf8": "third"}]}
                    ]
                }"#,
            )
            .create_async()
            .await;

        let client = CaptionClient::with_base_url(server.url(), "ko".to_string());
        let transcript = client.fetch_transcript("abc123").await.unwrap();

        assert_eq!(transcript.video_id, "abc123");
        assert_eq!(transcript.text, "first second third");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_body_means_no_captions() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/timedtext?v=abc123&lang=ko&fmt=json3")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let client = CaptionClient::with_base_url(server.url(), "ko".to_string());
        let result = client.fetch_transcript("abc123").await;
        assert!(matches!(
            result,
            Err(ExtractError::TranscriptUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_zero_fragments_means_no_captions() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/timedtext?v=abc123&lang=ko&fmt=json3")
            .with_status(200)
            .with_body(r#"{"events": []}"#)
            .create_async()
            .await;

        let client = CaptionClient::with_base_url(server.url(), "ko".to_string());
        let result = client.fetch_transcript("abc123").await;
        assert!(matches!(
            result,
            Err(ExtractError::TranscriptUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_upstream_error_is_transcript_unavailable() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/timedtext?v=abc123&lang=ko&fmt=json3")
            .with_status(500)
            .create_async()
            .await;

        let client = CaptionClient::with_base_url(server.url(), "ko".to_string());
        let result = client.fetch_transcript("abc123").await;
        assert!(matches!(
            result,
            Err(ExtractError::TranscriptUnavailable(_))
        ));
    }
}
