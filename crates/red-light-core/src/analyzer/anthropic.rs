//! Task-alignment analysis through the Anthropic Messages API.
//!
//! Sends one screenshot plus the declared task per call and maps the reply to
//! a [`Verdict`]. Every failure path resolves to [`Verdict::OnTask`] so a
//! flaky network never produces a false alarm.

use crate::{
    CoreResult, EncodedFrame, MonitorError, TaskJudge, Verdict,
    analyzer::wire::{ContentBlock, ImageSource, Message, MessagesRequest, MessagesResponse},
};

use std::{future::Future, panic::Location};

use error_location::ErrorLocation;
use tracing::{debug, instrument, warn};

/// Instruction constraining the model to one of the two verdict tokens.
pub(crate) const SYSTEM_PROMPT: &str = "You are an AI assistant that determines if a user is on task. \
Your response should be STRICTLY 'ON_TASK' or 'OFF_TASK' without explanation. \
If you're not sure, respond with 'ON_TASK'.";

const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-sonnet-4-5";
const DEFAULT_MAX_TOKENS: u32 = 1024;
const DEFAULT_API_VERSION: &str = "2023-06-01";

/// Connection and model parameters for [`AnthropicAnalyzer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerOptions {
    /// Base URL of the API, without the `/v1/messages` path.
    pub endpoint: String,
    /// Vision-capable model identifier.
    pub model: String,
    /// Upper bound on reply tokens.
    pub max_tokens: u32,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            api_version: DEFAULT_API_VERSION.to_string(),
        }
    }
}

/// Fail-open analyzer backed by the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicAnalyzer {
    client: reqwest::Client,
    options: AnalyzerOptions,
}

impl AnthropicAnalyzer {
    /// Create an analyzer with a fresh HTTP client.
    #[track_caller]
    pub fn new(options: AnalyzerOptions) -> CoreResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|source| MonitorError::HttpClient {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { client, options })
    }

    /// Options this analyzer was built with.
    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub(crate) fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.options.endpoint.trim_end_matches('/'))
    }

    pub(crate) fn build_request<'a>(
        &'a self,
        frame: &'a EncodedFrame,
        task: &str,
    ) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.options.model,
            max_tokens: self.options.max_tokens,
            temperature: 0.0,
            system: SYSTEM_PROMPT,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Text {
                        text: format!(
                            "I am supposed to be working on: {task}\n\n\
                             Here's a screenshot of my current screen. Am I on task? \
                             Respond with ONLY 'ON_TASK' or 'OFF_TASK'."
                        ),
                    },
                    ContentBlock::Image {
                        source: ImageSource {
                            kind: "base64",
                            media_type: EncodedFrame::MEDIA_TYPE,
                            data: &frame.base64,
                        },
                    },
                ],
            }],
        }
    }

    /// Perform the request and interpret the reply, surfacing every failure.
    #[instrument(skip(self, frame, task, api_key), fields(model = %self.options.model))]
    pub(crate) async fn request_verdict(
        &self,
        frame: &EncodedFrame,
        task: &str,
        api_key: &str,
    ) -> CoreResult<Verdict> {
        if api_key.is_empty() {
            return Err(MonitorError::AnalysisFailed {
                reason: "No API key available".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.options.api_version)
            .json(&self.build_request(frame, task))
            .send()
            .await
            .map_err(|e| MonitorError::AnalysisFailed {
                reason: format!("Request failed: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MonitorError::AnalysisFailed {
                reason: format!("API returned {}: {}", status, body),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let body: MessagesResponse =
            response
                .json()
                .await
                .map_err(|e| MonitorError::AnalysisFailed {
                    reason: format!("Failed to decode response: {}", e),
                    location: ErrorLocation::from(Location::caller()),
                })?;

        let reply = body.first_text().ok_or_else(|| MonitorError::AnalysisFailed {
            reason: "Response contained no text block".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let verdict = Verdict::from_reply(reply);
        debug!(reply = reply.trim(), verdict = %verdict, "Model replied");

        Ok(verdict)
    }
}

impl TaskJudge for AnthropicAnalyzer {
    fn analyze<'a>(
        &'a self,
        frame: &'a EncodedFrame,
        task: &'a str,
        api_key: &'a str,
    ) -> impl Future<Output = Verdict> + Send + 'a {
        async move {
            match self.request_verdict(frame, task, api_key).await {
                Ok(verdict) => verdict,
                Err(e) => {
                    warn!(error = %e, "Analysis failed, defaulting to ON_TASK");
                    Verdict::OnTask
                }
            }
        }
    }
}
