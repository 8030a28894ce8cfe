//! Experience extraction: delegates resume text to the chat-completion API
//! and decodes the structured reply.
//!
//! `AppState` holds an `Arc<dyn ExperienceExtractor>` so handlers never see
//! the transport. Default backend: `LlmExperienceExtractor`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError};
use crate::resume::prompts::{EXPERIENCE_PROMPT, EXPERIENCE_SYSTEM};

pub const PARSE_FAILURE_WARNING: &str = "Failed to parse structured data from the model output. \
    Please try again later or with a different resume.";

/// A single position pulled from the resume. Fields the model leaves out stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceReport {
    pub experiences: Vec<Experience>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl ExperienceReport {
    /// Degraded reply used when the model output cannot be decoded.
    pub fn parse_failure() -> Self {
        Self {
            experiences: vec![],
            warning: Some(PARSE_FAILURE_WARNING.to_string()),
        }
    }
}

#[async_trait]
pub trait ExperienceExtractor: Send + Sync {
    async fn extract(&self, resume_text: &str) -> Result<ExperienceReport, AppError>;
}

pub struct LlmExperienceExtractor(pub LlmClient);

#[async_trait]
impl ExperienceExtractor for LlmExperienceExtractor {
    async fn extract(&self, resume_text: &str) -> Result<ExperienceReport, AppError> {
        let prompt = EXPERIENCE_PROMPT.replace("{resume_text}", resume_text);

        match self
            .0
            .call_json::<ExperienceReport>(&prompt, EXPERIENCE_SYSTEM)
            .await
        {
            Ok(report) => Ok(report),
            Err(e @ (LlmError::Parse(_) | LlmError::EmptyContent)) => {
                warn!("Failed to parse model output: {e}");
                Ok(ExperienceReport::parse_failure())
            }
            Err(LlmError::Api { status, message }) => {
                error!("HTTP error: {status} - {message}");
                Err(AppError::LlmApi { status })
            }
            Err(e @ LlmError::RateLimited { .. }) => {
                error!("{e}");
                Err(AppError::LlmApi { status: 429 })
            }
            Err(e @ LlmError::Http(_)) => Err(AppError::LlmUnavailable(e.to_string())),
        }
    }
}
