//! Optional "after" image generation behind one narrow seam. The vendors
//! for this feature are interchangeable; only this reference adapter ships,
//! and a failure simply means no image, never an error.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use fitclub_core::models::recommendation::FitnessGoal;

#[async_trait]
pub trait AfterImageGenerator: Send + Sync {
    /// Returns a base64 data URL for a generated "after" image, or None on
    /// any failure.
    async fn generate_after_image(
        &self,
        bytes: &[u8],
        content_type: &str,
        goal: FitnessGoal,
    ) -> Option<String>;
}

#[derive(Debug, Serialize)]
struct ImageGenerationRequest {
    model: String,
    prompt: String,
    image: String,
    response_format: String,
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    b64_json: String,
}

/// Reference adapter for an OpenAI-compatible image generation endpoint.
pub struct HttpAfterImageClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HttpAfterImageClient {
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model,
        }
    }

    fn prompt_for(goal: FitnessGoal) -> String {
        let outcome = match goal {
            FitnessGoal::LoseWeight => "a leaner physique",
            FitnessGoal::BuildMuscle => "visibly more muscle mass",
            FitnessGoal::Endurance => "an athletic, conditioned physique",
            FitnessGoal::GeneralFitness => "a fitter, healthier physique",
        };

        format!(
            "Render the same person after six months of consistent training, showing {outcome}. \
             Keep face, pose and background unchanged."
        )
    }
}

#[async_trait]
impl AfterImageGenerator for HttpAfterImageClient {
    async fn generate_after_image(
        &self,
        bytes: &[u8],
        content_type: &str,
        goal: FitnessGoal,
    ) -> Option<String> {
        let body = ImageGenerationRequest {
            model: self.model.clone(),
            prompt: Self::prompt_for(goal),
            image: format!("data:{};base64,{}", content_type, BASE64.encode(bytes)),
            response_format: "b64_json".to_string(),
        };

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await;

        let response = match response {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!("After-image generation returned status {}", response.status());
                return None;
            }
            Err(err) => {
                warn!("After-image generation failed: {err}");
                return None;
            }
        };

        let parsed: ImageGenerationResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("After-image response was not parseable: {err}");
                return None;
            }
        };

        parsed
            .data
            .into_iter()
            .next()
            .map(|image| format!("data:image/png;base64,{}", image.b64_json))
    }
}
