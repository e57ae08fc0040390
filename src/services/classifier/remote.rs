use crate::error::{AppError, ClassifyError};
use crate::models::wardrobe_types::{ClassificationResult, ClothingCategory, ImageRef};
use crate::services::classifier::ImageClassifier;
use crate::services::fs_service;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_PROMPT: &str = "Analyze this clothing item photo. Return the category, \
a descriptive label (for example \"White oxford shirt\" or \"Blue slim jeans\"), and the \
main color. Be specific and concise.";

#[derive(Deserialize)]
struct GenerateObjectResponse {
    object: GarmentObject,
}

#[derive(Deserialize)]
struct GarmentObject {
    category: String,
    label: String,
    color: String,
}

/// Client for a hosted vision model that answers structured-object requests.
///
/// Each call sends the image as a `data:` URI together with a JSON schema and
/// expects `{"object": {"category", "label", "color"}}` back.
#[derive(Clone, Debug)]
pub struct RemoteClassifier {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    prompt: String,
}

impl RemoteClassifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: None,
            prompt: DEFAULT_PROMPT.to_string(),
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, image_data_uri: &str) -> serde_json::Value {
        let categories: Vec<&str> = ClothingCategory::ALL.iter().map(|c| c.as_str()).collect();
        json!({
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": self.prompt },
                    { "type": "image", "image": image_data_uri },
                ],
            }],
            "schema": {
                "type": "object",
                "properties": {
                    "category": {
                        "type": "string",
                        "enum": categories,
                        "description": "Clothing category",
                    },
                    "label": {
                        "type": "string",
                        "description": "Descriptive label for the item",
                    },
                    "color": {
                        "type": "string",
                        "description": "Main color",
                    },
                },
                "required": ["category", "label", "color"],
            },
        })
    }
}

fn parse_response(image: &ImageRef, body: &str) -> Result<ClassificationResult, ClassifyError> {
    let parsed: GenerateObjectResponse = serde_json::from_str(body)
        .map_err(|e| ClassifyError::InvalidResponse(format!("malformed body: {}", e)))?;
    let object = parsed.object;

    let category = object
        .category
        .parse::<ClothingCategory>()
        .map_err(ClassifyError::InvalidResponse)?;

    let label = object.label.trim();
    let color = object.color.trim();
    if label.is_empty() || color.is_empty() {
        return Err(ClassifyError::InvalidResponse(
            "label and color must not be empty".to_string(),
        ));
    }

    Ok(ClassificationResult {
        source_ref: image.clone(),
        category,
        label: label.to_string(),
        color: color.to_string(),
    })
}

#[async_trait]
impl ImageClassifier for RemoteClassifier {
    async fn classify(&self, image: &ImageRef) -> Result<ClassificationResult, ClassifyError> {
        let data_uri = fs_service::to_data_uri(&self.client, image).await?;

        let mut request = self.client.post(&self.endpoint).json(&self.request_body(&data_uri));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClassifyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Classifier responded for {}: {}", image.short(), body);
        parse_response(image, &body)
    }
}
