use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use tracing::{debug, info};

use super::VisionService;
use crate::config::Credentials;
use crate::detection::RawDetectedObject;
use crate::error::ServiceCallFailure;

const SERVICE_NAME: &str = "vision service";
const API_PREFIX: &str = "vision/v3.2";
const KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

#[derive(Deserialize)]
struct DetectResponse {
    #[serde(default)]
    objects: Vec<RawDetectedObject>,
}

#[derive(Deserialize)]
struct TagResponse {
    #[serde(default)]
    tags: Vec<ImageTag>,
}

#[derive(Deserialize)]
struct ImageTag {
    name: String,
}

/// Client for the Azure Computer Vision REST API.
pub struct AzureVisionClient {
    client: Client,
    endpoint: String,
    key: String,
}

impl AzureVisionClient {
    pub fn new(credentials: &Credentials, timeout: Duration) -> Result<Self, ServiceCallFailure> {
        let client = Client::builder().timeout(timeout).build()?;
        let endpoint = credentials.endpoint.trim_end_matches('/').to_string();
        info!("Vision client configured: endpoint={}", endpoint);

        Ok(Self {
            client,
            endpoint,
            key: credentials.key.clone(),
        })
    }

    fn post_image(
        &self,
        operation: &str,
        query: &[(&str, &str)],
        image: &[u8],
    ) -> Result<Response, ServiceCallFailure> {
        let response = self
            .client
            .post(format!("{}/{}/{}", self.endpoint, API_PREFIX, operation))
            .query(query)
            .header(KEY_HEADER, &self.key)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(image.to_vec())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ServiceCallFailure::Status {
                service: SERVICE_NAME,
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

impl VisionService for AzureVisionClient {
    fn detect_objects(&self, image: &[u8]) -> Result<Vec<RawDetectedObject>, ServiceCallFailure> {
        let response: DetectResponse = self.post_image("detect", &[], image)?.json()?;
        debug!("Vision service detected {} objects", response.objects.len());
        Ok(response.objects)
    }

    fn estimate_tags(&self, image: &[u8], language: &str) -> Result<Vec<String>, ServiceCallFailure> {
        let response: TagResponse = self
            .post_image("tag", &[("language", language)], image)?
            .json()?;
        debug!("Vision service returned {} tags", response.tags.len());
        Ok(response.tags.into_iter().map(|tag| tag.name).collect())
    }
}
