//! OpenAI image generation.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, header};
use serde::{Deserialize, Serialize};

use crate::{ClientError, GeneratedImage, ImageGenerator, REQUEST_TIMEOUT, status_error};

pub const DEFAULT_OPENAI_API: &str = "https://api.openai.com/v1";
const IMAGE_MODEL: &str = "dall-e-3";
const IMAGE_SIZE: &str = "1024x1024";

pub struct OpenAiImages {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Debug, Deserialize)]
struct ImageResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    revised_prompt: Option<String>,
}

impl OpenAiImages {
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn generations_url(&self) -> String {
        format!("{}/images/generations", self.base_url.trim_end_matches('/'))
    }

    fn generation_request(&self, prompt: &str) -> RequestBuilder {
        self.client
            .post(self.generations_url())
            .timeout(REQUEST_TIMEOUT)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&ImageRequest {
                model: IMAGE_MODEL,
                prompt,
                n: 1,
                size: IMAGE_SIZE,
            })
    }
}

#[async_trait]
impl ImageGenerator for OpenAiImages {
    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, ClientError> {
        let response = self.generation_request(prompt).send().await?;

        if !response.status().is_success() {
            return Err(status_error(response).await);
        }

        let body: ImageResponse = response.json().await?;
        first_image(body)
    }
}

fn first_image(body: ImageResponse) -> Result<GeneratedImage, ClientError> {
    let data = body
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ClientError::Parse("image response contained no data".into()))?;
    let url = data
        .url
        .ok_or_else(|| ClientError::Parse("image response contained no url".into()))?;
    Ok(GeneratedImage {
        url,
        revised_prompt: data.revised_prompt,
    })
}
