use anyhow::Context;
use async_trait::async_trait;
use serde_json::json;

use super::{validate_icon_markup, IconProvider, ICON_STROKE_WIDTH, ICON_VIEWBOX};

pub struct GeminiIconProvider {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl GeminiIconProvider {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }

    fn prompt(name: &str) -> String {
        format!(
            "Generate a minimalist line-art SVG icon for the amenity \"{name}\". \
             Respond with the SVG markup only, no explanation and no code fences. \
             The svg element must use viewBox=\"{ICON_VIEWBOX}\", fill=\"none\", \
             stroke=\"currentColor\" and stroke-width=\"{ICON_STROKE_WIDTH}\"."
        )
    }
}

/// Models wrap answers in markdown fences more often than not.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let trimmed = trimmed
        .strip_prefix("```svg")
        .or_else(|| trimmed.strip_prefix("```xml"))
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    trimmed.strip_suffix("```").unwrap_or(trimmed).trim()
}

#[async_trait]
impl IconProvider for GeminiIconProvider {
    async fn generate_icon(&self, name: &str) -> anyhow::Result<String> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let body = json!({
            "contents": [{
                "parts": [{ "text": Self::prompt(name) }],
            }],
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to call Gemini API")?;

        let status = resp.status();
        let data: serde_json::Value = resp
            .json()
            .await
            .context("failed to parse Gemini response")?;

        if !status.is_success() {
            anyhow::bail!("Gemini API error ({}): {}", status, data);
        }

        let text = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("missing text in Gemini response"))?;

        let markup = strip_code_fences(text).to_string();
        validate_icon_markup(&markup)?;
        Ok(markup)
    }
}
