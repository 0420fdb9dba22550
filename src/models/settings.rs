use serde::{Deserialize, Serialize};

/// Process-wide settings, fetched once per session and mutated only through
/// the admin settings operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    #[serde(default)]
    pub upi_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage_image_url: Option<String>,
}
