use serde::{Deserialize, Serialize};

/// File stored by the upload endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    pub url: String,
    #[serde(default)]
    pub key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadsResponse {
    pub uploads: Vec<Upload>,
}

impl UploadsResponse {
    pub fn into_urls(self) -> Vec<String> {
        self.uploads.into_iter().map(|u| u.url).collect()
    }
}
