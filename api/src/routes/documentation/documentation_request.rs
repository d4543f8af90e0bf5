use serde::{Deserialize, Serialize};

/// Request payload for /documentation.
#[derive(Debug, Deserialize)]
pub struct DocumentationRequest {
    /// Java file to document.
    pub file_path: String,
    /// Directory that receives the report; defaults to the file's directory.
    #[serde(default)]
    pub workspace_root: Option<String>,
}

/// Response payload for /documentation.
#[derive(Debug, Serialize)]
pub struct DocumentationResponse {
    pub output_path: String,
    /// Number of method sections written.
    pub sections: usize,
}
