use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct IndexProjectRequest {
    /// Root of the Java project to index.
    pub project_dir: String,
}

#[derive(Debug, Serialize)]
pub struct IndexProjectResponse {
    pub files: usize,
    pub chunks: usize,
    pub upserted: usize,
}
