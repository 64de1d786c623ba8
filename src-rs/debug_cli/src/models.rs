use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateTaskRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TaskInfo {
    pub id: String,
    pub name: String,
    pub status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<String>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<String>,
    pub result: Option<String>,
    pub error: Option<String>,
    pub duration: Option<String>,
}
