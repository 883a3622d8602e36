use serde::{Deserialize, Serialize};

/// One project as listed by `GET /api/projects`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub model_count: u32,
    #[serde(default)]
    pub dbt_version: Option<String>,
}

impl ProjectSummary {
    /// Selector label, e.g. "Sales Mart (12 models)"
    pub fn label(&self) -> String {
        let name = if self.display_name.is_empty() { &self.name } else { &self.display_name };
        format!("{} ({} models)", name, self.model_count)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProjectsResponse {
    #[serde(default)]
    pub projects: Vec<ProjectSummary>,
    #[serde(default)]
    pub error: Option<String>,
}
