use serde::{Deserialize, Serialize};

/// A career or extracurricular record shown on the profile page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub category: String,
    pub title: String,
    #[serde(default)]
    pub detail: Option<String>,
    pub year: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRequest {
    pub category: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub year: String,
}

impl ActivityRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.category.trim().is_empty() {
            return Err("Category is required".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("Title is required".to_string());
        }
        let year = self.year.trim();
        if year.len() != 4 || !year.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Year must be a four-digit year, got '{}'", self.year));
        }
        Ok(())
    }
}
