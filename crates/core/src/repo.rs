use serde::{Deserialize, Serialize};

/// A repository search hit. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    pub description: Option<String>,
    #[serde(rename = "html_url", default)]
    pub url: String,
    #[serde(rename = "stargazers_count")]
    pub stars: u64,
    #[serde(rename = "forks_count", default)]
    pub forks: u64,
    pub language: Option<String>,
}

impl Repo {
    /// Minimal constructor; the remaining fields start empty.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>, description: Option<&str>, stars: u64) -> Self {
        let name = name.into();
        Self {
            id,
            full_name: name.clone(),
            name,
            description: description.map(ToOwned::to_owned),
            url: String::new(),
            stars,
            forks: 0,
            language: None,
        }
    }

    /// Whether `needle` is a case-insensitive substring of the name or description.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.as_deref().is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}
