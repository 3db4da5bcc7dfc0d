use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public profile as returned by `GET /users/{username}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub login: String,
    #[serde(default)]
    pub avatar_url: String,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub public_repos: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub following: u64,
    pub name: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub twitter_username: Option<String>,
    pub blog: Option<String>,
    pub company: Option<String>,
}

/// Which repository timestamp decides recency.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortReposBy {
    #[default]
    #[serde(rename = "updated_at", alias = "updated")]
    #[value(name = "updated", alias = "updated_at")]
    Updated,
    #[serde(rename = "created_at", alias = "created")]
    #[value(name = "created", alias = "created_at")]
    Created,
    #[serde(rename = "pushed_at", alias = "pushed")]
    #[value(name = "pushed", alias = "pushed_at")]
    Pushed,
}

impl SortReposBy {
    /// The repository field holding the timestamp.
    pub fn field(self) -> &'static str {
        match self {
            SortReposBy::Updated => "updated_at",
            SortReposBy::Created => "created_at",
            SortReposBy::Pushed => "pushed_at",
        }
    }
}

impl fmt::Display for SortReposBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown repository sort key {0:?}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortReposBy {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "updated" | "updated_at" => Ok(SortReposBy::Updated),
            "created" | "created_at" => Ok(SortReposBy::Created),
            "pushed" | "pushed_at" => Ok(SortReposBy::Pushed),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}
