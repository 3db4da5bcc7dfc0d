use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

use crate::data_models::{SortReposBy, UserProfile};

/// Fallback for empty profile bio fields.
pub const PROFILE_FALLBACK: &str = "Not Available";
/// Fallback for empty repository stats.
pub const REPO_FALLBACK: &str = "Not available";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BioField {
    pub label: &'static str,
    pub value: String,
    pub available: bool,
}

impl BioField {
    fn new(label: &'static str, value: Option<&str>) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(v) => BioField {
                label,
                value: v.to_string(),
                available: true,
            },
            None => BioField {
                label,
                value: PROFILE_FALLBACK.to_string(),
                available: false,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileView {
    pub username: String,
    pub avatar_url: String,
    pub profile_url: String,
    pub member_since: String,
    pub public_repos: u64,
    pub followers: u64,
    pub following: u64,
    pub bio: Vec<BioField>,
}

impl From<&UserProfile> for ProfileView {
    fn from(profile: &UserProfile) -> Self {
        // Formatted like "Tue Mar 04 2014", on the UTC calendar day.
        let member_since = DateTime::parse_from_rfc3339(&profile.created_at)
            .map(|at| at.with_timezone(&Utc).format("%a %b %d %Y").to_string())
            .unwrap_or_else(|_| PROFILE_FALLBACK.to_string());

        ProfileView {
            username: format!("@{}", profile.login),
            avatar_url: profile.avatar_url.clone(),
            profile_url: profile.html_url.clone(),
            member_since: format!("Member Since {member_since}"),
            public_repos: profile.public_repos,
            followers: profile.followers,
            following: profile.following,
            bio: vec![
                BioField::new("Location", profile.location.as_deref()),
                BioField::new("Twitter", profile.twitter_username.as_deref()),
                BioField::new("Blog", profile.blog.as_deref()),
                BioField::new("Company", profile.company.as_deref()),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepoView {
    pub name: String,
    pub url: String,
    pub language: String,
    pub stars: String,
    pub watchers: String,
    pub forks: String,
}

impl RepoView {
    /// Reads display fields straight off a raw repository record.
    /// Missing, null, empty and zero values all show the fallback.
    pub fn from_record(record: &Value) -> Self {
        RepoView {
            name: text_field(record, "name").unwrap_or_else(|| REPO_FALLBACK.to_string()),
            url: text_field(record, "html_url").unwrap_or_default(),
            language: text_field(record, "language")
                .unwrap_or_else(|| REPO_FALLBACK.to_string()),
            stars: count_field(record, "stargazers_count"),
            watchers: count_field(record, "watchers_count"),
            forks: count_field(record, "forks_count"),
        }
    }
}

fn text_field(record: &Value, key: &str) -> Option<String> {
    record
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn count_field(record: &Value, key: &str) -> String {
    match record.get(key) {
        Some(Value::Number(n)) if n.as_f64().is_some_and(|v| v != 0.0) => n.to_string(),
        _ => REPO_FALLBACK.to_string(),
    }
}

/// Everything shown for one search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileReport {
    pub profile: ProfileView,
    pub sort_by: SortReposBy,
    pub recent_repos: Vec<RepoView>,
}

pub fn render_text(report: &ProfileReport) -> String {
    let profile = &report.profile;
    let mut out = String::new();

    let _ = writeln!(out, "{}  ({})", profile.username, profile.member_since);
    let _ = writeln!(out, "{}", profile.profile_url);
    let _ = writeln!(
        out,
        "Public Repos: {}  Followers: {}  Following: {}",
        profile.public_repos, profile.followers, profile.following
    );
    for field in &profile.bio {
        let _ = writeln!(out, "  {:<9} {}", format!("{}:", field.label), field.value);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Recent repositories (by {}):", report.sort_by);
    if report.recent_repos.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for repo in &report.recent_repos {
        let _ = writeln!(out, "  {}  {}", repo.name, repo.url);
        let _ = writeln!(
            out,
            "    Language: {}  Stars: {}  Watchers: {}  Forks: {}",
            repo.language, repo.stars, repo.watchers, repo.forks
        );
    }
    out
}
