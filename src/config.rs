use dotenvy::dotenv;
use once_cell::sync::Lazy;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::data_models::SortReposBy;

pub static CONFIG: Lazy<Config> = Lazy::new(|| {
    dotenv().ok(); // Load .env file if present
    Config::from_lookup(|key| env::var(key).ok())
});

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";
pub const DEFAULT_USER_AGENT: &str = "ghprofile";
pub const DEFAULT_RECENT_REPO_COUNT: usize = 5;
pub const DEFAULT_REPOS_PER_PAGE: u32 = 100;
pub const DEFAULT_SERVER_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub github_token: Option<String>,
    pub user_agent: String,
    pub recent_repo_count: usize,
    pub sort_repos_by: SortReposBy,
    pub repos_per_page: u32,
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            github_token: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            recent_repo_count: DEFAULT_RECENT_REPO_COUNT,
            sort_repos_by: SortReposBy::default(),
            repos_per_page: DEFAULT_REPOS_PER_PAGE,
            server_addr: DEFAULT_SERVER_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Builds a config from any key lookup, so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Config
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Config {
            api_base_url: get_or_default(&get, "GITHUB_API_URL", &defaults.api_base_url),
            github_token: get("GITHUB_TOKEN"),
            user_agent: get_or_default(&get, "GHPROFILE_USER_AGENT", &defaults.user_agent),
            recent_repo_count: parse_or_default(
                &get,
                "RECENT_REPO_COUNT",
                defaults.recent_repo_count,
            ),
            sort_repos_by: parse_or_default(&get, "SORT_REPOS_BY", defaults.sort_repos_by),
            repos_per_page: parse_or_default(&get, "REPOS_PER_PAGE", defaults.repos_per_page)
                .clamp(1, 100),
            server_addr: get_or_default(&get, "SERVER_ADDR", &defaults.server_addr),
        }
    }
}

fn get_or_default(get: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    get(key).unwrap_or_else(|| default.to_string())
}

fn parse_or_default<T>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match get(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            log::warn!("ignoring {key}={raw:?} ({e}), using {default}");
            default
        }),
        None => default,
    }
}
