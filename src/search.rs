use anyhow::Result;
use thiserror::Error;

use crate::config::Config;
use crate::data_models::SortReposBy;
use crate::github::{FetchError, GitHubClient};
use crate::presenter::{ProfileReport, ProfileView, RepoView};
use crate::ranker::{MalformedRecordError, rank_by_recency};

/// Messages shown to the person searching.
pub mod messages {
    pub const EMPTY_USERNAME: &str = "Error: Enter User";
    pub const USER_NOT_FOUND: &str = "Error: User Not Found";
    pub const API_ERROR: &str = "Error: Unable to fetch data";
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("no username given")]
    EmptyUsername,
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("repository list is malformed")]
    Malformed(#[from] MalformedRecordError),
}

impl SearchError {
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::EmptyUsername => messages::EMPTY_USERNAME,
            SearchError::Fetch(FetchError::NotFound(_)) => messages::USER_NOT_FOUND,
            SearchError::Fetch(_) | SearchError::Malformed(_) => messages::API_ERROR,
        }
    }
}

/// Fetch profile, fetch repos, rank, present.
#[derive(Debug, Clone)]
pub struct ProfileSearch {
    client: GitHubClient,
    sort_by: SortReposBy,
    count: usize,
}

impl ProfileSearch {
    pub fn new(client: GitHubClient, sort_by: SortReposBy, count: usize) -> Self {
        Self {
            client,
            sort_by,
            count,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            GitHubClient::new(config)?,
            config.sort_repos_by,
            config.recent_repo_count,
        ))
    }

    pub fn sort_by(&self) -> SortReposBy {
        self.sort_by
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub async fn load_user_profile(&self, input: &str) -> Result<ProfileReport, SearchError> {
        self.load_user_profile_with(input, self.sort_by, self.count)
            .await
    }

    /// Runs one search. The two requests are sequential and the first
    /// failure ends the search.
    pub async fn load_user_profile_with(
        &self,
        input: &str,
        sort_by: SortReposBy,
        count: usize,
    ) -> Result<ProfileReport, SearchError> {
        let username = input.trim().to_lowercase();
        if username.is_empty() {
            return Err(SearchError::EmptyUsername);
        }
        log::info!("loading profile for {username}");

        let profile = self.client.fetch_user(&username).await?;
        let repos = self.client.fetch_repos(&username).await?;

        let recent = rank_by_recency(&repos, sort_by.field(), count).inspect_err(|e| {
            log::error!("cannot rank repos of {username}: {e}");
        })?;
        log::info!(
            "ranked {} of {} repos for {username} by {sort_by}",
            recent.len(),
            repos.len()
        );

        Ok(ProfileReport {
            profile: ProfileView::from(&profile),
            sort_by,
            recent_repos: recent.into_iter().map(RepoView::from_record).collect(),
        })
    }
}
