pub mod client;
pub mod fetch;
pub mod pager;
pub mod queries;

use async_trait::async_trait;

use crate::classify::classify;
use crate::config::GitHubConfig;
use crate::error::FetchError;
use crate::model::{Board, ProjectEntry};
use client::GhClient;

/// Where the views get their data from. Each call starts from scratch; nothing is cached.
#[async_trait]
pub trait BoardSource: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<ProjectEntry>, FetchError>;
    async fn load_board(&self, project_id: &str) -> Result<Board, FetchError>;
}

/// Live GitHub Projects source. A fresh `gh` session is requested for every fetch.
pub struct GitHubSource {
    config: GitHubConfig,
}

impl GitHubSource {
    pub fn new(config: GitHubConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl BoardSource for GitHubSource {
    async fn list_projects(&self) -> Result<Vec<ProjectEntry>, FetchError> {
        let client = GhClient::connect(&self.config).await?;
        fetch::fetch_all_projects(&client).await
    }

    async fn load_board(&self, project_id: &str) -> Result<Board, FetchError> {
        let client = GhClient::connect(&self.config).await?;
        let data = fetch::fetch_project_board(&client, project_id).await?;
        Ok(Board {
            title: data.title,
            columns: classify(&data.fields, &data.items),
        })
    }
}
