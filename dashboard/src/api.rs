use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Error: {0}")]
    Error(&'static str),
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("Invalid API url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Bytes of source code per language name.
pub type LanguageBytes = HashMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: String,
    pub description: Option<String>,
    pub language: Option<String>,
    pub html_url: String,
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contributor {
    pub name: String,
    pub contributions: u32,
}

impl Contributor {
    pub fn new(name: impl Into<String>, contributions: u32) -> Self {
        Contributor {
            name: name.into(),
            contributions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: String,
    pub repo: String,
    pub created_at: DateTime<Utc>,
}

/// Read only access to a source hosting REST API.
#[async_trait]
pub trait Client: Send + Sync {
    async fn user_repos(&self, user: &str, per_page: u32) -> Result<Vec<Repository>>;

    async fn repo(&self, owner: &str, repo: &str) -> Result<Repository>;

    async fn repo_contributors(&self, owner: &str, repo: &str, per_page: u32) -> Result<Vec<Contributor>>;

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes>;

    async fn search_repos(&self, query: &str, per_page: u32) -> Result<Vec<Repository>>;

    async fn user_events(&self, user: &str, per_page: u32) -> Result<Vec<Event>>;
}
