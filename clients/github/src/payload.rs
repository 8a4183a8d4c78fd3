use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct SearchRepos {
    pub items: Vec<Repo>,
}

#[derive(Deserialize, Debug)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: RepoOwner,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub html_url: String,
    pub stargazers_count: u64,
    pub forks_count: u64,
    pub watchers_count: u64,
}

#[derive(Deserialize, Debug)]
pub struct RepoOwner {
    pub login: String,
}

impl From<Repo> for dashboard::api::Repository {
    fn from(repo: Repo) -> Self {
        dashboard::api::Repository {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            owner: repo.owner.login,
            description: repo.description,
            language: repo.language,
            html_url: repo.html_url,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            watchers: repo.watchers_count,
        }
    }
}

/// Anonymous contributors come without `login`, but usually with `name`.
#[derive(Deserialize, Debug)]
pub struct Contributor {
    pub login: Option<String>,
    pub name: Option<String>,
    pub contributions: u32,
}

impl From<Contributor> for dashboard::api::Contributor {
    fn from(contributor: Contributor) -> Self {
        let name = contributor
            .login
            .or(contributor.name)
            .unwrap_or_else(|| "anonymous".to_string());
        dashboard::api::Contributor::new(name, contributor.contributions)
    }
}

#[derive(Deserialize, Debug)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: EventRepo,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug)]
pub struct EventRepo {
    pub name: String,
}

impl From<Event> for dashboard::api::Event {
    fn from(event: Event) -> Self {
        dashboard::api::Event {
            kind: event.kind,
            repo: event.repo.name,
            created_at: event.created_at,
        }
    }
}
