mod builder;
mod payload;

use async_trait::async_trait;
use dashboard::api::{Contributor, Event, LanguageBytes, Repository, Result};
use log::debug;
use reqwest::Client;
use reqwest::Response;
use serde::de::DeserializeOwned;

pub use builder::GithubClientBuilder;
pub use builder::GITHUB_URL;

pub struct GithubClient {
    client: Client,
    github_url: String,
}

impl GithubClient {
    async fn get<T, Q>(&self, path: String, query: &Q) -> Result<T>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let request_url = format!("{}{}", self.github_url, path);
        debug!("GET {}", request_url);
        let response = self.client.get(request_url).query(query).send().await?;
        read_response::<T>(response).await
    }
}

pub(crate) async fn read_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    Ok(response.error_for_status()?.json::<T>().await?)
}

const NO_QUERY: [(&str, &str); 0] = [];

#[async_trait]
impl dashboard::api::Client for GithubClient {
    async fn user_repos(&self, user: &str, per_page: u32) -> Result<Vec<Repository>> {
        let repos = self
            .get::<Vec<payload::Repo>, _>(
                format!("/users/{}/repos", user),
                &[
                    ("per_page", per_page.to_string()),
                    ("sort", "updated".to_string()),
                    ("direction", "desc".to_string()),
                ],
            )
            .await?;
        Ok(repos.into_iter().map(Repository::from).collect())
    }

    async fn repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let repo = self
            .get::<payload::Repo, _>(format!("/repos/{}/{}", owner, repo), &NO_QUERY)
            .await?;
        Ok(repo.into())
    }

    async fn repo_contributors(&self, owner: &str, repo: &str, per_page: u32) -> Result<Vec<Contributor>> {
        let contributors = self
            .get::<Vec<payload::Contributor>, _>(
                format!("/repos/{}/{}/contributors", owner, repo),
                &[("per_page", per_page.to_string()), ("anon", "true".to_string())],
            )
            .await?;
        Ok(contributors.into_iter().map(Contributor::from).collect())
    }

    async fn repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        self.get::<LanguageBytes, _>(format!("/repos/{}/{}/languages", owner, repo), &NO_QUERY)
            .await
    }

    async fn search_repos(&self, query: &str, per_page: u32) -> Result<Vec<Repository>> {
        let response = self
            .get::<payload::SearchRepos, _>(
                "/search/repositories".to_string(),
                &[
                    ("q", query.to_string()),
                    ("per_page", per_page.to_string()),
                    ("sort", "stars".to_string()),
                    ("order", "desc".to_string()),
                ],
            )
            .await?;
        Ok(response.items.into_iter().map(Repository::from).collect())
    }

    async fn user_events(&self, user: &str, per_page: u32) -> Result<Vec<Event>> {
        let events = self
            .get::<Vec<payload::Event>, _>(
                format!("/users/{}/events", user),
                &[("per_page", per_page.to_string())],
            )
            .await?;
        Ok(events.into_iter().map(Event::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::GithubClientBuilder;
    use dashboard::api::{Client, Contributor};
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn repo_body(name: &str, stars: u64) -> serde_json::Value {
        json!({
            "id": stars,
            "name": name,
            "full_name": format!("octo/{}", name),
            "owner": { "login": "octo" },
            "description": null,
            "language": "Rust",
            "html_url": format!("https://github.com/octo/{}", name),
            "stargazers_count": stars,
            "forks_count": 2,
            "watchers_count": stars,
            "private": false
        })
    }

    async fn client(server: &MockServer) -> impl Client {
        GithubClientBuilder::default()
            .with_github_url(server.uri())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn user_repos_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/repos"))
            .and(query_param("per_page", "100"))
            .and(query_param("sort", "updated"))
            .and(query_param("direction", "desc"))
            .and(header("Accept", "application/vnd.github.v3+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([repo_body("a", 3), repo_body("b", 1)])))
            .expect(1)
            .mount(&server)
            .await;

        let repos = client(&server).await.user_repos("octo", 100).await.unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].name, "a");
        assert_eq!(repos[0].full_name, "octo/a");
        assert_eq!(repos[0].owner, "octo");
        assert_eq!(repos[0].stars, 3);
        assert_eq!(repos[0].description, None);
        assert_eq!(repos[1].language.as_deref(), Some("Rust"));
    }

    #[tokio::test]
    async fn repo_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(repo_body("a", 42)))
            .mount(&server)
            .await;

        let repo = client(&server).await.repo("octo", "a").await.unwrap();
        assert_eq!(repo.stars, 42);
        assert_eq!(repo.forks, 2);
    }

    #[tokio::test]
    async fn repo_contributors_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/a/contributors"))
            .and(query_param("anon", "true"))
            .and(query_param("per_page", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "login": "octo", "contributions": 7, "type": "User" },
                { "name": "Jane", "email": "jane@example.com", "contributions": 2, "type": "Anonymous" },
                { "contributions": 1, "type": "Anonymous" }
            ])))
            .mount(&server)
            .await;

        let contributors = client(&server)
            .await
            .repo_contributors("octo", "a", 100)
            .await
            .unwrap();
        assert_eq!(
            contributors,
            vec![
                Contributor::new("octo", 7),
                Contributor::new("Jane", 2),
                Contributor::new("anonymous", 1)
            ]
        );
    }

    #[tokio::test]
    async fn repo_languages_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/a/languages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Rust": 1200, "Shell": 30 })))
            .mount(&server)
            .await;

        let languages = client(&server).await.repo_languages("octo", "a").await.unwrap();
        assert_eq!(languages.len(), 2);
        assert_eq!(languages["Rust"], 1200);
        assert_eq!(languages["Shell"], 30);
    }

    #[tokio::test]
    async fn search_repos_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/repositories"))
            .and(query_param("q", "language:rust"))
            .and(query_param("per_page", "10"))
            .and(query_param("sort", "stars"))
            .and(query_param("order", "desc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_count": 319021,
                "incomplete_results": false,
                "items": [repo_body("deno", 90000)]
            })))
            .mount(&server)
            .await;

        let repos = client(&server).await.search_repos("language:rust", 10).await.unwrap();
        assert_eq!(repos.len(), 1);
        assert_eq!(repos[0].name, "deno");
    }

    #[tokio::test]
    async fn user_events_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octo/events"))
            .and(query_param("per_page", "30"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "1",
                    "type": "PushEvent",
                    "repo": { "id": 1, "name": "octo/a" },
                    "created_at": "2024-03-01T10:00:00Z"
                }
            ])))
            .mount(&server)
            .await;

        let events = client(&server).await.user_events("octo", 30).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, "PushEvent");
        assert_eq!(events[0].repo, "octo/a");
        assert_eq!(events[0].created_at.to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[tokio::test]
    async fn token_header_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/a/languages"))
            .and(header("Authorization", "token secret"))
            .and(header("User-Agent", "dashboard-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = GithubClientBuilder::default()
            .with_github_url(server.uri())
            .try_with_token(secrecy::SecretString::new("secret".to_string()))
            .unwrap()
            .try_with_user_agent("dashboard-test")
            .unwrap()
            .build()
            .unwrap();
        let languages = client.repo_languages("octo", "a").await.unwrap();
        assert!(languages.is_empty());
    }

    #[tokio::test]
    async fn error_status_test() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/octo/a/contributors"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let result = client(&server).await.repo_contributors("octo", "a", 100).await;
        assert!(matches!(result, Err(dashboard::api::Error::RequestError(_))));
    }
}
