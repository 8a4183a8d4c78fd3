use crate::GithubClient;
use dashboard::api::Result;
use reqwest::header;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderName;
use reqwest::header::HeaderValue;
use reqwest::ClientBuilder;
use secrecy::ExposeSecret;
use url::Url;

pub const GITHUB_URL: &str = "https://api.github.com";

pub struct GithubClientBuilder {
    client_builder: ClientBuilder,
    github_url: String,
    headers: HeaderMap,
}

impl Default for GithubClientBuilder {
    fn default() -> Self {
        let mut headers = HeaderMap::default();
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl"));
        headers.insert(
            header::ACCEPT,
            HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        Self {
            client_builder: ClientBuilder::default(),
            github_url: GITHUB_URL.to_string(),
            headers,
        }
    }
}

impl GithubClientBuilder {
    pub fn try_with_token(self, token: secrecy::SecretString) -> Result<GithubClientBuilder> {
        let mut value = HeaderValue::from_str(&format!("token {}", token.expose_secret()))?;
        value.set_sensitive(true);
        Ok(self.with_header(header::AUTHORIZATION, value))
    }

    pub fn try_with_user_agent<STR: AsRef<str>>(self, user_agent: STR) -> Result<GithubClientBuilder> {
        let value = HeaderValue::from_str(user_agent.as_ref())?;
        Ok(self.with_header(header::USER_AGENT, value))
    }

    pub fn with_github_url<STR: AsRef<str>>(mut self, url: STR) -> GithubClientBuilder {
        self.github_url = url.as_ref().to_string();
        self
    }

    fn with_header(mut self, key: HeaderName, val: HeaderValue) -> GithubClientBuilder {
        self.headers.insert(key, val);
        self
    }

    pub fn build(self) -> Result<GithubClient> {
        Url::parse(&self.github_url)?;
        let github_url = self.github_url.trim_end_matches('/').to_string();
        let client = self.client_builder.default_headers(self.headers).build()?;
        Ok(GithubClient { client, github_url })
    }
}

#[test]
fn build_trims_url_test() -> anyhow::Result<()> {
    let client = GithubClientBuilder::default()
        .with_github_url("https://github.example.com/api/v3/")
        .build()?;
    assert_eq!(client.github_url, "https://github.example.com/api/v3");
    Ok(())
}

#[test]
fn build_rejects_bad_url_test() {
    let client = GithubClientBuilder::default().with_github_url("not a url").build();
    assert!(matches!(client, Err(dashboard::api::Error::InvalidUrl(_))));
}

#[test]
fn token_rejects_bad_header_test() {
    let token = secrecy::SecretString::new("bad\ntoken".to_string());
    let builder = GithubClientBuilder::default().try_with_token(token);
    assert!(matches!(builder, Err(dashboard::api::Error::InvalidHeader(_))));
}
