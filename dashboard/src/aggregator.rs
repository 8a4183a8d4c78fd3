use crate::api::{Client, Contributor, Error, Event, LanguageBytes, Repository, Result};
use derive_more::Constructor;
use futures::future::try_join;
use log::{debug, warn};

/// Repositories whose languages are merged.
pub const LANGUAGE_REPOS: usize = 5;
/// Repositories considered for contribution ranking.
pub const CONTRIBUTION_REPOS: usize = 10;
pub const TOP_LANGUAGES: usize = 5;
pub const TOP_REPOS: usize = 5;
pub const EVENTS: usize = 10;
pub const REPOS_PAGE: u32 = 100;
pub const CONTRIBUTORS_PAGE: u32 = 100;
pub const EVENTS_PAGE: u32 = 30;

/// Bounds of a single dashboard load.
///
/// `language_repos` and `contribution_repos` cap the number of per repository requests,
/// they are independent of each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub language_repos: usize,
    pub contribution_repos: usize,
    pub top_repos: usize,
    pub events: usize,
    pub repos_page: u32,
    pub contributors_page: u32,
    pub events_page: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            language_repos: LANGUAGE_REPOS,
            contribution_repos: CONTRIBUTION_REPOS,
            top_repos: TOP_REPOS,
            events: EVENTS,
            repos_page: REPOS_PAGE,
            contributors_page: CONTRIBUTORS_PAGE,
            events_page: EVENTS_PAGE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct RepoContribution {
    pub name: String,
    pub full_name: String,
    pub contributions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct LanguageShare {
    pub name: String,
    pub bytes: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Constructor)]
pub struct SummaryStats {
    pub stars: u64,
    pub forks: u64,
    pub watchers: u64,
    pub repositories: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dashboard {
    pub repos: Vec<Repository>,
    pub events: Vec<Event>,
    pub languages: LanguageBytes,
    pub top_repos: Vec<RepoContribution>,
    pub summary: SummaryStats,
}

/// Failure of a single per repository request.
#[derive(thiserror::Error, Debug, Constructor)]
#[error("{repo}: {source}")]
pub struct RepoFetchError {
    pub repo: String,
    pub source: Error,
}

pub type RepoFetch<T> = std::result::Result<T, RepoFetchError>;

pub struct DashboardLoader<CLIENT>
where
    CLIENT: Client,
{
    client: CLIENT,
    limits: Limits,
}

impl<CLIENT> DashboardLoader<CLIENT>
where
    CLIENT: Client,
{
    pub fn new(client: CLIENT, limits: Limits) -> Self {
        DashboardLoader { client, limits }
    }

    /// Fetches and aggregates everything shown on the dashboard of `user`.
    ///
    /// Fails only if the repository list or the event list cannot be fetched.
    /// Per repository failures are logged and substituted with zero.
    pub async fn load(&self, user: &str) -> Result<Dashboard> {
        let (repos, mut events) = try_join(
            self.client.user_repos(user, self.limits.repos_page),
            self.client.user_events(user, self.limits.events_page),
        )
        .await?;
        debug!("Found {} repositories and {} events of {}", repos.len(), events.len(), user);
        events.truncate(self.limits.events);

        let languages = self.languages_pass(&repos).await;
        let top_repos = self.contributions_pass(&repos).await;
        let summary = summarize(&repos);

        Ok(Dashboard {
            repos,
            events,
            languages,
            top_repos,
            summary,
        })
    }

    async fn languages_pass(&self, repos: &[Repository]) -> LanguageBytes {
        let mut languages = LanguageBytes::new();
        for repo in repos.iter().take(self.limits.language_repos) {
            let fetch = self
                .client
                .repo_languages(&repo.owner, &repo.name)
                .await
                .map_err(|err| RepoFetchError::new(repo.name.clone(), err));
            fold_languages(&mut languages, fetch);
        }
        debug!("Merged {} languages", languages.len());
        languages
    }

    async fn contributions_pass(&self, repos: &[Repository]) -> Vec<RepoContribution> {
        let mut contributions = Vec::with_capacity(self.limits.contribution_repos.min(repos.len()));
        for repo in repos.iter().take(self.limits.contribution_repos) {
            let fetch = self
                .client
                .repo_contributors(&repo.owner, &repo.name, self.limits.contributors_page)
                .await
                .map_err(|err| RepoFetchError::new(repo.name.clone(), err));
            contributions.push(repo_contribution(repo, fetch));
        }
        rank_contributions(contributions, self.limits.top_repos)
    }
}

/// Adds bytes of every language in `repo_languages` to `languages`.
pub fn merge_languages(languages: &mut LanguageBytes, repo_languages: LanguageBytes) {
    for (language, bytes) in repo_languages {
        *languages.entry(language).or_insert(0) += bytes;
    }
}

/// Merges a successful fetch, a failed one leaves `languages` untouched.
pub fn fold_languages(languages: &mut LanguageBytes, fetch: RepoFetch<LanguageBytes>) {
    match fetch {
        Ok(repo_languages) => merge_languages(languages, repo_languages),
        Err(err) => warn!("Failed to get languages of {}", err),
    }
}

pub fn aggregate_languages<I>(fetches: I) -> LanguageBytes
where
    I: IntoIterator<Item = RepoFetch<LanguageBytes>>,
{
    fetches.into_iter().fold(LanguageBytes::new(), |mut languages, fetch| {
        fold_languages(&mut languages, fetch);
        languages
    })
}

pub fn total_contributions(contributors: &[Contributor]) -> u64 {
    contributors
        .iter()
        .map(|contributor| u64::from(contributor.contributions))
        .sum()
}

/// Total contributions of `repo`, zero when its contributors could not be fetched.
pub fn repo_contribution(repo: &Repository, fetch: RepoFetch<Vec<Contributor>>) -> RepoContribution {
    let contributions = fetch
        .map(|contributors| total_contributions(&contributors))
        .unwrap_or_else(|err| {
            warn!("Failed to get contributors of {}", err);
            0
        });
    RepoContribution::new(repo.name.clone(), repo.full_name.clone(), contributions)
}

/// Returns `top` entries with the most contributions.
///
/// Sort is stable, so entries with equal contributions keep their input order.
pub fn rank_contributions(mut contributions: Vec<RepoContribution>, top: usize) -> Vec<RepoContribution> {
    contributions.sort_by(|a, b| b.contributions.cmp(&a.contributions));
    contributions.truncate(top);
    contributions
}

/// Chart rows of the `count` largest languages, ties ordered by name.
pub fn top_languages(languages: &LanguageBytes, count: usize) -> Vec<LanguageShare> {
    let mut shares: Vec<LanguageShare> = languages
        .iter()
        .map(|(name, bytes)| LanguageShare::new(name.clone(), *bytes))
        .collect();
    shares.sort_by(|a, b| b.bytes.cmp(&a.bytes).then_with(|| a.name.cmp(&b.name)));
    shares.truncate(count);
    shares
}

pub fn summarize(repos: &[Repository]) -> SummaryStats {
    repos.iter().fold(
        SummaryStats::new(0, 0, 0, repos.len()),
        |mut summary, repo| {
            summary.stars += repo.stars;
            summary.forks += repo.forks;
            summary.watchers += repo.watchers;
            summary
        },
    )
}

/// Tests

#[cfg(test)]
fn languages(entries: &[(&str, u64)]) -> LanguageBytes {
    entries
        .iter()
        .map(|(language, bytes)| (language.to_string(), *bytes))
        .collect()
}

#[cfg(test)]
fn contribution(name: &str, contributions: u64) -> RepoContribution {
    RepoContribution::new(name.to_string(), format!("owner/{}", name), contributions)
}

#[test]
fn merge_languages_test() {
    let merged = aggregate_languages(vec![
        Ok(languages(&[("JavaScript", 100), ("Go", 50)])),
        Ok(languages(&[("JavaScript", 20), ("Rust", 30)])),
    ]);
    assert_eq!(merged, languages(&[("JavaScript", 120), ("Go", 50), ("Rust", 30)]));

    let top = top_languages(&merged, 2);
    assert_eq!(
        top,
        vec![
            LanguageShare::new("JavaScript".to_string(), 120),
            LanguageShare::new("Go".to_string(), 50)
        ]
    );
}

#[test]
fn merge_languages_skips_failure_test() {
    let merged = aggregate_languages(vec![
        Ok(languages(&[("Rust", 10)])),
        Err(RepoFetchError::new("broken".to_string(), Error::Error("not found"))),
        Ok(languages(&[("Rust", 5), ("C", 1)])),
    ]);
    assert_eq!(merged, languages(&[("Rust", 15), ("C", 1)]));
}

#[test]
fn top_languages_tie_test() {
    let top = top_languages(&languages(&[("Ruby", 10), ("C", 10), ("Go", 20)]), 5);
    let names: Vec<&str> = top.iter().map(|share| share.name.as_str()).collect();
    assert_eq!(names, vec!["Go", "C", "Ruby"]);
}

#[test]
fn rank_contributions_stable_test() {
    let ranked = rank_contributions(
        vec![contribution("a", 10), contribution("b", 10), contribution("c", 5)],
        2,
    );
    assert_eq!(ranked, vec![contribution("a", 10), contribution("b", 10)]);
}

#[test]
fn rank_contributions_truncates_after_sort_test() {
    let ranked = rank_contributions(
        vec![
            contribution("a", 1),
            contribution("b", 0),
            contribution("c", 7),
            contribution("d", 0),
            contribution("e", 3),
        ],
        3,
    );
    assert_eq!(ranked, vec![contribution("c", 7), contribution("e", 3), contribution("a", 1)]);

    let ranked = rank_contributions(vec![contribution("a", 1)], 5);
    assert_eq!(ranked.len(), 1);
}

#[test]
fn repo_contribution_failure_is_zero_test() {
    let repo = Repository {
        name: "x".to_string(),
        full_name: "owner/x".to_string(),
        ..Default::default()
    };
    let failed = repo_contribution(
        &repo,
        Err(RepoFetchError::new("x".to_string(), Error::Error("boom"))),
    );
    assert_eq!(failed, contribution("x", 0));

    let counted = repo_contribution(
        &repo,
        Ok(vec![Contributor::new("a", 7), Contributor::new("b", 2), Contributor::new("c", 1)]),
    );
    assert_eq!(counted, contribution("x", 10));
}

#[test]
fn summarize_test() {
    let repos: Vec<Repository> = (1..=12)
        .map(|i| Repository {
            name: format!("repo_{}", i),
            stars: i,
            forks: i * 2,
            watchers: 1,
            ..Default::default()
        })
        .collect();
    assert_eq!(summarize(&repos), SummaryStats::new(78, 156, 12, 12));
    assert_eq!(summarize(&[]), SummaryStats::default());
}
