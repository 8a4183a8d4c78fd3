use clap::Parser;
use dashboard::aggregator::{CONTRIBUTION_REPOS, EVENTS, LANGUAGE_REPOS, TOP_LANGUAGES, TOP_REPOS};
use dashboard::{Limits, Theme};
use github_client::GITHUB_URL;
use secrecy::SecretString;
use std::{
    fmt::{Debug, Display},
    str::FromStr,
};

pub const DEFAULT_USER: &str = "josephpipitone";

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// GitHub user whose repositories are summarized
    #[clap(short, long, env = "USER_NAME", default_value = DEFAULT_USER)]
    pub user: String,

    /// API OAuth access token
    #[clap(short, long, env)]
    pub api_token: Option<SecretString>,

    /// Repository API URL
    #[clap(long, env, default_value = GITHUB_URL)]
    pub api_url: String,

    /// Number of repositories whose languages are merged
    #[clap(long, env, default_value_t = LANGUAGE_REPOS, parse(try_from_str=language_repos_in_range))]
    pub language_repos: usize,

    /// Number of repositories ranked by contributions
    #[clap(long, env, default_value_t = CONTRIBUTION_REPOS, parse(try_from_str=contribution_repos_in_range))]
    pub contribution_repos: usize,

    /// Languages shown in the language breakdown
    #[clap(long, env, default_value_t = TOP_LANGUAGES, parse(try_from_str=top_languages_in_range))]
    pub top_languages: usize,

    /// Repositories shown in the contributions chart
    #[clap(long, env, default_value_t = TOP_REPOS, parse(try_from_str=top_repos_in_range))]
    pub top_repos: usize,

    /// Recent events shown
    #[clap(long, env, default_value_t = EVENTS, parse(try_from_str=events_in_range))]
    pub events: usize,

    #[clap(short, long, env, default_value = "light")]
    pub theme: Theme,
}

impl Args {
    pub fn limits(&self) -> Limits {
        Limits {
            language_repos: self.language_repos,
            contribution_repos: self.contribution_repos,
            top_repos: self.top_repos,
            events: self.events,
            ..Limits::default()
        }
    }
}

fn language_repos_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, usize::MAX, "language_repos".to_string())
}

fn contribution_repos_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, usize::MAX, "contribution_repos".to_string())
}

fn top_languages_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, usize::MAX, "top_languages".to_string())
}

fn top_repos_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, usize::MAX, "top_repos".to_string())
}

fn events_in_range(value: &str) -> clap::Result<usize, String> {
    number_in_range(value, 1, usize::MAX, "events".to_string())
}

fn number_in_range<T>(value: &str, min: T, max: T, name: String) -> clap::Result<T, String>
where
    T: FromStr + PartialOrd + Display,
    <T as FromStr>::Err: Display,
{
    value.parse::<T>().map_err(|err| format!("{}", err)).and_then(|value| {
        if value < min || value > max {
            return Err(format!("{} is not in range {} .. {}.", name, min, max));
        }
        Ok(value)
    })
}

#[test]
fn defaults_test() {
    let args = Args::try_parse_from(["gh_dashboard"]).unwrap();
    assert_eq!(args.user, DEFAULT_USER);
    assert_eq!(args.theme, Theme::Light);
    assert_eq!(args.limits(), Limits::default());
    assert!(args.api_token.is_none());
    assert_eq!(args.api_url, GITHUB_URL);
}

#[test]
fn limits_test() {
    let args = Args::try_parse_from([
        "gh_dashboard",
        "--user",
        "octo",
        "--language-repos",
        "3",
        "--contribution-repos",
        "20",
        "--theme",
        "dark",
    ])
    .unwrap();
    assert_eq!(args.user, "octo");
    assert_eq!(args.theme, Theme::Dark);
    let limits = args.limits();
    assert_eq!(limits.language_repos, 3);
    assert_eq!(limits.contribution_repos, 20);
}

#[test]
fn range_test() {
    assert!(Args::try_parse_from(["gh_dashboard", "--top-repos", "0"]).is_err());
    assert_eq!(
        top_repos_in_range("0"),
        Err(format!("top_repos is not in range 1 .. {}.", usize::MAX))
    );
    assert_eq!(
        language_repos_in_range("0"),
        Err(format!("language_repos is not in range 1 .. {}.", usize::MAX))
    );
    assert_eq!(events_in_range("12"), Ok(12));
    assert!(Args::try_parse_from(["gh_dashboard", "--events", "ten"]).is_err());
    assert_eq!(number_in_range("0.5", 0.0, 1.0, "ratio".to_string()), Ok(0.5));
    assert_eq!(
        number_in_range("2", 0, 1, "count".to_string()),
        Err("count is not in range 0 .. 1.".to_string())
    );
}
