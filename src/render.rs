//! Plain text view of the dashboard.

use dashboard::aggregator::{top_languages, Dashboard, LanguageShare, RepoContribution};
use dashboard::api::{Event, Repository};
use dashboard::{DashboardState, Theme};
use std::fmt::{self, Display, Formatter};

const BAR_WIDTH: u64 = 30;
const GITHUB_WEB_URL: &str = "https://github.com";

pub fn render(state: &DashboardState, language_count: usize) -> String {
    if state.is_loading() {
        return "Loading...\n".to_string();
    }
    let empty = Dashboard::default();
    let dashboard = state.dashboard().unwrap_or(&empty);
    DashboardView::new(dashboard, state.theme, language_count).to_string()
}

/// Text view of a loaded (or empty) dashboard.
pub struct DashboardView<'a> {
    dashboard: &'a Dashboard,
    theme: Theme,
    language_count: usize,
}

impl<'a> DashboardView<'a> {
    pub fn new(dashboard: &'a Dashboard, theme: Theme, language_count: usize) -> Self {
        DashboardView {
            dashboard,
            theme,
            language_count,
        }
    }
}

impl Display for DashboardView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let summary = &self.dashboard.summary;
        writeln!(f, "Overview Stats")?;
        writeln!(f, "  Total Stars:    {}", summary.stars)?;
        writeln!(f, "  Total Forks:    {}", summary.forks)?;
        writeln!(f, "  Total Watchers: {}", summary.watchers)?;
        writeln!(f)?;

        writeln!(f, "Your Repositories ({})", summary.repositories)?;
        for repo in &self.dashboard.repos {
            write_repo(f, repo)?;
        }
        writeln!(f)?;

        writeln!(f, "Language Breakdown")?;
        let shares = top_languages(&self.dashboard.languages, self.language_count);
        write_language_chart(f, &shares, self.theme)?;
        writeln!(f)?;

        writeln!(f, "Top Repositories by Contributions")?;
        write_contribution_chart(f, &self.dashboard.top_repos, self.theme)?;
        writeln!(f)?;

        writeln!(f, "Recent Activity")?;
        for event in &self.dashboard.events {
            write_event(f, event)?;
        }
        Ok(())
    }
}

fn write_repo(f: &mut Formatter<'_>, repo: &Repository) -> fmt::Result {
    f.write_fmt(format_args!(
        "  {} (stars: {}, forks: {})\n    {}\n    {}\n    Language: {}\n",
        repo.name,
        repo.stars,
        repo.forks,
        repo.html_url,
        repo.description.as_deref().unwrap_or("No description"),
        repo.language.as_deref().unwrap_or("Unknown"),
    ))
}

fn write_event(f: &mut Formatter<'_>, event: &Event) -> fmt::Result {
    f.write_fmt(format_args!(
        "  {}: {} - {} ({}/{})\n",
        event.kind,
        event.repo,
        event.created_at.format("%Y-%m-%d"),
        GITHUB_WEB_URL,
        event.repo
    ))
}

fn write_language_chart(f: &mut Formatter<'_>, shares: &[LanguageShare], theme: Theme) -> fmt::Result {
    if shares.is_empty() {
        return writeln!(f, "  No language data");
    }
    let total: u64 = shares.iter().map(|share| share.bytes).sum();
    let name_width = shares.iter().map(|share| share.name.len()).max().unwrap_or(0);
    for share in shares {
        writeln!(
            f,
            "  {:<width$} {:>3}% {}",
            share.name,
            percentage(share.bytes, total),
            bar(share.bytes, total, theme),
            width = name_width
        )?;
    }
    Ok(())
}

fn write_contribution_chart(f: &mut Formatter<'_>, repos: &[RepoContribution], theme: Theme) -> fmt::Result {
    if repos.is_empty() {
        return writeln!(f, "  No contributor data");
    }
    let max = repos.iter().map(|repo| repo.contributions).max().unwrap_or(0);
    let name_width = repos.iter().map(|repo| repo.name.len()).max().unwrap_or(0);
    for repo in repos {
        writeln!(
            f,
            "  {:<width$} {} {}",
            repo.name,
            bar(repo.contributions, max, theme),
            repo.contributions,
            width = name_width
        )?;
    }
    Ok(())
}

/// Rounded share of `value` in `total`, in percent.
fn percentage(value: u64, total: u64) -> u64 {
    if total == 0 {
        return 0;
    }
    (value * 100 + total / 2) / total
}

fn bar(value: u64, max: u64, theme: Theme) -> String {
    let glyph = match theme {
        Theme::Light => "#",
        Theme::Dark => "█",
    };
    let width = if max == 0 { 0 } else { value * BAR_WIDTH / max };
    glyph.repeat(width as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dashboard::aggregator::SummaryStats;

    fn sample_dashboard() -> Dashboard {
        Dashboard {
            repos: vec![Repository {
                name: "dotfiles".to_string(),
                full_name: "octo/dotfiles".to_string(),
                html_url: "https://github.com/octo/dotfiles".to_string(),
                stars: 4,
                forks: 1,
                ..Default::default()
            }],
            events: vec![Event {
                kind: "PushEvent".to_string(),
                repo: "octo/dotfiles".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap(),
            }],
            languages: [("Shell".to_string(), 75), ("Lua".to_string(), 25)].into_iter().collect(),
            top_repos: vec![RepoContribution::new("dotfiles".to_string(), "octo/dotfiles".to_string(), 12)],
            summary: SummaryStats::new(4, 1, 4, 1),
        }
    }

    #[test]
    fn render_loading_test() {
        let state = DashboardState::default();
        assert_eq!(render(&state, 5), "Loading...\n");
        assert_eq!(render(&state.start_loading(), 5), "Loading...\n");
    }

    #[test]
    fn view_test() {
        let dashboard = sample_dashboard();
        let out = DashboardView::new(&dashboard, Theme::Dark, 1).to_string();
        assert!(out.contains(&format!("  Shell 100% {}\n", "█".repeat(30))));
        assert!(!out.contains("Lua"));
    }

    #[test]
    fn render_loaded_test() {
        let state = DashboardState::default().start_loading().finish(Ok(sample_dashboard()));
        let out = render(&state, 5);
        assert!(out.contains("Total Stars:    4"));
        assert!(out.contains("Your Repositories (1)"));
        assert!(out.contains("  dotfiles (stars: 4, forks: 1)\n    https://github.com/octo/dotfiles\n    No description\n"));
        assert!(out.contains("Language: Unknown"));
        assert!(out.contains(&format!("  Shell  75% {}\n", "#".repeat(22))));
        assert!(out.contains(&format!("  Lua    25% {}\n", "#".repeat(7))));
        assert!(out.contains(&format!("  dotfiles {} 12\n", "#".repeat(30))));
        assert!(out.contains("  PushEvent: octo/dotfiles - 2024-03-01 (https://github.com/octo/dotfiles)\n"));
    }

    #[test]
    fn render_failed_test() {
        let state = DashboardState::new(Theme::Dark)
            .start_loading()
            .finish(Err(dashboard::api::Error::Error("offline")));
        let out = render(&state, 5);
        assert!(out.contains("Total Stars:    0"));
        assert!(out.contains("Your Repositories (0)"));
        assert!(out.contains("No language data"));
        assert!(out.contains("No contributor data"));
    }

    #[test]
    fn dark_theme_bar_test() {
        assert_eq!(bar(1, 2, Theme::Dark), "█".repeat(15));
        assert_eq!(bar(5, 0, Theme::Light), "");
    }

    #[test]
    fn percentage_test() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(0, 0), 0);
    }
}
