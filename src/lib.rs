mod args;
pub mod render;

pub use args::{Args, DEFAULT_USER};

use dashboard::api::Result;
use dashboard::{DashboardLoader, DashboardState};
use github_client::GithubClientBuilder;
use log::debug;

/// Builds a client from `args` and runs a single dashboard load.
///
/// A failed load is reported through the returned state, only a misconfigured client is an error.
pub async fn load_dashboard(args: &Args) -> Result<DashboardState> {
    let mut client = GithubClientBuilder::default().with_github_url(&args.api_url);
    if let Some(token) = args.api_token.clone() {
        client = client.try_with_token(token)?;
    }
    let client = client.build()?;

    debug!("Loading dashboard of {} from {}", args.user, args.api_url);
    let loader = DashboardLoader::new(client, args.limits());
    let state = DashboardState::new(args.theme).start_loading();
    let result = loader.load(&args.user).await;

    Ok(state.finish(result))
}
