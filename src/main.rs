use clap::Parser;
use dashboard::api::Error;
use gh_dashboard_app::Args;

/// Prints the dashboard of a single GitHub user.
#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();

    let state = gh_dashboard_app::load_dashboard(&args).await?;

    print!("{}", gh_dashboard_app::render::render(&state, args.top_languages));

    Ok(())
}
