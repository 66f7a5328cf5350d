use clap::Parser;
use log::info;

mod commit;
mod config;
mod error;
mod git;
mod notify;
mod payload;
mod remote;

use config::{
    ClientConfig, Credentials, Endpoints, RepoSlug, DEFAULT_GITHUB_URL, DEFAULT_NOTIFY_URL,
    DEFAULT_TRAVIS_URL, DEFAULT_USER_AGENT,
};
use remote::http::HttpTransport;

/// Ask Travis CI to rebuild a repository by replaying a forged GitHub push
/// of its last built commit
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The repository to ping, as OWNER/NAME. Detected from the upstream of
    /// the current git branch when omitted
    repo: Option<RepoSlug>,

    /// The GitHub username the Travis token belongs to
    #[arg(short, long, env = "TRAVIS_PING_USER", required_unless_present = "dry_run")]
    user: Option<String>,

    /// The Travis CI token of that user
    #[arg(
        short,
        long,
        env = "TRAVIS_TOKEN",
        hide_env_values = true,
        required_unless_present = "dry_run"
    )]
    token: Option<String>,

    /// Base url of the Travis CI API
    #[arg(long, default_value = DEFAULT_TRAVIS_URL)]
    travis_url: String,

    /// Base url of the GitHub API
    #[arg(long, default_value = DEFAULT_GITHUB_URL)]
    github_url: String,

    /// Where the forged push is delivered
    #[arg(long, default_value = DEFAULT_NOTIFY_URL)]
    notify_url: String,

    /// Verify TLS certificates (off by default, as Travis' notify endpoint
    /// has never been reached with verification)
    #[arg(long)]
    verify_tls: bool,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    user_agent: String,

    /// Print the forged payload instead of sending it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse the arguments
    let args = Args::parse();

    let repo = match args.repo {
        Some(repo) => repo,
        None => {
            let repo = git::detect_repository()?;
            info!("Found repository from git remote: {}", repo);
            repo
        }
    };

    let transport = HttpTransport::new(&ClientConfig {
        user_agent: args.user_agent,
        verify_tls: args.verify_tls,
    })?;
    let endpoints = Endpoints::new(&args.travis_url, &args.github_url, &args.notify_url);

    if args.dry_run {
        let payload = payload::forge(&transport, &endpoints, &repo)?;
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    let (Some(user), Some(token)) = (args.user, args.token) else {
        anyhow::bail!("--user and --token are required to send a notification");
    };
    let credentials = Credentials::new(user, token);
    let response = notify::ping(&transport, &endpoints, &credentials, &repo)?;
    if !response.body.is_empty() {
        println!("{}", response.body);
    }

    Ok(())
}
