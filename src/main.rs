use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use semantic_release::cli;
use semantic_release::config::{
    self, parse_slug, FileConfig, RegistryKind, ReleaseConfig, TravisEnvironment,
};
use semantic_release::history::Git2History;
use semantic_release::registry::{GitHubRegistry, LocalGitRegistry, ReleaseRegistry};
use semantic_release::{ui, ReleaseError};

#[derive(clap::Parser)]
#[command(
    name = "semantic-release",
    version,
    about = "Tag the next semantic version based on conventional commits"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Range start (exclusive)")]
    from: Option<String>,

    #[arg(long, help = "Range end. Default: latest commit in the branch")]
    to: Option<String>,

    #[arg(short, long, help = "Branch being built. Default: current branch")]
    branch: Option<String>,

    #[arg(long, help = "Owner of the repository")]
    owner: Option<String>,

    #[arg(long, help = "Name of the repository")]
    repo: Option<String>,

    #[arg(long, conflicts_with_all = ["owner", "repo"], help = "Repository as owner/repo")]
    slug: Option<String>,

    #[arg(long, help = "This is a pull-request build; never publish")]
    pr: bool,

    #[arg(long, help = "Version constraint selecting the base release")]
    range: Option<String>,

    #[arg(long, help = "Where tags live: github or git")]
    registry: Option<RegistryKind>,

    #[arg(long, help = "GitHub API root, e.g. https://<host>/api/v3")]
    api_url: Option<String>,

    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, help = "GitHub API token")]
    token: Option<String>,

    #[arg(
        long,
        conflicts_with_all = ["from", "to", "branch", "owner", "repo", "slug", "pr"],
        help = "Read the commit range, slug, branch and PR flag from Travis CI"
    )]
    travis: bool,

    #[arg(short, long, help = "Enable debug logging")]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    setup_logging(args.verbose);

    if let Err(e) = run(args) {
        if e
            .downcast_ref::<ReleaseError>()
            .is_some_and(ReleaseError::is_invalid_range)
        {
            tracing::debug!(error = %e, "nothing to release");
            ui::display_status(ui::INVALID_RANGE_MESSAGE);
            return;
        }
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Set up logging/tracing.
fn setup_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_new("semantic_release=debug,info").unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if verbose {
        tracing::debug!("Debug logging enabled");
    }
}

fn run(args: Args) -> Result<()> {
    let file = config::load_config(args.config.as_deref()).context("Error loading config")?;
    let history = Git2History::open(".").context("Git repository error")?;

    let mut release = if args.travis {
        let env = TravisEnvironment::from_env()?;
        let mut release =
            ReleaseConfig::with_file_config(&file, env.from_commit, env.branch, env.owner, env.repo);
        release.to_commit = env.to_commit;
        release.is_pr = env.is_pr;
        release
    } else {
        let Some(from) = args.from else {
            bail!("missing --from, the commit to start the range after");
        };
        let (owner, repo) = match args.slug.as_deref() {
            Some(slug) => parse_slug(slug)?,
            None => (
                args.owner.unwrap_or_default(),
                args.repo.unwrap_or_default(),
            ),
        };
        let branch = match args.branch {
            Some(branch) => branch,
            None => history
                .current_branch()
                .context("Cannot determine current branch, pass --branch")?,
        };
        let mut release = ReleaseConfig::with_file_config(&file, from, branch, owner, repo);
        release.to_commit = args.to;
        release.is_pr = args.pr;
        release
    };
    release.verbose = args.verbose;
    if args.range.is_some() {
        release.version_range = args.range;
    }

    let registry = build_registry(&file, args.registry, args.api_url, args.token)?;

    let outcome = cli::semantic_release(&release, &history, registry.as_ref())?;
    ui::display_outcome(&outcome);
    Ok(())
}

fn build_registry(
    file: &FileConfig,
    kind: Option<RegistryKind>,
    api_url: Option<String>,
    token: Option<String>,
) -> Result<Box<dyn ReleaseRegistry>> {
    let settings = &file.registry;
    let registry: Box<dyn ReleaseRegistry> = match kind.unwrap_or(settings.kind) {
        RegistryKind::GitHub => {
            let api_url = api_url.unwrap_or_else(|| settings.api_url.clone());
            Box::new(GitHubRegistry::new(api_url, token, settings.per_page)?)
        }
        RegistryKind::Git => Box::new(LocalGitRegistry::open(
            ".",
            settings.per_page as usize,
            settings.push_remote.clone(),
        )?),
    };
    Ok(registry)
}
