use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::SiteConfig;
use crate::error::{Result, SiteError};
use crate::landing::ContactForm;
use crate::routes::{AuthStatus, Route, StaticSession, guard};

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn,bibliotech=info";

#[derive(Debug, Parser)]
#[command(
    name = "bibliotech",
    about = "Render and inspect the Bibliotech landing site",
    version
)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write index.html, login.html and components.html.
    Render(RenderArgs),

    /// Print the route table and the guard decision per route.
    Routes(RoutesArgs),

    /// Validate a contact form and print its WhatsApp link.
    Whatsapp(WhatsappArgs),

    /// Validate a configuration file and the environment overrides.
    #[command(name = "check-config")]
    CheckConfig(CheckConfigArgs),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[arg(long)]
    pub out: PathBuf,

    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Leave out the wasm hydration script.
    #[arg(long = "no-hydrate")]
    pub no_hydrate: bool,
}

#[derive(Debug, Args)]
pub struct RoutesArgs {
    /// Evaluate the guard for a signed-in session.
    #[arg(long, conflicts_with = "loading")]
    pub authenticated: bool,

    /// Evaluate the guard while the session is still loading.
    #[arg(long)]
    pub loading: bool,

    /// Resolve a single path instead of listing every route.
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, Args)]
pub struct WhatsappArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub school: String,

    #[arg(long)]
    pub message: String,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckConfigArgs {
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    let stdout = std::io::stdout();
    run_with(cli, &mut stdout.lock(), &|key| std::env::var(key).ok())
}

/// [`run`] with an explicit output stream and environment.
pub fn run_with(
    cli: Cli,
    out: &mut dyn Write,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    match cli.command {
        Commands::Render(args) => run_render(&args, out, lookup).map(|_| ()),
        Commands::Routes(args) => run_routes(&args, out),
        Commands::Whatsapp(args) => run_whatsapp(args, out, lookup),
        Commands::CheckConfig(args) => run_check_config(&args, out, lookup),
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "warn,bibliotech=debug"
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    // A subscriber may already be installed (tests, embedding hosts).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init();
}

fn load_config(
    path: Option<&Path>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<SiteConfig> {
    SiteConfig::load_with(path, lookup)
}

pub fn run_render(
    args: &RenderArgs,
    out: &mut dyn Write,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<Vec<PathBuf>> {
    let config = load_config(args.config.as_deref(), lookup)?;
    std::fs::create_dir_all(&args.out)?;
    let mut written = Vec::new();
    for (file, html) in crate::render_site(&config, !args.no_hydrate) {
        let path = args.out.join(file);
        std::fs::write(&path, html)?;
        tracing::info!(path = %path.display(), "page written");
        writeln!(out, "{}", path.display())?;
        written.push(path);
    }
    Ok(written)
}

pub fn run_routes(args: &RoutesArgs, out: &mut dyn Write) -> Result<()> {
    let session = if args.authenticated {
        StaticSession::authenticated("cli")
    } else if args.loading {
        StaticSession(AuthStatus::Loading)
    } else {
        StaticSession::anonymous()
    };
    let routes: Vec<Route> = match &args.path {
        Some(path) => match Route::resolve(path) {
            Some(route) => vec![route],
            None => return Err(SiteError::UnknownRoute { path: path.clone() }),
        },
        None => Route::ALL.to_vec(),
    };
    for route in routes {
        let decision = guard(route, &session);
        let protected = if route.requires_auth() {
            "protected"
        } else {
            "public"
        };
        let target = decision
            .redirect_url()
            .map(|url| format!(" ({url})"))
            .unwrap_or_default();
        writeln!(out, "{:<14} {:<9} {decision}{target}", route.path(), protected)?;
    }
    Ok(())
}

pub fn run_whatsapp(
    args: WhatsappArgs,
    out: &mut dyn Write,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    let config = load_config(args.config.as_deref(), lookup)?;
    let form = ContactForm {
        name: args.name,
        email: args.email,
        school: args.school,
        phone: args.phone,
        message: args.message,
    };
    let url = form.submit(&config.whatsapp_digits(), config.contact.max_message_len)?;
    writeln!(out, "{url}")?;
    Ok(())
}

pub fn run_check_config(
    args: &CheckConfigArgs,
    out: &mut dyn Write,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SiteConfig::from_file(path)?,
        None => SiteConfig::default(),
    };
    config.apply_env(lookup)?;
    let errors = config.validate();
    if !errors.is_empty() {
        for error in &errors {
            writeln!(out, "error: {error}")?;
        }
        return Err(SiteError::invalid_config(errors));
    }
    writeln!(out, "configuration ok")?;
    Ok(())
}
