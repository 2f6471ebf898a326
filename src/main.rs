use clap::{Parser, Subcommand};
use review_kit::config::{self, CONFIG_FILENAME};
use review_kit::reader::relative_display;
use review_kit::output;
use review_kit::report::{self, AuditContext, runtime_version};
use review_kit::vcs::{CiEnv, GitCli};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "review-kit")]
#[command(about = "Generate a pre-review audit report for a web app repository")]
#[command(long_about = "\
Generate a pre-review audit report for a web app repository

Inspects the repository and writes review-kit/REVIEW_KIT.json:

  package.json           name, version, scripts, dependencies
  src/app/**/page.tsx    one route per page file (/blog/[slug])
  .env / .env.example    keys only in one file, keys in both
  prisma/schema.prisma   verbatim snapshot, if present
  git                    short HEAD hash and changed files

In CI (CI set), changed files are diffed against origin/$GITHUB_BASE_REF
when GITHUB_BASE_REF and GITHUB_SHA are set; otherwise against HEAD~1.

Paths can be overridden in review-kit.toml at the repository root.
Run 'review-kit gen-config' to print a documented one.

Set RUST_LOG=debug to see what each extractor found or skipped.")]
#[command(version = version_string())]
struct Cli {
    /// Repository root to audit
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Collect the report and write it (default)
    Generate,
    /// Collect the report and print the summary without writing anything
    Check,
    /// Print a stock review-kit.toml with all options documented
    GenConfig,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn version_string() -> &'static str {
    // Leaked once at startup, called exactly once
    Box::leak(runtime_version().into_boxed_str())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging();

    match cli.command.unwrap_or(Command::Generate) {
        Command::Generate => audit(&cli.root, true),
        Command::Check => audit(&cli.root, false),
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(())
        }
    }
}

/// Run the extractors against `root`, writing the report unless `write` is false.
fn audit(root: &Path, write: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = config::load_config(root)
        .map_err(|e| format!("invalid {}: {e}", root.join(CONFIG_FILENAME).display()))?;
    let git = GitCli::new(root);
    let ci = CiEnv::from_env();
    let ctx = AuditContext {
        root,
        config: &config,
        vcs: &git,
        ci: &ci,
    };

    if write {
        let (report, path) = report::run(&ctx)?;
        output::print_summary(&report, Some(&relative_display(&path, root)));
    } else {
        let report = report::collect(&ctx);
        output::print_summary(&report, None);
    }
    Ok(())
}
