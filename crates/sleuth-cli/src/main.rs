//! Sleuth CLI
//!
//! Generates search queries from investigation records, sets up one browser
//! session per credential and splits the queries between them.

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use sleuth_browser::{BrowserActions, ChromiumEngine, ChromiumSession, Pacer};
use sleuth_core::AppConfig;
use sleuth_queries::{by_incident, by_subject, load_records};
use sleuth_scanner::{
    load_inputs, partition, query_keys, AssignmentOutcome, DispatchPlan, Dispatcher, Grouping,
    PartitionAssignment, SearchTask,
};
use sleuth_session::{LoginRoutines, SessionProvider, SessionStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "sleuth")]
#[command(about = "Sleuth - Multi-account search dispatcher", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true, env = "SLEUTH_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the query set generated from investigation records
    Queries {
        /// Investigation records (JSON array)
        #[arg(long)]
        records: PathBuf,

        /// How records are expanded into queries
        #[arg(long, value_enum, default_value = "incident")]
        grouping: GroupingArg,
    },
    /// Print how queries would be split between credentials
    Plan {
        /// Credentials file (TOML)
        #[arg(long)]
        credentials: PathBuf,

        /// Investigation records (JSON array)
        #[arg(long)]
        records: PathBuf,

        #[arg(long, value_enum, default_value = "incident")]
        grouping: GroupingArg,
    },
    /// Log in every credential and dispatch its share of queries
    Run {
        /// Credentials file (TOML)
        #[arg(long)]
        credentials: PathBuf,

        /// Investigation records (JSON array)
        #[arg(long)]
        records: PathBuf,

        #[arg(long, value_enum, default_value = "incident")]
        grouping: GroupingArg,

        /// Keep going when some credentials fail to log in
        #[arg(long, default_value = "false")]
        settled: bool,

        /// Search URL with a `{query}` placeholder; without it only sessions are set up
        #[arg(long)]
        search_url: Option<String>,

        /// Number of credential shares worked through at once
        #[arg(long, default_value = "5")]
        max_concurrent: usize,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum GroupingArg {
    Incident,
    Subject,
}

impl From<GroupingArg> for Grouping {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::Incident => Grouping::Incident,
            GroupingArg::Subject => Grouping::Subject,
        }
    }
}

#[derive(Serialize)]
struct RunReport<'a> {
    assignments: &'a PartitionAssignment,
    failed_logins: Vec<String>,
    outcomes: Vec<AssignmentOutcome>,
}

/// Navigates each session to a search URL built from a template.
struct UrlSearch {
    template: String,
}

impl UrlSearch {
    fn url_for(&self, query: &str) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
        self.template.replace("{query}", &encoded)
    }
}

#[async_trait]
impl SearchTask<ChromiumSession> for UrlSearch {
    async fn search(&self, session: &ChromiumSession, query: &str) -> sleuth_browser::Result<()> {
        session.navigate(&self.url_for(query)).await
    }
}

/// Initialize tracing subscriber for logging
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,sleuth=info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load_with_env(cli.config.as_deref()).context("loading config")?;

    match cli.command {
        Commands::Queries { records, grouping } => {
            let records = load_records(&records)?;
            match Grouping::from(grouping) {
                Grouping::Incident => print_json(&by_incident(&records))?,
                Grouping::Subject => print_json(&by_subject(&records))?,
            }
        }
        Commands::Plan {
            credentials,
            records,
            grouping,
        } => {
            let (registry, records) = load_inputs(&credentials, &records)?;
            let keys = query_keys(&records, grouping.into());
            print_json(&partition(&keys, &registry))?;
        }
        Commands::Run {
            credentials,
            records,
            grouping,
            settled,
            search_url,
            max_concurrent,
        } => {
            let (registry, records) = load_inputs(&credentials, &records)?;
            let keys = query_keys(&records, grouping.into());

            let engine = ChromiumEngine::launch(&config.browser)
                .await
                .context("launching chromium")?;
            let provider = SessionProvider::new(
                Arc::new(engine),
                SessionStore::new(config.session_dir()?),
                LoginRoutines::from_config(&config),
            );
            let dispatcher = Dispatcher::new(provider, Pacer::from(&config.pacing))
                .with_max_concurrent(max_concurrent);

            let (plan, failed_logins): (DispatchPlan<ChromiumSession>, Vec<String>) = if settled {
                let (plan, failures) = dispatcher.prepare_settled(&registry, &keys).await;
                let failed = failures
                    .into_iter()
                    .map(|(key, e)| format!("{key}: {e}"))
                    .collect();
                (plan, failed)
            } else {
                (dispatcher.prepare(&registry, &keys).await?, Vec::new())
            };

            let outcomes = match search_url {
                Some(template) => dispatcher.execute(&plan, &UrlSearch { template }).await,
                None => {
                    warn!("no --search-url given, sessions prepared but no searches run");
                    Vec::new()
                }
            };

            info!(
                sessions = plan.sessions.len(),
                shares = outcomes.len(),
                "run complete"
            );

            print_json(&RunReport {
                assignments: &plan.assignments,
                failed_logins,
                outcomes,
            })?;
        }
    }

    Ok(())
}
