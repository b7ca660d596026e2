use std::io;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::debug;

use house_cli::commands::{self, AssessArgs, CalcArgs};
use house_cli::config::HouseConfig;
use house_cli::terminal::TerminalView;
use house_cli::{app, logging, session};
use house_core::calculations::AdvisorSelections;
use house_core::models::LocationInsights;
use house_core::wizard::{AgentChannel, AgentContact, NullView, ShareTarget};

const DEFAULT_PAGE_URL: &str = "https://igethouse.com/";

// ─── CLI definition ──────────────────────────────────────────────────────────

/// iGetHouse home-buying toolkit: affordability calculator, financial
/// assessment, location insights, smart advisor and the assessment wizard.
#[derive(Debug, Parser)]
#[command(name = "igethouse", version)]
struct Cli {
    /// Configuration file. Defaults to `igethouse.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Storage backend (`sqlite` or `memory`).
    #[arg(long, global = true)]
    store: Option<String>,

    /// Store connection string.
    /// For SQLite this is a file path (e.g. `igethouse.db`) or `:memory:`.
    #[arg(long, global = true)]
    db: Option<String>,

    /// Also append log output to this file. Overrides `[logging] file`.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `house_core=trace`. Overrides RUST_LOG
    /// and `[logging] level`.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Hide log output on the console.
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mortgage and closing-cost breakdown for a price.
    Calc(CalcArgs),

    /// Score monthly finances against a target property.
    Assess(AssessArgs),

    /// Neighbourhood insights for a location id (e.g. `lekki`, `maitama`).
    Location { id: String },

    /// Smart advisor recommendations and saved reports.
    Advisor {
        #[command(subcommand)]
        action: AdvisorAction,
    },

    /// Buyer checklist progress.
    Checklist {
        #[command(subcommand)]
        action: ChecklistAction,
    },

    /// Step through the six-step assessment wizard.
    Wizard,

    /// Share a page link.
    Share {
        #[arg(value_parser = parse_share_target)]
        target: ShareTarget,

        #[arg(long, default_value = DEFAULT_PAGE_URL)]
        url: String,
    },

    /// Send the saved wizard assessment to an agent.
    Agent {
        #[arg(long, default_value = "whatsapp", value_parser = parse_agent_channel)]
        channel: AgentChannel,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Debug, Subcommand)]
enum AdvisorAction {
    /// Recommend a property type from salary tier, location and lifestyle.
    Predict {
        /// `junior`, `mid`, `senior` or `executive`.
        #[arg(long)]
        salary: Option<String>,
        /// `lekki`, `ikeja` or `yaba`.
        #[arg(long)]
        location: Option<String>,
        /// `minimal`, `moderate`, `comfort` or `luxury`.
        #[arg(long)]
        lifestyle: Option<String>,
        /// Also keep the result as a saved report.
        #[arg(long)]
        save: bool,
    },
    /// Show the most recent recommendation.
    Last,
    /// List saved reports.
    Reports,
    /// Show one saved report.
    Show { id: i64 },
    /// Delete one saved report.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
enum ChecklistAction {
    Show,
    /// Flip one item, e.g. `toggle financial budget-range`.
    Toggle { category: String, item: String },
}

fn parse_share_target(s: &str) -> Result<ShareTarget, String> {
    ShareTarget::parse(s).ok_or_else(|| format!("'{s}' is not one of whatsapp, email, copy"))
}

fn parse_agent_channel(s: &str) -> Result<AgentChannel, String> {
    AgentChannel::parse(s).ok_or_else(|| format!("'{s}' is not one of whatsapp, email"))
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_default_logging();

    let cli = Cli::parse();

    let config = HouseConfig::resolve(cli.config.as_deref())?
        .with_overrides(cli.store, cli.db)
        .with_log_flags(cli.log_level, cli.log_file, cli.quiet);
    logging::apply(&config.logging)?;
    debug!(store = %config.store, "configuration resolved");

    let mut out = io::stdout();

    match cli.command {
        Command::Calc(args) => commands::calculate(&mut out, &config.fees, &args),
        Command::Assess(args) => commands::assess(&mut out, &args),
        Command::Location { id } => {
            commands::location(&mut out, &LocationInsights::with_defaults(), &id)
        }
        Command::Share { target, url } => commands::share(&mut out, target, &url),
        Command::Wizard => {
            let mut app = app::bootstrap(&config, TerminalView::new(io::stdout())).await?;
            session::run(&mut app, io::stdin().lock()).await
        }
        Command::Agent {
            channel,
            name,
            email,
            phone,
            notes,
        } => {
            let app = app::bootstrap(&config, NullView).await?;
            let contact = AgentContact {
                name,
                email,
                phone,
                notes,
            };
            commands::agent(&mut out, &app.wizard, channel, &contact)
        }
        Command::Advisor { action } => {
            let app = app::bootstrap(&config, NullView).await?;
            let store = app.store.as_ref();
            match action {
                AdvisorAction::Predict {
                    salary,
                    location,
                    lifestyle,
                    save,
                } => {
                    let selections = AdvisorSelections {
                        salary,
                        location,
                        lifestyle,
                    };
                    commands::advisor_predict(&mut out, store, &selections, save, Utc::now())
                        .await
                        .map(|_| ())
                }
                AdvisorAction::Last => commands::advisor_last(&mut out, store).await,
                AdvisorAction::Reports => commands::reports_list(&mut out, store).await,
                AdvisorAction::Show { id } => commands::report_show(&mut out, store, id).await,
                AdvisorAction::Delete { id } => commands::report_delete(&mut out, store, id).await,
            }
        }
        Command::Checklist { action } => {
            let app = app::bootstrap(&config, NullView).await?;
            let store = app.store.as_ref();
            match action {
                ChecklistAction::Show => commands::checklist_show(&mut out, store).await,
                ChecklistAction::Toggle { category, item } => {
                    commands::checklist_toggle(&mut out, store, &category, &item).await
                }
            }
        }
    }
}
