use clap::{Parser, Subcommand};
use rust_ads_dashboard::config::Config;
use rust_ads_dashboard::dashboard::Dashboard;
use rust_ads_dashboard::dashboard_client::DashboardApi;
use rust_ads_dashboard::models::{LeadFactor, LeadScoreInput};
use rust_ads_dashboard::view::DashboardView;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about = "Ads verification dashboard client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a verification and follow it until every check finishes
    Verify {
        /// Instagram handle (without @)
        #[arg(long, default_value = "")]
        instagram: String,
        /// Domain to look up in the Google Ads Transparency Center
        #[arg(long, default_value = "")]
        domain: String,
    },
    /// Show the current verification history once
    Status,
    /// Clear the local view and the server-side history
    Reset,
    /// Look up the partners (QSA) of a company
    Qsa {
        /// CNPJ, masked or digits only
        cnpj: String,
    },
    /// Score a lead from the qualification checklist
    Score {
        /// Initial value of the lead
        #[arg(long, default_value = "")]
        inicial: String,
        /// Current value of the lead
        #[arg(long, default_value = "")]
        atual: String,
        /// Checklist item as `label=weight`
        #[arg(long = "factor", value_parser = parse_factor)]
        factors: Vec<(String, i64)>,
        /// Label of a checked item (repeatable)
        #[arg(long = "checked")]
        checked: Vec<String>,
    },
}

fn parse_factor(raw: &str) -> Result<(String, i64), String> {
    let (label, weight) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected label=weight, got '{}'", raw))?;
    let weight = weight
        .trim()
        .parse()
        .map_err(|_| format!("weight of '{}' must be an integer", label))?;
    Ok((label.trim().to_string(), weight))
}

fn print_view(view: &DashboardView) {
    if view.empty_placeholder_visible {
        println!("Nenhuma verificação realizada ainda.");
    }
    for card in &view.cards {
        println!("{}\n", card);
    }
    if view.qsa.results_visible {
        for line in &view.qsa.lines {
            println!("{}", line);
        }
    }
    for line in &view.lead_result {
        println!("{}", line);
    }
}

async fn follow_until_complete<A: DashboardApi>(dashboard: &Dashboard<A>, interval: Duration) {
    while dashboard.is_polling() {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                tracing::info!("{} verifications on screen", dashboard.view().cards.len());
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping polling");
                dashboard.shutdown();
            }
        }
    }
}

/// Main entry point for the dashboard client.
///
/// Initializes tracing, loads configuration from the environment and runs
/// the requested command against the dashboard backend.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rust_ads_dashboard=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    let dashboard = Dashboard::from_config(&config)?;
    tracing::info!("✓ Dashboard client initialized: {}", config.api_base_url);

    match cli.command {
        Commands::Verify { instagram, domain } => {
            dashboard.fill_verification_form(&instagram, &domain);
            if dashboard.submit().await.is_ok() {
                follow_until_complete(&dashboard, config.poll_interval()).await;
            }
        }
        Commands::Status => dashboard.refresh().await?,
        Commands::Reset => dashboard.reset().await,
        Commands::Qsa { cnpj } => {
            let masked = dashboard.set_cnpj_input(&cnpj);
            tracing::info!("Consultando CNPJ {}", masked);
            // failures are already shown as alerts
            let _ = dashboard.lookup_company().await;
        }
        Commands::Score {
            inicial,
            atual,
            factors,
            checked,
        } => {
            dashboard.set_lead_form(LeadScoreInput {
                valor_inicial: inicial,
                valor_atual: atual,
                factors: factors
                    .into_iter()
                    .map(|(label, weight)| LeadFactor {
                        checked: checked.contains(&label),
                        label,
                        weight,
                    })
                    .collect(),
            });
            dashboard.calculate_lead();
        }
    }

    let view = dashboard.view();
    for alert in &view.alerts {
        eprintln!("⚠ {}", alert);
    }
    print_view(&view);

    Ok(())
}
