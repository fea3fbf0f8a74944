use clap::Parser;
use config::ProfileType;
use controller::{
    build_controller,
    config::{Config, DEFAULT_BACKEND_URL},
    init_tracing,
    metrics::install_prometheus_exporter,
    session::{run, HELP},
    terminal::TerminalRenderer,
};
use tokio::io::BufReader;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "payout")]
#[command(about = "Interactive withdrawal and deposit form")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Base url of the payment backend, overrides the file
    #[arg(long, env = "PAYOUT_BACKEND_URL")]
    backend_url: Option<String>,

    /// Profile to use when no configuration file is given
    #[arg(long, value_parser = parse_profile)]
    profile: Option<ProfileType>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    /// Serve Prometheus metrics on this port
    #[arg(long)]
    metrics_port: Option<u16>,
}

fn parse_profile(s: &str) -> Result<ProfileType, String> {
    match s {
        "demo" | "demo_wallet" | "demo-wallet" => Ok(ProfileType::DemoWallet),
        "gateway" => Ok(ProfileType::Gateway),
        "checkout" => Ok(ProfileType::Checkout),
        other => Err(format!("unknown profile: {other}")),
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    info!("Starting payout form");

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            Config::from_file(path)?
        }
        None => Config::new(DEFAULT_BACKEND_URL, ProfileType::DemoWallet),
    };
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    if let Some(port) = cli.metrics_port {
        install_prometheus_exporter(port)?;
        info!(port, "Metrics exporter listening");
    }

    let frontend = config.frontend_config()?;
    let deposits_enabled = frontend.deposits_enabled;
    let mut controller = build_controller(&config.backend_url, frontend, TerminalRenderer::stdout())?;

    if let Err(e) = controller.load_banks().await {
        warn!(error = %e, "Starting without a bank list");
    }
    if let Err(e) = controller.refresh_balance().await {
        warn!(error = %e, "Starting without a balance");
    }

    println!("{HELP}");
    if !deposits_enabled {
        println!("(deposits are disabled in this profile)");
    }

    tokio::select! {
        result = run(&mut controller, BufReader::new(tokio::io::stdin())) => result?,
        _ = tokio::signal::ctrl_c() => info!("Interrupted"),
    }

    info!(
        records = controller.state().history.len(),
        "Payout form closed"
    );
    Ok(())
}
