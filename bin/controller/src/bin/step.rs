//! CLI tool to run a single form action against the backend.
//!
//! - `fees`: print the fee preview for an amount
//! - `withdraw`: fill in the form and submit a withdrawal
//! - `deposit`: start a checkout deposit
//! - `banks`: list the banks offered by the backend
//! - `balance`: refresh and print the balance

use clap::{Parser, Subcommand};
use controller::{
    build_controller, config::Config, form::FormField, init_tracing, terminal::TerminalRenderer,
};
use tracing::info;
use withdrawal::{preview_from_input, PaymentGateway, WithdrawalMethod};

#[derive(Parser)]
#[command(name = "step")]
#[command(about = "Run a single payout form action")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Base url of the payment backend, overrides the file
    #[arg(long, env = "PAYOUT_BACKEND_URL")]
    backend_url: Option<String>,

    /// Emit logs as JSON
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the fee preview for an amount
    Fees {
        amount: String,
        #[arg(short, long, default_value = "bank")]
        method: WithdrawalMethod,
    },

    /// Submit a withdrawal
    Withdraw {
        amount: String,
        #[arg(short, long, default_value = "bank")]
        method: WithdrawalMethod,
        #[arg(long, default_value = "")]
        account_name: String,
        #[arg(long, default_value = "")]
        account_number: String,
        #[arg(long, default_value = "")]
        bank: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        gateway: Option<PaymentGateway>,
    },

    /// Start a checkout deposit
    Deposit {
        amount: String,
        #[arg(long)]
        return_url: String,
    },

    /// List the banks offered by the backend
    Banks,

    /// Refresh and print the balance
    Balance,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let mut config = Config::from_file(&cli.config)?;
    if let Some(url) = cli.backend_url {
        config.backend_url = url;
    }

    let frontend = config.frontend_config()?;

    info!("Loaded config:");
    info!("  Backend: {}", config.backend_url);
    info!("  Profile: {:?}", frontend.profile);
    info!("  Wire format: {:?}", frontend.wire_format);

    if let Command::Fees { amount, method } = &cli.command {
        let [amount, fee, net] = preview_from_input(amount, *method, &frontend.fee_table).labels();
        println!("Amount:      {amount}");
        println!("Fee:         {fee}");
        println!("You receive: {net}");
        return Ok(());
    }

    let mut controller = build_controller(&config.backend_url, frontend, TerminalRenderer::stdout())?;

    match cli.command {
        Command::Fees { .. } => {}
        Command::Withdraw {
            amount,
            method,
            account_name,
            account_number,
            bank,
            phone,
            gateway,
        } => {
            info!("Running: withdraw");

            controller.select_method(method);
            if let Some(gateway) = gateway {
                controller.select_gateway(gateway);
            }
            controller.set_field(FormField::Amount, amount);
            controller.set_field(FormField::AccountName, account_name);
            controller.set_field(FormField::AccountNumber, account_number);
            controller.set_field(FormField::BankIdentifier, bank);
            controller.set_field(FormField::PhoneNumber, phone);

            let receipt = controller.submit_withdrawal().await?;
            info!(transaction_id = ?receipt.transaction_id, "Step completed: withdraw");
        }
        Command::Deposit { amount, return_url } => {
            info!("Running: deposit");

            controller.set_field(FormField::Amount, amount);
            controller.set_field(FormField::ReturnUrl, return_url);

            let receipt = controller.submit_deposit().await?;
            info!(url = ?receipt.redirect_url, "Step completed: deposit");
        }
        Command::Banks => {
            info!("Running: banks");

            controller.load_banks().await?;
            for bank in &controller.state().banks {
                println!("{}\t{}", bank.code, bank.name);
            }
        }
        Command::Balance => {
            info!("Running: balance");

            match controller.refresh_balance().await? {
                Some(amount) => info!(%amount, "Step completed: balance"),
                None => info!("No balance tracked in this profile"),
            }
        }
    }

    Ok(())
}
