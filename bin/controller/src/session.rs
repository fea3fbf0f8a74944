//! Line commands of the interactive session.

use crate::{controller::FormController, form::FormField, view::Renderer};
use client::Backend;
use std::{str::FromStr, time::Duration};
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt},
    time::{self, Instant, Interval, MissedTickBehavior},
};
use tracing::debug;
use withdrawal::{PaymentGateway, WithdrawalMethod};

pub const HELP: &str = "\
Commands:
  method <bank|mpesa>          switch withdrawal method
  gateway <primary|alternate>  switch payment gateway
  amount <value>               set the amount
  name|account|bank|phone|url <value>
                               fill in a form field
  submit                       withdraw
  deposit                      start a checkout deposit
  balance                      refresh the balance
  banks                        load the bank list
  dismiss                      hide the notification
  help                         show this text
  quit                         leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Method(WithdrawalMethod),
    Gateway(PaymentGateway),
    Set(FormField, String),
    Submit,
    Deposit,
    Balance,
    Banks,
    Dismiss,
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim()));

        match word {
            "method" => rest.parse().map(Self::Method),
            "gateway" => rest.parse().map(Self::Gateway),
            "submit" | "withdraw" => Ok(Self::Submit),
            "deposit" => Ok(Self::Deposit),
            "balance" => Ok(Self::Balance),
            "banks" => Ok(Self::Banks),
            "dismiss" => Ok(Self::Dismiss),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            "" => Err("empty command".to_string()),
            field => {
                let field: FormField = field.parse()?;
                Ok(Self::Set(field, rest.to_string()))
            }
        }
    }
}

/// Whether the session should keep reading commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Apply one command to the controller.
///
/// Failures are already shown as notifications, so they only get logged here.
pub async fn apply<B, R>(controller: &mut FormController<B, R>, command: Command) -> Flow
where
    B: Backend,
    R: Renderer,
{
    match command {
        Command::Method(method) => controller.select_method(method),
        Command::Gateway(gateway) => controller.select_gateway(gateway),
        Command::Set(field, value) => controller.set_field(field, value),
        Command::Submit => {
            if let Err(e) = controller.submit_withdrawal().await {
                debug!(error = %e, "Withdrawal not completed");
            }
        }
        Command::Deposit => {
            if let Err(e) = controller.submit_deposit().await {
                debug!(error = %e, "Deposit not completed");
            }
        }
        Command::Balance => {
            if let Err(e) = controller.refresh_balance().await {
                debug!(error = %e, "Balance not refreshed");
            }
        }
        Command::Banks => {
            if let Err(e) = controller.load_banks().await {
                debug!(error = %e, "Banks not loaded");
            }
        }
        Command::Dismiss => controller.dismiss_notification(),
        Command::Help => println!("{HELP}"),
        Command::Quit => return Flow::Quit,
    }

    Flow::Continue
}

/// How often the session wakes up to expire notifications.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

fn ticker() -> Interval {
    let mut ticker = time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Read commands line by line until `quit` or end of input.
///
/// Notifications keep expiring while the input is idle.
pub async fn run<B, R, I>(controller: &mut FormController<B, R>, input: I) -> std::io::Result<()>
where
    B: Backend,
    R: Renderer,
    I: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    let mut ticker = ticker();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = ticker.tick() => {
                controller.tick(Instant::now().into_std());
                continue;
            }
        };

        let Some(line) = line else {
            return Ok(());
        };

        controller.tick(Instant::now().into_std());

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{e} (type `help`)");
                continue;
            }
        };

        if apply(controller, command).await == Flow::Quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "method mpesa".parse::<Command>(),
            Ok(Command::Method(WithdrawalMethod::MobileMoney))
        );
        assert_eq!(
            "amount 5,000".parse::<Command>(),
            Ok(Command::Set(FormField::Amount, "5,000".to_string()))
        );
        assert_eq!(
            "name   Jane Wanjiku ".parse::<Command>(),
            Ok(Command::Set(FormField::AccountName, "Jane Wanjiku".to_string()))
        );
        assert_eq!("submit".parse::<Command>(), Ok(Command::Submit));
        assert_eq!(" quit ".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!("".parse::<Command>().is_err());
        assert!("method cheque".parse::<Command>().is_err());
        assert!("launch".parse::<Command>().is_err());
    }

    #[test]
    fn test_field_without_value_clears_it() {
        assert_eq!(
            "phone".parse::<Command>(),
            Ok(Command::Set(FormField::PhoneNumber, String::new()))
        );
    }
}
