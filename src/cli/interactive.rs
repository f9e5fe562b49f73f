//! Line driven converter session.
//!
//! Each line edits the converter state the way the form fields would, and
//! the conversion is shown again after every change.
use super::{convert, rates, ui};
use crate::core::{ConverterState, Currency, RateProvider};
use anyhow::{Context, Result, anyhow};
use std::io::Write;
use std::str::FromStr;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::debug;

const HELP: &str = "\
Commands:
  amount <value>   set the amount to convert
  from <code>      set the source currency (BRL, USD, EUR, GBP)
  to <code>        set the target currency
  swap             exchange source and target currencies
  refresh          fetch exchange rates again
  rates            show the rate table and chart
  show             show the current conversion
  help             show this message
  quit             leave the session";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Amount(String),
    From(Currency),
    To(Currency),
    Swap,
    Refresh,
    Rates,
    Show,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let (name, arg) = line
            .split_once(char::is_whitespace)
            .map(|(n, a)| (n, a.trim()))
            .unwrap_or((line, ""));

        match name.to_lowercase().as_str() {
            "amount" | "a" => Ok(SessionCommand::Amount(arg.to_string())),
            "from" => Ok(SessionCommand::From(arg.parse()?)),
            "to" => Ok(SessionCommand::To(arg.parse()?)),
            "swap" | "s" => Ok(SessionCommand::Swap),
            "refresh" | "r" => Ok(SessionCommand::Refresh),
            "rates" | "chart" => Ok(SessionCommand::Rates),
            "show" | "" => Ok(SessionCommand::Show),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" | "q" => Ok(SessionCommand::Quit),
            other => Err(anyhow!("Unknown command: {} (type 'help')", other)),
        }
    }
}

/// Runs the session until `quit` or end of input. Rates are fetched once on
/// start and again only on `refresh`.
pub async fn run_session<R, W>(
    state: &mut ConverterState,
    provider: &dyn RateProvider,
    input: R,
    out: &mut W,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    ui::refresh_with_spinner(state, provider).await;
    writeln!(out, "{}", convert::display_conversion(state))?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                writeln!(out, "{}", ui::style_text(&e.to_string(), ui::StyleType::Error))?;
                continue;
            }
        };
        debug!(?command, "Session command");

        match command {
            SessionCommand::Amount(amount) => state.set_amount(&amount),
            SessionCommand::From(currency) => state.set_from(currency),
            SessionCommand::To(currency) => state.set_to(currency),
            SessionCommand::Swap => state.swap(),
            SessionCommand::Refresh => ui::refresh_with_spinner(state, provider).await,
            SessionCommand::Rates => {
                writeln!(out, "{}", rates::display_rates(state))?;
                continue;
            }
            SessionCommand::Show => {}
            SessionCommand::Help => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            SessionCommand::Quit => break,
        }

        writeln!(out, "{}", convert::display_conversion(state))?;
    }

    Ok(())
}

pub async fn run(state: &mut ConverterState, provider: &dyn RateProvider) -> Result<()> {
    println!(
        "{}",
        ui::style_text("Currency converter (type 'help')", ui::StyleType::Title)
    );
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_session(state, provider, stdin, &mut stdout).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RateTable;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRateProvider {
        call_count: AtomicUsize,
    }

    #[async_trait]
    impl RateProvider for MockRateProvider {
        async fn fetch_rates(&self) -> Result<RateTable> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            RateTable::new([
                (Currency::USD, 5.0),
                (Currency::EUR, 6.0),
                (Currency::GBP, 7.0),
            ])
        }
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "amount 12.5".parse::<SessionCommand>().unwrap(),
            SessionCommand::Amount("12.5".to_string())
        );
        assert_eq!(
            "amount".parse::<SessionCommand>().unwrap(),
            SessionCommand::Amount(String::new())
        );
        assert_eq!(
            "FROM eur".parse::<SessionCommand>().unwrap(),
            SessionCommand::From(Currency::EUR)
        );
        assert_eq!(
            "to  gbp ".parse::<SessionCommand>().unwrap(),
            SessionCommand::To(Currency::GBP)
        );
        assert_eq!("swap".parse::<SessionCommand>().unwrap(), SessionCommand::Swap);
        assert_eq!("".parse::<SessionCommand>().unwrap(), SessionCommand::Show);
        assert_eq!("exit".parse::<SessionCommand>().unwrap(), SessionCommand::Quit);
    }

    #[test]
    fn test_parse_errors() {
        assert!("from JPY".parse::<SessionCommand>().is_err());
        assert!("to".parse::<SessionCommand>().is_err());
        let err = "convert 10".parse::<SessionCommand>().unwrap_err();
        assert!(err.to_string().contains("Unknown command: convert"));
    }

    #[tokio::test]
    async fn test_session_updates_conversion() {
        let provider = MockRateProvider {
            call_count: AtomicUsize::new(0),
        };
        let mut state = ConverterState::new("10", Currency::BRL, Currency::USD);
        let input: &[u8] = b"amount 100\nfrom usd\nto eur\nswap\nbogus\nrefresh\nquit\namount 5\n";
        let mut out = Vec::new();

        run_session(&mut state, &provider, input, &mut out)
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("10 BRL = "));
        assert!(output.contains("100 USD = "));
        assert!(output.contains("83.33"));
        assert!(output.contains("100 EUR = "));
        assert!(output.contains("120.00"));
        assert!(output.contains("Unknown command: bogus"));

        // Stopped at quit, so the trailing amount was never applied.
        assert_eq!(state.amount(), "100");
        assert_eq!(state.from(), Currency::EUR);
        assert_eq!(state.to(), Currency::USD);
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_session_ends_at_eof() {
        let provider = MockRateProvider {
            call_count: AtomicUsize::new(0),
        };
        let mut state = ConverterState::default();
        let input: &[u8] = b"rates\n";
        let mut out = Vec::new();

        run_session(&mut state, &provider, input, &mut out)
            .await
            .unwrap();

        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("R$ 7.00"));
        assert_eq!(provider.call_count.load(Ordering::SeqCst), 1);
    }
}
