use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Track AI coding session costs against a monthly budget.
#[derive(Debug, Parser)]
#[command(name = "session-costs", author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the session database.
    #[arg(long, global = true, value_name = "DIR", env = "SESSION_COSTS_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the JSON API on 127.0.0.1 (default).
    Serve(ServeArgs),
    /// Log one session.
    Add(AddArgs),
    /// Print the dashboard as text.
    Summary,
    /// Set the monthly budget in USD.
    Budget {
        #[arg(value_name = "USD")]
        value: f64,
    },
}

#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Override the configured port for this run only.
    #[arg(long)]
    pub port: Option<u16>,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub model: String,
    /// Cost in USD; text such as `0.25usd` is read up to the first non-number.
    #[arg(long)]
    pub cost: String,
    /// Day the session belongs to (YYYY-MM-DD, default today).
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub tokens_in: Option<String>,
    #[arg(long)]
    pub tokens_out: Option<String>,
    #[arg(long)]
    pub label: Option<String>,
    #[arg(long)]
    pub session_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_with_global_data_dir() {
        let cli = Cli::try_parse_from([
            "session-costs",
            "add",
            "--model",
            "opus",
            "--cost",
            "1.5",
            "--tokens-in",
            "1200",
            "--data-dir",
            "/tmp/costs",
        ])
        .expect("parse");
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/costs")));
        match cli.command {
            Some(Command::Add(args)) => {
                assert_eq!(args.model, "opus");
                assert_eq!(args.cost, "1.5");
                assert_eq!(args.tokens_in.as_deref(), Some("1200"));
                assert_eq!(args.date, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn serve_is_optional() {
        let cli = Cli::try_parse_from(["session-costs"]).expect("parse");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["session-costs", "serve", "--port", "4000"]).expect("parse");
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.port, Some(4000)),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn budget_requires_number() {
        assert!(Cli::try_parse_from(["session-costs", "budget", "lots"]).is_err());
        let cli = Cli::try_parse_from(["session-costs", "budget", "250"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Budget { value }) if value == 250.0));
    }
}
