mod args;
mod config;
mod dirs;
mod render;

use std::io;
use std::net::SocketAddr;

use app_api::AppContext;
use clap::Parser;
use costs_app::{AppConfig, AppPaths, AppState, DashboardState, ensure_app_data_dir};
use costs_core::{NumericInput, SessionInput, parse_date};
use http_api::HttpState;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use args::{AddArgs, Cli, Command, ServeArgs};
use config::CliConfig;

const DEFAULT_LOG_FILTER: &str = "session_costs_cli=info,costs_app=info,http_api=info";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let config = config::load_or_create().map_err(io::Error::other)?;
    if config.created {
        info!(path = %config.file.display(), "created default config");
    }

    let data_dir = dirs::resolve_data_dir(
        cli.data_dir.as_deref(),
        config.config.data_dir.as_deref(),
    )
    .map_err(io::Error::other)?;
    let paths = AppPaths::new(data_dir);
    ensure_app_data_dir(&paths).map_err(|err| io::Error::other(err.to_string()))?;

    let app_state = AppState::new(AppConfig {
        db_path: paths.db_path.clone(),
        dashboard: config.config.dashboard.clone(),
    });
    if app_state.is_fresh_db() {
        info!(path = %paths.db_path.display(), "creating session database");
    }
    app_state
        .setup_db()
        .map_err(|err| io::Error::other(format!("failed to initialize database: {}", err)))?;

    let context = AppContext {
        app_state,
        app_data_dir: paths.app_data_dir,
    };

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(context, &config.config, args).await,
        Command::Add(args) => add(&context, args).await,
        Command::Summary => summary(&context).await,
        Command::Budget { value } => budget(&context, value),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .try_init();
}

async fn serve(
    context: AppContext,
    config: &CliConfig,
    args: ServeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let port = args.port.unwrap_or(config.port);
    let state = HttpState::new(context, config.api_token.clone());
    let router = http_api::router(state);

    let (listener, actual_port, used_fallback) = bind_port(port).await?;
    if used_fallback {
        warn!(configured = port, actual = actual_port, "configured port unavailable");
    }
    info!(url = %format!("http://127.0.0.1:{actual_port}"), "session costs API listening");
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn add(context: &AppContext, args: AddArgs) -> Result<(), Box<dyn std::error::Error>> {
    let date = match args.date.as_deref() {
        Some(value) => parse_date(value).map_err(|err| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid date {value}: {err}"),
            )
        })?,
        None => context.app_state.services.analytics.today(),
    };
    let model = args.model.trim();
    if model.is_empty() {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "model is required").into());
    }
    let input = SessionInput {
        date,
        model: model.to_string(),
        tokens_in: args.tokens_in.map(NumericInput::Text),
        tokens_out: args.tokens_out.map(NumericInput::Text),
        cost_usd: Some(NumericInput::Text(args.cost)),
        label: args.label,
        session_id: args.session_id,
    };
    let (session, state) = context
        .app_state
        .services
        .dashboard
        .add_session(input)
        .await?;
    println!(
        "Added {} session on {} for ${:.2} ({} tokens).",
        session.model,
        session.date,
        session.cost_usd,
        session.total_tokens()
    );
    if let DashboardState::Ready { data } = state {
        println!(
            "Today ${:.2}, this month ${:.2} of ${:.2}.",
            data.today_cost, data.monthly_total, data.budget
        );
    }
    Ok(())
}

async fn summary(context: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let dashboard = &context.app_state.services.dashboard;
    match dashboard.reload().await {
        DashboardState::Ready { data } => {
            let today = context.app_state.services.analytics.today();
            print!("{}", render::render_dashboard(&data, today));
            Ok(())
        }
        DashboardState::Failed { message } => Err(io::Error::other(message).into()),
        DashboardState::Loading => {
            Err(io::Error::other("dashboard did not finish loading").into())
        }
    }
}

fn budget(context: &AppContext, value: f64) -> Result<(), Box<dyn std::error::Error>> {
    let settings = context.app_state.services.settings.update_budget(value)?;
    println!("Monthly budget set to ${:.2}.", settings.monthly_budget);
    Ok(())
}

async fn bind_port(port: u16) -> Result<(tokio::net::TcpListener, u16, bool), io::Error> {
    if port == 0 {
        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let actual_port = listener.local_addr()?.port();
        return Ok((listener, actual_port, false));
    }

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => Ok((listener, port, false)),
        Err(_) => {
            let listener =
                tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
            let actual_port = listener.local_addr()?.port();
            Ok((listener, actual_port, true))
        }
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
