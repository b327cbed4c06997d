use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use mimalloc::MiMalloc;
use notesdash::config::ClientConfig;
use notesdash::middleware::auth::{RouteOutcome, RouteProtector};
use notesdash::services::api::DashboardApi;
use notesdash::services::auth::TokenGuard;
use notesdash::services::dashboard::{DashboardAggregator, DashboardController};
use notesdash::session::{FileSessionStore, SessionStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// M-MIMALLOC-APP: Use mimalloc as global allocator for improved performance.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Print the admin dashboard of the notes service as JSON.
#[derive(Debug, Parser)]
#[command(name = "notesdash", version)]
struct Cli {
    /// Days shown in the notes-per-day series (7, 30 or 90 in the UI)
    #[arg(long, env = "DASHBOARD_DAY_RANGE")]
    days: Option<u32>,

    /// Filter users by username or email
    #[arg(long, default_value = "")]
    query: String,

    /// Zero-based page of the users table
    #[arg(long, default_value_t = 0)]
    page: usize,

    /// Rows per page of the users table
    #[arg(long, default_value_t = notesdash::models::pagination::DEFAULT_PAGE_SIZE)]
    page_size: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "notesdash=debug".into()))
        .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();
    let day_range = cli.days.unwrap_or(config.day_range);

    let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(&config.session_file));
    let protector = RouteProtector::new(TokenGuard::new(session.clone()), config.login_path.as_str());

    tracing::info!(api = %config.api_base_url, day_range, "Opening dashboard");

    let api = DashboardApi::new(&config.api_base_url, session);
    let mut controller = match protector.render(|| {
        DashboardController::new(DashboardAggregator::new(api), day_range)
    }) {
        RouteOutcome::Render(controller) => controller,
        RouteOutcome::Redirect { to } => {
            println!("{to}");
            return Ok(ExitCode::from(2));
        }
    };

    controller.refresh().await?;
    controller.set_page_size(cli.page_size);
    controller.set_query(cli.query);
    let view = controller.set_page(cli.page);

    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(ExitCode::SUCCESS)
}
