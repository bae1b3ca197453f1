//! SkillX entry-point: loads settings, prepares storage and serves the REST API.

mod server;

use std::ffi::OsString;

use actix_web::web;
use color_eyre::eyre::{Context, Result};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, build_http_state, create_server};
#[cfg(feature = "example-data")]
use skillx::example_data::{ExampleDataSettings, seed_example_data_on_startup};
use skillx::inbound::http::health::HealthState;
#[cfg(feature = "example-data")]
use skillx::inbound::http::state::HttpState;
use skillx::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args: Vec<OsString> = std::env::args_os().collect();
    let settings =
        AppSettings::load_from_iter(args.clone()).wrap_err("failed to load SKILLX settings")?;
    let config = build_server_config(&settings).await?;

    let http_state = build_http_state(&config);
    #[cfg(feature = "example-data")]
    seed_example_data(&args, &http_state).await;

    let health_state = web::Data::new(HealthState::new());
    info!(bind_addr = %config.bind_addr(), "starting server");
    let server = create_server(health_state, http_state, config)?;
    server.await?;
    Ok(())
}

async fn build_server_config(settings: &AppSettings) -> Result<ServerConfig> {
    let config = ServerConfig::new(settings.bind_addr()?)
        .with_transition_policy(settings.transition_policy()?)
        .with_stats_outbox_capacity(settings.stats_outbox_capacity());

    let config = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("failed to build database pool")?;
            config.with_db_pool(pool)
        }
        None => {
            warn!("SKILLX_DATABASE_URL not set; data lives in memory only");
            config
        }
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::marketplace_metrics()?));

    Ok(config)
}

/// Seeding failures are logged; the server still starts.
#[cfg(feature = "example-data")]
async fn seed_example_data(args: &[OsString], state: &web::Data<HttpState>) {
    let settings = match ExampleDataSettings::load_from_iter(server::program_only(args)) {
        Ok(settings) => settings,
        Err(error) => {
            warn!(%error, "example data settings could not be loaded");
            return;
        }
    };
    let outcome = seed_example_data_on_startup(
        &settings,
        state.skill_exchanges.as_ref(),
        state.skill_exchanges_query.as_ref(),
    )
    .await;
    if let Err(error) = outcome {
        warn!(%error, "example data seeding failed");
    }
}

