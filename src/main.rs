//! MentorHub server binary.
//!
//! Loads configuration, connects to Postgres, wires adapters into the
//! per-module routers, and serves the JSON API.

use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mentorhub::adapters::email::{EmailConfig, HttpEmailNotifier};
use mentorhub::adapters::http::billing::{billing_routes, BillingAppState};
use mentorhub::adapters::http::invoice::{invoice_routes, InvoiceAppState};
use mentorhub::adapters::http::verification::{verification_routes, VerificationAppState};
use mentorhub::adapters::postgres::{
    PostgresAccountStore, PostgresCreditLedger, PostgresInvoiceStore, PostgresVerificationStore,
};
use mentorhub::adapters::storage::FsBlobStore;
use mentorhub::adapters::stripe::{StripeConfig, StripeGateway};
use mentorhub::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    info!(
        environment = ?config.server.environment,
        "Starting MentorHub server"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;
    info!("Database pool established");

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("Migrations applied");
    }

    let account_store = Arc::new(PostgresAccountStore::new(pool.clone()));
    let invoice_store = Arc::new(PostgresInvoiceStore::new(pool.clone()));
    let verification_store = Arc::new(PostgresVerificationStore::new(pool.clone()));
    let ledger = Arc::new(PostgresCreditLedger::new(pool.clone()));

    let gateway = Arc::new(StripeGateway::new(StripeConfig::new(
        config.payment.stripe_api_key.clone(),
        config.payment.stripe_webhook_secret.clone(),
        config.payment.stripe_starter_price_id.clone(),
        config.payment.stripe_standard_price_id.clone(),
        config.payment.stripe_pro_price_id.clone(),
    )));

    let notifier = Arc::new(HttpEmailNotifier::new(EmailConfig::new(
        config.email.resend_api_key.clone(),
        config.email.from_header(),
    )));

    let blob_store = Arc::new(FsBlobStore::new(
        &config.storage.base_dir,
        config.storage.public_base_url.clone(),
    ));

    let invoice_state = InvoiceAppState {
        invoice_store: invoice_store.clone(),
        account_store: account_store.clone(),
    };
    let verification_state = VerificationAppState {
        verification_store,
        account_store: account_store.clone(),
        blob_store,
        notifier,
    };
    let billing_state = BillingAppState {
        gateway,
        account_store,
        ledger,
    };

    let cors = build_cors(&config);

    let app = Router::new()
        .nest("/api/invoices", invoice_routes().with_state(invoice_state))
        .nest(
            "/api/verifications",
            verification_routes().with_state(verification_state),
        )
        .nest("/api/billing", billing_routes().with_state(billing_state))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors);

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_cors(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
