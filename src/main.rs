use actix_files as fs;
use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gatehouse::{
  adapters::http::{
    RequestIdMiddleware, TemplateEngine, WebRouteDependencies, configure_web_routes,
  },
  application::auth::{CurrentSessionUseCase, LogInUseCase, LogOutUseCase, SignUpUseCase},
  domain::auth::services::AuthService,
  infrastructure::{
    config::Config, persistence::postgres::PostgresUserRepository,
    security::Argon2PasswordHasher, session::InMemorySessionStore,
  },
};

/// Interval between background sweeps of expired sessions
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(600);

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "gatehouse=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting Gatehouse application");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize stores
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_store = Arc::new(InMemorySessionStore::new(config.session_ttl()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));

  // Initialize domain service
  let auth_service = Arc::new(AuthService::new(
    user_repo,
    session_store.clone(),
    password_hasher,
  ));

  // Initialize use cases
  let sign_up_use_case = Arc::new(SignUpUseCase::new(auth_service.clone()));
  let log_in_use_case = Arc::new(LogInUseCase::new(auth_service.clone()));
  let log_out_use_case = Arc::new(LogOutUseCase::new(auth_service.clone()));
  let current_session_use_case = Arc::new(CurrentSessionUseCase::new(auth_service.clone()));

  // Expired sessions already read as absent; the sweep reclaims their memory
  tokio::spawn({
    let session_store = session_store.clone();
    async move {
      let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
      loop {
        interval.tick().await;
        let purged = session_store.purge_expired().await;
        if purged > 0 {
          tracing::debug!("Purged {} expired sessions", purged);
        }
      }
    }
  });

  // Initialize template engine
  let templates = TemplateEngine::new().expect("Failed to initialize template engine");
  tracing::info!("Template engine initialized");

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Configure web UI routes
      .configure(|cfg| {
        configure_web_routes(
          cfg,
          WebRouteDependencies {
            templates: templates.clone(),
            auth_service: auth_service.clone(),
            sign_up_use_case: sign_up_use_case.clone(),
            log_in_use_case: log_in_use_case.clone(),
            log_out_use_case: log_out_use_case.clone(),
            current_session_use_case: current_session_use_case.clone(),
          },
        )
      })
      // Static files
      .service(fs::Files::new("/static", "./static"))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
