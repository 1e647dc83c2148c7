use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use auth::JwtHandler;
use auth::PasswordHasher;
use auth::TokenService;
use pet_registry::authentication::ports::AuthServicePort;
use pet_registry::authentication::service::AuthService;
use pet_registry::config::Config;
use pet_registry::domain::pet::service::PetService;
use pet_registry::domain::user::models::Password;
use pet_registry::domain::user::models::Username;
use pet_registry::domain::user::service::UserService;
use pet_registry::inbound::http::router::create_router;
use pet_registry::outbound::repositories::PostgresPetRepository;
use pet_registry::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pet_registry=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "pet-registry",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_lifetime_secs = config.jwt.expiration_secs,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await
        .context("connecting to the database")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let password_hasher =
        PasswordHasher::with_cost(config.password.memory_kib, config.password.iterations)?;
    let tokens = TokenService::new(
        JwtHandler::from_base64_secret(&config.jwt.secret)?,
        chrono::Duration::seconds(config.jwt.expiration_secs),
    );
    let authenticator = Arc::new(Authenticator::new(password_hasher.clone(), tokens)?);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let pet_repository = Arc::new(PostgresPetRepository::new(pg_pool));

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&user_repository),
        Arc::clone(&authenticator),
    ));
    let user_service = Arc::new(UserService::new(user_repository, password_hasher));
    let pet_service = Arc::new(PetService::new(pet_repository));

    let admin_username = Username::new(config.admin.username.clone())
        .context("admin.username is not a valid username")?;
    let admin_password = Password::new(config.admin.password.clone())
        .context("admin.password is not a valid password")?;
    if auth_service
        .bootstrap_admin(admin_username, admin_password)
        .await?
    {
        tracing::info!(username = %config.admin.username, "Admin account created");
    }

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, user_service, pet_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
