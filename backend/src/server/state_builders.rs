//! Adapter selection and account service wiring.
//!
//! A configured database selects the Diesel repository, with migrations
//! applied before the pool is built. Without one the in-memory repository is
//! used and a warning is logged.

use std::sync::Arc;

use actix_web::web;
use thiserror::Error;
use tracing::{info, warn};

use accounts_backend::AppSettings;
use accounts_backend::domain::AccountService;
use accounts_backend::domain::ports::{
    PasswordHashError, PasswordHasher, TokenError, TokenService, UserRepository,
};
use accounts_backend::inbound::http::state::HttpState;
use accounts_backend::outbound::memory::InMemoryUserRepository;
use accounts_backend::outbound::persistence::{
    DbPool, DieselUserRepository, MigrationError, PoolConfig, PoolError, run_pending_migrations,
};
use accounts_backend::outbound::security::{BcryptPasswordHasher, JwtTokenService};
use accounts_backend::settings::SettingsError;

/// Reasons the server cannot start.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("token service rejected configuration: {0}")]
    Token(#[from] TokenError),
    #[error("password hasher rejected configuration: {0}")]
    Hasher(#[from] PasswordHashError),
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error("failed to build database pool: {0}")]
    Pool(#[from] PoolError),
}

/// Services shared by every worker.
#[derive(Clone)]
pub struct AppServices {
    pub http_state: web::Data<HttpState>,
    pub tokens: Arc<dyn TokenService>,
}

/// Wire one [`AccountService`] behind all three driving ports.
pub fn wire_services(
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
) -> AppServices {
    let accounts = Arc::new(AccountService::new(users, hasher, Arc::clone(&tokens)));
    let http_state = web::Data::new(HttpState::new(
        accounts.clone(),
        accounts.clone(),
        accounts,
    ));
    AppServices { http_state, tokens }
}

/// Build every adapter from `settings`.
///
/// # Errors
/// Fails when the secret is missing, the bcrypt cost is out of range, or the
/// database cannot be migrated or connected.
pub async fn build_services(settings: &AppSettings) -> Result<AppServices, StartupError> {
    let secret = settings.secret()?;
    let tokens: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::new(secret.as_bytes(), settings.token_ttl())?);
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(BcryptPasswordHasher::new(settings.bcrypt_cost())?);
    let users = build_user_repository(settings).await?;
    Ok(wire_services(users, hasher, tokens))
}

async fn build_user_repository(
    settings: &AppSettings,
) -> Result<Arc<dyn UserRepository>, StartupError> {
    let Some(database_url) = settings.database_url()? else {
        warn!("no database configured; accounts are held in memory and lost on restart");
        return Ok(Arc::new(InMemoryUserRepository::new()));
    };

    run_pending_migrations(&database_url).await?;
    let pool_config = PoolConfig::new(database_url)
        .with_max_size(settings.db_pool_size())
        .with_connection_timeout(settings.db_connect_timeout());
    let pool = DbPool::new(pool_config).await?;
    info!("using PostgreSQL user repository");
    Ok(Arc::new(DieselUserRepository::new(pool)))
}
