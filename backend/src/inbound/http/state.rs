//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegistrationService, UserProfileQuery};

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use accounts_backend::domain::AccountService;
/// use accounts_backend::inbound::http::state::HttpState;
/// use accounts_backend::outbound::memory::InMemoryUserRepository;
/// use accounts_backend::outbound::security::{BcryptPasswordHasher, JwtTokenService};
///
/// let service = Arc::new(AccountService::new(
///     Arc::new(InMemoryUserRepository::new()),
///     Arc::new(BcryptPasswordHasher::default()),
///     Arc::new(JwtTokenService::new(b"secret", None).expect("secret is non-empty")),
/// ));
/// let state = HttpState::new(service.clone(), service.clone(), service);
/// let _login = state.login.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub profile: Arc<dyn UserProfileQuery>,
}

impl HttpState {
    /// Bundle the driving ports.
    pub fn new(
        registration: Arc<dyn RegistrationService>,
        login: Arc<dyn LoginService>,
        profile: Arc<dyn UserProfileQuery>,
    ) -> Self {
        Self {
            registration,
            login,
            profile,
        }
    }
}
