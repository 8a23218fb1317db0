//! Application builder: wires stores, cache, and config into `AppState`.

use std::sync::Arc;

use apptwice_auth::{
    AuthGateway, AuthResult, CacheRevocationList, ClientAuthenticator, ClientStore,
    SessionManager, SessionStore, TokenGenerator,
};
use apptwice_cache::CacheManager;
use apptwice_core::config::AppConfig;

use crate::state::AppState;

/// Build the shared state over the given persistence adapters.
///
/// Fails with `SigningKeyMissing` when `auth.jwt_secret` is empty, so the
/// process refuses to start instead of failing per request.
pub fn build_state(
    config: AppConfig,
    cache: Arc<CacheManager>,
    sessions: Arc<dyn SessionStore>,
    clients: Arc<dyn ClientStore>,
) -> AuthResult<AppState> {
    let tokens = Arc::new(TokenGenerator::new(&config.auth)?);
    let revocations = Arc::new(CacheRevocationList::new(Arc::clone(&cache)));

    let session_manager = Arc::new(SessionManager::new(
        sessions,
        revocations,
        Arc::clone(&tokens),
        config.session.clone(),
    ));
    let client_authenticator = Arc::new(ClientAuthenticator::new(
        clients,
        config.session.operation_timeout(),
    ));
    let gateway = Arc::new(AuthGateway::new(
        client_authenticator,
        session_manager,
        tokens,
    ));

    Ok(AppState::new(config, cache, gateway))
}
