//! Shared in-memory wiring for the auth integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use apptwice_auth::client::MemoryClientStore;
use apptwice_auth::session::MemorySessionStore;
use apptwice_auth::{
    AuthGateway, CacheRevocationList, ClientAuthenticator, IssuedClient, RevocationList,
    SessionManager, SessionStore, TokenGenerator,
};
use apptwice_cache::CacheManager;
use apptwice_cache::memory::MemoryCacheProvider;
use apptwice_core::config::auth::AuthConfig;
use apptwice_core::config::cache::MemoryCacheConfig;
use apptwice_core::config::session::SessionConfig;
use apptwice_entity::identity::RequestOrigin;
use apptwice_entity::session::{NewSession, Session};

pub struct Harness {
    pub store: Arc<MemorySessionStore>,
    pub revocations: Arc<CacheRevocationList>,
    pub tokens: Arc<TokenGenerator>,
    pub manager: Arc<SessionManager>,
    pub gateway: AuthGateway,
}

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        ..AuthConfig::default()
    }
}

pub fn harness() -> Harness {
    harness_with(SessionConfig::default())
}

pub fn harness_with(config: SessionConfig) -> Harness {
    let store = Arc::new(MemorySessionStore::new());
    let provider = MemoryCacheProvider::new(&MemoryCacheConfig { max_capacity: 10_000 });
    let cache = Arc::new(CacheManager::from_provider(Arc::new(provider)));
    let revocations = Arc::new(CacheRevocationList::new(cache));
    let tokens = Arc::new(TokenGenerator::new(&auth_config()).expect("signing key"));

    let manager = Arc::new(SessionManager::new(
        store.clone() as Arc<dyn SessionStore>,
        revocations.clone() as Arc<dyn RevocationList>,
        tokens.clone(),
        config.clone(),
    ));
    let clients = Arc::new(ClientAuthenticator::new(
        Arc::new(MemoryClientStore::new()),
        config.operation_timeout(),
    ));
    let gateway = AuthGateway::new(clients, manager.clone(), tokens.clone());

    Harness {
        store,
        revocations,
        tokens,
        manager,
        gateway,
    }
}

pub fn origin() -> RequestOrigin {
    RequestOrigin::new("integration-test/1.0", "192.0.2.10")
}

impl Harness {
    /// Insert a session row directly, bypassing quota.
    pub async fn seed_session(&self, user_id: i64, expires_in: TimeDelta) -> Session {
        self.store
            .create(NewSession {
                user_id,
                refresh_token: self.tokens.new_refresh_token(),
                user_agent: "seed".into(),
                ip: "198.51.100.1".into(),
                expires_in: Utc::now() + expires_in,
            })
            .await
            .expect("seed session")
    }

    pub async fn register(&self) -> IssuedClient {
        self.gateway
            .register_client("Integration Co")
            .await
            .expect("register client")
    }
}

pub const MINUTE: Duration = Duration::from_secs(60);
