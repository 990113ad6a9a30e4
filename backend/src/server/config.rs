//! HTTP server configuration object.

use std::net::SocketAddr;

use roteiro_backend::outbound::auth::TokenLifetimes;
use roteiro_backend::outbound::gemini::GeminiConfig;
use roteiro_backend::outbound::persistence::DbPool;
use zeroize::Zeroizing;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) jwt_secret: Zeroizing<Vec<u8>>,
    pub(crate) token_lifetimes: TokenLifetimes,
    pub(crate) gemini: GeminiConfig,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, jwt_secret: &[u8], gemini: GeminiConfig) -> Self {
        Self {
            bind_addr,
            jwt_secret: Zeroizing::new(jwt_secret.to_vec()),
            token_lifetimes: TokenLifetimes::default(),
            gemini,
            db_pool: None,
        }
    }

    #[must_use]
    pub fn with_token_lifetimes(mut self, lifetimes: TokenLifetimes) -> Self {
        self.token_lifetimes = lifetimes;
        self
    }

    /// Attach a database pool.
    ///
    /// Without one, debug builds answer from fixture spots and the fixture
    /// superuser login; release builds refuse to start.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
