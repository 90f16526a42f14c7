/*
 *  Copyright 2026 Colliery Software
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *  Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

//! Configuration for the marketplace core.
//!
//! # Construction
//!
//! Use [`MarketConfig::builder()`]:
//!
//! ```rust,ignore
//! let config = MarketConfig::builder()
//!     .database_url("taskhive.db")
//!     .session_secret("long-random-secret")
//!     .build();
//! ```
//!
//! Or load from the environment (reads `.env` via dotenvy):
//!
//! ```rust,ignore
//! let config = MarketConfig::from_env()?;
//! ```

use crate::error::MarketError;
use tracing::warn;

/// Configuration for [`crate::marketplace::Marketplace`].
#[derive(Clone)]
#[non_exhaustive]
pub struct MarketConfig {
    database_url: String,
    db_pool_size: u32,
    session_secret: Vec<u8>,
}

impl MarketConfig {
    /// Creates a new configuration builder with default values.
    pub fn builder() -> MarketConfigBuilder {
        MarketConfigBuilder::default()
    }

    /// Connection string or path of the SQLite store.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Requested connection pool size.
    pub fn db_pool_size(&self) -> u32 {
        self.db_pool_size
    }

    /// Secret used to sign session tokens.
    pub fn session_secret(&self) -> &[u8] {
        &self.session_secret
    }

    /// Loads configuration from the environment (and `.env` when present).
    ///
    /// * `DATABASE_URL` — store path, defaults to `taskhive.db`
    /// * `DB_POOL_SIZE` — pool size, defaults to 5
    /// * `SESSION_SECRET` — token signing secret; when absent a random one
    ///   is generated and existing sessions will not survive a restart
    pub fn from_env() -> Result<Self, MarketError> {
        dotenvy::dotenv().ok();

        let mut builder = MarketConfigBuilder::default();

        if let Ok(url) = std::env::var("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Ok(size) = std::env::var("DB_POOL_SIZE") {
            let size: u32 = size
                .parse()
                .map_err(|_| MarketError::InvalidInput(format!("DB_POOL_SIZE: {}", size)))?;
            builder = builder.db_pool_size(size);
        }
        match std::env::var("SESSION_SECRET") {
            Ok(secret) => builder = builder.session_secret(secret.into_bytes()),
            Err(_) => {
                warn!("SESSION_SECRET not set; generated a random secret, sessions will not survive a restart");
            }
        }

        Ok(builder.build())
    }
}

impl Default for MarketConfig {
    fn default() -> Self {
        MarketConfigBuilder::default().build()
    }
}

impl std::fmt::Debug for MarketConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketConfig")
            .field("database_url", &self.database_url)
            .field("db_pool_size", &self.db_pool_size)
            .field("session_secret", &"..")
            .finish()
    }
}

/// Builder for [`MarketConfig`].
pub struct MarketConfigBuilder {
    database_url: String,
    db_pool_size: u32,
    session_secret: Option<Vec<u8>>,
}

impl Default for MarketConfigBuilder {
    fn default() -> Self {
        Self {
            database_url: "taskhive.db".to_string(),
            db_pool_size: 5,
            session_secret: None,
        }
    }
}

impl MarketConfigBuilder {
    /// Sets the store path or connection string.
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = url.into();
        self
    }

    /// Sets the requested pool size.
    pub fn db_pool_size(mut self, size: u32) -> Self {
        self.db_pool_size = size;
        self
    }

    /// Sets the session token signing secret.
    pub fn session_secret(mut self, secret: impl Into<Vec<u8>>) -> Self {
        self.session_secret = Some(secret.into());
        self
    }

    /// Builds the configuration. When no session secret was supplied a
    /// random one is generated; sessions then do not survive a restart.
    pub fn build(self) -> MarketConfig {
        use rand::RngCore;

        let session_secret = self.session_secret.unwrap_or_else(|| {
            let mut secret = [0u8; 32];
            rand::thread_rng().fill_bytes(&mut secret);
            secret.to_vec()
        });

        MarketConfig {
            database_url: self.database_url,
            db_pool_size: self.db_pool_size,
            session_secret,
        }
    }
}
