//! # Account Service
//!
//! Registration and login for both account roles.
//!
//! Registration checks the username in the target role, hashes the password,
//! writes the account atomically, and returns a signed token. A username that
//! is taken, whether found by the pre-check or by the UNIQUE constraint when
//! two registrations race, is a `Conflict`.
//!
//! Login answers an unknown username and a wrong password with the same
//! `Unauthorized` error.

use std::sync::Arc;

use lib_auth::{encode_jwt_at, hash_password, verify_password};
use lib_core::model::store::AccountRepository;
use lib_core::model::{Account, AccountForCreate, LoginCredentials, NewAccount, Role};
use lib_core::{AppError, Clock, Config, DbPool, IdGenerator, Result};
use tracing::{debug, info, instrument, warn};

#[derive(Clone)]
pub struct AccountService {
    db: DbPool,
    config: Config,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl AccountService {
    pub fn new(db: DbPool, config: Config, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            db,
            config,
            clock,
            ids,
        }
    }

    /// Register a new account under `role` and return its token.
    #[instrument(skip(self, account), fields(username = %account.username))]
    pub async fn register(&self, role: Role, account: NewAccount) -> Result<String> {
        if AccountRepository::username_taken(&self.db, role, &account.username).await? {
            warn!("[REGISTER] Username already taken: {}", account.username);
            return Err(username_conflict());
        }

        let id = self.ids.new_id();
        let password_hash = self.hash(account.password).await?;

        let new = AccountForCreate {
            id,
            username: account.username,
            email: account.email,
            password_hash,
            created_at: self.clock.now(),
        };

        let created = AccountRepository::create(&self.db, role, &new)
            .await
            .map_err(|e| match AppError::from(e) {
                AppError::Conflict(_) => {
                    warn!("[REGISTER] Lost username race: {}", new.username);
                    username_conflict()
                }
                other => other,
            })?;

        info!("[REGISTER] Created {} account {}", role, created.id);
        self.issue_token(&created)
    }

    /// Check credentials against the `role` namespace and return a token.
    #[instrument(skip(self, credentials), fields(username = %credentials.username))]
    pub async fn login(&self, role: Role, credentials: LoginCredentials) -> Result<String> {
        let Some(account) =
            AccountRepository::find_by_username(&self.db, role, &credentials.username).await?
        else {
            debug!("[LOGIN] Unknown username");
            return Err(invalid_credentials());
        };

        let hash = account.password_hash.clone();
        let password = credentials.password;
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::Internal(format!("Password verification task failed: {}", e)))??;

        if !matches {
            debug!("[LOGIN] Password mismatch");
            return Err(invalid_credentials());
        }

        info!("[LOGIN] {} {} logged in", role, account.id);
        self.issue_token(&account)
    }

    /// Argon2 is CPU-bound; keep it off the async workers.
    async fn hash(&self, password: String) -> Result<String> {
        let cost = self.config.hash_cost;
        let hash = tokio::task::spawn_blocking(move || hash_password(&password, cost))
            .await
            .map_err(|e| AppError::Internal(format!("Password hashing task failed: {}", e)))??;
        Ok(hash)
    }

    fn issue_token(&self, account: &Account) -> Result<String> {
        let token = encode_jwt_at(
            &account.token_subject(),
            &self.config.jwt_secret,
            self.config.jwt_expiration_hours,
            self.clock.now(),
        )?;
        Ok(token)
    }
}

fn username_conflict() -> AppError {
    AppError::Conflict("username already exists".to_string())
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("invalid username or password".to_string())
}
