//! Named admin sessions with their tokens sealed at rest

use crate::encryption::TokenCipher;
use crate::sqlite::{self, Database};
use rewards_admin_core::{Error, Result, Session};
use std::path::Path;
use tracing::{debug, info};

/// File name of the session database inside the data directory
pub const DATABASE_FILE: &str = "sessions.db";

/// A session together with its decrypted token
#[derive(Clone)]
pub struct ActiveSession {
    pub session: Session,
    pub token: String,
}

impl std::fmt::Debug for ActiveSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveSession")
            .field("session", &self.session)
            .field("token", &"<redacted>")
            .finish()
    }
}

pub struct SessionVault {
    db: Database,
    cipher: TokenCipher,
}

impl SessionVault {
    pub fn new(db: Database, cipher: TokenCipher) -> Self {
        Self { db, cipher }
    }

    /// Open `<data_dir>/sessions.db` with the machine-bound key
    pub async fn open(data_dir: &Path) -> Result<Self> {
        let db = Database::connect(&data_dir.join(DATABASE_FILE)).await?;
        Ok(Self::new(db, TokenCipher::for_this_machine()?))
    }

    /// Save a session, replacing the token of an existing one with the same name.
    ///
    /// The first session saved becomes active.
    pub async fn save(&self, name: &str, base_url: &str, token: &str) -> Result<Session> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Session name cannot be empty".into()));
        }
        let pool = self.db.pool();
        let sealed = self.cipher.seal(token)?;

        let id = match sqlite::get_session_by_name(pool, name).await? {
            Some(existing) => {
                sqlite::update_session(pool, existing.id, base_url, &sealed).await?;
                info!("Updated session '{}'", name);
                existing.id
            }
            None => {
                let id = sqlite::create_session(pool, name, base_url, &sealed).await?;
                info!("Added session '{}'", name);
                id
            }
        };

        if sqlite::get_active_session(pool).await?.is_none() {
            sqlite::set_active_session(pool, id).await?;
        }

        self.get(name).await
    }

    pub async fn list(&self) -> Result<Vec<Session>> {
        sqlite::list_sessions(self.db.pool()).await
    }

    pub async fn get(&self, name: &str) -> Result<Session> {
        sqlite::get_session_by_name(self.db.pool(), name)
            .await?
            .ok_or_else(|| Error::SessionNotFound(name.to_string()))
    }

    /// Make the named session the active one
    pub async fn activate(&self, name: &str) -> Result<Session> {
        let session = self.get(name).await?;
        sqlite::set_active_session(self.db.pool(), session.id).await?;
        info!("Switched to session '{}'", name);
        self.get(name).await
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        let session = self.get(name).await?;
        sqlite::delete_session(self.db.pool(), session.id).await?;
        info!("Removed session '{}'", name);
        Ok(())
    }

    /// The named session (or the active one) with its token decrypted
    pub async fn unlock(&self, name: Option<&str>) -> Result<ActiveSession> {
        let pool = self.db.pool();
        let session = match name {
            Some(name) => self.get(name).await?,
            None => sqlite::get_active_session(pool)
                .await?
                .ok_or(Error::NoActiveSession)?,
        };

        let sealed = sqlite::get_session_token(pool, session.id).await?;
        let token = self.cipher.open(&sealed)?;
        sqlite::touch_last_used(pool, session.id).await?;
        debug!("Unlocked session '{}'", session.name);

        Ok(ActiveSession { session, token })
    }
}
