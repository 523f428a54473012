//! Session identity
//!
//! Resolves the user id keying the favorites store: the host platform user
//! when known, otherwise a guest id generated once per device and persisted.

use chrono::Utc;
use pokoro_core::{GuestIdStore, HostIdentity, PokoroError, UserId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the resolved identity came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Host platform user
    Host,
    /// Guest id loaded from local storage
    StoredGuest,
    /// Guest id generated during this resolution
    NewGuest,
}

/// Resolved user identity for one app session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    user_id: UserId,
    source: IdentitySource,
}

impl SessionIdentity {
    /// Resolve the session identity
    ///
    /// Never fails: storage errors are logged and a fresh guest id is used.
    pub fn resolve(host: &dyn HostIdentity, guests: &dyn GuestIdStore) -> Self {
        Self::resolve_with_rng(host, guests, &mut rand::thread_rng())
    }

    /// Resolve using a caller-supplied random source for guest tokens
    pub fn resolve_with_rng<R: Rng + ?Sized>(
        host: &dyn HostIdentity,
        guests: &dyn GuestIdStore,
        rng: &mut R,
    ) -> Self {
        if let Some(platform_id) = host.platform_user_id() {
            let platform_id = platform_id.trim();
            if !platform_id.is_empty() {
                let user_id = UserId::host(platform_id);
                info!(user = %user_id, "Using host platform identity");
                return Self {
                    user_id,
                    source: IdentitySource::Host,
                };
            }
        }

        match guests.load() {
            Ok(Some(stored)) if !stored.trim().is_empty() => {
                let stored = stored.trim();
                let user_id = if stored.starts_with(UserId::GUEST_PREFIX) {
                    UserId::new(stored)
                } else {
                    UserId::guest(stored)
                };
                debug!(user = %user_id, "Reusing stored guest identity");
                return Self {
                    user_id,
                    source: IdentitySource::StoredGuest,
                };
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "Failed to read stored guest id, generating a new one"),
        }

        let user_id = UserId::guest(guest_token(rng));
        if let Err(e) = guests.save(user_id.as_str()) {
            warn!(user = %user_id, error = %e, "Failed to persist guest id");
        }
        info!(user = %user_id, "Generated guest identity");

        Self {
            user_id,
            source: IdentitySource::NewGuest,
        }
    }

    /// Resolved user id
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// How the identity was obtained
    pub fn source(&self) -> IdentitySource {
        self.source
    }
}

/// Lowercase hex of random bits followed by hex of the current Unix millis
fn guest_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let millis = Utc::now().timestamp_millis().max(0);
    format!("{:x}{:x}", rng.gen::<u64>(), millis)
}

/// On-disk guest id record
#[derive(Debug, Serialize, Deserialize)]
struct GuestRecord {
    guest_id: String,
}

/// Guest id persisted as a small JSON file
#[derive(Debug, Clone)]
pub struct FileGuestStore {
    path: PathBuf,
}

impl FileGuestStore {
    /// Store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl GuestIdStore for FileGuestStore {
    fn load(&self) -> pokoro_core::Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let record: GuestRecord = serde_json::from_str(&contents)?;
        Ok(Some(record.guest_id))
    }

    fn save(&self, guest_id: &str) -> pokoro_core::Result<()> {
        if guest_id.is_empty() {
            return Err(PokoroError::identity("Refusing to persist an empty guest id"));
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let record = GuestRecord {
            guest_id: guest_id.to_string(),
        };
        fs::write(&self.path, serde_json::to_string_pretty(&record)?)?;
        Ok(())
    }
}
