//! Signed-in user context.
//!
//! A `Session` is created by login or registration, held by the sidecar's
//! `AppState`, and dropped on logout. When persistence is on it is also
//! written to the workspace so that reopening the workspace restores it.

use crate::permissions::Role;
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

const AVATAR_BASE: &str = "https://api.dicebear.com/7.x/initials/svg?seed=";
const MAX_NAME_LEN: usize = 120;
const MAX_EMAIL_LEN: usize = 254;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(with = "role_str")]
    pub role: Role,
    pub avatar: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub user: UserProfile,
    pub started_at: String,
}

impl Session {
    pub fn start(user: UserProfile) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user,
            started_at: now_rfc3339(),
        }
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn initials(&self) -> String {
        initials(&self.user.name)
    }
}

/// Profile fields supplied by the caller, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileInput {
    pub id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileError(pub String);

impl ProfileInput {
    /// Validates the input into a profile. A missing id is generated; a missing
    /// avatar falls back to the initials image for the email.
    pub fn into_profile(self) -> Result<UserProfile, ProfileError> {
        let email = required_trimmed(self.email.as_deref(), "email", MAX_EMAIL_LEN)?;
        if !looks_like_email(&email) {
            return Err(ProfileError("email must look like name@domain".to_string()));
        }
        let name = required_trimmed(self.name.as_deref(), "name", MAX_NAME_LEN)?;
        let role_raw = self
            .role
            .ok_or_else(|| ProfileError("missing role".to_string()))?;
        let role = Role::parse(&role_raw)
            .ok_or_else(|| ProfileError(format!("unknown role: {}", role_raw)))?;

        let id = match self.id.map(|s| s.trim().to_string()) {
            Some(s) if !s.is_empty() => s,
            _ => uuid::Uuid::new_v4().to_string(),
        };
        let avatar = self
            .avatar
            .filter(|a| !a.trim().is_empty())
            .or_else(|| Some(format!("{}{}", AVATAR_BASE, email)));
        let now = now_rfc3339();
        Ok(UserProfile {
            id,
            email,
            name,
            role,
            avatar,
            created_at: now.clone(),
            updated_at: now,
        })
    }
}

fn required_trimmed(v: Option<&str>, key: &str, max_len: usize) -> Result<String, ProfileError> {
    let s = v
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ProfileError(format!("missing {}", key)))?;
    if s.chars().count() > max_len {
        return Err(ProfileError(format!("{} length must be <= {}", key, max_len)));
    }
    Ok(s.to_string())
}

fn looks_like_email(s: &str) -> bool {
    match s.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.is_empty() && !domain.contains('@') && !s.contains(' ')
        }
        None => false,
    }
}

/// Avatar fallback: first letter of each word, upper-cased.
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

mod role_str {
    use crate::permissions::Role;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(role: &Role, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(role.as_str())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Role, D::Error> {
        let raw = String::deserialize(d)?;
        Role::parse(&raw).ok_or_else(|| D::Error::custom(format!("unknown role: {}", raw)))
    }
}

const SLOT: &str = "current";

pub fn save(conn: &Connection, session: &Session) -> anyhow::Result<()> {
    let payload = serde_json::to_string(session)?;
    conn.execute(
        "INSERT INTO session(slot, payload, saved_at) VALUES(?, ?, ?)
         ON CONFLICT(slot) DO UPDATE SET payload = excluded.payload, saved_at = excluded.saved_at",
        (SLOT, payload, now_rfc3339()),
    )?;
    Ok(())
}

/// Marks the stored session as active at `now`. Does nothing when no session
/// is stored.
pub fn touch(conn: &Connection, now: DateTime<Utc>) -> anyhow::Result<()> {
    conn.execute(
        "UPDATE session SET saved_at = ? WHERE slot = ?",
        (now.to_rfc3339_opts(SecondsFormat::Secs, true), SLOT),
    )?;
    Ok(())
}

pub fn clear(conn: &Connection) -> anyhow::Result<()> {
    conn.execute("DELETE FROM session WHERE slot = ?", [SLOT])?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Restored {
    Nothing,
    Session(Session),
    /// A stored session existed but was dropped; the reason is for logs.
    Discarded(String),
}

/// Loads the stored session. Unreadable payloads and sessions idle longer than
/// `auto_lock_minutes` (0 disables the limit) are deleted. `saved_at` is the
/// last activity: written by [`save`], refreshed by [`touch`] and by a
/// successful restore.
pub fn restore(
    conn: &Connection,
    auto_lock_minutes: i64,
    now: DateTime<Utc>,
) -> anyhow::Result<Restored> {
    let row: Option<(String, Option<String>)> = conn
        .query_row(
            "SELECT payload, saved_at FROM session WHERE slot = ?",
            [SLOT],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .optional()?;
    let Some((payload, saved_at)) = row else {
        return Ok(Restored::Nothing);
    };

    let session = match serde_json::from_str::<Session>(&payload) {
        Ok(s) => s,
        Err(e) => {
            clear(conn)?;
            return Ok(Restored::Discarded(format!("unreadable session: {}", e)));
        }
    };

    if auto_lock_minutes > 0 {
        let expired = match saved_at.as_deref().map(DateTime::parse_from_rfc3339) {
            Some(Ok(t)) => now - t.with_timezone(&Utc) > Duration::minutes(auto_lock_minutes),
            _ => true,
        };
        if expired {
            clear(conn)?;
            return Ok(Restored::Discarded("session idle past auto-lock".to_string()));
        }
    }
    touch(conn, now)?;
    Ok(Restored::Session(session))
}
