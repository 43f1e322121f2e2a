use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::config;

/// A persisted login session, carrying the same keys the browser front-end
/// kept in localStorage (userType, username, userId, jwt, refreshToken).
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Session {
    pub user_type: String,
    pub username: String,
    pub user_id: i64,
    pub jwt: String,
    pub refresh_token: String,
}

pub fn session_path() -> Option<PathBuf> {
    Some(config::home_dir()?.join(".fleetdesk").join("session.yml"))
}

pub fn load() -> Result<Option<Session>, String> {
    let path = match session_path() {
        Some(path) => path,
        None => return Ok(None),
    };
    match std::fs::read_to_string(&path) {
        Ok(contents) => serde_yaml::from_str::<Session>(&contents)
            .map(Some)
            .map_err(|e| format!("failed to parse session '{}': {e}", path.display())),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(format!("failed to read session '{}': {e}", path.display())),
    }
}

pub fn store(session: &Session) -> Result<(), String> {
    let path =
        session_path().ok_or_else(|| "could not determine home directory".to_string())?;
    let parent = path
        .parent()
        .ok_or_else(|| format!("invalid session path '{}'", path.display()))?;
    std::fs::create_dir_all(parent).map_err(|e| {
        format!(
            "failed to create session directory '{}': {e}",
            parent.display()
        )
    })?;
    let contents = serde_yaml::to_string(session)
        .map_err(|e| format!("failed to serialize session: {e}"))?;
    std::fs::write(&path, contents)
        .map_err(|e| format!("failed to write session '{}': {e}", path.display()))?;
    Ok(())
}

/// Removes the stored session. Missing file is not an error, matching the
/// original logout which just cleared whatever keys existed.
pub fn clear() -> Result<bool, String> {
    let path = match session_path() {
        Some(path) => path,
        None => return Ok(false),
    };
    match std::fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(format!("failed to remove session '{}': {e}", path.display())),
    }
}
