use std::env;
use std::path::PathBuf;

/// Session persistence settings.
///
/// # Environment Variables
///
/// - `AULA_SESSION_FILE`: JSON file holding the persisted session
///   (default: `.aula/session.json` under the working directory)
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub storage_path: PathBuf,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let storage_path = env::var("AULA_SESSION_FILE")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_path);

        Self { storage_path }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from(".aula").join("session.json")
}
