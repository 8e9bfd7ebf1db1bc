use serde::{Deserialize, Serialize};

/// Fixed profile identifier all backups for this deployment are tagged with.
pub const BACKUP_PROFILE: &str = "task-manager-lite";

/// Synthetic user identifier for this single-user deployment.
pub const BACKUP_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

const DEFAULT_API_BASE: &str = "https://api.anthonychiappone.com";

const ENV_API_BASE: &str = "TASKBOARD_BACKUP_API_BASE";
const ENV_API_KEY: &str = "TASKBOARD_BACKUP_API_KEY";

/// Connection settings for the remote backup service.
///
/// A missing API key means the backup feature is disabled, not
/// misconfigured; callers check `is_configured()` and skip remote calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE, None)
    }
}

impl BackupConfig {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, api_key }
    }

    /// Load from the environment, falling back to the default base URL.
    pub fn from_env() -> Self {
        let base_url = std::env::var(ENV_API_BASE)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let api_key = std::env::var(ENV_API_KEY)
            .ok()
            .filter(|v| !v.trim().is_empty());
        Self::new(base_url, api_key)
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_key() {
        let config = BackupConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.base_url, DEFAULT_API_BASE);
    }

    #[test]
    fn test_new_strips_trailing_slashes() {
        let config = BackupConfig::new("https://backup.example.com///", None);
        assert_eq!(config.base_url, "https://backup.example.com");
    }

    #[test]
    fn test_configured_with_key() {
        let config = BackupConfig::new(DEFAULT_API_BASE, Some("secret".to_string()));
        assert!(config.is_configured());
    }
}
