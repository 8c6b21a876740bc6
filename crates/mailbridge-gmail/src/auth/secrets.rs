//! `OAuth2` client secrets in Google's `credentials.json` format.

use mailbridge_core::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// `OAuth2` client configuration downloaded from the Google Cloud Console.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientSecrets {
    /// Client id.
    pub client_id: String,
    /// Client secret.
    pub client_secret: String,
    /// Authorization endpoint.
    #[serde(default = "default_auth_uri")]
    pub auth_uri: String,
    /// Token endpoint.
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

/// Envelope around the secrets: Google nests them under `installed` for
/// desktop apps or `web` for web apps.
#[derive(Debug, Deserialize)]
struct SecretsFile {
    installed: Option<ClientSecrets>,
    web: Option<ClientSecrets>,
}

impl ClientSecrets {
    /// Loads secrets from a Google-format credentials file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] when the file is missing, unreadable,
    /// or carries neither an `installed` nor a `web` section.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::Configuration(format!(
                "credentials file not found: {}. Download it from the Google Cloud Console.",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|e| {
            Error::Configuration(format!("could not read {}: {e}", path.display()))
        })?;
        let file: SecretsFile = serde_json::from_str(&raw).map_err(|e| {
            Error::Configuration(format!("malformed credentials file {}: {e}", path.display()))
        })?;

        file.installed.or(file.web).ok_or_else(|| {
            Error::Configuration(format!(
                "{} has neither an \"installed\" nor a \"web\" section",
                path.display()
            ))
        })
    }
}

fn default_auth_uri() -> String {
    "https://accounts.google.com/o/oauth2/auth".to_string()
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_load_installed_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(
            &path,
            r#"{"installed": {"client_id": "cid", "client_secret": "cs"}}"#,
        )
        .unwrap();

        let secrets = ClientSecrets::load(&path).unwrap();
        assert_eq!(secrets.client_id, "cid");
        assert_eq!(secrets.client_secret, "cs");
        assert_eq!(secrets.token_uri, "https://oauth2.googleapis.com/token");
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        let err = ClientSecrets::load(Path::new("/nonexistent/credentials.json")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_missing_sections_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, r#"{"other": {}}"#).unwrap();

        let err = ClientSecrets::load(&path).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }
}
