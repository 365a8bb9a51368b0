//! API credentials
//!
//! The chat API key lives in `~/.config/koreplan/secrets.toml`, apart from
//! `config.toml`, and `DEEPSEEK_API_KEY` takes precedence over it. On Unix
//! the file is only read when no one but its owner can access it.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

const SECRETS_TEMPLATE: &str = r#"# koreplan credentials, keep this file private (chmod 600)

[deepseek]
# Bearer token for the chat completion endpoint.
# DEEPSEEK_API_KEY in the environment wins over this value.
api_key = ""
"#;

/// Contents of `secrets.toml`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub deepseek: ApiSecrets,
}

/// `[deepseek]` table
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiSecrets {
    pub api_key: Option<String>,
}

impl Secrets {
    /// Secrets from the default path; empty when there is no file
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read `path`, refusing files that group or others can access
    pub fn load_from_file(path: &PathBuf) -> Result<Self> {
        check_private(path)?;

        let contents = std::fs::read_to_string(path).map_err(Error::Io)?;
        let mut secrets: Secrets = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse secrets: {}", e)))?;
        secrets.deepseek.api_key = secrets.deepseek.api_key.map(|key| key.trim().to_string());

        Ok(secrets)
    }

    /// `~/.config/koreplan/secrets.toml`
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("koreplan").join("secrets.toml"))
    }

    /// Key from `DEEPSEEK_API_KEY`, else from the file
    pub fn api_key(&self) -> Option<String> {
        let from_env = std::env::var(API_KEY_ENV)
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        match from_env {
            Some(key) => {
                debug!(var = API_KEY_ENV, "API key taken from environment");
                Some(key)
            }
            None => self.file_api_key(),
        }
    }

    /// Key from the file only; an empty string counts as missing
    pub fn file_api_key(&self) -> Option<String> {
        let key = self.deepseek.api_key.as_deref().filter(|key| !key.is_empty())?;
        debug!("API key taken from secrets file");
        Some(key.to_string())
    }

    /// Write the template to the default path and return that path
    pub fn create_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("Could not determine secrets path".to_string()))?;
        Self::create_template_at(&path)?;
        Ok(path)
    }

    /// Write the template to `path` (mode 0600); never overwrites
    pub fn create_template_at(path: &PathBuf) -> Result<()> {
        if path.exists() {
            return Err(Error::Config(format!(
                "Secrets file already exists at {}",
                path.display()
            )));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }

        std::fs::write(path, SECRETS_TEMPLATE).map_err(Error::Io)?;
        restrict_to_owner(path)?;

        warn!(path = %path.display(), "Secrets template written, add the API key before generating plans");
        Ok(())
    }
}

#[cfg(unix)]
fn check_private(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path).map_err(Error::Io)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "Secrets file {} has insecure permissions {:o}. Please run: chmod 600 {}",
            path.display(),
            mode,
            path.display()
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn check_private(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(unix)]
fn restrict_to_owner(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).map_err(Error::Io)
}

#[cfg(not(unix))]
fn restrict_to_owner(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_secrets() {
        let secrets = Secrets::default();
        assert!(secrets.deepseek.api_key.is_none());
        assert!(secrets.file_api_key().is_none());
    }

    #[test]
    fn test_parse_secrets() {
        let toml = r#"
[deepseek]
api_key = "sk-xxxxxxxx"
"#;
        let secrets: Secrets = toml::from_str(toml).unwrap();
        assert_eq!(secrets.file_api_key(), Some("sk-xxxxxxxx".to_string()));
    }

    #[test]
    fn test_empty_key_is_absent() {
        let secrets = Secrets {
            deepseek: ApiSecrets {
                api_key: Some(String::new()),
            },
        };
        assert!(secrets.file_api_key().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_insecure_permissions_rejected() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[deepseek]\napi_key = \"test\"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o644);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let result = Secrets::load_from_file(&file.path().to_path_buf());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("insecure permissions"));
    }

    #[cfg(unix)]
    #[test]
    fn test_secure_permissions_accepted_and_trimmed() {
        use std::os::unix::fs::PermissionsExt;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[deepseek]\napi_key = \"  sk-test  \"").unwrap();

        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(file.path(), perms).unwrap();

        let secrets = Secrets::load_from_file(&file.path().to_path_buf()).unwrap();
        assert_eq!(secrets.deepseek.api_key, Some("sk-test".to_string()));
    }

    #[test]
    fn test_create_template_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("koreplan").join("secrets.toml");

        Secrets::create_template_at(&path).unwrap();
        assert!(path.exists());

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        let secrets = Secrets::load_from_file(&path).unwrap();
        assert!(secrets.file_api_key().is_none());
        assert!(Secrets::create_template_at(&path).is_err());
    }
}
