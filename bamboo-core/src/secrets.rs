//! Server credentials
//!
//! Credentials live in `~/.config/bamboo/secrets.toml`, apart from the
//! shareable config file:
//!
//! ```toml
//! [bamboo]
//! username = "builder"   # optional, selects basic auth
//! password = "..."       # basic-auth password
//! token = "..."          # personal access token
//! ```
//!
//! `BAMBOO_PASSWORD` and `BAMBOO_TOKEN` take precedence over the file.
//! On Unix the file is refused unless only its owner can read it.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{Error, Result};

/// Contents of `secrets.toml`
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Secrets {
    pub bamboo: BambooSecrets,
}

/// The `[bamboo]` table
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct BambooSecrets {
    pub username: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
}

/// How requests authenticate against the server
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Anonymous,
    Basic { username: String, password: String },
    Bearer(String),
}

impl Credentials {
    /// Short name of the auth scheme, safe to log
    pub fn scheme(&self) -> &'static str {
        match self {
            Credentials::Anonymous => "anonymous",
            Credentials::Basic { .. } => "basic",
            Credentials::Bearer(_) => "bearer",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            other => f.write_str(other.scheme()),
        }
    }
}

impl fmt::Debug for BambooSecrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BambooSecrets")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl fmt::Debug for Secrets {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets").field("bamboo", &self.bamboo).finish()
    }
}

/// Trimmed value, or `None` when missing or blank
fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl Secrets {
    /// `~/.config/bamboo/secrets.toml`
    pub fn default_secrets_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bamboo").join("secrets.toml"))
    }

    /// Read the default secrets file; empty secrets when there is none
    pub fn load() -> Result<Self> {
        match Self::default_secrets_path() {
            Some(path) if path.is_file() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Read the default secrets file, then apply `BAMBOO_*` overrides
    pub fn load_with_overrides() -> Result<Self> {
        Ok(Self::load()?.with_env_overrides())
    }

    /// Read a secrets file after checking nobody else can read it
    pub fn load_from_file(path: &Path) -> Result<Self> {
        ensure_owner_only(path)?;

        let raw = std::fs::read_to_string(path)?;
        let secrets = toml::from_str(&raw)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;

        debug!(path = %path.display(), "Loaded secrets");
        Ok(secrets)
    }

    /// Let `BAMBOO_PASSWORD` and `BAMBOO_TOKEN` replace file values
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(password) = present(std::env::var("BAMBOO_PASSWORD").ok().as_deref()) {
            self.bamboo.password = Some(password);
        }
        if let Some(token) = present(std::env::var("BAMBOO_TOKEN").ok().as_deref()) {
            self.bamboo.token = Some(token);
        }
        self
    }

    /// Decide how to authenticate
    ///
    /// `username` is the configured username; it wins over the one in the
    /// secrets file. With a username, basic auth is used with the password,
    /// or with the token when no password is set. Without one, a token means
    /// bearer auth and nothing at all means anonymous access.
    pub fn credentials(&self, username: Option<&str>) -> Result<Credentials> {
        let username = present(username).or_else(|| present(self.bamboo.username.as_deref()));
        let password = present(self.bamboo.password.as_deref());
        let token = present(self.bamboo.token.as_deref());
        let has_password = password.is_some();

        match (username, password.or(token.clone())) {
            (Some(username), Some(password)) => Ok(Credentials::Basic { username, password }),
            (Some(username), None) => Err(Error::Credentials(format!(
                "no password or token for user '{}'; set BAMBOO_PASSWORD or BAMBOO_TOKEN",
                username
            ))),
            (None, _) => match token {
                Some(token) => Ok(Credentials::Bearer(token)),
                None if has_password => Err(Error::Credentials(
                    "a password needs a username; set server.username or bamboo.username"
                        .to_string(),
                )),
                None => Ok(Credentials::Anonymous),
            },
        }
    }

    /// Write a starter `secrets.toml` at the default location
    pub fn init_template() -> Result<PathBuf> {
        let path = Self::default_secrets_path()
            .ok_or_else(|| Error::Config("no config directory for secrets".to_string()))?;
        Self::write_template(&path)?;
        Ok(path)
    }

    /// Create `path` with commented-out fields, readable by the owner only
    ///
    /// Fails if the file already exists.
    pub fn write_template(path: &Path) -> Result<()> {
        use std::io::Write;

        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::AlreadyExists => {
                Error::Config(format!("{} already exists", path.display()))
            }
            _ => Error::Io(e),
        })?;

        file.write_all(TEMPLATE.as_bytes())?;
        info!(path = %path.display(), "Wrote secrets template");
        Ok(())
    }
}

const TEMPLATE: &str = "\
# Bamboo credentials - keep this file private (mode 600)

[bamboo]
# Basic auth: set a username and password
# username = \"\"
# password = \"\"

# Or a personal access token (sent as a bearer token without a username)
# token = \"\"
";

#[cfg(unix)]
fn ensure_owner_only(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = std::fs::metadata(path)?.permissions().mode() & 0o777;
    if mode & 0o077 != 0 {
        return Err(Error::Config(format!(
            "{} is readable by other users (mode {:o}); chmod 600 it",
            path.display(),
            mode
        )));
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_owner_only(_path: &Path) -> Result<()> {
    Ok(())
}
