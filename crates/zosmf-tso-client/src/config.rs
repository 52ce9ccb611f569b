//! Client configuration — z/OSMF connection settings and the TSO session profile.

use serde::{Deserialize, Serialize};

/// z/OSMF connection settings.
///
/// Fixed at construction; the transport layer consumes the host and
/// credential fields, this crate only carries them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// z/OSMF host base URL.
    pub host_url: String,
    /// User performing the TSO executions.
    pub user: String,
    /// Password for `user`.
    pub password: String,
    /// Enable TLS certificate verification.
    #[serde(default)]
    pub ssl_verification: bool,
    /// Existing session handle to reuse; a new session is started when absent.
    #[serde(default)]
    pub session: Option<String>,
    /// TSO session profile sent on session start.
    #[serde(default)]
    pub profile: SessionProfile,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> std::result::Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// TSO session profile — logon procedure, terminal geometry, character set,
/// and accounting code, as sent to the z/OSMF TSO address space servlet.
///
/// All values travel as strings on the wire. Immutable once the session
/// manager is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionProfile {
    /// Logon procedure name.
    #[serde(default = "default_proc")]
    pub proc: String,
    /// Character set.
    #[serde(default = "default_chset")]
    pub chset: String,
    /// Code page.
    #[serde(default = "default_cpage")]
    pub cpage: String,
    /// Terminal rows.
    #[serde(default = "default_rows")]
    pub rows: String,
    /// Terminal columns.
    #[serde(default = "default_cols")]
    pub cols: String,
    /// Receive buffer size.
    #[serde(default = "default_rsize")]
    pub rsize: String,
    /// Accounting code.
    #[serde(default = "default_acct")]
    pub acct: String,
}

impl Default for SessionProfile {
    fn default() -> Self {
        Self {
            proc: default_proc(),
            chset: default_chset(),
            cpage: default_cpage(),
            rows: default_rows(),
            cols: default_cols(),
            rsize: default_rsize(),
            acct: default_acct(),
        }
    }
}

fn default_proc() -> String {
    "IZUFPROC".to_string()
}

fn default_chset() -> String {
    "697".to_string()
}

fn default_cpage() -> String {
    "1047".to_string()
}

fn default_rows() -> String {
    "204".to_string()
}

fn default_cols() -> String {
    "160".to_string()
}

fn default_rsize() -> String {
    "4096".to_string()
}

fn default_acct() -> String {
    "63606".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = SessionProfile::default();
        assert_eq!(profile.proc, "IZUFPROC");
        assert_eq!(profile.chset, "697");
        assert_eq!(profile.cpage, "1047");
        assert_eq!(profile.rows, "204");
        assert_eq!(profile.cols, "160");
        assert_eq!(profile.rsize, "4096");
        assert_eq!(profile.acct, "63606");
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
host_url = "https://mainframe.local:10443"
user = "USER01"
password = "secret"
ssl_verification = true

[profile]
rows = "24"
cols = "80"
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host_url, "https://mainframe.local:10443");
        assert_eq!(config.user, "USER01");
        assert!(config.ssl_verification);
        assert!(config.session.is_none());
        // Overridden geometry, defaulted everything else
        assert_eq!(config.profile.rows, "24");
        assert_eq!(config.profile.cols, "80");
        assert_eq!(config.profile.proc, "IZUFPROC");
    }

    #[test]
    fn test_config_minimal_toml() {
        let toml_str = r#"
host_url = "https://host"
user = "U"
password = "P"
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.ssl_verification);
        assert_eq!(config.profile, SessionProfile::default());
    }

    #[test]
    fn test_config_with_session_reuse() {
        let toml_str = r#"
host_url = "https://host"
user = "U"
password = "P"
session = "SERVLET-KEY-123"
"#;
        let config: ClientConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.session.as_deref(), Some("SERVLET-KEY-123"));
    }
}
