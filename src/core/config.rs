//! Configuration assembly for awisnap
//!
//! A single validated [`AwiConfig`] feeds the capture core. Settings are
//! merged from CLI flags over process environment over a `.env` file —
//! dotenvy never overrides variables that are already set, so env beats
//! `.env` automatically and this module only has to prefer CLI over env.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::core::error::{AwiError, Result};

/// Default allowance (seconds) for asynchronous widget data to populate after
/// the dashboard container exists. Container presence is not data readiness.
pub const DEFAULT_WAIT_FOR_WIDGETS: u64 = 10;

/// Default budget (seconds) for bounded element waits: login marker, submit
/// control, dashboard container.
pub const DEFAULT_ELEMENT_TIMEOUT: u64 = 30;

const DEFAULT_VERSION: &str = "12.3";

/// Supported AE/AWI versions.
///
/// Anything else is rejected as a configuration error before any browser
/// activity — never a silent no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AeVersion {
    /// Legacy AWI (uc4_framework login form)
    V12_3,
    /// Redesigned AWI (ecc-* web component login form)
    V21,
}

impl FromStr for AeVersion {
    type Err = AwiError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "12.3" => Ok(Self::V12_3),
            "21" => Ok(Self::V21),
            other => Err(AwiError::config(format!(
                "unsupported AE version '{other}', expected '12.3' or '21'"
            ))),
        }
    }
}

impl fmt::Display for AeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V12_3 => write!(f, "12.3"),
            Self::V21 => write!(f, "21"),
        }
    }
}

/// Values supplied on the command line. `None` falls through to the
/// environment (and thereby the `.env` file).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub version: Option<String>,
    pub connection: Option<String>,
    pub client: Option<String>,
    pub username: Option<String>,
    pub department: Option<String>,
    pub password: Option<String>,
    pub url: Option<String>,
    pub dashboard: Option<String>,
    pub wait_for_widgets: Option<u64>,
    pub element_timeout: Option<u64>,
    pub browser_path: Option<PathBuf>,
}

/// Resolved but unvalidated configuration, exactly as `show-config` reports
/// it. [`RawConfig::validate`] turns it into the [`AwiConfig`] the core runs
/// on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawConfig {
    pub version: String,
    pub connection: String,
    pub client: String,
    pub username: String,
    pub department: String,
    pub password: String,
    pub url: String,
    pub dashboard: String,
    pub wait_for_widgets: u64,
    pub element_timeout: u64,
    pub browser_executable: Option<PathBuf>,
}

fn string_setting(cli: &Option<String>, env_name: &str) -> String {
    cli.clone()
        .filter(|v| !v.is_empty())
        .or_else(|| env::var(env_name).ok().filter(|v| !v.is_empty()))
        .unwrap_or_default()
}

fn numeric_setting(cli: Option<u64>, env_name: &str, default: u64) -> Result<u64> {
    if let Some(value) = cli {
        return Ok(value);
    }
    match env::var(env_name) {
        Ok(raw) if !raw.is_empty() => raw.parse().map_err(|_| {
            AwiError::config(format!(
                "{env_name} must be an integer number of seconds, got '{raw}'"
            ))
        }),
        _ => Ok(default),
    }
}

fn required(value: &str, what: &str) -> Result<String> {
    if value.is_empty() {
        Err(AwiError::config(format!("missing required setting: {what}")))
    } else {
        Ok(value.to_string())
    }
}

impl RawConfig {
    /// Merge CLI flags over environment variables into a resolved view.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let mut version = string_setting(&cli.version, "AE_VERSION");
        if version.is_empty() {
            version = DEFAULT_VERSION.to_string();
        }
        Ok(Self {
            version,
            connection: string_setting(&cli.connection, "AE_CONNECTION"),
            client: string_setting(&cli.client, "AE_CLIENT"),
            username: string_setting(&cli.username, "AE_USERNAME"),
            department: string_setting(&cli.department, "AE_DEPARTMENT"),
            password: string_setting(&cli.password, "AE_PASSWORD"),
            url: string_setting(&cli.url, "AE_AWI_URL"),
            dashboard: string_setting(&cli.dashboard, "DASHBOARD"),
            wait_for_widgets: numeric_setting(
                cli.wait_for_widgets,
                "WAIT_FOR_WIDGET",
                DEFAULT_WAIT_FOR_WIDGETS,
            )?,
            element_timeout: numeric_setting(
                cli.element_timeout,
                "AWI_ELEMENT_TIMEOUT",
                DEFAULT_ELEMENT_TIMEOUT,
            )?,
            browser_executable: cli.browser_path.clone().or_else(|| {
                env::var("AWI_BROWSER_PATH")
                    .ok()
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            }),
        })
    }

    /// Password as `show-config` prints it.
    pub fn masked_password(&self) -> &str {
        if self.password.is_empty() {
            ""
        } else {
            "***"
        }
    }

    /// `show-config` body. Performs no browser activity.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("AE_VERSION: {}\n", self.version));
        out.push_str(&format!("AE_CONNECTION: {}\n", self.connection));
        out.push_str(&format!("AE_CLIENT: {}\n", self.client));
        out.push_str(&format!("AE_USERNAME: {}\n", self.username));
        out.push_str(&format!("AE_DEPARTMENT: {}\n", self.department));
        out.push_str(&format!("AE_PASSWORD: {}\n", self.masked_password()));
        out.push_str(&format!("AE_AWI_URL: {}\n", self.url));
        out.push_str(&format!("DASHBOARD: {}\n", self.dashboard));
        out.push_str(&format!("WAIT_FOR_WIDGET: {}\n", self.wait_for_widgets));
        out.push_str(&format!("AWI_ELEMENT_TIMEOUT: {}\n", self.element_timeout));
        if let Some(path) = &self.browser_executable {
            out.push_str(&format!("AWI_BROWSER_PATH: {}\n", path.display()));
        }
        out
    }

    /// Check every invariant the core relies on. All violations surface here,
    /// before any browser is launched.
    pub fn validate(&self) -> Result<AwiConfig> {
        let version: AeVersion = self.version.parse()?;
        let connection = required(&self.connection, "connection (AE_CONNECTION / --connection)")?;
        let client = required(&self.client, "client (AE_CLIENT / --client)")?;
        if !client.chars().all(|c| c.is_ascii_digit()) {
            return Err(AwiError::config(format!(
                "client must be a numeric string, got '{client}'"
            )));
        }
        let username = required(&self.username, "username (AE_USERNAME / --username)")?;
        let department = required(&self.department, "department (AE_DEPARTMENT / --department)")?;
        let url_str = required(&self.url, "url (AE_AWI_URL / --url)")?;
        let url = Url::parse(&url_str).map_err(|e| {
            AwiError::config(format!("url '{url_str}' is not a valid absolute URL: {e}"))
        })?;
        let dashboard = required(&self.dashboard, "dashboard name")?;

        Ok(AwiConfig {
            version,
            connection,
            client,
            username,
            department,
            // May be empty: supplied interactively or via a secret store.
            password: self.password.clone(),
            url,
            dashboard,
            wait_for_widgets: self.wait_for_widgets,
            element_timeout: self.element_timeout,
            browser_executable: self.browser_executable.clone(),
        })
    }
}

/// Validated, immutable configuration for one capture run.
#[derive(Debug, Clone)]
pub struct AwiConfig {
    pub version: AeVersion,
    pub connection: String,
    pub client: String,
    pub username: String,
    pub department: String,
    pub password: String,
    pub url: Url,
    pub dashboard: String,
    /// Seconds to sleep between dashboard readiness and the first screenshot
    pub wait_for_widgets: u64,
    /// Seconds allowed for each bounded element wait
    pub element_timeout: u64,
    pub browser_executable: Option<PathBuf>,
}

impl AwiConfig {
    /// Client left-padded with `0` to width 4; longer clients pass through
    /// unpadded.
    pub fn padded_client(&self) -> String {
        format!("{:0>4}", self.client)
    }

    /// Budget for bounded element waits.
    pub fn element_wait(&self) -> Duration {
        Duration::from_secs(self.element_timeout)
    }

    /// Allowance for widget data to populate before capturing.
    pub fn widget_settle(&self) -> Duration {
        Duration::from_secs(self.wait_for_widgets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawConfig {
        RawConfig {
            version: "12.3".to_string(),
            connection: "AUTOMIC".to_string(),
            client: "100".to_string(),
            username: "AUTOMIC".to_string(),
            department: "AUTOMIC".to_string(),
            password: "secret".to_string(),
            url: "https://awi.example.com/awi".to_string(),
            dashboard: "sales".to_string(),
            wait_for_widgets: 5,
            element_timeout: 30,
            browser_executable: None,
        }
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!("12.3".parse::<AeVersion>().unwrap(), AeVersion::V12_3);
        assert_eq!("21".parse::<AeVersion>().unwrap(), AeVersion::V21);
        assert!(matches!(
            "13".parse::<AeVersion>(),
            Err(AwiError::Config(_))
        ));
        assert!("".parse::<AeVersion>().is_err());
    }

    #[test]
    fn test_padded_client() {
        let mut config = raw().validate().unwrap();
        for (client, expected) in [
            ("7", "0007"),
            ("42", "0042"),
            ("100", "0100"),
            ("1234", "1234"),
            // Longer than 4 digits passes through untruncated.
            ("12345", "12345"),
        ] {
            config.client = client.to_string();
            assert_eq!(config.padded_client(), expected);
        }
    }

    #[test]
    fn test_validate_accepts_empty_password() {
        let mut cfg = raw();
        cfg.password = String::new();
        let validated = cfg.validate().unwrap();
        assert!(validated.password.is_empty());
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        let mut cfg = raw();
        cfg.connection = String::new();
        assert!(matches!(cfg.validate(), Err(AwiError::Config(_))));

        let mut cfg = raw();
        cfg.dashboard = String::new();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_numeric_client() {
        let mut cfg = raw();
        cfg.client = "10a".to_string();
        assert!(matches!(cfg.validate(), Err(AwiError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_relative_url() {
        let mut cfg = raw();
        cfg.url = "awi/index.html".to_string();
        assert!(matches!(cfg.validate(), Err(AwiError::Config(_))));
    }

    #[test]
    fn test_masked_password() {
        assert_eq!(raw().masked_password(), "***");
        let mut cfg = raw();
        cfg.password = String::new();
        assert_eq!(cfg.masked_password(), "");
        assert!(!cfg.render().contains("secret"));
    }

    // Env-dependent assertions live in one test: the process environment is
    // shared across parallel test threads.
    #[test]
    fn test_resolve_precedence_and_defaults() {
        env::set_var("AE_CONNECTION", "FROM_ENV");
        env::set_var("AE_CLIENT", "200");
        env::set_var("WAIT_FOR_WIDGET", "7");

        let cli = CliOverrides {
            connection: Some("FROM_CLI".to_string()),
            dashboard: Some("sales".to_string()),
            ..Default::default()
        };
        let resolved = RawConfig::resolve(&cli).unwrap();

        // CLI wins over env; env fills what the CLI leaves out.
        assert_eq!(resolved.connection, "FROM_CLI");
        assert_eq!(resolved.client, "200");
        assert_eq!(resolved.wait_for_widgets, 7);
        assert_eq!(resolved.dashboard, "sales");
        assert_eq!(resolved.version, "12.3");
        assert_eq!(resolved.element_timeout, DEFAULT_ELEMENT_TIMEOUT);

        env::set_var("WAIT_FOR_WIDGET", "not-a-number");
        assert!(RawConfig::resolve(&cli).is_err());

        env::remove_var("AE_CONNECTION");
        env::remove_var("AE_CLIENT");
        env::remove_var("WAIT_FOR_WIDGET");
    }
}
