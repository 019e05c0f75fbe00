//! Login strategies for the two AWI generations.
//!
//! v12.3 uses the uc4_framework login form with anonymous inputs in fixed DOM
//! order; the v21 redesign moved to ecc-* web components addressed by a
//! (label, field-kind) pair. Both flows navigate straight to the dashboard
//! route — authentication redirects there on success, and the dashboard wait
//! in the capture phase is the only success check.

use std::time::Duration;

use chromiumoxide::{Element, Page};

use crate::browser::wait_for_element;
use crate::core::config::{AeVersion, AwiConfig};
use crate::core::error::{AwiError, Result};

/// Delay after filling the form so client-side validation catches up before
/// the submit click. Coarse synchronization, not a readiness guarantee.
const FORM_SETTLE: Duration = Duration::from_secs(1);

const V12_LOGIN_FORM: &str = "div.uc4_framework_login_dataArea";
const V12_LOGIN_BUTTON: &str = "div.uc4_framework_login_loginButton";

const V21_LOGIN_FORM: &str = "ecc-form-layout#EccFormLayout_2";
const V21_CLIENT_FIELD: &str = r#"ecc-form-field[label="Client"] ecc-spinner"#;
const V21_USERNAME_FIELD: &str = r#"ecc-form-field[label="Name"] ecc-textfield"#;
const V21_DEPARTMENT_FIELD: &str = r#"ecc-form-field[label="Department"] ecc-textfield"#;
const V21_PASSWORD_FIELD: &str = r#"ecc-form-field[label="Password"] ecc-passwordfield"#;
const V21_LOGIN_BUTTON: &str = r#"ecc-button[caption="Login"]"#;

/// Drives the login UI matching the configured AE version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginStrategy {
    V12,
    V21,
}

impl LoginStrategy {
    /// Selection is exhaustive: unknown versions are already rejected when
    /// the configuration is parsed.
    pub fn for_version(version: AeVersion) -> Self {
        match version {
            AeVersion::V12_3 => Self::V12,
            AeVersion::V21 => Self::V21,
        }
    }

    /// Pre-authenticated dashboard URL for this AWI generation.
    pub fn dashboard_url(&self, config: &AwiConfig) -> String {
        let client = config.padded_client();
        match self {
            Self::V12 => format!(
                "{}#{}:{}@home/dashboards/{}",
                config.url, config.connection, client, config.dashboard
            ),
            Self::V21 => format!(
                "{}{}/{}/@home/dashboards/{}",
                config.url, config.connection, client, config.dashboard
            ),
        }
    }

    /// Navigate to the dashboard route and drive the login form. Leaves the
    /// browser on the dashboard route on success.
    pub async fn authenticate(&self, page: &Page, config: &AwiConfig) -> Result<()> {
        let url = self.dashboard_url(config);
        println!("Login to '{}' to get dashboard from: {url}", config.url);
        page.goto(url.as_str()).await?;

        match self {
            Self::V12 => login_v12(page, config).await,
            Self::V21 => login_v21(page, config).await,
        }
    }
}

async fn login_v12(page: &Page, config: &AwiConfig) -> Result<()> {
    let form = wait_for_element(page, V12_LOGIN_FORM, config.element_wait())
        .await
        .ok_or(AwiError::NavigationTimeout {
            phase: "v12.3 login",
            selector: V12_LOGIN_FORM,
            timeout_secs: config.element_timeout,
        })?;
    println!("Login form found, filling credentials...");

    // Fixed DOM order: connection, client, username, department, password.
    let inputs = form.find_elements("input").await.unwrap_or_default();
    if inputs.len() < 5 {
        return Err(AwiError::login_control(format!(
            "expected 5 login inputs under '{V12_LOGIN_FORM}', found {}",
            inputs.len()
        )));
    }
    inputs[0].type_str(&config.connection).await?;
    let values = [
        &config.client,
        &config.username,
        &config.department,
        &config.password,
    ];
    for (input, value) in inputs[1..5].iter().zip(values) {
        overwrite(input, value).await?;
    }
    tokio::time::sleep(FORM_SETTLE).await;

    submit(page, config, V12_LOGIN_BUTTON).await
}

async fn login_v21(page: &Page, config: &AwiConfig) -> Result<()> {
    wait_for_element(page, V21_LOGIN_FORM, config.element_wait())
        .await
        .ok_or(AwiError::NavigationTimeout {
            phase: "v21 login",
            selector: V21_LOGIN_FORM,
            timeout_secs: config.element_timeout,
        })?;
    println!("Login form found, filling credentials...");

    let fields = [
        (V21_CLIENT_FIELD, &config.client),
        (V21_USERNAME_FIELD, &config.username),
        (V21_DEPARTMENT_FIELD, &config.department),
        (V21_PASSWORD_FIELD, &config.password),
    ];
    for (selector, value) in fields {
        let field = page
            .find_element(selector)
            .await
            .map_err(|_| AwiError::login_control(format!("login field '{selector}' not found")))?;
        field.type_str(value).await?;
    }
    tokio::time::sleep(FORM_SETTLE).await;

    submit(page, config, V21_LOGIN_BUTTON).await
}

/// The v12.3 form pre-fills some fields, so typing without clearing would
/// append. Select-all first, then overwrite.
async fn overwrite(input: &Element, value: &str) -> Result<()> {
    input.click().await?;
    input
        .call_js_fn("function() { this.select(); }", false)
        .await?;
    input.type_str(value).await?;
    Ok(())
}

async fn submit(page: &Page, config: &AwiConfig, selector: &'static str) -> Result<()> {
    let button = wait_for_element(page, selector, config.element_wait())
        .await
        .ok_or_else(|| {
            AwiError::login_control(format!("submit control '{selector}' missing after fill"))
        })?;
    button.click().await?;
    Ok(())
}
