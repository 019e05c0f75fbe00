//! awisnap - AWI dashboard screenshot capture
//!
//! Main entry point for the CLI application.

use std::path::PathBuf;

use awisnap::{run_capture, CliOverrides, RawConfig};
use clap::{Parser, Subcommand};

/// Captures AWI dashboard and widget screenshots as PNG
#[derive(Parser, Debug)]
#[command(name = "awisnap")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Args {
    /// Path to the .env file containing the configuration
    #[arg(long, short = 'e', global = true, default_value = ".env")]
    env: PathBuf,

    /// The ae connection name
    #[arg(long, short = 'n', global = true)]
    connection: Option<String>,

    /// The ae client
    #[arg(long, short = 'c', global = true)]
    client: Option<String>,

    /// The username of the ae user
    #[arg(long, short = 'u', global = true)]
    username: Option<String>,

    /// The department of the ae user
    #[arg(long, short = 'd', global = true)]
    department: Option<String>,

    /// The password of the ae user
    #[arg(long, short = 'p', global = true)]
    password: Option<String>,

    /// The url to the AWI
    #[arg(long, global = true)]
    url: Option<String>,

    /// The ae/AWI version, 12.3 or 21
    #[arg(long = "ae-version", short = 'v', global = true)]
    ae_version: Option<String>,

    /// Seconds to wait after the dashboard loads before capturing
    /// (time to load widget data)
    #[arg(long, short = 'w', global = true)]
    wait_for_widgets: Option<u64>,

    /// Seconds to wait for login and dashboard elements to appear
    #[arg(long, global = true)]
    element_timeout: Option<u64>,

    /// Chromium/Chrome executable to use instead of the bundled one
    #[arg(long, global = true)]
    browser_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Capture a dashboard and its widgets as PNG files
    Capture {
        /// Name of the dashboard to capture
        dashboard: String,
    },
    /// Print the resolved configuration with the password masked
    ShowConfig,
}

impl Args {
    fn overrides(&self, dashboard: Option<String>) -> CliOverrides {
        CliOverrides {
            version: self.ae_version.clone(),
            connection: self.connection.clone(),
            client: self.client.clone(),
            username: self.username.clone(),
            department: self.department.clone(),
            password: self.password.clone(),
            url: self.url.clone(),
            dashboard,
            wait_for_widgets: self.wait_for_widgets,
            element_timeout: self.element_timeout,
            browser_path: self.browser_path.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Env beats .env: dotenvy never overrides variables that are already set.
    let env_path = std::env::current_dir()?.join(&args.env);
    let _ = dotenvy::from_path(&env_path);

    match &args.command {
        Command::ShowConfig => {
            let raw = RawConfig::resolve(&args.overrides(None))?;
            println!("Current configuration from .env file and environment variables");
            println!("Checking for configuration in: '{}'", env_path.display());
            print!("{}", raw.render());
        }
        Command::Capture { dashboard } => {
            let raw = RawConfig::resolve(&args.overrides(Some(dashboard.clone())))?;
            let config = raw.validate()?;
            let summary = run_capture(&config).await?;
            println!(
                "Captured {} plus {} widget screenshots",
                summary.dashboard_file.display(),
                summary.widget_files.len()
            );
        }
    }

    Ok(())
}
