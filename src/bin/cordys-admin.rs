// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 U.S. Federal Government (in countries where recognized)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Cordys Administration Command-Line Tool
//!
//! Invokes SOAP administration operations on configured Cordys systems and
//! exposes the template engine for scripting.
//!
//! # Usage
//!
//! ```text
//! cordys-admin [OPTIONS] <COMMAND>
//!
//! Commands:
//!   call    Invoke a SOAP operation on a system
//!   render  Render a template
//!   config  Configuration management
//!
//! Options:
//!   -c, --config <PATH>   Path to configuration file
//!   -v, --verbose         Enable verbose output
//!   -q, --quiet           Suppress non-error output
//!   -h, --help            Print help
//!   -V, --version         Print version
//! ```
//!
//! # Examples
//!
//! ```bash
//! # Send a request body read from a file
//! cordys-admin call --system dev --body get-orgs.xml --var org=o=system
//!
//! # Pipe a body through stdin with an extra query parameter
//! cat request.xml | cordys-admin call --system dev --body - --param timeout=30000
//!
//! # Render a template with the second stage applied
//! cordys-admin render --template '${CORDYS_INSTALL_DIR}/lib' --install-dir /opt/cordys
//!
//! # List configured systems
//! cordys-admin config systems
//! ```

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use cordys_admin_client::query::QueryParams;
use cordys_admin_client::settings::{AdminSettings, SettingsLoader};
use cordys_admin_client::template::{self, Bindings};
use cordys_admin_client::{ArtifactProvider, SoapCaller};

/// Cordys Administration Command-Line Tool
#[derive(Parser)]
#[command(name = "cordys-admin")]
#[command(author = "U.S. Federal Government")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "SOAP administration client for Cordys systems", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Invoke a SOAP operation on a system
    Call {
        /// Target system name from the configuration
        #[arg(short, long, value_name = "NAME")]
        system: String,

        /// Gateway URL (overrides the configured one)
        #[arg(long, value_name = "URL")]
        url: Option<String>,

        /// SOAP body file, or `-` for stdin
        #[arg(short, long, value_name = "FILE")]
        body: String,

        /// Extra query parameter (repeatable)
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,

        /// Template variable (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,
    },

    /// Render a template
    Render {
        /// Template text
        #[arg(short, long, value_name = "TEXT", conflicts_with = "file")]
        template: Option<String>,

        /// Template file
        #[arg(short, long, value_name = "FILE")]
        file: Option<PathBuf>,

        /// Template variable (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE")]
        vars: Vec<String>,

        /// Resolve the install directory marker against this path
        #[arg(long, value_name = "DIR")]
        install_dir: Option<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate configuration file
    Validate,
    /// List configured systems
    Systems,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.quiet {
        tracing::Level::ERROR
    } else if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create async runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = runtime.block_on(run_command(cli));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run_command(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Commands::Call {
            system,
            url,
            body,
            params,
            vars,
        } => cmd_call(&cli, system, url.as_deref(), body, params, vars).await,
        Commands::Render {
            template,
            file,
            vars,
            install_dir,
        } => cmd_render(template.as_deref(), file.as_ref(), vars, install_dir.as_deref()),
        Commands::Config { action } => match action {
            ConfigAction::Validate => cmd_config_validate(&cli),
            ConfigAction::Systems => cmd_config_systems(&cli),
        },
    }
}

fn load_settings(cli: &Cli, validate: bool) -> Result<AdminSettings, Box<dyn std::error::Error>> {
    let mut loader = SettingsLoader::new().with_validate(validate);
    if let Some(ref path) = cli.config {
        loader = loader.with_path(path);
    }
    Ok(loader.load()?)
}

fn parse_bindings(vars: &[String]) -> Result<Bindings, Box<dyn std::error::Error>> {
    let mut bindings = Bindings::new();
    for var in vars {
        let (name, value) = Bindings::parse_pair(var)?;
        bindings.insert(name, value);
    }
    Ok(bindings)
}

fn parse_params(params: &[String]) -> Result<QueryParams, Box<dyn std::error::Error>> {
    let mut query = QueryParams::new();
    for param in params {
        let (key, value) = param
            .split_once('=')
            .ok_or_else(|| format!("Expected KEY=VALUE, got '{param}'"))?;
        query.insert(key.to_string(), value.to_string());
    }
    Ok(query)
}

fn read_body(source: &str) -> Result<String, Box<dyn std::error::Error>> {
    if source == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        Ok(body)
    } else {
        std::fs::read_to_string(source).map_err(|e| format!("Failed to read {source}: {e}").into())
    }
}

async fn cmd_call(
    cli: &Cli,
    system: &str,
    url: Option<&str>,
    body: &str,
    params: &[String],
    vars: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(cli, true)?;
    let overrides = parse_bindings(vars)?;
    let system_config = settings.system(system)?;

    let url = match url {
        Some(url) => system_config.render(url, &overrides)?,
        None => settings.gateway_url(system, &overrides)?,
    };
    let soap_body = system_config.render(&read_body(body)?, &overrides)?;
    let extra_params = parse_params(params)?;

    let provider: Arc<dyn ArtifactProvider> = Arc::new(settings.artifact_provider()?);
    let caller = SoapCaller::from_config(&settings.to_caller_config(system)?, provider)?;

    tracing::info!(system, "Invoking SOAP operation");
    let response = caller.call_with_params(&url, &soap_body, &extra_params).await?;

    println!("{response}");
    Ok(())
}

fn cmd_render(
    template_text: Option<&str>,
    file: Option<&PathBuf>,
    vars: &[String],
    install_dir: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (template_text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?,
        (None, None) => return Err("Either --template or --file is required".into()),
    };

    let bindings = parse_bindings(vars)?;
    let mut rendered = template::substitute(&text, &bindings)?;
    if let Some(dir) = install_dir {
        rendered = template::resolve_install_dir(&rendered, dir);
    }

    print!("{rendered}");
    Ok(())
}

fn cmd_config_validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(cli, false)?;
    settings.validate()?;

    if !cli.quiet {
        println!("Configuration is valid");
        println!("  Systems: {}", settings.systems.len());
    }
    Ok(())
}

fn cmd_config_systems(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(cli, true)?;

    for (name, system) in &settings.systems {
        if cli.quiet {
            println!("{name}");
        } else {
            println!("{name}");
            println!("  Gateway:  {}", system.gateway_url);
            println!("  Artifact: {}", artifact_kind(&system.artifact));
            if let Some(ref dir) = system.install_dir {
                println!("  Install:  {dir}");
            }
        }
    }
    Ok(())
}

/// Source kind of an artifact setting, without the value itself.
fn artifact_kind(source: &str) -> &str {
    source.split_once(':').map_or(source, |(kind, _)| kind)
}
