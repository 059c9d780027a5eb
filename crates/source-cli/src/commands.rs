//! Subcommand definitions and handlers.

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;

use source_core::config::DEFAULT_BASE_URL;
use source_core::models::{SlotListParams, ThreadListParams, ThreadStatus};
use source_core::{ApiKey, Config, CredentialStore, SourceClient, SourceConfiguration, TokenOptions};

/// Default lifetime of generated member tokens.
const DEFAULT_TOKEN_LIFETIME_SECS: i64 = 3600;

#[derive(Debug, Parser)]
#[command(name = "source", version, about = "Command line tools for the Source API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a member token signed with the configured API key
    Token {
        /// Member ID the token is issued for
        #[arg(long)]
        member: String,
        /// Token lifetime in seconds
        #[arg(long, default_value_t = DEFAULT_TOKEN_LIFETIME_SECS)]
        expires_in: i64,
        /// Scope to grant (repeatable)
        #[arg(long = "scope")]
        scopes: Vec<String>,
    },
    /// Inspect communication threads
    Threads {
        #[command(subcommand)]
        command: ThreadsCommand,
    },
    /// List bookable appointment slots
    Slots {
        #[arg(long)]
        appointment_type: String,
        /// Window start (RFC 3339)
        #[arg(long)]
        start: DateTime<Utc>,
        /// Window end (RFC 3339)
        #[arg(long)]
        end: DateTime<Utc>,
        #[arg(long)]
        member: Option<String>,
        #[arg(long)]
        time_zone: Option<String>,
    },
    /// Store an API key in the OS keychain
    Login {
        #[arg(long)]
        key_id: String,
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Remove the stored API key
    Logout,
}

#[derive(Debug, Subcommand)]
pub enum ThreadsCommand {
    List {
        #[arg(long)]
        member: Option<String>,
        /// awaiting_care_team, awaiting_member or closed (repeatable)
        #[arg(long)]
        status: Vec<ThreadStatus>,
        #[arg(long)]
        limit: Option<u32>,
    },
    Show {
        id: String,
    },
}

pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Token { member, expires_in, scopes } => {
            let options = token_options(member, expires_in, scopes)?;
            let config = SourceConfiguration::resolve()?;
            let token = SourceClient::new(config)?
                .token_generator()
                .generate(&options)?;
            println!("{}", token);
        }
        Command::Threads { command } => {
            let client = SourceClient::new(SourceConfiguration::resolve()?)?;
            match command {
                ThreadsCommand::List { member, status, limit } => {
                    let params = ThreadListParams {
                        member,
                        status,
                        limit,
                        ..Default::default()
                    };
                    let page = client.threads().list(Some(&params), None).await?;
                    debug!(count = page.data.len(), has_more = page.has_more, "Listed threads");
                    print_json(&page)?;
                }
                ThreadsCommand::Show { id } => {
                    let thread = client.threads().retrieve(&id, None).await?;
                    print_json(&thread)?;
                }
            }
        }
        Command::Slots { appointment_type, start, end, member, time_zone } => {
            let client = SourceClient::new(SourceConfiguration::resolve()?)?;
            let mut params = SlotListParams::new(appointment_type, start, end);
            params.member = member;
            params.output_time_zone = time_zone;
            let slots = client.slots().list(&params, None).await?;
            print_json(&slots)?;
        }
        Command::Login { key_id, base_url } => {
            let secret = rpassword::prompt_password("API key secret: ")
                .context("Failed to read API key secret")?;
            if secret.trim().is_empty() {
                anyhow::bail!("API key secret cannot be empty");
            }
            CredentialStore::store(&ApiKey::new(key_id.clone(), secret.trim()))?;

            let mut config = Config::load()?;
            config.api_key_id = Some(key_id);
            if base_url.is_some() {
                config.base_url = base_url;
            }
            config.save()?;
            eprintln!(
                "Stored API key for {}",
                config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
            );
        }
        Command::Logout => {
            let mut config = Config::load()?;
            match config.api_key_id.take() {
                Some(key_id) => {
                    if CredentialStore::has_credentials(&key_id) {
                        CredentialStore::delete(&key_id)?;
                    }
                    config.save()?;
                    eprintln!("Removed API key {}", key_id);
                }
                None => eprintln!("No API key stored"),
            }
        }
    }
    Ok(())
}

/// Build token options from CLI input, rejecting lifetimes that overflow.
fn token_options(member: String, expires_in: i64, scopes: Vec<String>) -> Result<TokenOptions> {
    let lifetime = Duration::try_seconds(expires_in)
        .ok_or_else(|| anyhow::anyhow!("--expires-in {} is out of range", expires_in))?;
    let options = TokenOptions::expires_in(member, lifetime)
        .ok_or_else(|| anyhow::anyhow!("--expires-in {} puts the expiration out of range", expires_in))?;
    Ok(options.with_scopes(scopes))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
