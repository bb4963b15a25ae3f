//! CLI administration tool for expman-web.
//!
//! Issues and inspects customer login tokens. The server never stores raw
//! tokens: it is configured with `customer_key:hash` entries in
//! `CUSTOMER_TOKENS`, where the hash is HMAC-SHA256 keyed by
//! `TOKEN_SIGNING_SECRET`.
//!
//! # Usage
//!
//! ```bash
//! # Create a new login token for customer 1
//! cargo run --bin expman-admin -- token create --customer 1
//!
//! # Compute the entry for an existing token
//! cargo run --bin expman-admin -- token hash "my-token" --customer 1
//!
//! # List configured entries
//! cargo run --bin expman-admin -- token list
//!
//! # Check which customer a token logs in as
//! cargo run --bin expman-admin -- token verify "my-token"
//! ```
//!
//! # Environment Variables
//!
//! - `TOKEN_SIGNING_SECRET` (required): HMAC key shared with the server
//! - `CUSTOMER_TOKENS` (for `list` and `verify`): configured entries

use expman_web::application::services::{AuthService, hash_token};
use expman_web::config::parse_customer_tokens;
use expman_web::domain::repositories::TokenRepository;
use expman_web::infrastructure::memory::MemoryTokenRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use std::sync::Arc;

/// CLI tool for managing expman-web login tokens.
#[derive(Parser)]
#[command(name = "expman-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage customer login tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new login token
    Create {
        /// Customer key the token logs in as
        #[arg(short, long)]
        customer: Option<i64>,

        /// Custom token value (optional, auto-generated if not provided)
        #[arg(short, long)]
        token: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the CUSTOMER_TOKENS entry for an existing token
    Hash {
        /// Raw token value
        token: String,

        /// Customer key the token logs in as
        #[arg(short, long)]
        customer: i64,
    },

    /// List entries configured in CUSTOMER_TOKENS
    List,

    /// Resolve a token against CUSTOMER_TOKENS
    Verify {
        /// Raw token value
        token: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;
    if secret.is_empty() {
        anyhow::bail!("TOKEN_SIGNING_SECRET must not be empty");
    }

    match cli.command {
        Commands::Token { action } => handle_token_action(action, &secret).await?,
    }

    Ok(())
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, secret: &str) -> Result<()> {
    match action {
        TokenAction::Create {
            customer,
            token,
            yes,
        } => create_token(secret, customer, token, yes)?,
        TokenAction::Hash { token, customer } => {
            print_entry(customer, &hash_token(secret, &token));
        }
        TokenAction::List => list_tokens(configured_repository()?).await?,
        TokenAction::Verify { token } => {
            verify_token(configured_repository()?, secret, &token).await?
        }
    }

    Ok(())
}

/// Builds a repository from `CUSTOMER_TOKENS`.
fn configured_repository() -> Result<Arc<MemoryTokenRepository>> {
    let raw = std::env::var("CUSTOMER_TOKENS").unwrap_or_default();
    let entries = parse_customer_tokens(&raw).context("Failed to parse CUSTOMER_TOKENS")?;
    Ok(Arc::new(MemoryTokenRepository::new(entries)))
}

/// Creates a new login token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for customer key (or use provided)
/// 2. Generate random token or use provided value
/// 3. Display token details with warning
/// 4. Confirm (unless `--yes` flag)
/// 5. Print the `CUSTOMER_TOKENS` entry
///
/// # Security
///
/// - Only the HMAC hash goes into configuration
/// - Raw token is displayed once and cannot be recovered from the hash
/// - Tokens are 48 characters (alphanumeric) for high entropy
fn create_token(
    secret: &str,
    customer: Option<i64>,
    token: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create Login Token".bright_blue().bold());
    println!();

    let customer_key = match customer {
        Some(key) => key,
        None => Input::<i64>::new()
            .with_prompt("Customer key")
            .interact_text()?,
    };

    let token_value = match token {
        Some(t) => {
            println!("{}", "⚠️  Using provided token value".yellow());
            t
        }
        None => {
            let generated = generate_token();
            println!("{}", "✨ Generated new token".green());
            generated
        }
    };

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  Customer: {}", customer_key.to_string().cyan());
    println!("  Token:    {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Issue this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    print_entry(customer_key, &hash_token(secret, &token_value));

    println!("{}", "Log in at:".bright_white());
    println!("  {}", "http://localhost:3000/login".bright_cyan());
    println!();

    Ok(())
}

fn print_entry(customer_key: i64, token_hash: &str) {
    println!();
    println!("{}", "Add this entry to CUSTOMER_TOKENS:".bright_white());
    println!("  {}", format!("{}:{}", customer_key, token_hash).bright_green());
    println!();
}

/// Lists configured token entries.
///
/// # Output Format
///
/// ```text
/// 📋 Login Tokens
///
///   Customer  Hash
///   ──────────────────────────────────────────────────────────────────────────
///   1         3f9a0c...
/// ```
async fn list_tokens(repo: Arc<MemoryTokenRepository>) -> Result<()> {
    println!("{}", "📋 Login Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens configured".yellow());
        println!();
        println!(
            "  Create one with: {} expman-admin -- token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<9} {}",
        "Customer".bright_white().bold(),
        "Hash".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        println!(
            "  {:<9} {}",
            token.customer_key.to_string().cyan(),
            token.token_hash.bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Resolves a raw token the same way the login page does.
async fn verify_token(repo: Arc<MemoryTokenRepository>, secret: &str, token: &str) -> Result<()> {
    println!("{}", "🔍 Verifying token...".bright_blue());

    let auth_service = AuthService::new(repo, secret.to_string());

    match auth_service.authenticate(token).await {
        Ok(customer_key) => println!(
            "{} {}",
            "✅ Token logs in as customer".green().bold(),
            customer_key.to_string().bright_white().bold()
        ),
        Err(e) => println!("{} {}", "❌ Token rejected:".red().bold(), e),
    }

    Ok(())
}

/// Generates a cryptographically random token.
///
/// # Format
///
/// - Length: 48 characters
/// - Character set: A-Z, a-z, 0-9
/// - Entropy: ~286 bits
fn generate_token() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    const TOKEN_LEN: usize = 48;

    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
