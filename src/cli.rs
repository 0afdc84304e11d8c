use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// SetDoc AI — administrative console for tenants, prompts and billing
#[derive(Parser)]
#[command(name = "setdoc-admin", version, about)]
pub struct Cli {
    /// Administrator API key
    #[arg(long, env = "SETDOC_ADMIN_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the admin API (overrides SETDOC_API_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Verify that the key is a valid administrator key
    Login,

    /// Manage tenant accounts (cartórios)
    Accounts {
        #[command(subcommand)]
        command: AccountCommands,
    },

    /// Manage the users of an account
    Users {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage the prompt catalog
    Prompts {
        #[command(subcommand)]
        command: PromptCommands,
    },

    /// Manage per-account prompt permissions
    Permissions {
        #[command(subcommand)]
        command: PermissionCommands,
    },

    /// Billing reports and spreadsheet export
    Billing {
        #[command(subcommand)]
        command: BillingCommands,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// List all accounts
    List,
    /// Create a new account
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cod_tri7: Option<String>,
        #[arg(long)]
        cidade: Option<String>,
        #[arg(long)]
        uf: Option<String>,
    },
    /// Reactivate an account
    Activate {
        account_id: i64,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Deactivate an account
    Deactivate {
        account_id: i64,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List the users of an account
    List {
        #[arg(long)]
        account: i64,
    },
    /// Create a user; their API key is printed exactly once
    Create {
        #[arg(long)]
        account: i64,
        #[arg(long)]
        full_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Reactivate a user
    Activate {
        user_id: i64,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Deactivate a user
    Deactivate {
        user_id: i64,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
    /// Replace a user's API key; the new key is printed exactly once
    RegenerateKey {
        user_id: i64,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PromptCommands {
    /// List the prompt catalog
    List,
    /// Add a prompt to the catalog
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },
    /// Replace a prompt's name and text
    Update {
        prompt_id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        text: String,
    },
    /// Remove a prompt from the catalog
    Delete {
        prompt_id: i64,
        /// Skip the interactive confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum PermissionCommands {
    /// Show which prompts an account may use
    Get {
        #[arg(long)]
        account: i64,
    },
    /// Replace the account's permitted prompts with exactly this set
    Set {
        #[arg(long)]
        account: i64,
        #[arg(long, value_delimiter = ',')]
        prompt_ids: Vec<i64>,
    },
}

#[derive(Subcommand)]
pub enum BillingCommands {
    /// Aggregated report for a period
    Report {
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        #[arg(long)]
        account: Option<i64>,
    },
    /// Write the per-job breakdown of an account as CSV
    Export {
        #[arg(long)]
        account: i64,
        #[arg(long)]
        start: NaiveDate,
        #[arg(long)]
        end: NaiveDate,
        /// Output file
        #[arg(long)]
        out: PathBuf,
    },
}
