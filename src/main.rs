use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use setdoc_admin::cli::{
    AccountCommands, BillingCommands, Cli, Commands, PermissionCommands, PromptCommands,
    UserCommands,
};
use setdoc_admin::config;
use setdoc_admin::export;
use setdoc_admin::gate::DestructiveAction;
use setdoc_admin::models::{NewAccount, NewUser, PermissionSet, PromptBody, ReportQuery};
use setdoc_admin::panel::AdminPanel;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "setdoc_admin=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut cfg = config::load()?;
    let args = Cli::parse();

    if let Some(url) = args.base_url {
        config::validate_api_url(&url)?;
        cfg.api_url = url;
    }
    let key = args
        .api_key
        .context("no API key: pass --api-key or set SETDOC_ADMIN_KEY")?;

    // Each CLI invocation is one operator session: the probe is the login.
    let mut panel = AdminPanel::new(cfg);
    panel.login(&key).await?;

    match args.command {
        Commands::Login => {
            println!("API key accepted: administrator access confirmed.");
        }
        Commands::Accounts { command } => handle_accounts_command(&mut panel, command).await?,
        Commands::Users { command } => handle_users_command(&mut panel, command).await?,
        Commands::Prompts { command } => handle_prompts_command(&mut panel, command).await?,
        Commands::Permissions { command } => {
            handle_permissions_command(&mut panel, command).await?
        }
        Commands::Billing { command } => handle_billing_command(&mut panel, command).await?,
    }

    Ok(())
}

async fn handle_accounts_command(
    panel: &mut AdminPanel,
    command: AccountCommands,
) -> anyhow::Result<()> {
    match command {
        AccountCommands::List => {
            let accounts = panel.accounts().await?;
            println!("{:<6} {:<32} {:<8} {}", "ID", "NAME", "ACTIVE", "CREATED");
            for acc in accounts {
                println!(
                    "{:<6} {:<32} {:<8} {}",
                    acc.id,
                    acc.name,
                    acc.is_active,
                    acc.created_at.date_naive()
                );
            }
        }
        AccountCommands::Create {
            name,
            cod_tri7,
            cidade,
            uf,
        } => {
            let account = panel
                .create_account(NewAccount {
                    name,
                    cod_tri7,
                    cidade,
                    uf,
                })
                .await?;
            println!("Created account {} ({}).", account.id, account.name);
        }
        AccountCommands::Activate { account_id, yes } => {
            run_destructive(
                panel,
                DestructiveAction::SetAccountStatus {
                    account_id,
                    active: true,
                },
                yes,
            )
            .await?;
        }
        AccountCommands::Deactivate { account_id, yes } => {
            run_destructive(
                panel,
                DestructiveAction::SetAccountStatus {
                    account_id,
                    active: false,
                },
                yes,
            )
            .await?;
        }
    }
    Ok(())
}

async fn handle_users_command(panel: &mut AdminPanel, command: UserCommands) -> anyhow::Result<()> {
    match command {
        UserCommands::List { account } => {
            let users = panel.users(account).await?;
            println!("{:<6} {:<28} {:<32} {}", "ID", "NAME", "EMAIL", "ACTIVE");
            for user in users {
                println!(
                    "{:<6} {:<28} {:<32} {}",
                    user.id, user.full_name, user.email, user.is_active
                );
            }
        }
        UserCommands::Create {
            account,
            full_name,
            email,
            password,
        } => {
            let user = panel
                .create_user(NewUser {
                    full_name,
                    email,
                    password,
                    account_id: account,
                })
                .await?;
            println!("Created user {} ({}).", user.id, user.full_name);
            print_issued_secret(panel);
        }
        UserCommands::Activate { user_id, yes } => {
            run_destructive(
                panel,
                DestructiveAction::SetUserStatus {
                    user_id,
                    active: true,
                },
                yes,
            )
            .await?;
        }
        UserCommands::Deactivate { user_id, yes } => {
            run_destructive(
                panel,
                DestructiveAction::SetUserStatus {
                    user_id,
                    active: false,
                },
                yes,
            )
            .await?;
        }
        UserCommands::RegenerateKey { user_id, yes } => {
            run_destructive(panel, DestructiveAction::RegenerateApiKey { user_id }, yes).await?;
        }
    }
    Ok(())
}

async fn handle_prompts_command(
    panel: &mut AdminPanel,
    command: PromptCommands,
) -> anyhow::Result<()> {
    match command {
        PromptCommands::List => {
            let prompts = panel.prompts().await?;
            for prompt in prompts {
                println!("[{}] {}", prompt.id, prompt.name);
            }
        }
        PromptCommands::Create { name, text } => {
            let prompt = panel
                .create_prompt(PromptBody {
                    name,
                    prompt_text: text,
                })
                .await?;
            println!("Created prompt {} ({}).", prompt.id, prompt.name);
        }
        PromptCommands::Update {
            prompt_id,
            name,
            text,
        } => {
            panel
                .update_prompt(
                    prompt_id,
                    PromptBody {
                        name,
                        prompt_text: text,
                    },
                )
                .await?;
            println!("Updated prompt {prompt_id}.");
        }
        PromptCommands::Delete { prompt_id, yes } => {
            run_destructive(panel, DestructiveAction::DeletePrompt { prompt_id }, yes).await?;
        }
    }
    Ok(())
}

async fn handle_permissions_command(
    panel: &mut AdminPanel,
    command: PermissionCommands,
) -> anyhow::Result<()> {
    match command {
        PermissionCommands::Get { account } => {
            let permissions = panel.permissions(account).await?;
            if permissions.prompt_ids.is_empty() {
                println!("Account {account} has no permitted prompts.");
            } else {
                let ids: Vec<String> = permissions
                    .prompt_ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect();
                println!("Account {account} may use prompts: {}.", ids.join(", "));
            }
        }
        PermissionCommands::Set {
            account,
            prompt_ids,
        } => {
            let count = prompt_ids.len();
            panel
                .sync_permissions(account, PermissionSet::new(prompt_ids))
                .await?;
            println!("Account {account} now has exactly {count} permitted prompts.");
        }
    }
    Ok(())
}

async fn handle_billing_command(
    panel: &mut AdminPanel,
    command: BillingCommands,
) -> anyhow::Result<()> {
    match command {
        BillingCommands::Report {
            start,
            end,
            account,
        } => {
            let query = ReportQuery {
                start_date: start,
                end_date: end,
                account_id: account,
            };
            let report = panel.billing_report(&query).await?;
            println!("Period {start} to {end}");
            println!("  total jobs:   {}", report.summary.total_jobs);
            println!("  total tokens: {}", report.summary.total_tokens);
            if !report.by_model.is_empty() {
                println!("{:<24} {:>10} {:>14}", "MODEL", "JOBS", "TOKENS");
                for row in report.by_model {
                    println!(
                        "{:<24} {:>10} {:>14}",
                        row.model_name, row.total_jobs, row.total_tokens
                    );
                }
            }
        }
        BillingCommands::Export {
            account,
            start,
            end,
            out,
        } => {
            let query = ReportQuery {
                start_date: start,
                end_date: end,
                account_id: Some(account),
            };
            let report = panel.detailed_billing_report(&query).await?;
            let bytes = export::billing_csv(&report.breakdown)?;
            std::fs::write(&out, bytes)
                .with_context(|| format!("could not write {}", out.display()))?;
            println!(
                "Wrote {} job rows to {}.",
                report.breakdown.len(),
                out.display()
            );
        }
    }
    Ok(())
}

/// Arm the gate, ask the operator for the second acknowledgement (unless
/// `--yes` was given), then confirm or cancel.
async fn run_destructive(
    panel: &mut AdminPanel,
    action: DestructiveAction,
    assume_yes: bool,
) -> anyhow::Result<()> {
    let label = panel.arm(action).label.clone();

    if !assume_yes && !ask_confirmation(&label)? {
        panel.cancel();
        println!("Cancelled: {label}.");
        return Ok(());
    }

    panel.confirm().await?;
    println!("Done: {label}.");
    print_issued_secret(panel);
    Ok(())
}

fn ask_confirmation(label: &str) -> anyhow::Result<bool> {
    print!("About to {label}. Proceed? [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

/// Print a just-issued key exactly once; the session forgets it here.
fn print_issued_secret(panel: &mut AdminPanel) {
    if let Some(issued) = panel.take_issued_secret() {
        println!("New API key for {}:", issued.label);
        println!("  {}", issued.secret.expose());
        println!("Copy it now — it will not be shown again.");
    }
}
