use clap::Subcommand;
use serde_json::json;

use crate::api::auth::{self, RegisterForm};
use crate::cli::utils::{output_success, resolve_password};
use crate::cli::{Context, OutputFormat};
use crate::session::FileTokenStore;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Login and store the session token")]
    Login {
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Register new user")]
    Register {
        #[arg(help = "Full name")]
        full_name: String,
        #[arg(help = "Email")]
        email: String,
        #[arg(long, help = "Password (will prompt twice if not provided)")]
        password: Option<String>,
    },

    #[command(about = "Logout and forget the session token")]
    Logout,

    #[command(about = "Show current authentication status")]
    Status,
}

pub async fn handle(cmd: AuthCommands, ctx: &Context, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Login { email, password } => {
            let password = resolve_password(password, "Password")?;
            auth::login(&ctx.client, &email, &password).await?;
            output_success(
                &output_format,
                &format!("Logged in as {}", email),
                Some(json!({ "redirect_to": ctx.config.routes.home_path })),
            )
        }
        AuthCommands::Register { full_name, email, password } => {
            let (password, confirm_password) = match password {
                Some(password) => (password.clone(), password),
                None => (
                    resolve_password(None, "Password")?,
                    resolve_password(None, "Confirm password")?,
                ),
            };

            let form = RegisterForm {
                full_name,
                email,
                password,
                confirm_password,
            };
            auth::register(&ctx.client, &form).await?;

            output_success(
                &output_format,
                "Registration successful. You can now log in.",
                Some(json!({ "redirect_to": ctx.config.routes.login_path })),
            )
        }
        AuthCommands::Logout => {
            let navigation = auth::logout(ctx.store.as_ref(), &ctx.config);
            output_success(
                &output_format,
                "Logged out",
                Some(json!({ "redirect_to": navigation.path })),
            )
        }
        AuthCommands::Status => {
            let saved_at = FileTokenStore::new(ctx.config.session_file())
                .load()
                .map(|session| session.saved_at);

            match (ctx.store.has_token(), output_format) {
                (true, OutputFormat::Json) => output_success(
                    &OutputFormat::Json,
                    "Authenticated",
                    Some(json!({ "authenticated": true, "saved_at": saved_at, "api_url": ctx.client.base_url() })),
                ),
                (false, OutputFormat::Json) => output_success(
                    &OutputFormat::Json,
                    "Not authenticated",
                    Some(json!({ "authenticated": false, "api_url": ctx.client.base_url() })),
                ),
                (true, OutputFormat::Text) => {
                    println!("Authenticated against {}", ctx.client.base_url());
                    if let Some(saved_at) = saved_at {
                        println!("Token saved: {}", saved_at.to_rfc3339());
                    }
                    Ok(())
                }
                (false, OutputFormat::Text) => {
                    println!("Not authenticated. Run `crm auth login <email>`.");
                    Ok(())
                }
            }
        }
    }
}
