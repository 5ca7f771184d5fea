//! Auth commands - login, registration and logout.

use anyhow::{Result, anyhow};
use backoffice_client::RegisterRequest;
use clap::Args;
use console::Style;

use super::{Context, print_decision, print_json, print_success};
use crate::login::LoginFlow;

/// Arguments for the login command.
#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Username or email
    pub username_or_email: String,

    /// Password (prompted when omitted)
    #[arg(short, long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Path to continue to after signing in
    #[arg(long)]
    pub redirect: Option<String>,
}

/// Arguments for the register command.
#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Username or email for the new account
    pub username_or_email: String,

    /// Display name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Password (prompted when omitted)
    #[arg(short, long, env = "BACKOFFICE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

fn password_or_prompt(password: Option<String>) -> Result<String> {
    match password {
        Some(password) => Ok(password),
        None => Ok(rpassword::prompt_password("Password: ")?),
    }
}

/// Run the login command.
pub async fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let password = password_or_prompt(args.password)?;
    let flow = LoginFlow::new(ctx.client.clone(), ctx.session.clone());

    match flow.submit(&args.username_or_email, &password).await {
        Ok(response) => {
            if ctx.json_output {
                print_json(&response)?;
            } else {
                let who = response
                    .user
                    .as_ref()
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| args.username_or_email.clone());
                print_success(format!("Signed in as {}", who));
                if let Some(role) = ctx.session.role() {
                    let dim = Style::new().dim();
                    println!("{}", dim.apply_to(format!("  role: {}", role)));
                }
                if response.token.is_none() {
                    eprintln!("warning: server returned no token; session unchanged");
                }
            }

            if let Some(target) = args.redirect {
                let decision = ctx.router.navigate(&target, &ctx.session.snapshot());
                print_decision(&target, &decision, ctx.json_output)?;
            }
            Ok(())
        }
        Err(err) => {
            let message = flow.error().unwrap_or_else(|| err.to_string());
            let red = Style::new().red();
            eprintln!("{} {}", red.apply_to("Error:"), message);
            if ctx.verbose {
                eprintln!("  {}", err);
            }
            Err(anyhow!(message))
        }
    }
}

/// Run the register command.
pub async fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let password = password_or_prompt(args.password)?;
    let response = ctx
        .client
        .auth()
        .register(RegisterRequest {
            username_or_email: args.username_or_email.clone(),
            password,
            name: args.name,
        })
        .await?;

    if ctx.json_output {
        print_json(&response)?;
    } else {
        print_success(format!("Registered {}", args.username_or_email));
        println!("Sign in with: backoffice login {}", args.username_or_email);
    }
    Ok(())
}

/// Run the logout command.
pub async fn logout(ctx: &Context) -> Result<()> {
    let was_signed_in = ctx.session.is_authenticated();
    ctx.session.set_token(None)?;
    ctx.session.set_role(None)?;
    ctx.client.clear_cache();

    if ctx.json_output {
        print_json(&serde_json::json!({ "signed_out": was_signed_in }))?;
    } else if was_signed_in {
        print_success("Signed out");
    } else {
        println!("Not signed in.");
    }
    Ok(())
}
