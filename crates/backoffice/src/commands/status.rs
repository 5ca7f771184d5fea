//! Status command - show session state.

use anyhow::Result;
use console::Style;
use serde::Serialize;

use super::{Context, print_json};

#[derive(Serialize)]
struct StatusOutput {
    api_url: String,
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user: Option<String>,
}

/// Run the status command. Purely local; no request is made.
pub async fn run(ctx: &Context) -> Result<()> {
    let session = ctx.session.snapshot();
    let user = match ctx.session.last_user() {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(error = %e, "stored user unreadable");
            None
        }
    };

    let output = StatusOutput {
        api_url: ctx.api_url.clone(),
        authenticated: session.is_authenticated(),
        role: session.role.clone(),
        user: user.as_ref().map(|u| u.display_name()),
    };

    if ctx.json_output {
        return print_json(&output);
    }

    let dim = Style::new().dim();
    println!("API:     {}", output.api_url);
    if output.authenticated {
        let green = Style::new().green();
        println!("Session: {}", green.apply_to("signed in"));
        match &output.role {
            Some(role) => println!("Role:    {}", role),
            None => println!("Role:    {}", dim.apply_to("none")),
        }
        if let Some(user) = &output.user {
            println!("User:    {}", user);
        }
    } else {
        let yellow = Style::new().yellow();
        println!("Session: {}", yellow.apply_to("signed out"));
        println!("{}", dim.apply_to("  backoffice login <username-or-email>"));
    }

    Ok(())
}
