//! Roles command - role catalogue.

use anyhow::Result;
use backoffice_client::NewRole;
use clap::{Args, Subcommand};
use console::{Style, style};

use super::{Context, print_json, print_success};

/// Arguments for the roles command.
#[derive(Args, Debug)]
pub struct RolesArgs {
    #[command(subcommand)]
    pub command: Option<RolesCommand>,
}

#[derive(Subcommand, Debug)]
pub enum RolesCommand {
    /// List roles (default)
    List,

    /// Show a specific role
    Show {
        /// Role ID
        id: String,
    },

    /// Create a role
    Create {
        /// Role name
        name: String,
    },
}

/// Run the roles command.
pub async fn run(args: RolesArgs, ctx: &Context) -> Result<()> {
    let roles = ctx.client.roles();

    match args.command.unwrap_or(RolesCommand::List) {
        RolesCommand::List => {
            let list = roles.list().await.map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&list);
            }

            let dim = Style::new().dim();
            println!("{}", style("Roles").bold());
            println!("{}", dim.apply_to("─".repeat(40)));
            if list.is_empty() {
                println!("{}", dim.apply_to("No roles defined"));
            }
            for role in &list {
                match &role.description {
                    Some(desc) => println!(
                        "{} {} {}",
                        dim.apply_to(format!("[{}]", role.id)),
                        role.name,
                        dim.apply_to(desc)
                    ),
                    None => println!("{} {}", dim.apply_to(format!("[{}]", role.id)), role.name),
                }
            }
        }
        RolesCommand::Show { id } => {
            let role = roles.get(&id).await.map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&role);
            }
            println!("{}", style(&role.name).bold());
            println!("  id: {}", role.id);
            if let Some(desc) = &role.description {
                println!("  {}", desc);
            }
        }
        RolesCommand::Create { name } => {
            let role = roles
                .create(NewRole { name })
                .await
                .map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&role);
            }
            print_success(format!("Role created: {} ({})", role.name, role.id));
        }
    }

    Ok(())
}
