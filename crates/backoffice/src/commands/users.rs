//! Users command - user management.

use anyhow::{Result, bail};
use backoffice_client::{NewUser, User, UserQuery, UserUpdate, validate_id};
use clap::{Args, Subcommand};
use console::{Style, style};

use super::{Context, print_json, print_success, truncate};

/// Arguments for the users command.
#[derive(Args, Debug)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: Option<UsersCommand>,
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    /// List users (default)
    List {
        /// Page number
        #[arg(short, long)]
        page: Option<u32>,

        /// Page size
        #[arg(short, long)]
        size: Option<u32>,
    },

    /// Show a specific user
    Show {
        /// User ID
        id: String,
    },

    /// Create a user
    Create(CreateUserArgs),

    /// Update fields of a user
    Update {
        /// User ID
        id: String,

        #[command(flatten)]
        fields: UpdateUserArgs,
    },

    /// Delete a user
    Delete {
        /// User ID
        id: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateUserArgs {
    #[arg(long)]
    pub first_name: String,
    #[arg(long)]
    pub middle_name: Option<String>,
    #[arg(long)]
    pub last_name: String,
    #[arg(long)]
    pub mother_maiden_name: Option<String>,
    #[arg(long)]
    pub user_name: Option<String>,
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub date_of_birth: String,
    #[arg(long)]
    pub email: String,
    /// Password hash as expected by the API
    #[arg(long)]
    pub hashed_password: String,
    #[arg(long)]
    pub role_id: String,
}

impl From<CreateUserArgs> for NewUser {
    fn from(args: CreateUserArgs) -> Self {
        NewUser {
            user_name: args.user_name,
            first_name: args.first_name,
            middle_name: args.middle_name,
            last_name: args.last_name,
            mother_maiden_name: args.mother_maiden_name,
            date_of_birth: args.date_of_birth,
            email: args.email,
            hashed_password: args.hashed_password,
            role_id: args.role_id,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateUserArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub middle_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub mother_maiden_name: Option<String>,
    #[arg(long)]
    pub user_name: Option<String>,
    #[arg(long)]
    pub date_of_birth: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub hashed_password: Option<String>,
    #[arg(long)]
    pub role_id: Option<String>,
}

impl From<UpdateUserArgs> for UserUpdate {
    fn from(args: UpdateUserArgs) -> Self {
        UserUpdate {
            user_name: args.user_name,
            first_name: args.first_name,
            middle_name: args.middle_name,
            last_name: args.last_name,
            mother_maiden_name: args.mother_maiden_name,
            date_of_birth: args.date_of_birth,
            email: args.email,
            hashed_password: args.hashed_password,
            role_id: args.role_id,
        }
    }
}

/// Run the users command.
pub async fn run(args: UsersArgs, ctx: &Context) -> Result<()> {
    let cmd = args.command.unwrap_or(UsersCommand::List {
        page: None,
        size: None,
    });
    let users = ctx.client.users();

    match cmd {
        UsersCommand::List { page, size } => {
            ctx.enter("/users")?;
            let result = users
                .list(UserQuery { page, size })
                .await
                .map_err(|e| ctx.api_failure(e))?;

            if ctx.json_output {
                return print_json(&result);
            }

            let dim = Style::new().dim();
            println!("{}", style("Users").bold());
            println!("{}", dim.apply_to("─".repeat(60)));
            if result.items.is_empty() {
                println!("{}", dim.apply_to("No users found"));
            }
            for user in &result.items {
                println!(
                    "{} {} {}",
                    dim.apply_to(format!("[{}]", truncate(&user.id, 12))),
                    truncate(&user.display_name(), 30),
                    dim.apply_to(&user.email)
                );
            }
            println!();
            println!(
                "{}",
                dim.apply_to(format!("{} of {} total", result.items.len(), result.total))
            );
        }
        UsersCommand::Show { id } => {
            validate_id(&id)?;
            ctx.enter(&format!("/users/{}", id))?;
            let user = users.get(&id).await.map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&user);
            }
            print_user(&user);
        }
        UsersCommand::Create(fields) => {
            ctx.enter("/users")?;
            let user = users
                .create(fields.into())
                .await
                .map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&user);
            }
            print_success(format!("User created: {}", user.id));
        }
        UsersCommand::Update { id, fields } => {
            validate_id(&id)?;
            ctx.enter(&format!("/users/{}", id))?;
            let update = UserUpdate::from(fields);
            if update.is_empty() {
                bail!("nothing to update; pass at least one field flag");
            }
            let user = users
                .update(&id, update)
                .await
                .map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&user);
            }
            print_success(format!("User updated: {}", user.id));
        }
        UsersCommand::Delete { id } => {
            validate_id(&id)?;
            ctx.enter("/users")?;
            users.delete(&id).await.map_err(|e| ctx.api_failure(e))?;
            if ctx.json_output {
                return print_json(&serde_json::json!({ "deleted": id }));
            }
            print_success(format!("User deleted: {}", id));
        }
    }

    Ok(())
}

fn print_user(user: &User) {
    let dim = Style::new().dim();
    println!("{}", style(user.display_name()).bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!("  {} {}", dim.apply_to("ID:"), user.id);
    if let Some(name) = &user.user_name {
        println!("  {} {}", dim.apply_to("Username:"), name);
    }
    println!("  {} {}", dim.apply_to("Email:"), user.email);
    println!("  {} {}", dim.apply_to("Born:"), user.date_of_birth);
    match &user.role {
        Some(role) => println!("  {} {} ({})", dim.apply_to("Role:"), role.name, role.id),
        None => println!("  {} {}", dim.apply_to("Role:"), user.role_id),
    }
}
