//! Open command - run the navigation guard for a path.

use anyhow::Result;
use clap::Args;

use super::{Context, print_decision};

/// Arguments for the open command.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Full path, including any query string (e.g., /users?page=2)
    pub path: String,
}

/// Run the open command.
///
/// Prints where the navigation ends up. A redirect is a normal outcome here,
/// not a failure.
pub async fn run(args: OpenArgs, ctx: &Context) -> Result<()> {
    let path = if args.path.starts_with('/') {
        args.path
    } else {
        format!("/{}", args.path)
    };

    if ctx.verbose {
        match ctx.router.resolve(&path) {
            Some(route) => eprintln!("route: {} ({})", route.name, route.pattern),
            None => eprintln!("route: none"),
        }
    }

    let decision = ctx.router.navigate(&path, &ctx.session.snapshot());
    print_decision(&path, &decision, ctx.json_output)
}
