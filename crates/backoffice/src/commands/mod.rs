//! CLI command handlers.

pub mod auth;
pub mod config;
pub mod open;
pub mod roles;
pub mod status;
pub mod users;

use std::sync::Arc;

use anyhow::{Result, anyhow};
use backoffice_client::ApiClient;
use backoffice_session::{LOGIN_PATH, Navigator, SessionStore};
use console::Style;
use serde::Serialize;

use crate::router::{GuardDecision, Router, redirect_target};

/// Shared context for all commands.
pub struct Context {
    /// Resolved API origin.
    pub api_url: String,
    /// API client; the session is its token source.
    pub client: ApiClient,
    /// The process session.
    pub session: Arc<SessionStore>,
    /// Route table used to guard navigations.
    pub router: Router,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    /// Run the guard for `path`; print the redirect and fail unless allowed.
    pub fn enter(&self, path: &str) -> Result<()> {
        let decision = self.router.navigate(path, &self.session.snapshot());
        if decision.is_allowed() {
            return Ok(());
        }
        print_decision(path, &decision, self.json_output)?;
        Err(anyhow!(
            "navigation to {} was redirected to {}",
            path,
            decision.location().unwrap_or(LOGIN_PATH)
        ))
    }

    /// Turn a client error into a command failure.
    ///
    /// A 401 means the stored token is no longer accepted; the session is
    /// dropped through a forced logout before the error is reported.
    pub fn api_failure(&self, err: backoffice_client::Error) -> anyhow::Error {
        if err.is_unauthorized() {
            self.client.clear_cache();
            if let Err(e) = self.session.force_logout() {
                tracing::warn!(error = %e, "could not clear stored session");
            }
        }
        anyhow::Error::new(err)
    }
}

/// Navigator for the terminal: a hard redirect ends the command and tells the
/// user where to continue.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalNavigator;

impl Navigator for TerminalNavigator {
    fn assign(&self, location: &str) {
        let yellow = Style::new().yellow();
        eprintln!(
            "{} session ended, continue at {} (backoffice login)",
            yellow.apply_to("→"),
            location
        );
    }
}

/// Print a guard decision for `path`.
pub fn print_decision(path: &str, decision: &GuardDecision, json: bool) -> Result<()> {
    if json {
        return print_json(decision);
    }

    let dim = Style::new().dim();
    match decision {
        GuardDecision::Allowed => {
            let green = Style::new().green();
            println!("{} {}", green.apply_to("✓"), path);
        }
        GuardDecision::RedirectLogin { location } => {
            let yellow = Style::new().yellow();
            println!("{} {} → {}", yellow.apply_to("login required:"), path, location);
            if let Some(target) = redirect_target(location) {
                println!(
                    "{}",
                    dim.apply_to(format!("  backoffice login --redirect {}", target))
                );
            }
        }
        GuardDecision::RedirectForbidden { location } => {
            let red = Style::new().red();
            println!("{} {} → {}", red.apply_to("forbidden:"), path, location);
        }
    }
    Ok(())
}

/// Pretty-print any serializable value as JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a green check line.
pub fn print_success(message: impl std::fmt::Display) {
    let green = Style::new().green();
    println!("{} {}", green.apply_to("✓"), message);
}

/// Shorten `s` to `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    let s = s.replace('\n', " ");
    if s.chars().count() <= max_len {
        s
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("line\nbreak", 20), "line break");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("ñandú ñandú", 6), "ñan...");
    }
}
