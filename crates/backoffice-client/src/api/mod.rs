//! API endpoint implementations.

mod auth;
mod roles;
mod users;

pub use auth::AuthApi;
pub use roles::RolesApi;
pub use users::{UserQuery, UsersApi};

use crate::error::{Error, Result};

/// Check that `id` fits in one path segment.
///
/// Empty IDs and IDs carrying `/`, `?` or `#` are rejected, since they would
/// address a different resource than the one named.
pub fn validate_id(id: &str) -> Result<&str> {
    if id.is_empty() || id.contains(['/', '?', '#']) {
        return Err(Error::InvalidId(id.to_string()));
    }
    Ok(id)
}

/// `/<collection>/<id>` for a validated ID.
pub(crate) fn resource_path(collection: &str, id: &str) -> Result<String> {
    Ok(format!("/{}/{}", collection, validate_id(id)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert_eq!(validate_id("42").unwrap(), "42");
        assert_eq!(validate_id("a-b_c.d").unwrap(), "a-b_c.d");
        for bad in ["", "42/x", "42?admin=1", "42#frag", "../roles"] {
            assert!(matches!(validate_id(bad), Err(Error::InvalidId(_))), "{bad}");
        }
        assert_eq!(resource_path("users", "42").unwrap(), "/users/42");
    }
}
