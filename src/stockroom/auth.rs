//! Login lookup and the admin check.
//!
//! Passwords are stored and compared in plaintext. There is no hashing,
//! lockout or rate limiting; this module only answers "who is this and what
//! role do they have".

use crate::error::{Result, StockroomError};
use crate::model::ADMIN_ROLE;
use crate::store::{StorageBackend, UserStore};
use tracing::{info, warn};

pub struct AuthChecker<'a, B: StorageBackend> {
    users: &'a mut UserStore<B>,
}

impl<'a, B: StorageBackend> AuthChecker<'a, B> {
    pub fn new(users: &'a mut UserStore<B>) -> Self {
        Self { users }
    }

    /// Reload users from storage and return the role of the first user whose
    /// username and password both match exactly.
    pub fn verify_login(&mut self, username: &str, password: &str) -> Result<Option<String>> {
        self.users.load()?;
        let role = self
            .users
            .records()
            .iter()
            .find(|u| u.username == username && u.password == password)
            .map(|u| u.role.clone());

        match &role {
            Some(r) => info!(username, role = %r, "login verified"),
            None => warn!(username, "login rejected"),
        }
        Ok(role)
    }
}

pub fn is_admin(role: &str) -> bool {
    role == ADMIN_ROLE
}

/// Fails with `Unauthorized` unless `role` is the admin role.
pub fn require_admin(role: &str, action: &str) -> Result<()> {
    if is_admin(role) {
        Ok(())
    } else {
        Err(StockroomError::Unauthorized(format!(
            "{} requires the '{}' role (current role: '{}')",
            action, ADMIN_ROLE, role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::record_store::fixtures::{user, user_store};

    #[test]
    fn returns_role_on_exact_match() {
        let mut users = user_store(vec![
            user("U1", "ann", "secret", "admin"),
            user("U2", "bob", "hunter2", "user"),
        ]);
        let mut auth = AuthChecker::new(&mut users);

        assert_eq!(
            auth.verify_login("bob", "hunter2").unwrap(),
            Some("user".to_string())
        );
        assert_eq!(
            auth.verify_login("ann", "secret").unwrap(),
            Some("admin".to_string())
        );
    }

    #[test]
    fn rejects_wrong_password_or_case() {
        let mut users = user_store(vec![user("U1", "ann", "secret", "admin")]);
        let mut auth = AuthChecker::new(&mut users);

        assert_eq!(auth.verify_login("ann", "Secret").unwrap(), None);
        assert_eq!(auth.verify_login("Ann", "secret").unwrap(), None);
        assert_eq!(auth.verify_login("", "").unwrap(), None);
    }

    #[test]
    fn sees_users_written_after_open() {
        let mut users = user_store(vec![]);
        users.backend().overwrite(
            r#"[{"user_id": "U9", "username": "late", "password": "pw", "role": "admin"}]"#,
        );
        let mut auth = AuthChecker::new(&mut users);

        assert_eq!(
            auth.verify_login("late", "pw").unwrap(),
            Some("admin".to_string())
        );
    }

    #[test]
    fn first_matching_user_wins() {
        let mut users = user_store(vec![
            user("U1", "dup", "pw", "user"),
            user("U2", "dup", "pw", "admin"),
        ]);
        let mut auth = AuthChecker::new(&mut users);
        assert_eq!(
            auth.verify_login("dup", "pw").unwrap(),
            Some("user".to_string())
        );
    }

    #[test]
    fn admin_check_is_exact() {
        assert!(require_admin("admin", "Adding products").is_ok());
        assert!(matches!(
            require_admin("Admin", "Adding products"),
            Err(StockroomError::Unauthorized(_))
        ));
        assert!(require_admin("user", "Adding products").is_err());
    }
}
