// src/services/auth_service.rs
use crate::models::user::User;

/// Finds the account whose username and password both match exactly.
///
/// Accounts without a stored password can never log in.
pub fn authenticate<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    let found = users
        .iter()
        .find(|u| u.username == username && u.password.as_deref() == Some(password));
    match found {
        Some(user) => tracing::debug!("Credentials matched user {}", user.id),
        None => tracing::debug!("No account matches username '{}'", username),
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use crate::services::store::tests::user;

    #[test]
    fn requires_exact_username_and_password() {
        let users = vec![user("1", Role::Admin, None)];
        assert!(authenticate(&users, "user-1", "secret").is_some());
        assert!(authenticate(&users, "USER-1", "secret").is_none());
        assert!(authenticate(&users, "user-1", "secret ").is_none());
        assert!(authenticate(&users, "user-2", "secret").is_none());
    }

    #[test]
    fn account_without_password_cannot_log_in() {
        let mut nopw = user("1", Role::Student, None);
        nopw.password = None;
        assert!(authenticate(&[nopw], "user-1", "").is_none());
    }
}
