use serde::{Deserialize, Serialize};

pub type UserId = i32;

/// Role given to every self-registered user. Roles are free text and never checked.
pub const DEFAULT_ROLE: &str = "author";

/// User entity - a registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Hashed credential, never the plaintext.
    pub password: String,
    pub role: String,
}

/// Insert payload for a user; the id is assigned by storage.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl NewUser {
    /// Build an author account from an already hashed password.
    pub fn author(username: String, password_hash: String) -> Self {
        Self {
            username,
            password: password_hash,
            role: DEFAULT_ROLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_author_gets_default_role() {
        let user = NewUser::author("alice".to_string(), "hash".to_string());

        assert_eq!(user.role, DEFAULT_ROLE);
        assert_eq!(user.password, "hash");
    }
}
