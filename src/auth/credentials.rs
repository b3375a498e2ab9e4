//! The admin credentials that the log-in form is checked against.

use crate::{Error, auth::PasswordHash};

/// The single admin account, supplied by the server configuration.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    user_id: String,
    password_hash: PasswordHash,
}

impl AdminCredentials {
    /// Create credentials for the admin with `user_id` whose password hashes to `password_hash`.
    pub fn new(user_id: &str, password_hash: PasswordHash) -> Self {
        Self {
            user_id: user_id.to_owned(),
            password_hash,
        }
    }

    /// Check a user ID and password entered in the log-in form.
    ///
    /// The user ID must match exactly. The password is checked against the
    /// hash, so the plaintext password never needs to be stored.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if the configured hash is malformed.
    pub fn verify(&self, user_id: &str, password: &str) -> Result<bool, Error> {
        // Always check the password so that a wrong user ID takes as long as a wrong password.
        let is_password_valid = self.password_hash.verify(password)?;

        Ok(is_password_valid && user_id == self.user_id)
    }
}

#[cfg(test)]
mod admin_credentials_tests {
    use crate::{AdminCredentials, PasswordHash};

    fn credentials() -> AdminCredentials {
        // Hash of "okon".
        AdminCredentials::new(
            "srtm",
            PasswordHash::new_unchecked(
                "$2b$12$Gwf0uvxH3L7JLfo0CC/NCOoijK2vQ/wbgP.LeNup8vj6gg31IiFkm",
            ),
        )
    }

    #[test]
    fn accepts_matching_pair() {
        assert_eq!(credentials().verify("srtm", "okon"), Ok(true));
    }

    #[test]
    fn rejects_wrong_password() {
        assert_eq!(credentials().verify("srtm", "nope"), Ok(false));
    }

    #[test]
    fn rejects_wrong_user_id() {
        assert_eq!(credentials().verify("SRTM", "okon"), Ok(false));
        assert_eq!(credentials().verify("", "okon"), Ok(false));
    }
}
