use sha2::{Digest, Sha256};

use crate::domain::User;
use crate::storage::Repository;

use super::IdentityError;

/// One-way password digest: hex-encoded SHA-256 over the UTF-8 bytes
/// (64 hex chars). Unsalted, matching the snapshot format this tool reads
/// and writes; a free function so the primitive can be swapped in one
/// place.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Identity store: user records plus the current session. Owns its state,
/// loaded from the repository at construction; every successful mutation
/// persists before returning.
pub struct IdentityService {
    repo: Repository,
    users: Vec<User>,
    session: Option<User>,
}

impl IdentityService {
    /// Load users and session from the repository.
    pub fn open(repo: Repository) -> Result<Self, IdentityError> {
        let users = repo.load_users()?;
        let session = repo.load_session()?;
        Ok(Self {
            repo,
            users,
            session,
        })
    }

    /// Register a new user. Usernames are unique, case-sensitive.
    /// Registration does not log the user in.
    pub fn register(
        &mut self,
        username: &str,
        password: &str,
        full_name: &str,
    ) -> Result<User, IdentityError> {
        if self.users.iter().any(|u| u.username == username) {
            return Err(IdentityError::DuplicateUsername(username.to_string()));
        }

        let user = User::new(username, full_name, hash_password(password));
        self.users.push(user.clone());
        self.repo.save_users(&self.users)?;
        Ok(user)
    }

    /// Authenticate and set the session. Unknown user and wrong password
    /// are indistinguishable to the caller.
    pub fn login(&mut self, username: &str, password: &str) -> Result<User, IdentityError> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username)
            .ok_or(IdentityError::InvalidCredentials)?;

        if user.password_hash != hash_password(password) {
            return Err(IdentityError::InvalidCredentials);
        }

        let user = user.clone();
        self.session = Some(user.clone());
        self.repo.save_session(self.session.as_ref())?;
        Ok(user)
    }

    /// Clear the session.
    pub fn logout(&mut self) -> Result<(), IdentityError> {
        self.session = None;
        self.repo.save_session(None)?;
        Ok(())
    }

    /// The currently authenticated user, if any.
    pub fn current_user(&self) -> Option<&User> {
        self.session.as_ref()
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }
}
