use std::sync::Arc;

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::{info, warn};
use regex::Regex;

use super::users_model::{normalize_email, Credentials, NewUser, SignUp, User};
use super::users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
use crate::constants::{MIN_PASSWORD_LENGTH, MIN_USER_NAME_LENGTH};
use crate::errors::{Error, FieldErrors, Result};

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern");
}

/// Checks a sign-up form, returning all field errors at once.
pub fn validate_sign_up(sign_up: &SignUp) -> Result<()> {
    let mut errors = FieldErrors::new();

    if sign_up.name.trim().chars().count() < MIN_USER_NAME_LENGTH {
        errors.add("name", "Name must be at least 2 characters");
    }
    if !EMAIL_REGEX.is_match(sign_up.email.trim()) {
        errors.add("email", "Invalid email address");
    }
    if sign_up.password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add("password", "Password must be at least 8 characters");
    }
    if sign_up.password != sign_up.confirm_password {
        errors.add("confirmPassword", "Passwords don't match");
    }

    errors.into_result()
}

/// Credentials-based user registration and login.
pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    hasher: Arc<dyn PasswordHasherTrait>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        hasher: Arc<dyn PasswordHasherTrait>,
    ) -> Self {
        UserService { user_repo, hasher }
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    async fn register(&self, sign_up: SignUp) -> Result<User> {
        validate_sign_up(&sign_up)?;

        let email = normalize_email(&sign_up.email);
        if self.user_repo.find_by_email(&email)?.is_some() {
            return Err(Error::Conflict("User with this email already exists".to_string()));
        }

        let password_hash = self.hasher.hash_password(&sign_up.password)?;
        let user = self
            .user_repo
            .insert_user(NewUser {
                name: sign_up.name.trim().to_string(),
                email,
                image: None,
                password_hash: Some(password_hash),
            })
            .await?;
        info!("Registered user {}", user.id);
        Ok(user)
    }

    fn authenticate(&self, credentials: &Credentials) -> Result<User> {
        let email = normalize_email(&credentials.email);
        let user = self
            .user_repo
            .find_by_email(&email)?
            .ok_or(Error::Unauthenticated)?;

        // Accounts created through an external provider have no password.
        let Some(hash) = user.password_hash.as_deref() else {
            warn!("Password login attempted for passwordless user {}", user.id);
            return Err(Error::Unauthenticated);
        };

        if self.hasher.verify_password(&credentials.password, hash)? {
            Ok(user)
        } else {
            Err(Error::Unauthenticated)
        }
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.user_repo
            .find_by_id(user_id)?
            .ok_or_else(|| Error::not_found("User"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goals::testing::fixed_now;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryUsers {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepositoryTrait for MemoryUsers {
        fn find_by_id(&self, user_id: &str) -> Result<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.id == user_id).cloned())
        }

        fn find_by_email(&self, email: &str) -> Result<Option<User>> {
            Ok(self.users.lock().unwrap().iter().find(|u| u.email == email).cloned())
        }

        async fn insert_user(&self, new_user: NewUser) -> Result<User> {
            let mut users = self.users.lock().unwrap();
            let user = User {
                id: format!("user-{}", users.len() + 1),
                name: new_user.name,
                email: new_user.email,
                image: new_user.image,
                password_hash: new_user.password_hash,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            };
            users.push(user.clone());
            Ok(user)
        }
    }

    /// Reversible "hash" for tests.
    struct PlainHasher;

    impl PasswordHasherTrait for PlainHasher {
        fn hash_password(&self, password: &str) -> Result<String> {
            Ok(format!("plain:{}", password))
        }

        fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
            Ok(password_hash == format!("plain:{}", password))
        }
    }

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUsers::default()), Arc::new(PlainHasher))
    }

    fn sign_up(email: &str) -> SignUp {
        SignUp {
            name: "Ana".to_string(),
            email: email.to_string(),
            password: "supersecret".to_string(),
            confirm_password: "supersecret".to_string(),
        }
    }

    #[test]
    fn test_validate_sign_up_reports_every_field() {
        let err = validate_sign_up(&SignUp {
            name: "A".to_string(),
            email: "not-an-email".to_string(),
            password: "short".to_string(),
            confirm_password: "other".to_string(),
        })
        .unwrap_err();
        let fields = err.field_errors().unwrap();
        assert_eq!(fields.len(), 4);
        assert!(fields.get("confirmPassword").is_some());
    }

    #[tokio::test]
    async fn test_register_and_authenticate() {
        let service = service();
        let user = service.register(sign_up(" Ana@Example.com ")).await.unwrap();
        assert_eq!(user.email, "ana@example.com");

        let found = service
            .authenticate(&Credentials {
                email: "ANA@example.com".to_string(),
                password: "supersecret".to_string(),
            })
            .unwrap();
        assert_eq!(found.id, user.id);

        let err = service
            .authenticate(&Credentials {
                email: "ana@example.com".to_string(),
                password: "wrong-password".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let service = service();
        service.register(sign_up("ana@example.com")).await.unwrap();
        let err = service.register(sign_up("ANA@example.com")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_unknown_email_is_unauthenticated() {
        let err = service()
            .authenticate(&Credentials {
                email: "ghost@example.com".to_string(),
                password: "whatever1".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, Error::Unauthenticated));
    }
}
