use async_trait::async_trait;

use crate::errors::Result;
use crate::users::users_model::{Credentials, NewUser, SignUp, User};

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_id(&self, user_id: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert_user(&self, new_user: NewUser) -> Result<User>;
}

/// Password hashing capability, provided by the host.
pub trait PasswordHasherTrait: Send + Sync {
    fn hash_password(&self, password: &str) -> Result<String>;
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, sign_up: SignUp) -> Result<User>;
    fn authenticate(&self, credentials: &Credentials) -> Result<User>;
    fn get_user(&self, user_id: &str) -> Result<User>;
}
