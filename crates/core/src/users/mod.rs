//! Users module - accounts, credentials and sessions.

mod users_model;
mod users_service;
mod users_traits;

pub use users_model::{
    normalize_email, require_session, Credentials, NewUser, SessionUser, SignUp, User,
};
pub use users_service::{validate_sign_up, UserService};
pub use users_traits::{PasswordHasherTrait, UserRepositoryTrait, UserServiceTrait};
