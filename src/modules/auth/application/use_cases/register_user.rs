use std::sync::{Arc, LazyLock};

use async_trait::async_trait;
use regex::Regex;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::{
    CreateUserData, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 50;
pub const PASSWORD_MIN_LEN: usize = 6;

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-()]{8,}$").expect("phone pattern is valid"));

// ========================= Register Input =========================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterInputError {
    #[error("Username must be between 3 and 50 characters")]
    UsernameLength,

    #[error("Invalid phone number format")]
    InvalidPhone,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Registration form that has passed validation.
#[derive(Debug, Clone)]
pub struct RegisterUserInput {
    username: String,
    phone: String,
    password: String,
}

impl RegisterUserInput {
    pub fn new(
        username: String,
        phone: String,
        password: String,
        confirm_password: String,
    ) -> Result<Self, RegisterInputError> {
        let username = username.trim().to_string();
        let len = username.chars().count();
        if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
            return Err(RegisterInputError::UsernameLength);
        }

        let phone = phone.trim().to_string();
        if !PHONE_PATTERN.is_match(&phone) {
            return Err(RegisterInputError::InvalidPhone);
        }

        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(RegisterInputError::PasswordTooShort);
        }

        if password != confirm_password {
            return Err(RegisterInputError::PasswordMismatch);
        }

        Ok(Self {
            username,
            phone,
            password,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ========================= Register Error =========================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

// ========================= Use Case =========================

#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(&self, input: RegisterUserInput) -> Result<User, RegisterUserError>;
}

#[derive(Clone)]
pub struct RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
}

impl<Q, R> RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    pub fn new(
        query: Q,
        repository: R,
        password_hasher: Arc<dyn PasswordHasher + Send + Sync>,
    ) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<Q, R> IRegisterUserUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, input: RegisterUserInput) -> Result<User, RegisterUserError> {
        let existing = self
            .query
            .find_by_username(input.username())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;

        if existing.is_some() {
            return Err(RegisterUserError::UsernameTaken);
        }

        let password_hash = self
            .password_hasher
            .hash_password(input.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let data = CreateUserData {
            username: input.username().to_string(),
            phone: input.phone().to_string(),
            password_hash,
            is_admin: false,
        };

        // The unique index still catches a concurrent registration of the same name.
        self.repository
            .create_user(data)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => RegisterUserError::UsernameTaken,
                other => RegisterUserError::RepositoryError(other.to_string()),
            })
    }
}
