//! Account operations: register, login, and current profile.

use std::sync::Arc;

use tracing::{info, warn};
use validator::ValidateEmail;

use inspecthub_auth::jwt::{IssuedToken, JwtEncoder};
use inspecthub_auth::password::PasswordHasher;
use inspecthub_auth::rbac::{Operation, require};
use inspecthub_auth::Identity;
use inspecthub_core::error::AppError;
use inspecthub_core::result::AppResult;
use inspecthub_core::traits::clock::Clock;
use inspecthub_database::store::UserStore;
use inspecthub_entity::user::model::normalize_email;
use inspecthub_entity::user::{CreateUser, User, UserRole};

/// Message shared by both login failure causes.
const INVALID_CREDENTIALS: &str = "Incorrect email or password";

/// Raw registration input, as received at the boundary.
#[derive(Debug, Clone)]
pub struct Registration {
    /// Display name.
    pub name: String,
    /// Login email.
    pub email: String,
    /// Plaintext password.
    pub password: String,
    /// Requested role, parsed here into [`UserRole`].
    pub role: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// The signed session token and its expiry.
    pub token: IssuedToken,
    /// The authenticated account.
    pub user: User,
}

/// Handles account creation and credential checks.
#[derive(Debug, Clone)]
pub struct AccountService {
    users: Arc<dyn UserStore>,
    hasher: Arc<PasswordHasher>,
    encoder: Arc<JwtEncoder>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            hasher,
            encoder,
            clock,
        }
    }

    /// Registers a new customer or pilot.
    ///
    /// The role string is parsed here, so no other role value ever reaches
    /// storage. A taken email is a validation error.
    pub async fn register(&self, input: Registration) -> AppResult<User> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Name must not be empty"));
        }

        let email = normalize_email(&input.email);
        if !email.validate_email() {
            return Err(AppError::validation("Invalid email format"));
        }
        if input.password.is_empty() {
            return Err(AppError::validation("Password must not be empty"));
        }

        let role: UserRole = input.role.parse()?;

        if self.users.find_user_by_email(&email).await?.is_some() {
            return Err(AppError::validation("Email already registered"));
        }

        let password_hash = self.hasher.hash_password(&input.password)?;
        let user = CreateUser {
            name: name.to_string(),
            email,
            password_hash,
            role,
        }
        .into_user(self.clock.now());

        let user = self.users.create_user(user).await?;
        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    /// Verifies credentials and issues a session token.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<LoginOutcome> {
        let email = normalize_email(email);
        let Some(user) = self.users.find_user_by_email(&email).await? else {
            warn!("Login failed: unknown email");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        };

        if !self.hasher.verify_password(password, &user.password_hash) {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(AppError::invalid_credentials(INVALID_CREDENTIALS));
        }

        let token = self.encoder.issue(user.id, &user.email, user.role)?;
        info!(user_id = %user.id, expires_at = %token.expires_at, "User logged in");
        Ok(LoginOutcome { token, user })
    }

    /// Returns the caller's own account.
    pub async fn me(&self, identity: &Identity) -> AppResult<User> {
        require(identity, Operation::ViewProfile)?;
        self.users
            .find_user_by_id(identity.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
