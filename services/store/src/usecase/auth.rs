use argon2::password_hash::{SaltString, rand_core::OsRng};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use gamestore_domain::user::UserRole;

use crate::domain::repository::{EmailSender, UserRepository};
use crate::domain::types::{
    StoreUser, validate_age, validate_email, validate_password, validate_username,
};
use crate::error::StoreServiceError;
use crate::usecase::token::{
    issue_access_token, issue_confirm_token, issue_reset_token, validate_confirm_token,
    validate_reset_token,
};

pub fn hash_password(password: &str) -> Result<String, StoreServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| StoreServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub age: i16,
}

pub struct RegisterUseCase<U: UserRepository, M: EmailSender> {
    pub users: U,
    pub mailer: M,
    pub jwt_secret: String,
    /// Base URL the confirmation link points back at.
    pub public_url: String,
}

impl<U: UserRepository, M: EmailSender> RegisterUseCase<U, M> {
    pub async fn execute(&self, input: RegisterInput) -> Result<(), StoreServiceError> {
        if !validate_username(&input.username) {
            return Err(StoreServiceError::InvalidUsername);
        }
        if !validate_email(&input.email) {
            return Err(StoreServiceError::InvalidEmail);
        }
        if !validate_password(&input.password) {
            return Err(StoreServiceError::WeakPassword);
        }
        if !validate_age(input.age) {
            return Err(StoreServiceError::InvalidAge);
        }
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(StoreServiceError::EmailTaken);
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(StoreServiceError::UsernameTaken);
        }

        let now = Utc::now();
        let user = StoreUser {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            first_name: input.first_name,
            last_name: input.last_name,
            age: input.age,
            role: UserRole::User,
            profile_picture_url: None,
            email_confirmed: false,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;

        // Confirmation mail is best-effort: the account exists either way.
        let token = issue_confirm_token(user.id, user.role, &self.jwt_secret)?;
        let link = format!("{}/auth/confirm-email?token={token}", self.public_url);
        let body = confirmation_email(&user.first_name, &link);
        if let Err(e) = self
            .mailer
            .send(&user.email, "Confirm your email", &body)
            .await
        {
            tracing::warn!(error = %e, user_id = %user.id, "confirmation email not delivered");
        }
        Ok(())
    }
}

fn confirmation_email(first_name: &str, link: &str) -> String {
    format!(
        "<h3>Thank you for registering, {first_name}!</h3>\
         <p>Please confirm your email by clicking the link: \
         <a href=\"{link}\">Confirm Email</a></p>\
         <p>If you didn't request this, please ignore this email.</p>"
    )
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<String, StoreServiceError> {
        let user = self
            .users
            .find_by_username(&input.username)
            .await?
            .ok_or(StoreServiceError::InvalidCredentials)?;
        if !verify_password(&input.password, &user.password_hash) {
            return Err(StoreServiceError::InvalidCredentials);
        }
        if !user.email_confirmed {
            return Err(StoreServiceError::EmailNotConfirmed);
        }
        issue_access_token(user.id, user.role, &self.jwt_secret)
    }
}

// ── ConfirmEmail ─────────────────────────────────────────────────────────────

pub struct ConfirmEmailUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> ConfirmEmailUseCase<U> {
    /// Idempotent: confirming an already-confirmed account succeeds.
    pub async fn execute(&self, token: &str) -> Result<(), StoreServiceError> {
        let user_id = validate_confirm_token(token, &self.jwt_secret)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;
        if user.email_confirmed {
            return Ok(());
        }
        self.users.set_email_confirmed(user.id, true).await
    }
}

// ── ForgotPassword ───────────────────────────────────────────────────────────

pub struct ForgotPasswordUseCase<U: UserRepository, M: EmailSender> {
    pub users: U,
    pub mailer: M,
    pub jwt_secret: String,
    /// Base URL the reset link points back at.
    pub public_url: String,
}

impl<U: UserRepository, M: EmailSender> ForgotPasswordUseCase<U, M> {
    /// Unlike the registration mail, delivery failure here is surfaced:
    /// the mail is the whole point of the request.
    pub async fn execute(&self, email: &str) -> Result<(), StoreServiceError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;

        let token = issue_reset_token(user.id, user.role, &self.jwt_secret)?;
        let link = format!("{}/auth/reset-password?token={token}", self.public_url);
        let body = reset_email(&user.first_name, &link);
        self.mailer
            .send(&user.email, "Reset your password", &body)
            .await
    }
}

fn reset_email(first_name: &str, link: &str) -> String {
    format!(
        "<h3>Reset your password</h3>\
         <p>Hello {first_name},</p>\
         <p>We received a request to reset the password for your account. \
         Click the link to choose a new one: \
         <a href=\"{link}\">Reset My Password</a></p>\
         <p>This link is valid for 24 hours.</p>\
         <p>If you did not request a password reset, no action is required.</p>"
    )
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> ResetPasswordUseCase<U> {
    pub async fn execute(&self, token: &str, new_password: &str) -> Result<(), StoreServiceError> {
        let user_id = validate_reset_token(token, &self.jwt_secret)?;
        if !validate_password(new_password) {
            return Err(StoreServiceError::WeakPassword);
        }
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(StoreServiceError::UserNotFound)?;
        let hash = hash_password(new_password)?;
        self.users.update_password_hash(user.id, &hash).await
    }
}
