use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Store service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum StoreServiceError {
    // not found
    #[error("user not found")]
    UserNotFound,
    #[error("game not found")]
    GameNotFound,
    #[error("genre not found")]
    GenreNotFound,
    #[error("shopping cart not found")]
    CartNotFound,
    #[error("game not in the shopping cart")]
    GameNotInCart,
    #[error("order not found")]
    OrderNotFound,

    // conflicts
    #[error("game is already in the shopping cart")]
    GameAlreadyInCart,
    #[error("game is already in the library")]
    GameAlreadyOwned,
    #[error("username is already in use")]
    UsernameTaken,
    #[error("email address is already in use")]
    EmailTaken,
    #[error("genre name is already in use")]
    GenreNameTaken,

    // validation
    #[error("invalid username")]
    InvalidUsername,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password does not meet requirements")]
    WeakPassword,
    #[error("invalid age")]
    InvalidAge,
    #[error("price must not be negative")]
    InvalidPrice,
    #[error("comment must not be empty")]
    EmptyComment,
    #[error("no file provided")]
    EmptyUpload,
    #[error("unsupported file type")]
    UnsupportedFileType,
    #[error("missing data")]
    MissingData,
    #[error("no shopping cart to check out")]
    CheckoutWithoutCart,
    #[error("invalid confirmation token")]
    InvalidConfirmToken,
    #[error("invalid password reset token")]
    InvalidResetToken,

    // auth
    #[error("unauthorized")]
    Unauthorized,
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("email address is not confirmed")]
    EmailNotConfirmed,
    #[error("forbidden")]
    Forbidden,

    // upstream collaborators
    #[error("media upload failed")]
    UploadFailed(#[source] anyhow::Error),
    #[error("email delivery failed")]
    EmailDelivery(#[source] anyhow::Error),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl StoreServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::GenreNotFound => "GENRE_NOT_FOUND",
            Self::CartNotFound => "CART_NOT_FOUND",
            Self::GameNotInCart => "GAME_NOT_IN_CART",
            Self::OrderNotFound => "ORDER_NOT_FOUND",
            Self::GameAlreadyInCart => "GAME_ALREADY_IN_CART",
            Self::GameAlreadyOwned => "GAME_ALREADY_OWNED",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::GenreNameTaken => "GENRE_NAME_TAKEN",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidAge => "INVALID_AGE",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::EmptyComment => "EMPTY_COMMENT",
            Self::EmptyUpload => "EMPTY_UPLOAD",
            Self::UnsupportedFileType => "UNSUPPORTED_FILE_TYPE",
            Self::MissingData => "MISSING_DATA",
            Self::CheckoutWithoutCart => "CHECKOUT_WITHOUT_CART",
            Self::InvalidConfirmToken => "INVALID_CONFIRM_TOKEN",
            Self::InvalidResetToken => "INVALID_RESET_TOKEN",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::EmailNotConfirmed => "EMAIL_NOT_CONFIRMED",
            Self::Forbidden => "FORBIDDEN",
            Self::UploadFailed(_) => "UPLOAD_FAILED",
            Self::EmailDelivery(_) => "EMAIL_DELIVERY_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::UserNotFound
            | Self::GameNotFound
            | Self::GenreNotFound
            | Self::CartNotFound
            | Self::GameNotInCart
            | Self::OrderNotFound => StatusCode::NOT_FOUND,
            Self::GameAlreadyInCart
            | Self::GameAlreadyOwned
            | Self::UsernameTaken
            | Self::EmailTaken
            | Self::GenreNameTaken => StatusCode::CONFLICT,
            Self::InvalidUsername
            | Self::InvalidEmail
            | Self::WeakPassword
            | Self::InvalidAge
            | Self::InvalidPrice
            | Self::EmptyComment
            | Self::EmptyUpload
            | Self::UnsupportedFileType
            | Self::MissingData
            | Self::CheckoutWithoutCart
            | Self::InvalidConfirmToken
            | Self::InvalidResetToken => StatusCode::BAD_REQUEST,
            Self::Unauthorized | Self::InvalidCredentials | Self::EmailNotConfirmed => {
                StatusCode::UNAUTHORIZED
            }
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::UploadFailed(_) | Self::EmailDelivery(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StoreServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // only 5xx carry a source worth logging
        match &self {
            Self::Internal(e) => {
                tracing::error!(error = %e, kind = "INTERNAL", "internal error");
            }
            Self::UploadFailed(e) => {
                tracing::error!(error = %e, kind = "UPLOAD_FAILED", "media upload failed");
            }
            Self::EmailDelivery(e) => {
                tracing::error!(error = %e, kind = "EMAIL_DELIVERY_FAILED", "email delivery failed");
            }
            _ => {}
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
