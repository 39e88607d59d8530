use gamestore::error::StoreServiceError;
use gamestore::usecase::auth::{
    ConfirmEmailUseCase, ForgotPasswordUseCase, LoginInput, LoginUseCase, RegisterInput,
    RegisterUseCase, ResetPasswordUseCase,
};
use gamestore::usecase::token::validate_access_token;

use crate::helpers::{MockUserRepo, RecordingMailer, TEST_JWT_SECRET, TEST_PASSWORD, test_user};

fn register_input() -> RegisterInput {
    RegisterInput {
        username: "bob_99".into(),
        email: "bob@example.com".into(),
        password: "longenoughpw".into(),
        first_name: "Bob".into(),
        last_name: "Roe".into(),
        age: 25,
    }
}

// ── Register → confirm → login ───────────────────────────────────────────────

#[tokio::test]
async fn full_signup_flow_ends_with_a_valid_access_token() {
    let users = MockUserRepo::empty();
    let mailer = RecordingMailer::new();

    RegisterUseCase {
        users: users.clone(),
        mailer: mailer.clone(),
        jwt_secret: TEST_JWT_SECRET.into(),
        public_url: "https://store.example".into(),
    }
    .execute(register_input())
    .await
    .unwrap();

    // Login is refused until the address is confirmed.
    let login = LoginUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.into(),
    };
    let premature = login
        .execute(LoginInput {
            username: "bob_99".into(),
            password: "longenoughpw".into(),
        })
        .await;
    assert!(matches!(
        premature,
        Err(StoreServiceError::EmailNotConfirmed)
    ));

    // Pull the confirmation token out of the delivered mail.
    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    let body = &sent[0].2;
    let token = body
        .split("token=")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("confirmation link in mail body");

    ConfirmEmailUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.into(),
    }
    .execute(token)
    .await
    .unwrap();

    let access = login
        .execute(LoginInput {
            username: "bob_99".into(),
            password: "longenoughpw".into(),
        })
        .await
        .unwrap();
    let info = validate_access_token(&access, TEST_JWT_SECRET).unwrap();
    let created = users.users.lock().unwrap()[0].clone();
    assert_eq!(info.user_id, created.id);
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let existing = test_user(true);
    let users = MockUserRepo::new(vec![existing]);

    let result = RegisterUseCase {
        users,
        mailer: RecordingMailer::new(),
        jwt_secret: TEST_JWT_SECRET.into(),
        public_url: "https://store.example".into(),
    }
    .execute(RegisterInput {
        username: "alice".into(),
        email: "fresh@example.com".into(),
        ..register_input()
    })
    .await;
    assert!(matches!(result, Err(StoreServiceError::UsernameTaken)));
}

#[tokio::test]
async fn wrong_password_is_invalid_credentials() {
    let user = test_user(true);
    let login = LoginUseCase {
        users: MockUserRepo::new(vec![user]),
        jwt_secret: TEST_JWT_SECRET.into(),
    };
    let result = login
        .execute(LoginInput {
            username: "alice".into(),
            password: "not-the-password".into(),
        })
        .await;
    assert!(matches!(result, Err(StoreServiceError::InvalidCredentials)));

    let ok = login
        .execute(LoginInput {
            username: "alice".into(),
            password: TEST_PASSWORD.into(),
        })
        .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn access_token_is_not_a_confirmation_token() {
    let user = test_user(false);
    let users = MockUserRepo::new(vec![user.clone()]);
    let mut confirmed = user;
    confirmed.email_confirmed = true;
    users.users.lock().unwrap()[0] = confirmed;

    let access = LoginUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.into(),
    }
    .execute(LoginInput {
        username: "alice".into(),
        password: TEST_PASSWORD.into(),
    })
    .await
    .unwrap();

    let result = ConfirmEmailUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.into(),
    }
    .execute(&access)
    .await;
    assert!(matches!(
        result,
        Err(StoreServiceError::InvalidConfirmToken)
    ));
}

// ── Forgot password → reset → login ──────────────────────────────────────────

#[tokio::test]
async fn password_reset_flow_allows_login_with_the_new_password() {
    let user = test_user(true);
    let users = MockUserRepo::new(vec![user.clone()]);
    let mailer = RecordingMailer::new();

    ForgotPasswordUseCase {
        users: users.clone(),
        mailer: mailer.clone(),
        jwt_secret: TEST_JWT_SECRET.into(),
        public_url: "https://store.example".into(),
    }
    .execute(&user.email)
    .await
    .unwrap();

    let sent = mailer.sent.lock().unwrap().clone();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, user.email);
    let token = sent[0]
        .2
        .split("token=")
        .nth(1)
        .and_then(|rest| rest.split('"').next())
        .expect("reset link in mail body")
        .to_owned();

    ResetPasswordUseCase {
        users: users.clone(),
        jwt_secret: TEST_JWT_SECRET.into(),
    }
    .execute(&token, "a-new-long-password")
    .await
    .unwrap();

    let login = LoginUseCase {
        users,
        jwt_secret: TEST_JWT_SECRET.into(),
    };
    let stale = login
        .execute(LoginInput {
            username: "alice".into(),
            password: TEST_PASSWORD.into(),
        })
        .await;
    assert!(matches!(stale, Err(StoreServiceError::InvalidCredentials)));

    login
        .execute(LoginInput {
            username: "alice".into(),
            password: "a-new-long-password".into(),
        })
        .await
        .unwrap();
}
