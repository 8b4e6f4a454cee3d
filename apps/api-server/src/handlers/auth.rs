//! Authentication handlers.

use actix_web::{HttpResponse, web};

use quill_core::domain::User;
use quill_core::ports::{BaseRepository, PasswordService, TokenService, UserRepository};
use quill_shared::dto::{AuthResponse, UserSummary};

use crate::middleware::{AppError, AppResult, Validated};
use crate::state::AppState;
use crate::validators::{AuthLogin, AuthRegister};

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

fn issue(state: &AppState, user: &User, message: &str) -> AppResult<AuthResponse> {
    let token = state
        .tokens
        .generate_token(user.id, &user.email, &user.username)?;

    Ok(AuthResponse {
        message: message.to_string(),
        token,
        user: UserSummary::from(user),
    })
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    input: Validated<AuthRegister>,
) -> AppResult<HttpResponse> {
    let req = input.body;
    let email = req.email.to_lowercase();

    if let Some(existing) = state
        .users
        .find_by_email_or_username(&email, &req.username)
        .await?
    {
        let message = if existing.email == email {
            "Email already registered"
        } else {
            "Username already taken"
        };
        return Err(AppError::Conflict(message.to_string()));
    }

    let password_hash = state.passwords.hash(&req.password)?;

    let user = User::new(
        req.username,
        email,
        password_hash,
        req.first_name,
        req.last_name,
    );
    let saved = state.users.create(user).await?;
    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(issue(&state, &saved, "User registered successfully")?))
}

/// POST /api/auth/login
///
/// Unknown emails and wrong passwords produce the same response.
pub async fn login(
    state: web::Data<AppState>,
    input: Validated<AuthLogin>,
) -> AppResult<HttpResponse> {
    let req = input.body;

    let Some(user) = state.users.find_by_email(&req.email.to_lowercase()).await? else {
        state.passwords.verify_unknown(&req.password);
        return Err(invalid_credentials());
    };

    if !state.passwords.verify(&req.password, &user.password_hash)? {
        return Err(invalid_credentials());
    }

    Ok(HttpResponse::Ok().json(issue(&state, &user, "Login successful")?))
}
