use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use mongodb::bson::doc;
use service_core::error::AppError;

use crate::{
    middleware::CurrentUser,
    models::{AuthResponse, LoginRequest, SignupRequest, User},
    startup::AppState,
    utils::{hash_password, verify_password, ValidatedJson},
};

/// Register a new account and hand back a token right away.
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let existing = state
        .db
        .users()
        .find_one(doc! { "email": &req.email }, None)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(anyhow::anyhow!(
            "Email already registered"
        )));
    }

    let password_hash = hash_password(&req.password)?;
    let user = User::new(req.email, password_hash, req.name, req.mobile);

    state.db.users().insert_one(&user, None).await?;

    let token = state.jwt.generate_token(&user.id, &user.email)?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: user.into(),
            token,
        }),
    ))
}

/// Login with email and password. Unknown email and wrong password produce
/// the same 401 so accounts cannot be enumerated.
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let invalid = || AppError::Unauthorized(anyhow::anyhow!("Invalid credentials"));

    let user = state
        .db
        .users()
        .find_one(doc! { "email": &req.email }, None)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&req.password, &user.password) {
        return Err(invalid());
    }

    let token = state.jwt.generate_token(&user.id, &user.email)?;

    Ok(Json(AuthResponse {
        user: user.into(),
        token,
    }))
}

/// Current user, as resolved by the auth middleware.
pub async fn me(CurrentUser(user): CurrentUser) -> impl IntoResponse {
    Json(user)
}
