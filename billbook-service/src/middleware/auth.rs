use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use mongodb::bson::doc;
use service_core::error::AppError;

use crate::models::UserProfile;
use crate::startup::AppState;

/// Resolve the bearer token to the current user and stash the profile in
/// request extensions. Token failures are 401; a token whose subject no
/// longer exists is 404.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            AppError::Unauthorized(anyhow::anyhow!("Missing or invalid Authorization header"))
        })?;

    let claims = state.jwt.validate_token(token)?;

    let user = state
        .db
        .users()
        .find_one(doc! { "id": &claims.sub }, None)
        .await?
        .ok_or_else(|| AppError::NotFound(anyhow::anyhow!("User not found")))?;

    req.extensions_mut().insert(UserProfile::from(user));

    Ok(next.run(req).await)
}

/// Extractor handing the authenticated user's profile to handlers.
pub struct CurrentUser(pub UserProfile);

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let profile = parts.extensions.get::<UserProfile>().ok_or_else(|| {
            AppError::InternalError(anyhow::anyhow!("User profile missing from request extensions"))
        })?;

        Ok(CurrentUser(profile.clone()))
    }
}

/// Tenant guard: most creation endpoints require the caller to have created
/// a business first.
pub fn require_business(user: &UserProfile) -> Result<String, AppError> {
    user.business_id
        .clone()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!("Please create a business first")))
}
