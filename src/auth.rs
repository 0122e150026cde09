use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use chrono::{Duration, Utc};
use headers::{Authorization, Cookie, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    db::member::get_member_by_id,
    errors::AppError,
    models::{Member, member::Claims},
    state::AppState,
};

/// The authenticated member. Rejects with 401 when there is no valid token.
pub struct AuthMember(pub Member);

/// The authenticated member if the request carries a valid token, otherwise anonymous.
pub struct OptionalMember(pub Option<Member>);

/// An authenticated administrator. Rejects ordinary members with 403.
pub struct AdminMember(pub Member);

impl FromRequestParts<AppState> for AuthMember {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        resolve_member(parts, state).await.map(AuthMember)
    }
}

impl FromRequestParts<AppState> for OptionalMember {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        match resolve_member(parts, state).await {
            Ok(member) => Ok(OptionalMember(Some(member))),
            Err(AppError::Unauthorized(reason)) => {
                tracing::debug!("Treating request as anonymous: {}", reason);
                Ok(OptionalMember(None))
            }
            Err(e) => {
                tracing::warn!("Failed to resolve member for optional auth: {}", e);
                Err(e)
            }
        }
    }
}

impl FromRequestParts<AppState> for AdminMember {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let member = resolve_member(parts, state).await?;
        if !member.is_admin {
            tracing::warn!("Member {} tried to reach an admin route", member.id);
            return Err(AppError::Forbidden(
                "You do not have permission to access. Only Admins are allowed.".into(),
            ));
        }
        Ok(AdminMember(member))
    }
}

/// Token from the `token` cookie, falling back to the bearer header.
async fn request_token(parts: &mut Parts, state: &AppState) -> Option<String> {
    if let Ok(TypedHeader(cookie)) = TypedHeader::<Cookie>::from_request_parts(parts, state).await {
        if let Some(token) = cookie.get("token") {
            return Some(token.to_string());
        }
    }

    TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
        .await
        .ok()
        .map(|TypedHeader(Authorization(bearer))| bearer.token().to_string())
}

async fn resolve_member(parts: &mut Parts, state: &AppState) -> Result<Member, AppError> {
    let token = request_token(parts, state)
        .await
        .ok_or_else(|| AppError::Unauthorized("You need to log in to continue.".into()))?;

    let claims = decode_token(&token, &state.config.jwt_secret)?;
    let member_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid member ID in token".into()))?;

    get_member_by_id(member_id, state.redis.clone())
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Unauthorized("User does not exist.".into()),
            other => other,
        })
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token.".into()))?;

    Ok(token_data.claims)
}

/// Signs a token for `member`. Login lives outside this service; this is the
/// format it is expected to issue.
pub fn issue_token(member: &Member, secret: &str, ttl: Duration) -> Result<String, AppError> {
    let expiration = (Utc::now() + ttl).timestamp() as usize;
    let claims = Claims {
        sub: member.id.to_string(),
        is_admin: member.is_admin,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(AppError::JwtError)
}
