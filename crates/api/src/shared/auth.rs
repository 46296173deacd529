use crate::error::AppError;
use actix_web::HttpRequest;
use eventease_domain::{parse_name_from_email, User, UserId};
use eventease_infra::AppContext;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Claims of the external identity provider's access token. The subject
/// is the only claim we rely on; name, email and picture are best-effort
/// profile hints used when an account is created lazily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub exp: usize,
    pub iat: usize,
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    let mut token = token_header_value.replace("Bearer", "");
    token = token.replace("bearer", "");
    String::from(token.trim())
}

fn get_token(req: &HttpRequest) -> Option<String> {
    let token = req.headers().get("authorization")?;
    let token = token.to_str().ok()?;
    Some(parse_authtoken_header(token))
}

fn decode_token(ctx: &AppContext, token: &str) -> Option<TokenClaims> {
    let public_key_b64 = ctx.config.auth_public_key_b64.as_ref()?;
    let public_key = base64::decode(public_key_b64).ok()?;
    let decoding_key = DecodingKey::from_rsa_pem(&public_key).ok()?;
    let res = decode::<TokenClaims>(token, &decoding_key, &Validation::new(Algorithm::RS256));
    match res {
        Ok(token_data) => Some(token_data.claims),
        Err(e) => {
            tracing::debug!("Rejected access token: {:?}", e);
            None
        }
    }
}

/// Claims carry no email for some identity-provider connections, so fall
/// back to the provider's profile endpoint before giving up.
async fn resolve_email(claims: &TokenClaims, token: &str, ctx: &AppContext) -> Option<String> {
    if claims.email.is_some() {
        return claims.email.clone();
    }
    ctx.services
        .profile_api
        .fetch(token)
        .await
        .and_then(|profile| profile.email)
}

/// Finds the account for the token subject, creating it on first sight.
/// A stored account missing its email gets it backfilled when the token
/// or the profile endpoint can supply one.
async fn create_user_if_not_exists(claims: &TokenClaims, token: &str, ctx: &AppContext) -> User {
    let user_id = UserId::new(claims.sub.clone());

    if let Some(mut user) = ctx.repos.user_repo.find(&user_id).await {
        if user.email.is_none() {
            if let Some(email) = resolve_email(claims, token, ctx).await {
                user.email = Some(email);
                if let Err(e) = ctx.repos.user_repo.save(&user).await {
                    tracing::warn!("Failed to backfill user email: {:?}", e);
                }
            }
        }
        return user;
    }

    let mut user = User::new(user_id);
    user.email = resolve_email(claims, token, ctx).await;
    user.picture = claims.picture.clone();
    match &claims.name {
        Some(name) => user.name = name.clone(),
        None => {
            let email = user.email.as_deref().unwrap_or_default();
            let (name, surname) = parse_name_from_email(email);
            user.name = name;
            user.surname = surname;
        }
    }

    if let Err(e) = ctx.repos.user_repo.insert(&user).await {
        tracing::warn!("Failed to insert user on first sight: {:?}", e);
    }
    user
}

pub async fn protect_route(
    req: &HttpRequest,
    ctx: &AppContext,
) -> Result<(User, TokenClaims), AppError> {
    match optional_identity(req, ctx).await {
        Some(identity) => Ok(identity),
        None => Err(AppError::Unauthorized(
            "Missing or invalid access token".into(),
        )),
    }
}

/// Same as `protect_route`, but an absent or invalid token yields `None`
/// instead of an error. Used by routes open to anonymous callers.
pub async fn optional_identity(req: &HttpRequest, ctx: &AppContext) -> Option<(User, TokenClaims)> {
    let token = get_token(req)?;
    let claims = decode_token(ctx, &token)?;
    let user = create_user_if_not_exists(&claims, &token, ctx).await;
    Some((user, claims))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn strips_bearer_prefix() {
        assert_eq!(parse_authtoken_header("Bearer abc123"), "abc123");
        assert_eq!(parse_authtoken_header("bearer abc123"), "abc123");
        assert_eq!(parse_authtoken_header("  abc123  "), "abc123");
    }
}
