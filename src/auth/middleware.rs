use actix_web::FromRequest;
use actix_web::{HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users::get_user_by_id;
use crate::error::ApiError;
use crate::models::users;

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);

/// Extractor that resolves the request's session token to a user row.
///
/// The token is read from the `Authorization: Bearer <token>` header
/// or, failing that, from the `token` cookie set at login.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Extract the token: Authorization header first, cookie second.
            let header_token = req
                .headers()
                .get("Authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::to_owned);

            let token = match header_token {
                Some(t) => t,
                None => req
                    .cookie("token")
                    .map(|c| c.value().to_owned())
                    .ok_or_else(|| ApiError::unauthenticated("Not authenticated"))?,
            };

            // 2. Validate the signature and expiry.
            let secret = req
                .app_data::<web::Data<JwtSecret>>()
                .ok_or_else(|| ApiError::internal("JWT secret not configured"))?;

            let claims = jwt::validate_token(&token, &secret.0)
                .map_err(|_| ApiError::unauthenticated("Invalid or expired token"))?;

            let user_id = claims
                .user_id()
                .map_err(|_| ApiError::unauthenticated("Invalid or expired token"))?;

            // 3. Resolve the claims to a live user row.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| ApiError::internal("Database not configured"))?;

            let user = get_user_by_id(db.get_ref(), user_id)
                .await?
                .ok_or_else(|| ApiError::unauthenticated("User not found"))?;

            Ok(AuthenticatedUser(user))
        })
    }
}
