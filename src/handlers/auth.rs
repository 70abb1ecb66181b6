use actix_web::cookie::time::Duration;
use actix_web::cookie::{Cookie, SameSite};
use actix_web::{HttpResponse, Responder, web};
use sea_orm::{DatabaseConnection, SqlErr};

use crate::auth::jwt;
use crate::auth::middleware::{AuthenticatedUser, JwtSecret};
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{AuthResponse, LoginUser, RegisterUser, UserResponse};

/// Build the session cookie carried alongside the bearer token.
/// SameSite=None so the SPA can call the API from another origin.
fn session_cookie(token: String) -> Cookie<'static> {
    Cookie::build("token", token)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(Duration::days(7))
        .path("/")
        .finish()
}

/// POST /api/auth/register — create an account and start a session.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    if input.name.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty() {
        return Err(ApiError::validation("Name, email and password are required"));
    }

    if user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .is_some()
    {
        return Err(ApiError::conflict("Email is already registered"));
    }

    // bcrypt is CPU-bound; run it off the async workers.
    let password = input.password;
    let hash = web::block(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| ApiError::internal(format!("Blocking task failed: {e}")))?
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))?;

    let user = user_db::insert_user(db.get_ref(), input.name, input.email, hash)
        .await
        .map_err(|err| match err.sql_err() {
            // Two registrations racing past the pre-check; the unique
            // index on email catches the loser.
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                ApiError::conflict("Email is already registered")
            }
            _ => ApiError::from(err),
        })?;

    let token = jwt::issue_token(user.id, &secret.0).map_err(ApiError::internal)?;

    Ok(HttpResponse::Created()
        .cookie(session_cookie(token.clone()))
        .json(AuthResponse::new(user, token)))
}

/// POST /api/auth/login — verify credentials and start a session.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    // Same message for unknown email and wrong password.
    let user = user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .ok_or_else(|| ApiError::unauthenticated("Invalid email or password"))?;

    let password = input.password;
    let hash = user.password_hash.clone();
    let valid = web::block(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::internal(format!("Blocking task failed: {e}")))?
        .map_err(|e| ApiError::internal(format!("Failed to verify password: {e}")))?;

    if !valid {
        return Err(ApiError::unauthenticated("Invalid email or password"));
    }

    let token = jwt::issue_token(user.id, &secret.0).map_err(ApiError::internal)?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(token.clone()))
        .json(AuthResponse::new(user, token)))
}

/// POST /api/auth/logout — clear the session cookie.
///
/// Bearer tokens already handed out stay valid until they expire; there
/// is no server-side revocation list.
pub async fn logout() -> impl Responder {
    let mut cookie = session_cookie(String::new());
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(serde_json::json!({ "message": "Logged out" }))
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(UserResponse::from(user.0))
}
