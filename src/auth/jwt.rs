use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime. Sessions last a week, matching the cookie max-age.
pub const TOKEN_TTL_SECS: usize = 7 * 24 * 60 * 60;

/// Claims carried by a session token.
///
/// Tokens are self-issued and signed with HS256 using the `JWT_SECRET`
/// from the environment. The `sub` field is the user's UUID.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// The user UUID.
    pub sub: String,
    /// Token issued-at (Unix timestamp).
    pub iat: usize,
    /// Token expiration (Unix timestamp).
    pub exp: usize,
}

impl Claims {
    /// Extract the user UUID from the `sub` claim.
    pub fn user_id(&self) -> Result<Uuid, String> {
        Uuid::parse_str(&self.sub).map_err(|e| format!("Invalid UUID in sub claim: {e}"))
    }
}

/// Sign a session token for a user.
pub fn issue_token(user_id: Uuid, secret: &str) -> Result<String, String> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("Failed to sign token: {e}"))
}

/// Validate a session token and return the decoded claims.
///
/// Rejects expired tokens and tokens signed with a different secret.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|td| td.claims)
    .map_err(|e| format!("Invalid token: {e}"))
}
