use crate::state::AppState;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tracing::warn;

/// HTTP Basic auth against the bcrypt-verified admin credentials: `AdminUsrHash`/`AdminPwdHash` are base64 of a bcrypt hash of the
/// admin username and password respectively.
///
/// An admin config with empty hashes (the common "no admin configured yet"
/// state) rejects every request rather than accepting an empty password.
pub async fn require_admin_basic_auth(
    State(state): State<AppState>,
    request: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let (username, password) = header
        .and_then(decode_basic_auth)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if !verify_credential(&username, &state.admin_usr_hash) || !verify_credential(&password, &state.admin_pwd_hash) {
        warn!("admin API request rejected: invalid credentials");
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

fn decode_basic_auth(header_value: &str) -> Option<(String, String)> {
    let encoded = header_value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn verify_credential(candidate: &str, base64_bcrypt_hash: &str) -> bool {
    if base64_bcrypt_hash.is_empty() {
        return false;
    }
    let Ok(hash_bytes) = STANDARD.decode(base64_bcrypt_hash) else {
        return false;
    };
    let Ok(hash) = String::from_utf8(hash_bytes) else {
        return false;
    };
    bcrypt::verify(candidate, &hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(s: &str) -> String {
        let bcrypt_hash = bcrypt::hash(s, bcrypt::DEFAULT_COST).unwrap();
        STANDARD.encode(bcrypt_hash)
    }

    #[test]
    fn verifies_matching_credential() {
        let hash = hash_of("hunter2");
        assert!(verify_credential("hunter2", &hash));
    }

    #[test]
    fn rejects_wrong_credential() {
        let hash = hash_of("hunter2");
        assert!(!verify_credential("wrong", &hash));
    }

    #[test]
    fn rejects_when_hash_is_empty() {
        assert!(!verify_credential("anything", ""));
    }

    #[test]
    fn decodes_well_formed_basic_header() {
        let header = format!("Basic {}", STANDARD.encode("admin:secret"));
        assert_eq!(
            decode_basic_auth(&header),
            Some(("admin".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn rejects_header_without_basic_prefix() {
        assert_eq!(decode_basic_auth("Bearer abc"), None);
    }
}
