use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::Serialize;
use tracing::debug;

use crate::error::TokenError;

/// Symmetric algorithms a token may be signed with.
pub const SUPPORTED_ALGORITHMS: [Algorithm; 3] =
    [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

pub fn is_supported_algorithm(algorithm: Option<Algorithm>) -> bool {
    algorithm.is_some_and(|algorithm| SUPPORTED_ALGORITHMS.contains(&algorithm))
}

/// Sign `claims` with a shared secret and return the compact JWT.
///
/// # Arguments
///
/// * `claims` - Claims set serialized as the JWT payload
/// * `algorithm` - One of [`SUPPORTED_ALGORITHMS`]
/// * `content_type` - Optional `cty` value for the protected header
/// * `secret` - HMAC key
///
/// # Returns
///
/// The `header.payload.signature` token, or `TokenError::UnsupportedAlgorithm`
/// for anything but HS256/384/512. Errors from the signer itself are returned
/// unchanged as `TokenError::Signing`.
pub(crate) fn sign<T: Serialize>(
    claims: &T,
    algorithm: Option<Algorithm>,
    content_type: Option<&str>,
    secret: &str,
) -> Result<String, TokenError> {
    let algorithm = match algorithm {
        Some(algorithm) if is_supported_algorithm(Some(algorithm)) => algorithm,
        other => return Err(TokenError::UnsupportedAlgorithm(other)),
    };

    let mut header = Header::new(algorithm);
    header.cty = content_type.map(str::to_string);

    let token = encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))?;
    debug!(?algorithm, "signed token");
    Ok(token)
}
