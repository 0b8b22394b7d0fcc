use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Errors returned when a token cannot be serialized.
///
/// Every variant is raised at serialize time. Configuration calls on the
/// builders never fail.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("twilio account sid not set")]
    MissingAccountSid,

    #[error("twilio auth token not set")]
    MissingAuthToken,

    #[error("twilio key sid not set")]
    MissingKeySid,

    #[error("twilio key secret not set")]
    MissingKeySecret,

    #[error("generate access token for empty identity")]
    MissingIdentity,

    /// The requested algorithm is not one of HS256, HS384 or HS512.
    /// `None` means no algorithm was given at all.
    #[error("signing method is not supported: {}", display_algorithm(.0))]
    UnsupportedAlgorithm(Option<Algorithm>),

    /// Error from the underlying JWT signer, passed through as is.
    #[error(transparent)]
    Signing(#[from] jsonwebtoken::errors::Error),
}

fn display_algorithm(algorithm: &Option<Algorithm>) -> String {
    match algorithm {
        Some(algorithm) => format!("{:?}", algorithm),
        None => "none".to_string(),
    }
}
