use chrono::Duration;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::env;
use twilio_auth::{
    ConfigError, ConversationGrant, FixedClock, MessagingGrant, SdkError, TokenError, TokenIssuer,
    TwilioConfig,
};

fn decode_claims(token: &str, secret: &str, algorithm: Algorithm) -> Value {
    let mut validation = Validation::new(algorithm);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();
    decode::<Value>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .expect("Failed to decode token")
        .claims
}

fn full_config() -> TwilioConfig {
    TwilioConfig::builder()
        .account_sid("AC123")
        .auth_token("auth-token")
        .api_key("SK456", "key-secret")
        .build()
        .unwrap()
}

#[test]
fn test_capability_token_from_config() {
    let issuer = TokenIssuer::new(full_config()).clock(FixedClock::from_timestamp(1470116000));

    let mut app_params = HashMap::new();
    app_params.insert("agent".to_string(), "42".to_string());
    let token = issuer
        .capability_token()
        .unwrap()
        .allow_client_incoming("alice")
        .allow_client_outgoing("AP123", app_params)
        .serialize()
        .unwrap();

    let claims = decode_claims(&token, "auth-token", Algorithm::HS256);
    assert_eq!(claims["iss"], "AC123");
    assert_eq!(claims["exp"], 1470119600);
    assert_eq!(
        claims["scope"],
        "scope:client:incoming?clientName=alice \
         scope:client:outgoing?appParams=agent%3D42&appSid=AP123&clientName=alice"
    );
}

#[test]
fn test_access_token_from_config() {
    let issuer = TokenIssuer::new(full_config()).clock(FixedClock::from_timestamp(1470114000));

    let token = issuer
        .access_token("jojo")
        .unwrap()
        .add_grant(ConversationGrant::new("pid"))
        .add_grant(MessagingGrant::new("IS1", "", "", "CR1"))
        .serialize_with_algorithm(Algorithm::HS512)
        .unwrap();

    let header = decode_header(&token).unwrap();
    assert_eq!(header.alg, Algorithm::HS512);
    assert_eq!(header.cty.as_deref(), Some("twilio-fpa;v=1"));

    let claims = decode_claims(&token, "key-secret", Algorithm::HS512);
    assert_eq!(claims["iss"], "SK456");
    assert_eq!(claims["sub"], "AC123");
    assert_eq!(claims["jti"], "SK456-1470114000");
    assert_eq!(claims["iat"], 1470114000);
    assert_eq!(claims["exp"], 1470117600);
    assert_eq!(
        claims["grants"],
        json!({
            "identity": "jojo",
            "rtc": {"configuration_profile_sid": "pid"},
            "ip_messaging": {"service_sid": "IS1", "push_credential_sid": "CR1"},
        })
    );
}

#[test]
fn test_configured_ttl_is_applied_and_overridable() {
    let config = full_config().to_builder().ttl_secs(300).build().unwrap();
    let issuer = TokenIssuer::new(config).clock(FixedClock::from_timestamp(1470114000));

    let token = issuer.access_token("jojo").unwrap().serialize().unwrap();
    let claims = decode_claims(&token, "key-secret", Algorithm::HS256);
    assert_eq!(claims["exp"], 1470114300);

    let token = issuer
        .capability_token()
        .unwrap()
        .time_to_live(Duration::seconds(60))
        .serialize()
        .unwrap();
    let claims = decode_claims(&token, "auth-token", Algorithm::HS256);
    assert_eq!(claims["exp"], 1470114060);
}

#[test]
fn test_missing_credentials() {
    let auth_only = TwilioConfig::builder()
        .account_sid("AC123")
        .auth_token("auth-token")
        .build()
        .unwrap();
    let issuer = TokenIssuer::new(auth_only);
    assert!(issuer.capability_token().is_ok());
    assert!(matches!(
        issuer.access_token("jojo"),
        Err(SdkError::Config(ConfigError::MissingCredentials))
    ));

    let key_only = TwilioConfig::builder()
        .account_sid("AC123")
        .api_key("SK456", "key-secret")
        .build()
        .unwrap();
    let issuer = TokenIssuer::new(key_only);
    assert!(issuer.access_token("jojo").is_ok());
    assert!(matches!(
        issuer.capability_token(),
        Err(SdkError::Config(ConfigError::MissingCredentials))
    ));
}

#[test]
fn test_token_errors_surface_through_sdk_error() {
    let issuer = TokenIssuer::new(full_config());

    let result: Result<String, SdkError> = issuer
        .access_token("")
        .and_then(|token| Ok(token.serialize()?));
    assert!(matches!(
        result,
        Err(SdkError::Token(TokenError::MissingIdentity))
    ));

    let result: Result<String, SdkError> = issuer
        .access_token("jojo")
        .and_then(|token| Ok(token.serialize_with_algorithm(Algorithm::RS256)?));
    assert!(matches!(
        result,
        Err(SdkError::Token(TokenError::UnsupportedAlgorithm(Some(
            Algorithm::RS256
        ))))
    ));
}

#[test]
fn test_issuer_from_env() {
    env::set_var("ISSUER_TEST_ACCOUNT_SID", "ACenv");
    env::set_var("ISSUER_TEST_API_KEY_SID", "SKenv");
    env::set_var("ISSUER_TEST_API_KEY_SECRET", "env-secret");

    let issuer = TokenIssuer::from_env("ISSUER_TEST").unwrap();
    assert_eq!(issuer.config().account_sid, "ACenv");

    let token = issuer.access_token("jojo").unwrap().serialize().unwrap();
    let claims = decode_claims(&token, "env-secret", Algorithm::HS256);
    assert_eq!(claims["sub"], "ACenv");
    assert_eq!(claims["grants"]["identity"], "jojo");
}

#[test]
fn test_issuer_debug_redacts_secrets() {
    let debug = format!("{:?}", TokenIssuer::new(full_config()));
    assert!(debug.contains("AC123"));
    assert!(!debug.contains("auth-token"));
    assert!(!debug.contains("key-secret"));
}
