//! Unit tests for JWT functionality.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::auth::{Claims, TokenKind};
use crate::config::JwtSettings;
use crate::jwt::{JwtConfig, JwtError, JwtService};

fn test_service() -> JwtService {
    JwtService::new(JwtConfig {
        secret: "test-secret-key-for-testing".to_string(),
        access_token_expires_minutes: 15,
        refresh_token_expires_days: 7,
    })
}

#[test]
fn test_claims_new_sets_correct_fields() {
    let user_id = Uuid::new_v4();
    let expires_at = Utc::now() + Duration::hours(1);

    let claims = Claims::new(user_id, "anna", true, TokenKind::Access, expires_at);

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.username, "anna");
    assert!(claims.is_admin());
    assert!(claims.iat <= Utc::now().timestamp());
    assert_eq!(claims.exp, expires_at.timestamp());
}

#[test]
fn test_access_token_round_trip() {
    let service = test_service();
    let user_id = Uuid::new_v4();

    let token = service
        .generate_access_token(user_id, "anna", false)
        .unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims.user_id(), user_id);
    assert_eq!(claims.username, "anna");
    assert!(!claims.is_admin());
    assert_eq!(claims.kind, TokenKind::Access);
}

#[test]
fn test_refresh_token_is_not_an_access_token() {
    let service = test_service();
    let pair = service.issue_pair(Uuid::new_v4(), "anna", false).unwrap();

    assert!(matches!(
        service.validate_token(&pair.refresh_token),
        Err(JwtError::WrongKind {
            expected: TokenKind::Access
        })
    ));
    assert!(service.validate_refresh_token(&pair.refresh_token).is_ok());
    assert!(service.validate_refresh_token(&pair.access_token).is_err());
    assert_eq!(pair.expires_in, 15 * 60);
}

#[test]
fn test_invalid_token() {
    let service = test_service();
    assert!(matches!(
        service.validate_token("invalid.token.here"),
        Err(JwtError::DecodingError(_))
    ));
}

#[test]
fn test_token_signed_with_other_secret_is_rejected() {
    let other = JwtService::new(JwtConfig {
        secret: "another-secret".to_string(),
        ..JwtConfig::default()
    });
    let token = other
        .generate_access_token(Uuid::new_v4(), "anna", false)
        .unwrap();

    assert!(test_service().validate_token(&token).is_err());
}

#[test]
fn test_config_from_settings_converts_units() {
    let settings = JwtSettings {
        secret: "s".to_string(),
        access_token_expiry_secs: 1800,
        refresh_token_expiry_secs: 172_800,
    };

    let config = JwtConfig::from(&settings);

    assert_eq!(config.access_token_expires_minutes, 30);
    assert_eq!(config.refresh_token_expires_days, 2);
}
