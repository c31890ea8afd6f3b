//! App id precondition shared by every provider factory.

use crate::{EchoError, error::Result};
use regex::Regex;
use std::sync::LazyLock;

static UUID_V4: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$")
        .unwrap_or_else(|e| unreachable!("UUID v4 pattern is a valid regex: {e}"))
});

/// Checks that `app_id` is a UUID v4.
///
/// `context` names the caller (e.g. `"create_echo_openai"`) and is included in
/// the error message together with the offending value.
///
/// # Errors
///
/// Returns [`EchoError::InvalidAppId`] if `app_id` is empty or malformed.
pub fn validate_app_id(app_id: &str, context: &str) -> Result<()> {
    if app_id.is_empty() || !UUID_V4.is_match(app_id) {
        return Err(EchoError::InvalidAppId {
            context: context.to_string(),
            app_id: app_id.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_v4() {
        assert!(validate_app_id("60601628-cdb7-481e-8f7e-921981220348", "test").is_ok());
    }

    #[test]
    fn test_valid_uppercase() {
        assert!(validate_app_id("60601628-CDB7-481E-8F7E-921981220348", "test").is_ok());
    }

    #[test]
    fn test_generated_v4() {
        let id = uuid::Uuid::new_v4().to_string();
        assert!(validate_app_id(&id, "test").is_ok());
    }

    #[test]
    fn test_rejects_garbage() {
        let err = validate_app_id("not-a-uuid", "create_echo_openai").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("not-a-uuid"));
        assert!(msg.contains("create_echo_openai"));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_app_id("", "test"),
            Err(EchoError::InvalidAppId { .. })
        ));
    }

    #[test]
    fn test_rejects_other_versions() {
        // v1 and v5 have the right shape but the wrong version nibble.
        assert!(validate_app_id("60601628-cdb7-181e-8f7e-921981220348", "test").is_err());
        let v5 = uuid::Uuid::new_v5(&uuid::Uuid::NAMESPACE_URL, b"echo").to_string();
        assert!(validate_app_id(&v5, "test").is_err());
    }

    #[test]
    fn test_rejects_bad_variant() {
        assert!(validate_app_id("60601628-cdb7-481e-cf7e-921981220348", "test").is_err());
    }

    #[test]
    fn test_rejects_braced_and_padded() {
        assert!(validate_app_id("{60601628-cdb7-481e-8f7e-921981220348}", "test").is_err());
        assert!(validate_app_id(" 60601628-cdb7-481e-8f7e-921981220348", "test").is_err());
        assert!(validate_app_id("60601628cdb7481e8f7e921981220348", "test").is_err());
    }
}
