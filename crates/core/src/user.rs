//! User account normalization and validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;
use crate::roles::validate_role;

/// Optional leading `+` followed by 7 to 15 digits.
const PHONE_PATTERN: &str = r"^\+?\d{7,15}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Lower-case and trim an email address.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validate an (already normalized) email address.
///
/// Deliberately shallow: one `@` with non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("Invalid email address: '{email}'")))
    }
}

/// Validate an optional mobile phone number.
pub fn validate_phone(phone: Option<&str>) -> Result<(), CoreError> {
    match phone {
        Some(p) if !PHONE_RE.is_match(p) => Err(CoreError::Validation(
            "Phone must be 7 to 15 digits, optionally prefixed with '+'".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Validate a new account. `email` is checked after normalization.
pub fn validate_new_user(
    username: &str,
    email: &str,
    phone: Option<&str>,
    role: Option<&str>,
) -> Result<(), CoreError> {
    if username.trim().is_empty() {
        return Err(CoreError::Validation("username must not be empty".to_string()));
    }
    validate_email(&normalize_email(email))?;
    validate_phone(phone)?;
    if let Some(role) = role {
        validate_role(role)?;
    }
    Ok(())
}

/// Name shown in audit text: full name when set, otherwise the username.
pub fn display_name<'a>(full_name: Option<&'a str>, username: &'a str) -> &'a str {
    match full_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => username,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana.Perez@Example.COM "), "ana.perez@example.com");
    }

    #[test]
    fn email_shape_is_checked() {
        assert!(validate_email("ana@example.com").is_ok());
        assert!(validate_email("ana.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("ana@example").is_err());
    }

    #[test]
    fn phone_rules() {
        assert!(validate_phone(None).is_ok());
        assert!(validate_phone(Some("+573001234567")).is_ok());
        assert!(validate_phone(Some("3001234")).is_ok());
        assert!(validate_phone(Some("123456")).is_err());
        assert!(validate_phone(Some("300-123-4567")).is_err());
    }

    #[test]
    fn display_name_falls_back_to_username() {
        assert_eq!(display_name(Some("Ana Pérez"), "aperez"), "Ana Pérez");
        assert_eq!(display_name(Some("  "), "aperez"), "aperez");
        assert_eq!(display_name(None, "aperez"), "aperez");
    }

    #[test]
    fn new_user_checks_every_field() {
        assert!(validate_new_user("aperez", " Ana@Example.com ", None, Some("admin")).is_ok());
        assert!(validate_new_user("", "ana@example.com", None, None).is_err());
        assert!(validate_new_user("aperez", "ana@example.com", None, Some("root")).is_err());
        assert!(validate_new_user("aperez", "ana@example.com", Some("12"), None).is_err());
    }
}
