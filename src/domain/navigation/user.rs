//! User details captured at session creation.

use serde::{Deserialize, Serialize};

use super::errors::NavigationError;

/// Minimum characters in a trimmed name.
const MIN_NAME_LENGTH: usize = 2;

/// Validated user details.
///
/// Validation happens once at session creation and is never repeated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    name: String,
    phone: String,
}

impl UserInfo {
    /// Validates and constructs user details.
    ///
    /// The phone must be a 10-digit Indian mobile number (first digit
    /// 6-9). The name must have at least 2 characters after trimming.
    /// Violations are reported, never silently corrected.
    pub fn new(name: &str, phone: &str) -> Result<Self, NavigationError> {
        let name = name.trim();
        if name.chars().count() < MIN_NAME_LENGTH {
            return Err(NavigationError::validation(
                "name",
                "please enter your full name",
            ));
        }

        let phone = phone.trim();
        if !Self::is_valid_phone(phone) {
            return Err(NavigationError::validation(
                "phone",
                "please enter a valid 10-digit Indian mobile number",
            ));
        }

        Ok(Self {
            name: name.to_string(),
            phone: phone.to_string(),
        })
    }

    fn is_valid_phone(phone: &str) -> bool {
        let bytes = phone.as_bytes();
        bytes.len() == 10
            && (b'6'..=b'9').contains(&bytes[0])
            && bytes.iter().all(u8::is_ascii_digit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_details() {
        let user = UserInfo::new("Asha Devi", "9876543210").unwrap();
        assert_eq!(user.name(), "Asha Devi");
        assert_eq!(user.phone(), "9876543210");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let user = UserInfo::new("  Asha  ", " 9876543210 ").unwrap();
        assert_eq!(user.name(), "Asha");
        assert_eq!(user.phone(), "9876543210");
    }

    #[test]
    fn rejects_phone_with_low_leading_digit() {
        let err = UserInfo::new("Asha", "1234567890").unwrap_err();
        assert!(matches!(err, NavigationError::Validation { field: "phone", .. }));
    }

    #[test]
    fn rejects_phone_of_wrong_length() {
        assert!(UserInfo::new("Asha", "98765").is_err());
        assert!(UserInfo::new("Asha", "98765432109").is_err());
    }

    #[test]
    fn rejects_phone_with_non_digits() {
        assert!(UserInfo::new("Asha", "98765abcde").is_err());
    }

    #[test]
    fn rejects_short_name() {
        let err = UserInfo::new(" a ", "9876543210").unwrap_err();
        assert!(matches!(err, NavigationError::Validation { field: "name", .. }));
    }
}
