//! Form Validation
//!
//! Pure checks for the registration and login forms. Each check maps a form
//! to either `Ok(())` or the first failing `(field, message)` pair; marking
//! the field in a UI is left to the caller.
//!
//! # Registration order
//!
//! ```text
//! required: name → email → phone → password → confirm → terms
//! cross-field: password == confirm
//! format: email pattern → 10-digit phone → password composition
//! ```

pub mod strength;

pub use strength::{PasswordStrength, StrengthTier, SEGMENT_COUNT};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Symbols accepted by the password composition rule
pub const PASSWORD_SYMBOLS: &str = "@$!%*#?&";

/// Minimum password length in UTF-16 code units
pub const MIN_PASSWORD_LEN: usize = 8;

/// Characters that end a line for the single-line password rule
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// A form field that a validation message is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    Name,
    Email,
    Phone,
    Password,
    ConfirmPassword,
    Terms,
    /// Login "username or email" input
    Identifier,
}

impl Field {
    /// The `name` attribute of the matching form input
    pub fn input_name(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "pNumber",
            Field::Password => "password",
            Field::ConfirmPassword => "cPassword",
            Field::Terms => "terms",
            Field::Identifier => "username",
        }
    }
}

/// A rejected form: the first failing field and a human-readable message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ValidationError {
    pub field: Field,
    pub message: &'static str,
}

impl ValidationError {
    pub fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Raw registration form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub terms_accepted: bool,
}

impl RegistrationForm {
    /// Copy with name, email and phone trimmed. Passwords are kept verbatim.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
            terms_accepted: self.terms_accepted,
        }
    }
}

/// Raw login form values
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    /// Name or email
    pub identifier: String,
    pub password: String,
    pub remember: bool,
}

/// Validate a registration form, reporting only the first failure
pub fn validate_registration(form: &RegistrationForm) -> Result<(), ValidationError> {
    let form = form.normalized();

    // Required fields
    if form.name.is_empty() {
        return Err(ValidationError::new(Field::Name, "Full name is required"));
    }
    if form.email.is_empty() {
        return Err(ValidationError::new(Field::Email, "Email is required"));
    }
    if form.phone.is_empty() {
        return Err(ValidationError::new(Field::Phone, "Phone number is required"));
    }
    if form.password.is_empty() {
        return Err(ValidationError::new(Field::Password, "Password is required"));
    }
    if form.confirm_password.is_empty() {
        return Err(ValidationError::new(
            Field::ConfirmPassword,
            "Please confirm your password",
        ));
    }
    if !form.terms_accepted {
        return Err(ValidationError::new(Field::Terms, "You must agree to the terms"));
    }

    // Cross-field
    if form.password != form.confirm_password {
        return Err(ValidationError::new(
            Field::ConfirmPassword,
            "Passwords do not match",
        ));
    }

    // Formats
    if !is_valid_email(&form.email) {
        return Err(ValidationError::new(Field::Email, "Invalid email"));
    }
    if !is_valid_phone(&form.phone) {
        return Err(ValidationError::new(Field::Phone, "Phone must be 10 digits"));
    }
    if !is_valid_password(&form.password) {
        return Err(ValidationError::new(
            Field::Password,
            "Password must have letters, numbers & symbol",
        ));
    }

    Ok(())
}

/// Validate a login form
pub fn validate_login(form: &LoginForm) -> Result<(), ValidationError> {
    if form.identifier.trim().is_empty() {
        return Err(ValidationError::new(
            Field::Identifier,
            "Username or email required",
        ));
    }
    if form.password.is_empty() {
        return Err(ValidationError::new(Field::Password, "Password is required"));
    }
    Ok(())
}

/// `local@domain.tld` with no whitespace and a single `@`
pub fn is_valid_email(email: &str) -> bool {
    match regex::Regex::new(EMAIL_PATTERN) {
        Ok(re) => re.is_match(email),
        Err(e) => {
            tracing::error!("Email pattern failed to compile: {}", e);
            false
        }
    }
}

/// Exactly ten ASCII digits
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// At least one ASCII letter, one ASCII digit, one of [`PASSWORD_SYMBOLS`],
/// and [`MIN_PASSWORD_LEN`] code units on a single line
pub fn is_valid_password(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
        && utf16_len(password) >= MIN_PASSWORD_LEN
        && !password.contains(&LINE_TERMINATORS[..])
}

/// Length as the browser reports it: characters outside the BMP count twice
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "alice".into(),
            email: "a@x.com".into(),
            phone: "1234567890".into(),
            password: "Abcd123!".into(),
            confirm_password: "Abcd123!".into(),
            terms_accepted: true,
        }
    }

    fn rejected(form: &RegistrationForm) -> ValidationError {
        validate_registration(form).unwrap_err()
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&valid_form()).is_ok());
    }

    #[test]
    fn test_required_fields_in_order() {
        let err = rejected(&RegistrationForm::default());
        assert_eq!(err, ValidationError::new(Field::Name, "Full name is required"));

        let mut form = valid_form();
        form.email = "   ".into();
        form.phone.clear();
        assert_eq!(rejected(&form).field, Field::Email);

        let mut form = valid_form();
        form.phone.clear();
        form.password.clear();
        assert_eq!(rejected(&form).message, "Phone number is required");

        let mut form = valid_form();
        form.password.clear();
        assert_eq!(rejected(&form).message, "Password is required");

        let mut form = valid_form();
        form.confirm_password.clear();
        assert_eq!(rejected(&form).message, "Please confirm your password");
    }

    #[test]
    fn test_terms_before_mismatch() {
        let mut form = valid_form();
        form.terms_accepted = false;
        form.confirm_password = "different1!".into();

        let err = rejected(&form);
        assert_eq!(err.field, Field::Terms);
        assert_eq!(err.message, "You must agree to the terms");
    }

    #[test]
    fn test_mismatch_before_format() {
        let mut form = valid_form();
        form.email = "not-an-email".into();
        form.confirm_password = "Abcd123?".into();

        let err = rejected(&form);
        assert_eq!(err.field, Field::ConfirmPassword);
        assert_eq!(err.message, "Passwords do not match");
    }

    #[test]
    fn test_format_checks() {
        let mut form = valid_form();
        form.email = "a@x".into();
        assert_eq!(rejected(&form), ValidationError::new(Field::Email, "Invalid email"));

        let mut form = valid_form();
        form.phone = "12345".into();
        assert_eq!(rejected(&form).message, "Phone must be 10 digits");

        let mut form = valid_form();
        form.password = "abcdefgh".into();
        form.confirm_password = "abcdefgh".into();
        assert_eq!(
            rejected(&form).message,
            "Password must have letters, numbers & symbol"
        );
    }

    #[test]
    fn test_trimmed_fields() {
        let mut form = valid_form();
        form.name = "  alice ".into();
        form.email = " a@x.com ".into();
        assert!(validate_registration(&form).is_ok());
        assert_eq!(form.normalized().email, "a@x.com");
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("a@@x.com"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email("a@xcom"));
        assert!(!is_valid_email("@x.com"));
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("0123456789"));
        assert!(!is_valid_phone("012345678"));
        assert!(!is_valid_phone("01234567890"));
        assert!(!is_valid_phone("01234-6789"));
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn test_password_composition() {
        assert!(is_valid_password("Abcd123!"));
        assert!(is_valid_password("zzzz999#"));
        assert!(!is_valid_password("Abc123!")); // too short
        assert!(!is_valid_password("Abcd1234")); // no symbol
        assert!(!is_valid_password("Abcd123^")); // symbol outside the set
        assert!(!is_valid_password("12345678!")); // no letter
        assert!(!is_valid_password("Abcdefg!")); // no digit
    }

    #[test]
    fn test_password_length_in_code_units() {
        assert_eq!(utf16_len("Abc1!😀😀"), 9);
        assert!(is_valid_password("Abc1!😀😀"));
        assert!(!is_valid_password("Abc1!éé")); // 7 code units

        assert!(!is_valid_password("Abcd123!\n"));
        assert!(!is_valid_password("Abcd\u{2028}123!"));
        assert!(!is_valid_password("Abcd\u{2029}123!"));
    }

    #[test]
    fn test_login_validation() {
        let form = LoginForm {
            identifier: "  ".into(),
            password: "x".into(),
            remember: false,
        };
        assert_eq!(
            validate_login(&form).unwrap_err(),
            ValidationError::new(Field::Identifier, "Username or email required")
        );

        let form = LoginForm {
            identifier: "alice".into(),
            password: String::new(),
            remember: true,
        };
        assert_eq!(validate_login(&form).unwrap_err().field, Field::Password);

        let form = LoginForm {
            identifier: "alice".into(),
            password: "Abcd123!".into(),
            remember: false,
        };
        assert!(validate_login(&form).is_ok());
    }

    #[test]
    fn test_input_names() {
        assert_eq!(Field::Phone.input_name(), "pNumber");
        assert_eq!(Field::ConfirmPassword.input_name(), "cPassword");
        assert_eq!(Field::Identifier.input_name(), "username");
    }
}
