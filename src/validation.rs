use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
// ASCII digits only, like the browser's \d.
static PHONE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-+()]+$").expect("phone pattern compiles"));

const PHONE_MIN_LEN: usize = 10;

pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Loose on purpose: spaces, dashes, `+` and parentheses count toward the
/// minimum length, so `"(12) 34-56"` passes.
pub fn validate_phone(phone: &str) -> bool {
    PHONE.is_match(phone) && phone.chars().count() >= PHONE_MIN_LEN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    Required,
    InvalidEmail,
    InvalidPhone,
}

impl FieldError {
    pub fn message(self) -> &'static str {
        match self {
            FieldError::Required => "This field is required",
            FieldError::InvalidEmail => "Please enter a valid email address",
            FieldError::InvalidPhone => "Please enter a valid phone number",
        }
    }
}

/// What the validator needs to know about a `[required]` form control.
#[derive(Debug, Clone, Copy)]
pub struct RequiredField<'a> {
    pub value: &'a str,
    pub input_type: &'a str,
    pub name: &'a str,
}

impl RequiredField<'_> {
    /// At most one error per field; an empty value wins over format
    /// problems.
    pub fn validate(&self) -> Option<FieldError> {
        if self.value.trim().is_empty() {
            Some(FieldError::Required)
        } else if self.input_type == "email" && !validate_email(self.value) {
            Some(FieldError::InvalidEmail)
        } else if self.name == "phone" && !validate_phone(self.value) {
            Some(FieldError::InvalidPhone)
        } else {
            None
        }
    }
}

pub fn validate_fields(fields: &[RequiredField<'_>]) -> Vec<Option<FieldError>> {
    fields.iter().map(RequiredField::validate).collect()
}

/// Outcome of one submit, indexed like the form's required fields.
#[derive(Debug, Default)]
pub struct FormErrors {
    errors: Vec<Option<FieldError>>,
}

impl FormErrors {
    /// Returns true when the form may be submitted.
    pub fn submit(&mut self, fields: &[RequiredField<'_>]) -> bool {
        self.errors = validate_fields(fields);
        self.errors.iter().all(Option::is_none)
    }

    pub fn error(&self, index: usize) -> Option<FieldError> {
        self.errors.get(index).copied().flatten()
    }

    pub fn count(&self) -> usize {
        self.errors.iter().flatten().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> RequiredField<'_> {
        RequiredField {
            value,
            input_type: "text",
            name: "full_name",
        }
    }

    #[test]
    fn email_examples() {
        assert!(validate_email("a@b.co"));
        assert!(validate_email("orders@ntandostore.co.zw"));
        assert!(!validate_email("a@b"));
        assert!(!validate_email("a b@c.com"));
        assert!(!validate_email("a@@b.com"));
        assert!(!validate_email(""));
    }

    #[test]
    fn phone_examples() {
        assert!(validate_phone("+1 234 567 8901"));
        assert!(validate_phone("0771234567"));
        assert!(!validate_phone("12345"));
        assert!(!validate_phone("123-abc-4567"));
    }

    #[test]
    fn phone_counts_formatting_characters() {
        // Six digits, but ten characters in total.
        assert!(validate_phone("(12) 34-56"));
        assert!(!validate_phone("(12)34-56"));
    }

    #[test]
    fn phone_rejects_non_ascii_digits() {
        assert!(!validate_phone("٠١٢٣٤٥٦٧٨٩"));
    }

    #[test]
    fn blank_required_field() {
        assert_eq!(text("").validate(), Some(FieldError::Required));
        assert_eq!(text("   ").validate(), Some(FieldError::Required));
        assert_eq!(text("Tendai").validate(), None);
    }

    #[test]
    fn email_and_phone_fields_check_format() {
        let email = RequiredField {
            value: "not-an-email",
            input_type: "email",
            name: "email",
        };
        assert_eq!(email.validate(), Some(FieldError::InvalidEmail));

        let phone = RequiredField {
            value: "12345",
            input_type: "tel",
            name: "phone",
        };
        assert_eq!(phone.validate(), Some(FieldError::InvalidPhone));
    }

    #[test]
    fn one_error_per_offending_field() {
        let fields = [text(""), text("ok"), text(" ")];
        let errors = validate_fields(&fields);
        assert_eq!(errors, vec![Some(FieldError::Required), None, Some(FieldError::Required)]);
        assert_eq!(errors.iter().flatten().count(), 2);
    }

    #[test]
    fn empty_submit_blocks_and_flags_each_field() {
        let mut form = FormErrors::default();
        assert!(!form.submit(&[text(""), text(""), text("filled")]));
        assert_eq!(form.count(), 2);
        assert_eq!(form.error(0), Some(FieldError::Required));
        assert_eq!(form.error(1), Some(FieldError::Required));
        assert_eq!(form.error(2), None);
    }

    #[test]
    fn fixed_fields_pass_on_resubmit() {
        let mut form = FormErrors::default();
        assert!(!form.submit(&[text("")]));
        assert!(form.submit(&[text("Harare")]));
        assert_eq!(form.count(), 0);
    }

    #[test]
    fn messages() {
        assert_eq!(FieldError::Required.message(), "This field is required");
        assert_eq!(FieldError::InvalidEmail.message(), "Please enter a valid email address");
        assert_eq!(FieldError::InvalidPhone.message(), "Please enter a valid phone number");
    }
}
