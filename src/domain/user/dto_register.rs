use serde::Deserialize;
use validator::Validate;

/// Self-registration payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 4, max = 72))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub matching_password: String,
    #[validate(length(min = 1, max = 80))]
    pub city: String,
    #[validate(length(min = 1, max = 120))]
    pub street: String,
    #[validate(length(min = 1, max = 10))]
    pub house_number: String,
    #[validate(length(min = 1, max = 10))]
    pub postal_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RegisterUser {
        RegisterUser {
            first_name: "Anna".into(),
            last_name: "Nowak".into(),
            email: "anna@example.com".into(),
            password: "secret".into(),
            matching_password: "secret".into(),
            city: "Wrocław".into(),
            street: "Warszawska".into(),
            house_number: "34".into(),
            postal_code: "71-000".into(),
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn mismatched_passwords_fail() {
        let mut dto = sample();
        dto.matching_password = "other".into();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("matching_password"));
    }

    #[test]
    fn bad_email_fails() {
        let mut dto = sample();
        dto.email = "not-an-email".into();
        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }
}
