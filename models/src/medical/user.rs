// models/src/medical/user.rs

use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::UserId;

pub const MIN_PASSWORD_LEN: usize = 4;
pub const DEFAULT_GENDER: &str = "Male";

/// A patient row exactly as `GET /users` returns it, plaintext password
/// included. Never hand this to the session or print it; convert it with
/// [`PublicUser::from`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl User {
    /// Exact, case-sensitive credential match.
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

/// The logged-in user as the rest of the client sees it: a `User` without
/// its password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub user_id: UserId,
    pub name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub contact_number: Option<String>,
    pub email: String,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            user_id: user.user_id,
            name: user.name,
            age: user.age,
            gender: user.gender,
            contact_number: user.contact_number,
            email: user.email,
        }
    }
}

/// Registration form. `confirm_password` only exists client-side and is
/// never serialized into the request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub age: Option<u32>,
    pub gender: String,
    pub contact_number: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
}

impl Default for NewUser {
    fn default() -> Self {
        NewUser {
            name: String::new(),
            age: None,
            gender: DEFAULT_GENDER.to_string(),
            contact_number: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
        }
    }
}

impl NewUser {
    /// Checks the form, reporting the first rule that fails.
    pub fn validate(&self) -> ValidationResult<()> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::Required("Name"));
        }
        match self.age {
            Some(age) if (1..=120).contains(&age) => {}
            _ => return Err(ValidationError::InvalidAge),
        }
        if self.contact_number.trim().is_empty() {
            return Err(ValidationError::Required("Contact number"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::Required("Email"));
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort(MIN_PASSWORD_LEN));
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> NewUser {
        NewUser {
            name: "Asha Rao".to_string(),
            age: Some(34),
            contact_number: "555-0100".to_string(),
            email: "asha@example.com".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            ..NewUser::default()
        }
    }

    #[test]
    fn accepts_a_complete_form() {
        assert_eq!(valid_form().validate(), Ok(()));
        assert_eq!(valid_form().gender, "Male");
    }

    #[test]
    fn reports_the_first_failing_rule() {
        let mut form = valid_form();
        form.name = "  ".to_string();
        form.age = Some(0);
        assert_eq!(form.validate(), Err(ValidationError::Required("Name")));

        let mut form = valid_form();
        form.age = Some(121);
        assert_eq!(form.validate(), Err(ValidationError::InvalidAge));

        let mut form = valid_form();
        form.age = None;
        assert_eq!(form.validate(), Err(ValidationError::InvalidAge));

        let mut form = valid_form();
        form.email = "asha.example.com".to_string();
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));

        let mut form = valid_form();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort(4)));

        let mut form = valid_form();
        form.confirm_password = "secreT".to_string();
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));
    }

    #[test]
    fn public_user_has_no_password_key() {
        let user = User {
            user_id: 1,
            name: "A".to_string(),
            age: None,
            gender: None,
            contact_number: None,
            email: "a@x.com".to_string(),
            password: "pw".to_string(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn confirmation_is_not_sent() {
        let json = serde_json::to_value(valid_form()).unwrap();
        assert!(json.get("confirm_password").is_none());
        assert_eq!(json["password"], "secret");
    }

    #[test]
    fn decodes_sparse_backend_rows() {
        let user: User = serde_json::from_str(
            r#"{"user_id": 3, "name": "B", "email": "b@x.com", "password": "pw", "age": null}"#,
        )
        .unwrap();
        assert_eq!(user.age, None);
        assert!(user.matches_credentials("b@x.com", "pw"));
        assert!(!user.matches_credentials("B@x.com", "pw"));
    }
}
