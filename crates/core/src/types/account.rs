//! Account record and the inputs that create or modify it.

use serde::{Deserialize, Serialize};

use super::validation::require;
use crate::{AccountId, Email, Password, RoleType, ValidationError};

/// A persisted user account.
///
/// Serialized with camelCase field names (`phoneNumber`, `roleType`), which
/// is the persisted layout of the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Unique id, immutable once assigned.
    pub id: AccountId,
    /// Login lookup key.
    pub email: Email,
    /// Plain-text password.
    pub password: Password,
    /// Display name.
    pub name: String,
    /// Free-form phone number.
    pub phone_number: String,
    /// User or admin.
    pub role_type: RoleType,
}

impl Account {
    /// Check an edited copy of `stored` before it is written back.
    ///
    /// The password length is only checked when the password changed, so a
    /// record saved under a looser policy stays editable.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Required` for an empty name, phone number or
    /// password and `ValidationError::PasswordTooShort` for a new password
    /// below `min_password_length`.
    pub fn validate_edit(
        &self,
        stored: &Self,
        min_password_length: usize,
    ) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("phoneNumber", &self.phone_number)?;
        if self.password == stored.password {
            require("password", self.password.expose())
        } else {
            validate_password(&self.password, min_password_length)
        }
    }

    /// Returns `true` when email, password and role all match exactly.
    #[must_use]
    pub fn matches_credentials(&self, email: &str, password: &str, role_type: RoleType) -> bool {
        self.email.as_str() == email
            && self.password.matches(password)
            && self.role_type == role_type
    }
}

/// Registration input, as typed by the user.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Display name.
    pub name: String,
    /// Email address (parsed during validation).
    pub email: String,
    /// Phone number.
    pub phone_number: String,
    /// Password.
    pub password: Password,
    /// Requested role.
    pub role_type: RoleType,
}

impl NewAccount {
    /// Validate the input and build the account under `id`.
    ///
    /// Name, email and phone number are trimmed; the password is kept
    /// verbatim.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for the first field that fails.
    pub fn into_account(
        self,
        id: AccountId,
        min_password_length: usize,
    ) -> Result<Account, ValidationError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phoneNumber", &self.phone_number)?;
        validate_password(&self.password, min_password_length)?;

        let email = Email::parse(self.email.trim())?;

        Ok(Account {
            id,
            email,
            password: self.password,
            name: self.name.trim().to_owned(),
            phone_number: self.phone_number.trim().to_owned(),
            role_type: self.role_type,
        })
    }
}

/// Partial profile edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    /// New display name.
    pub name: Option<String>,
    /// New phone number.
    pub phone_number: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New password.
    pub password: Option<Password>,
}

impl ProfileChanges {
    /// Returns `true` if no field is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone_number.is_none()
            && self.email.is_none()
            && self.password.is_none()
    }

    /// Produce the edited copy of `account`. The id and role never change.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidEmail` if a new email is malformed.
    /// The remaining fields are checked by [`Account::validate`].
    pub fn apply(self, account: &Account) -> Result<Account, ValidationError> {
        let mut edited = account.clone();
        if let Some(name) = self.name {
            edited.name = name.trim().to_owned();
        }
        if let Some(phone_number) = self.phone_number {
            edited.phone_number = phone_number.trim().to_owned();
        }
        if let Some(email) = self.email {
            edited.email = Email::parse(email.trim())?;
        }
        if let Some(password) = self.password {
            edited.password = password;
        }
        Ok(edited)
    }
}

/// Where the presentation layer sends an account after login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    /// The admin-only account list.
    UserList,
    /// The profile page of the given account.
    Profile(AccountId),
}

impl Landing {
    /// Admins land on the account list, users on their own profile.
    #[must_use]
    pub fn for_account(account: &Account) -> Self {
        match account.role_type {
            RoleType::Admin => Self::UserList,
            RoleType::User => Self::Profile(account.id.clone()),
        }
    }
}

fn validate_password(password: &Password, min: usize) -> Result<(), ValidationError> {
    require("password", password.expose())?;
    if password.char_len() < min {
        return Err(ValidationError::PasswordTooShort { min });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn new_account() -> NewAccount {
        NewAccount {
            name: " A ".to_owned(),
            email: "a@x.com".to_owned(),
            phone_number: "1".to_owned(),
            password: Password::new("pass1"),
            role_type: RoleType::User,
        }
    }

    #[test]
    fn test_into_account_trims_fields() {
        let account = new_account()
            .into_account(AccountId::new("id-1"), 5)
            .unwrap();
        assert_eq!(account.id.as_str(), "id-1");
        assert_eq!(account.name, "A");
        assert_eq!(account.email.as_str(), "a@x.com");
        assert_eq!(account.role_type, RoleType::User);
    }

    #[test]
    fn test_into_account_requires_every_field() {
        let mut input = new_account();
        input.phone_number = "   ".to_owned();
        assert_eq!(
            input.into_account(AccountId::generate(), 5),
            Err(ValidationError::Required {
                field: "phoneNumber"
            })
        );

        let mut input = new_account();
        input.name = String::new();
        assert_eq!(
            input.into_account(AccountId::generate(), 5),
            Err(ValidationError::Required { field: "name" })
        );
    }

    #[test]
    fn test_into_account_rejects_short_password() {
        let mut input = new_account();
        input.password = Password::new("abc");
        assert_eq!(
            input.into_account(AccountId::generate(), 6),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn test_into_account_rejects_bad_email() {
        let mut input = new_account();
        input.email = "not-an-email".to_owned();
        assert!(matches!(
            input.into_account(AccountId::generate(), 5),
            Err(ValidationError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_account_json_layout() {
        let account = new_account()
            .into_account(AccountId::new("42"), 5)
            .unwrap();
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "42",
                "email": "a@x.com",
                "password": "pass1",
                "name": "A",
                "phoneNumber": "1",
                "roleType": "user",
            })
        );
    }

    #[test]
    fn test_matches_credentials_requires_all_three() {
        let account = new_account()
            .into_account(AccountId::generate(), 5)
            .unwrap();
        assert!(account.matches_credentials("a@x.com", "pass1", RoleType::User));
        assert!(!account.matches_credentials("b@x.com", "pass1", RoleType::User));
        assert!(!account.matches_credentials("a@x.com", "pass2", RoleType::User));
        assert!(!account.matches_credentials("a@x.com", "pass1", RoleType::Admin));
    }

    #[test]
    fn test_profile_changes_keep_id_and_role() {
        let account = new_account()
            .into_account(AccountId::new("7"), 5)
            .unwrap();
        let changes = ProfileChanges {
            name: Some("Renamed".to_owned()),
            phone_number: Some("555".to_owned()),
            ..ProfileChanges::default()
        };
        let edited = changes.apply(&account).unwrap();
        assert_eq!(edited.id, account.id);
        assert_eq!(edited.role_type, account.role_type);
        assert_eq!(edited.name, "Renamed");
        assert_eq!(edited.phone_number, "555");
        assert_eq!(edited.email, account.email);
    }

    #[test]
    fn test_validate_edit_checks_length_only_for_new_password() {
        let stored = new_account()
            .into_account(AccountId::new("3"), 1)
            .unwrap();

        let mut renamed = stored.clone();
        renamed.name = "B".to_owned();
        assert_eq!(renamed.validate_edit(&stored, 6), Ok(()));

        let mut repassworded = stored.clone();
        repassworded.password = Password::new("abc");
        assert_eq!(
            repassworded.validate_edit(&stored, 6),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );

        let mut blanked = stored.clone();
        blanked.phone_number = " ".to_owned();
        assert_eq!(
            blanked.validate_edit(&stored, 6),
            Err(ValidationError::Required {
                field: "phoneNumber"
            })
        );
    }

    #[test]
    fn test_landing_depends_on_role() {
        let mut account = new_account()
            .into_account(AccountId::new("9"), 5)
            .unwrap();
        assert_eq!(
            Landing::for_account(&account),
            Landing::Profile(AccountId::new("9"))
        );
        account.role_type = RoleType::Admin;
        assert_eq!(Landing::for_account(&account), Landing::UserList);
    }
}
