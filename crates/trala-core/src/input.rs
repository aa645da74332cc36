//! Raw request input and the field rules that turn it into validated
//! [`NewContact`] and [`ContactPatch`] values.
//!
//! | Field | Rule |
//! |-------|------|
//! | `email` | 1–255 chars; required on create |
//! | `first_name`, `middle_initial`, `last_name` | 1–128 chars |
//! | `birth_date` | `YYYY-MM-DD`, not after today |
//! | `country_code` | 1–8 chars |
//! | `phone_number` | 1–24 chars |

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
  contact::{ContactPatch, NewContact},
  error::{Error, FieldError, Result},
};

/// Wire format of a calendar date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Exact length of a hyphenated contact id.
pub const ID_LEN: usize = 36;

// ─── Rules ───────────────────────────────────────────────────────────────────

struct TextRule {
  field: &'static str,
  max:   usize,
}

const EMAIL: TextRule = TextRule { field: "email", max: 255 };
const FIRST_NAME: TextRule = TextRule { field: "first_name", max: 128 };
const MIDDLE_INITIAL: TextRule = TextRule { field: "middle_initial", max: 128 };
const LAST_NAME: TextRule = TextRule { field: "last_name", max: 128 };
const COUNTRY_CODE: TextRule = TextRule { field: "country_code", max: 8 };
const PHONE_NUMBER: TextRule = TextRule { field: "phone_number", max: 24 };

impl TextRule {
  fn check(
    &self,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
  ) -> Option<String> {
    let value = value?;
    let len = value.chars().count();
    if len == 0 {
      errors.push(FieldError::new(self.field, "is not allowed to be empty"));
      return None;
    }
    if len > self.max {
      errors.push(FieldError::new(
        self.field,
        format!("length must be less than or equal to {} characters long", self.max),
      ));
      return None;
    }
    Some(value)
  }
}

fn check_date(
  value: Option<String>,
  errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
  let value = value?;
  // chrono tolerates unpadded fields, signs, and leading whitespace; only
  // the canonical rendering is accepted.
  match NaiveDate::parse_from_str(&value, DATE_FORMAT) {
    Ok(date) if date.format(DATE_FORMAT).to_string() == value => Some(date),
    _ => {
      errors.push(FieldError::new("birth_date", "must be in YYYY-MM-DD format"));
      None
    }
  }
}

/// Reject a birth date strictly later than `today`. Today itself is allowed.
pub fn check_birth_date(birth_date: Option<NaiveDate>, today: NaiveDate) -> Result<()> {
  match birth_date {
    Some(date) if date > today => Err(Error::invalid("birth_date", "must be in the past")),
    _ => Ok(()),
  }
}

/// Parse a target id for update or deactivation.
///
/// The id must be exactly [`ID_LEN`] characters and a hyphenated UUID.
pub fn parse_contact_id(raw: &str) -> Result<Uuid> {
  if raw.chars().count() != ID_LEN {
    return Err(Error::invalid("id", format!("length must be {ID_LEN} characters long")));
  }
  Uuid::parse_str(raw).map_err(|_| Error::invalid("id", "must be a valid identifier"))
}

// ─── Raw input ───────────────────────────────────────────────────────────────

/// JSON body accepted by the create and update endpoints.
///
/// Every field is optional at this level; whether `email` is required
/// depends on the operation. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactInput {
  pub email:          Option<String>,
  pub first_name:     Option<String>,
  pub middle_initial: Option<String>,
  pub last_name:      Option<String>,
  pub birth_date:     Option<String>,
  pub country_code:   Option<String>,
  pub phone_number:   Option<String>,
}

impl ContactInput {
  /// Validate for creation. All offending fields are reported together.
  pub fn into_new_contact(self, today: NaiveDate) -> Result<NewContact> {
    let mut errors = Vec::new();

    if self.email.is_none() {
      errors.push(FieldError::new("email", "is required"));
    }
    let patch = self.check_fields(&mut errors);
    if !errors.is_empty() {
      return Err(Error::Validation(errors));
    }
    check_birth_date(patch.birth_date, today)?;

    let Some(email) = patch.email else {
      return Err(Error::invalid("email", "is required"));
    };
    Ok(NewContact {
      email,
      first_name: patch.first_name,
      middle_initial: patch.middle_initial,
      last_name: patch.last_name,
      birth_date: patch.birth_date,
      country_code: patch.country_code,
      phone_number: patch.phone_number,
    })
  }

  /// Validate as a partial update; nothing is required.
  pub fn into_patch(self, today: NaiveDate) -> Result<ContactPatch> {
    let mut errors = Vec::new();
    let patch = self.check_fields(&mut errors);
    if !errors.is_empty() {
      return Err(Error::Validation(errors));
    }
    check_birth_date(patch.birth_date, today)?;
    Ok(patch)
  }

  fn check_fields(self, errors: &mut Vec<FieldError>) -> ContactPatch {
    ContactPatch {
      email:          EMAIL.check(self.email, errors),
      first_name:     FIRST_NAME.check(self.first_name, errors),
      middle_initial: MIDDLE_INITIAL.check(self.middle_initial, errors),
      last_name:      LAST_NAME.check(self.last_name, errors),
      birth_date:     check_date(self.birth_date, errors),
      country_code:   COUNTRY_CODE.check(self.country_code, errors),
      phone_number:   PHONE_NUMBER.check(self.phone_number, errors),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn today() -> NaiveDate { NaiveDate::from_ymd_opt(2024, 6, 15).unwrap() }

  #[test]
  fn create_requires_email() {
    let err = ContactInput::default().into_new_contact(today()).unwrap_err();
    assert_eq!(err.fields(), vec!["email"]);
  }

  #[test]
  fn create_reports_every_offending_field() {
    let input = ContactInput {
      email: Some(String::new()),
      country_code: Some("123456789".into()),
      birth_date: Some("15/06/2024".into()),
      ..Default::default()
    };
    let err = input.into_new_contact(today()).unwrap_err();
    assert_eq!(err.fields(), vec!["email", "birth_date", "country_code"]);
  }

  #[test]
  fn lengths_are_counted_in_characters() {
    let input = ContactInput {
      email: Some("a@x.com".into()),
      country_code: Some("ÄÖÜßÄÖÜß".into()),
      ..Default::default()
    };
    assert!(input.into_new_contact(today()).is_ok());
  }

  #[test]
  fn upper_length_bounds_are_inclusive() {
    let input = ContactInput {
      email: Some("e".repeat(255)),
      first_name: Some("f".repeat(128)),
      phone_number: Some("1".repeat(24)),
      ..Default::default()
    };
    assert!(input.into_new_contact(today()).is_ok());

    let input = ContactInput {
      email: Some("e".repeat(256)),
      phone_number: Some("1".repeat(25)),
      ..Default::default()
    };
    let err = input.into_new_contact(today()).unwrap_err();
    assert_eq!(err.fields(), vec!["email", "phone_number"]);
  }

  #[test]
  fn birth_date_today_is_accepted_tomorrow_is_not() {
    let input = ContactInput {
      email: Some("a@x.com".into()),
      birth_date: Some("2024-06-15".into()),
      ..Default::default()
    };
    let new = input.into_new_contact(today()).unwrap();
    assert_eq!(new.birth_date, Some(today()));

    let input = ContactInput {
      birth_date: Some("2024-06-16".into()),
      ..Default::default()
    };
    let err = input.into_patch(today()).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(err.fields(), vec!["birth_date"]);
  }

  #[test]
  fn empty_patch_is_valid() {
    let patch = ContactInput::default().into_patch(today()).unwrap();
    assert_eq!(patch, ContactPatch::default());
  }

  #[test]
  fn birth_date_must_be_canonical_yyyy_mm_dd() {
    for raw in ["2024-6-5", "+2024-06-05", " 2024-06-05", "2024-06-05 ", "2024-02-30", "24-06-05"] {
      let input = ContactInput {
        email: Some("a@x.com".into()),
        birth_date: Some(raw.into()),
        ..Default::default()
      };
      let err = input.into_new_contact(today()).unwrap_err();
      assert_eq!(err.fields(), vec!["birth_date"], "accepted {raw:?}");
    }

    let input = ContactInput { birth_date: Some("2024-06-05".into()), ..Default::default() };
    let patch = input.into_patch(today()).unwrap();
    assert_eq!(patch.birth_date, NaiveDate::from_ymd_opt(2024, 6, 5));
  }

  #[test]
  fn unknown_keys_are_rejected() {
    let result: std::result::Result<ContactInput, _> =
      serde_json::from_str(r#"{"email":"a@x.com","is_active":false}"#);
    assert!(result.is_err());
  }

  #[test]
  fn contact_id_must_be_hyphenated_uuid() {
    let id = Uuid::new_v4();
    assert_eq!(parse_contact_id(&id.to_string()).unwrap(), id);

    let err = parse_contact_id(&id.simple().to_string()).unwrap_err();
    assert_eq!(err.fields(), vec!["id"]);

    let err = parse_contact_id(&"z".repeat(ID_LEN)).unwrap_err();
    assert_eq!(err.fields(), vec!["id"]);
  }
}
