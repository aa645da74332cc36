//! The contact record, its soft-delete status, and validated inputs.
//!
//! A contact is created active and may later be soft-deleted by flipping its
//! status to [`ContactStatus::Inactive`]. No operation ever moves a contact
//! back to `Active`, and no row is ever removed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Soft-delete state of a contact.
///
/// `Inactive` is terminal. On the wire the status is the boolean `is_active`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactStatus {
  #[default]
  Active,
  Inactive,
}

impl ContactStatus {
  pub fn is_active(self) -> bool { matches!(self, Self::Active) }

  pub fn from_flag(is_active: bool) -> Self {
    if is_active { Self::Active } else { Self::Inactive }
  }
}

/// Serde adapter that renders [`ContactStatus`] as a plain boolean.
mod status_flag {
  use serde::{Deserialize, Deserializer, Serializer};

  use super::ContactStatus;

  pub fn serialize<S: Serializer>(
    status: &ContactStatus,
    serializer: S,
  ) -> Result<S::Ok, S::Error> {
    serializer.serialize_bool(status.is_active())
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(
    deserializer: D,
  ) -> Result<ContactStatus, D::Error> {
    bool::deserialize(deserializer).map(ContactStatus::from_flag)
  }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A contact record exactly as held by the store.
///
/// Absent optional fields are `None` and serialise as JSON `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
  pub id:             Uuid,
  pub email:          String,
  pub first_name:     Option<String>,
  pub middle_initial: Option<String>,
  pub last_name:      Option<String>,
  pub birth_date:     Option<NaiveDate>,
  pub country_code:   Option<String>,
  pub phone_number:   Option<String>,
  #[serde(rename = "is_active", with = "status_flag")]
  pub status:         ContactStatus,
}

// ─── Validated inputs ────────────────────────────────────────────────────────

/// Validated input for creating a contact. Produced by
/// [`ContactInput::into_new_contact`](crate::input::ContactInput::into_new_contact).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
  pub email:          String,
  pub first_name:     Option<String>,
  pub middle_initial: Option<String>,
  pub last_name:      Option<String>,
  pub birth_date:     Option<NaiveDate>,
  pub country_code:   Option<String>,
  pub phone_number:   Option<String>,
}

impl NewContact {
  /// Build the full record under a freshly assigned id. New contacts always
  /// start `Active`.
  pub fn into_contact(self, id: Uuid) -> Contact {
    Contact {
      id,
      email:          self.email,
      first_name:     self.first_name,
      middle_initial: self.middle_initial,
      last_name:      self.last_name,
      birth_date:     self.birth_date,
      country_code:   self.country_code,
      phone_number:   self.phone_number,
      status:         ContactStatus::Active,
    }
  }
}

/// Validated partial update. `Some` marks a field supplied by the caller;
/// `None` means "keep the stored value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactPatch {
  pub email:          Option<String>,
  pub first_name:     Option<String>,
  pub middle_initial: Option<String>,
  pub last_name:      Option<String>,
  pub birth_date:     Option<NaiveDate>,
  pub country_code:   Option<String>,
  pub phone_number:   Option<String>,
}

impl ContactPatch {
  /// Overwrite every supplied field on `contact`. The id and status are
  /// never touched.
  pub fn apply(self, mut contact: Contact) -> Contact {
    if let Some(email) = self.email {
      contact.email = email;
    }
    if self.first_name.is_some() {
      contact.first_name = self.first_name;
    }
    if self.middle_initial.is_some() {
      contact.middle_initial = self.middle_initial;
    }
    if self.last_name.is_some() {
      contact.last_name = self.last_name;
    }
    if self.birth_date.is_some() {
      contact.birth_date = self.birth_date;
    }
    if self.country_code.is_some() {
      contact.country_code = self.country_code;
    }
    if self.phone_number.is_some() {
      contact.phone_number = self.phone_number;
    }
    contact
  }
}
