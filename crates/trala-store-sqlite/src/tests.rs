//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use trala_core::{
  contact::{Contact, ContactStatus},
  store::{ContactStore, StoreError},
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn contact(email: &str) -> Contact {
  Contact {
    id:             Uuid::new_v4(),
    email:          email.into(),
    first_name:     Some("Alice".into()),
    middle_initial: None,
    last_name:      Some("Liddell".into()),
    birth_date:     NaiveDate::from_ymd_opt(1990, 1, 31),
    country_code:   None,
    phone_number:   Some("+44 20 7946 0000".into()),
    status:         ContactStatus::Active,
  }
}

// ─── Insert / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn insert_returns_row_as_stored() {
  let s = store().await;
  let input = contact("alice@example.com");

  let stored = s.insert_contact(input.clone()).await.unwrap();
  assert_eq!(stored, input);

  let fetched = s.get_contact(input.id).await.unwrap();
  assert_eq!(fetched, Some(input));
}

#[tokio::test]
async fn absent_fields_roundtrip_as_null() {
  let s = store().await;
  let input = Contact {
    first_name: None,
    last_name: None,
    birth_date: None,
    phone_number: None,
    ..contact("bare@example.com")
  };

  s.insert_contact(input.clone()).await.unwrap();
  let fetched = s.get_contact(input.id).await.unwrap().unwrap();
  assert_eq!(fetched.first_name, None);
  assert_eq!(fetched.birth_date, None);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_contact(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn list_returns_every_row() {
  let s = store().await;
  assert!(s.list_contacts().await.unwrap().is_empty());

  let a = s.insert_contact(contact("a@example.com")).await.unwrap();
  s.insert_contact(contact("b@example.com")).await.unwrap();
  s.set_status(a.id, ContactStatus::Inactive).await.unwrap();

  let all = s.list_contacts().await.unwrap();
  assert_eq!(all.len(), 2);
}

// ─── Email lookups ───────────────────────────────────────────────────────────

#[tokio::test]
async fn find_by_email_honours_exclusion() {
  let s = store().await;
  let a = s.insert_contact(contact("a@example.com")).await.unwrap();

  let found = s.find_by_email("a@example.com", None).await.unwrap();
  assert_eq!(found.map(|c| c.id), Some(a.id));

  assert!(s.find_by_email("a@example.com", Some(a.id)).await.unwrap().is_none());
  assert!(
    s.find_by_email("a@example.com", Some(Uuid::new_v4()))
      .await
      .unwrap()
      .is_some()
  );
  assert!(s.find_by_email("A@example.com", None).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_email_insert_is_unique_violation() {
  let s = store().await;
  s.insert_contact(contact("a@example.com")).await.unwrap();

  let err = s.insert_contact(contact("a@example.com")).await.unwrap_err();
  assert!(err.is_unique_violation(), "unexpected error: {err}");
  assert_eq!(s.list_contacts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_email_update_is_unique_violation() {
  let s = store().await;
  s.insert_contact(contact("a@example.com")).await.unwrap();
  let b = s.insert_contact(contact("b@example.com")).await.unwrap();

  let err = s
    .update_contact(Contact { email: "a@example.com".into(), ..b })
    .await
    .unwrap_err();
  assert!(err.is_unique_violation(), "unexpected error: {err}");
}

// ─── Update / status ─────────────────────────────────────────────────────────

#[tokio::test]
async fn update_writes_fields_but_not_status() {
  let s = store().await;
  let a = s.insert_contact(contact("a@example.com")).await.unwrap();
  s.set_status(a.id, ContactStatus::Inactive).await.unwrap();

  let updated = s
    .update_contact(Contact {
      last_name: None,
      country_code: Some("GB".into()),
      status: ContactStatus::Active,
      ..a.clone()
    })
    .await
    .unwrap()
    .unwrap();

  assert_eq!(updated.last_name, None);
  assert_eq!(updated.country_code.as_deref(), Some("GB"));
  assert_eq!(updated.status, ContactStatus::Inactive);
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  assert!(s.update_contact(contact("a@example.com")).await.unwrap().is_none());
}

#[tokio::test]
async fn set_status_changes_only_the_flag() {
  let s = store().await;
  let a = s.insert_contact(contact("a@example.com")).await.unwrap();

  let inactive = s.set_status(a.id, ContactStatus::Inactive).await.unwrap().unwrap();
  assert_eq!(inactive, Contact { status: ContactStatus::Inactive, ..a });

  assert!(s.set_status(Uuid::new_v4(), ContactStatus::Inactive).await.unwrap().is_none());
}

#[tokio::test]
async fn store_survives_reopen() {
  let dir = std::env::temp_dir().join(format!("trala-{}", Uuid::new_v4()));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("contacts.db");

  let a = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.insert_contact(contact("a@example.com")).await.unwrap()
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.get_contact(a.id).await.unwrap(), Some(a));

  drop(s);
  std::fs::remove_dir_all(&dir).ok();
}
