use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::modules::utils::logging::log_external_call;
use crate::EXTERNAL_CALL_TIMEOUT_SECS;

// Column layout of the backing sheet: column 1 holds the email used as the
// lookup key, column 2 holds the password hash.
const EMAIL_COLUMN: usize = 1;
const HASH_COLUMN: usize = 2;

/// A single row of the credential sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub email: String,
    pub password_hash: String,
}

/// Errors from the external credential store. Connectivity problems are
/// propagated to the caller, not retried; this path is not fault-tolerant
/// by design.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unreachable: {0}")]
    Unavailable(String),
    #[error("store returned malformed data: {0}")]
    Malformed(String),
}

/// Adapter over the system of record for email/password-hash pairs.
///
/// Lookup is exact-match on the email exactly as entered; the adapter does
/// not normalize case or whitespace. Callers own that boundary. No result
/// is ever cached, so every login and reset re-reads the store.
pub trait CredentialStore {
    /// Look up a user by email. `Ok(None)` means the email has no row.
    fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Replace the stored hash for `email`. `Ok(false)` means no row matched.
    fn set_password_hash(&self, email: &str, new_hash: &str) -> Result<bool, StoreError>;
}

#[derive(Deserialize)]
struct SheetRows {
    rows: Vec<Vec<String>>,
}

/// Credential store backed by a remote tabular service over HTTP.
///
/// `GET  {base}/rows`                fetches every row as an array of cells.
/// `PUT  {base}/rows/{row}/{col}`    writes one cell, rows and columns 1-based.
///
/// Each call is a blocking round-trip with an explicit timeout; a hung
/// service surfaces as `StoreError::Unavailable` instead of hanging the
/// whole interaction.
pub struct SheetStore {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl SheetStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(EXTERNAL_CALL_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn fetch_rows(&self) -> Result<Vec<Vec<String>>, StoreError> {
        let url = format!("{}/rows", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let sheet: SheetRows = response
            .json()
            .map_err(|e| StoreError::Malformed(e.to_string()))?;
        Ok(sheet.rows)
    }

    fn write_cell(&self, row: usize, column: usize, value: &str) -> Result<(), StoreError> {
        let url = format!("{}/rows/{}/{}", self.base_url, row, column);
        self.client
            .put(&url)
            .json(&serde_json::json!({ "value": value }))
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}

impl CredentialStore for SheetStore {
    fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let rows = match self.fetch_rows() {
            Ok(rows) => rows,
            Err(e) => {
                log_external_call("credential-store", "find_user", false, Some(&e.to_string()));
                return Err(e);
            }
        };

        for row in &rows {
            if row.get(EMAIL_COLUMN - 1).map(String::as_str) == Some(email) {
                let password_hash = row
                    .get(HASH_COLUMN - 1)
                    .cloned()
                    .ok_or_else(|| StoreError::Malformed("row missing hash column".to_string()))?;
                log_external_call("credential-store", "find_user", true, None);
                return Ok(Some(UserRecord {
                    email: email.to_string(),
                    password_hash,
                }));
            }
        }

        log_external_call("credential-store", "find_user", true, Some("no match"));
        Ok(None)
    }

    fn set_password_hash(&self, email: &str, new_hash: &str) -> Result<bool, StoreError> {
        // Re-read to locate the row; the store is never cached. Concurrent
        // resets of the same account race with last-write-wins on the hash.
        let rows = self.fetch_rows()?;
        let row_index = rows
            .iter()
            .position(|row| row.get(EMAIL_COLUMN - 1).map(String::as_str) == Some(email));

        match row_index {
            Some(index) => {
                // Rows are addressed 1-based on the wire.
                self.write_cell(index + 1, HASH_COLUMN, new_hash)?;
                log_external_call("credential-store", "set_password_hash", true, None);
                Ok(true)
            }
            None => {
                log_external_call(
                    "credential-store",
                    "set_password_hash",
                    false,
                    Some("no matching row"),
                );
                Ok(false)
            }
        }
    }
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    // Lets a test hold a handle to the store it handed to the controller.
    impl<S: CredentialStore> CredentialStore for Rc<S> {
        fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
            (**self).find_user(email)
        }

        fn set_password_hash(&self, email: &str, new_hash: &str) -> Result<bool, StoreError> {
            (**self).set_password_hash(email, new_hash)
        }
    }

    /// In-memory store for exercising the auth flow without a network.
    pub struct MemoryStore {
        rows: RefCell<Vec<UserRecord>>,
        pub unavailable: std::cell::Cell<bool>,
    }

    impl MemoryStore {
        pub fn new(records: Vec<(&str, &str)>) -> Self {
            Self {
                rows: RefCell::new(
                    records
                        .into_iter()
                        .map(|(email, hash)| UserRecord {
                            email: email.to_string(),
                            password_hash: hash.to_string(),
                        })
                        .collect(),
                ),
                unavailable: std::cell::Cell::new(false),
            }
        }

        pub fn stored_hash(&self, email: &str) -> Option<String> {
            self.rows
                .borrow()
                .iter()
                .find(|r| r.email == email)
                .map(|r| r.password_hash.clone())
        }
    }

    impl CredentialStore for MemoryStore {
        fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
            if self.unavailable.get() {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            Ok(self
                .rows
                .borrow()
                .iter()
                .find(|r| r.email == email)
                .cloned())
        }

        fn set_password_hash(&self, email: &str, new_hash: &str) -> Result<bool, StoreError> {
            if self.unavailable.get() {
                return Err(StoreError::Unavailable("connection refused".to_string()));
            }
            let mut rows = self.rows.borrow_mut();
            match rows.iter_mut().find(|r| r.email == email) {
                Some(record) => {
                    record.password_hash = new_hash.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }
}
