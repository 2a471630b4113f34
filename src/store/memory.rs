//! In-memory user store.
//!
//! DashMap-backed reference implementation of the storage collaborators.
//! Rows live in one map, a second map enforces email uniqueness, and ids
//! come from an atomic counter, so the store tolerates concurrent handler
//! invocations without external locking.

use std::sync::atomic::{AtomicI64, Ordering};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use time::OffsetDateTime;

use super::{Credential, CredentialLookup, NewUser, OwnershipLookup, UserPatch, UserRecord, UserStore};
use crate::error::AppError;

#[derive(Debug, Default)]
pub struct MemoryUsers {
    rows: DashMap<i64, UserRecord>,
    by_email: DashMap<String, i64>,
    next_id: AtomicI64,
}

impl MemoryUsers {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            by_email: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }
}

impl CredentialLookup for MemoryUsers {
    fn find_credential(&self, identity: &str) -> Result<Option<Credential>, AppError> {
        let id = match self.by_email.get(identity) {
            Some(id) => *id,
            None => return Ok(None),
        };
        Ok(self.rows.get(&id).map(|row| Credential {
            identity: row.email.clone(),
            password_hash: row.password_hash.clone(),
        }))
    }
}

impl OwnershipLookup for MemoryUsers {
    fn owner_identity(&self, resource_id: i64) -> Result<Option<String>, AppError> {
        Ok(self.rows.get(&resource_id).map(|row| row.email.clone()))
    }
}

impl UserStore for MemoryUsers {
    fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        let mut users: Vec<UserRecord> = self.rows.iter().map(|row| row.value().clone()).collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    fn get(&self, id: i64) -> Result<Option<UserRecord>, AppError> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AppError> {
        let id = match self.by_email.get(email) {
            Some(id) => *id,
            None => return Ok(None),
        };
        self.get(id)
    }

    fn create(&self, new_user: NewUser) -> Result<UserRecord, AppError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        // Claim the email before inserting the row so two concurrent
        // creates with the same address cannot both succeed.
        match self.by_email.entry(new_user.email.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(
                    "EMAIL_TAKEN",
                    format!("A user with email {} already exists", new_user.email),
                ))
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
            }
        }

        let record = UserRecord {
            id,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            created_at: OffsetDateTime::now_utc(),
        };
        self.rows.insert(id, record.clone());
        Ok(record)
    }

    fn update(&self, id: i64, patch: UserPatch) -> Result<Option<UserRecord>, AppError> {
        let old_email = match self.rows.get(&id) {
            Some(row) => row.email.clone(),
            None => return Ok(None),
        };

        if let Some(new_email) = &patch.email {
            if *new_email != old_email {
                match self.by_email.entry(new_email.clone()) {
                    Entry::Occupied(_) => {
                        return Err(AppError::conflict(
                            "EMAIL_TAKEN",
                            format!("A user with email {new_email} already exists"),
                        ))
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                }
                self.by_email.remove(&old_email);
            }
        }

        let updated = self.rows.get_mut(&id).map(|mut row| {
            if let Some(email) = patch.email {
                row.email = email;
            }
            if let Some(first_name) = patch.first_name {
                row.first_name = Some(first_name);
            }
            if let Some(last_name) = patch.last_name {
                row.last_name = Some(last_name);
            }
            if let Some(password_hash) = patch.password_hash {
                row.password_hash = password_hash;
            }
            row.clone()
        });
        Ok(updated)
    }

    fn delete(&self, id: i64) -> Result<bool, AppError> {
        match self.rows.remove(&id) {
            Some((_, row)) => {
                self.by_email.remove(&row.email);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
