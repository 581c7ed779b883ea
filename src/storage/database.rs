// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded record store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `accounts`: id → serialized Account
//! - `account_usernames`: username → account id (uniqueness index)
//! - `organizations`: id → serialized Organization
//! - `organization_accounts`: id → serialized OrganizationAccount
//! - `organization_account_emails`: email → organization account id
//! - `posts`: id → serialized Post
//! - `sequences`: table name → last issued id
//!
//! Ids are never reused, even after deletion.

use std::path::Path;

use chrono::{DateTime, Utc};
use redb::{
    ReadableDatabase, ReadableTable, ReadableTableMetadata, Table, TableDefinition,
    WriteTransaction,
};
use serde::{de::DeserializeOwned, Serialize};

use super::records::{
    Account, Organization, OrganizationAccount, Post, PostStatus, PostUpdate,
};
use crate::auth::{AccountCensus, Role};

// =============================================================================
// Table Definitions
// =============================================================================

const ACCOUNTS: TableDefinition<i64, &[u8]> = TableDefinition::new("accounts");

const ACCOUNT_USERNAMES: TableDefinition<&str, i64> = TableDefinition::new("account_usernames");

const ORGANIZATIONS: TableDefinition<i64, &[u8]> = TableDefinition::new("organizations");

const ORGANIZATION_ACCOUNTS: TableDefinition<i64, &[u8]> =
    TableDefinition::new("organization_accounts");

const ORGANIZATION_ACCOUNT_EMAILS: TableDefinition<&str, i64> =
    TableDefinition::new("organization_account_emails");

const POSTS: TableDefinition<i64, &[u8]> = TableDefinition::new("posts");

const SEQUENCES: TableDefinition<&str, i64> = TableDefinition::new("sequences");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} '{key}' already exists")]
    Conflict { entity: &'static str, key: String },

    #[error("permission denied: account {subject_id} does not own {entity} {id}")]
    PermissionDenied {
        subject_id: i64,
        entity: &'static str,
        id: i64,
    },

    #[error("account store is already initialized")]
    AlreadyInitialized,
}

pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Record Helpers
// =============================================================================

fn get_record<T, R>(table: &R, id: i64) -> StoreResult<Option<T>>
where
    T: DeserializeOwned,
    R: ReadableTable<i64, &'static [u8]>,
{
    match table.get(id)? {
        Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
        None => Ok(None),
    }
}

fn all_records<T, R>(table: &R) -> StoreResult<Vec<T>>
where
    T: DeserializeOwned,
    R: ReadableTable<i64, &'static [u8]>,
{
    let mut records = Vec::new();
    for entry in table.iter()? {
        let (_, value) = entry?;
        records.push(serde_json::from_slice(value.value())?);
    }
    Ok(records)
}

fn put_record<T: Serialize>(
    table: &mut Table<'_, i64, &'static [u8]>,
    id: i64,
    record: &T,
) -> StoreResult<()> {
    let json = serde_json::to_vec(record)?;
    table.insert(id, json.as_slice())?;
    Ok(())
}

/// Reserve the next id of a sequence inside an open write transaction.
fn next_id(write_txn: &WriteTransaction, sequence: &str) -> StoreResult<i64> {
    let mut table = write_txn.open_table(SEQUENCES)?;
    let next = table.get(sequence)?.map(|v| v.value()).unwrap_or(0) + 1;
    table.insert(sequence, next)?;
    Ok(next)
}

// =============================================================================
// Database
// =============================================================================

/// Whether an account insert may run on a populated store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Admission {
    /// Only succeeds while the store holds no account.
    FirstOnly,
    Any,
}

/// Embedded ACID record store.
pub struct Database {
    db: redb::Database,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let db = redb::Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(ACCOUNTS)?;
            let _ = write_txn.open_table(ACCOUNT_USERNAMES)?;
            let _ = write_txn.open_table(ORGANIZATIONS)?;
            let _ = write_txn.open_table(ORGANIZATION_ACCOUNTS)?;
            let _ = write_txn.open_table(ORGANIZATION_ACCOUNT_EMAILS)?;
            let _ = write_txn.open_table(POSTS)?;
            let _ = write_txn.open_table(SEQUENCES)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    /// Number of top-level accounts.
    pub fn count_accounts(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        Ok(table.len()?)
    }

    /// Create an account.
    ///
    /// The role is decided inside the write transaction: the first account
    /// of an empty store is an admin, every later one a user.
    pub fn create_account(&self, username: &str, password_hash: &str) -> StoreResult<Account> {
        self.insert_account(username, password_hash, Admission::Any)
    }

    /// Create the bootstrap admin account.
    ///
    /// Fails with [`StoreError::AlreadyInitialized`] if any account exists
    /// when the write transaction runs, so concurrent bootstrap attempts
    /// produce at most one admin.
    pub fn create_first_account(&self, username: &str, password_hash: &str) -> StoreResult<Account> {
        self.insert_account(username, password_hash, Admission::FirstOnly)
    }

    fn insert_account(
        &self,
        username: &str,
        password_hash: &str,
        admission: Admission,
    ) -> StoreResult<Account> {
        let write_txn = self.db.begin_write()?;
        let account = {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            let mut usernames = write_txn.open_table(ACCOUNT_USERNAMES)?;

            let existing = accounts.len()?;
            if admission == Admission::FirstOnly && existing > 0 {
                return Err(StoreError::AlreadyInitialized);
            }
            if usernames.get(username)?.is_some() {
                return Err(StoreError::Conflict {
                    entity: "Account",
                    key: username.to_string(),
                });
            }

            let account = Account {
                id: next_id(&write_txn, "accounts")?,
                username: username.to_string(),
                password_hash: password_hash.to_string(),
                role: if existing == 0 { Role::Admin } else { Role::User },
            };
            put_record(&mut accounts, account.id, &account)?;
            usernames.insert(username, account.id)?;
            account
        };
        write_txn.commit()?;

        tracing::info!(account_id = account.id, role = %account.role, "Account created");
        Ok(account)
    }

    pub fn get_account(&self, id: i64) -> StoreResult<Account> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        get_record(&table, id)?.ok_or(StoreError::NotFound {
            entity: "Account",
            id,
        })
    }

    pub fn get_account_by_username(&self, username: &str) -> StoreResult<Option<Account>> {
        let read_txn = self.db.begin_read()?;
        let usernames = read_txn.open_table(ACCOUNT_USERNAMES)?;
        let id = match usernames.get(username)? {
            Some(v) => v.value(),
            None => return Ok(None),
        };
        let accounts = read_txn.open_table(ACCOUNTS)?;
        get_record(&accounts, id)
    }

    pub fn list_accounts(&self) -> StoreResult<Vec<Account>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ACCOUNTS)?;
        all_records(&table)
    }

    pub fn update_account_password(&self, id: i64, password_hash: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            let mut account: Account = get_record(&accounts, id)?.ok_or(StoreError::NotFound {
                entity: "Account",
                id,
            })?;
            account.password_hash = password_hash.to_string();
            put_record(&mut accounts, id, &account)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Delete an account together with its posts.
    pub fn delete_account(&self, id: i64) -> StoreResult<Account> {
        let write_txn = self.db.begin_write()?;
        let account = {
            let mut accounts = write_txn.open_table(ACCOUNTS)?;
            let account: Account = get_record(&accounts, id)?.ok_or(StoreError::NotFound {
                entity: "Account",
                id,
            })?;
            accounts.remove(id)?;

            let mut usernames = write_txn.open_table(ACCOUNT_USERNAMES)?;
            usernames.remove(account.username.as_str())?;

            let mut posts = write_txn.open_table(POSTS)?;
            let owned: Vec<i64> = all_records::<Post, _>(&posts)?
                .into_iter()
                .filter(|post| post.account_id == id)
                .map(|post| post.id)
                .collect();
            for post_id in owned {
                posts.remove(post_id)?;
            }
            account
        };
        write_txn.commit()?;

        tracing::info!(account_id = id, "Account deleted");
        Ok(account)
    }

    // =========================================================================
    // Organizations
    // =========================================================================

    pub fn create_organization(&self, name: &str) -> StoreResult<Organization> {
        let write_txn = self.db.begin_write()?;
        let organization = {
            let organization = Organization {
                id: next_id(&write_txn, "organizations")?,
                name: name.to_string(),
            };
            let mut table = write_txn.open_table(ORGANIZATIONS)?;
            put_record(&mut table, organization.id, &organization)?;
            organization
        };
        write_txn.commit()?;
        Ok(organization)
    }

    pub fn get_organization(&self, id: i64) -> StoreResult<Organization> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORGANIZATIONS)?;
        get_record(&table, id)?.ok_or(StoreError::NotFound {
            entity: "Organization",
            id,
        })
    }

    pub fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORGANIZATIONS)?;
        all_records(&table)
    }

    /// Delete an organization together with its accounts.
    pub fn delete_organization(&self, id: i64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut organizations = write_txn.open_table(ORGANIZATIONS)?;
            if organizations.remove(id)?.is_none() {
                return Err(StoreError::NotFound {
                    entity: "Organization",
                    id,
                });
            }

            let mut members = write_txn.open_table(ORGANIZATION_ACCOUNTS)?;
            let mut emails = write_txn.open_table(ORGANIZATION_ACCOUNT_EMAILS)?;
            let removed: Vec<OrganizationAccount> = all_records::<OrganizationAccount, _>(&members)?
                .into_iter()
                .filter(|member| member.organization_id == id)
                .collect();
            for member in &removed {
                members.remove(member.id)?;
                emails.remove(member.email.as_str())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    // =========================================================================
    // Organization accounts
    // =========================================================================

    pub fn create_organization_account(
        &self,
        organization_id: i64,
        email: &str,
        password_hash: &str,
    ) -> StoreResult<OrganizationAccount> {
        let write_txn = self.db.begin_write()?;
        let member = {
            let organizations = write_txn.open_table(ORGANIZATIONS)?;
            if organizations.get(organization_id)?.is_none() {
                return Err(StoreError::NotFound {
                    entity: "Organization",
                    id: organization_id,
                });
            }

            let mut emails = write_txn.open_table(ORGANIZATION_ACCOUNT_EMAILS)?;
            if emails.get(email)?.is_some() {
                return Err(StoreError::Conflict {
                    entity: "Account",
                    key: email.to_string(),
                });
            }

            let member = OrganizationAccount {
                id: next_id(&write_txn, "organization_accounts")?,
                organization_id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
            };
            let mut members = write_txn.open_table(ORGANIZATION_ACCOUNTS)?;
            put_record(&mut members, member.id, &member)?;
            emails.insert(email, member.id)?;
            member
        };
        write_txn.commit()?;
        Ok(member)
    }

    /// Look up an account of the given organization.
    ///
    /// An account that exists under another organization is reported as
    /// not found.
    pub fn get_organization_account(
        &self,
        organization_id: i64,
        id: i64,
    ) -> StoreResult<OrganizationAccount> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(ORGANIZATION_ACCOUNTS)?;
        get_record::<OrganizationAccount, _>(&table, id)?
            .filter(|member| member.organization_id == organization_id)
            .ok_or(StoreError::NotFound {
                entity: "Organization account",
                id,
            })
    }

    pub fn get_organization_account_by_email(
        &self,
        email: &str,
    ) -> StoreResult<Option<OrganizationAccount>> {
        let read_txn = self.db.begin_read()?;
        let emails = read_txn.open_table(ORGANIZATION_ACCOUNT_EMAILS)?;
        let id = match emails.get(email)? {
            Some(v) => v.value(),
            None => return Ok(None),
        };
        let members = read_txn.open_table(ORGANIZATION_ACCOUNTS)?;
        get_record(&members, id)
    }

    pub fn list_organization_accounts(
        &self,
        organization_id: i64,
    ) -> StoreResult<Vec<OrganizationAccount>> {
        let read_txn = self.db.begin_read()?;
        let organizations = read_txn.open_table(ORGANIZATIONS)?;
        if organizations.get(organization_id)?.is_none() {
            return Err(StoreError::NotFound {
                entity: "Organization",
                id: organization_id,
            });
        }
        let members = read_txn.open_table(ORGANIZATION_ACCOUNTS)?;
        Ok(all_records::<OrganizationAccount, _>(&members)?
            .into_iter()
            .filter(|member| member.organization_id == organization_id)
            .collect())
    }

    pub fn update_organization_account_password(
        &self,
        organization_id: i64,
        id: i64,
        password_hash: &str,
    ) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut members = write_txn.open_table(ORGANIZATION_ACCOUNTS)?;
            let mut member = get_record::<OrganizationAccount, _>(&members, id)?
                .filter(|member| member.organization_id == organization_id)
                .ok_or(StoreError::NotFound {
                    entity: "Organization account",
                    id,
                })?;
            member.password_hash = password_hash.to_string();
            put_record(&mut members, id, &member)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn delete_organization_account(&self, organization_id: i64, id: i64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut members = write_txn.open_table(ORGANIZATION_ACCOUNTS)?;
            let member = get_record::<OrganizationAccount, _>(&members, id)?
                .filter(|member| member.organization_id == organization_id)
                .ok_or(StoreError::NotFound {
                    entity: "Organization account",
                    id,
                })?;
            members.remove(id)?;

            let mut emails = write_txn.open_table(ORGANIZATION_ACCOUNT_EMAILS)?;
            emails.remove(member.email.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// Create an empty draft for an existing account.
    pub fn create_post(&self, account_id: i64, created_at: DateTime<Utc>) -> StoreResult<Post> {
        let write_txn = self.db.begin_write()?;
        let post = {
            let accounts = write_txn.open_table(ACCOUNTS)?;
            if accounts.get(account_id)?.is_none() {
                return Err(StoreError::NotFound {
                    entity: "Account",
                    id: account_id,
                });
            }

            let post = Post {
                id: next_id(&write_txn, "posts")?,
                account_id,
                title: String::new(),
                content: String::new(),
                status: PostStatus::Draft,
                created_at,
            };
            let mut posts = write_txn.open_table(POSTS)?;
            put_record(&mut posts, post.id, &post)?;
            post
        };
        write_txn.commit()?;
        Ok(post)
    }

    pub fn get_post(&self, id: i64) -> StoreResult<Post> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;
        get_record(&table, id)?.ok_or(StoreError::NotFound { entity: "Post", id })
    }

    /// Look up a post visible to anonymous readers.
    pub fn get_published_post(&self, id: i64) -> StoreResult<Post> {
        let post = self.get_post(id)?;
        if !post.is_published() {
            return Err(StoreError::NotFound { entity: "Post", id });
        }
        Ok(post)
    }

    pub fn list_posts(&self) -> StoreResult<Vec<Post>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(POSTS)?;
        all_records(&table)
    }

    pub fn list_posts_by_account(&self, account_id: i64) -> StoreResult<Vec<Post>> {
        Ok(self
            .list_posts()?
            .into_iter()
            .filter(|post| post.account_id == account_id)
            .collect())
    }

    pub fn list_published_posts(&self) -> StoreResult<Vec<Post>> {
        Ok(self
            .list_posts()?
            .into_iter()
            .filter(Post::is_published)
            .collect())
    }

    pub fn update_post(&self, id: i64, update: PostUpdate) -> StoreResult<Post> {
        let write_txn = self.db.begin_write()?;
        let post = {
            let mut posts = write_txn.open_table(POSTS)?;
            let mut post: Post =
                get_record(&posts, id)?.ok_or(StoreError::NotFound { entity: "Post", id })?;
            post.title = update.title;
            post.content = update.content;
            post.status = update.status;
            put_record(&mut posts, id, &post)?;
            post
        };
        write_txn.commit()?;
        Ok(post)
    }

    pub fn delete_post(&self, id: i64) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut posts = write_txn.open_table(POSTS)?;
            if posts.remove(id)?.is_none() {
                return Err(StoreError::NotFound { entity: "Post", id });
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl AccountCensus for Database {
    fn count_accounts(&self) -> StoreResult<u64> {
        Database::count_accounts(self)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_db() -> (Database, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open(&dir.path().join("test.redb")).unwrap();
        (db, dir)
    }

    #[test]
    fn first_account_is_admin() {
        let (db, _dir) = temp_db();
        assert_eq!(db.count_accounts().unwrap(), 0);

        let first = db.create_account("root", "hash").unwrap();
        let second = db.create_account("alice", "hash").unwrap();

        assert_eq!(first.role, Role::Admin);
        assert_eq!(second.role, Role::User);
        assert_eq!(db.count_accounts().unwrap(), 2);
    }

    #[test]
    fn bootstrap_insert_only_succeeds_once() {
        let (db, _dir) = temp_db();

        let root = db.create_first_account("root", "hash").unwrap();
        assert_eq!(root.role, Role::Admin);

        let second = db.create_first_account("mallory", "hash");
        assert!(matches!(second, Err(StoreError::AlreadyInitialized)));
        assert_eq!(db.count_accounts().unwrap(), 1);
    }

    #[test]
    fn duplicate_username_conflicts() {
        let (db, _dir) = temp_db();
        db.create_account("alice", "hash").unwrap();

        let result = db.create_account("alice", "other");
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
    }

    #[test]
    fn lookup_by_username() {
        let (db, _dir) = temp_db();
        let created = db.create_account("alice", "hash").unwrap();

        assert_eq!(db.get_account_by_username("alice").unwrap(), Some(created));
        assert_eq!(db.get_account_by_username("bob").unwrap(), None);
        assert!(matches!(
            db.get_account(99),
            Err(StoreError::NotFound { entity: "Account", id: 99 })
        ));
    }

    #[test]
    fn password_update_persists() {
        let (db, _dir) = temp_db();
        let account = db.create_account("alice", "old").unwrap();

        db.update_account_password(account.id, "new").unwrap();

        assert_eq!(db.get_account(account.id).unwrap().password_hash, "new");
    }

    #[test]
    fn deleting_account_removes_its_posts_and_frees_username() {
        let (db, _dir) = temp_db();
        db.create_account("root", "hash").unwrap();
        let alice = db.create_account("alice", "hash").unwrap();
        let post = db.create_post(alice.id, Utc::now()).unwrap();

        db.delete_account(alice.id).unwrap();

        assert!(matches!(db.get_post(post.id), Err(StoreError::NotFound { .. })));
        assert_eq!(db.get_account_by_username("alice").unwrap(), None);
        let again = db.create_account("alice", "hash").unwrap();
        assert_ne!(again.id, alice.id, "ids are not reused");
    }

    #[test]
    fn organization_accounts_are_scoped() {
        let (db, _dir) = temp_db();
        let acme = db.create_organization("Acme").unwrap();
        let globex = db.create_organization("Globex").unwrap();

        let member = db
            .create_organization_account(acme.id, "ann@acme.test", "hash")
            .unwrap();

        assert_eq!(db.get_organization_account(acme.id, member.id).unwrap(), member);
        assert!(matches!(
            db.get_organization_account(globex.id, member.id),
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(db.list_organization_accounts(acme.id).unwrap().len(), 1);
        assert!(db.list_organization_accounts(globex.id).unwrap().is_empty());
        assert_eq!(member.role(), Role::OrganizationMember);
    }

    #[test]
    fn organization_account_email_is_unique() {
        let (db, _dir) = temp_db();
        let acme = db.create_organization("Acme").unwrap();
        db.create_organization_account(acme.id, "ann@acme.test", "hash")
            .unwrap();

        let result = db.create_organization_account(acme.id, "ann@acme.test", "hash");
        assert!(matches!(result, Err(StoreError::Conflict { .. })));
    }

    #[test]
    fn organization_account_requires_organization() {
        let (db, _dir) = temp_db();
        let result = db.create_organization_account(5, "ann@acme.test", "hash");
        assert!(matches!(
            result,
            Err(StoreError::NotFound { entity: "Organization", id: 5 })
        ));
    }

    #[test]
    fn deleting_organization_removes_members() {
        let (db, _dir) = temp_db();
        let acme = db.create_organization("Acme").unwrap();
        db.create_organization_account(acme.id, "ann@acme.test", "hash")
            .unwrap();

        db.delete_organization(acme.id).unwrap();

        assert!(db.list_organizations().unwrap().is_empty());
        assert_eq!(db.get_organization_account_by_email("ann@acme.test").unwrap(), None);
        assert!(matches!(
            db.delete_organization(acme.id),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn member_password_update_and_delete() {
        let (db, _dir) = temp_db();
        let acme = db.create_organization("Acme").unwrap();
        let member = db
            .create_organization_account(acme.id, "ann@acme.test", "old")
            .unwrap();

        db.update_organization_account_password(acme.id, member.id, "new")
            .unwrap();
        let stored = db
            .get_organization_account_by_email("ann@acme.test")
            .unwrap()
            .unwrap();
        assert_eq!(stored.password_hash, "new");

        db.delete_organization_account(acme.id, member.id).unwrap();
        assert_eq!(db.get_organization_account_by_email("ann@acme.test").unwrap(), None);
    }

    #[test]
    fn post_lifecycle() {
        let (db, _dir) = temp_db();
        let alice = db.create_account("alice", "hash").unwrap();
        let draft = db.create_post(alice.id, Utc::now()).unwrap();

        assert_eq!(draft.status, PostStatus::Draft);
        assert!(db.list_published_posts().unwrap().is_empty());
        assert!(matches!(
            db.get_published_post(draft.id),
            Err(StoreError::NotFound { .. })
        ));

        let updated = db
            .update_post(
                draft.id,
                PostUpdate {
                    title: "Hello".into(),
                    content: "World".into(),
                    status: PostStatus::Published,
                },
            )
            .unwrap();

        assert_eq!(updated.title, "Hello");
        assert_eq!(db.get_published_post(draft.id).unwrap(), updated);
        assert_eq!(db.list_posts_by_account(alice.id).unwrap().len(), 1);

        db.delete_post(draft.id).unwrap();
        assert!(db.list_posts().unwrap().is_empty());
    }

    #[test]
    fn post_requires_existing_account() {
        let (db, _dir) = temp_db();
        let result = db.create_post(42, Utc::now());
        assert!(matches!(
            result,
            Err(StoreError::NotFound { entity: "Account", id: 42 })
        ));
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.redb");
        {
            let db = Database::open(&path).unwrap();
            db.create_account("root", "hash").unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.count_accounts().unwrap(), 1);
        assert_eq!(db.create_account("alice", "hash").unwrap().id, 2);
    }
}
