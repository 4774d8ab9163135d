//! Administrator credentials and the gate in front of them.
//!
//! Secrets are stored and compared in clear text, and registration is guarded
//! by a single pin compiled into the program.

use tracing::{debug, info};

use crate::{
  error::{EntityKind, Error, Result},
  store::{TableKind, TableStore},
  table::Table,
};

/// The shared registration pin.
pub const ADMIN_PIN: &str = "230306";

const USERNAME: &str = "Username";
const PASSWORD: &str = "Password";

// ─── CredentialStore ─────────────────────────────────────────────────────────

pub struct CredentialStore<S> {
  store: S,
}

impl<S: TableStore> CredentialStore<S> {
  /// Open the credential table, creating it if needed.
  pub fn open(store: S) -> Result<Self> {
    store
      .ensure(TableKind::Credentials.header())
      .map_err(Error::persistence)?;
    Ok(Self { store })
  }

  fn load(&self) -> Result<Table> {
    self
      .store
      .load(Some(TableKind::Credentials.header()))
      .map_err(Error::persistence)
  }

  /// Whether some stored record matches both `username` and `password`.
  pub fn verify(&self, username: &str, password: &str) -> Result<bool> {
    let table = self.load()?;
    Ok(table.rows().any(|r| {
      r.get(USERNAME) == Some(username) && r.get(PASSWORD) == Some(password)
    }))
  }

  /// Store a new credential. Fails with `AlreadyExists` if the username is
  /// taken.
  pub fn register(&self, username: &str, password: &str) -> Result<()> {
    let mut table = self.load()?;
    if table.contains(USERNAME, username) {
      return Err(Error::AlreadyExists {
        kind:  EntityKind::Admin,
        value: username.to_owned(),
      });
    }
    table.push_record([
      (USERNAME, username.to_owned()),
      (PASSWORD, password.to_owned()),
    ]);
    self.store.save(&table).map_err(Error::persistence)?;
    debug!(username, "registered admin");
    Ok(())
  }

  /// Registered usernames in insertion order.
  pub fn usernames(&self) -> Result<Vec<String>> {
    let table = self.load()?;
    Ok(table.column_values(USERNAME).map(str::to_owned).collect())
  }
}

// ─── AdminGate ───────────────────────────────────────────────────────────────

/// Outcome of a login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  Granted,
  Denied,
}

/// Login and pin-gated registration over a [`CredentialStore`].
pub struct AdminGate<'a, S> {
  credentials: &'a CredentialStore<S>,
}

impl<'a, S: TableStore> AdminGate<'a, S> {
  pub fn new(credentials: &'a CredentialStore<S>) -> Self { Self { credentials } }

  pub fn login(&self, username: &str, password: &str) -> Result<Access> {
    if self.credentials.verify(username, password)? {
      info!(username, "admin login granted");
      Ok(Access::Granted)
    } else {
      info!(username, "admin login denied");
      Ok(Access::Denied)
    }
  }

  pub fn pin_matches(&self, pin: &str) -> bool { pin == ADMIN_PIN }

  /// Register a new admin if `pin` is the shared pin.
  ///
  /// A wrong pin fails with `AccessDenied` before the credential table is
  /// touched.
  pub fn register_with_pin(
    &self,
    pin: &str,
    username: &str,
    password: &str,
  ) -> Result<()> {
    if !self.pin_matches(pin) {
      return Err(Error::AccessDenied);
    }
    self.credentials.register(username, password)
  }
}
