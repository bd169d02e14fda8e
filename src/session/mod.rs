// src/session/mod.rs

//! Session context: who is logged in, and which dashboards they may open.
//!
//! The role flag is only touched here. It is read once when the context is
//! opened, written on [`SessionContext::login`] and cleared on
//! [`SessionContext::logout`].

pub mod store;

use tracing::{debug, info};

use crate::errors::Result;
use crate::types::Role;

pub use store::{FileRoleStore, MemoryRoleStore, RoleStore};

/// Outcome of guarding a role-specific route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Nobody is logged in.
    RedirectToLogin,
    /// Logged in with another role; go to that role's dashboard instead.
    RedirectToDashboard(Role),
}

impl GuardDecision {
    /// Route to navigate to, if the guard redirects.
    pub fn redirect_path(&self) -> Option<String> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::RedirectToLogin => Some("/".to_string()),
            GuardDecision::RedirectToDashboard(role) => Some(role.dashboard_path()),
        }
    }
}

/// Explicit session state passed to route guards.
#[derive(Debug)]
pub struct SessionContext<S: RoleStore> {
    store: S,
    role: Option<Role>,
}

impl<S: RoleStore> SessionContext<S> {
    /// Open a session, reading the persisted role flag.
    pub fn open(store: S) -> Result<Self> {
        let role = store.load()?;
        debug!(?role, "session opened");
        Ok(Self { store, role })
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn is_logged_in(&self) -> bool {
        self.role.is_some()
    }

    /// Persist `role` and return the dashboard route to land on.
    pub fn login(&mut self, role: Role) -> Result<String> {
        self.store.save(role)?;
        self.role = Some(role);
        info!(%role, "logged in");
        Ok(role.dashboard_path())
    }

    /// Clear the persisted flag.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        if let Some(role) = self.role.take() {
            info!(%role, "logged out");
        }
        Ok(())
    }

    /// Decide whether a route reserved for `required` may be shown.
    pub fn guard(&self, required: Role) -> GuardDecision {
        match self.role {
            None => GuardDecision::RedirectToLogin,
            Some(role) if role == required => GuardDecision::Allow,
            Some(role) => GuardDecision::RedirectToDashboard(role),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
