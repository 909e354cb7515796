//! User roles and the resolved authenticated identity.

use serde::{Deserialize, Serialize};
use taskfleet_shared::types::UserId;

use crate::access::error::AccessError;

/// User role on the platform.
///
/// Exactly one role per user; the role only changes through an
/// administrative update. Earlier generations of the system used other
/// name sets (`system_admin`/`user_admin`/`employee` and friends); those
/// are historical and deliberately not accepted here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Operates the platform itself: companies, accounts, pricing.
    /// Does not participate in line-of-business task work.
    PlatformAdmin,
    /// Runs a company's projects, tasks, and team.
    ProjectManager,
    /// Executes tasks assigned to them.
    TaskExecutor,
}

impl Role {
    /// All roles, for exhaustive table-driven checks.
    pub const ALL: [Self; 3] = [Self::PlatformAdmin, Self::ProjectManager, Self::TaskExecutor];

    /// Parse a role from its wire name.
    ///
    /// Surrounding whitespace is trimmed here, once. Historical payloads
    /// carried padded role strings, and ad-hoc trimming at comparison
    /// sites caused authorization bugs.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "platform_admin" => Some(Self::PlatformAdmin),
            "project_manager" => Some(Self::ProjectManager),
            "task_executor" => Some(Self::TaskExecutor),
            _ => None,
        }
    }

    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlatformAdmin => "platform_admin",
            Self::ProjectManager => "project_manager",
            Self::TaskExecutor => "task_executor",
        }
    }

    /// True for the administrative roles (platform admin or project manager).
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::PlatformAdmin | Self::ProjectManager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| AccessError::UnknownRole(s.trim().to_string()))
    }
}

/// Resolved authenticated user.
///
/// Built once at the authentication boundary and passed explicitly to
/// every permission and billing check; nothing in this crate reads
/// ambient session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User ID.
    pub id: UserId,
    /// Parsed role.
    pub role: Role,
    /// Company the user belongs to. Platform admins have none.
    pub company: Option<String>,
}

impl CurrentUser {
    /// True iff this user's role is one of the given roles.
    #[must_use]
    pub fn has_role(&self, roles: &[Role]) -> bool {
        roles.contains(&self.role)
    }

    /// True for platform admins.
    #[must_use]
    pub const fn is_platform_admin(&self) -> bool {
        matches!(self.role, Role::PlatformAdmin)
    }

    /// True for project managers.
    #[must_use]
    pub const fn is_project_manager(&self) -> bool {
        matches!(self.role, Role::ProjectManager)
    }

    /// True for task executors.
    #[must_use]
    pub const fn is_task_executor(&self) -> bool {
        matches!(self.role, Role::TaskExecutor)
    }

    /// True for platform admins and project managers.
    #[must_use]
    pub const fn has_admin_role(&self) -> bool {
        self.role.is_admin()
    }
}

/// Role membership check over a possibly-absent user.
///
/// An unauthenticated caller is never a member of any role set.
#[must_use]
pub fn has_role(user: Option<&CurrentUser>, roles: &[Role]) -> bool {
    user.is_some_and(|u| u.has_role(roles))
}
