//! Capability checks derived from roles.
//!
//! A capability is a named permitted action. Most are a pure function of
//! the role; task editing additionally depends on task ownership and has
//! its own check, [`can_edit_task`].

use taskfleet_shared::types::UserId;

use crate::access::error::AccessError;
use crate::access::role::{CurrentUser, Role};

/// Named actions gated by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Create, edit, and delete companies and their pricing.
    ManageCompanies,
    /// Create, edit, and delete users.
    ManageUsers,
    /// See and work with the task board.
    AccessTasks,
    /// See and work with projects.
    AccessProjects,
    /// View analytics dashboards.
    ViewAnalytics,
    /// Create a task.
    CreateTask,
    /// Edit a task. Ownership-gated for task executors; see [`can_edit_task`].
    EditTask,
    /// Delete a task.
    DeleteTask,
    /// Assign a task to an executor.
    AssignTask,
    /// Start or complete a task.
    UpdateTaskStatus,
    /// Create a project.
    CreateProject,
    /// Edit a project.
    EditProject,
    /// Delete a project.
    DeleteProject,
    /// Create, edit, and delete user accounts.
    ManageAccounts,
    /// View the member list of a team.
    ViewTeamMembers,
    /// Export data.
    ExportData,
}

impl Capability {
    /// All capabilities, for exhaustive table-driven checks.
    pub const ALL: [Self; 16] = [
        Self::ManageCompanies,
        Self::ManageUsers,
        Self::AccessTasks,
        Self::AccessProjects,
        Self::ViewAnalytics,
        Self::CreateTask,
        Self::EditTask,
        Self::DeleteTask,
        Self::AssignTask,
        Self::UpdateTaskStatus,
        Self::CreateProject,
        Self::EditProject,
        Self::DeleteProject,
        Self::ManageAccounts,
        Self::ViewTeamMembers,
        Self::ExportData,
    ];

    /// Returns the snake_case name of the capability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ManageCompanies => "manage_companies",
            Self::ManageUsers => "manage_users",
            Self::AccessTasks => "access_tasks",
            Self::AccessProjects => "access_projects",
            Self::ViewAnalytics => "view_analytics",
            Self::CreateTask => "create_task",
            Self::EditTask => "edit_task",
            Self::DeleteTask => "delete_task",
            Self::AssignTask => "assign_task",
            Self::UpdateTaskStatus => "update_task_status",
            Self::CreateProject => "create_project",
            Self::EditProject => "edit_project",
            Self::DeleteProject => "delete_project",
            Self::ManageAccounts => "manage_accounts",
            Self::ViewTeamMembers => "view_team_members",
            Self::ExportData => "export_data",
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Role {
    /// Whether this role grants the capability.
    ///
    /// The platform admin is deliberately excluded from line-of-business
    /// operations (tasks and projects); those belong to project managers
    /// and task executors.
    ///
    /// `EditTask` here means "may edit at least the tasks assigned to
    /// them"; when the assignee is known, use [`can_edit_task`].
    #[must_use]
    pub const fn can(self, capability: Capability) -> bool {
        use Capability::{
            AccessProjects, AccessTasks, AssignTask, CreateProject, CreateTask, DeleteProject,
            DeleteTask, EditProject, EditTask, ExportData, ManageAccounts, ManageCompanies,
            ManageUsers, UpdateTaskStatus, ViewAnalytics, ViewTeamMembers,
        };

        match capability {
            ManageCompanies => matches!(self, Self::PlatformAdmin),
            ManageUsers | ManageAccounts | ViewAnalytics | ExportData => self.is_admin(),
            AccessTasks | AccessProjects | CreateTask | EditTask | UpdateTaskStatus
            | ViewTeamMembers => matches!(self, Self::ProjectManager | Self::TaskExecutor),
            DeleteTask | AssignTask | CreateProject | EditProject | DeleteProject => {
                matches!(self, Self::ProjectManager)
            }
        }
    }
}

/// Capability check over a possibly-absent user. Absence always denies.
#[must_use]
pub fn user_can(user: Option<&CurrentUser>, capability: Capability) -> bool {
    user.is_some_and(|u| u.role.can(capability))
}

/// Task editing with ownership context.
///
/// Project managers edit any task; task executors edit only tasks
/// assigned to them. IDs are compared as typed values, the parse at the
/// boundary already normalized them.
#[must_use]
pub fn can_edit_task(user: Option<&CurrentUser>, assignee_id: UserId) -> bool {
    match user {
        Some(u) => match u.role {
            Role::ProjectManager => true,
            Role::TaskExecutor => u.id == assignee_id,
            Role::PlatformAdmin => false,
        },
        None => false,
    }
}

/// Resolves a capability requirement into the user, for call sites that
/// need to proceed with the authenticated identity.
///
/// # Errors
///
/// Returns [`AccessError::Unauthenticated`] when no user is present and
/// [`AccessError::Forbidden`] when the role does not grant the capability.
pub fn require<'a>(
    user: Option<&'a CurrentUser>,
    capability: Capability,
) -> Result<&'a CurrentUser, AccessError> {
    let user = user.ok_or(AccessError::Unauthenticated)?;
    if user.role.can(capability) {
        Ok(user)
    } else {
        Err(AccessError::Forbidden {
            role: user.role,
            capability,
        })
    }
}
