//! Table-driven tests for the capability matrix.
//!
//! The full role x capability cross product is pinned here; any change to
//! the matrix must be reflected in these tables deliberately.

use rstest::rstest;
use taskfleet_shared::types::UserId;

use super::capability::{Capability, can_edit_task, user_can};
use super::role::{CurrentUser, Role};

/// The authoritative capability matrix:
/// (capability, platform_admin, project_manager, task_executor).
const MATRIX: [(Capability, bool, bool, bool); 16] = [
    (Capability::ManageCompanies, true, false, false),
    (Capability::ManageUsers, true, true, false),
    (Capability::AccessTasks, false, true, true),
    (Capability::AccessProjects, false, true, true),
    (Capability::ViewAnalytics, true, true, false),
    (Capability::CreateTask, false, true, true),
    (Capability::EditTask, false, true, true),
    (Capability::DeleteTask, false, true, false),
    (Capability::AssignTask, false, true, false),
    (Capability::UpdateTaskStatus, false, true, true),
    (Capability::CreateProject, false, true, false),
    (Capability::EditProject, false, true, false),
    (Capability::DeleteProject, false, true, false),
    (Capability::ManageAccounts, true, true, false),
    (Capability::ViewTeamMembers, false, true, true),
    (Capability::ExportData, true, true, false),
];

fn user(id: i64, role: Role) -> CurrentUser {
    CurrentUser {
        id: UserId::new(id),
        role,
        company: Some("acme".to_string()),
    }
}

#[test]
fn capability_matrix_is_exhaustive() {
    assert_eq!(MATRIX.len(), Capability::ALL.len());
    for capability in Capability::ALL {
        assert!(
            MATRIX.iter().any(|(c, ..)| *c == capability),
            "capability {capability} missing from matrix"
        );
    }
}

#[test]
fn capability_matrix_matches_role_can() {
    for (capability, admin, manager, executor) in MATRIX {
        assert_eq!(
            Role::PlatformAdmin.can(capability),
            admin,
            "platform_admin x {capability}"
        );
        assert_eq!(
            Role::ProjectManager.can(capability),
            manager,
            "project_manager x {capability}"
        );
        assert_eq!(
            Role::TaskExecutor.can(capability),
            executor,
            "task_executor x {capability}"
        );
    }
}

#[test]
fn absent_user_is_denied_every_capability() {
    for capability in Capability::ALL {
        assert!(!user_can(None, capability));
    }
}

#[rstest]
#[case::admin_manages_companies(Role::PlatformAdmin, Capability::ManageCompanies, true)]
#[case::manager_cannot_manage_companies(Role::ProjectManager, Capability::ManageCompanies, false)]
#[case::admin_excluded_from_tasks(Role::PlatformAdmin, Capability::AccessTasks, false)]
#[case::executor_accesses_tasks(Role::TaskExecutor, Capability::AccessTasks, true)]
#[case::executor_cannot_assign(Role::TaskExecutor, Capability::AssignTask, false)]
#[case::executor_updates_status(Role::TaskExecutor, Capability::UpdateTaskStatus, true)]
#[case::manager_exports(Role::ProjectManager, Capability::ExportData, true)]
#[case::executor_cannot_export(Role::TaskExecutor, Capability::ExportData, false)]
fn user_can_spot_checks(#[case] role: Role, #[case] capability: Capability, #[case] expect: bool) {
    let u = user(1, role);
    assert_eq!(user_can(Some(&u), capability), expect);
}

#[rstest]
#[case::executor_owns_task(Role::TaskExecutor, 42, 42, true)]
#[case::executor_not_assignee(Role::TaskExecutor, 7, 42, false)]
#[case::manager_edits_anything(Role::ProjectManager, 7, 42, true)]
#[case::platform_admin_excluded(Role::PlatformAdmin, 42, 42, false)]
fn can_edit_task_ownership(
    #[case] role: Role,
    #[case] user_id: i64,
    #[case] assignee_id: i64,
    #[case] expect: bool,
) {
    let u = user(user_id, role);
    assert_eq!(can_edit_task(Some(&u), UserId::new(assignee_id)), expect);
}

#[test]
fn can_edit_task_absent_user() {
    assert!(!can_edit_task(None, UserId::new(1)));
}
