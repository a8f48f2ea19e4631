//! Gitlab REST API client: projects, deploy keys, secret variables, hooks and approvals
//!
//! Every function takes a [`Connection`] and sends one request at a time

pub mod approvals;
pub mod connection;
pub mod deploy_key;
pub mod group;
pub mod hook;
pub mod pagination;
pub mod project;
pub mod project_ref;
pub mod user;
pub mod variable;

pub use approvals::{ApprovalSettings, ApproversUpdate, post_approvals, put_approvers};
pub use connection::Connection;
pub use deploy_key::{DeployKey, NewDeployKey, get_deploy_key, get_deploy_keys, post_deploy_key};
pub use group::get_group_id;
pub use hook::{Hook, HookOptions, delete_hook, get_hook_id, get_hooks, post_hook, put_hook};
pub use pagination::OffsetBasedPagination;
pub use project::{
    Project, ProjectSettings, get_all_projects, get_project_id, get_project_settings,
    put_project_settings,
};
pub use project_ref::ProjectRef;
pub use user::get_user_id;
pub use variable::{
    SecretVariable, get_secret_variable, get_secret_variables, post_secret_variable,
    put_secret_variable,
};
