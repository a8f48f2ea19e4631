//! Merge request approvals configuration and approvers of a gitlab project
//!
//! These endpoints only accept the numeric id of the project, never its path

use core::fmt::Debug;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    error::Error,
    gitlab::{
        connection::Connection, group::get_group_id, project_ref::ProjectRef, user::get_user_id,
    },
};

/// [Approvals configuration](https://docs.gitlab.com/api/merge_request_approvals/#change-configuration) (`approvals_before_merge`, ...)
pub type ApprovalSettings = Map<String, Value>;

/// Body of the [approvers update](https://docs.gitlab.com/api/merge_request_approvals/) request
///
/// Both lists are always serialized, even when empty: gitlab rejects the request if one is missing
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApproversUpdate {
    /// Numeric project id
    pub id: u64,
    /// User ids, in the order of the given usernames
    pub approver_ids: Vec<u64>,
    /// Group ids, in the order of the given group paths
    pub approver_group_ids: Vec<u64>,
}

/// Creates the approvals configuration of `project` from `data`
///
/// The `id` of `data` is always replaced by the project numeric id
#[instrument(skip(connection, data), err)]
pub async fn post_approvals(
    connection: &Connection,
    project: &ProjectRef,
    data: &ApprovalSettings,
) -> Result<Value, Error> {
    let id = project.resolve_id(connection).await?;

    let mut payload = data.clone();
    payload.insert("id".to_owned(), Value::from(id));

    connection
        .post(&format!("projects/{id}/approvals"), &payload)
        .await
}

/// Replaces the approvers of `project` by the users named `approvers` and the groups at `approver_groups`
///
/// Usernames and group paths are converted to ids first. If one of them can't be found, nothing is sent
#[instrument(skip(connection), err)]
pub async fn put_approvers<U, G>(
    connection: &Connection,
    project: &ProjectRef,
    approvers: &[U],
    approver_groups: &[G],
) -> Result<Value, Error>
where
    U: AsRef<str> + Debug,
    G: AsRef<str> + Debug,
{
    let mut approver_ids = Vec::with_capacity(approvers.len());
    for approver in approvers {
        approver_ids.push(get_user_id(connection, approver.as_ref()).await?);
    }

    let mut approver_group_ids = Vec::with_capacity(approver_groups.len());
    for group_path in approver_groups {
        approver_group_ids.push(get_group_id(connection, group_path.as_ref()).await?);
    }

    let id = project.resolve_id(connection).await?;

    let update = ApproversUpdate {
        id,
        approver_ids,
        approver_group_ids,
    };
    debug!("{update:?}");

    connection
        .put(&format!("projects/{id}/approvers"), &update)
        .await
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
