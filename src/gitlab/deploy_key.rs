//! Defines a gitlab deploy key

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    error::Error,
    gitlab::{connection::Connection, project_ref::ProjectRef},
};

/// Payload used to [add a deploy key](https://docs.gitlab.com/api/deploy_keys/#add-deploy-key-for-a-project)
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewDeployKey {
    /// Title
    pub title: String,
    /// Public SSH key
    pub key: String,
    /// Can this key push to the repository
    pub can_push: bool,
}

/// Defines a [gitlab deploy key](https://docs.gitlab.com/api/deploy_keys/#list-deploy-keys-for-project)
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct DeployKey {
    /// Id
    pub id: u64,
    /// Title
    pub title: String,
    /// Public SSH key
    pub key: String,
    /// Can this key push to the repository
    #[serde(default)]
    pub can_push: bool,
    /// Creation date
    pub created_at: Option<DateTime<Utc>>,
}

/// Adds `deploy_key` to `project`
#[instrument(skip(connection, deploy_key), fields(title = %deploy_key.title), err)]
pub async fn post_deploy_key(
    connection: &Connection,
    project: &ProjectRef,
    deploy_key: &NewDeployKey,
) -> Result<DeployKey, Error> {
    connection
        .post(
            &format!("projects/{}/deploy_keys", project.path_segment()),
            deploy_key,
        )
        .await
}

/// Deploy keys of `project`
#[instrument(skip(connection), err)]
pub async fn get_deploy_keys(
    connection: &Connection,
    project: &ProjectRef,
) -> Result<Vec<DeployKey>, Error> {
    connection
        .get(&format!("projects/{}/deploy_keys", project.path_segment()))
        .await
}

/// Deploy key `id` of `project`
#[instrument(skip(connection), err)]
pub async fn get_deploy_key(
    connection: &Connection,
    project: &ProjectRef,
    id: u64,
) -> Result<DeployKey, Error> {
    connection
        .get(&format!(
            "projects/{}/deploy_keys/{id}",
            project.path_segment()
        ))
        .await
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
