//! Defines a gitab project and its settings

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    error::Error,
    gitlab::{
        connection::{Connection, encode},
        pagination::OffsetBasedPagination,
        project_ref::ProjectRef,
    },
};

/// Defines a [gitlab project](https://docs.gitlab.com/api/projects/#get-a-single-project)
#[derive(Clone, Debug, Deserialize)]
pub struct Project {
    /// Project id
    pub id: u64,
    /// Project path
    pub path_with_namespace: String,
}

#[expect(clippy::missing_trait_methods, reason = "we don't need it")]
impl OffsetBasedPagination<Self> for Project {}

/// [Project settings](https://docs.gitlab.com/api/projects/#edit-a-project), any setting name to its value
///
/// Only the settings present in the map are changed by [`put_project_settings`]
pub type ProjectSettings = Map<String, Value>;

/// Sorted list of the `path_with_namespace` of ALL the projects the token has access to
///
/// Every page is fetched before returning. Duplicates returned by gitlab are kept
#[instrument(skip_all, err)]
pub async fn get_all_projects(connection: &Connection) -> Result<Vec<String>, Error> {
    let projects = Project::get_all(connection, "projects?order_by=name&sort=asc").await?;

    let mut paths: Vec<String> = projects
        .into_iter()
        .map(|project| project.path_with_namespace)
        .collect();
    paths.sort();

    debug!("{} projects", paths.len());
    Ok(paths)
}

/// Numeric id of the project at `path` (`namespace/project`)
#[instrument(skip(connection), err)]
pub async fn get_project_id(connection: &Connection, path: &str) -> Result<u64, Error> {
    let project: Project = connection
        .get(&format!("projects/{}", encode(path)))
        .await?;
    Ok(project.id)
}

/// All the settings of `project`
#[instrument(skip(connection), err)]
pub async fn get_project_settings(
    connection: &Connection,
    project: &ProjectRef,
) -> Result<ProjectSettings, Error> {
    connection
        .get(&format!("projects/{}", project.path_segment()))
        .await
}

/// Changes the `settings` of `project`, returns all the settings after the update
///
/// `None` if gitlab answers without a body
#[instrument(skip(connection, settings), err)]
pub async fn put_project_settings(
    connection: &Connection,
    project: &ProjectRef,
    settings: &ProjectSettings,
) -> Result<Option<ProjectSettings>, Error> {
    connection
        .put(&format!("projects/{}", project.path_segment()), settings)
        .await
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
