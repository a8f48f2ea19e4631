//! Defines a gitlab CI/CD secret variable

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::instrument;

use crate::{
    error::Error,
    gitlab::{
        connection::{Connection, encode},
        project_ref::ProjectRef,
    },
};

/// Defines a [gitlab project variable](https://docs.gitlab.com/api/project_level_variables/)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SecretVariable {
    /// Name, unique in a project
    pub key: String,
    /// Value
    pub value: String,
    /// Other attributes (`protected`, `masked`, `variable_type`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SecretVariable {
    /// Creates a variable without any other attribute
    #[must_use]
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_owned(),
            value: value.to_owned(),
            extra: Map::new(),
        }
    }
}

/// Creates `secret_variable` in `project`
#[instrument(skip(connection, secret_variable), fields(key = %secret_variable.key), err)]
pub async fn post_secret_variable(
    connection: &Connection,
    project: &ProjectRef,
    secret_variable: &SecretVariable,
) -> Result<SecretVariable, Error> {
    connection
        .post(
            &format!("projects/{}/variables", project.path_segment()),
            secret_variable,
        )
        .await
}

/// Updates the variable named `secret_variable.key` in `project`
///
/// `None` if gitlab answers without a body
#[instrument(skip(connection, secret_variable), fields(key = %secret_variable.key), err)]
pub async fn put_secret_variable(
    connection: &Connection,
    project: &ProjectRef,
    secret_variable: &SecretVariable,
) -> Result<Option<SecretVariable>, Error> {
    connection
        .put(
            &format!(
                "projects/{}/variables/{}",
                project.path_segment(),
                encode(&secret_variable.key)
            ),
            secret_variable,
        )
        .await
}

/// Value of the variable named `key` in `project`
#[instrument(skip(connection), err)]
pub async fn get_secret_variable(
    connection: &Connection,
    project: &ProjectRef,
    key: &str,
) -> Result<String, Error> {
    let secret_variable: SecretVariable = connection
        .get(&format!(
            "projects/{}/variables/{}",
            project.path_segment(),
            encode(key)
        ))
        .await?;
    Ok(secret_variable.value)
}

/// All the variables of `project`
#[instrument(skip(connection), err)]
pub async fn get_secret_variables(
    connection: &Connection,
    project: &ProjectRef,
) -> Result<Vec<SecretVariable>, Error> {
    connection
        .get(&format!("projects/{}/variables", project.path_segment()))
        .await
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
