//! Defines a gitab group

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::Error,
    gitlab::connection::{Connection, encode},
};

/// Defines a [gitlab group](https://docs.gitlab.com/api/groups/)
#[derive(Clone, Debug, Deserialize)]
pub struct Group {
    /// Group id
    pub id: u64,
    /// Group path, including its parent groups
    pub full_path: String,
}

/// Numeric id of the group at `full_path` (`group/subgroup`)
///
/// Fails with [`Error::GroupNotFound`] if gitlab answers `404 Not Found`
#[instrument(skip(connection), err)]
pub async fn get_group_id(connection: &Connection, full_path: &str) -> Result<u64, Error> {
    match connection
        .get::<Group>(&format!("groups/{}", encode(full_path)))
        .await
    {
        Ok(group) => Ok(group.id),
        Err(err) if err.status() == Some(StatusCode::NOT_FOUND) => {
            Err(Error::GroupNotFound(full_path.to_owned()))
        }
        Err(err) => Err(err),
    }
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
