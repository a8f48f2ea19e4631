//! Defines the two ways of pointing at a gitlab project
//!
//! Most gitlab endpoints accept either the `namespace/project` path or the numeric id of a project.
//! A few of them (approvals, approvers) only accept the numeric id, so every endpoint states which
//! form it uses: [`ProjectRef::path_segment`] or [`ProjectRef::resolve_id`]
use core::fmt::{Display, Formatter};

use crate::{
    error::Error,
    gitlab::{connection::Connection, connection::encode, project::get_project_id},
};

/// A reference to a [gitlab project](https://docs.gitlab.com/api/rest/#namespaced-paths)
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProjectRef {
    /// `namespace/project` path, as found in `path_with_namespace`
    Path(String),
    /// Numeric id
    Id(u64),
}

impl ProjectRef {
    /// Url path segment for endpoints accepting both forms
    ///
    /// Paths are percent-encoded (`group/project` becomes `group%2Fproject`)
    #[must_use]
    pub fn path_segment(&self) -> String {
        match *self {
            Self::Path(ref path) => encode(path),
            Self::Id(id) => id.to_string(),
        }
    }

    /// Numeric id of the project, for endpoints that refuse the path form
    ///
    /// A [`ProjectRef::Path`] costs one request to gitlab
    pub async fn resolve_id(&self, connection: &Connection) -> Result<u64, Error> {
        match *self {
            Self::Path(ref path) => get_project_id(connection, path).await,
            Self::Id(id) => Ok(id),
        }
    }
}

impl Display for ProjectRef {
    #[expect(clippy::absolute_paths, reason = "Use a specific Result type")]
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::Path(ref path) => write!(f, "{path}"),
            Self::Id(id) => write!(f, "{id}"),
        }
    }
}

impl From<&str> for ProjectRef {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for ProjectRef {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<u64> for ProjectRef {
    fn from(id: u64) -> Self {
        Self::Id(id)
    }
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
