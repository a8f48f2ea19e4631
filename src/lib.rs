//! Manage gitlab projects through the REST API: settings, deploy keys, secret variables, webhooks
//! and merge request approvals.
//!
//! ```no_run
//! # async fn run() -> Result<(), gitlab_projects::error::Error> {
//! use gitlab_projects::gitlab::{Connection, ProjectRef, get_secret_variable};
//!
//! let connection = Connection::new("gitlab.example.com", "glpat-xxx".to_owned(), false)?;
//! let value = get_secret_variable(&connection, &ProjectRef::from("group/project"), "TOKEN").await?;
//! println!("{value}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod gitlab;
