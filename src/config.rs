//! Reads the configuration from environment variables
//!
//! - `GITLAB_HOSTNAME` (mandatory)
//! - `GITLAB_TOKEN` (mandatory)
//! - `ACCEPT_INVALID_CERTS` (optional, its only accepted value is `yes`)

use std::env;

use crate::{error::Error, gitlab::Connection};

/// Validated configuration
#[derive(Clone)]
pub struct Config {
    /// Gitlab hostname, without scheme (`gitlab.example.com`)
    pub hostname: String,
    /// Private token sent with every request
    pub token: String,
    /// Accept invalid TLS certificates
    pub accept_invalid_certs: bool,
}

/// Value of the mandatory environment variable `name`
fn required(name: &str) -> Result<String, Error> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::Config(format!("env variable {name} is not defined"))),
    }
}

impl Config {
    /// Builds a [`Config`] from the environment
    pub fn from_env() -> Result<Self, Error> {
        let token = required("GITLAB_TOKEN")?;
        let hostname = required("GITLAB_HOSTNAME")?;

        let accept_invalid_certs = match env::var("ACCEPT_INVALID_CERTS") {
            Ok(value) => {
                if value == "yes" {
                    true
                } else {
                    return Err(Error::Config(
                        "The environment variable 'ACCEPT_INVALID_CERTS' is set, but not to its only value : 'yes'"
                            .to_owned(),
                    ));
                }
            }
            Err(_) => false,
        };

        Ok(Self {
            hostname,
            token,
            accept_invalid_certs,
        })
    }

    /// Creates a [`Connection`] using this configuration
    pub fn connect(&self) -> Result<Connection, Error> {
        Connection::new(&self.hostname, self.token.clone(), self.accept_invalid_certs)
    }
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
