//! Defines a gitab user

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    error::Error,
    gitlab::connection::{Connection, encode},
};

/// Defines a [gitlab user](https://docs.gitlab.com/api/users/#list-users)
#[derive(Debug, Deserialize)]
pub struct User {
    /// User id
    pub id: u64,
    /// User name (without spaces)
    pub username: String,
}

/// Numeric id of the user named `username`
///
/// Fails with [`Error::UserNotFound`] if gitlab doesn't know this user. Gitlab may also return
/// users with a similar name, only the one whose username matches (ignoring case) is kept
#[instrument(skip(connection), err)]
pub async fn get_user_id(connection: &Connection, username: &str) -> Result<u64, Error> {
    let users: Vec<User> = connection
        .get(&format!("users?username={}", encode(username)))
        .await?;

    debug!("{} user(s) found", users.len());

    users
        .into_iter()
        .find(|user| user.username.eq_ignore_ascii_case(username))
        .map(|user| user.id)
        .ok_or_else(|| Error::UserNotFound(username.to_owned()))
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::Error;
    use crate::gitlab::connection::mock_connection;
    use crate::gitlab::user::get_user_id;

    #[tokio::test]
    async fn existing_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/users"))
            .and(query_param("username", "alice"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"id": 10, "username": "alice", "state": "active"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        assert_eq!(get_user_id(&connection, "alice").await.unwrap(), 10);
    }

    #[tokio::test]
    async fn username_case_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/users"))
            .and(query_param("username", "Alice"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 11, "username": "alice2"},
                {"id": 10, "username": "alice"},
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        assert_eq!(get_user_id(&connection, "Alice").await.unwrap(), 10);
    }

    #[tokio::test]
    /// A user with another name is not taken instead of the one asked for
    async fn other_username_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/users"))
            .and(query_param("username", "alice"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"id": 3, "username": "alice2"}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        let err = get_user_id(&connection, "alice").await.unwrap_err();

        assert!(matches!(err, Error::UserNotFound(ref name) if name == "alice"), "{err:?}");
    }

    #[tokio::test]
    async fn unknown_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        let err = get_user_id(&connection, "nobody").await.unwrap_err();

        assert!(matches!(err, Error::UserNotFound(ref name) if name == "nobody"), "{err:?}");
    }
}
