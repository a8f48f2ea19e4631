//! Defines a gitlab project webhook

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use crate::{
    error::Error,
    gitlab::{connection::Connection, pagination::OffsetBasedPagination, project_ref::ProjectRef},
};

/// Defines a [gitlab project hook](https://docs.gitlab.com/api/project_webhooks/)
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Hook {
    /// Id
    pub id: u64,
    /// Url called by gitlab
    pub url: String,
    /// Every other attribute (`push_events`, `enable_ssl_verification`, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[expect(clippy::missing_trait_methods, reason = "we don't need it")]
impl OffsetBasedPagination<Self> for Hook {}

/// Hook attributes other than `url`
pub type HookOptions = Map<String, Value>;

/// `data` with its `url` replaced by `url`
fn with_url(data: &HookOptions, url: &str) -> HookOptions {
    let mut payload = data.clone();
    payload.insert("url".to_owned(), Value::String(url.to_owned()));
    payload
}

/// All the hooks of `project`
#[instrument(skip(connection), err)]
pub async fn get_hooks(connection: &Connection, project: &ProjectRef) -> Result<Vec<Hook>, Error> {
    Hook::get_all(
        connection,
        &format!("projects/{}/hooks", project.path_segment()),
    )
    .await
}

/// Id of the first hook of `project` calling `url`, `None` if there is none
///
/// Gitlab doesn't prevent two hooks from having the same url
#[instrument(skip(connection), err)]
pub async fn get_hook_id(
    connection: &Connection,
    project: &ProjectRef,
    url: &str,
) -> Result<Option<u64>, Error> {
    let hook_id = get_hooks(connection, project)
        .await?
        .into_iter()
        .find(|hook| hook.url == url)
        .map(|hook| hook.id);

    debug!("hook_id: {hook_id:?}");
    Ok(hook_id)
}

/// Deletes hook `hook_id` of `project`
#[instrument(skip(connection), err)]
pub async fn delete_hook(
    connection: &Connection,
    project: &ProjectRef,
    hook_id: u64,
) -> Result<(), Error> {
    connection
        .delete(&format!(
            "projects/{}/hooks/{hook_id}",
            project.path_segment()
        ))
        .await
}

/// Updates hook `hook_id` of `project`. `url` always wins over a `url` found in `data`
///
/// `None` if gitlab answers without a body
#[instrument(skip(connection, data), err)]
pub async fn put_hook(
    connection: &Connection,
    project: &ProjectRef,
    hook_id: u64,
    url: &str,
    data: &HookOptions,
) -> Result<Option<Hook>, Error> {
    connection
        .put(
            &format!("projects/{}/hooks/{hook_id}", project.path_segment()),
            &with_url(data, url),
        )
        .await
}

/// Adds a hook calling `url` to `project`. `url` always wins over a `url` found in `data`
#[instrument(skip(connection, data), err)]
pub async fn post_hook(
    connection: &Connection,
    project: &ProjectRef,
    url: &str,
    data: &HookOptions,
) -> Result<Hook, Error> {
    connection
        .post(
            &format!("projects/{}/hooks", project.path_segment()),
            &with_url(data, url),
        )
        .await
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::error::Error;
    use crate::gitlab::connection::mock_connection;
    use crate::gitlab::hook::{
        HookOptions, delete_hook, get_hook_id, post_hook, put_hook, with_url,
    };
    use crate::gitlab::project_ref::ProjectRef;

    fn options(value: Value) -> HookOptions {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    async fn server_with_hooks(hooks: Value) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/projects/group%2Fproject/hooks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(hooks))
            .mount(&server)
            .await;
        server
    }

    #[test]
    fn explicit_url_wins() {
        let payload = with_url(
            &options(json!({"url": "http://old", "enable_ssl_verification": true})),
            "http://x",
        );
        assert_eq!(
            Value::Object(payload),
            json!({"url": "http://x", "enable_ssl_verification": true})
        );
    }

    #[tokio::test]
    /// The first matching hook wins when several hooks share the same url
    async fn hook_id_first_match() {
        let server = server_with_hooks(json!([
            {"id": 1, "url": "a"},
            {"id": 2, "url": "b"},
            {"id": 2, "url": "a"},
        ]))
        .await;

        let connection = mock_connection(&server);
        let hook_id = get_hook_id(&connection, &ProjectRef::from("group/project"), "a")
            .await
            .unwrap();

        assert_eq!(hook_id, Some(1));
    }

    #[tokio::test]
    async fn hook_id_not_found() {
        let server = server_with_hooks(json!([
            {"id": 1, "url": "a"},
            {"id": 2, "url": "b"},
        ]))
        .await;

        let connection = mock_connection(&server);
        let hook_id = get_hook_id(&connection, &ProjectRef::from("group/project"), "z")
            .await
            .unwrap();

        assert_eq!(hook_id, None);
    }

    #[tokio::test]
    async fn update_overrides_payload_url() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v4/projects/group%2Fproject/hooks/3"))
            .and(body_json(json!({"enable_ssl": true, "url": "http://x"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 3,
                "url": "http://x",
                "enable_ssl": true,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        let hook = put_hook(
            &connection,
            &ProjectRef::from("group/project"),
            3,
            "http://x",
            &options(json!({"enable_ssl": true, "url": "http://conflicting"})),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(hook.url, "http://x");
        assert_eq!(hook.extra.get("enable_ssl"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn update_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/v4/projects/group%2Fproject/hooks/3"))
            .and(body_json(json!({"url": "http://x"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        let hook = put_hook(
            &connection,
            &ProjectRef::from("group/project"),
            3,
            "http://x",
            &HookOptions::new(),
        )
        .await
        .unwrap();

        assert_eq!(hook, None);
    }

    #[tokio::test]
    async fn create() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v4/projects/group%2Fproject/hooks"))
            .and(body_json(json!({"push_events": false, "url": "http://hook"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 9,
                "url": "http://hook",
                "push_events": false,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        let hook = post_hook(
            &connection,
            &ProjectRef::from("group/project"),
            "http://hook",
            &options(json!({"push_events": false})),
        )
        .await
        .unwrap();

        assert_eq!(hook.id, 9);
    }

    #[tokio::test]
    async fn create_requires_201() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v4/projects/group%2Fproject/hooks"))
            .respond_with(ResponseTemplate::new(202).set_body_json(json!({"id": 9, "url": "u"})))
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        let err = post_hook(
            &connection,
            &ProjectRef::from("group/project"),
            "u",
            &HookOptions::new(),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::UnexpectedStatus { .. }), "{err:?}");
    }

    #[tokio::test]
    async fn delete() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/v4/projects/group%2Fproject/hooks/3"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let connection = mock_connection(&server);
        delete_hook(&connection, &ProjectRef::from("group/project"), 3)
            .await
            .unwrap();
    }
}
