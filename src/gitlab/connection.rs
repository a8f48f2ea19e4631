//! Defines a connection to gitlab and the request dispatch shared by every endpoint
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Method, Response};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::error::{Error, ExpectedStatus};

/// Characters escaped in a single url path segment
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Percent-encodes `segment` so it can be used as one element of an url path
///
/// `group/project` becomes `group%2Fproject`, which is what gitlab expects
#[must_use]
pub fn encode(segment: &str) -> String {
    utf8_percent_encode(segment, PATH_SEGMENT).to_string()
}

/// Infos needed to connect to gitlab
#[derive(Clone)]
pub struct Connection {
    /// Base url of the REST API (`https://{hostname}/api/v4`), without trailing slash
    pub api_url: String,
    /// [`reqwest`] client
    pub http_client: Client,
    /// Authentication token
    pub token: String,
}

impl Connection {
    /// Creates a new [`Connection`] to `https://{hostname}/api/v4`
    pub fn new(hostname: &str, token: String, accept_invalid_certs: bool) -> Result<Self, Error> {
        let http_client = reqwest::ClientBuilder::new()
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()?;
        Ok(Self::with_api_url(
            format!("https://{hostname}/api/v4"),
            token,
            http_client,
        ))
    }

    /// Creates a new [`Connection`] to any REST API base url
    #[must_use]
    pub fn with_api_url(api_url: String, token: String, http_client: Client) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            http_client,
            token,
        }
    }

    /// Full url of an API `path` (for example `projects/group%2Fproject/hooks`)
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.api_url)
    }

    /// Sends a request to `path` and checks the response status against `expected`
    ///
    /// The body, if any, is always sent as JSON
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        expected: ExpectedStatus,
    ) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        self.send_url(method, self.url(path), body, expected).await
    }

    /// Same as [`Connection::send`] but with an absolute `url`
    #[instrument(skip_all, fields(method = %method, url = %url))]
    pub async fn send_url<B>(
        &self,
        method: Method,
        url: String,
        body: Option<&B>,
        expected: ExpectedStatus,
    ) -> Result<Response, Error>
    where
        B: Serialize + ?Sized,
    {
        debug!("sending request");

        let mut request = self
            .http_client
            .request(method.clone(), &url)
            .header("PRIVATE-TOKEN", &self.token);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if expected.matches(status) {
            return Ok(resp);
        }

        let text = resp.text().await?;
        error!("{method} {url} - {status} : {text}");
        Err(Error::UnexpectedStatus {
            method,
            url,
            status,
            expected,
            body: text,
        })
    }

    /// `GET` on `path`, expecting a `2xx` status
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let resp = self
            .send(Method::GET, path, None::<&()>, ExpectedStatus::Success)
            .await?;
        decode(resp).await
    }

    /// `POST` of `body` on `path`, expecting exactly `201 Created`
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send(Method::POST, path, Some(body), ExpectedStatus::CREATED)
            .await?;
        decode(resp).await
    }

    /// `PUT` of `body` on `path`, expecting a `2xx` status
    ///
    /// Use an `Option<T>` as `T` when gitlab may answer `204 No Content`
    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, Error>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let resp = self
            .send(Method::PUT, path, Some(body), ExpectedStatus::Success)
            .await?;
        decode(resp).await
    }

    /// `DELETE` on `path`, expecting a `2xx` status. The response body is ignored
    pub async fn delete(&self, path: &str) -> Result<(), Error> {
        self.send(Method::DELETE, path, None::<&()>, ExpectedStatus::Success)
            .await?;
        Ok(())
    }
}

/// Reads the whole response body and decodes it as JSON
///
/// An empty body (`204 No Content`) is decoded as JSON `null`: an `Option<T>` becomes `None`
pub async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let url = resp.url().to_string();
    let raw_json = resp.text().await?;

    if raw_json.trim().is_empty() {
        debug!("empty response body");
        return serde_json::from_value(Value::Null).map_err(|source| {
            error!("empty response body where a value was expected : {source}");
            Error::Decode { url, source }
        });
    }

    serde_json::from_str(&raw_json).map_err(|source| {
        error!("error decoding raw_json={raw_json} : {source}");
        Error::Decode { url, source }
    })
}

/// [`Connection`] to a [`wiremock::MockServer`], authenticated with the `secret` token
#[cfg(test)]
pub fn mock_connection(server: &wiremock::MockServer) -> Connection {
    Connection::with_api_url(
        format!("{}/api/v4/", server.uri()),
        "secret".to_owned(),
        Client::new(),
    )
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
