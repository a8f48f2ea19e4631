//! Implements gitlab offset based pagination

use reqwest::{Method, Response};
use tracing::{debug, error, instrument};

use crate::{
    error::{Error, ExpectedStatus},
    gitlab::connection::{Connection, decode},
};

/// Number of items requested per page (gitlab maximum)
const PER_PAGE: u8 = 100;

/// cf <https://docs.gitlab.com/api/rest/#offset-based-pagination>
#[expect(async_fn_in_trait, reason = "Only awaited on a current thread runtime")]
pub trait OffsetBasedPagination<T: for<'serde> serde::Deserialize<'serde>> {
    #[instrument(skip_all, fields(path = %path))]
    /// Starting from the API `path`, get all the items, using the 'link' header to go through all the pages
    ///
    /// Pages are fetched one after the other and concatenated in the order gitlab returns them
    async fn get_all(connection: &Connection, path: &str) -> Result<Vec<T>, Error> {
        let mut result: Vec<T> = Vec::new();
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut next_url: Option<String> =
            Some(connection.url(&format!("{path}{separator}per_page={PER_PAGE}")));

        debug!("starting");

        while let Some(current_url) = next_url.take() {
            debug!("trying to GET {current_url}");

            let resp = connection
                .send_url(
                    Method::GET,
                    current_url,
                    None::<&()>,
                    ExpectedStatus::Success,
                )
                .await?;

            next_url = next_page_url(&resp)?;

            let mut items: Vec<T> = decode(resp).await?;
            result.append(&mut items);
        }

        debug!("Ok! {} items", result.len());

        Ok(result)
    }
}

/// Url of the page after `resp`, `None` on the last page
///
/// A `link` header that can't be parsed is an error, the listing would be incomplete otherwise
fn next_page_url(resp: &Response) -> Result<Option<String>, Error> {
    let Some(header_value) = resp.headers().get("link") else {
        return Ok(None);
    };

    let links = header_value
        .to_str()
        .ok()
        .and_then(|header_value_str| parse_link_header::parse_with_rel(header_value_str).ok())
        .ok_or_else(|| {
            let header = String::from_utf8_lossy(header_value.as_bytes()).into_owned();
            error!("invalid link header : {header}");
            Error::Pagination {
                url: resp.url().to_string(),
                header,
            }
        })?;

    Ok(links.get("next").map(|link| link.raw_uri.clone()))
}

//-------------------------------------------
//
// Unit tests
//
// ------------------------------------------
