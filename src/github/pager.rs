use std::future::Future;

use serde::Deserialize;

use crate::error::FetchError;

/// GraphQL `pageInfo`: where the next page starts and whether there is one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    #[serde(default)]
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

/// A paginated GraphQL connection. Null nodes (e.g. items the viewer cannot see) are skipped.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub nodes: Vec<Option<T>>,
    #[serde(default)]
    pub page_info: PageCursor,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.nodes.into_iter().flatten().collect()
    }
}

/// Everything collected before pagination stopped, and the error that stopped it, if any.
#[derive(Debug)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub error: Option<FetchError>,
}

impl<T> Paged<T> {
    /// Discard partial results if pagination failed.
    pub fn into_result(self) -> Result<Vec<T>, FetchError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.items),
        }
    }
}

/// Call `fetch_page` with successive cursors until the connection reports no next page.
///
/// The first call receives `None`. An error ends the walk but keeps what was
/// already collected.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Paged<T>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Connection<T>, FetchError>>,
{
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let page = match fetch_page(cursor.take()).await {
            Ok(page) => page,
            Err(error) => {
                tracing::debug!(pages, collected = items.len(), %error, "pagination stopped by error");
                return Paged {
                    items,
                    error: Some(error),
                };
            }
        };
        pages += 1;

        let info = page.page_info.clone();
        items.extend(page.into_nodes());

        if !info.has_next_page {
            break;
        }
        match info.end_cursor {
            Some(next) => cursor = Some(next),
            None => {
                tracing::warn!(pages, "page reported more results but no end cursor");
                break;
            }
        }
    }

    tracing::debug!(pages, collected = items.len(), "pagination complete");
    Paged { items, error: None }
}
