//! REST Data Sources
//!
//! Binds the core [`DataSource`] contract to the workshop REST API.

mod resources;

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use workshop_core::status::{self, Status};
use workshop_core::{
    CoreError, CoreResult, DataSource, Editable, Entity, Listable, PageRequest, PageResult, Payload, Tabular,
};

pub use resources::ApiResource;

/// Everything a generic resource screen needs from a record type
pub trait Resource:
    Listable + Editable + Tabular + ApiResource + DeserializeOwned + fmt::Debug + Send + Sync
{
}

impl<T> Resource for T where
    T: Listable + Editable + Tabular + ApiResource + DeserializeOwned + fmt::Debug + Send + Sync
{
}

/// Page body as served by the API
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageBody<T> {
    content: Vec<T>,
    #[serde(default)]
    total_pages: usize,
    #[serde(default)]
    total_elements: usize,
}

impl<T> From<PageBody<T>> for PageResult<T> {
    fn from(body: PageBody<T>) -> Self {
        PageResult {
            items: body.content,
            total_pages: body.total_pages,
            total_elements: body.total_elements,
        }
    }
}

/// Error body carrying the record status that blocked a change
#[derive(Deserialize)]
struct ConflictBody {
    status: Option<String>,
}

/// CRUD over `{base_url}/{T::PATH}`
pub struct RestSource<T> {
    client: Client,
    base_url: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for RestSource<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ApiResource> RestSource<T> {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            _marker: PhantomData,
        }
    }

    fn collection_url(&self) -> String {
        format!("{}/{}", self.base_url, T::PATH)
    }

    fn item_url(&self, id: impl fmt::Display) -> String {
        format!("{}/{}/{}", self.base_url, T::PATH, id)
    }
}

/// Query string of a page request. Empty and "all" filters are left out.
pub fn page_query(request: &PageRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("page", request.page_index.to_string()),
        ("size", request.page_size.to_string()),
    ];
    let search = request.search_term.trim();
    if !search.is_empty() {
        query.push(("search", search.to_string()));
    }
    if !status::is_unfiltered(request.status_filter.as_deref()) {
        if let Some(filter) = request.status_filter.as_deref() {
            let value = Status::parse(filter)
                .map(|s| s.key().to_uppercase())
                .unwrap_or_else(|| filter.trim().to_string());
            query.push(("status", value));
        }
    }
    if !status::is_unfiltered(request.category_filter.as_deref()) {
        if let Some(category) = request.category_filter.as_deref() {
            query.push(("category", category.trim().to_string()));
        }
    }
    query
}

/// Map an unsuccessful HTTP status to the core error taxonomy
pub fn status_error(code: StatusCode, body: &str) -> CoreError {
    match code {
        StatusCode::NOT_FOUND => CoreError::NotFound(body_or_reason(code, body)),
        StatusCode::CONFLICT => {
            let blocking = serde_json::from_str::<ConflictBody>(body)
                .ok()
                .and_then(|b| b.status)
                .and_then(|s| Status::parse(&s));
            match blocking {
                Some(status) => CoreError::Conflict { status },
                None => CoreError::network(format!("409 Conflict: {}", body_or_reason(code, body))),
            }
        }
        _ => CoreError::network(format!("{}: {}", code, body_or_reason(code, body))),
    }
}

fn body_or_reason(code: StatusCode, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        code.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        body.to_string()
    }
}

fn transport(err: reqwest::Error) -> CoreError {
    CoreError::network(err.to_string())
}

async fn send(request: RequestBuilder) -> CoreResult<Response> {
    let response = request.send().await.map_err(transport)?;
    if response.status().is_success() {
        return Ok(response);
    }
    let code = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(status_error(code, &body))
}

async fn read_json<V: DeserializeOwned>(request: RequestBuilder) -> CoreResult<V> {
    send(request).await?.json::<V>().await.map_err(transport)
}

#[async_trait(?Send)]
impl<T> DataSource<T> for RestSource<T>
where
    T: Entity + ApiResource + DeserializeOwned,
{
    async fn fetch_page(&self, request: &PageRequest) -> CoreResult<PageResult<T>> {
        let url = self.collection_url();
        log::debug!("[API] GET {} {:?}", url, request);
        let body: PageBody<T> = read_json(self.client.get(url).query(&page_query(request))).await?;
        Ok(body.into())
    }

    async fn search(&self, query: &str) -> CoreResult<Vec<T>> {
        let url = format!("{}/search", self.collection_url());
        read_json(self.client.get(url).query(&[("q", query)])).await
    }

    async fn get(&self, id: T::Id) -> CoreResult<Option<T>> {
        match read_json(self.client.get(self.item_url(id))).await {
            Ok(item) => Ok(Some(item)),
            Err(CoreError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn create(&self, payload: &Payload) -> CoreResult<T> {
        log::debug!("[API] POST {}", self.collection_url());
        read_json(self.client.post(self.collection_url()).json(payload)).await
    }

    async fn update(&self, id: T::Id, payload: &Payload) -> CoreResult<T> {
        log::debug!("[API] PUT {}", self.item_url(id));
        read_json(self.client.put(self.item_url(id)).json(payload)).await
    }

    async fn delete(&self, id: T::Id) -> CoreResult<()> {
        log::debug!("[API] DELETE {}", self.item_url(id));
        send(self.client.delete(self.item_url(id))).await.map(|_| ())
    }
}
