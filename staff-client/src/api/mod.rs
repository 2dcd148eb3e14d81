//! Per-entity REST API
//!
//! One call per verb per resource:
//!
//! | Call        | Request                                  |
//! |-------------|------------------------------------------|
//! | fetch_all   | `GET {base}`                             |
//! | fetch_one   | `GET {base}/{id}`                        |
//! | search      | `GET {base}/search?condition=&value=`    |
//! | create      | `POST {base}` (multipart or JSON)        |
//! | update      | `PUT {base}/{id}`                        |
//! | delete      | `DELETE {base}/{id}`                     |

mod attachment;

pub use attachment::Attachment;

use crate::client::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use shared::{ApiResponse, Entity, OneOrMany, ProfileImage, SearchCondition};
use std::marker::PhantomData;
use std::sync::Arc;

/// Multipart part carrying the binary attachment
pub const FILE_PART: &str = "file";

/// Typed calls for one resource.
#[async_trait]
pub trait EntityApi<E: Entity>: Send + Sync + 'static {
    async fn fetch_all(&self) -> ClientResult<Vec<E>>;
    async fn fetch_one(&self, id: i64) -> ClientResult<E>;
    async fn search(&self, condition: &SearchCondition<E::SearchField>) -> ClientResult<Vec<E>>;
    async fn create(&self, input: &E::Input, attachment: Option<Attachment>) -> ClientResult<E>;
    async fn update(&self, id: i64, input: &E::Input) -> ClientResult<E>;
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// Profile image upload; returns the URL the server stored the image under.
#[async_trait]
pub trait ImageUploadApi: Send + Sync + 'static {
    async fn upload_profile_image(&self, attachment: Attachment) -> ClientResult<String>;
}

/// REST implementation of [`EntityApi`] over any [`HttpClient`].
pub struct RestApi<E, H = NetworkHttpClient> {
    http: Arc<H>,
    base_url: String,
    _entity: PhantomData<fn() -> E>,
}

impl<E, H> Clone for RestApi<E, H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
            base_url: self.base_url.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E, H> std::fmt::Debug for RestApi<E, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApi")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl<E: Entity, H: HttpClient> RestApi<E, H> {
    pub fn new(http: Arc<H>, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            _entity: PhantomData,
        }
    }

    /// Resolve the base URL for `E` from the configuration
    pub fn from_config(http: Arc<H>, config: &ClientConfig) -> ClientResult<Self> {
        let base_url = config.url_for(E::RESOURCE).ok_or_else(|| {
            ClientError::Config(format!("no base URL configured for `{}`", E::RESOURCE))
        })?;
        Ok(Self::new(http, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{}", self.base_url, id)
    }

    /// JSON part named after the resource, plus the optional `file` part
    fn multipart_form(part_name: &str, input: &E::Input, attachment: Option<Attachment>) -> ClientResult<Form> {
        let json = serde_json::to_vec(input)?;
        let data = Part::bytes(json)
            .file_name(format!("{}.json", part_name))
            .mime_str("application/json")?;

        let mut form = Form::new().part(part_name.to_string(), data);
        if let Some(attachment) = attachment {
            form = form.part(FILE_PART, attachment.into_part()?);
        }
        Ok(form)
    }
}

#[async_trait]
impl<E, H> EntityApi<E> for RestApi<E, H>
where
    E: Entity,
    H: HttpClient + 'static,
{
    async fn fetch_all(&self) -> ClientResult<Vec<E>> {
        let resp: ApiResponse<Vec<E>> = self.http.get(&self.base_url).await?;
        Ok(resp.into_result()?)
    }

    async fn fetch_one(&self, id: i64) -> ClientResult<E> {
        let resp: ApiResponse<E> = self.http.get(&self.item_url(id)).await?;
        Ok(resp.into_result()?)
    }

    async fn search(&self, condition: &SearchCondition<E::SearchField>) -> ClientResult<Vec<E>> {
        if !E::SEARCHABLE {
            return Err(ClientError::Unsupported(format!(
                "`{}` has no search endpoint",
                E::RESOURCE
            )));
        }
        let url = format!("{}/search", self.base_url);
        let resp: ApiResponse<OneOrMany<E>> = self.http.get_with_query(&url, condition).await?;
        Ok(resp.into_result()?.into_vec())
    }

    async fn create(&self, input: &E::Input, attachment: Option<Attachment>) -> ClientResult<E> {
        let resp: ApiResponse<E> = match (E::MULTIPART_PART, attachment) {
            (Some(part_name), attachment) => {
                let form = Self::multipart_form(part_name, input, attachment)?;
                self.http.post_multipart(&self.base_url, form).await?
            }
            (None, Some(_)) => {
                return Err(ClientError::Unsupported(format!(
                    "`{}` does not accept file attachments",
                    E::RESOURCE
                )));
            }
            (None, None) => self.http.post(&self.base_url, input).await?,
        };
        Ok(resp.into_result()?)
    }

    async fn update(&self, id: i64, input: &E::Input) -> ClientResult<E> {
        let resp: ApiResponse<E> = self.http.put(&self.item_url(id), input).await?;
        Ok(resp.into_result()?)
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        let resp: ApiResponse<serde_json::Value> = self.http.delete(&self.item_url(id)).await?;
        Ok(resp.into_ack()?)
    }
}

#[async_trait]
impl<E, H> ImageUploadApi for RestApi<E, H>
where
    E: ProfileImage,
    H: HttpClient + 'static,
{
    async fn upload_profile_image(&self, attachment: Attachment) -> ClientResult<String> {
        let url = format!("{}/images", self.base_url);
        let form = Form::new().part(FILE_PART, attachment.into_part()?);
        let resp: ApiResponse<String> = self.http.post_multipart(&url, form).await?;
        Ok(resp.into_result()?)
    }
}
