//! Generic CRUD over admin REST collections.

use crate::client::IdentityClient;
use crate::error::Result;
use reqwest::header::LOCATION;
use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

/// An entity living in an admin collection such as `users` or `groups`.
pub trait AdminResource: Serialize + DeserializeOwned + Send + Sync {
    /// Collection path segment under the realm.
    const COLLECTION: &'static str;
    /// Singular name used in operation labels and logs.
    const KIND: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

impl IdentityClient {
    pub(crate) async fn list_resources<R: AdminResource>(
        &self,
        operation: &'static str,
    ) -> Result<Vec<R>> {
        let url = self.admin_url(&[R::COLLECTION])?;
        let items: Vec<R> = self.get_json(self.request(Method::GET, url), operation).await?;
        debug!(kind = R::KIND, count = items.len(), "Listed resources");
        Ok(items)
    }

    pub(crate) async fn get_resource<R: AdminResource>(
        &self,
        id: &str,
        operation: &'static str,
    ) -> Result<R> {
        let url = self.admin_url(&[R::COLLECTION, id])?;
        self.get_json(self.request(Method::GET, url), operation).await
    }

    /// POST the entity; accepts 201 or 204.
    ///
    /// The backend usually answers without a body, so the input is returned,
    /// carrying the id from the `Location` header when one is present.
    pub(crate) async fn create_resource<R: AdminResource>(
        &self,
        mut resource: R,
        operation: &'static str,
    ) -> Result<R> {
        let url = self.admin_url(&[R::COLLECTION])?;
        let builder = self.request(Method::POST, url).json(&resource);

        let response = self
            .send(
                builder,
                &[StatusCode::CREATED, StatusCode::NO_CONTENT],
                operation,
            )
            .await?;

        let location_id = location_id(&response);
        let body = response.bytes().await?;

        if let Ok(created) = serde_json::from_slice::<R>(&body) {
            return Ok(created);
        }

        if let Some(id) = location_id {
            resource.set_id(id);
        }
        debug!(kind = R::KIND, id = ?resource.id(), "Created resource");
        Ok(resource)
    }

    /// PUT the entity under the path id; accepts 204 only.
    pub(crate) async fn update_resource<R: AdminResource>(
        &self,
        id: &str,
        mut resource: R,
        operation: &'static str,
    ) -> Result<R> {
        let url = self.admin_url(&[R::COLLECTION, id])?;
        resource.set_id(id.to_string());
        let builder = self.request(Method::PUT, url).json(&resource);

        self.send(builder, &[StatusCode::NO_CONTENT], operation).await?;
        Ok(resource)
    }

    pub(crate) async fn delete_resource<R: AdminResource>(
        &self,
        id: &str,
        operation: &'static str,
    ) -> Result<()> {
        let url = self.admin_url(&[R::COLLECTION, id])?;
        self.send(
            self.request(Method::DELETE, url),
            &[StatusCode::NO_CONTENT],
            operation,
        )
        .await?;

        debug!(kind = R::KIND, id = %id, "Deleted resource");
        Ok(())
    }
}

/// Last path segment of the `Location` header, if any.
fn location_id(response: &Response) -> Option<String> {
    let location = response.headers().get(LOCATION)?.to_str().ok()?;
    let id = location.trim_end_matches('/').rsplit('/').next()?;
    (!id.is_empty()).then(|| id.to_string())
}
