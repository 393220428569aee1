//! User operations.

use crate::client::IdentityClient;
use crate::error::Result;
use crate::resource::AdminResource;
use crate::types::User;
use reqwest::Method;
use tracing::debug;

impl AdminResource for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "user";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl IdentityClient {
    /// List all users of the realm.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.list_resources("list users").await
    }

    /// Get a single user by id.
    pub async fn get_user(&self, id: &str) -> Result<User> {
        self.get_resource(id, "get user").await
    }

    /// Users whose email matches `email`, as the backend defines matching.
    pub async fn search_users_by_email(&self, email: &str) -> Result<Vec<User>> {
        let url = self.admin_url(&[User::COLLECTION])?;
        debug!(email = %email, "Searching users by email");

        let builder = self.request(Method::GET, url).query(&[("email", email)]);
        self.get_json(builder, "search users").await
    }

    /// Create a user. The returned user carries the backend id when the
    /// backend reported one.
    pub async fn create_user(&self, user: User) -> Result<User> {
        self.create_resource(user, "create user").await
    }

    /// Replace a user's representation. Succeeds only on 204.
    pub async fn update_user(&self, id: &str, user: User) -> Result<User> {
        self.update_resource(id, user, "update user").await
    }

    /// Delete a user by id.
    pub async fn delete_user(&self, id: &str) -> Result<()> {
        self.delete_resource::<User>(id, "delete user").await
    }
}
