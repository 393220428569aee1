//! User-group membership edges.

use crate::client::IdentityClient;
use crate::error::{IdentityClientError, Result};
use crate::resource::AdminResource;
use crate::types::{Group, User};
use reqwest::{Method, StatusCode};
use tracing::{debug, info};

impl IdentityClient {
    /// Groups the user is a direct member of.
    pub async fn list_user_groups(&self, user_id: &str) -> Result<Vec<Group>> {
        let url = self.admin_url(&[User::COLLECTION, user_id, Group::COLLECTION])?;
        self.get_json(self.request(Method::GET, url), "list user groups")
            .await
    }

    /// Direct members of the group.
    pub async fn list_group_users(&self, group_id: &str) -> Result<Vec<User>> {
        let url = self.admin_url(&[Group::COLLECTION, group_id, "members"])?;
        self.get_json(self.request(Method::GET, url), "list group users")
            .await
    }

    pub async fn add_user_to_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        let url = self.admin_url(&[User::COLLECTION, user_id, Group::COLLECTION, group_id])?;
        self.send(
            self.request(Method::PUT, url),
            &[StatusCode::NO_CONTENT],
            "add user to group",
        )
        .await?;

        info!(user_id = %user_id, group_id = %group_id, "Added user to group");
        Ok(())
    }

    pub async fn remove_user_from_group(&self, user_id: &str, group_id: &str) -> Result<()> {
        let url = self.admin_url(&[User::COLLECTION, user_id, Group::COLLECTION, group_id])?;
        self.send(
            self.request(Method::DELETE, url),
            &[StatusCode::NO_CONTENT],
            "remove user from group",
        )
        .await?;

        info!(user_id = %user_id, group_id = %group_id, "Removed user from group");
        Ok(())
    }

    /// Add the single user matching `email` to the group.
    ///
    /// Fails with [`IdentityClientError::NotFound`] when nobody matches and
    /// [`IdentityClientError::AmbiguousMatch`] when several users do; no
    /// membership call is made in either case.
    pub async fn add_user_to_group_by_email(&self, email: &str, group_id: &str) -> Result<()> {
        let users = self.search_users_by_email(email).await?;

        let user_id = match users.as_slice() {
            [] => return Err(IdentityClientError::NotFound(email.to_string())),
            [user] => user.id.clone().ok_or_else(|| {
                IdentityClientError::Parse(format!("user matching {email} has no id"))
            })?,
            _ => {
                return Err(IdentityClientError::AmbiguousMatch {
                    email: email.to_string(),
                    matches: users.len(),
                })
            }
        };

        debug!(email = %email, user_id = %user_id, "Resolved user by email");
        self.add_user_to_group(&user_id, group_id).await
    }
}
