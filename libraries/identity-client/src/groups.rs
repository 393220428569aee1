//! Group operations.

use crate::client::IdentityClient;
use crate::error::{IdentityClientError, Result};
use crate::resource::AdminResource;
use crate::types::{Group, GroupWithUsers};
use tracing::{debug, error};

impl AdminResource for Group {
    const COLLECTION: &'static str = "groups";
    const KIND: &'static str = "group";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl IdentityClient {
    /// List all top-level groups of the realm.
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        self.list_resources("list groups").await
    }

    /// Get a single group by id.
    pub async fn get_group(&self, id: &str) -> Result<Group> {
        self.get_resource(id, "get group").await
    }

    pub async fn create_group(&self, group: Group) -> Result<Group> {
        self.create_resource(group, "create group").await
    }

    /// Rename a group. Succeeds only on 204.
    pub async fn update_group(&self, id: &str, group: Group) -> Result<Group> {
        self.update_resource(id, group, "update group").await
    }

    pub async fn delete_group(&self, id: &str) -> Result<()> {
        self.delete_resource::<Group>(id, "delete group").await
    }

    /// All groups paired with their members, in backend listing order.
    ///
    /// Member lists are fetched one group at a time. The first failing group
    /// aborts the whole listing with [`IdentityClientError::GroupMembers`];
    /// no partial result is returned.
    pub async fn list_groups_with_users(&self) -> Result<Vec<GroupWithUsers>> {
        let groups = self.list_groups().await?;
        let mut result = Vec::with_capacity(groups.len());

        for group in groups {
            let Some(group_id) = group.id.clone() else {
                error!(name = %group.name, "Listed group has no id");
                return Err(IdentityClientError::Parse(format!(
                    "group {} has no id",
                    group.name
                )));
            };

            let users = self.list_group_users(&group_id).await.map_err(|e| {
                error!(group_id = %group_id, error = %e, "Failed to list members for group");
                IdentityClientError::GroupMembers {
                    group_id: group_id.clone(),
                    source: Box::new(e),
                }
            })?;

            result.push(GroupWithUsers { group, users });
        }

        debug!(groups = result.len(), "Listed groups with users");
        Ok(result)
    }
}
