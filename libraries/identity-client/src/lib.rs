//! Identity Backend Client
//!
//! Admin REST client for the identity backend that is the system of record
//! for users, groups and group memberships.
//!
//! # Features
//!
//! - **Session token**: password-grant admin token, fetched eagerly and
//!   refreshed transparently (one retry) when the backend answers 401
//! - **Users**: list, get, search by email, create, update, delete
//! - **Groups**: list, get, create, update, delete, list with members
//! - **Memberships**: list a user's groups, list a group's members, add and
//!   remove edges, add by email
//!
//! # Example
//!
//! ```ignore
//! use identity_client::{BackendConfig, IdentityClient, User};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::new("http://localhost:8080", "master", "admin", "admin");
//!     let client = IdentityClient::connect(config).await?;
//!
//!     let users = client.list_users().await?;
//!     println!("Found {} users", users.len());
//!
//!     client.add_user_to_group_by_email("jane@example.com", "group-id").await?;
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod groups;
mod membership;
mod resource;
mod types;
mod users;

pub use client::IdentityClient;
pub use error::{IdentityClientError, Result};
pub use resource::AdminResource;
pub use types::{BackendConfig, Group, GroupWithUsers, User, DEFAULT_CLIENT_ID};
