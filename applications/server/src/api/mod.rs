/// API route modules
pub mod extract;
pub mod groups;
pub mod health;
pub mod membership;
pub mod users;
