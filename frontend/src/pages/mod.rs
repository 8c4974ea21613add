pub mod add_inventory;
pub mod auth;
pub mod map;
pub mod moderation;
pub mod record;
pub mod registry;
pub mod stats;
