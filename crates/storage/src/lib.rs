#![forbid(unsafe_code)]

pub mod feed;
pub mod repository;
pub mod sqlite;

pub use feed::{ChangeFeed, Listener, Subscription};
pub use repository::{Storage, StorageError};
