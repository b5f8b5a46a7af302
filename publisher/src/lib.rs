//! # Crate publisher
//!
//! ## publisher
//!
//! The `publisher` crate provides a mechanism for registering and notifying listeners
//! of new events of type `T`.
//!
//! This crate is designed to handle dynamic registration of callback functions as listeners,
//! ensuring that all registered listeners receive updates when an event occurs. Events can
//! be routed by publisher type (for example one publisher per sensor) with `PublisherManager`.
//!
//! ### Example
//!
//! ```
//! use std::sync::Arc;
//! use uuid::Uuid;
//! use publisher::{Listener, Publishable, Publisher};
//!
//! let publisher = Publisher::new();
//!
//! // Register a listener
//! let mut listener = Listener::new(|_id: Uuid, data: Arc<String>| {
//!     println!("Listener received: {}", data);
//! });
//! let listener_id = publisher.register_listener(&mut listener);
//!
//! // Notify all listeners
//! publisher.notify_listeners(Arc::new("Hello, World!".to_string()));
//!
//! // Unregister the listener
//! publisher
//!     .unregister_listener(listener_id)
//!     .expect("Failed to unregister listener");
//!
//! // Verify that no listeners are left
//! assert!(publisher.is_empty());
//! ```

pub mod listener;
mod macros;
pub mod publisher;
pub mod publisher_manager;

pub use listener::Listener;
pub use publisher::{Publishable, Publisher};
pub use publisher_manager::PublisherManager;

#[derive(PartialEq, Clone, Debug)]
pub enum PublisherError {
    ListenerNotFound(String),
    PublisherNotFound(String),
}

impl std::fmt::Display for PublisherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PublisherError::ListenerNotFound(msg) => write!(f, "{}", msg),
            PublisherError::PublisherNotFound(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for PublisherError {}
