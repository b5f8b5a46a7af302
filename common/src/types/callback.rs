use std::sync::Arc;
use uuid::Uuid;

/// Callback invoked by a publisher with the id of the registered listener and the event.
pub type Callback<T> = Arc<dyn Fn(Uuid, Arc<T>) + Send + Sync>;
