//! General functionality for the `datalogger` workspace
//!
//! Shared sensor vocabulary: sensor types, raw sensor events, formatted readings,
//! the experiment key readings are grouped under, and the listener/source traits
//! that sensor subscriptions are registered through.

#[doc(hidden)]
pub mod traits;
#[doc(hidden)]
pub mod types;

// Re-export traits
#[doc(inline)]
pub use traits::{Notifiable, SensorListener, SensorSource};

// Re-export types
#[doc(inline)]
pub use types::{
    Callback, ExperimentKey, Reading, SensorEvent, SensorInfo, SensorType, XYZ,
};
