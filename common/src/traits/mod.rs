pub mod listener;
pub mod publisher;
pub mod source;

pub use crate::traits::listener::SensorListener;
pub use crate::traits::publisher::Notifiable;
pub use crate::traits::source::SensorSource;
