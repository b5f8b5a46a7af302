pub mod sensor_event;
pub mod sensor_info;
pub mod sensor_type;

pub use crate::types::sensors::sensor_event::SensorEvent;
pub use crate::types::sensors::sensor_info::SensorInfo;
pub use crate::types::sensors::sensor_type::SensorType;
