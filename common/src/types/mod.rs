pub mod callback;
pub mod experiment_key;
pub mod reading;
pub mod sensors;
pub mod untimed;

pub use callback::Callback;
pub use experiment_key::ExperimentKey;
pub use reading::Reading;
pub use sensors::{SensorEvent, SensorInfo, SensorType};
pub use untimed::XYZ;
