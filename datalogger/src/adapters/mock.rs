// Stand-ins for the sensor hardware, the collection server and the network, for demos and tests.

mod connectivity;
mod gaussian;
mod sensors;
mod timestamp;
mod uploader;

pub use connectivity::StaticConnectivity;
pub use sensors::SimulatedSensors;
pub use uploader::{MockResponse, MockUploader};
