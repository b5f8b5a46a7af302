use async_trait::async_trait;

use crate::ports::ConnectivityProbe;

/// Connectivity probe with a fixed answer.
#[derive(Clone, Copy, Debug)]
pub struct StaticConnectivity(pub bool);

#[async_trait]
impl ConnectivityProbe for StaticConnectivity {
    async fn has_internet(&self) -> bool {
        self.0
    }
}
