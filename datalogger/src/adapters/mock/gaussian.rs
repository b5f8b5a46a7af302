use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

use common::types::XYZ;

use crate::models::errors::DataLoggerError;

/// Functionality to add some Gaussian noise.
#[derive(Clone)]
pub(super) struct GaussianNoise {
    normal: Normal<f64>,
}

impl GaussianNoise {
    /// Creates new distribution from mean and stdev
    pub(super) fn new(mean: f64, stdev: f64) -> Result<Self, DataLoggerError> {
        let normal = Normal::new(mean, stdev)
            .map_err(|e| DataLoggerError::Config(format!("Invalid sensor noise: {}", e)))?;
        Ok(Self { normal })
    }

    /// Sample from distribution
    pub(super) fn draw_sample(&self, rng: &mut StdRng) -> f64 {
        self.normal.sample(rng)
    }

    /// Adds noise to each axis of a measurement
    pub(super) fn add_noise(&self, rng: &mut StdRng, data: XYZ) -> XYZ {
        let [x, y, z] = data.inner();
        XYZ::new([
            x + self.draw_sample(rng) as f32,
            y + self.draw_sample(rng) as f32,
            z + self.draw_sample(rng) as f32,
        ])
    }
}
