use dashmap::DashMap;
use log::{debug, error};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use common::traits::{SensorListener, SensorSource};
use common::types::{SensorEvent, SensorInfo, SensorType, XYZ};
use publisher::{listener, PublisherManager};

use super::gaussian::GaussianNoise;
use super::timestamp::SensorClock;
use crate::models::errors::DataLoggerError;

const ACCELEROMETER_MIN_DELAY_US: u32 = 2_500;
const GYROSCOPE_MIN_DELAY_US: u32 = 2_500;
const MAGNETOMETER_MIN_DELAY_US: u32 = 10_000;

const SENSOR_NOISE_STDEV: f64 = 0.02;

/// Device lying flat on a table.
fn baseline(sensor_type: SensorType) -> XYZ {
    match sensor_type {
        SensorType::Accelerometer => XYZ::new([0.0, 0.0, 9.81]),
        SensorType::Gyroscope => XYZ::new([0.0, 0.0, 0.0]),
        SensorType::Magnetometer => XYZ::new([22.0, -5.0, 42.0]),
    }
}

// Hands events published for a sensor type to a sensor listener.
struct Forward {
    listener: Arc<dyn SensorListener>,
}

impl Forward {
    fn on_event(&self, _id: Uuid, event: Arc<SensorEvent>) {
        self.listener.on_event(&event);
    }
}

struct Emitter {
    period_us: u32,
    handle: JoinHandle<()>,
}

/// Sensor source generating readings on the tokio runtime. Each sensor type with at least one
/// listener runs an emitter task at the shortest sampling period requested for it, never faster
/// than the sensor's minimum delay.
pub struct SimulatedSensors {
    publishers: PublisherManager<SensorEvent, SensorType>,
    registrations: DashMap<Uuid, (SensorType, u32)>,
    emitters: DashMap<SensorType, Emitter>,
    clock: SensorClock,
    sensor_noise: Option<GaussianNoise>,
}

impl SimulatedSensors {
    /// Accelerometer, gyroscope and magnetometer, optionally with Gaussian noise
    /// on top of a resting device's readings.
    pub fn new(add_sensor_noise: bool) -> Result<Self, DataLoggerError> {
        Self::with_sensors(&SensorType::ALL, add_sensor_noise)
    }

    /// Simulated device carrying only the given sensors.
    pub fn with_sensors(
        sensor_types: &[SensorType],
        add_sensor_noise: bool,
    ) -> Result<Self, DataLoggerError> {
        let sensor_noise = if add_sensor_noise {
            Some(GaussianNoise::new(0.0, SENSOR_NOISE_STDEV)?)
        } else {
            None
        };
        Ok(Self {
            publishers: PublisherManager::new(sensor_types),
            registrations: DashMap::new(),
            emitters: DashMap::new(),
            clock: SensorClock::new(),
            sensor_noise,
        })
    }

    /// Simulates a sensor going away: its listeners are dropped and its emitter stopped.
    pub fn remove_sensor(&self, sensor_type: SensorType) {
        self.publishers.remove_publisher(&sensor_type);
        self.registrations
            .retain(|_, (registered_type, _)| *registered_type != sensor_type);
        self.update_emitter(sensor_type);
    }

    /// Number of listeners currently registered for a sensor type.
    pub fn listener_count(&self, sensor_type: SensorType) -> usize {
        self.publishers.listener_count(&sensor_type)
    }

    /// Sampling period of the running emitter, if any.
    pub fn emitter_period_us(&self, sensor_type: SensorType) -> Option<u32> {
        self.emitters.get(&sensor_type).map(|emitter| emitter.period_us)
    }

    // Restarts, stops or leaves the emitter of a sensor type so that it matches its registrations.
    fn update_emitter(&self, sensor_type: SensorType) {
        let period_us = self
            .registrations
            .iter()
            .filter(|entry| entry.value().0 == sensor_type)
            .map(|entry| entry.value().1)
            .min();

        let Some(period_us) = period_us else {
            if let Some((_, emitter)) = self.emitters.remove(&sensor_type) {
                emitter.handle.abort();
                debug!("Emitter for {} stopped", sensor_type);
            }
            return;
        };

        let unchanged = self
            .emitters
            .get(&sensor_type)
            .map_or(false, |emitter| emitter.period_us == period_us);
        if unchanged {
            return;
        }

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("No runtime to run the {} emitter: {}", sensor_type, e);
                return;
            }
        };
        let handle = runtime.spawn(emit(
            sensor_type,
            Duration::from_micros(period_us.max(1) as u64),
            self.publishers.clone(),
            self.clock,
            self.sensor_noise.clone(),
        ));
        debug!("Emitter for {} running every {} us", sensor_type, period_us);
        if let Some(previous) = self.emitters.insert(sensor_type, Emitter { period_us, handle }) {
            previous.handle.abort();
        }
    }
}

async fn emit(
    sensor_type: SensorType,
    period: Duration,
    publishers: PublisherManager<SensorEvent, SensorType>,
    clock: SensorClock,
    sensor_noise: Option<GaussianNoise>,
) {
    let mut rng = StdRng::from_entropy();
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        interval.tick().await;
        let values = match &sensor_noise {
            Some(noise) => noise.add_noise(&mut rng, baseline(sensor_type)),
            None => baseline(sensor_type),
        };
        let event = SensorEvent::new(sensor_type, clock.now_ns(), values);
        publishers.notify_listeners(&sensor_type, Arc::new(event));
    }
}

impl SensorSource for SimulatedSensors {
    fn default_sensor(&self, sensor_type: SensorType) -> Option<SensorInfo> {
        if !self
            .publishers
            .get_available_publisher_types()
            .contains(&sensor_type)
        {
            return None;
        }
        let min_delay_us = match sensor_type {
            SensorType::Accelerometer => ACCELEROMETER_MIN_DELAY_US,
            SensorType::Gyroscope => GYROSCOPE_MIN_DELAY_US,
            SensorType::Magnetometer => MAGNETOMETER_MIN_DELAY_US,
        };
        Some(SensorInfo::new(
            sensor_type,
            &format!("simulated {}", sensor_type),
            min_delay_us,
        ))
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor_type: SensorType,
        sampling_period_us: u32,
    ) -> Result<Uuid, String> {
        let info = self
            .default_sensor(sensor_type)
            .ok_or_else(|| format!("No {} available", sensor_type))?;
        Handle::try_current().map_err(|e| e.to_string())?;

        let forward = Arc::new(Forward { listener });
        let mut forward = listener!(forward.on_event);
        let id = self
            .publishers
            .add_listener(&mut forward, &sensor_type)
            .map_err(|e| e.to_string())?;
        self.registrations
            .insert(id, (sensor_type, sampling_period_us.max(info.min_delay_us())));
        self.update_emitter(sensor_type);
        Ok(id)
    }

    fn unregister_listener(&self, id: Uuid) -> Result<(), String> {
        let sensor_type = self
            .publishers
            .remove_listener(id)
            .map_err(|e| e.to_string())?;
        self.registrations.remove(&id);
        self.update_emitter(sensor_type);
        Ok(())
    }
}

impl Drop for SimulatedSensors {
    fn drop(&mut self) {
        for entry in self.emitters.iter() {
            entry.value().handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collector {
        events: Mutex<Vec<SensorEvent>>,
    }

    impl SensorListener for Collector {
        fn on_event(&self, event: &SensorEvent) {
            self.events.lock().unwrap().push(*event);
        }
    }

    impl Collector {
        fn count(&self) -> usize {
            self.events.lock().unwrap().len()
        }
    }

    #[test]
    fn test_default_sensors() {
        let sensors = SimulatedSensors::new(false).unwrap();
        let magnetometer = sensors.default_sensor(SensorType::Magnetometer).unwrap();
        assert_eq!(magnetometer.min_delay_us(), MAGNETOMETER_MIN_DELAY_US);
        assert_eq!(magnetometer.max_frequency_hz(), Some(100.0));
    }

    #[test]
    fn test_missing_sensor() {
        let sensors =
            SimulatedSensors::with_sensors(&[SensorType::Accelerometer], false).unwrap();
        assert!(sensors.default_sensor(SensorType::Gyroscope).is_none());
    }

    #[tokio::test]
    async fn test_register_missing_sensor_fails() {
        let sensors =
            SimulatedSensors::with_sensors(&[SensorType::Accelerometer], false).unwrap();
        let listener = Arc::new(Collector::default());
        assert!(sensors
            .register_listener(listener, SensorType::Gyroscope, 5_000)
            .is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_at_requested_period() {
        let sensors = SimulatedSensors::new(false).unwrap();
        let listener = Arc::new(Collector::default());
        let id = sensors
            .register_listener(listener.clone(), SensorType::Accelerometer, 5_000)
            .unwrap();
        assert_eq!(sensors.emitter_period_us(SensorType::Accelerometer), Some(5_000));

        tokio::time::sleep(Duration::from_millis(102)).await;
        sensors.unregister_listener(id).unwrap();
        let received = listener.count();
        // first tick fires immediately
        assert!((20..=21).contains(&received));

        let events = listener.events.lock().unwrap().clone();
        assert!(events
            .windows(2)
            .all(|pair| pair[0].timestamp_ns() < pair[1].timestamp_ns()));
        assert!(events
            .iter()
            .all(|event| event.values() == baseline(SensorType::Accelerometer)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_events_after_unregister() {
        let sensors = SimulatedSensors::new(false).unwrap();
        let listener = Arc::new(Collector::default());
        let id = sensors
            .register_listener(listener.clone(), SensorType::Gyroscope, 5_000)
            .unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        sensors.unregister_listener(id).unwrap();
        assert_eq!(sensors.listener_count(SensorType::Gyroscope), 0);
        assert_eq!(sensors.emitter_period_us(SensorType::Gyroscope), None);

        let received = listener.count();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(listener.count(), received);
    }

    #[tokio::test(start_paused = true)]
    async fn test_period_clamped_to_min_delay() {
        let sensors = SimulatedSensors::new(false).unwrap();
        let listener = Arc::new(Collector::default());
        sensors
            .register_listener(listener, SensorType::Magnetometer, 5_001)
            .unwrap();
        assert_eq!(
            sensors.emitter_period_us(SensorType::Magnetometer),
            Some(MAGNETOMETER_MIN_DELAY_US)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_emitter_follows_fastest_listener() {
        let sensors = SimulatedSensors::new(false).unwrap();
        let slow = sensors
            .register_listener(Arc::new(Collector::default()), SensorType::Accelerometer, 7_194)
            .unwrap();
        let fast = sensors
            .register_listener(Arc::new(Collector::default()), SensorType::Accelerometer, 5_000)
            .unwrap();
        assert_eq!(sensors.emitter_period_us(SensorType::Accelerometer), Some(5_000));

        sensors.unregister_listener(fast).unwrap();
        assert_eq!(sensors.emitter_period_us(SensorType::Accelerometer), Some(7_194));

        sensors.unregister_listener(slow).unwrap();
        assert_eq!(sensors.emitter_period_us(SensorType::Accelerometer), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_remove_sensor() {
        let sensors = SimulatedSensors::new(false).unwrap();
        let listener = Arc::new(Collector::default());
        sensors
            .register_listener(listener.clone(), SensorType::Gyroscope, 5_000)
            .unwrap();

        sensors.remove_sensor(SensorType::Gyroscope);

        assert!(sensors.default_sensor(SensorType::Gyroscope).is_none());
        assert_eq!(sensors.emitter_period_us(SensorType::Gyroscope), None);
        let received = listener.count();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(listener.count(), received);
    }

    #[test]
    fn test_unregister_unknown_id() {
        let sensors = SimulatedSensors::new(false).unwrap();
        assert!(sensors.unregister_listener(Uuid::new_v4()).is_err());
    }
}
