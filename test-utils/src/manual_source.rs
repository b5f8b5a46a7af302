use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use common::traits::{SensorListener, SensorSource};
use common::types::{SensorEvent, SensorInfo, SensorType};

use crate::fixtures;

/// Minimum delay reported for every sensor of the manual source.
pub const MANUAL_MIN_DELAY_US: u32 = 5_000;

/// Registration changes observed by a `ManualSensorSource`, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistrationRecord {
    Registered {
        sensor_type: SensorType,
        sampling_period_us: u32,
    },
    Unregistered {
        sensor_type: SensorType,
    },
}

struct Registration {
    sensor_type: SensorType,
    listener: Arc<dyn SensorListener>,
}

/// Sensor source driven by the test: events are only delivered when the test emits them,
/// or as a burst right after a listener registers.
pub struct ManualSensorSource {
    sensors: Vec<SensorInfo>,
    registrations: DashMap<Uuid, Registration>,
    history: Mutex<Vec<RegistrationRecord>>,
    burst_on_register: usize,
    clock_ns: AtomicI64,
}

impl ManualSensorSource {
    /// Source with an accelerometer, a gyroscope and a magnetometer.
    pub fn new() -> Self {
        let sensors = SensorType::ALL
            .iter()
            .map(|sensor_type| {
                SensorInfo::new(
                    *sensor_type,
                    &format!("manual {}", sensor_type),
                    MANUAL_MIN_DELAY_US,
                )
            })
            .collect();
        Self {
            sensors,
            registrations: DashMap::new(),
            history: Mutex::new(Vec::new()),
            burst_on_register: 0,
            clock_ns: AtomicI64::new(0),
        }
    }

    /// Removes a sensor from the device.
    pub fn without(mut self, sensor_type: SensorType) -> Self {
        self.sensors.retain(|info| info.sensor_type() != sensor_type);
        self
    }

    /// Emits `n` events to each listener as soon as it registers.
    pub fn with_burst(mut self, n: usize) -> Self {
        self.burst_on_register = n;
        self
    }

    /// Delivers an event to every listener registered for its sensor type.
    /// Returns the number of listeners reached.
    pub fn emit(&self, event: SensorEvent) -> usize {
        let listeners = self.listeners(event.sensor_type());
        for listener in listeners.iter() {
            listener.on_event(&event);
        }
        listeners.len()
    }

    /// Listeners currently registered for a sensor type.
    pub fn listeners(&self, sensor_type: SensorType) -> Vec<Arc<dyn SensorListener>> {
        self.registrations
            .iter()
            .filter(|entry| entry.value().sensor_type == sensor_type)
            .map(|entry| entry.value().listener.clone())
            .collect()
    }

    pub fn registered(&self, sensor_type: SensorType) -> usize {
        self.listeners(sensor_type).len()
    }

    pub fn history(&self) -> Vec<RegistrationRecord> {
        self.history.lock().unwrap().clone()
    }

    fn next_timestamp(&self, sampling_period_us: u32) -> i64 {
        let step = (sampling_period_us.max(1) as i64) * 1_000;
        self.clock_ns.fetch_add(step, Ordering::SeqCst) + step
    }
}

impl Default for ManualSensorSource {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSource for ManualSensorSource {
    fn default_sensor(&self, sensor_type: SensorType) -> Option<SensorInfo> {
        self.sensors
            .iter()
            .find(|info| info.sensor_type() == sensor_type)
            .cloned()
    }

    fn register_listener(
        &self,
        listener: Arc<dyn SensorListener>,
        sensor_type: SensorType,
        sampling_period_us: u32,
    ) -> Result<Uuid, String> {
        if self.default_sensor(sensor_type).is_none() {
            return Err(format!("No {} available", sensor_type));
        }
        let id = Uuid::new_v4();
        self.registrations.insert(
            id,
            Registration {
                sensor_type,
                listener: listener.clone(),
            },
        );
        self.history
            .lock()
            .unwrap()
            .push(RegistrationRecord::Registered {
                sensor_type,
                sampling_period_us,
            });
        for _ in 0..self.burst_on_register {
            let timestamp = self.next_timestamp(sampling_period_us);
            listener.on_event(&fixtures::event(sensor_type, timestamp));
        }
        Ok(id)
    }

    fn unregister_listener(&self, id: Uuid) -> Result<(), String> {
        let (_, registration) = self
            .registrations
            .remove(&id)
            .ok_or_else(|| format!("Registration {} not found", id))?;
        self.history
            .lock()
            .unwrap()
            .push(RegistrationRecord::Unregistered {
                sensor_type: registration.sensor_type,
            });
        Ok(())
    }
}
