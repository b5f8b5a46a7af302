use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use uuid::Uuid;

use crate::adapters::mock::{MockUploader, SimulatedSensors, StaticConnectivity};
use crate::adapters::production::{HttpUploader, TcpConnectivity};
use crate::helpers;
use crate::models::accumulator::Accumulator;
use crate::models::config::{DataLoggerConfig, DeviceConfig};
use crate::models::errors::DataLoggerError;
use crate::models::listeners::{AccelerometerListener, GyroscopeListener, MagnetometerListener};
use crate::models::payload::{DeviceMetadata, UploadPayload};
use crate::models::scheduler::{Scheduler, SweepPlan, SweepStep};
use crate::models::ui::{ui_channel, Notice, UiEvent, UiHandle};
use crate::ports::{ConnectivityProbe, Uploader};
use common::traits::{SensorListener, SensorSource};
use common::types::{ExperimentKey, SensorInfo, SensorType};

/// Clears the running flag when the sweep ends, however it ends.
struct SweepGuard<'a> {
    running: &'a AtomicBool,
}

impl<'a> SweepGuard<'a> {
    fn acquire(running: &'a AtomicBool) -> Result<Self, DataLoggerError> {
        running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| DataLoggerError::SweepInProgress)?;
        Ok(Self { running })
    }
}

impl Drop for SweepGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
    }
}

/// Runs sweeps against a sensor source and uploads what they recorded.
pub struct DataLogger<S, U, C>
where
    S: SensorSource + 'static,
    U: Uploader + 'static,
    C: ConnectivityProbe,
{
    source: Arc<S>,
    uploader: Arc<U>,
    connectivity: C,
    accumulator: Arc<Accumulator>,
    plan: SweepPlan,
    device: DeviceConfig,
    magnetometer: SensorInfo,
    ui: UiHandle,
    running: AtomicBool,
}

impl<S, U, C> DataLogger<S, U, C>
where
    S: SensorSource + 'static,
    U: Uploader + 'static,
    C: ConnectivityProbe,
{
    /// Creates a new `DataLogger`.
    /// Every sensor must be present on the device. If one is missing, a sensor unavailable alert
    /// is sent to the UI and SensorUnavailable is returned.
    pub fn new(
        source: Arc<S>,
        uploader: U,
        connectivity: C,
        config: &DataLoggerConfig,
        ui: UiHandle,
    ) -> Result<Self, DataLoggerError> {
        config.validate()?;

        let mut magnetometer = None;
        for sensor_type in SensorType::ALL {
            match source.default_sensor(sensor_type) {
                Some(info) => {
                    debug!("Found {}: {}", sensor_type, info.name());
                    if sensor_type == SensorType::Magnetometer {
                        magnetometer = Some(info);
                    }
                }
                None => {
                    error!("{} is not available", sensor_type);
                    ui.sensor_unavailable(sensor_type);
                    return Err(DataLoggerError::SensorUnavailable(sensor_type));
                }
            }
        }
        let magnetometer =
            magnetometer.ok_or(DataLoggerError::SensorUnavailable(SensorType::Magnetometer))?;

        Ok(Self {
            source,
            uploader: Arc::new(uploader),
            connectivity,
            accumulator: Arc::new(Accumulator::new()),
            plan: config.sweep_plan(),
            device: config.device.clone(),
            magnetometer,
            ui,
            running: AtomicBool::new(false),
        })
    }

    pub fn accumulator(&self) -> &Arc<Accumulator> {
        &self.accumulator
    }

    pub fn plan(&self) -> &SweepPlan {
        &self.plan
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Runs one full sweep, then hands its payload to a separate upload task.
    ///
    /// Returns NetworkUnavailable without sweeping if the device is offline, and SweepInProgress
    /// if another sweep is running. On success the handle of the upload task is returned; it
    /// resolves to the outcome of the upload.
    pub async fn start(&self) -> Result<JoinHandle<Result<(), DataLoggerError>>, DataLoggerError> {
        let _guard = SweepGuard::acquire(&self.running)?;
        self.ui.progress_visible(true);

        if !self.connectivity.has_internet().await {
            warn!("Network is unavailable, sweep not started");
            self.ui.notice(Notice::NetworkUnavailable);
            self.ui.progress_visible(false);
            return Err(DataLoggerError::NetworkUnavailable);
        }

        self.accumulator.clear();
        info!("Starting data collection process");
        self.sweep().await;
        self.ui.progress_visible(false);

        let payload = UploadPayload::new(
            self.accumulator.export(),
            &self.device,
            DeviceMetadata::collect(&self.device, &self.magnetometer),
        );
        let uploader = self.uploader.clone();
        let ui = self.ui.clone();
        Ok(tokio::spawn(async move {
            upload(uploader.as_ref(), &ui, payload).await
        }))
    }

    // Drives the scheduler on absolute deadlines so time spent handling a step doesn't
    // accumulate into drift.
    async fn sweep(&self) {
        let mut scheduler = Scheduler::new(self.plan.clone());
        let mut registrations = Vec::new();
        let mut deadline = Instant::now();
        let mut steps: Vec<SweepStep> = scheduler.start().into_iter().collect();

        loop {
            for step in steps {
                match step {
                    SweepStep::Activate(key) => registrations = self.activate(key).await,
                    SweepStep::Progress { current, max } => self.ui.progress(current, max),
                    SweepStep::Deactivate(key) => {
                        self.deactivate(key, std::mem::take(&mut registrations))
                    }
                    SweepStep::Finished => {
                        info!("Data collection finished");
                        return;
                    }
                }
            }
            deadline += self.plan.update_interval;
            sleep_until(deadline).await;
            steps = scheduler.tick();
        }
    }

    async fn activate(&self, key: ExperimentKey) -> Vec<(SensorType, Uuid)> {
        info!("Starting with : {}", key);
        let cell_start = Instant::now();
        let sampling_period_us = helpers::sampling_period_us(key.frequency_hz());

        let mut registrations = Vec::with_capacity(SensorType::ALL.len());
        let mut register = |sensor_type, sampling_period_us| {
            match self.register(sensor_type, key, sampling_period_us) {
                Ok(id) => registrations.push((sensor_type, id)),
                Err(e) => error!("{}", e),
            }
        };
        register(SensorType::Accelerometer, sampling_period_us);
        if key.magnetometer_enabled() {
            register(
                SensorType::Magnetometer,
                self.plan.magnetometer_sampling_period_us,
            );
        }

        if self.plan.gyroscope_stagger >= self.plan.cell_duration {
            warn!("Gyroscope stagger exceeds the cell, {} has no gyroscope data", key);
        } else {
            sleep_until(cell_start + self.plan.gyroscope_stagger).await;
            register(SensorType::Gyroscope, sampling_period_us);
        }
        registrations
    }

    // Each registration gets its own listener bound to `key`, and the window opens before the
    // listener is registered, so nothing it delivers is lost or filed under another cell.
    fn register(
        &self,
        sensor_type: SensorType,
        key: ExperimentKey,
        sampling_period_us: u32,
    ) -> Result<Uuid, DataLoggerError> {
        let listener: Arc<dyn SensorListener> = match sensor_type {
            SensorType::Accelerometer => {
                Arc::new(AccelerometerListener::new(self.accumulator.clone(), key))
            }
            SensorType::Gyroscope => {
                Arc::new(GyroscopeListener::new(self.accumulator.clone(), key))
            }
            SensorType::Magnetometer => Arc::new(MagnetometerListener),
        };
        self.accumulator.open_window(sensor_type, key);
        match self
            .source
            .register_listener(listener, sensor_type, sampling_period_us)
        {
            Ok(id) => {
                debug!(
                    "{} listener registered every {} us",
                    sensor_type, sampling_period_us
                );
                Ok(id)
            }
            Err(e) => {
                self.accumulator.close_window(sensor_type);
                Err(DataLoggerError::Registration(format!("{}: {}", sensor_type, e)))
            }
        }
    }

    fn deactivate(&self, key: ExperimentKey, registrations: Vec<(SensorType, Uuid)>) {
        for (sensor_type, id) in registrations {
            if let Err(e) = self.source.unregister_listener(id) {
                error!("Error unregistering {} listener: {}", sensor_type, e);
            }
            self.accumulator.close_window(sensor_type);
        }
        debug!("Finished with : {}", key);
    }
}

/// Sends the payload once and reports the outcome to the UI.
pub async fn upload<U>(
    uploader: &U,
    ui: &UiHandle,
    payload: UploadPayload,
) -> Result<(), DataLoggerError>
where
    U: Uploader + ?Sized,
{
    ui.notice(Notice::SendingData);
    info!("Sending {} records", payload.record_count());
    match uploader.send(&payload).await {
        Ok(()) => {
            info!("Data sent");
            ui.notice(Notice::UploadSucceeded);
            ui.completion_dialog();
            Ok(())
        }
        Err(e) => {
            error!("Error sending data: {}", e);
            ui.notice(Notice::UploadFailed);
            Err(e)
        }
    }
}

fn spawn_sweep<S, U, C>(datalogger: DataLogger<S, U, C>) -> JoinHandle<()>
where
    S: SensorSource + 'static,
    U: Uploader + 'static,
    C: ConnectivityProbe + 'static,
{
    tokio::spawn(async move {
        match datalogger.start().await {
            Ok(upload) => {
                if let Err(e) = upload.await {
                    error!("Upload task failed: {}", e);
                }
            }
            Err(e) => error!("Error in sweep: {}", e),
        }
    })
}

/// Runs one sweep against a sensor source and uploads the result to the configured server.
///
/// Returns a tuple containing:
/// - A `tokio::task::JoinHandle<()>` finishing once the upload is done.
/// - The receiving end of the UI channel.
///
/// A ClientBuild error is returned if the HTTP client cannot be created, and SensorUnavailable
/// if the device misses a sensor.
pub fn run_service<S>(
    source: Arc<S>,
    config: &DataLoggerConfig,
) -> Result<(JoinHandle<()>, UnboundedReceiver<UiEvent>), DataLoggerError>
where
    S: SensorSource + 'static,
{
    let uploader = HttpUploader::new(&config.upload)?;
    let connectivity = TcpConnectivity::for_url(&config.upload.base_url)?;
    let (ui, ui_events) = ui_channel();
    let datalogger = DataLogger::new(source, uploader, connectivity, config, ui)?;
    Ok((spawn_sweep(datalogger), ui_events))
}

/// Runs one sweep against simulated sensors, with an upload that always succeeds and never
/// leaves the process.
pub fn run_simulated_service(
    config: &DataLoggerConfig,
    add_sensor_noise: bool,
) -> Result<(JoinHandle<()>, UnboundedReceiver<UiEvent>), DataLoggerError> {
    let source = Arc::new(SimulatedSensors::new(add_sensor_noise)?);
    let (ui, ui_events) = ui_channel();
    let datalogger = DataLogger::new(
        source,
        MockUploader::with_status(200),
        StaticConnectivity(true),
        config,
        ui,
    )?;
    Ok((spawn_sweep(datalogger), ui_events))
}
