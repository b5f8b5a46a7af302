use datalogger::services;
use datalogger::{DataLoggerConfig, UiEvent};
use tokio::time::Duration;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = DataLoggerConfig::from_env().unwrap();
    let add_sensor_noise = true;

    // Start simulated sweep
    let (handle, mut ui_events) = services::run_simulated_service(&config, add_sensor_noise).unwrap();

    // Stands in for the UI: prints everything but the progress ticks
    let ui = tokio::spawn(async move {
        while let Some(event) = ui_events.recv().await {
            match event {
                UiEvent::Progress { current, max } if current % 50 != 0 && current != max => {}
                event => println!("{}", event),
            }
        }
    });

    let timeout_duration = Duration::from_secs(60);
    let _ = tokio::time::timeout(timeout_duration, async {
        handle.await.unwrap();
        ui.await.unwrap();
    })
    .await;
}
