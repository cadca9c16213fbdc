/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

use courier_core::AppConfig;
use courier_core::CourierError;
use courier_core::CourierErrorKind;
use courier_core::Delivery;
use courier_core::DeliveryController;
use courier_core::DeliveryEvent;
use courier_core::Schedule;
use courier_core::collab;
use std::process::ExitCode;

/// Application main entrypoint.
fn main() -> ExitCode {
    let startup_ts_micros = courier_client::time::get_timestamp_micros();
    if let Err(e) = init_logger() {
        println!("Failed to initialize logging: {e:?}");
        return ExitCode::FAILURE;
    }
    #[cfg(feature = "tracing")]
    {
        // Enable tracing via the RUST_LOG environment variable. Example:
        //
        // ```
        // RUST_LOG="reqwest=trace,hyper_util=debug"
        // ```
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
            .with_writer(std::io::stdout)
            .try_init();
    }
    let app_config = match AppConfig::new(env!("CARGO_PKG_NAME"), startup_ts_micros) {
        Ok(app_config) => app_config,
        Err(e) => {
            log::error!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    match run(&app_config) {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            log::warn!("{failed} delivery events could not be processed.");
            ExitCode::FAILURE
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize the logging system and apply filters.
fn init_logger() -> Result<(), log::SetLoggerError> {
    env_logger::builder()
        // Set default log level
        .filter_level(log::LevelFilter::Debug)
        // Customize logging for dependencies
        .filter(Some("reqwest"), log::LevelFilter::Info)
        .filter(Some("hyper_util"), log::LevelFilter::Info)
        .filter(Some("rustls"), log::LevelFilter::Info)
        .filter(Some("courier_maps"), log::LevelFilter::Debug)
        .filter(Some("courier_core::dispatch"), log::LevelFilter::Debug)
        //.write_style(env_logger::fmt::WriteStyle::Never)
        .write_style(env_logger::fmt::WriteStyle::Auto)
        .target(env_logger::fmt::Target::Stdout)
        .is_test(false)
        .parse_env(
            env_logger::Env::new()
                .filter("LOG_LEVEL")
                .write_style("LOG_STYLE"),
        )
        .try_init()
}

/// Read a whole input document.
fn read_document(path: &str) -> Result<String, CourierError> {
    std::fs::read_to_string(path).map_err(|e| {
        CourierErrorKind::MalformedInput.error_with_msg(format!("Unable to read '{path}': {e}"))
    })
}

/// Replay all delivery events against the schedule.
///
/// Return the number of events that failed.
fn run(app_config: &AppConfig) -> Result<usize, CourierError> {
    let deliveries = Delivery::list_from_string(read_document(app_config.input.schedule_path())?)?;
    let schedule = Schedule::build(deliveries)?;
    let events = DeliveryEvent::list_from_string(read_document(app_config.input.events_path())?)?;
    let map_service = collab::map_service_from_config(app_config);
    let notifier = collab::notifier_from_config(app_config)?;
    let mut controller = DeliveryController::new(schedule, &map_service, &notifier);
    let mut failed = 0;
    for event in &events {
        if let Err(e) = controller.update_delivery(event) {
            log::warn!("Failed to process delivery event for '{}': {e}", event.id());
            failed += 1;
        }
    }
    let deliveries = controller.into_schedule().into_deliveries();
    let arrived = deliveries.iter().filter(|delivery| delivery.arrived()).count();
    let on_time = deliveries.iter().filter(|delivery| delivery.on_time()).count();
    log::info!(
        "Processed {} events after {} µs. Arrived: {arrived}/{}. On time: {on_time}.",
        events.len(),
        courier_client::time::get_timestamp_micros().saturating_sub(app_config.startup_ts_micros()),
        deliveries.len(),
    );
    if log::log_enabled!(log::Level::Debug) {
        log::debug!("Final schedule: {}", Delivery::list_as_string(&deliveries));
    }
    Ok(failed)
}
