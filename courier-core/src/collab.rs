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

//! Collaborator implementations and their setup from configuration.

mod log_email_gateway;
mod mail_notifier;

pub use self::log_email_gateway::LogEmailGateway;
pub use self::mail_notifier::MailNotifier;
use crate::conf::AppConfig;
use courier_client::HttpEmailGateway;
use courier_common::collab::EmailGateway;
use courier_common::collab::MapService;
use courier_common::collab::Notifier;
use courier_common::model::CourierError;
use courier_common::model::CourierErrorKind;
use courier_maps::GreatCircleMapService;
use std::sync::Arc;

/// Return the configured [MapService].
pub fn map_service_from_config(app_config: &AppConfig) -> Arc<dyn MapService> {
    GreatCircleMapService::new(app_config.maps.average_speed_kmh())
}

/// Return the configured [Notifier].
pub fn notifier_from_config(app_config: &AppConfig) -> Result<Arc<dyn Notifier>, CourierError> {
    let email_gateway: Arc<dyn EmailGateway> = match app_config.notifier.implementation() {
        "http" => {
            if app_config.notifier.endpoint().is_empty() {
                Err(CourierErrorKind::MalformedInput
                    .error_with_msg("The 'http' notifier requires an endpoint."))?;
            }
            Arc::new(HttpEmailGateway::new(
                app_config.notifier.endpoint(),
                app_config.notifier.api_key(),
                app_config.notifier.sender(),
                app_config.app_name_lowercase(),
                app_config.app_version(),
                app_config.notifier.timeout_secs(),
            )?)
        }
        "log" => Arc::new(LogEmailGateway),
        unknown => Err(CourierErrorKind::MalformedInput
            .error_with_msg(format!("Unknown notifier implementation '{unknown}'.")))?,
    };
    log::info!(
        "Notifications will be sent using the '{}' gateway.",
        app_config.notifier.implementation()
    );
    Ok(Arc::new(MailNotifier::new(&email_gateway)))
}
