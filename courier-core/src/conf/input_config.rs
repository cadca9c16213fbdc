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

//! Parsing of configuration for input documents.

use config::ConfigBuilder;
use config::ConfigError;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;

/// Location of the schedule and delivery event documents.
#[derive(Debug, Deserialize, Serialize)]
pub struct InputConfig {
    /// Path of JSON array of deliveries in dispatch order.
    schedule: String,
    /// Path of JSON array of delivery events in reported order.
    events: String,
}

impl AppConfigDefaults for InputConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError> {
        config_builder
            .set_default(prefix.to_string() + "." + "schedule", "schedule.json")?
            .set_default(prefix.to_string() + "." + "events", "events.json")
    }
}

impl InputConfig {
    /// Path of the schedule document.
    pub fn schedule_path(&self) -> &str {
        &self.schedule
    }

    /// Path of the delivery event document.
    pub fn events_path(&self) -> &str {
        &self.events
    }
}
