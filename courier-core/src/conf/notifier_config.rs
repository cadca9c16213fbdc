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

//! Parsing of configuration for customer notifications.

use config::ConfigBuilder;
use config::ConfigError;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;

/// Configuration for customer notifications.
#[derive(Deserialize, Serialize)]
pub struct NotifierConfig {
    /// Message transport implementation
    implementation: String,
    /// HTTP mail API URL
    endpoint: String,
    /// HTTP mail API bearer token
    apikey: String,
    /// Sender address
    sender: String,
    /// HTTP mail API request timeout in seconds
    timeout: u64,
}

impl std::fmt::Debug for NotifierConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifierConfig")
            .field("implementation", &self.implementation)
            .field("endpoint", &self.endpoint)
            .field("apikey", &"*redacted*")
            .field("sender", &self.sender)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl AppConfigDefaults for NotifierConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError> {
        config_builder
            .set_default(prefix.to_string() + "." + "implementation", "log")?
            .set_default(prefix.to_string() + "." + "endpoint", "")?
            .set_default(prefix.to_string() + "." + "apikey", "")?
            .set_default(prefix.to_string() + "." + "sender", "deliveries@localhost")?
            .set_default(prefix.to_string() + "." + "timeout", 10_i64)
    }
}

impl NotifierConfig {
    /// Message transport implementation variant. `log` or `http`.
    pub fn implementation(&self) -> &str {
        &self.implementation
    }

    /// HTTP mail API URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// HTTP mail API bearer token. Empty when no authorization is used.
    pub fn api_key(&self) -> &str {
        &self.apikey
    }

    /// Sender address
    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// HTTP mail API request timeout in seconds
    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }
}
