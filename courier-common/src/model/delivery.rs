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

//! Scheduled delivery.

use crate::model::Location;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// One stop of a delivery schedule.
///
/// `arrived` and `on_time` only ever transition from `false` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    id: String,
    contact_email: String,
    location: Location,
    /// Scheduled time until the delivery is reported, then the actual time.
    time_of_delivery: DateTime<Utc>,
    #[serde(default)]
    arrived: bool,
    #[serde(default)]
    on_time: bool,
}

impl Delivery {
    /// Return a new instance that has not arrived yet.
    pub fn new(
        id: &str,
        contact_email: &str,
        location: Location,
        time_of_delivery: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.to_owned(),
            contact_email: contact_email.to_owned(),
            location,
            time_of_delivery,
            arrived: false,
            on_time: false,
        }
    }

    /// Return a list of deliveries from a JSON array.
    pub fn list_from_string<S: AsRef<str>>(value: S) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(value.as_ref())
    }

    /// Return a list of deliveries as a JSON array.
    pub fn list_as_string(deliveries: &[Self]) -> String {
        serde_json::to_string(deliveries)
            .map_err(|e| log::warn!("Failed to serialize deliveries: {e}"))
            .unwrap_or_default()
    }

    /// Unique identity within a schedule.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Where notifications about this delivery are sent.
    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    /// Destination.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Scheduled time, or actual time once the delivery has been reported.
    pub fn time_of_delivery(&self) -> DateTime<Utc> {
        self.time_of_delivery
    }

    /// Overwrite the recorded time of delivery.
    pub fn set_time_of_delivery(&mut self, time_of_delivery: DateTime<Utc>) {
        self.time_of_delivery = time_of_delivery;
    }

    /// `true` once a matching delivery event has been processed.
    pub fn arrived(&self) -> bool {
        self.arrived
    }

    /// Mark as arrived. Can't be undone.
    pub fn mark_arrived(&mut self) {
        self.arrived = true;
    }

    /// `true` once the delivery has been proven to be on time.
    pub fn on_time(&self) -> bool {
        self.on_time
    }

    /// Mark as on time. Can't be undone.
    pub fn mark_on_time(&mut self) {
        self.on_time = true;
    }
}
