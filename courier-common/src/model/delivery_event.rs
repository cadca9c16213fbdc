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

//! Reported delivery.

use crate::model::Location;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// A delivery was made at a point in time and place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryEvent {
    /// Identifies the [crate::model::Delivery] this event is about.
    id: String,
    /// Actual time of delivery.
    time_of_delivery: DateTime<Utc>,
    /// Where the delivery was reported from.
    location: Location,
}

impl DeliveryEvent {
    /// Return a new instance.
    pub fn new(id: &str, time_of_delivery: DateTime<Utc>, location: Location) -> Self {
        Self {
            id: id.to_owned(),
            time_of_delivery,
            location,
        }
    }

    /// Return a list of events from a JSON array.
    pub fn list_from_string<S: AsRef<str>>(value: S) -> Result<Vec<Self>, serde_json::Error> {
        serde_json::from_str(value.as_ref())
    }

    /// Identity of the delivery.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Actual time of delivery.
    pub fn time_of_delivery(&self) -> DateTime<Utc> {
        self.time_of_delivery
    }

    /// Reported location.
    pub fn location(&self) -> &Location {
        &self.location
    }
}
