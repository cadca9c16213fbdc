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

//! Geographic distance, ETA and travel speed estimation.

use crate::model::CourierError;
use crate::model::Location;
use chrono::TimeDelta;

/// Geographic distance, ETA and travel speed estimation.
pub trait MapService: Send + Sync {
    /// Distance in kilometres between two locations.
    fn distance(&self, from: &Location, to: &Location) -> f64;

    /// Estimated travel time in whole minutes from `from` to `to` given the
    /// current average speed state.
    fn calculate_eta(&self, from: &Location, to: &Location) -> Result<u32, CourierError>;

    /// Record that travelling from `from` to `to` took `elapsed`.
    ///
    /// The sample is blended into the average speed and affects subsequent
    /// [Self::calculate_eta] calls. Samples that can't yield a speed, like a
    /// non-positive `elapsed`, are ignored.
    fn update_average_speed(
        &self,
        from: &Location,
        to: &Location,
        elapsed: TimeDelta,
    ) -> Result<(), CourierError>;
}
