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

//! Outbound customer notifications.

use crate::model::CourierError;
use crate::model::Delivery;

/// Subject of the feedback request message.
pub const FEEDBACK_SUBJECT: &str = "Your feedback is important to us";
/// Subject of the ETA update message.
pub const ETA_UPDATE_SUBJECT: &str = "Your delivery will arrive soon";

/// Outbound customer notifications.
///
/// Both operations are fire-and-forget. Only a returned error is observed by
/// the caller.
pub trait Notifier: Send + Sync {
    /// Ask the customer of a completed delivery for feedback.
    fn request_feedback(&self, delivery: &Delivery) -> Result<(), CourierError>;

    /// Tell the customer of an upcoming delivery when to expect it.
    fn send_eta_update(&self, delivery: &Delivery, eta_minutes: u32) -> Result<(), CourierError>;
}

/// Body of the feedback request message for `delivery`.
pub fn feedback_message(delivery: &Delivery) -> String {
    format!(
        r#"Regarding your delivery today at {}. How likely would you be to recommend this delivery service to a friend? Click <a href="url">here</a>"#,
        delivery.time_of_delivery()
    )
}

/// Body of the ETA update message for `delivery`.
pub fn eta_update_message(delivery: &Delivery, eta_minutes: u32) -> String {
    format!(
        "Your delivery to {} is next, estimated time of arrival is in {eta_minutes} minutes. Be ready!",
        delivery.location()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use chrono::TimeZone;
    use chrono::Utc;

    #[test]
    fn message_templates() {
        let delivery = Delivery::new(
            "7",
            "barney@example.com",
            Location::new(52.5, 13.25),
            Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap(),
        );
        assert_eq!(
            feedback_message(&delivery),
            r#"Regarding your delivery today at 2025-03-01 10:15:00 UTC. How likely would you be to recommend this delivery service to a friend? Click <a href="url">here</a>"#
        );
        assert_eq!(
            eta_update_message(&delivery, 42),
            "Your delivery to (52.5, 13.25) is next, estimated time of arrival is in 42 minutes. Be ready!"
        );
    }
}
