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

//! [Notifier] that sends templated messages through an [EmailGateway].

use courier_common::collab::ETA_UPDATE_SUBJECT;
use courier_common::collab::EmailGateway;
use courier_common::collab::FEEDBACK_SUBJECT;
use courier_common::collab::Notifier;
use courier_common::collab::eta_update_message;
use courier_common::collab::feedback_message;
use courier_common::model::CourierError;
use courier_common::model::Delivery;
use std::sync::Arc;

/// [Notifier] that sends templated messages through an [EmailGateway] to the
/// delivery's contact address.
pub struct MailNotifier {
    email_gateway: Arc<dyn EmailGateway>,
}

impl MailNotifier {
    /// Return a new instance.
    pub fn new(email_gateway: &Arc<dyn EmailGateway>) -> Self {
        Self {
            email_gateway: Arc::clone(email_gateway),
        }
    }
}

impl Notifier for MailNotifier {
    fn request_feedback(&self, delivery: &Delivery) -> Result<(), CourierError> {
        self.email_gateway.send(
            delivery.contact_email(),
            FEEDBACK_SUBJECT,
            &feedback_message(delivery),
        )
    }

    fn send_eta_update(&self, delivery: &Delivery, eta_minutes: u32) -> Result<(), CourierError> {
        self.email_gateway.send(
            delivery.contact_email(),
            ETA_UPDATE_SUBJECT,
            &eta_update_message(delivery, eta_minutes),
        )
    }
}
