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

//! [EmailGateway] that only logs messages.

use courier_common::collab::EmailGateway;
use courier_common::model::CourierError;

/// [EmailGateway] that writes each message to the log instead of sending it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEmailGateway;

impl EmailGateway for LogEmailGateway {
    fn send(&self, address: &str, subject: &str, message: &str) -> Result<(), CourierError> {
        log::info!("To: '{address}' Subject: '{subject}' Message: '{message}'");
        Ok(())
    }
}
