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

//! Delivery tracking errors.

use std::error::Error;
use std::fmt;

/// Cause of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourierErrorKind {
    /// General failure. See message for details.
    Unspecified,
    /// A delivery event referenced an identity that is not in the schedule.
    NotFound,
    /// A schedule can't be built without any deliveries.
    EmptySchedule,
    /// A map service, notifier or message transport call failed.
    CollaboratorFailure,
    /// Input document or value could not be used. E.g. unparsable JSON or a
    /// delivery that is on time without having arrived.
    MalformedInput,
}

impl CourierErrorKind {
    /// Create a new instance with an error message.
    pub fn error_with_msg<S: AsRef<str>>(self, msg: S) -> CourierError {
        CourierError {
            kind: self,
            msg: Some(msg.as_ref().to_string()),
        }
    }

    /// Create a new instance without an error message.
    pub fn error(self) -> CourierError {
        CourierError {
            kind: self,
            msg: None,
        }
    }
}

impl fmt::Display for CourierErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/** Delivery tracking error.

Create a new instance via [CourierErrorKind].
*/
#[derive(Debug)]
pub struct CourierError {
    kind: CourierErrorKind,
    msg: Option<String>,
}

impl CourierError {
    /// Return the type of error.
    pub fn kind(&self) -> &CourierErrorKind {
        &self.kind
    }
}

impl fmt::Display for CourierError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{} {}", self.kind, msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl AsRef<CourierError> for CourierError {
    fn as_ref(&self) -> &CourierError {
        self
    }
}

impl Error for CourierError {}

impl From<serde_json::Error> for CourierError {
    fn from(e: serde_json::Error) -> Self {
        CourierErrorKind::MalformedInput.error_with_msg(e.to_string())
    }
}
