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

//! Position in a [Schedule] with access to its neighbors.

use super::Schedule;
use courier_common::model::Delivery;

/// Position in a [Schedule] with access to its neighbors.
#[derive(Clone, Copy)]
pub struct ScheduleEntry<'a> {
    schedule: &'a Schedule,
    position: usize,
}

impl<'a> ScheduleEntry<'a> {
    pub(super) fn new(schedule: &'a Schedule, position: usize) -> Self {
        Self { schedule, position }
    }

    /// Zero based position in dispatch order.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The delivery at this position.
    pub fn delivery(&self) -> &'a Delivery {
        self.schedule.delivery_at(self.position)
    }

    /// The previous stop. `None` for the first entry.
    pub fn predecessor(&self) -> Option<ScheduleEntry<'a>> {
        self.position
            .checked_sub(1)
            .map(|position| Self::new(self.schedule, position))
    }

    /// The next stop. `None` for the last entry.
    pub fn successor(&self) -> Option<ScheduleEntry<'a>> {
        self.schedule.entry(self.position + 1)
    }
}

impl std::fmt::Debug for ScheduleEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleEntry")
            .field("position", &self.position)
            .field("delivery", self.delivery())
            .finish()
    }
}
