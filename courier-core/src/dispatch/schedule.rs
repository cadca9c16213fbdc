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

//! Ordered delivery schedule.

mod schedule_entry;

pub use self::schedule_entry::ScheduleEntry;
use courier_common::model::CourierError;
use courier_common::model::CourierErrorKind;
use courier_common::model::Delivery;

/** Deliveries in dispatch order.

Entries live in a single owned vector and neighbors are addressed by
position, so the order is fixed once built. Only the fields of each
[Delivery] can change afterwards.
*/
#[derive(Debug, Clone)]
pub struct Schedule {
    deliveries: Vec<Delivery>,
}

impl Schedule {
    /// Return a new instance where the first delivery is the earliest stop.
    ///
    /// A delivery that is on time must also have arrived.
    pub fn build(deliveries: Vec<Delivery>) -> Result<Self, CourierError> {
        if deliveries.is_empty() {
            Err(CourierErrorKind::EmptySchedule
                .error_with_msg("A schedule requires at least one delivery."))?;
        }
        if let Some(delivery) = deliveries.iter().find(|d| d.on_time() && !d.arrived()) {
            Err(CourierErrorKind::MalformedInput.error_with_msg(format!(
                "Delivery '{}' can't be on time before it has arrived.",
                delivery.id()
            )))?;
        }
        if log::log_enabled!(log::Level::Debug) {
            log::debug!("Built schedule with {} deliveries.", deliveries.len());
        }
        Ok(Self { deliveries })
    }

    /// Number of deliveries. Never zero.
    pub fn len(&self) -> usize {
        self.deliveries.len()
    }

    /// Always `false`, since an empty schedule can't be built.
    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }

    /// The earliest stop.
    pub fn head(&self) -> ScheduleEntry<'_> {
        ScheduleEntry::new(self, 0)
    }

    /// Entry at `position` in dispatch order.
    pub fn entry(&self, position: usize) -> Option<ScheduleEntry<'_>> {
        (position < self.deliveries.len()).then(|| ScheduleEntry::new(self, position))
    }

    /// Walk from the head along successors and return the first entry with a
    /// matching delivery identity.
    pub fn find(&self, id: &str) -> Result<ScheduleEntry<'_>, CourierError> {
        let mut current = Some(self.head());
        while let Some(entry) = current {
            if entry.delivery().id() == id {
                return Ok(entry);
            }
            current = entry.successor();
        }
        Err(CourierErrorKind::NotFound
            .error_with_msg(format!("No delivery with id '{id}' in the schedule.")))
    }

    /// Delivery with a matching identity.
    pub fn delivery(&self, id: &str) -> Result<&Delivery, CourierError> {
        self.find(id).map(|entry| entry.delivery())
    }

    /// Deliveries in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter()
    }

    /// Hand back the deliveries in dispatch order.
    pub fn into_deliveries(self) -> Vec<Delivery> {
        self.deliveries
    }

    pub(crate) fn delivery_at(&self, position: usize) -> &Delivery {
        &self.deliveries[position]
    }

    pub(crate) fn delivery_at_mut(&mut self, position: usize) -> &mut Delivery {
        &mut self.deliveries[position]
    }
}
