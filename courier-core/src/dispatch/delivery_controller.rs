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

//! Processing of reported deliveries.

use super::Schedule;
use crate::util::LogScopeDuration;
use chrono::TimeDelta;
use courier_common::collab::MapService;
use courier_common::collab::Notifier;
use courier_common::model::CourierError;
use courier_common::model::DeliveryEvent;
use std::sync::Arc;

/** Owns a [Schedule] and reacts to reported deliveries.

The controller is the only thing that changes the state of a delivery and the
only thing that triggers notifications and speed recalculation. Events are
processed one at a time through `&mut self`.
*/
pub struct DeliveryController {
    schedule: Schedule,
    map_service: Arc<dyn MapService>,
    notifier: Arc<dyn Notifier>,
}

impl DeliveryController {
    /// Deliveries arriving less than this many minutes after the recorded
    /// time are on time.
    pub const ON_TIME_TOLERANCE_MINUTES: i64 = 10;

    /// Return a new instance.
    pub fn new(
        schedule: Schedule,
        map_service: &Arc<dyn MapService>,
        notifier: &Arc<dyn Notifier>,
    ) -> Self {
        Self {
            schedule,
            map_service: Arc::clone(map_service),
            notifier: Arc::clone(notifier),
        }
    }

    /// The tracked schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Stop tracking and hand back the schedule.
    pub fn into_schedule(self) -> Schedule {
        self.schedule
    }

    /** Apply a reported delivery to the schedule.

    1. Mark the delivery as arrived and on time if it arrived less than
       [Self::ON_TIME_TOLERANCE_MINUTES] after the previously recorded time.
    2. Record the actual time of delivery.
    3. Ask the customer for feedback.
    4. If the delivery was late and there was a previous stop, record the
       travel time from the previous stop with the map service.
    5. If there is a next stop, send that customer an ETA from where the event
       was reported.

    An unknown delivery identity fails before anything is changed. Failing
    collaborators are propagated, but the delivery keeps its updated state.
    */
    pub fn update_delivery(&mut self, event: &DeliveryEvent) -> Result<(), CourierError> {
        let _timer = LogScopeDuration::new(
            log::Level::Trace,
            module_path!(),
            "update_delivery",
            std::time::Duration::ZERO,
        );
        let entry = self.schedule.find(event.id())?;
        let position = entry.position();
        let predecessor_position = entry.predecessor().map(|entry| entry.position());
        let successor_position = entry.successor().map(|entry| entry.position());
        let delivery = self.schedule.delivery_at_mut(position);
        delivery.mark_arrived();
        // Compare with the recorded time before it is overwritten
        let time_difference = event.time_of_delivery() - delivery.time_of_delivery();
        if time_difference < TimeDelta::minutes(Self::ON_TIME_TOLERANCE_MINUTES) {
            delivery.mark_on_time();
        }
        delivery.set_time_of_delivery(event.time_of_delivery());
        log::debug!(
            "Delivery '{}' arrived {} minutes from recorded time. on_time: {}",
            delivery.id(),
            time_difference.num_minutes(),
            delivery.on_time()
        );
        let delivery = self.schedule.delivery_at(position);
        self.notifier.request_feedback(delivery)?;
        if !delivery.on_time() {
            if let Some(previous) = predecessor_position.map(|p| self.schedule.delivery_at(p)) {
                let elapsed = delivery.time_of_delivery() - previous.time_of_delivery();
                self.map_service.update_average_speed(
                    previous.location(),
                    delivery.location(),
                    elapsed,
                )?;
            }
        }
        if let Some(next_delivery) = successor_position.map(|p| self.schedule.delivery_at(p)) {
            let eta = self
                .map_service
                .calculate_eta(event.location(), next_delivery.location())?;
            log::debug!("Next delivery '{}' ETA is {eta} minutes.", next_delivery.id());
            self.notifier.send_eta_update(next_delivery, eta)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;
    use courier_common::model::CourierErrorKind;
    use courier_common::model::Delivery;
    use courier_common::model::Location;
    use std::sync::Mutex;

    pub fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Feedback(String),
        EtaUpdate(String, u32),
        Eta(Location, Location),
        AverageSpeed(Location, Location, TimeDelta),
    }

    /// Records every collaborator call in order.
    #[derive(Default)]
    struct Recorder {
        calls: Mutex<Vec<Call>>,
        fail_feedback: bool,
    }

    impl Recorder {
        const ETA_MINUTES: u32 = 17;

        fn failing_feedback() -> Self {
            Self {
                fail_feedback: true,
                ..Self::default()
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Notifier for Recorder {
        fn request_feedback(&self, delivery: &Delivery) -> Result<(), CourierError> {
            if self.fail_feedback {
                return Err(CourierErrorKind::CollaboratorFailure.error_with_msg("offline"));
            }
            self.record(Call::Feedback(delivery.id().to_owned()));
            Ok(())
        }

        fn send_eta_update(
            &self,
            delivery: &Delivery,
            eta_minutes: u32,
        ) -> Result<(), CourierError> {
            self.record(Call::EtaUpdate(delivery.id().to_owned(), eta_minutes));
            Ok(())
        }
    }

    impl MapService for Recorder {
        fn distance(&self, _from: &Location, _to: &Location) -> f64 {
            0.0
        }

        fn calculate_eta(&self, from: &Location, to: &Location) -> Result<u32, CourierError> {
            self.record(Call::Eta(*from, *to));
            Ok(Self::ETA_MINUTES)
        }

        fn update_average_speed(
            &self,
            from: &Location,
            to: &Location,
            elapsed: TimeDelta,
        ) -> Result<(), CourierError> {
            self.record(Call::AverageSpeed(*from, *to, elapsed));
            Ok(())
        }
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
    }

    fn location(n: u8) -> Location {
        Location::new(52.0 + f64::from(n) / 10.0, 21.0 - f64::from(n) / 10.0)
    }

    /// Deliveries `1..=count` one hour apart at `location(n)`.
    fn controller(count: u8, recorder: &Arc<Recorder>) -> DeliveryController {
        let deliveries = (1..=count)
            .map(|n| {
                Delivery::new(
                    &n.to_string(),
                    &format!("customer{n}@example.com"),
                    location(n),
                    t0() + TimeDelta::hours(i64::from(n) - 1),
                )
            })
            .collect();
        let map_service: Arc<dyn MapService> = recorder.clone();
        let notifier: Arc<dyn Notifier> = recorder.clone();
        DeliveryController::new(Schedule::build(deliveries).unwrap(), &map_service, &notifier)
    }

    #[test]
    fn single_delivery_on_time() -> Result<(), CourierError> {
        init_logger();
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(1, &recorder);
        controller.update_delivery(&DeliveryEvent::new("1", t0(), location(1)))?;
        let delivery = controller.schedule().delivery("1")?;
        assert!(delivery.arrived());
        assert!(delivery.on_time());
        assert_eq!(recorder.calls(), [Call::Feedback("1".to_owned())]);
        Ok(())
    }

    #[test]
    fn late_middle_delivery() -> Result<(), CourierError> {
        init_logger();
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(3, &recorder);
        let arrival = t0() + TimeDelta::hours(2);
        controller.update_delivery(&DeliveryEvent::new("2", arrival, location(2)))?;
        let delivery = controller.schedule().delivery("2")?;
        assert!(delivery.arrived());
        assert!(!delivery.on_time());
        assert_eq!(delivery.time_of_delivery(), arrival);
        assert_eq!(
            recorder.calls(),
            [
                Call::Feedback("2".to_owned()),
                Call::AverageSpeed(location(1), location(2), TimeDelta::hours(2)),
                Call::Eta(location(2), location(3)),
                Call::EtaUpdate("3".to_owned(), Recorder::ETA_MINUTES),
            ]
        );
        // Neighbors are untouched
        assert!(!controller.schedule().delivery("1")?.arrived());
        assert!(!controller.schedule().delivery("3")?.arrived());
        Ok(())
    }

    #[test]
    fn unknown_delivery_changes_nothing() {
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(3, &recorder);
        let before = controller.schedule().iter().cloned().collect::<Vec<_>>();
        let e = controller
            .update_delivery(&DeliveryEvent::new("4", t0(), location(4)))
            .unwrap_err();
        assert_eq!(e.kind(), &CourierErrorKind::NotFound);
        assert!(recorder.calls().is_empty());
        assert_eq!(controller.into_schedule().into_deliveries(), before);
    }

    #[test]
    fn on_time_boundary() -> Result<(), CourierError> {
        for (offset, expected) in [
            (TimeDelta::minutes(-30), true),
            (TimeDelta::zero(), true),
            (TimeDelta::minutes(10) - TimeDelta::seconds(1), true),
            (TimeDelta::minutes(10), false),
            (TimeDelta::minutes(11), false),
        ] {
            let recorder = Arc::new(Recorder::default());
            let mut controller = controller(1, &recorder);
            controller.update_delivery(&DeliveryEvent::new("1", t0() + offset, location(1)))?;
            let delivery = controller.schedule().delivery("1")?;
            assert!(delivery.arrived());
            assert_eq!(delivery.on_time(), expected, "offset {offset}");
        }
        Ok(())
    }

    #[test]
    fn on_time_delivery_keeps_average_speed() -> Result<(), CourierError> {
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(3, &recorder);
        let arrival = t0() + TimeDelta::hours(1) + TimeDelta::minutes(5);
        controller.update_delivery(&DeliveryEvent::new("2", arrival, location(9)))?;
        assert_eq!(
            recorder.calls(),
            [
                Call::Feedback("2".to_owned()),
                // ETA is estimated from where the event was reported
                Call::Eta(location(9), location(3)),
                Call::EtaUpdate("3".to_owned(), Recorder::ETA_MINUTES),
            ]
        );
        Ok(())
    }

    #[test]
    fn late_first_delivery_has_no_previous_leg() -> Result<(), CourierError> {
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(2, &recorder);
        controller.update_delivery(&DeliveryEvent::new(
            "1",
            t0() + TimeDelta::hours(1),
            location(1),
        ))?;
        assert!(!controller.schedule().delivery("1")?.on_time());
        assert_eq!(
            recorder.calls(),
            [
                Call::Feedback("1".to_owned()),
                Call::Eta(location(1), location(2)),
                Call::EtaUpdate("2".to_owned(), Recorder::ETA_MINUTES),
            ]
        );
        Ok(())
    }

    #[test]
    fn late_last_delivery_uses_reported_previous_time() -> Result<(), CourierError> {
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(2, &recorder);
        // First stop was reported 30 minutes late
        controller.update_delivery(&DeliveryEvent::new(
            "1",
            t0() + TimeDelta::minutes(30),
            location(1),
        ))?;
        controller.update_delivery(&DeliveryEvent::new(
            "2",
            t0() + TimeDelta::hours(2),
            location(2),
        ))?;
        let calls = recorder.calls();
        assert_eq!(
            calls.last(),
            Some(&Call::AverageSpeed(
                location(1),
                location(2),
                TimeDelta::minutes(90)
            ))
        );
        assert_eq!(
            calls
                .iter()
                .filter(|call| matches!(call, Call::EtaUpdate(..)))
                .count(),
            1
        );
        Ok(())
    }

    #[test]
    fn status_survives_failing_notifier() {
        let recorder = Arc::new(Recorder::failing_feedback());
        let mut controller = controller(2, &recorder);
        let arrival = t0() + TimeDelta::minutes(3);
        let e = controller
            .update_delivery(&DeliveryEvent::new("1", arrival, location(1)))
            .unwrap_err();
        assert_eq!(e.kind(), &CourierErrorKind::CollaboratorFailure);
        let delivery = controller.schedule().delivery("1").unwrap();
        assert!(delivery.arrived());
        assert!(delivery.on_time());
        assert_eq!(delivery.time_of_delivery(), arrival);
        // Nothing after the failing call happened
        assert!(recorder.calls().is_empty());
    }

    #[test]
    fn repeated_event_keeps_flags() -> Result<(), CourierError> {
        let recorder = Arc::new(Recorder::default());
        let mut controller = controller(1, &recorder);
        controller.update_delivery(&DeliveryEvent::new("1", t0(), location(1)))?;
        // Much later than the now recorded time, but flags never reset
        controller.update_delivery(&DeliveryEvent::new(
            "1",
            t0() + TimeDelta::hours(3),
            location(1),
        ))?;
        let delivery = controller.schedule().delivery("1")?;
        assert!(delivery.arrived());
        assert!(delivery.on_time());
        assert_eq!(
            recorder.calls(),
            [Call::Feedback("1".to_owned()), Call::Feedback("1".to_owned())]
        );
        Ok(())
    }
}
