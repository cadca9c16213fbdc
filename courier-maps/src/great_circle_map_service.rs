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

//! Great-circle implementation of [MapService].

mod lane_speed;

use self::lane_speed::LaneSpeed;
use chrono::TimeDelta;
use courier_common::collab::MapService;
use courier_common::model::CourierError;
use courier_common::model::CourierErrorKind;
use courier_common::model::Location;
use crossbeam_skiplist::SkipMap;
use std::sync::Arc;

/** Great-circle implementation of [MapService].

Distances use the haversine formula. Travel speed starts out at a configured
average and is refined by each recorded sample, both globally and for the
ordered pair of locations ("lane") the sample was recorded for. ETAs prefer
the lane speed when one is known.
*/
pub struct GreatCircleMapService {
    average_speed: LaneSpeed,
    lane_speeds: SkipMap<String, LaneSpeed>,
}

impl GreatCircleMapService {
    /// Mean Earth radius in kilometres.
    const EARTH_RADIUS_KM: f64 = 6371.0;
    const MILLIS_PER_HOUR: f64 = 3_600_000.0;

    /// Return a new instance with an initial average speed in km/h.
    pub fn new(average_speed_kmh: f64) -> Arc<Self> {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Using great-circle map service starting at {average_speed_kmh} km/h.");
        }
        Arc::new(Self {
            average_speed: LaneSpeed::new(average_speed_kmh),
            lane_speeds: SkipMap::default(),
        })
    }

    /// Current average speed in km/h over all lanes.
    pub fn average_speed(&self) -> f64 {
        self.average_speed.get()
    }

    /// Learned speed in km/h from `from` to `to`, if any sample was recorded.
    pub fn lane_speed(&self, from: &Location, to: &Location) -> Option<f64> {
        self.lane_speeds
            .get(&Self::lane_key(from, to))
            .map(|entry| entry.value().get())
    }

    fn lane_key(from: &Location, to: &Location) -> String {
        format!(
            "{},{}->{},{}",
            from.latitude(),
            from.longitude(),
            to.latitude(),
            to.longitude()
        )
    }
}

impl MapService for GreatCircleMapService {
    fn distance(&self, from: &Location, to: &Location) -> f64 {
        let lat_from = from.latitude().to_radians();
        let lat_to = to.latitude().to_radians();
        let delta_lat = lat_to - lat_from;
        let delta_lon = (to.longitude() - from.longitude()).to_radians();
        let a = (delta_lat / 2.0).sin().powi(2)
            + lat_from.cos() * lat_to.cos() * (delta_lon / 2.0).sin().powi(2);
        2.0 * Self::EARTH_RADIUS_KM * a.sqrt().asin()
    }

    fn calculate_eta(&self, from: &Location, to: &Location) -> Result<u32, CourierError> {
        let speed = self
            .lane_speed(from, to)
            .unwrap_or_else(|| self.average_speed());
        if !speed.is_finite() || speed <= 0.0 {
            Err(CourierErrorKind::CollaboratorFailure.error_with_msg(format!(
                "Unable to estimate arrival from {from} to {to} at {speed} km/h."
            )))?;
        }
        // Saturating cast truncates to whole minutes.
        Ok((self.distance(from, to) / speed * 60.0) as u32)
    }

    fn update_average_speed(
        &self,
        from: &Location,
        to: &Location,
        elapsed: TimeDelta,
    ) -> Result<(), CourierError> {
        let elapsed_millis = elapsed.num_milliseconds();
        if elapsed_millis <= 0 {
            log::debug!("Ignoring speed sample from {from} to {to} with elapsed time {elapsed}.");
            return Ok(());
        }
        let distance = self.distance(from, to);
        if distance <= 0.0 {
            log::debug!("Ignoring speed sample from {from} to {to} without travelled distance.");
            return Ok(());
        }
        let sample = distance / (elapsed_millis as f64 / Self::MILLIS_PER_HOUR);
        let initial = self.average_speed();
        let lane_speed = self
            .lane_speeds
            .get_or_insert_with(Self::lane_key(from, to), || LaneSpeed::new(initial))
            .value()
            .blend(sample);
        let average_speed = self.average_speed.blend(sample);
        log::debug!(
            "Speed sample {sample:.1} km/h from {from} to {to}. Lane: {lane_speed:.1} km/h. Average: {average_speed:.1} km/h."
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    fn warsaw() -> Location {
        Location::new(52.2296756, 21.0122287)
    }

    fn poznan() -> Location {
        Location::new(52.406374, 16.9251681)
    }

    #[test]
    fn distance_between_cities() {
        let maps = GreatCircleMapService::new(50.0);
        let distance = maps.distance(&warsaw(), &poznan());
        assert!((distance - 278.546).abs() / 278.546 < 1e-2, "{distance}");
        assert_eq!(maps.distance(&warsaw(), &warsaw()), 0.0);
    }

    #[test]
    fn eta_at_default_speed() -> Result<(), CourierError> {
        let maps = GreatCircleMapService::new(50.0);
        let expected = (maps.distance(&warsaw(), &poznan()) / 50.0 * 60.0) as u32;
        assert_eq!(maps.calculate_eta(&warsaw(), &poznan())?, expected);
        assert_eq!(maps.calculate_eta(&warsaw(), &warsaw())?, 0);
        Ok(())
    }

    #[test]
    fn faster_sample_shortens_eta() -> Result<(), CourierError> {
        init_logger();
        let maps = GreatCircleMapService::new(50.0);
        let before = maps.calculate_eta(&warsaw(), &poznan())?;
        maps.update_average_speed(&warsaw(), &poznan(), TimeDelta::hours(2))?;
        let sample = maps.distance(&warsaw(), &poznan()) / 2.0;
        let blended = (50.0 + sample) / 2.0;
        assert!((maps.average_speed() - blended).abs() < 1e-9);
        let lane = maps.lane_speed(&warsaw(), &poznan());
        assert!(lane.is_some_and(|kmh| (kmh - blended).abs() < 1e-9));
        // Lanes are ordered pairs
        assert!(maps.lane_speed(&poznan(), &warsaw()).is_none());
        assert!(maps.calculate_eta(&warsaw(), &poznan())? < before);
        Ok(())
    }

    #[test]
    fn non_positive_elapsed_is_ignored() -> Result<(), CourierError> {
        init_logger();
        let maps = GreatCircleMapService::new(50.0);
        for elapsed in [TimeDelta::zero(), TimeDelta::minutes(-5)] {
            maps.update_average_speed(&warsaw(), &poznan(), elapsed)?;
        }
        assert_eq!(maps.average_speed(), 50.0);
        assert!(maps.lane_speed(&warsaw(), &poznan()).is_none());
        Ok(())
    }

    #[test]
    fn zero_distance_is_ignored() -> Result<(), CourierError> {
        init_logger();
        let maps = GreatCircleMapService::new(50.0);
        maps.update_average_speed(&warsaw(), &warsaw(), TimeDelta::minutes(30))?;
        assert_eq!(maps.average_speed(), 50.0);
        assert!(maps.lane_speed(&warsaw(), &warsaw()).is_none());
        let expected = (maps.distance(&warsaw(), &poznan()) / 50.0 * 60.0) as u32;
        assert_eq!(maps.calculate_eta(&warsaw(), &poznan())?, expected);
        Ok(())
    }

    #[test]
    fn zero_speed_fails_eta() {
        let maps = GreatCircleMapService::new(0.0);
        let e = maps.calculate_eta(&warsaw(), &poznan()).unwrap_err();
        assert_eq!(e.kind(), &CourierErrorKind::CollaboratorFailure);
    }
}
