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

//! Atomic blended speed.

use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;

/** Blended speed in km/h.

The `f64` is stored as its bit pattern in a single [AtomicU64], so a sample
can be blended in without holding a lock.
*/
pub struct LaneSpeed {
    bits: AtomicU64,
}

impl LaneSpeed {
    /// Return a new instance starting at `kmh`.
    pub fn new(kmh: f64) -> Self {
        Self {
            bits: AtomicU64::new(kmh.to_bits()),
        }
    }

    /// Current speed in km/h.
    pub fn get(&self) -> f64 {
        f64::from_bits(self.bits.load(Ordering::Relaxed))
    }

    /// Blend a new sample with equal weight to the current speed and return
    /// the result.
    pub fn blend(&self, sample_kmh: f64) -> f64 {
        let previous = self
            .bits
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |bits| {
                Some(((f64::from_bits(bits) + sample_kmh) / 2.0).to_bits())
            })
            .unwrap_or_else(|bits| bits);
        (f64::from_bits(previous) + sample_kmh) / 2.0
    }
}
