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

//! Utility for measuring duration of a scope.

use std::time::Duration;
use std::time::Instant;

/// Log how long a scope took when the returned value is dropped.
///
/// Nothing is measured unless `level` is enabled for `target`.
pub struct LogScopeDuration<'a> {
    level: log::Level,
    target: &'a str,
    scope_name: &'a str,
    started: Instant,
    min_to_log: Duration,
}

impl<'a> LogScopeDuration<'a> {
    /// Return a new instance.
    ///
    /// You can retrieve the module path of the caller using the `module_path!()` macro.
    pub fn new(
        level: log::Level,
        target: &'a str,
        scope_name: &'a str,
        min_to_log: Duration,
    ) -> Option<Self> {
        log::log_enabled!(target: target, level).then(|| Self {
            level,
            target,
            scope_name,
            started: Instant::now(),
            min_to_log,
        })
    }

    /// Time since this instance was created.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for LogScopeDuration<'_> {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        if elapsed >= self.min_to_log {
            log::log!(target: self.target, self.level, "'{}' took {} µs.", self.scope_name, elapsed.as_micros());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Initialize logging.
    pub fn init_logger() {
        let _ = env_logger::builder()
            .is_test(true)
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    #[test]
    fn test_scoped_timer() {
        init_logger();
        let timer = LogScopeDuration::new(
            log::Level::Debug,
            module_path!(),
            "test_scoped_timer",
            Duration::ZERO,
        );
        assert!(timer.is_some());
        let filtered = LogScopeDuration::new(
            log::Level::Trace,
            module_path!(),
            "filtered by log level",
            Duration::ZERO,
        );
        assert!(filtered.is_none());
    }
}
