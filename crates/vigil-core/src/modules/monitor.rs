//! Drowsiness/distraction monitoring module.
//!
//! Per-tick state machine over landmark-derived features: blink
//! debounce (a short eye closure is a blink, a long one is drowsiness)
//! and alert throttling (at most one alert per cooldown window).

use std::time::Duration;

use tracing::debug;

use crate::domain::{indices, AlertKind, FocusState, LandmarkSet};
use crate::geometry;

/// Configuration for the distraction monitor.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Eye aspect ratio below which the eyes count as closed.
    pub closure_threshold: f32,
    /// Yaw deviation above which the head counts as turned away.
    pub side_view_threshold: f32,
    /// Maximum eye-closure duration still treated as a blink.
    pub blink_duration: Duration,
    /// Minimum time between consecutive alerts.
    pub alert_cooldown: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            closure_threshold: 0.15,
            side_view_threshold: 0.6,
            blink_duration: Duration::from_millis(300),
            alert_cooldown: Duration::from_millis(3000),
        }
    }
}

/// Features extracted from one landmark frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameFeatures {
    /// Eye aspect ratio averaged over both eyes.
    pub eye_ratio: f32,
    /// Head yaw deviation.
    pub yaw_deviation: f32,
}

impl FrameFeatures {
    /// Extracts features from a landmark set.
    ///
    /// Returns `None` when required points are missing or the geometry
    /// is degenerate; the caller treats that as a skipped tick rather
    /// than an error.
    #[must_use]
    pub fn from_landmarks(landmarks: &LandmarkSet) -> Option<Self> {
        let left = geometry::eye_aspect_ratio(landmarks.eye_points(indices::LEFT_EYE)?)?;
        let right = geometry::eye_aspect_ratio(landmarks.eye_points(indices::RIGHT_EYE)?)?;
        let yaw_deviation = geometry::yaw_deviation(
            landmarks.point(indices::NOSE_TOP)?,
            landmarks.point(indices::NOSE_BOTTOM)?,
            landmarks.point(indices::LEFT_CHEEK)?,
            landmarks.point(indices::RIGHT_CHEEK)?,
        )?;
        Some(Self {
            eye_ratio: (left + right) / 2.0,
            yaw_deviation,
        })
    }
}

/// Outcome of one monitor tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    /// State after the tick.
    pub state: FocusState,
    /// Alert fired on this tick, if any.
    pub alert: Option<AlertKind>,
}

/// Explicit per-session monitor state, owned by the caller.
///
/// All timing comes from the `now` arguments to [`Self::tick`], which
/// callers must feed monotonically non-decreasing; the monitor keeps
/// no clock of its own.
#[derive(Debug)]
pub struct DistractionMonitor {
    config: MonitorConfig,
    state: FocusState,
    eyes_closed: bool,
    last_blink: Option<Duration>,
    last_alert: Option<Duration>,
}

impl DistractionMonitor {
    /// Creates a monitor in the `Focused` state.
    #[must_use]
    pub const fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            state: FocusState::Focused,
            eyes_closed: false,
            last_blink: None,
            last_alert: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> FocusState {
        self.state
    }

    /// Advances the machine by one landmark tick.
    ///
    /// A sideways look (`yaw_deviation` above the side-view threshold)
    /// forces `Distracted`, overriding `Drowsy`. Alerts fire at most
    /// once per cooldown window.
    pub fn tick(&mut self, features: FrameFeatures, now: Duration) -> TickOutcome {
        self.state = if features.eye_ratio < self.config.closure_threshold {
            if self.eyes_closed {
                let closed_for = now.saturating_sub(self.last_blink.unwrap_or(now));
                if closed_for > self.config.blink_duration {
                    FocusState::Drowsy
                } else {
                    FocusState::EyesClosing
                }
            } else {
                // Might be an ordinary blink: start the debounce window.
                self.eyes_closed = true;
                self.last_blink = Some(now);
                FocusState::EyesClosing
            }
        } else {
            self.eyes_closed = false;
            FocusState::Focused
        };

        if features.yaw_deviation > self.config.side_view_threshold {
            self.state = FocusState::Distracted;
        }

        let alert = if self.state.is_alert_worthy() {
            self.try_alert(now)
        } else {
            None
        };

        debug!(
            "tick at {}ms: eye_ratio={:.3}, yaw={:.3}, state={:?}, alert={alert:?}",
            now.as_millis(),
            features.eye_ratio,
            features.yaw_deviation,
            self.state
        );

        TickOutcome {
            state: self.state,
            alert,
        }
    }

    /// Fires an alert for the current state unless still cooling down.
    fn try_alert(&mut self, now: Duration) -> Option<AlertKind> {
        if let Some(last) = self.last_alert {
            if now.saturating_sub(last) <= self.config.alert_cooldown {
                return None;
            }
        }
        self.last_alert = Some(now);
        match self.state {
            FocusState::Distracted => Some(AlertKind::Distracted),
            _ => Some(AlertKind::Drowsy),
        }
    }
}

impl Default for DistractionMonitor {
    fn default() -> Self {
        Self::new(MonitorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPEN: f32 = 0.3;
    const CLOSED: f32 = 0.05;
    const FORWARD: f32 = 0.1;
    const SIDEWAYS: f32 = 0.8;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn features(eye_ratio: f32, yaw_deviation: f32) -> FrameFeatures {
        FrameFeatures {
            eye_ratio,
            yaw_deviation,
        }
    }

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert!((config.closure_threshold - 0.15).abs() < f32::EPSILON);
        assert!((config.side_view_threshold - 0.6).abs() < f32::EPSILON);
        assert_eq!(config.blink_duration, ms(300));
        assert_eq!(config.alert_cooldown, ms(3000));
    }

    #[test]
    fn test_starts_focused() {
        let monitor = DistractionMonitor::default();
        assert_eq!(monitor.state(), FocusState::Focused);
    }

    #[test]
    fn test_open_eyes_forward_stays_focused() {
        let mut monitor = DistractionMonitor::default();
        let outcome = monitor.tick(features(OPEN, FORWARD), ms(0));
        assert_eq!(outcome.state, FocusState::Focused);
        assert!(outcome.alert.is_none());
    }

    #[test]
    fn test_blink_never_reaches_drowsy() {
        // Eyes close and reopen within the blink window.
        let mut monitor = DistractionMonitor::default();

        let closing = monitor.tick(features(CLOSED, FORWARD), ms(0));
        assert_eq!(closing.state, FocusState::EyesClosing);
        assert!(closing.alert.is_none());

        let still_closed = monitor.tick(features(CLOSED, FORWARD), ms(200));
        assert_eq!(still_closed.state, FocusState::EyesClosing);
        assert!(still_closed.alert.is_none());

        let reopened = monitor.tick(features(OPEN, FORWARD), ms(250));
        assert_eq!(reopened.state, FocusState::Focused);
        assert!(reopened.alert.is_none());
    }

    #[test]
    fn test_sustained_closure_becomes_drowsy() {
        let mut monitor = DistractionMonitor::default();

        monitor.tick(features(CLOSED, FORWARD), ms(0));
        let outcome = monitor.tick(features(CLOSED, FORWARD), ms(400));

        assert_eq!(outcome.state, FocusState::Drowsy);
        assert_eq!(outcome.alert, Some(AlertKind::Drowsy));
    }

    #[test]
    fn test_closure_at_exact_blink_duration_is_still_a_blink() {
        let mut monitor = DistractionMonitor::default();

        monitor.tick(features(CLOSED, FORWARD), ms(0));
        let outcome = monitor.tick(features(CLOSED, FORWARD), ms(300));
        assert_eq!(outcome.state, FocusState::EyesClosing);
    }

    #[test]
    fn test_sideways_look_forces_distracted() {
        let mut monitor = DistractionMonitor::default();
        let outcome = monitor.tick(features(OPEN, SIDEWAYS), ms(0));

        assert_eq!(outcome.state, FocusState::Distracted);
        assert_eq!(outcome.alert, Some(AlertKind::Distracted));
    }

    #[test]
    fn test_sideways_overrides_drowsy() {
        let mut monitor = DistractionMonitor::default();

        monitor.tick(features(CLOSED, FORWARD), ms(0));
        let outcome = monitor.tick(features(CLOSED, SIDEWAYS), ms(400));

        assert_eq!(outcome.state, FocusState::Distracted);
        assert_eq!(outcome.alert, Some(AlertKind::Distracted));
    }

    #[test]
    fn test_alert_debounce_within_cooldown() {
        // Two alert-worthy ticks inside one cooldown window fire
        // exactly one alert.
        let mut monitor = DistractionMonitor::default();

        let first = monitor.tick(features(OPEN, SIDEWAYS), ms(0));
        let second = monitor.tick(features(OPEN, SIDEWAYS), ms(1000));

        assert_eq!(first.alert, Some(AlertKind::Distracted));
        assert!(second.alert.is_none());
    }

    #[test]
    fn test_alert_fires_again_after_cooldown() {
        let mut monitor = DistractionMonitor::default();

        let first = monitor.tick(features(OPEN, SIDEWAYS), ms(0));
        let second = monitor.tick(features(OPEN, SIDEWAYS), ms(3100));

        assert_eq!(first.alert, Some(AlertKind::Distracted));
        assert_eq!(second.alert, Some(AlertKind::Distracted));
    }

    #[test]
    fn test_recovery_clears_drowsy() {
        let mut monitor = DistractionMonitor::default();

        monitor.tick(features(CLOSED, FORWARD), ms(0));
        monitor.tick(features(CLOSED, FORWARD), ms(400));
        assert_eq!(monitor.state(), FocusState::Drowsy);

        let outcome = monitor.tick(features(OPEN, FORWARD), ms(500));
        assert_eq!(outcome.state, FocusState::Focused);
    }

    #[test]
    fn test_new_closure_after_recovery_restarts_blink_window() {
        let mut monitor = DistractionMonitor::default();

        monitor.tick(features(CLOSED, FORWARD), ms(0));
        monitor.tick(features(OPEN, FORWARD), ms(100));

        // Second closure starts its own window; elapsed time since the
        // first closure must not count.
        let outcome = monitor.tick(features(CLOSED, FORWARD), ms(1000));
        assert_eq!(outcome.state, FocusState::EyesClosing);
    }

    #[test]
    fn test_features_from_complete_landmarks() {
        use crate::domain::{Point3, MESH_LANDMARK_COUNT};

        let mut points = vec![Point3::default(); MESH_LANDMARK_COUNT];
        for (slot, eye) in [indices::LEFT_EYE, indices::RIGHT_EYE].iter().enumerate() {
            let offset = slot as f32 * 0.5;
            points[eye[0]] = Point3::new(offset, 0.0, 0.0);
            points[eye[1]] = Point3::new(offset + 0.1, 0.2, 0.0);
            points[eye[2]] = Point3::new(offset + 0.3, 0.2, 0.0);
            points[eye[3]] = Point3::new(offset + 0.4, 0.0, 0.0);
            points[eye[4]] = Point3::new(offset + 0.3, 0.0, 0.0);
            points[eye[5]] = Point3::new(offset + 0.1, 0.0, 0.0);
        }
        points[indices::NOSE_TOP] = Point3::new(0.5, 0.3, 0.0);
        points[indices::NOSE_BOTTOM] = Point3::new(0.6, 0.3, 0.0);
        points[indices::LEFT_CHEEK] = Point3::new(0.2, 0.5, 0.0);
        points[indices::RIGHT_CHEEK] = Point3::new(0.8, 0.5, 0.0);

        let set = LandmarkSet::new(points);
        let features = FrameFeatures::from_landmarks(&set).expect("features");

        // Each eye: (0.2 + 0.2) / (2 * 0.4) = 0.5; nose and cheek
        // vectors are parallel.
        assert!((features.eye_ratio - 0.5).abs() < 1e-5);
        assert!(features.yaw_deviation.abs() < 1e-5);
    }

    #[test]
    fn test_features_skip_on_degenerate_landmarks() {
        use crate::domain::{Point3, MESH_LANDMARK_COUNT};

        // Every point at the origin: zero-length eye spans.
        let set = LandmarkSet::new(vec![Point3::default(); MESH_LANDMARK_COUNT]);
        assert!(FrameFeatures::from_landmarks(&set).is_none());
    }

    #[test]
    fn test_features_skip_on_short_set() {
        let set = LandmarkSet::default();
        assert!(FrameFeatures::from_landmarks(&set).is_none());
    }
}
