//! Looping camera orbit animation

use std::time::Duration;
use crate::config::ViewerConfig;

/// Whether the orbit animation is advancing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    #[default]
    Running,
    Paused,
}

impl AnimationState {
    pub fn toggled(self) -> Self {
        match self {
            AnimationState::Running => AnimationState::Paused,
            AnimationState::Paused => AnimationState::Running,
        }
    }
}

/// A linear interpolation between two values over a fixed time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: f32,
    pub to: f32,
    pub duration: Duration,
}

impl Segment {
    pub fn new(from: f32, to: f32, duration: Duration) -> Self {
        Self { from, to, duration }
    }
}

/// Segments played back to back, repeating forever
#[derive(Debug, Clone)]
pub struct LoopingTrack {
    segments: Vec<Segment>,
    cycle: Duration,
    elapsed: Duration,
}

impl LoopingTrack {
    pub fn new(segments: Vec<Segment>) -> Self {
        let cycle = segments.iter().map(|s| s.duration).sum();
        Self {
            segments,
            cycle,
            elapsed: Duration::ZERO,
        }
    }

    /// Position inside the current cycle
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) {
        if self.cycle.is_zero() {
            return;
        }
        let cycle = self.cycle.as_nanos();
        let elapsed = (self.elapsed.as_nanos() + dt.as_nanos()) % cycle;
        // elapsed < cycle, which itself came from a Duration
        self.elapsed = Duration::from_nanos(elapsed as u64);
    }

    pub fn value(&self) -> f32 {
        let mut remaining = self.elapsed;
        for segment in &self.segments {
            if remaining < segment.duration {
                let t = remaining.as_secs_f32() / segment.duration.as_secs_f32();
                return segment.from + (segment.to - segment.from) * t;
            }
            remaining -= segment.duration;
        }
        self.segments.first().map_or(0.0, |s| s.from)
    }
}

/// Camera rotations produced by the animator, in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitAngles {
    pub x_rotation: f32,
    pub y_rotation: f32,
}

/// Drives the camera around the scene
///
/// The horizontal orbit sweeps a full turn while the vertical bob rises and
/// falls between 5 and 45 degrees. Both tracks share one running state, so
/// pausing freezes them together and resuming picks up where they stopped.
#[derive(Debug, Clone)]
pub struct CameraOrbitAnimator {
    orbit: LoopingTrack,
    bob: LoopingTrack,
    state: AnimationState,
}

impl CameraOrbitAnimator {
    pub const BOB_LOW: f32 = 5.0;
    pub const BOB_HIGH: f32 = 45.0;

    pub fn new(orbit_duration: Duration, bob_phase_duration: Duration) -> Self {
        Self {
            orbit: LoopingTrack::new(vec![Segment::new(0.0, 360.0, orbit_duration)]),
            bob: LoopingTrack::new(vec![
                Segment::new(Self::BOB_LOW, Self::BOB_HIGH, bob_phase_duration),
                Segment::new(Self::BOB_HIGH, Self::BOB_LOW, bob_phase_duration),
            ]),
            state: AnimationState::Running,
        }
    }

    pub fn from_config(config: &ViewerConfig) -> Self {
        let mut animator = Self::new(config.orbit_duration, config.bob_phase_duration);
        if config.start_paused {
            animator.pause();
        }
        animator
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimationState::Running
    }

    pub fn toggle(&mut self) {
        self.state = self.state.toggled();
        log::debug!("Camera animation {:?}", self.state);
    }

    pub fn pause(&mut self) {
        self.state = AnimationState::Paused;
    }

    pub fn resume(&mut self) {
        self.state = AnimationState::Running;
    }

    /// Move both tracks forward by `dt`; does nothing while paused
    pub fn advance(&mut self, dt: Duration) {
        if self.state == AnimationState::Paused {
            return;
        }
        self.orbit.advance(dt);
        self.bob.advance(dt);
    }

    pub fn angles(&self) -> OrbitAngles {
        OrbitAngles {
            x_rotation: self.orbit.value(),
            y_rotation: self.bob.value(),
        }
    }
}

impl Default for CameraOrbitAnimator {
    fn default() -> Self {
        Self::from_config(&ViewerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_starts_running_at_origin() {
        let animator = CameraOrbitAnimator::default();
        assert_eq!(animator.state(), AnimationState::Running);
        let angles = animator.angles();
        assert_relative_eq!(angles.x_rotation, 0.0);
        assert_relative_eq!(angles.y_rotation, 5.0);
    }

    #[test]
    fn test_orbit_sweeps_linearly_and_loops() {
        let mut animator = CameraOrbitAnimator::default();
        animator.advance(ms(5_000));
        assert_relative_eq!(animator.angles().x_rotation, 90.0, epsilon = 1e-3);
        animator.advance(ms(15_000));
        assert_relative_eq!(animator.angles().x_rotation, 0.0, epsilon = 1e-3);
        animator.advance(ms(10_000));
        assert_relative_eq!(animator.angles().x_rotation, 180.0, epsilon = 1e-3);
    }

    #[test]
    fn test_bob_rises_then_falls() {
        let mut animator = CameraOrbitAnimator::default();
        animator.advance(ms(4_500));
        assert_relative_eq!(animator.angles().y_rotation, 25.0, epsilon = 1e-3);
        animator.advance(ms(4_500));
        assert_relative_eq!(animator.angles().y_rotation, 45.0, epsilon = 1e-3);
        animator.advance(ms(4_500));
        assert_relative_eq!(animator.angles().y_rotation, 25.0, epsilon = 1e-3);
        animator.advance(ms(4_500));
        assert_relative_eq!(animator.angles().y_rotation, 5.0, epsilon = 1e-3);
    }

    #[test]
    fn test_bob_stays_within_limits() {
        let mut animator = CameraOrbitAnimator::default();
        for _ in 0..2_000 {
            animator.advance(ms(37));
            let y = animator.angles().y_rotation;
            assert!((5.0 - 1e-3..=45.0 + 1e-3).contains(&y), "y_rotation {y}");
        }
    }

    #[test]
    fn test_two_toggles_keep_phase() {
        let mut animator = CameraOrbitAnimator::default();
        animator.advance(ms(3_210));
        let before = animator.angles();
        animator.toggle();
        assert_eq!(animator.state(), AnimationState::Paused);
        animator.toggle();
        assert_eq!(animator.state(), AnimationState::Running);
        assert_eq!(animator.angles(), before);
    }

    #[test]
    fn test_paused_time_is_not_accumulated() {
        let mut animator = CameraOrbitAnimator::default();
        animator.advance(ms(1_000));
        let before = animator.angles();

        animator.toggle();
        animator.advance(ms(7_000));
        assert_eq!(animator.angles(), before);

        animator.toggle();
        animator.advance(ms(1_000));
        let mut reference = CameraOrbitAnimator::default();
        reference.advance(ms(2_000));
        assert_relative_eq!(animator.angles().x_rotation, reference.angles().x_rotation);
        assert_relative_eq!(animator.angles().y_rotation, reference.angles().y_rotation);
    }

    #[test]
    fn test_start_paused_from_config() {
        let config = ViewerConfig {
            start_paused: true,
            ..ViewerConfig::default()
        };
        let mut animator = CameraOrbitAnimator::from_config(&config);
        assert!(!animator.is_running());
        animator.advance(ms(500));
        assert_relative_eq!(animator.angles().x_rotation, 0.0);
        animator.resume();
        assert!(animator.is_running());
    }

    #[test]
    fn test_empty_track_is_inert() {
        let mut track = LoopingTrack::new(Vec::new());
        track.advance(ms(100));
        assert_eq!(track.elapsed(), Duration::ZERO);
        assert_eq!(track.value(), 0.0);
    }
}
