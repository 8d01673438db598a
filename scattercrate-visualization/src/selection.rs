//! Periodic forwarding of the pointer position for picking

use std::time::Duration;

/// Last pointer position over the render surface, in physical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

impl PointerPosition {
    /// Position that matches nothing and clears the selection
    pub const INVALID: PointerPosition = PointerPosition { x: -1.0, y: -1.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn is_valid(&self) -> bool {
        self.x >= 0.0 && self.y >= 0.0
    }
}

impl Default for PointerPosition {
    fn default() -> Self {
        Self::INVALID
    }
}

/// Receiver of selection queries, usually the render scene
pub trait SelectionSink {
    fn set_selection_query_position(&mut self, position: PointerPosition);
}

/// Publishes the pointer position to a [`SelectionSink`] at a fixed cadence
///
/// A query goes out on every tick even when the pointer has not moved, and
/// pointer moves between ticks are collapsed into the latest one.
#[derive(Debug, Clone)]
pub struct SelectionPoller {
    interval: Duration,
    since_last_tick: Duration,
}

impl SelectionPoller {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            since_last_tick: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Account for `dt` of elapsed time, publishing one query per whole tick
    ///
    /// Returns the number of queries published.
    pub fn advance<S>(&mut self, dt: Duration, position: PointerPosition, sink: &mut S) -> u32
    where
        S: SelectionSink + ?Sized,
    {
        self.since_last_tick += dt;
        let mut ticks = 0;
        while self.since_last_tick >= self.interval {
            self.since_last_tick -= self.interval;
            sink.set_selection_query_position(position);
            ticks += 1;
        }
        ticks
    }
}

impl Default for SelectionPoller {
    fn default() -> Self {
        Self::new(Duration::from_millis(10))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        queries: Vec<PointerPosition>,
    }

    impl SelectionSink for RecordingSink {
        fn set_selection_query_position(&mut self, position: PointerPosition) {
            self.queries.push(position);
        }
    }

    #[test]
    fn test_one_query_per_interval() {
        let mut poller = SelectionPoller::default();
        let mut sink = RecordingSink::default();
        let position = PointerPosition::new(10.0, 20.0);

        assert_eq!(poller.advance(Duration::from_millis(35), position, &mut sink), 3);
        assert_eq!(sink.queries.len(), 3);
        // Remainder of 5 ms carries over
        assert_eq!(poller.advance(Duration::from_millis(5), position, &mut sink), 1);
        assert_eq!(sink.queries.len(), 4);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut poller = SelectionPoller::default();
        let mut sink = RecordingSink::default();
        for _ in 0..9 {
            poller.advance(Duration::from_millis(1), PointerPosition::INVALID, &mut sink);
        }
        assert!(sink.queries.is_empty());
        poller.advance(Duration::from_millis(1), PointerPosition::INVALID, &mut sink);
        assert_eq!(sink.queries.len(), 1);
    }

    #[test]
    fn test_last_position_wins() {
        let mut poller = SelectionPoller::default();
        let mut sink = RecordingSink::default();
        // Many pointer moves inside one tick only surface the last one
        let mut latest = PointerPosition::INVALID;
        for i in 0..50 {
            latest = PointerPosition::new(i as f32, i as f32);
            poller.advance(Duration::from_micros(100), latest, &mut sink);
        }
        poller.advance(Duration::from_millis(5), latest, &mut sink);
        assert_eq!(sink.queries, vec![PointerPosition::new(49.0, 49.0)]);
    }

    #[test]
    fn test_publishes_without_movement() {
        let mut poller = SelectionPoller::default();
        let mut sink = RecordingSink::default();
        let still = PointerPosition::new(3.0, 4.0);
        for _ in 0..4 {
            poller.advance(Duration::from_millis(10), still, &mut sink);
        }
        assert_eq!(sink.queries, vec![still; 4]);
    }

    #[test]
    fn test_zero_interval_is_raised() {
        let poller = SelectionPoller::new(Duration::ZERO);
        assert_eq!(poller.interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_invalid_position() {
        assert!(!PointerPosition::INVALID.is_valid());
        assert!(!PointerPosition::default().is_valid());
        assert!(PointerPosition::new(0.0, 0.0).is_valid());
    }
}
