use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::types::{TRAIL_DURATION, TRAIL_MAX, TRAIL_MIN_DIST};

/// A recorded pointer sample in surface pixels (`y` up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPoint {
    pub x: f32,
    pub y: f32,
    pub t: Instant,
}

impl TrailPoint {
    pub fn new(x: f32, y: f32, t: Instant) -> Self {
        Self { x, y, t }
    }

    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.t)
    }

    fn distance_squared(&self, x: f32, y: f32) -> f32 {
        let dx = self.x - x;
        let dy = self.y - y;
        dx * dx + dy * dy
    }
}

/// Recency-ordered pointer history. Index 0 is the newest sample and
/// timestamps never increase towards the tail.
#[derive(Debug, Clone, Default)]
pub struct Trail {
    points: VecDeque<TrailPoint>,
}

impl Trail {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(TRAIL_MAX + 1),
        }
    }

    /// Records a sample unless it lies within [`TRAIL_MIN_DIST`] of the most
    /// recent one. Only the head is compared; returns whether it was kept.
    pub fn record(&mut self, x: f32, y: f32, now: Instant) -> bool {
        if let Some(head) = self.points.front() {
            if head.distance_squared(x, y) < TRAIL_MIN_DIST * TRAIL_MIN_DIST {
                return false;
            }
        }

        self.points.push_front(TrailPoint::new(x, y, now));
        self.points.truncate(TRAIL_MAX);
        true
    }

    /// Drops every sample whose age has reached [`TRAIL_DURATION`], walking
    /// from the oldest end. Returns the number removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let mut removed = 0;
        while let Some(tail) = self.points.back() {
            if tail.age(now) < TRAIL_DURATION {
                break;
            }
            self.points.pop_back();
            removed += 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn newest(&self) -> Option<&TrailPoint> {
        self.points.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailPoint> {
        self.points.iter()
    }
}
