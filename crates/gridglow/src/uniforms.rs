use std::time::Instant;

use crate::trail::{Trail, TrailPoint};
use crate::types::{SLOT_STRIDE, TRAIL_DURATION, TRAIL_MAX};

/// Linear time decay: 1.0 when just recorded, 0.0 once the age reaches
/// [`TRAIL_DURATION`].
pub fn influence(point: &TrailPoint, now: Instant) -> f32 {
    let age = point.age(now).as_secs_f32();
    (1.0 - age / TRAIL_DURATION.as_secs_f32()).max(0.0)
}

/// Flat `(x, y, influence)` array uploaded to the fragment stage each frame.
///
/// The length never changes; slots past the live trail are zero, which the
/// shader reads as "no contribution".
#[derive(Debug, Clone, PartialEq)]
pub struct UniformBuffer {
    data: [f32; TRAIL_MAX * SLOT_STRIDE],
}

impl Default for UniformBuffer {
    fn default() -> Self {
        Self {
            data: [0.0; TRAIL_MAX * SLOT_STRIDE],
        }
    }
}

impl UniformBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewrites every slot from the trail, zeroing the unused tail.
    pub fn rebuild(&mut self, trail: &Trail, now: Instant) {
        let mut filled = 0;
        for (slot, point) in self.data.chunks_exact_mut(SLOT_STRIDE).zip(trail.iter()) {
            slot[0] = point.x;
            slot[1] = point.y;
            slot[2] = influence(point, now);
            filled += 1;
        }
        self.data[filled * SLOT_STRIDE..].fill(0.0);
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// `(x, y, influence)` for slot `index`.
    pub fn slot(&self, index: usize) -> Option<[f32; 3]> {
        self.data
            .chunks_exact(SLOT_STRIDE)
            .nth(index)
            .map(|slot| [slot[0], slot[1], slot[2]])
    }

    pub fn slots(&self) -> impl Iterator<Item = [f32; 3]> + '_ {
        self.data
            .chunks_exact(SLOT_STRIDE)
            .map(|slot| [slot[0], slot[1], slot[2]])
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn influence_decays_linearly_to_zero() {
        let base = Instant::now();
        let point = TrailPoint::new(0.0, 0.0, base);
        assert_eq!(influence(&point, base), 1.0);
        assert!((influence(&point, base + Duration::from_millis(250)) - 0.5).abs() < 1e-6);
        assert_eq!(influence(&point, base + TRAIL_DURATION), 0.0);
        assert_eq!(influence(&point, base + Duration::from_secs(3)), 0.0);
    }

    #[test]
    fn influence_is_non_increasing_with_age() {
        let base = Instant::now();
        let point = TrailPoint::new(0.0, 0.0, base);
        let mut last = f32::INFINITY;
        for ms in (0..=600).step_by(25) {
            let value = influence(&point, base + Duration::from_millis(ms));
            assert!(value <= last);
            last = value;
        }
    }

    #[test]
    fn buffer_length_is_fixed() {
        let buffer = UniformBuffer::new();
        assert_eq!(buffer.as_slice().len(), TRAIL_MAX * SLOT_STRIDE);
        assert_eq!(buffer.slots().count(), TRAIL_MAX);
    }

    #[test]
    fn rebuild_writes_points_in_recency_order() {
        let base = Instant::now();
        let mut trail = Trail::new();
        trail.record(0.0, 0.0, base);
        trail.record(20.0, 5.0, base + Duration::from_millis(100));

        let mut buffer = UniformBuffer::new();
        buffer.rebuild(&trail, base + Duration::from_millis(100));

        assert_eq!(buffer.slot(0), Some([20.0, 5.0, 1.0]));
        let oldest = buffer.slot(1).expect("slot");
        assert_eq!(&oldest[..2], &[0.0, 0.0]);
        assert!((oldest[2] - 0.8).abs() < 1e-5);
        assert_eq!(buffer.slot(2), Some([0.0, 0.0, 0.0]));
    }

    #[test]
    fn rebuild_zeroes_slots_left_by_a_longer_trail() {
        let base = Instant::now();
        let mut long = Trail::new();
        for step in 0..10 {
            long.record(step as f32 * 20.0 + 1.0, 7.0, base);
        }
        let mut buffer = UniformBuffer::new();
        buffer.rebuild(&long, base);
        assert!(buffer.slots().take(10).all(|slot| slot[2] > 0.0));

        let mut short = Trail::new();
        short.record(3.0, 4.0, base);
        buffer.rebuild(&short, base);

        assert_eq!(buffer.slot(0), Some([3.0, 4.0, 1.0]));
        assert!(buffer.as_slice()[SLOT_STRIDE..].iter().all(|value| *value == 0.0));
    }
}
