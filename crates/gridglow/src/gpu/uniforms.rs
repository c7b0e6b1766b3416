use bytemuck::{Pod, Zeroable};

use crate::types::{SurfaceSize, TRAIL_MAX};
use crate::uniforms::UniformBuffer;

/// std140 image of `TrailBlock` in the fragment shader. Each slot is padded
/// to a `vec4` because uniform arrays use a 16-byte stride.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct GpuTrailBlock {
    pub resolution: [f32; 4],
    pub points: [[f32; 4]; TRAIL_MAX],
}

unsafe impl Zeroable for GpuTrailBlock {}
unsafe impl Pod for GpuTrailBlock {}

impl GpuTrailBlock {
    pub fn new(size: SurfaceSize) -> Self {
        let mut block = Self::zeroed();
        block.set_resolution(size);
        block
    }

    pub fn set_resolution(&mut self, size: SurfaceSize) {
        self.resolution[0] = size.width as f32;
        self.resolution[1] = size.height as f32;
    }

    pub fn load(&mut self, uniforms: &UniformBuffer) {
        for (slot, [x, y, influence]) in self.points.iter_mut().zip(uniforms.slots()) {
            *slot = [x, y, influence, 0.0];
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::trail::Trail;

    #[test]
    fn block_size_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<GpuTrailBlock>(), 16 + TRAIL_MAX * 16);
    }

    #[test]
    fn load_pads_each_slot() {
        let now = Instant::now();
        let mut trail = Trail::new();
        trail.record(12.0, 34.0, now);
        let mut uniforms = UniformBuffer::new();
        uniforms.rebuild(&trail, now);

        let mut block = GpuTrailBlock::new(SurfaceSize::new(800, 600));
        block.points[1] = [9.0; 4];
        block.load(&uniforms);

        assert_eq!(block.resolution, [800.0, 600.0, 0.0, 0.0]);
        assert_eq!(block.points[0], [12.0, 34.0, 1.0, 0.0]);
        assert_eq!(block.points[1], [0.0; 4]);
    }
}
