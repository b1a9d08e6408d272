//! The observation tensor.

use veld_core::OBS_CHANNELS;

/// A dense `(channels, size, size)` observation tensor of `f32`.
///
/// Channel 0 is the wall channel; kind channels hold occupancy counts.
/// The shape is identical for every agent regardless of its own sight
/// radius, so heterogeneous agents can share one policy network input.
#[derive(Clone, Debug, PartialEq)]
pub struct ObsWindow {
    size: u32,
    data: Vec<f32>,
}

impl ObsWindow {
    /// A zeroed window of the given side length.
    pub(crate) fn zeroed(size: u32) -> Self {
        let side = size as usize;
        Self {
            size,
            data: vec![0.0; OBS_CHANNELS * side * side],
        }
    }

    /// Window side length.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Tensor shape as `(channels, size, size)`.
    pub fn shape(&self) -> (usize, usize, usize) {
        (OBS_CHANNELS, self.size as usize, self.size as usize)
    }

    /// Value at `(channel, x, y)` in window coordinates.
    ///
    /// # Panics
    ///
    /// Panics when an index is out of range; window coordinates are
    /// bounded by [`shape`](ObsWindow::shape).
    pub fn at(&self, channel: usize, x: usize, y: usize) -> f32 {
        let side = self.size as usize;
        assert!(channel < OBS_CHANNELS && x < side && y < side);
        self.data[(channel * side + x) * side + y]
    }

    pub(crate) fn set(&mut self, channel: usize, x: usize, y: usize, value: f32) {
        let side = self.size as usize;
        self.data[(channel * side + x) * side + y] = value;
    }

    /// Fill one whole channel plane with `value`.
    pub(crate) fn fill_channel(&mut self, channel: usize, value: f32) {
        let plane = (self.size as usize) * (self.size as usize);
        self.data[channel * plane..(channel + 1) * plane].fill(value);
    }

    /// Flat channel-major view of the tensor.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}
