//! Window extraction from the occupancy grid.

use crate::error::WindowError;
use crate::window::ObsWindow;
use veld_core::{GridPos, Kind, WALL_CHANNEL};
use veld_grid::OccupancyGrid;

/// Extracts fixed-size observation windows centered on agents.
///
/// The builder is configured once with the shared maximum window size
/// `W` (odd, identical for all agents). Extraction:
///
/// 1. Prefill the wall channel with 1.0, kind channels with 0.0.
/// 2. Copy the occupancy counts for the rectangle
///    `[x-o, x+o] x [y-o, y+o]` (`o = (W-1)/2`) clipped to the grid;
///    visible cells overwrite the wall channel with 0.0. Cells beyond
///    the grid edge keep their prefill — that is how boundary presence
///    is encoded.
/// 3. If the agent's own range is smaller than `W`, zero a symmetric
///    border band of width `(W - range) / 2` on every channel. The
///    tensor shape never shrinks.
#[derive(Clone, Copy, Debug)]
pub struct WindowBuilder {
    max_window: u32,
}

impl WindowBuilder {
    /// Create a builder for the shared maximum window size.
    pub fn new(max_window: u32) -> Result<Self, WindowError> {
        if max_window == 0 || max_window % 2 == 0 {
            return Err(WindowError::EvenWindow { size: max_window });
        }
        Ok(Self { max_window })
    }

    /// The shared maximum window size.
    pub fn max_window(&self) -> u32 {
        self.max_window
    }

    /// Extract the window centered on `center`, masked to
    /// `observation_range`. Read-only over the grid.
    pub fn build(
        &self,
        grid: &OccupancyGrid,
        center: GridPos,
        observation_range: u32,
    ) -> Result<ObsWindow, WindowError> {
        let size = self.max_window;
        if observation_range > size {
            return Err(WindowError::RangeExceedsWindow {
                range: observation_range,
                max: size,
            });
        }

        let mut window = ObsWindow::zeroed(size);
        window.fill_channel(WALL_CHANNEL, 1.0);

        let offset = (size as i32 - 1) / 2;
        for wx in 0..size as usize {
            for wy in 0..size as usize {
                let cell = GridPos::new(
                    center.x - offset + wx as i32,
                    center.y - offset + wy as i32,
                );
                if !cell.in_bounds(grid.width(), grid.height()) {
                    continue;
                }
                window.set(WALL_CHANNEL, wx, wy, 0.0);
                for kind in Kind::ALL {
                    window.set(kind.channel(), wx, wy, grid.count(kind, cell) as f32);
                }
            }
        }

        let mask = ((size - observation_range) / 2) as usize;
        if mask > 0 {
            self.mask_border(&mut window, mask);
        }
        Ok(window)
    }

    /// Zero a symmetric border band of width `mask` on every channel.
    fn mask_border(&self, window: &mut ObsWindow, mask: usize) {
        let side = self.max_window as usize;
        for channel in 0..veld_core::OBS_CHANNELS {
            for j in 0..mask {
                for i in 0..side {
                    window.set(channel, j, i, 0.0);
                    window.set(channel, side - 1 - j, i, 0.0);
                    window.set(channel, i, j, 0.0);
                    window.set(channel, i, side - 1 - j, 0.0);
                }
            }
        }
    }
}
