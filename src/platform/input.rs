//! Pointer and quit tracking between frames

use glam::Vec2;
use winit::dpi::{PhysicalPosition, PhysicalSize};

use crate::canvas_size;
use crate::sim::TickInput;

/// Latest input seen by the window, sampled once per frame
#[derive(Debug, Clone)]
pub struct InputState {
    /// Last cursor position in physical pixels
    cursor: Option<PhysicalPosition<f64>>,
    /// Drawable size in physical pixels
    surface: PhysicalSize<u32>,
    quit: bool,
}

impl InputState {
    pub fn new(surface: PhysicalSize<u32>) -> Self {
        Self {
            cursor: None,
            surface,
            quit: false,
        }
    }

    pub fn pointer_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) {
        self.surface = size;
    }

    pub fn close_requested(&mut self) {
        self.quit = true;
    }

    /// Cursor mapped from window pixels into canvas units.
    ///
    /// Positions outside the window map outside the canvas; movement handles
    /// them like any other target.
    pub fn pointer(&self) -> Option<Vec2> {
        let cursor = self.cursor?;
        let surface = Vec2::new(
            self.surface.width.max(1) as f32,
            self.surface.height.max(1) as f32,
        );
        let pixel = Vec2::new(cursor.x as f32, cursor.y as f32);
        Some(pixel / surface * canvas_size())
    }

    /// Snapshot for the next simulation tick
    pub fn poll(&self) -> TickInput {
        TickInput {
            pointer: self.pointer(),
            quit: self.quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_pointer_until_moved() {
        let input = InputState::new(PhysicalSize::new(800, 600));
        let polled = input.poll();
        assert!(polled.pointer.is_none());
        assert!(!polled.quit);
    }

    #[test]
    fn test_pointer_maps_to_canvas() {
        // HiDPI window: 1600x1200 physical pixels for the 800x600 canvas
        let mut input = InputState::new(PhysicalSize::new(1600, 1200));
        input.pointer_moved(PhysicalPosition::new(800.0, 300.0));
        assert_eq!(input.pointer(), Some(Vec2::new(400.0, 150.0)));

        input.resized(PhysicalSize::new(800, 600));
        assert_eq!(input.pointer(), Some(Vec2::new(800.0, 300.0)));
    }

    #[test]
    fn test_pointer_outside_window_passes_through() {
        let mut input = InputState::new(PhysicalSize::new(800, 600));
        input.pointer_moved(PhysicalPosition::new(-20.0, 900.0));
        assert_eq!(input.pointer(), Some(Vec2::new(-20.0, 900.0)));
    }

    #[test]
    fn test_close_sets_quit() {
        let mut input = InputState::new(PhysicalSize::new(800, 600));
        input.close_requested();
        assert!(input.poll().quit);
    }
}
