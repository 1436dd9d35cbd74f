use crate::core::framebuffer::FrameBuffer;
use crate::error::Result;
use crate::ui::input::Command;
use std::collections::VecDeque;

/// Where finished frames go and where user commands come from.
pub trait DisplaySurface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Stores one packed 0xAARRGGBB pixel. Out-of-bounds writes are ignored.
    fn set_pixel(&mut self, x: usize, y: usize, packed: u32);

    /// Makes everything written since the last call visible.
    fn present(&mut self) -> Result<()>;

    /// Next pending command, or `None` when the queue is drained.
    fn poll_command(&mut self) -> Option<Command>;

    /// Copies a whole frame onto the surface.
    fn blit(&mut self, framebuffer: &FrameBuffer) {
        let width = self.width().min(framebuffer.width);
        let height = self.height().min(framebuffer.height);
        for y in 0..height {
            for x in 0..width {
                if let Some(packed) = framebuffer.packed_pixel(x, y) {
                    self.set_pixel(x, y, packed);
                }
            }
        }
    }
}

/// Headless surface backed by a pixel vector.
///
/// Commands come from a script. Once it runs out the surface goes idle for one
/// presented frame and then reports [`Command::Quit`], so a run loop on top of it
/// draws the effect of the last command and terminates.
pub struct ImageSurface {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
    script: VecDeque<Command>,
    presented: usize,
    idle_since: Option<usize>,
}

impl ImageSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
            script: VecDeque::new(),
            presented: 0,
            idle_since: None,
        }
    }

    pub fn with_script<I: IntoIterator<Item = Command>>(mut self, commands: I) -> Self {
        self.script.extend(commands);
        self
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// Number of completed `present` calls.
    pub fn presented(&self) -> usize {
        self.presented
    }
}

impl DisplaySurface for ImageSurface {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn set_pixel(&mut self, x: usize, y: usize, packed: u32) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = packed;
        }
    }

    fn present(&mut self) -> Result<()> {
        self.presented += 1;
        Ok(())
    }

    fn poll_command(&mut self) -> Option<Command> {
        if let Some(command) = self.script.pop_front() {
            return Some(command);
        }
        match self.idle_since {
            Some(presented) if self.presented > presented => Some(Command::Quit),
            Some(_) => None,
            None => {
                self.idle_since = Some(self.presented);
                None
            }
        }
    }
}

#[cfg(feature = "window")]
pub use window::WindowSurface;

#[cfg(feature = "window")]
mod window {
    use super::DisplaySurface;
    use crate::error::{RenderError, Result};
    use crate::ui::input::{Command, command_for_key};
    use minifb::{KeyRepeat, Window, WindowOptions};
    use std::collections::VecDeque;

    /// On-screen surface backed by a `minifb` window.
    pub struct WindowSurface {
        window: Window,
        buffer: Vec<u32>,
        width: usize,
        height: usize,
        pending: VecDeque<Command>,
    }

    impl WindowSurface {
        pub fn new(title: &str, width: usize, height: usize) -> Result<Self> {
            let mut window = Window::new(
                title,
                width,
                height,
                WindowOptions {
                    resize: false,
                    ..WindowOptions::default()
                },
            )
            .map_err(|e| RenderError::Display(e.to_string()))?;
            window.set_target_fps(60);

            Ok(Self {
                window,
                buffer: vec![0; width * height],
                width,
                height,
                pending: VecDeque::new(),
            })
        }
    }

    impl DisplaySurface for WindowSurface {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn set_pixel(&mut self, x: usize, y: usize, packed: u32) {
            if x < self.width && y < self.height {
                self.buffer[y * self.width + x] = packed;
            }
        }

        fn present(&mut self) -> Result<()> {
            self.window
                .update_with_buffer(&self.buffer, self.width, self.height)
                .map_err(|e| RenderError::Display(e.to_string()))?;

            if !self.window.is_open() {
                self.pending.push_back(Command::Quit);
            }
            self.pending.extend(
                self.window
                    .get_keys_pressed(KeyRepeat::Yes)
                    .into_iter()
                    .filter_map(command_for_key),
            );
            Ok(())
        }

        fn poll_command(&mut self) -> Option<Command> {
            self.pending.pop_front()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Colour;

    #[test]
    fn blit_copies_the_frame() {
        let fb = FrameBuffer::new(3, 2);
        fb.clear(Colour::new(1, 2, 3));
        fb.set_pixel(2, 1, Colour::WHITE);

        let mut surface = ImageSurface::new(3, 2);
        surface.blit(&fb);
        assert_eq!(surface.pixel(0, 0), Some(Colour::new(1, 2, 3).to_argb()));
        assert_eq!(surface.pixel(2, 1), Some(0xFFFF_FFFF));
        assert_eq!(surface.pixel(3, 0), None);
    }

    #[test]
    fn script_runs_out_into_quit() {
        let mut surface = ImageSurface::new(1, 1).with_script([Command::ToggleOrbit]);
        assert_eq!(surface.poll_command(), Some(Command::ToggleOrbit));
        assert_eq!(surface.poll_command(), None);
        assert_eq!(surface.poll_command(), None);
        surface.present().unwrap();
        assert_eq!(surface.poll_command(), Some(Command::Quit));
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut surface = ImageSurface::new(2, 2);
        surface.set_pixel(5, 0, 7);
        surface.set_pixel(1, 1, 9);
        assert_eq!(surface.pixels(), &[0, 0, 0, 9]);
    }
}
