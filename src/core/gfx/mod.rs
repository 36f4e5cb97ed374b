use std::{error::Error, num::NonZeroU32, sync::Arc};

use log::{debug, info};
use softbuffer::{Context, Surface};
use winit::window::Window;

use crate::ui::canvas::Canvas;
use crate::ui::frame::Frame;
use crate::ui::staff;
use crate::ui::text::TextRenderer;

/// Software presentation: frames are rasterised on the CPU and blitted
/// through softbuffer. Nothing here keeps GPU state.
pub struct Presenter {
    window: Arc<Window>,
    _context: Context<Arc<Window>>,
    surface: Surface<Arc<Window>, Arc<Window>>,
    canvas: Canvas,
    text: TextRenderer,
}

impl Presenter {
    pub fn new(window: Arc<Window>) -> Result<Self, Box<dyn Error>> {
        let context = Context::new(window.clone())?;
        let surface = Surface::new(&context, window.clone())?;
        let size = window.inner_size();
        info!("Software presenter ready ({}x{}).", size.width, size.height);
        Ok(Self {
            window,
            _context: context,
            surface,
            canvas: Canvas::new(size.width as usize, size.height as usize),
            text: TextRenderer::new()?,
        })
    }

    /// Draws `frame` at the window's current size. Minimised windows are skipped.
    pub fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn Error>> {
        let size = self.window.inner_size();
        let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            debug!("Skipping present for a zero-sized window.");
            return Ok(());
        };

        self.surface.resize(width, height)?;
        self.canvas.resize(size.width as usize, size.height as usize);
        staff::draw(frame, &mut self.canvas, &self.text);

        let mut buffer = self.surface.buffer_mut()?;
        buffer.copy_from_slice(self.canvas.pixels());
        buffer.present()?;
        Ok(())
    }
}
