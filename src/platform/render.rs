//! Render sink
//!
//! The core draws nothing. Once per tick it hands the frame and HUD data to
//! whatever presents them.

use crate::game::Hud;
use crate::sim::Frame;

pub trait RenderSink {
    fn present(&mut self, frame: &Frame, hud: &Hud);
}
