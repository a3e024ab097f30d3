//! Module trait for self-contained screens and panels

use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::Frame;
use tracing::{debug_span, trace};

use super::{Action, Context};

/// A panel that owns its input handling and drawing
pub trait Module {
    fn id(&self) -> &'static str;

    /// Handle keyboard input
    /// Returns an Action describing what should happen
    fn handle_key(&mut self, key: KeyEvent, ctx: &mut Context) -> Action;

    fn render(&self, frame: &mut Frame, area: Rect, ctx: &Context);
}

/// Hand `key` to `module` inside a span carrying the module's id
pub fn dispatch_key<M: Module + ?Sized>(module: &mut M, key: KeyEvent, ctx: &mut Context) -> Action {
    let span = debug_span!("module", id = module.id());
    let _enter = span.enter();
    let action = module.handle_key(key, ctx);
    if action != Action::None {
        trace!("key produced an action");
    }
    action
}
