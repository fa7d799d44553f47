use std::rc::Rc;

use anyhow::Result;
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use tablegrid::commands::Cmd;
use tablegrid::{DataGrid, GridConfig, GridEvent, GridMsg, MemoryTable};

use super::input::{host_action, key_to_msg, paste_text, HostAction};
use crate::view::Renderer;

/// Pixels scrolled per wheel line
const LINE_SCROLL: f32 = 32.0;

pub struct App {
    grid: DataGrid<MemoryTable>,
    config: GridConfig,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    modifiers: ModifiersState,
    mouse_position: Option<(f64, f64)>,
    /// Input queued for the next layout pass
    pending: Vec<GridEvent>,
    exit_requested: bool,
}

impl App {
    pub fn new(grid: DataGrid<MemoryTable>, config: GridConfig) -> Self {
        Self {
            grid,
            config,
            renderer: None,
            window: None,
            context: None,
            modifiers: ModifiersState::empty(),
            mouse_position: None,
            pending: Vec::new(),
            exit_requested: false,
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("tablegrid")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Rc::new(event_loop.create_window(window_attributes)?);
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context, &self.config)?;

        self.renderer = Some(renderer);
        self.window = Some(window);
        self.context = Some(context);
        Ok(())
    }

    /// Ctrl on most platforms, Cmd on macOS
    fn command_modifier(&self) -> bool {
        if cfg!(target_os = "macos") {
            self.modifiers.super_key()
        } else {
            self.modifiers.control_key()
        }
    }

    fn queue(&mut self, event: impl Into<GridEvent>) -> Option<Cmd> {
        self.pending.push(event.into());
        Some(Cmd::Redraw)
    }

    fn handle_host_action(&mut self, action: HostAction) -> Option<Cmd> {
        match action {
            HostAction::Exit => {
                self.exit_requested = true;
                None
            }
            HostAction::Paste => {
                let clipboard_text = if let Ok(mut clipboard) = arboard::Clipboard::new() {
                    clipboard.get_text().ok()
                } else {
                    None
                };
                let text = paste_text(&clipboard_text?);
                if text.is_empty() {
                    return None;
                }
                self.queue(GridMsg::InsertText(text))
            }
            HostAction::Rebind => {
                self.pending.clear();
                self.grid.bind(MemoryTable::sample());
                Some(Cmd::Redraw)
            }
        }
    }

    fn handle_event(&mut self, event: &WindowEvent) -> Option<Cmd> {
        match event {
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.resize(size.width, size.height) {
                        tracing::error!("Resize failed: {:#}", e);
                    }
                }
                Some(Cmd::Redraw)
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(renderer) = &mut self.renderer {
                    if let Err(e) = renderer.set_scale_factor(*scale_factor, &self.config) {
                        tracing::error!("Rescale failed: {:#}", e);
                    }
                }
                Some(Cmd::Redraw)
            }
            WindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
                None
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return None;
                }
                let command = self.command_modifier();
                if let Some(action) = host_action(&event.logical_key, command) {
                    return self.handle_host_action(action);
                }
                let msg = key_to_msg(&event.logical_key, event.text.as_deref(), command)?;
                self.queue(msg)
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.render() {
                    tracing::error!("Render error: {:#}", e);
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_position = Some((position.x, position.y));
                None
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                let (x, y) = self.mouse_position?;
                let renderer = self.renderer.as_ref()?;
                if renderer.is_in_summary_bar(y) {
                    return None;
                }
                let top = renderer.summary_bar_height() as f64;
                self.queue(GridEvent::Click {
                    x: x as f32,
                    y: (y - top) as f32,
                })
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scale = self.renderer.as_ref().map_or(1.0, |r| r.scale_factor()) as f32;
                let (dx, dy) = match delta {
                    MouseScrollDelta::LineDelta(x, y) => {
                        (-x * LINE_SCROLL * scale, -y * LINE_SCROLL * scale)
                    }
                    MouseScrollDelta::PixelDelta(pos) => (-pos.x as f32, -pos.y as f32),
                };
                if dx == 0.0 && dy == 0.0 {
                    return None;
                }
                self.queue(GridMsg::ScrollBy { dx, dy })
            }
            _ => None,
        }
    }

    fn render(&mut self) -> Result<()> {
        let events = std::mem::take(&mut self.pending);
        if let Some(renderer) = &mut self.renderer {
            renderer.render(&mut self.grid, events)?;
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to create window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let should_exit = matches!(event, WindowEvent::CloseRequested);
        let is_ours = self.window.as_ref().is_some_and(|w| w.id() == window_id);
        let should_redraw = is_ours
            && !should_exit
            && self
                .handle_event(&event)
                .is_some_and(|cmd| cmd.needs_redraw());

        if should_exit || self.exit_requested {
            event_loop.exit();
        } else if should_redraw {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);
    }
}
