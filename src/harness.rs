//! The window, the context and the render loop.

use glutin::dpi::PhysicalSize;
use glutin::event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent};
use glutin::event_loop::{ControlFlow, EventLoop};
use glutin::window::WindowBuilder;
use glutin::{Api, ContextBuilder, GlProfile, GlRequest, PossiblyCurrent, WindowedContext};
use tracing::{debug, error, info};

use crate::error::InitError;
use crate::graphics::opengl::{missing_entry_point, set_viewport};
use crate::render::GpuScene;
use crate::scene::SceneDesc;

pub const WINDOW_TITLE: &str = "LearnOpenGL";
pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const GL_VERSION: (u8, u8) = (3, 3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

/// The window events the loop cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    CloseRequested,
    KeyPressed(Key),
    Resized { width: u32, height: u32 },
}

impl Signal {
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::CloseRequested => Some(Signal::CloseRequested),
            WindowEvent::KeyboardInput {
                input: KeyboardInput { state: ElementState::Pressed, virtual_keycode, .. },
                ..
            } => Some(Signal::KeyPressed(match virtual_keycode {
                Some(VirtualKeyCode::Escape) => Key::Escape,
                _ => Key::Other,
            })),
            WindowEvent::Resized(size) => Some(Signal::Resized {
                width: size.width,
                height: size.height,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closing,
}

/// Keeps track of whether another frame should be drawn.
#[derive(Debug)]
pub struct RenderLoop {
    state: LoopState,
    frames: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self { state: LoopState::Running, frames: 0 }
    }

    pub fn state(&self) -> LoopState { self.state }

    pub fn frames(&self) -> u64 { self.frames }

    /// Closing is final: nothing moves the loop back to running.
    pub fn handle(&mut self, signal: Signal) -> LoopState {
        match signal {
            Signal::CloseRequested | Signal::KeyPressed(Key::Escape) => {
                self.state = LoopState::Closing;
            }
            Signal::KeyPressed(Key::Other) | Signal::Resized { .. } => {}
        }

        self.state
    }

    /// Runs `draw` if the loop is still running. Returns whether a frame was drawn.
    pub fn frame<F: FnOnce()>(&mut self, draw: F) -> bool {
        if self.state != LoopState::Running {
            return false;
        }

        draw();
        self.frames += 1;
        true
    }
}

impl Default for RenderLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Opens the window, makes its context current and loads the GL function pointers.
pub fn init(
    event_loop: &EventLoop<()>,
) -> Result<WindowedContext<PossiblyCurrent>, InitError> {
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(PhysicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

    let context = ContextBuilder::new()
        .with_gl(GlRequest::Specific(Api::OpenGl, GL_VERSION))
        .with_gl_profile(GlProfile::Core)
        .build_windowed(window, event_loop)?;

    let context = unsafe { context.make_current() }.map_err(|(_, e)| e)?;

    gl::load_with(|s| context.get_proc_address(s) as *const _);
    if let Some(name) = missing_entry_point() {
        return Err(InitError::Loader(name));
    }

    let size = context.window().inner_size();
    set_viewport(size.width, size.height);

    info!(
        title = WINDOW_TITLE,
        width = size.width,
        height = size.height,
        "created OpenGL {}.{} core context",
        GL_VERSION.0,
        GL_VERSION.1
    );

    Ok(context)
}

/// Builds the scene and runs it until the window is closed or Escape is pressed. Only comes
/// back if something goes wrong before the first frame; after that the process exits from inside
/// the event loop.
pub fn run(desc: SceneDesc) -> Result<(), InitError> {
    let event_loop = EventLoop::new();
    let context = init(&event_loop)?;
    let scene = GpuScene::build(&desc)?;

    info!(scene = desc.name, "entering render loop");

    let mut scene = Some(scene);
    let mut render_loop = RenderLoop::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = match render_loop.state() {
            LoopState::Running => ControlFlow::Poll,
            LoopState::Closing => ControlFlow::Exit,
        };

        match event {
            Event::WindowEvent { event, .. } => {
                if let Some(signal) = Signal::from_window_event(&event) {
                    if let Signal::Resized { width, height } = signal {
                        context.resize(PhysicalSize::new(width, height));
                        set_viewport(width, height);
                    }

                    if render_loop.handle(signal) == LoopState::Closing {
                        *control_flow = ControlFlow::Exit;
                    }
                }
            }

            Event::MainEventsCleared => {
                let mut swap_failed = false;
                if let Some(scene) = &scene {
                    render_loop.frame(|| {
                        scene.render();
                        if let Err(e) = context.swap_buffers() {
                            error!("failed to swap buffers: {}", e);
                            swap_failed = true;
                        }
                    });
                }

                if swap_failed {
                    render_loop.handle(Signal::CloseRequested);
                    *control_flow = ControlFlow::Exit;
                }
            }

            Event::LoopDestroyed => {
                debug!(frames = render_loop.frames(), "render loop finished");
                if let Some(scene) = scene.take() {
                    scene.release();
                }
            }

            _ => {}
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use glutin::event::{DeviceId, ModifiersState};

    #[allow(deprecated)]
    fn key_event(state: ElementState, key: VirtualKeyCode) -> WindowEvent<'static> {
        WindowEvent::KeyboardInput {
            device_id: unsafe { DeviceId::dummy() },
            input: KeyboardInput {
                scancode: 0,
                state,
                virtual_keycode: Some(key),
                modifiers: ModifiersState::empty(),
            },
            is_synthetic: false,
        }
    }

    #[test]
    fn pressing_escape_in_the_window_closes_the_loop() {
        let mut render_loop = RenderLoop::default();

        let escape = key_event(ElementState::Pressed, VirtualKeyCode::Escape);
        let signal = Signal::from_window_event(&escape);
        assert_eq!(signal, Some(Signal::KeyPressed(Key::Escape)));

        assert_eq!(render_loop.handle(signal.unwrap()), LoopState::Closing);
        assert!(!render_loop.frame(|| panic!("drew a frame after escape")));
    }

    #[test]
    fn releasing_escape_or_pressing_another_key_keeps_running() {
        let mut render_loop = RenderLoop::default();

        let released = key_event(ElementState::Released, VirtualKeyCode::Escape);
        assert_eq!(Signal::from_window_event(&released), None);

        let other = Signal::from_window_event(&key_event(ElementState::Pressed, VirtualKeyCode::A));
        assert_eq!(other, Some(Signal::KeyPressed(Key::Other)));
        assert_eq!(render_loop.handle(other.unwrap()), LoopState::Running);

        assert!(render_loop.frame(|| {}));
    }

    #[test]
    fn escape_closes_before_the_next_frame() {
        let mut render_loop = RenderLoop::new();
        let mut drawn = 0;

        assert!(render_loop.frame(|| drawn += 1));
        assert_eq!(render_loop.handle(Signal::KeyPressed(Key::Escape)), LoopState::Closing);
        assert!(!render_loop.frame(|| drawn += 1));

        assert_eq!(drawn, 1);
        assert_eq!(render_loop.frames(), 1);
    }

    #[test]
    fn close_request_stops_the_loop() {
        let mut render_loop = RenderLoop::new();

        render_loop.handle(Signal::CloseRequested);

        assert_eq!(render_loop.state(), LoopState::Closing);
        assert!(!render_loop.frame(|| panic!("drew a frame after closing")));
    }

    #[test]
    fn other_input_keeps_running() {
        let mut render_loop = RenderLoop::new();

        assert_eq!(render_loop.handle(Signal::KeyPressed(Key::Other)), LoopState::Running);
        assert_eq!(
            render_loop.handle(Signal::Resized { width: 1024, height: 768 }),
            LoopState::Running
        );
        assert!(render_loop.frame(|| {}));
    }

    #[test]
    fn closing_is_final() {
        let mut render_loop = RenderLoop::new();

        render_loop.handle(Signal::KeyPressed(Key::Escape));
        render_loop.handle(Signal::KeyPressed(Key::Other));

        assert_eq!(render_loop.state(), LoopState::Closing);
    }

    #[test]
    fn window_events_become_signals() {
        assert_eq!(
            Signal::from_window_event(&WindowEvent::CloseRequested),
            Some(Signal::CloseRequested)
        );
        assert_eq!(
            Signal::from_window_event(&WindowEvent::Resized(PhysicalSize::new(640, 480))),
            Some(Signal::Resized { width: 640, height: 480 })
        );
        assert_eq!(Signal::from_window_event(&WindowEvent::Focused(true)), None);
    }
}
