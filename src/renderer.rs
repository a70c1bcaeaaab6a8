#[macro_use]
pub mod device;
mod buffer;
mod geometry;
mod program;
mod shader;
mod vertex;
mod vertex_array;

pub use device::{Device, GlDevice};
pub use geometry::Geometry;
pub use program::{Program, ShaderSources};
pub use shader::ShaderKind;
pub use vertex::TRIANGLE;

use fps_counter::FPSCounter;
use glfw::Key;

use crate::window::{Surface, SurfaceEvent};

pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Draws one piece of geometry with one program.
pub struct Renderer<'a, D: Device> {
    device: &'a D,
    program: Program<'a, D>,
    geometry: Geometry<'a, D>,
}

impl<'a, D> Renderer<'a, D>
where
    D: Device,
{
    pub fn new(device: &'a D, program: Program<'a, D>, geometry: Geometry<'a, D>) -> Self {
        Renderer {
            device,
            program,
            geometry,
        }
    }

    pub fn render(&self) {
        self.device.clear(CLEAR_COLOR);

        self.program.bind();
        self.geometry.vertex_array.bind();
        self.device
            .draw_triangles(0, self.geometry.vertex_count() as i32);
        check_for_gl_error!(self.device, "draw_triangles");
    }

    pub fn resize(&self, width: i32, height: i32) {
        log::debug!("viewport resized to {}x{}", width, height);
        self.device.viewport(width, height);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closing,
}

/// Clear, draw, present, poll. Repeats until the surface asks to close.
pub struct FrameLoop<'a, D: Device> {
    renderer: Renderer<'a, D>,
    state: LoopState,
    frames: u64,
    fps_counter: FPSCounter,
}

impl<'a, D: Device> FrameLoop<'a, D> {
    pub fn new(renderer: Renderer<'a, D>) -> Self {
        FrameLoop {
            renderer,
            state: LoopState::Running,
            frames: 0,
            fps_counter: FPSCounter::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Runs one frame. Nothing is drawn once a close has been requested.
    pub fn tick<S: Surface>(&mut self, surface: &mut S) -> LoopState {
        if self.state == LoopState::Closing || surface.should_close() {
            self.state = LoopState::Closing;
            return self.state;
        }

        self.renderer.render();
        surface.swap_buffers();

        for event in surface.poll_events() {
            self.handle_event(surface, event);
        }
        if surface.is_key_pressed(Key::Escape) {
            surface.request_close();
        }

        self.frames += 1;
        log::trace!("frame {} ({} fps)", self.frames, self.fps_counter.tick());

        if surface.should_close() {
            self.state = LoopState::Closing;
        }
        self.state
    }

    /// Ticks until closing and returns the number of frames drawn.
    pub fn run<S: Surface>(&mut self, surface: &mut S) -> u64 {
        while self.tick(surface) == LoopState::Running {}
        log::info!("closing after {} frames", self.frames);
        self.frames
    }

    fn handle_event<S: Surface>(&mut self, surface: &mut S, event: SurfaceEvent) {
        match event {
            SurfaceEvent::FramebufferResized { width, height } => {
                self.renderer.resize(width, height)
            }
            SurfaceEvent::KeyPressed(Key::Escape) | SurfaceEvent::CloseRequested => {
                surface.request_close()
            }
            SurfaceEvent::KeyPressed(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::device::recording::{Call, RecordingDevice};
    use super::*;
    use std::collections::VecDeque;

    /// Replays one batch of events per poll.
    #[derive(Default)]
    struct ScriptedSurface {
        close_requested: bool,
        swaps: usize,
        escape_held: bool,
        script: VecDeque<Vec<SurfaceEvent>>,
    }

    impl Surface for ScriptedSurface {
        fn should_close(&self) -> bool {
            self.close_requested
        }

        fn request_close(&mut self) {
            self.close_requested = true;
        }

        fn swap_buffers(&mut self) {
            self.swaps += 1;
        }

        fn poll_events(&mut self) -> Vec<SurfaceEvent> {
            self.script.pop_front().unwrap_or_default()
        }

        fn is_key_pressed(&self, key: Key) -> bool {
            key == Key::Escape && self.escape_held
        }
    }

    fn frame_loop(device: &RecordingDevice) -> FrameLoop<'_, RecordingDevice> {
        let program = Program::from_sources(device, &ShaderSources::TRIANGLE).unwrap();
        let geometry = Geometry::new(device, &TRIANGLE).unwrap();
        device.clear_calls();
        FrameLoop::new(Renderer::new(device, program, geometry))
    }

    #[test]
    fn one_tick_draws_one_triangle() {
        let device = RecordingDevice::new();
        let mut frame_loop = frame_loop(&device);
        let mut surface = ScriptedSurface::default();

        assert_eq!(frame_loop.tick(&mut surface), LoopState::Running);

        assert_eq!(
            device.draw_calls(),
            vec![Call::DrawTriangles { first: 0, count: 3 }]
        );
        assert_eq!(device.calls()[0], Call::Clear(CLEAR_COLOR));
        assert!(matches!(device.calls()[1], Call::UseProgram(Some(_))));
        assert!(matches!(device.calls()[2], Call::BindVertexArray(Some(_))));
        assert_eq!(surface.swaps, 1);
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn escape_press_closes_within_one_tick() {
        let device = RecordingDevice::new();
        let mut frame_loop = frame_loop(&device);
        let mut surface = ScriptedSurface::default();
        surface.script.push_back(vec![]);
        surface
            .script
            .push_back(vec![SurfaceEvent::KeyPressed(Key::Escape)]);

        let frames = frame_loop.run(&mut surface);

        assert_eq!(frames, 2);
        assert_eq!(frame_loop.state(), LoopState::Closing);
        assert_eq!(device.draw_calls().len(), 2);
    }

    #[test]
    fn held_escape_closes() {
        let device = RecordingDevice::new();
        let mut frame_loop = frame_loop(&device);
        let mut surface = ScriptedSurface {
            escape_held: true,
            ..Default::default()
        };

        assert_eq!(frame_loop.tick(&mut surface), LoopState::Closing);
        assert_eq!(frame_loop.run(&mut surface), 1);
    }

    #[test]
    fn pending_close_skips_drawing() {
        let device = RecordingDevice::new();
        let mut frame_loop = frame_loop(&device);
        let mut surface = ScriptedSurface {
            close_requested: true,
            ..Default::default()
        };

        assert_eq!(frame_loop.run(&mut surface), 0);
        assert!(device.calls().is_empty());
        assert_eq!(surface.swaps, 0);
    }

    #[test]
    fn resize_updates_viewport() {
        let device = RecordingDevice::new();
        let mut frame_loop = frame_loop(&device);
        let mut surface = ScriptedSurface::default();
        surface.script.push_back(vec![
            SurfaceEvent::KeyPressed(Key::Space),
            SurfaceEvent::FramebufferResized {
                width: 1280,
                height: 960,
            },
        ]);

        assert_eq!(frame_loop.tick(&mut surface), LoopState::Running);
        assert!(device.calls().contains(&Call::Viewport(1280, 960)));
    }

    #[test]
    fn dropping_the_loop_releases_everything() {
        let device = RecordingDevice::new();
        let frame_loop = frame_loop(&device);
        assert_eq!(device.live_objects(), 3);

        drop(frame_loop);
        assert_eq!(device.live_objects(), 0);
    }
}
