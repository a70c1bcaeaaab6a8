use glfw::{Action, Context as _, Key, WindowEvent};

use crate::error::{Error, Result};
use crate::renderer::GlDevice;

pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Requested OpenGL (major, minor) version, core profile.
    pub gl_version: (u32, u32),
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 640,
            height: 480,
            title: "snake in c min".to_owned(),
            gl_version: (3, 3),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    FramebufferResized { width: i32, height: i32 },
    KeyPressed(Key),
    CloseRequested,
}

/// What the frame loop needs from the windowing layer.
pub trait Surface {
    fn should_close(&self) -> bool;
    fn request_close(&mut self);
    fn swap_buffers(&mut self);
    /// Processes pending window-system events and returns the ones the
    /// renderer cares about.
    fn poll_events(&mut self) -> Vec<SurfaceEvent>;
    fn is_key_pressed(&self, key: Key) -> bool;
}

pub struct GlfwSurface {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl GlfwSurface {
    /// Opens a window and makes its OpenGL context current on this thread.
    pub fn new(config: &WindowConfig) -> Result<Self> {
        let mut glfw = glfw::init(|error, description| {
            log::error!("GLFW error {:?}: {}", error, description)
        })
        .map_err(Error::GlfwInit)?;

        let (major, minor) = config.gl_version;
        glfw.window_hint(glfw::WindowHint::ContextVersion(major, minor));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(
            glfw::OpenGlProfileHint::Core,
        ));
        // needed on macOS
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        let (mut window, events) = glfw
            .create_window(
                config.width,
                config.height,
                &config.title,
                glfw::WindowMode::Windowed,
            )
            .ok_or(Error::WindowCreation)?;

        window.make_current();
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        log::info!(
            "opened {}x{} window with OpenGL {}.{} core context",
            config.width,
            config.height,
            major,
            minor
        );
        Ok(GlfwSurface {
            glfw,
            window,
            events,
        })
    }

    /// Loads the OpenGL functions of this window's context.
    ///
    /// # Safety
    ///
    /// The returned device must be dropped before this surface and used only
    /// on the thread that created it.
    pub unsafe fn create_device(&mut self) -> GlDevice {
        let window = &mut self.window;
        GlDevice::from_loader(|symbol| window.get_proc_address(symbol) as *const _)
    }
}

impl Surface for GlfwSurface {
    fn should_close(&self) -> bool {
        self.window.should_close()
    }

    fn request_close(&mut self) {
        self.window.set_should_close(true);
    }

    fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    fn poll_events(&mut self) -> Vec<SurfaceEvent> {
        self.glfw.poll_events();
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| match event {
                WindowEvent::FramebufferSize(width, height) => {
                    Some(SurfaceEvent::FramebufferResized { width, height })
                }
                WindowEvent::Key(key, _, Action::Press, _) => Some(SurfaceEvent::KeyPressed(key)),
                WindowEvent::Close => Some(SurfaceEvent::CloseRequested),
                _ => None,
            })
            .collect()
    }

    fn is_key_pressed(&self, key: Key) -> bool {
        self.window.get_key(key) == Action::Press
    }
}

impl Drop for GlfwSurface {
    fn drop(&mut self) {
        // the window is destroyed and GLFW terminated once the fields drop
        log::info!("closing window");
    }
}
