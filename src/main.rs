mod error;
mod renderer;
mod window;

use std::process;

use error::Result;
use renderer::{FrameLoop, Geometry, GlDevice, Program, Renderer, ShaderSources, TRIANGLE};
use window::{GlfwSurface, WindowConfig};

fn main() {
    env_logger::init();

    let config = WindowConfig::default();
    let mut surface = match GlfwSurface::new(&config) {
        Ok(surface) => surface,
        Err(err) => {
            log::error!("{}", err);
            process::exit(-1);
        }
    };

    // Safety: `device` is dropped before `surface` and never leaves this thread.
    let device = unsafe { surface.create_device() };
    let result = run(&device, &mut surface);

    drop(device);
    drop(surface);

    match result {
        Ok(frames) => log::info!("rendered {} frames", frames),
        Err(err) => {
            log::error!("{}", err);
            process::exit(-1);
        }
    }
}

fn run(device: &GlDevice, surface: &mut GlfwSurface) -> Result<u64> {
    let program = Program::from_sources(device, &ShaderSources::TRIANGLE)?;
    let geometry = Geometry::new(device, &TRIANGLE)?;

    let mut frame_loop = FrameLoop::new(Renderer::new(device, program, geometry));
    Ok(frame_loop.run(surface))
}
