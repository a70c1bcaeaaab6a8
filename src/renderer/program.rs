use super::device::Device;
use super::shader::{truncate_log, Shader, ShaderKind};
use crate::error::{Error, Result};

/// GLSL sources for one vertex/fragment pair.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSources<'s> {
    pub vertex: &'s str,
    pub fragment: &'s str,
}

impl ShaderSources<'static> {
    pub const TRIANGLE: ShaderSources<'static> = ShaderSources {
        vertex: include_str!("../data/triangle.vert"),
        fragment: include_str!("../data/triangle.frag"),
    };
}

/// A linked shader program. Deleted on drop.
pub struct Program<'a, D: Device> {
    device: &'a D,
    pub raw: D::Program,
}

impl<'a, D: Device> Program<'a, D> {
    /// Compiles both stages from their own sources and links them.
    pub fn from_sources(device: &'a D, sources: &ShaderSources<'_>) -> Result<Self> {
        let vertex = Shader::compile(device, ShaderKind::Vertex, sources.vertex)?;
        let fragment = Shader::compile(device, ShaderKind::Fragment, sources.fragment)?;
        Self::link(device, vertex, fragment)
    }

    /// Links a vertex and a fragment shader. Both shaders are released
    /// whatever the outcome.
    pub fn link(device: &'a D, vertex: Shader<'a, D>, fragment: Shader<'a, D>) -> Result<Self> {
        if vertex.kind != ShaderKind::Vertex || fragment.kind != ShaderKind::Fragment {
            let log = format!(
                "expected vertex and fragment shaders, got {} and {}",
                vertex.kind, fragment.kind
            );
            log::error!("failed to link program: {}", log);
            return Err(Error::ProgramLink(log));
        }

        let raw = device.create_program().map_err(|reason| Error::Allocation {
            object: "program",
            reason,
        })?;
        let program = Program { device, raw };

        device.attach_shader(raw, vertex.raw);
        device.attach_shader(raw, fragment.raw);
        let linked = device.link_program(raw);
        check_for_gl_error!(device, "link_program");

        if !linked {
            let log = truncate_log(device.program_info_log(raw));
            log::error!("failed to link program:\n{}", log);
            return Err(Error::ProgramLink(log));
        }

        device.detach_shader(raw, vertex.raw);
        device.detach_shader(raw, fragment.raw);

        log::debug!("linked program {:?}", raw);
        Ok(program)
    }

    pub fn bind(&self) {
        self.device.use_program(Some(self.raw));
    }
}

impl<'a, D: Device> Drop for Program<'a, D> {
    fn drop(&mut self) {
        self.device.delete_program(self.raw);
    }
}
