use std::fmt;

use super::device::Device;
use crate::error::{Error, Result};

/// Driver diagnostics are cut to this many bytes before they are reported.
pub const INFO_LOG_LIMIT: usize = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderKind {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderKind::Vertex => f.write_str("vertex"),
            ShaderKind::Fragment => f.write_str("fragment"),
        }
    }
}

/// A compiled shader object. Deleted on drop.
pub struct Shader<'a, D: Device> {
    device: &'a D,
    pub raw: D::Shader,
    pub kind: ShaderKind,
}

impl<'a, D: Device> Shader<'a, D> {
    pub fn compile(device: &'a D, kind: ShaderKind, source: &str) -> Result<Self> {
        let raw = device.create_shader(kind).map_err(|reason| Error::Allocation {
            object: "shader",
            reason,
        })?;
        // From here on the guard owns the handle, so the error path below
        // releases it on return.
        let shader = Shader { device, raw, kind };

        device.shader_source(raw, source);
        if !device.compile_shader(raw) {
            let log = truncate_log(device.shader_info_log(raw));
            log::error!("failed to compile {} shader:\n{}", kind, log);
            return Err(Error::ShaderCompile { kind, log });
        }

        log::debug!("compiled {} shader {:?}", kind, raw);
        Ok(shader)
    }
}

impl<'a, D: Device> Drop for Shader<'a, D> {
    fn drop(&mut self) {
        self.device.delete_shader(self.raw);
    }
}

/// Cuts `log` to at most `INFO_LOG_LIMIT` bytes without splitting a character.
pub(crate) fn truncate_log(mut log: String) -> String {
    if log.len() > INFO_LOG_LIMIT {
        let mut end = INFO_LOG_LIMIT;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log.trim_end().to_owned()
}
