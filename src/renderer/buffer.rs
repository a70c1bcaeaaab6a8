use super::device::Device;
use super::vertex::Vertex;
use crate::error::{Error, Result};

/// A vertex buffer holding a copy of `len` vertices. Deleted on drop.
pub struct VertexBuffer<'a, D: Device> {
    device: &'a D,
    pub raw: D::Buffer,
    pub len: usize,
}

impl<'a, D: Device> VertexBuffer<'a, D> {
    /// Creates the buffer, binds it and uploads `content` once with the
    /// static usage hint. The buffer stays bound.
    pub fn new(device: &'a D, content: &[Vertex]) -> Result<Self> {
        if content.is_empty() {
            return Err(Error::EmptyGeometry);
        }

        let raw = device.create_buffer().map_err(|reason| Error::Allocation {
            object: "vertex buffer",
            reason,
        })?;

        device.bind_array_buffer(Some(raw));
        device.upload_static(bytemuck::cast_slice(content));
        check_for_gl_error!(device, "upload_static");

        Ok(VertexBuffer {
            device,
            raw,
            len: content.len(),
        })
    }
}

impl<'a, D: Device> Drop for VertexBuffer<'a, D> {
    fn drop(&mut self) {
        self.device.delete_buffer(self.raw);
    }
}
