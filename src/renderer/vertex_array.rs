use super::device::Device;
use crate::error::{Error, Result};

/// A vertex array object. Deleted on drop.
pub struct VertexArray<'a, D: Device> {
    device: &'a D,
    pub raw: D::VertexArray,
}

impl<'a, D: Device> VertexArray<'a, D> {
    pub fn new(device: &'a D) -> Result<Self> {
        let raw = device
            .create_vertex_array()
            .map_err(|reason| Error::Allocation {
                object: "vertex array",
                reason,
            })?;
        Ok(VertexArray { device, raw })
    }

    pub fn bind(&self) {
        self.device.bind_vertex_array(Some(self.raw));
    }

    pub fn unbind(&self) {
        self.device.bind_vertex_array(None);
    }
}

impl<'a, D: Device> Drop for VertexArray<'a, D> {
    fn drop(&mut self) {
        self.device.delete_vertex_array(self.raw);
    }
}
