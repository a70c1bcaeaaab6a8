use super::buffer::VertexBuffer;
use super::device::Device;
use super::vertex::Vertex;
use super::vertex_array::VertexArray;
use crate::error::{Error, Result};

/// A vertex buffer together with the vertex array that describes it.
pub struct Geometry<'a, D: Device> {
    // dropped before the buffer it references
    pub vertex_array: VertexArray<'a, D>,
    pub buffer: VertexBuffer<'a, D>,
}

impl<'a, D: Device> Geometry<'a, D> {
    pub fn new(device: &'a D, vertices: &[Vertex]) -> Result<Self> {
        if vertices.is_empty() {
            return Err(Error::EmptyGeometry);
        }

        let vertex_array = VertexArray::new(device)?;
        vertex_array.bind();

        let buffer = VertexBuffer::new(device, vertices)?;
        device.vertex_attribute(&Vertex::attribute());
        check_for_gl_error!(device, "vertex_attribute");

        // The attribute keeps its own reference to the buffer, so both can be
        // unbound now.
        device.bind_array_buffer(None);
        vertex_array.unbind();

        log::debug!(
            "uploaded {} vertices to buffer {:?} (vertex array {:?})",
            buffer.len,
            buffer.raw,
            vertex_array.raw
        );
        Ok(Geometry {
            vertex_array,
            buffer,
        })
    }

    pub fn vertex_count(&self) -> usize {
        self.buffer.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::device::recording::{Call, RecordingDevice};
    use crate::renderer::vertex::TRIANGLE;

    #[test]
    fn uploads_triangle_once() {
        let device = RecordingDevice::new();

        let geometry = Geometry::new(&device, &TRIANGLE).unwrap();

        assert_eq!(geometry.vertex_count(), 3);
        assert_eq!(device.live_objects(), 2);
        assert!(device.is_live(geometry.buffer.raw));
        assert!(device.is_live(geometry.vertex_array.raw));
        assert_ne!(geometry.buffer.raw, geometry.vertex_array.raw);

        let vao = geometry.vertex_array.raw;
        let vbo = geometry.buffer.raw;
        assert_eq!(
            device.calls(),
            vec![
                Call::BindVertexArray(Some(vao)),
                Call::BindArrayBuffer(Some(vbo)),
                Call::Upload(bytemuck::cast_slice(&TRIANGLE).to_vec()),
                Call::Attribute(Vertex::attribute()),
                Call::BindArrayBuffer(None),
                Call::BindVertexArray(None),
            ]
        );

        drop(geometry);
        assert_eq!(device.live_objects(), 0);
    }

    #[test]
    fn upload_size_matches_vertex_count() {
        let device = RecordingDevice::new();
        let _geometry = Geometry::new(&device, &TRIANGLE).unwrap();

        let uploaded: Vec<usize> = device
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Upload(bytes) => Some(bytes.len()),
                _ => None,
            })
            .collect();

        assert_eq!(uploaded, vec![3 * std::mem::size_of::<Vertex>()]);
    }

    #[test]
    fn rejects_empty_vertex_list() {
        let device = RecordingDevice::new();

        assert!(matches!(
            Geometry::new(&device, &[]),
            Err(Error::EmptyGeometry)
        ));
        assert_eq!(device.live_objects(), 0);
    }

    #[test]
    fn buffer_allocation_failure_releases_vertex_array() {
        let device = RecordingDevice::new();
        // enough for the vertex array, not for the buffer
        device.allocation_budget.set(Some(1));

        assert!(matches!(
            Geometry::new(&device, &TRIANGLE),
            Err(Error::Allocation { .. })
        ));
        assert_eq!(device.live_objects(), 0);
    }
}
