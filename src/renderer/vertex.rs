use std::mem;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[allow(non_snake_case)]
pub struct Vertex {
    a_Pos: [f32; 3],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Vertex { a_Pos: [x, y, z] }
    }

    /// Layout of `a_Pos` at shader location 0.
    pub fn attribute() -> VertexAttribute {
        VertexAttribute {
            location: 0,
            components: 3,
            normalized: false,
            stride: mem::size_of::<Vertex>() as i32,
            offset: 0,
        }
    }
}

pub const TRIANGLE: [Vertex; 3] = [
    Vertex::new(-0.5, -0.5, 0.0), // left
    Vertex::new(0.5, -0.5, 0.0),  // right
    Vertex::new(0.0, 0.5, 0.0),   // top
];

/// How one float attribute is read out of the bound vertex buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: i32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}
