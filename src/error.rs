use thiserror::Error;

use crate::renderer::ShaderKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to compile {kind} shader: {log}")]
    ShaderCompile { kind: ShaderKind, log: String },
    #[error("failed to link program: {0}")]
    ProgramLink(String),
    #[error("failed to create {object}: {reason}")]
    Allocation { object: &'static str, reason: String },
    #[error("geometry needs at least one vertex")]
    EmptyGeometry,
    #[error("failed to initialize GLFW: {0:?}")]
    GlfwInit(glfw::InitError),
    #[error("failed to create GLFW window or OpenGL context")]
    WindowCreation,
}

pub type Result<T> = std::result::Result<T, Error>;
