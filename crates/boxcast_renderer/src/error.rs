//! Errors returned by the render entry point.

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RenderError {
    #[error("Unknown camera {id} (scene has {count} cameras)")]
    UnknownCamera { id: usize, count: usize },
}

pub type RenderResult<T> = Result<T, RenderError>;
