//! BoxCast Renderer - brute-force CPU ray casting
//!
//! Every camera ray is tested against every triangle in the scene; the
//! nearest hit is shaded with its texture color plus Phong lighting from
//! each point light. Antialiasing samples are averaged into the final
//! color and depth buffers.

mod error;
mod frame;
mod intersect;
mod renderer;
mod shade;

pub use error::{RenderError, RenderResult};
pub use frame::{color_to_rgba, Color, DepthBuffer, Frame, ImageBuffer};
pub use intersect::{intersect_all, intersect_triangle, nearest_hit, Hit, DETERMINANT_EPSILON};
pub use renderer::{render, render_camera, RenderConfig};
pub use shade::{interpolate, phong, safe_normalize, shade, texture_color, NORMALIZE_EPSILON};

/// Re-export Vec3 and common math types from boxcast_math
pub use boxcast_math::{Interval, Ray, Vec2, Vec3};
