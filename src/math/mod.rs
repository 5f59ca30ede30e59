pub mod vec3;
pub mod quat;
pub mod matrix;
pub mod decompose;

pub use vec3::Vec3;
pub use quat::Quat;
pub use matrix::{Axis, Transform3D};
pub use decompose::{Decomposed, TransformTrack};
