pub mod camera;
pub mod config;
pub mod constants;
pub mod control;
pub mod error;
pub mod modulate;
pub mod particles;
pub mod scenario;
pub mod spectrum;
pub mod transport;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use camera::*;
pub use config::*;
pub use control::*;
pub use error::*;
pub use particles::*;
pub use scenario::*;
pub use spectrum::*;
pub use transport::*;
