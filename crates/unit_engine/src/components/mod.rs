//! Built-in components
//!
//! Each concrete component wraps exactly one native-engine object and
//! forwards mutators and queries to it through the backend seams. Transform
//! is the exception: it is pure data that siblings pull from every frame.

pub mod audio_source;
pub mod camera;
pub mod light;
pub mod listener;
pub mod render_object;
pub mod rigid_body;
pub mod transform;

pub use audio_source::AudioSourceComponent;
pub use camera::CameraComponent;
pub use light::LightComponent;
pub use listener::ListenerComponent;
pub use render_object::RenderObjectComponent;
pub use rigid_body::RigidBodyComponent;
pub use transform::TransformComponent;
