//! The seven layers of the intro, bottom to top.

mod background;
mod fade_out;
mod glow;
mod host_name;
mod node_network;
mod particles;
mod typed_title;

pub use background::Background;
pub use fade_out::FadeOut;
pub use glow::AudioReactiveGlow;
pub use host_name::HostName;
pub use node_network::NodeNetwork;
pub use particles::Particles;
pub use typed_title::TypedTitle;
