pub mod camera;
pub mod constants;
pub mod curve;
pub mod director;
pub mod easing;
pub mod error;
pub mod galaxy;
pub mod intro;
pub mod resolver;
pub mod sections;
pub mod signals;
pub mod state;
pub mod story;
pub mod timeline;

pub use camera::*;
pub use curve::*;
pub use director::*;
pub use easing::*;
pub use error::*;
pub use galaxy::*;
pub use intro::*;
pub use resolver::*;
pub use sections::*;
pub use signals::*;
pub use state::*;
pub use story::*;
pub use timeline::*;
