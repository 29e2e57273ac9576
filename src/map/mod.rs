pub mod builder;
pub mod feedback;
pub mod popup;

pub use builder::{LayerStyle, MapBuilder, PointMarker};
pub use feedback::FEEDBACK_JS;
