pub mod html;
pub mod projection;
pub mod slug;

pub use html::escape_html;
pub use projection::Twd97;
pub use slug::safe_slug;
