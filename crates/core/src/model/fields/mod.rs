pub mod link;
pub mod text;

pub use link::{Link, LinkError};
pub use text::{TextError, optional_text, required_text};
