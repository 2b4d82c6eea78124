mod boundary;
mod catalog;
mod errors;
mod types;

pub use boundary::RenderBoundary;
pub use catalog::PageCatalog;
pub use errors::RenderError;
pub use types::{Layout, Restriction, ScreenDescriptor, ScreenResolver, View};
