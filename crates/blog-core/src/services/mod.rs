//! Application services built on the ports.

mod content;

pub use content::ContentStore;
