pub mod descriptor;
pub mod registry;

pub use descriptor::LevelDescriptor;
pub use registry::LevelCatalog;
