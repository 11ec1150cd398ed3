//! Asset storage: logical-path resolution and collection-scoped persistence.

pub mod assets;
pub mod path;
