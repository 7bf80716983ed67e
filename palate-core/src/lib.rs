pub mod distance;
pub mod error;
pub mod index;
pub mod metadata;
pub mod vector;

// Re-export key types for easier use
pub use error::{CoreError, CoreResult};
pub use index::{FlatIndex, IndexSnapshot};
pub use metadata::{DishRecord, MetadataStore};
pub use vector::{DishId, Embedding};
