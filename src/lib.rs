pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;

pub use error::NormalizeError;
pub use model::comment::{Comment, CommentThread};
pub use model::work_item::{CustomFields, SystemFields, WorkItemRecord};
pub use normalize::{FieldPolicy, Normalizer};
