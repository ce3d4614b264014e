pub mod executor;
pub mod resource;

pub use executor::{Executor, SyncExecutor};
pub use resource::{
    ImageReference, InMemoryResourceProvider, ResourceError, ResourceProvider, SharedResourceData,
};
