// Adapters layer: concrete collaborators behind the domain ports.

pub mod dom;
pub mod http;
pub mod storage;

pub use dom::{MemoryDocument, MemoryMount};
pub use http::HttpFetcher;
pub use storage::{FragmentWriter, StaticDirFetcher};
