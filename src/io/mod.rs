pub mod reader;
pub mod resolver;

pub use reader::{DocumentFormat, DocumentReader, ReaderConfig};
pub use resolver::{FileResolver, ResolverConfig};
