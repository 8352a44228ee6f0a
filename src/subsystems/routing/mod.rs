//! Request routing: which agent handles a request, and what trip context
//! the request carries.

pub mod classifier;
pub mod extractor;

pub use classifier::{AgentKind, KeywordClassifier};
pub use extractor::ContextExtractor;
