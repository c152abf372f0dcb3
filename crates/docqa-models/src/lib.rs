//! docqa-models
//!
//! Offline implementations of the external model collaborators. These are
//! deterministic and dependency-free stand-ins used by the CLI and the test
//! suites; production backends (hosted embedding, cross-encoder, and
//! generation models) plug in through the same `docqa-core` traits.

pub mod embed;
pub mod extract;
pub mod generate;
pub mod score;

pub use embed::HashEmbedder;
pub use extract::{PdftotextExtractor, PlainTextExtractor};
pub use generate::ExtractiveGenerator;
pub use score::TermOverlapScorer;
