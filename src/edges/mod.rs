//! Everything that happens to an edge before it reaches the graph
//!
//! Recorded streams are parsed ([`parse_edge_stream`]), admitted or dropped
//! by an [`EdgeFilter`] on their raw paths, rewritten by a
//! [`PathNormalizer`], and finally serialized into an [`EdgeRecorder`].

mod filter;
mod normalize;
mod parser;
mod recorder;
mod source;

pub use filter::EdgeFilter;
pub use normalize::{PathNormalizer, PathStyle, anchor};
pub use parser::parse_edge_stream;
pub use recorder::EdgeRecorder;
pub use source::{EdgeInput, discover_inputs, load_edges};
