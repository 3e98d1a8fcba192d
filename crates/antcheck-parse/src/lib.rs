//! Film release filename parsing.
//!
//! Takes a raw filename like `Heat.1995.1080p.BluRay.x264-GRP.mkv` and
//! pulls out the title, year, and technical properties. The pipeline is
//! tokenizer -> keyword identification -> positional passes, and the title
//! is reconstructed from whatever free text the other passes left behind.

pub mod elements;
pub mod keyword;
pub mod parser;
pub mod tokenizer;

pub use elements::Elements;
pub use parser::parse;
