//! URL context handling.
//!
//! This module contains the normalization half of the core:
//! - Effective suffix tables (built-in asset, loaded files, compiled PSL)
//! - Registrable domain splitting
//! - Segmentation of raw text into regions
//! - Reassembly of the regions a profile selects

pub mod normalizer;
pub mod segmenter;
pub mod splitter;
pub mod suffix;

// Re-export main functionality
pub use normalizer::{context_for, context_with, normalize};
pub use segmenter::{segment, segment_with, ParsedUrl};
pub use splitter::{split_host, split_host_with};
pub use suffix::{PublicSuffixList, RuleKind, SuffixRule, SuffixRules, SuffixTable};
