//! Typed inputs produced by the scraping layer. The resume pipeline treats
//! these as immutable per-request facts; it never fetches anything itself.

pub mod bootdev;
pub mod form;
pub mod github;
pub mod leetcode;
