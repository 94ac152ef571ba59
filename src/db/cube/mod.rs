//! Stores for cubes discovered during cubification.
//!
//! - The [queue](queue) ranks cubes by their density score, and bounds how many are held.
//! - The [index](index) is a prefix trie over literal encodings, used as a set and as a subsumption guard.

pub mod index;
pub mod queue;
