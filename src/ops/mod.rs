//! CHAMP trie algorithms over generation-stamped nodes.

pub mod get;
pub mod insert;
pub mod remove;
