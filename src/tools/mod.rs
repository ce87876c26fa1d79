//! The tools module provides helpers around the tree builder.
//!
//! The tools are:
//! - freq_count: Build a symbol table from text.
//! - options: Configuration for building trees and enumerating codes.
//!
pub mod freq_count;
pub mod options;
