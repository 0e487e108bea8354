//! Parser integration tests
//!
//! - Section splitting over generated logs
//! - Whole-log parsing of the example and synthetic logs
//! - Edge cases and discarded sections

pub mod section_tests;
