// Common utilities shared between the derives
//
// This module contains:
// - parse_utils: attribute and shape checks

mod parse_utils;

pub use parse_utils::*;
