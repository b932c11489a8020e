//! Interactive selection.

mod select;

pub use select::{Selector, TerminalSelector};
