pub mod builder;
pub mod classify;
pub mod lines;

#[cfg(test)]
mod tests;

pub use classify::{IniLineClassifier, LineClass};
pub use lines::LineRef;
