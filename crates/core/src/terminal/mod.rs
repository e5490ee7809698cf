//! Keyboard polling abstraction
//!
//! Platform terminal handling lives behind [`KeyPoller`]; callers only see
//! "a key arrived" or "the timeout elapsed".

mod traits;

pub use traits::{KeyPoller, ScriptedKeys, CTRL_C};
