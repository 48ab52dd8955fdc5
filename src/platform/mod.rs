//! Platform abstraction layer
//!
//! The simulation never touches hardware. It reads input through
//! [`InputSource`] and time through [`Clock`]; a frontend supplies both.

pub mod input;
pub mod time;

pub use input::{InputEvent, InputSource, ScriptedInput};
pub use time::{Clock, FramePacer, ManualClock, SystemClock};
