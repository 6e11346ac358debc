//! Runtime event to wire frame transduction.

pub mod session;
pub mod trace;
pub mod transducer;

pub use session::{SessionStats, StreamSession, TransducerOptions, extract_terminal_answer};
pub use transducer::{transduce, transduce_encoded};
