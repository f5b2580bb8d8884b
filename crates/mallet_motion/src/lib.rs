//! Mallet motion from strike events.
//!
//! Turns an ordered list of strikes into a rigid-transform curve that a
//! scene `Transform` node can sample like any other animated value:
//!
//! ```text
//! note events -> strike events -> mallet path -> AnimatedValue<Mat4>
//! ```

mod event;
mod path;

pub use event::{Onset, StrikeEvent};
pub use path::{MalletPath, PHASE_LIFT_END, PHASE_STRIKE_START};
