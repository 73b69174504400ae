//! View state owned by the front-end.
//!
//! Plain owned fields with explicit reset deadlines: banners, per-stake
//! display rows and the live reference clock.

pub mod banner;
pub mod stakes;
pub mod ticker;

pub use banner::*;
pub use stakes::*;
pub use ticker::*;
