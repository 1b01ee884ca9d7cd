//! Frame dispatch.
//!
//! A [`cursor::DispatchCursor`] hands out frame indices; a [`scheduler::FrameScheduler`] owns the
//! worker threads that drain it.

pub(crate) mod cursor;
pub(crate) mod scheduler;
