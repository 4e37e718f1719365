//! jack_passthru - minimal JACK pass-through client
//!
//! registers a fixed number of input/output port pairs with a jack server and
//! copies every input buffer to its paired output on each realtime cycle.
pub mod common;
pub mod sound;
