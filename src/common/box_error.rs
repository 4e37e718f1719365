//! type used for errors that have to cross thread boundaries.
//!
//! Configuration checks use this with `simple_error::bail!` so that
//! the binary can report them the same way as daemon errors.
pub type BoxError = std::boxed::Box<
    dyn std::error::Error // lets `?` convert SimpleError and friends
        + std::marker::Send // can be handed back from the ctrlc or jack threads
        + std::marker::Sync,
>;
