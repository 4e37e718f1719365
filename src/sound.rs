//! components used to make the passthru client

/// What the processor tells the daemon after a cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// One realtime cycle as seen by an [`AudioProcessor`].
///
/// The buffers handed out here belong to the daemon and are only valid until
/// the processor returns.
pub trait ProcessCycle {
    /// number of frames to process this cycle
    fn frames(&self) -> usize;
    /// number of input/output pairs
    fn pairs(&self) -> usize;
    /// input and output buffers of pair `index`, `None` if there is no such pair
    fn pair(&mut self, index: usize) -> Option<(&[f32], &mut [f32])>;
}

/// Work done on the realtime thread once per cycle.  Implementations must
/// finish in bounded time and must not allocate, lock, or do I/O.
pub trait AudioProcessor: Send {
    fn process(&mut self, cycle: &mut dyn ProcessCycle) -> Control;
}

pub mod client;
pub mod host;
pub mod jack_thread;
pub mod passthrough;
pub mod port_set;
