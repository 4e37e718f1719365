//! What the client needs from the audio daemon.
//!
//! The JACK binding lives in [`super::jack_thread`].  Keeping the daemon behind
//! these traits lets the startup sequence run against a fake host in tests.
use std::sync::mpsc;

#[cfg(test)]
use mockall::automock;

use super::port_set::PortSet;
use super::AudioProcessor;
use crate::common::error::PassthruError;

/// Options passed when opening a connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// let the daemon library start a server if none is running
    pub start_server: bool,
}

/// Informational flags reported by the daemon when a client is opened
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpenStatus {
    pub bits: u32,
    pub server_started: bool,
    pub name_not_unique: bool,
    pub server_failed: bool,
}

/// Why an active session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// the process got SIGINT/SIGTERM
    Interrupted,
    /// the daemon shut down or dropped the client
    Disconnected(String),
}

pub trait AudioHost {
    type Client: HostClient;

    /// Opens a client connection.  The returned client may carry a different
    /// name than requested; see [`OpenStatus::name_not_unique`].
    fn open(
        &self,
        client_name: &str,
        options: &OpenOptions,
    ) -> Result<(Self::Client, OpenStatus), PassthruError>;
}

/// An opened, not yet active, client
pub trait HostClient {
    type Input: Send + 'static;
    type Output: Send + 'static;
    type Active: ActiveHost;

    /// name the daemon assigned to this client
    fn name(&self) -> &str;
    fn sample_rate(&self) -> usize;
    fn buffer_size(&self) -> u32;
    fn register_input(&self, port_name: &str) -> Result<Self::Input, PassthruError>;
    fn register_output(&self, port_name: &str) -> Result<Self::Output, PassthruError>;

    /// Hands the ports and processor to the daemon and starts the callbacks.
    /// A daemon shutdown is reported on `events`.
    fn activate(
        self,
        ports: PortSet<Self::Input, Self::Output>,
        processor: Box<dyn AudioProcessor>,
        events: mpsc::Sender<Termination>,
    ) -> Result<Self::Active, PassthruError>;
}

/// A client whose callbacks are running
#[cfg_attr(test, automock)]
pub trait ActiveHost {
    /// Connects two ports by full name
    fn connect(&self, source: &str, destination: &str) -> Result<(), PassthruError>;
    /// Deactivates and closes the client
    fn close(self) -> Result<(), PassthruError>;
    /// Lets go of the handle without talking to the daemon.  Used after the
    /// daemon has already dropped the client.
    fn abandon(self);
}
