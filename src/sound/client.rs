//! top level entry point called by main to run the passthru client
//!
//! [`run`] opens a jack client, registers the port pairs, activates the
//! [`PassThrough`] processor and then blocks until the process is interrupted
//! or the jack server drops the client.  It only returns on one of those two
//! events (or on a startup failure).
//!
//! The startup itself lives in [`start`], which works against any
//! [`AudioHost`] so it can be driven by a fake daemon in tests.
use log::{debug, error, info, warn};
use std::{fmt, sync::mpsc};

use super::{
    host::{ActiveHost, AudioHost, HostClient, OpenOptions, Termination},
    jack_thread::JackHost,
    passthrough::PassThrough,
    port_set::{self, Direction},
};
use crate::common::{config::ClientConfig, error::PassthruError};

/// Where a client is in its life.  There is no way back to an earlier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientState {
    Unopened,
    Opened,
    PortsRegistered,
    Active,
    Terminated,
    Disconnected,
}

impl fmt::Display for ClientState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A running client.  Holds the active daemon handle and the channel that
/// signal and shutdown handlers report on.
pub struct Session<A: ActiveHost> {
    active: A,
    name: String,
    pairs: usize,
    state: ClientState,
    events_tx: mpsc::Sender<Termination>,
    events_rx: mpsc::Receiver<Termination>,
}

impl<A: ActiveHost> Session<A> {
    /// name the daemon assigned to the client
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pairs(&self) -> usize {
        self.pairs
    }

    pub fn state(&self) -> ClientState {
        self.state
    }

    /// A sender that ends the session when something is sent on it
    pub fn terminator(&self) -> mpsc::Sender<Termination> {
        self.events_tx.clone()
    }

    /// Blocks until the session is told to end and returns why
    pub fn wait(&mut self) -> Termination {
        let reason = match self.events_rx.recv() {
            Ok(reason) => reason,
            Err(_) => Termination::Disconnected(String::from("event channel closed")),
        };
        self.state = match reason {
            Termination::Interrupted => ClientState::Terminated,
            Termination::Disconnected(_) => ClientState::Disconnected,
        };
        reason
    }

    /// Deactivates and closes the client
    pub fn close(self) -> Result<(), PassthruError> {
        debug!("closing client {}", self.name);
        self.active.close()
    }

    /// Drops the client handle without talking to the daemon
    pub fn abandon(self) {
        self.active.abandon();
    }
}

/// Runs the startup sequence: open, register ports, activate.
///
/// Any failure aborts before the next step; in particular a failed port
/// registration means the client is never activated.
pub fn start<H: AudioHost>(
    host: &H,
    config: &ClientConfig,
) -> Result<Session<<H::Client as HostClient>::Active>, PassthruError> {
    let mut state = ClientState::Unopened;
    debug!("client::start - state {}", state);

    let options = OpenOptions {
        start_server: config.start_server(),
    };
    let (client, status) = host.open(config.name(), &options)?;
    state = ClientState::Opened;
    if status.server_started {
        info!("JACK server started");
    }
    let name = String::from(client.name());
    if status.name_not_unique {
        warn!("unique name `{}' assigned", name);
    }
    debug!("client::start - state {}, status 0x{:02x}", state, status.bits);

    info!("engine sample rate: {}", client.sample_rate());
    info!("engine buffer size: {}", client.buffer_size());

    let ports = port_set::register_pairs(&client, config.ports())?;
    state = ClientState::PortsRegistered;
    let pairs = ports.len();
    debug!("client::start - state {}, {} pairs", state, pairs);

    let (events_tx, events_rx) = mpsc::channel();
    let active = client.activate(ports, Box::new(PassThrough::new()), events_tx.clone())?;
    state = ClientState::Active;
    info!("client {} active with {} port pairs", name, pairs);

    if config.connect_system() {
        connect_system_ports(&active, &name, pairs);
    }

    Ok(Session {
        active,
        name,
        pairs,
        state,
        events_tx,
        events_rx,
    })
}

/// Wires system capture ports to our inputs and our outputs to system playback.
/// Missing hardware ports only produce a warning.
pub fn connect_system_ports<A: ActiveHost>(active: &A, name: &str, pairs: usize) {
    for index in 0..pairs {
        let capture = format!("system:capture_{}", index + 1);
        let input = port_set::full_port_name(name, Direction::Input, index);
        if let Err(e) = active.connect(&capture, &input) {
            warn!("could not connect {} to {}: {}", capture, input, e);
        }
        let output = port_set::full_port_name(name, Direction::Output, index);
        let playback = format!("system:playback_{}", index + 1);
        if let Err(e) = active.connect(&output, &playback) {
            warn!("could not connect {} to {}: {}", output, playback, e);
        }
    }
}

/// Waits for the session to end and cleans up.
///
/// An interrupt closes the client and returns `Ok`.  A server disconnect
/// leaves the handle alone (the server already dropped it) and returns
/// [`PassthruError::ForcedDisconnect`].
pub fn wait_and_close<A: ActiveHost>(mut session: Session<A>) -> Result<(), PassthruError> {
    match session.wait() {
        Termination::Interrupted => {
            info!("interrupted, closing client {}", session.name());
            session.close()
        }
        Termination::Disconnected(reason) => {
            error!("client {} was disconnected: {}", session.name(), reason);
            session.abandon();
            Err(PassthruError::ForcedDisconnect(reason))
        }
    }
}

/// Sends [`Termination::Interrupted`] on `terminator` when the process gets
/// SIGINT or SIGTERM.  Can only be installed once per process.
pub fn install_signal_handler(
    terminator: mpsc::Sender<Termination>,
) -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(move || {
        let _res = terminator.send(Termination::Interrupted);
    })
}

/// This is the entry point for the passthru client.
///
/// Call this from main.  It blocks for as long as the client is running.
pub fn run(config: &ClientConfig) -> Result<(), PassthruError> {
    info!("client - starting run function");
    let session = start(&JackHost, config)?;

    if let Err(e) = install_signal_handler(session.terminator()) {
        warn!("could not install signal handler: {}", e);
    }

    debug!("client::run - setup complete, waiting for termination");
    wait_and_close(session)
}
