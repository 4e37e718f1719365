//! Fatal conditions for the passthru client.
//!
//! Nothing here is recoverable.  Each variant names the step that failed so the
//! diagnostic on stderr says what went wrong, and all of them map to the same
//! process exit code.
use std::{error::Error, fmt};

/// exit status used for every fatal path
pub const EXIT_FAILURE: u8 = 1;

#[derive(Debug)]
pub enum PassthruError {
    /// The daemon could not be opened.  `server_unreachable` is set when the
    /// daemon reported that it could not talk to (or start) the server.
    ConnectionFailed {
        status: u32,
        server_unreachable: bool,
        detail: String,
    },
    /// A port could not be registered, usually because the daemon ran out of ports
    PortExhausted { port: String, detail: String },
    /// The daemon refused to activate the client
    ActivationFailed(String),
    /// The daemon shut down or kicked the client out after activation
    ForcedDisconnect(String),
    /// Two ports could not be connected
    ConnectFailed {
        source: String,
        destination: String,
        detail: String,
    },
    /// Deactivating or closing the client failed during a graceful shutdown
    CloseFailed(String),
}

impl PassthruError {
    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }

    pub fn is_server_unreachable(&self) -> bool {
        matches!(
            self,
            PassthruError::ConnectionFailed {
                server_unreachable: true,
                ..
            }
        )
    }
}

impl fmt::Display for PassthruError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PassthruError::ConnectionFailed {
                status,
                server_unreachable: true,
                ..
            } => write!(
                f,
                "client open failed, status = 0x{:02x}: unable to connect to JACK server",
                status
            ),
            PassthruError::ConnectionFailed { status, detail, .. } => {
                write!(f, "client open failed, status = 0x{:02x}: {}", status, detail)
            }
            PassthruError::PortExhausted { port, detail } => {
                write!(f, "no more JACK ports available (registering {}: {})", port, detail)
            }
            PassthruError::ActivationFailed(detail) => {
                write!(f, "cannot activate client: {}", detail)
            }
            PassthruError::ForcedDisconnect(reason) => {
                write!(f, "JACK server disconnected the client: {}", reason)
            }
            PassthruError::ConnectFailed {
                source,
                destination,
                detail,
            } => write!(f, "cannot connect {} to {}: {}", source, destination, detail),
            PassthruError::CloseFailed(detail) => {
                write!(f, "cannot close client: {}", detail)
            }
        }
    }
}

impl Error for PassthruError {}
