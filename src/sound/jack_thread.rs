//! JACK binding for the passthru client.
//!
//! [`JackHost`] opens real clients through the `jack` crate.  The process
//! callback wraps the port set and the jack `ProcessScope` in a
//! [`ProcessCycle`] and hands it to the processor.  The notification handler
//! turns a server shutdown into a [`Termination::Disconnected`] event.
use jack;
use log::{debug, info, warn};
use std::sync::mpsc;

use super::host::{ActiveHost, AudioHost, HostClient, OpenOptions, OpenStatus, Termination};
use super::port_set::PortSet;
use super::{AudioProcessor, Control, ProcessCycle};
use crate::common::error::PassthruError;

type JackPorts = PortSet<jack::Port<jack::AudioIn>, jack::Port<jack::AudioOut>>;

impl From<Control> for jack::Control {
    fn from(control: Control) -> jack::Control {
        match control {
            Control::Continue => jack::Control::Continue,
            Control::Quit => jack::Control::Quit,
        }
    }
}

fn open_status(status: jack::ClientStatus) -> OpenStatus {
    OpenStatus {
        bits: status.bits() as u32,
        server_started: status.contains(jack::ClientStatus::SERVER_STARTED),
        name_not_unique: status.contains(jack::ClientStatus::NAME_NOT_UNIQUE),
        server_failed: status.contains(jack::ClientStatus::SERVER_FAILED),
    }
}

/// Host backed by the JACK library
#[derive(Debug, Default, Clone, Copy)]
pub struct JackHost;

impl AudioHost for JackHost {
    type Client = JackClient;

    fn open(
        &self,
        client_name: &str,
        options: &OpenOptions,
    ) -> Result<(JackClient, OpenStatus), PassthruError> {
        let mut flags = jack::ClientOptions::empty();
        if !options.start_server {
            flags |= jack::ClientOptions::NO_START_SERVER;
        }
        match jack::Client::new(client_name, flags) {
            Ok((client, status)) => Ok((JackClient { client }, open_status(status))),
            Err(jack::Error::ClientError(status)) => {
                let status = open_status(status);
                Err(PassthruError::ConnectionFailed {
                    status: status.bits,
                    server_unreachable: status.server_failed,
                    detail: String::from("jack_client_open() failed"),
                })
            }
            Err(e) => Err(PassthruError::ConnectionFailed {
                status: 0,
                server_unreachable: false,
                detail: e.to_string(),
            }),
        }
    }
}

pub struct JackClient {
    client: jack::Client,
}

impl HostClient for JackClient {
    type Input = jack::Port<jack::AudioIn>;
    type Output = jack::Port<jack::AudioOut>;
    type Active = JackActive;

    fn name(&self) -> &str {
        self.client.name()
    }

    fn sample_rate(&self) -> usize {
        self.client.sample_rate()
    }

    fn buffer_size(&self) -> u32 {
        self.client.buffer_size()
    }

    fn register_input(&self, port_name: &str) -> Result<Self::Input, PassthruError> {
        self.client
            .register_port(port_name, jack::AudioIn::default())
            .map_err(|e| PassthruError::PortExhausted {
                port: String::from(port_name),
                detail: e.to_string(),
            })
    }

    fn register_output(&self, port_name: &str) -> Result<Self::Output, PassthruError> {
        self.client
            .register_port(port_name, jack::AudioOut::default())
            .map_err(|e| PassthruError::PortExhausted {
                port: String::from(port_name),
                detail: e.to_string(),
            })
    }

    fn activate(
        self,
        ports: JackPorts,
        processor: Box<dyn AudioProcessor>,
        events: mpsc::Sender<Termination>,
    ) -> Result<JackActive, PassthruError> {
        let process = JackProcess { ports, processor };
        let active = self
            .client
            .activate_async(Notifications { events }, process)
            .map_err(|e| PassthruError::ActivationFailed(e.to_string()))?;
        Ok(JackActive { active })
    }
}

pub struct JackActive {
    active: jack::AsyncClient<Notifications, JackProcess>,
}

impl ActiveHost for JackActive {
    fn connect(&self, source: &str, destination: &str) -> Result<(), PassthruError> {
        self.active
            .as_client()
            .connect_ports_by_name(source, destination)
            .map_err(|e| PassthruError::ConnectFailed {
                source: String::from(source),
                destination: String::from(destination),
                detail: e.to_string(),
            })
    }

    fn close(self) -> Result<(), PassthruError> {
        // dropping the returned client closes it
        self.active
            .deactivate()
            .map_err(|e| PassthruError::CloseFailed(format!("deactivate: {}", e)))?;
        Ok(())
    }

    fn abandon(self) {
        // the server is gone, deactivating would call into a dead connection
        std::mem::forget(self.active);
    }
}

/// Process handler registered with jack
struct JackProcess {
    ports: JackPorts,
    processor: Box<dyn AudioProcessor>,
}

impl jack::ProcessHandler for JackProcess {
    fn process(&mut self, _: &jack::Client, ps: &jack::ProcessScope) -> jack::Control {
        let mut cycle = JackCycle {
            ports: &mut self.ports,
            scope: ps,
        };
        self.processor.process(&mut cycle).into()
    }
}

/// Buffers of one jack cycle
struct JackCycle<'a> {
    ports: &'a mut JackPorts,
    scope: &'a jack::ProcessScope,
}

impl ProcessCycle for JackCycle<'_> {
    fn frames(&self) -> usize {
        self.scope.n_frames() as usize
    }

    fn pairs(&self) -> usize {
        self.ports.len()
    }

    fn pair(&mut self, index: usize) -> Option<(&[f32], &mut [f32])> {
        let scope = self.scope;
        let pair = self.ports.get_mut(index)?;
        Some((pair.input.as_slice(scope), pair.output.as_mut_slice(scope)))
    }
}

struct Notifications {
    events: mpsc::Sender<Termination>,
}

impl jack::NotificationHandler for Notifications {
    fn thread_init(&self, _: &jack::Client) {
        debug!("JACK: thread init");
    }

    fn shutdown(&mut self, status: jack::ClientStatus, reason: &str) {
        warn!(
            "JACK: shutdown with status {:?} because \"{}\"",
            status, reason
        );
        let _res = self
            .events
            .send(Termination::Disconnected(String::from(reason)));
    }

    fn sample_rate(&mut self, _: &jack::Client, srate: jack::Frames) -> jack::Control {
        info!("JACK: sample rate changed to {}", srate);
        jack::Control::Continue
    }

    fn xrun(&mut self, _: &jack::Client) -> jack::Control {
        warn!("JACK: xrun occurred");
        jack::Control::Continue
    }
}

#[cfg(test)]
mod test_jack_thread {
    use super::*;

    #[test]
    fn server_failed_flag_marks_server_unreachable() {
        let status = open_status(jack::ClientStatus::SERVER_FAILED | jack::ClientStatus::FAILURE);
        assert!(status.server_failed);
        assert!(!status.server_started);
        assert!(!status.name_not_unique);
        assert_eq!(status.bits, 0x11);
    }

    #[test]
    fn informational_flags_are_mapped() {
        let status =
            open_status(jack::ClientStatus::SERVER_STARTED | jack::ClientStatus::NAME_NOT_UNIQUE);
        assert!(status.server_started);
        assert!(status.name_not_unique);
        assert!(!status.server_failed);
        assert_eq!(status.bits, 0x08 | 0x04);
    }

    #[test]
    fn control_maps_to_jack() {
        assert_eq!(jack::Control::from(Control::Continue), jack::Control::Continue);
        assert_eq!(jack::Control::from(Control::Quit), jack::Control::Quit);
    }
}
