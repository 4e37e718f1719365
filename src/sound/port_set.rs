//! Port naming and paired registration.
//!
//! Ports are always registered as an input/output pair so the set can never
//! hold more of one direction than the other.  Registration order is the
//! pairing used by the process callback.
use std::fmt;

use log::info;

use super::host::HostClient;
use crate::common::error::PassthruError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Input,
    Output,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Input => write!(f, "input"),
            Direction::Output => write!(f, "output"),
        }
    }
}

/// short port name, e.g. `input_0` or `output_12`
pub fn port_name(direction: Direction, index: usize) -> String {
    format!("{}_{}", direction, index)
}

/// full port name as the daemon knows it, e.g. `thru:input_0`
pub fn full_port_name(client_name: &str, direction: Direction, index: usize) -> String {
    format!("{}:{}", client_name, port_name(direction, index))
}

#[derive(Debug)]
pub struct PortPair<I, O> {
    pub index: usize,
    pub input: I,
    pub output: O,
}

#[derive(Debug)]
pub struct PortSet<I, O> {
    pairs: Vec<PortPair<I, O>>,
}

impl<I, O> PortSet<I, O> {
    pub fn with_capacity(count: usize) -> PortSet<I, O> {
        PortSet {
            pairs: Vec::with_capacity(count),
        }
    }

    /// Adds a pair and returns its index
    pub fn push(&mut self, input: I, output: O) -> usize {
        let index = self.pairs.len();
        self.pairs.push(PortPair {
            index,
            input,
            output,
        });
        index
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PortPair<I, O>> {
        self.pairs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut PortPair<I, O>> {
        self.pairs.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortPair<I, O>> {
        self.pairs.iter()
    }
}

/// Registers `count` pairs on `client`, input then output for each index.
///
/// The first failure aborts.  Ports registered before it are left to the
/// daemon, which drops them when the client goes away.
pub fn register_pairs<C: HostClient>(
    client: &C,
    count: usize,
) -> Result<PortSet<C::Input, C::Output>, PassthruError> {
    let mut ports = PortSet::with_capacity(count);
    for index in 0..count {
        let in_name = port_name(Direction::Input, index);
        let out_name = port_name(Direction::Output, index);
        let input = client.register_input(&in_name)?;
        let output = client.register_output(&out_name)?;
        ports.push(input, output);
        info!("registered pair {}: {} -> {}", index, in_name, out_name);
    }
    Ok(ports)
}
