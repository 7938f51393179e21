//! MIDI transport boundary.
//!
//! The session only talks to ports through [`InputPort`] and [`OutputPort`].
//! [`MidirInput`] and [`MidirOutput`] back them with system MIDI ports.

use midir::{MidiInput, MidiInputConnection, MidiOutput, MidiOutputConnection};

use crate::error::TransportError;

/// Callback invoked with the raw bytes of every inbound message.
pub type InboundListener = Box<dyn FnMut(&[u8]) + Send + 'static>;

/// Port name used for the input connection.
const INPUT_CONNECTION_NAME: &str = "padlink-input";
/// Port name used for the output connection.
const OUTPUT_CONNECTION_NAME: &str = "padlink-output";

/// Receiving side of a MIDI transport.
pub trait InputPort: Send {
    /// Names of the available ports, indexed by port number.
    fn port_names(&self) -> Vec<String>;

    /// Open a port and deliver every inbound message to `listener`.
    fn open_port(&mut self, index: usize, listener: InboundListener)
        -> Result<(), TransportError>;

    /// Close the port and drop the listener. Does nothing if not open.
    fn close_port(&mut self);
}

/// Sending side of a MIDI transport.
pub trait OutputPort: Send {
    /// Names of the available ports, indexed by port number.
    fn port_names(&self) -> Vec<String>;

    fn open_port(&mut self, index: usize) -> Result<(), TransportError>;

    /// Close the port. Does nothing if not open.
    fn close_port(&mut self);

    fn send_message(&mut self, message: &[u8]) -> Result<(), TransportError>;
}

/// System MIDI input via `midir`.
///
/// `midir` consumes the client on connect and hands it back on close, so
/// exactly one of `client` and `connection` is populated at any time.
pub struct MidirInput {
    client: Option<MidiInput>,
    connection: Option<MidiInputConnection<()>>,
}

impl MidirInput {
    pub fn new(client_name: &str) -> Result<Self, TransportError> {
        let client = MidiInput::new(client_name)?;
        Ok(Self {
            client: Some(client),
            connection: None,
        })
    }
}

impl InputPort for MidirInput {
    fn port_names(&self) -> Vec<String> {
        match &self.client {
            Some(client) => client
                .ports()
                .iter()
                .map(|port| client.port_name(port).unwrap_or_default())
                .collect(),
            None => Vec::new(),
        }
    }

    fn open_port(
        &mut self,
        index: usize,
        mut listener: InboundListener,
    ) -> Result<(), TransportError> {
        let client = self.client.take().ok_or(TransportError::AlreadyOpen)?;

        let port = client.ports().get(index).cloned();
        let port = match port {
            Some(port) => port,
            None => {
                self.client = Some(client);
                return Err(TransportError::InvalidPort(index));
            }
        };

        match client.connect(
            &port,
            INPUT_CONNECTION_NAME,
            move |_timestamp, message, _| listener(message),
            (),
        ) {
            Ok(connection) => {
                self.connection = Some(connection);
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                self.client = Some(e.into_inner());
                Err(TransportError::Connect(reason))
            }
        }
    }

    fn close_port(&mut self) {
        if let Some(connection) = self.connection.take() {
            let (client, ()) = connection.close();
            self.client = Some(client);
        }
    }
}

/// System MIDI output via `midir`.
pub struct MidirOutput {
    client: Option<MidiOutput>,
    connection: Option<MidiOutputConnection>,
}

impl MidirOutput {
    pub fn new(client_name: &str) -> Result<Self, TransportError> {
        let client = MidiOutput::new(client_name)?;
        Ok(Self {
            client: Some(client),
            connection: None,
        })
    }
}

impl OutputPort for MidirOutput {
    fn port_names(&self) -> Vec<String> {
        match &self.client {
            Some(client) => client
                .ports()
                .iter()
                .map(|port| client.port_name(port).unwrap_or_default())
                .collect(),
            None => Vec::new(),
        }
    }

    fn open_port(&mut self, index: usize) -> Result<(), TransportError> {
        let client = self.client.take().ok_or(TransportError::AlreadyOpen)?;

        let port = client.ports().get(index).cloned();
        let port = match port {
            Some(port) => port,
            None => {
                self.client = Some(client);
                return Err(TransportError::InvalidPort(index));
            }
        };

        match client.connect(&port, OUTPUT_CONNECTION_NAME) {
            Ok(connection) => {
                self.connection = Some(connection);
                Ok(())
            }
            Err(e) => {
                let reason = e.to_string();
                self.client = Some(e.into_inner());
                Err(TransportError::Connect(reason))
            }
        }
    }

    fn close_port(&mut self) {
        if let Some(connection) = self.connection.take() {
            self.client = Some(connection.close());
        }
    }

    fn send_message(&mut self, message: &[u8]) -> Result<(), TransportError> {
        let connection = self.connection.as_mut().ok_or(TransportError::NotOpen)?;
        connection
            .send(message)
            .map_err(|e| TransportError::Send(e.to_string()))
    }
}

/// Index of the first port whose name contains `device_name`.
pub fn find_port(port_names: &[String], device_name: &str) -> Option<usize> {
    port_names.iter().position(|name| name.contains(device_name))
}
