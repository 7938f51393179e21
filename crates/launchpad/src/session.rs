//! Launchpad session.
//!
//! Owns the input and output ports, decodes inbound messages into key events
//! and encodes LED updates. The codec itself lives in `padlink-core`; this is
//! the stateful wrapper around it.

use padlink_core::{
    decode, encode, Button, Color, Intensity, KeyPressEvent, MidiMessage, PadEvent, RESET,
};
use parking_lot::Mutex;
use tokio::sync::broadcast;

use crate::config::LaunchpadConfig;
use crate::error::SessionError;
use crate::transport::{find_port, InboundListener, InputPort, MidirInput, MidirOutput, OutputPort};

/// Events published by a [`Launchpad`] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Connected,
    Disconnected,
    /// Every key press or release
    Key(KeyPressEvent),
    /// Button pressed
    Down(Button),
    /// Button released
    Up(Button),
}

impl From<PadEvent> for SessionEvent {
    fn from(event: PadEvent) -> Self {
        match event {
            PadEvent::Key(key) => SessionEvent::Key(key),
            PadEvent::Down(button) => SessionEvent::Down(button),
            PadEvent::Up(button) => SessionEvent::Up(button),
        }
    }
}

/// Port pair plus connection flag, guarded together.
struct Ports<I, O> {
    input: I,
    output: O,
    connected: bool,
}

/// A session with one Launchpad.
///
/// All methods take `&self`, so a session can be shared behind an `Arc` and
/// driven from several tasks. At most one connection is live at a time.
pub struct Launchpad<I: InputPort, O: OutputPort> {
    config: LaunchpadConfig,
    ports: Mutex<Ports<I, O>>,
    events: broadcast::Sender<SessionEvent>,
}

impl Launchpad<MidirInput, MidirOutput> {
    /// Create a session on the system MIDI ports, connecting if
    /// `config.autostart` is set.
    pub fn open(config: LaunchpadConfig) -> Result<Self, SessionError> {
        let input = MidirInput::new(&format!("{}_in", config.client_name))?;
        let output = MidirOutput::new(&format!("{}_out", config.client_name))?;
        Self::start(input, output, config)
    }
}

impl<I: InputPort, O: OutputPort> Launchpad<I, O> {
    /// Create a disconnected session.
    pub fn new(input: I, output: O, config: LaunchpadConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            config,
            ports: Mutex::new(Ports {
                input,
                output,
                connected: false,
            }),
            events,
        }
    }

    /// Create a session and connect if `config.autostart` is set.
    pub fn start(input: I, output: O, config: LaunchpadConfig) -> Result<Self, SessionError> {
        let launchpad = Self::new(input, output, config);
        if launchpad.config.autostart {
            launchpad.connect(None)?;
        }
        Ok(launchpad)
    }

    /// Subscribe to session events.
    ///
    /// Receivers only see events published after they subscribe.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &LaunchpadConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.ports.lock().connected
    }

    /// Open the input and output ports.
    ///
    /// `port` overrides `config.port`; with neither set, the first port whose
    /// name contains `config.device_name` is used on each side.
    pub fn connect(&self, port: Option<usize>) -> Result<(), SessionError> {
        let mut ports = self.ports.lock();
        if ports.connected {
            return Err(SessionError::AlreadyConnected);
        }

        let requested = port.or(self.config.port);
        let input_index = self.resolve_port(requested, &ports.input.port_names())?;
        let output_index = self.resolve_port(requested, &ports.output.port_names())?;

        ports
            .input
            .open_port(input_index, inbound_listener(self.events.clone()))?;

        if let Err(e) = ports.output.open_port(output_index) {
            ports.input.close_port();
            return Err(e.into());
        }

        ports.connected = true;
        drop(ports);

        tracing::info!(input_index, output_index, "Launchpad connected");
        self.publish(SessionEvent::Connected);
        Ok(())
    }

    /// Close both ports and stop listening for input.
    pub fn disconnect(&self) -> Result<(), SessionError> {
        let mut ports = self.ports.lock();
        if !ports.connected {
            return Err(SessionError::NotConnected);
        }

        ports.input.close_port();
        ports.output.close_port();
        ports.connected = false;
        drop(ports);

        tracing::info!("Launchpad disconnected");
        self.publish(SessionEvent::Disconnected);
        Ok(())
    }

    /// Turn every LED off. Does nothing while disconnected.
    pub fn reset(&self) -> Result<(), SessionError> {
        self.send(RESET)
    }

    /// Light a button. Does nothing while disconnected.
    pub fn set_color(
        &self,
        button: Button,
        color: Color,
        intensity: Intensity,
    ) -> Result<(), SessionError> {
        self.send(encode(button, color, intensity))
    }

    fn send(&self, message: MidiMessage) -> Result<(), SessionError> {
        let mut ports = self.ports.lock();
        if !ports.connected {
            tracing::trace!(?message, "Not connected, message dropped");
            return Ok(());
        }
        ports.output.send_message(&message.to_bytes())?;
        Ok(())
    }

    fn resolve_port(
        &self,
        requested: Option<usize>,
        port_names: &[String],
    ) -> Result<usize, SessionError> {
        if let Some(index) = requested {
            return Ok(index);
        }

        find_port(port_names, &self.config.device_name).ok_or_else(|| {
            tracing::warn!(
                "No MIDI port matching '{}' in {:?}",
                self.config.device_name,
                port_names
            );
            SessionError::DeviceNotFound(self.config.device_name.clone())
        })
    }

    fn publish(&self, event: SessionEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

impl<I: InputPort, O: OutputPort> Drop for Launchpad<I, O> {
    fn drop(&mut self) {
        let ports = self.ports.get_mut();
        if ports.connected {
            ports.input.close_port();
            ports.output.close_port();
            ports.connected = false;
        }
    }
}

/// Decode each inbound message and publish its events before returning, so
/// events keep the order the device sent them in.
fn inbound_listener(events: broadcast::Sender<SessionEvent>) -> InboundListener {
    Box::new(move |bytes: &[u8]| {
        let event = match MidiMessage::try_from(bytes).and_then(decode) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Dropping inbound message {:?}: {}", bytes, e);
                return;
            }
        };

        tracing::debug!(button = ?event.button, state = %event.state, "Key event");

        for pad_event in event.events() {
            let _ = events.send(pad_event.into());
        }
    })
}
