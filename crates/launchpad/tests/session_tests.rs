use std::sync::Arc;

use padlink_launchpad::{
    Button, ButtonType, Color, InboundListener, InputPort, Intensity, KeyPressEvent, KeyState,
    Launchpad, LaunchpadConfig, OutputPort, SessionError, SessionEvent, TransportError,
};
use parking_lot::Mutex;
use tokio::sync::broadcast::error::TryRecvError;

const PORT_NAMES: [&str; 2] = ["Midi Through Port-0", "Launchpad S MIDI 1"];

/// Input port that lets the test play the part of the device.
#[derive(Clone, Default)]
struct FakeInput {
    listener: Arc<Mutex<Option<InboundListener>>>,
    opened: Arc<Mutex<Vec<usize>>>,
}

impl FakeInput {
    fn press(&self, bytes: &[u8]) {
        let mut listener = self.listener.lock();
        let listener = listener.as_mut().expect("input port not open");
        listener(bytes);
    }

    fn is_open(&self) -> bool {
        self.listener.lock().is_some()
    }
}

impl InputPort for FakeInput {
    fn port_names(&self) -> Vec<String> {
        PORT_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn open_port(
        &mut self,
        index: usize,
        listener: InboundListener,
    ) -> Result<(), TransportError> {
        if index >= PORT_NAMES.len() {
            return Err(TransportError::InvalidPort(index));
        }
        self.opened.lock().push(index);
        *self.listener.lock() = Some(listener);
        Ok(())
    }

    fn close_port(&mut self) {
        *self.listener.lock() = None;
    }
}

/// Output port that records everything sent to it.
#[derive(Clone, Default)]
struct FakeOutput {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
    open: Arc<Mutex<Option<usize>>>,
    fail_open: bool,
}

impl FakeOutput {
    fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().clone()
    }
}

impl OutputPort for FakeOutput {
    fn port_names(&self) -> Vec<String> {
        PORT_NAMES.iter().map(|name| name.to_string()).collect()
    }

    fn open_port(&mut self, index: usize) -> Result<(), TransportError> {
        if self.fail_open {
            return Err(TransportError::Connect("port busy".to_string()));
        }
        *self.open.lock() = Some(index);
        Ok(())
    }

    fn close_port(&mut self) {
        *self.open.lock() = None;
    }

    fn send_message(&mut self, message: &[u8]) -> Result<(), TransportError> {
        if self.open.lock().is_none() {
            return Err(TransportError::NotOpen);
        }
        self.sent.lock().push(message.to_vec());
        Ok(())
    }
}

fn manual_config() -> LaunchpadConfig {
    LaunchpadConfig {
        autostart: false,
        ..LaunchpadConfig::default()
    }
}

fn session() -> (Launchpad<FakeInput, FakeOutput>, FakeInput, FakeOutput) {
    let input = FakeInput::default();
    let output = FakeOutput::default();
    let launchpad = Launchpad::new(input.clone(), output.clone(), manual_config());
    (launchpad, input, output)
}

#[test]
fn test_connect_finds_device_by_name() {
    let (launchpad, input, output) = session();
    let mut events = launchpad.subscribe();

    launchpad.connect(None).unwrap();

    assert!(launchpad.is_connected());
    assert_eq!(*input.opened.lock(), vec![1]);
    assert_eq!(*output.open.lock(), Some(1));
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Connected);
}

#[test]
fn test_connect_with_explicit_port() {
    let (launchpad, input, output) = session();

    launchpad.connect(Some(0)).unwrap();

    assert_eq!(*input.opened.lock(), vec![0]);
    assert_eq!(*output.open.lock(), Some(0));
}

#[test]
fn test_connect_without_matching_device() {
    let config = LaunchpadConfig {
        device_name: "Push 2".to_string(),
        ..manual_config()
    };
    let launchpad = Launchpad::new(FakeInput::default(), FakeOutput::default(), config);

    assert!(matches!(
        launchpad.connect(None),
        Err(SessionError::DeviceNotFound(name)) if name == "Push 2"
    ));
    assert!(!launchpad.is_connected());
}

#[test]
fn test_double_connect_fails() {
    let (launchpad, _input, _output) = session();

    launchpad.connect(None).unwrap();
    assert!(matches!(
        launchpad.connect(None),
        Err(SessionError::AlreadyConnected)
    ));
    assert!(launchpad.is_connected());
}

#[test]
fn test_failed_output_closes_input() {
    let input = FakeInput::default();
    let output = FakeOutput {
        fail_open: true,
        ..FakeOutput::default()
    };
    let launchpad = Launchpad::new(input.clone(), output, manual_config());

    assert!(matches!(
        launchpad.connect(None),
        Err(SessionError::Transport(TransportError::Connect(_)))
    ));
    assert!(!input.is_open());
    assert!(!launchpad.is_connected());
}

#[test]
fn test_autostart_connects() {
    let input = FakeInput::default();
    let launchpad =
        Launchpad::start(input.clone(), FakeOutput::default(), LaunchpadConfig::default())
            .unwrap();

    assert!(launchpad.is_connected());
    assert!(input.is_open());
}

#[test]
fn test_key_press_emits_key_then_down() {
    let (launchpad, input, _output) = session();
    launchpad.connect(None).unwrap();
    let mut events = launchpad.subscribe();

    input.press(&[144, 0, 127]);

    let button = Button::grid(0, 0);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Key(KeyPressEvent::new(button, KeyState::Down))
    );
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Down(button));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_key_release_emits_key_then_up() {
    let (launchpad, input, _output) = session();
    launchpad.connect(None).unwrap();
    let mut events = launchpad.subscribe();

    input.press(&[144, 0, 0]);

    let button = Button::grid(0, 0);
    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Key(KeyPressEvent::new(button, KeyState::Up))
    );
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Up(button));
    assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
}

#[test]
fn test_events_keep_device_order() {
    let (launchpad, input, _output) = session();
    launchpad.connect(None).unwrap();
    let mut events = launchpad.subscribe();

    input.press(&[176, 105, 127]);
    input.press(&[144, 0x38, 127]);
    input.press(&[176, 105, 0]);

    let received: Vec<SessionEvent> = std::iter::from_fn(|| events.try_recv().ok()).collect();
    assert_eq!(
        received,
        vec![
            SessionEvent::Key(KeyPressEvent::new(Button::automap(1), KeyState::Down)),
            SessionEvent::Down(Button::automap(1)),
            SessionEvent::Key(KeyPressEvent::new(Button::scene(3), KeyState::Down)),
            SessionEvent::Down(Button::scene(3)),
            SessionEvent::Key(KeyPressEvent::new(Button::automap(1), KeyState::Up)),
            SessionEvent::Up(Button::automap(1)),
        ]
    );
}

#[test]
fn test_unrecognized_status_is_dropped() {
    let (launchpad, input, _output) = session();
    launchpad.connect(None).unwrap();
    let mut events = launchpad.subscribe();

    input.press(&[1, 0, 0]);
    input.press(&[144, 1, 127]);

    assert_eq!(
        events.try_recv().unwrap(),
        SessionEvent::Key(KeyPressEvent::new(Button::grid(1, 0), KeyState::Down))
    );
}

#[test]
fn test_every_subscriber_sees_events() {
    let (launchpad, input, _output) = session();
    launchpad.connect(None).unwrap();
    let mut first = launchpad.subscribe();
    let mut second = launchpad.subscribe();

    input.press(&[144, 8, 127]);

    let expected = SessionEvent::Key(KeyPressEvent::new(Button::scene(0), KeyState::Down));
    assert_eq!(first.try_recv().unwrap(), expected);
    assert_eq!(second.try_recv().unwrap(), expected);
}

#[test]
fn test_set_color_sends_encoded_message() {
    let (launchpad, _input, output) = session();
    launchpad.connect(None).unwrap();

    launchpad
        .set_color(Button::grid(3, 2), Color::Green, Intensity::High)
        .unwrap();
    launchpad
        .set_color(Button::scene(1), Color::Amber, Intensity::Low)
        .unwrap();
    launchpad
        .set_color(Button::new(ButtonType::TOP, 7, 0), Color::Yellow, Intensity::default())
        .unwrap();

    assert_eq!(
        output.sent(),
        vec![vec![144, 35, 48], vec![144, 24, 17], vec![176, 111, 50]]
    );
}

#[test]
fn test_reset_sends_sentinel() {
    let (launchpad, _input, output) = session();
    launchpad.connect(None).unwrap();

    launchpad.reset().unwrap();

    assert_eq!(output.sent(), vec![vec![176, 0, 0]]);
}

#[test]
fn test_output_is_noop_while_disconnected() {
    let (launchpad, _input, output) = session();

    launchpad
        .set_color(Button::grid(0, 0), Color::Red, Intensity::High)
        .unwrap();
    launchpad.reset().unwrap();

    assert!(output.sent().is_empty());
}

#[test]
fn test_disconnect_tears_down_listener() {
    let (launchpad, input, output) = session();
    launchpad.connect(None).unwrap();
    let mut events = launchpad.subscribe();

    launchpad.disconnect().unwrap();

    assert!(!launchpad.is_connected());
    assert!(!input.is_open());
    assert_eq!(*output.open.lock(), None);
    assert_eq!(events.try_recv().unwrap(), SessionEvent::Disconnected);

    assert!(matches!(
        launchpad.disconnect(),
        Err(SessionError::NotConnected)
    ));
}

#[test]
fn test_reconnect_after_disconnect() {
    let (launchpad, input, _output) = session();

    launchpad.connect(None).unwrap();
    launchpad.disconnect().unwrap();
    launchpad.connect(Some(0)).unwrap();

    assert_eq!(*input.opened.lock(), vec![1, 0]);
    assert!(input.is_open());
}

#[test]
fn test_drop_closes_ports() {
    let (launchpad, input, output) = session();
    launchpad.connect(None).unwrap();

    drop(launchpad);

    assert!(!input.is_open());
    assert_eq!(*output.open.lock(), None);
}

#[tokio::test]
async fn test_events_from_another_thread() {
    let (launchpad, input, _output) = session();
    let launchpad = Arc::new(launchpad);
    let mut events = launchpad.subscribe();

    let session = Arc::clone(&launchpad);
    let device = input.clone();
    tokio::task::spawn_blocking(move || {
        session.connect(None).unwrap();
        device.press(&[144, 0x77, 127]);
    })
    .await
    .unwrap();

    assert_eq!(events.recv().await.unwrap(), SessionEvent::Connected);
    assert_eq!(
        events.recv().await.unwrap(),
        SessionEvent::Key(KeyPressEvent::new(Button::grid(7, 7), KeyState::Down))
    );
    let edge = tokio_test::assert_ok!(events.recv().await);
    assert_eq!(edge, SessionEvent::Down(Button::grid(7, 7)));
}
