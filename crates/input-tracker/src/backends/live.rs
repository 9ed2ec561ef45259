//! Live capture from Linux input devices via evdev.
//!
//! One reader thread per keyboard or pointer device pushes raw events into
//! a channel; `poll` drains it and turns raw events into recorded ones.

use std::os::unix::fs::MetadataExt;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Instant;

use evdev::{Device, InputEvent, InputEventKind, Key, RelativeAxisType};
use guirecord_common::clock::GapClock;
use guirecord_common::error::{RecorderError, RecorderResult};
use guirecord_event_model::{ButtonState, RecordedEvent};

use super::keymap::{button_index, keysym};
use crate::InputBackend;

const INPUT_DIR: &str = "/dev/input";

/// Raw event stamped when it was read.
struct RawInput {
    at: Instant,
    event: InputEvent,
}

pub struct EvdevBackend {
    receiver: Receiver<RawInput>,
    clock: GapClock,
    devices: usize,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    moved: bool,
    disconnected: bool,
}

impl EvdevBackend {
    /// Open every readable keyboard and relative pointer device.
    pub fn open(screen_width: u32, screen_height: u32) -> RecorderResult<Self> {
        let (sender, receiver) = mpsc::channel();
        let mut devices = 0;

        for (path, mut device) in evdev::enumerate() {
            if !is_keyboard(&device) && !is_pointer(&device) {
                continue;
            }
            let name = device.name().unwrap_or("unnamed").to_string();
            tracing::debug!(path = %path.display(), device = %name, "Listening on input device");

            let sender = sender.clone();
            thread::Builder::new()
                .name(format!("evdev-{}", path.display()))
                .spawn(move || loop {
                    let events: Vec<InputEvent> = match device.fetch_events() {
                        Ok(events) => events.collect(),
                        Err(e) => {
                            tracing::warn!(device = %name, error = %e, "Input device read failed");
                            return;
                        }
                    };
                    let at = Instant::now();
                    for event in events {
                        if sender.send(RawInput { at, event }).is_err() {
                            return;
                        }
                    }
                })?;
            devices += 1;
        }

        if devices == 0 {
            return Err(RecorderError::permission_denied(format!(
                "No readable keyboard or pointer devices. {}",
                input_device_diagnostic()
            )));
        }

        let width = screen_width.max(1) as i32;
        let height = screen_height.max(1) as i32;

        Ok(Self {
            receiver,
            clock: GapClock::start(),
            devices,
            x: width / 2,
            y: height / 2,
            width,
            height,
            moved: false,
            disconnected: false,
        })
    }

    /// Number of devices being read.
    pub fn device_count(&self) -> usize {
        self.devices
    }

    fn translate(&mut self, raw: RawInput) -> Option<RecordedEvent> {
        match raw.event.kind() {
            InputEventKind::Key(key) => {
                let state = match raw.event.value() {
                    0 => ButtonState::Up,
                    1 => ButtonState::Down,
                    // autorepeat
                    _ => return None,
                };
                let delay = self.clock.lap_ms(raw.at);
                Some(match button_index(key) {
                    Some(button) => RecordedEvent::mouse_button(delay, button, state),
                    None => RecordedEvent::key(delay, keysym(key), state),
                })
            }
            InputEventKind::RelAxis(axis) => {
                let value = raw.event.value();
                if axis == RelativeAxisType::REL_X {
                    self.x = (self.x + value).clamp(0, self.width - 1);
                    self.moved = true;
                } else if axis == RelativeAxisType::REL_Y {
                    self.y = (self.y + value).clamp(0, self.height - 1);
                    self.moved = true;
                }
                None
            }
            InputEventKind::Synchronization(_) if self.moved => {
                self.moved = false;
                let delay = self.clock.lap_ms(raw.at);
                Some(RecordedEvent::mouse_move(delay, self.x, self.y))
            }
            _ => None,
        }
    }
}

impl InputBackend for EvdevBackend {
    fn poll(&mut self) -> RecorderResult<Option<RecordedEvent>> {
        loop {
            match self.receiver.try_recv() {
                Ok(raw) => {
                    if let Some(event) = self.translate(raw) {
                        return Ok(Some(event));
                    }
                }
                Err(TryRecvError::Empty) => return Ok(None),
                Err(TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        self.disconnected = true;
                        tracing::warn!("All input devices closed");
                    }
                    return Ok(None);
                }
            }
        }
    }

    fn name(&self) -> &str {
        "evdev"
    }

    fn is_available(&self) -> bool {
        !self.disconnected
    }

    fn is_exhausted(&self) -> bool {
        self.disconnected
    }
}

fn is_keyboard(device: &Device) -> bool {
    device
        .supported_keys()
        .map_or(false, |keys| keys.contains(Key::KEY_ENTER))
}

fn is_pointer(device: &Device) -> bool {
    let relative = device
        .supported_relative_axes()
        .map_or(false, |axes| axes.contains(RelativeAxisType::REL_X));
    let buttons = device
        .supported_keys()
        .map_or(false, |keys| keys.contains(Key::BTN_LEFT));
    relative && buttons
}

fn input_device_diagnostic() -> String {
    let uid = unsafe { libc::geteuid() };
    let gid = unsafe { libc::getegid() };

    match std::fs::metadata(INPUT_DIR) {
        Ok(meta) => {
            let mode = meta.mode() & 0o777;
            format!(
                "dir={INPUT_DIR} mode={mode:o} process_uid={uid} process_gid={gid}; likely missing 'input' group membership. Fix: sudo usermod -aG input $USER && log out/in"
            )
        }
        Err(err) => format!(
            "dir={INPUT_DIR} unavailable ({err}); ensure kernel input devices exist and permissions allow read access"
        ),
    }
}
