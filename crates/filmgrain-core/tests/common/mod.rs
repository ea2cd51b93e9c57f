#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::io::Cursor;
use std::rc::Rc;

use filmgrain_core::asset::{DisplayHandle, DisplaySurface, ImageBlob, Slot};
use filmgrain_core::error::{FilmGrainError, Result};
use filmgrain_core::session::ProcessRequest;
use filmgrain_core::transport::Transport;
use image::{ImageFormat, Rgb, RgbImage};

/// Encode a solid-colour RGB image as PNG bytes.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 40, 40]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

pub fn png_blob(name: &str) -> ImageBlob {
    ImageBlob::from_bytes(name, png_bytes(8, 8)).unwrap()
}

/// One surface event, in call order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceEvent {
    Create(Slot, u64),
    Release(u64),
}

#[derive(Debug, Default)]
pub struct SurfaceLog {
    pub events: Vec<SurfaceEvent>,
    pub live: HashSet<u64>,
    /// Slot of every handle ever created.
    pub slots: Vec<(u64, Slot)>,
}

impl SurfaceLog {
    pub fn live_in(&self, slot: Slot) -> usize {
        self.slots
            .iter()
            .filter(|(id, s)| *s == slot && self.live.contains(id))
            .count()
    }
}

/// Display surface that records every create/release and panics on a
/// double release.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub log: Rc<RefCell<SurfaceLog>>,
    next_id: u64,
}

impl RecordingSurface {
    pub fn new() -> (Self, Rc<RefCell<SurfaceLog>>) {
        let surface = Self::default();
        let log = surface.log.clone();
        (surface, log)
    }
}

impl DisplaySurface for RecordingSurface {
    fn create(&mut self, slot: Slot, _blob: &ImageBlob) -> DisplayHandle {
        self.next_id += 1;
        let id = self.next_id;
        let mut log = self.log.borrow_mut();
        assert_eq!(
            log.live_in(slot),
            0,
            "created a {slot} handle while another one was live"
        );
        log.events.push(SurfaceEvent::Create(slot, id));
        log.live.insert(id);
        log.slots.push((id, slot));
        DisplayHandle::new(id)
    }

    fn release(&mut self, handle: DisplayHandle) {
        let mut log = self.log.borrow_mut();
        assert!(log.live.remove(&handle.id()), "double release of {}", handle.id());
        log.events.push(SurfaceEvent::Release(handle.id()));
    }
}

/// A recorded upload: file name, MIME type, byte count and text fields.
#[derive(Clone, Debug)]
pub struct SentRequest {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: usize,
    pub fields: Vec<(String, String)>,
}

impl SentRequest {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport that replays queued outcomes and records what was sent.
#[derive(Default)]
pub struct ScriptedTransport {
    outcomes: RefCell<VecDeque<Result<Vec<u8>>>>,
    pub sent: RefCell<Vec<SentRequest>>,
}

impl ScriptedTransport {
    pub fn succeeding(body: Vec<u8>) -> Self {
        let transport = Self::default();
        transport.push(Ok(body));
        transport
    }

    pub fn failing(status: u16) -> Self {
        let transport = Self::default();
        transport.push(Err(FilmGrainError::ServerStatus { status }));
        transport
    }

    pub fn push(&self, outcome: Result<Vec<u8>>) {
        self.outcomes.borrow_mut().push_back(outcome);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.borrow().len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: &ProcessRequest) -> Result<Vec<u8>> {
        self.sent.borrow_mut().push(SentRequest {
            file_name: request.source.file_name().to_string(),
            mime_type: request.source.mime_type().to_string(),
            bytes: request.source.len(),
            fields: request
                .form_fields()
                .into_iter()
                .map(|(n, v)| (n.to_string(), v))
                .collect(),
        });
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(FilmGrainError::EmptyResponse))
    }
}
