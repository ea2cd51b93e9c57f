mod common;

use common::{png_blob, png_bytes, RecordingSurface, ScriptedTransport};
use filmgrain_core::asset::{NullSurface, Slot};
use filmgrain_core::consts::DOWNLOAD_FILE_NAME;
use filmgrain_core::error::FilmGrainError;
use filmgrain_core::params::{GrainParameters, NumericField};
use filmgrain_core::session::{RequestState, Session, Settlement};

fn session() -> Session<NullSurface> {
    Session::new(NullSurface::default(), GrainParameters::default())
}

// ---------------------------------------------------------------------------
// Preconditions
// ---------------------------------------------------------------------------

#[test]
fn test_process_without_source_is_noop() {
    let mut session = session();
    let transport = ScriptedTransport::succeeding(png_bytes(2, 2));

    assert!(!session.can_process());
    assert!(session.process(&transport).is_none());
    assert_eq!(transport.sent_count(), 0);
    assert_eq!(session.state(), RequestState::Idle);
}

#[test]
fn test_begin_while_pending_is_refused() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));

    let first = session.begin_process();
    assert!(first.is_some());
    assert_eq!(session.state(), RequestState::Pending);
    assert!(!session.can_process());

    assert!(session.begin_process().is_none());
    assert_eq!(session.state(), RequestState::Pending);
}

#[test]
fn test_non_finite_params_block_request() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));
    session.store_mut().replace(GrainParameters {
        scale: f64::NAN,
        ..GrainParameters::default()
    });

    assert!(session.begin_process().is_none());
    assert_eq!(session.state(), RequestState::Idle);
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_default_request_and_success() {
    let mut session = session();
    session.select_source(Some(png_blob("photo.png")));
    assert!(session.source().is_some());
    assert!(session.result().is_none());

    let transport = ScriptedTransport::succeeding(png_bytes(8, 8));
    let settlement = session.process(&transport);
    assert_eq!(settlement, Some(Settlement::Succeeded));

    let sent = transport.sent.borrow();
    assert_eq!(sent.len(), 1);
    let request = &sent[0];
    assert_eq!(request.file_name, "photo.png");
    assert_eq!(request.mime_type, "image/png");
    assert_eq!(request.field("scale"), Some("1"));
    assert_eq!(request.field("grain_power"), Some("0.75"));
    assert_eq!(request.field("shadows"), Some("0.1"));
    assert_eq!(request.field("highs"), Some("0.1"));
    assert_eq!(request.field("grain_sat"), Some("0.6"));
    assert_eq!(request.field("gray"), Some("false"));
    assert_eq!(request.fields.len(), 9);

    assert_eq!(session.state(), RequestState::Succeeded);
    assert!(session.result().is_some());
    let download = session.download().unwrap();
    assert_eq!(download.file_name, DOWNLOAD_FILE_NAME);
    assert_eq!(download.bytes(), png_bytes(8, 8).as_slice());
}

#[test]
fn test_network_failure_keeps_source() {
    let mut session = session();
    session.select_source(Some(png_blob("photo.png")));
    let source_bytes = session.source().unwrap().blob().bytes().to_vec();

    let transport = ScriptedTransport::failing(500);
    assert_eq!(session.process(&transport), Some(Settlement::Failed));

    assert_eq!(session.state(), RequestState::Failed);
    assert!(session.result().is_none());
    assert!(session.download().is_none());
    assert!(session.notice().unwrap().contains("500"));
    assert_eq!(session.source().unwrap().blob().bytes(), source_bytes.as_slice());
    assert_eq!(session.params(), &GrainParameters::default());
}

#[test]
fn test_empty_body_is_failure() {
    let mut session = session();
    session.select_source(Some(png_blob("photo.png")));

    let transport = ScriptedTransport::succeeding(Vec::new());
    assert_eq!(session.process(&transport), Some(Settlement::Failed));
    assert!(session.result().is_none());
}

#[test]
fn test_slider_value_reaches_payload() {
    let mut session = session();
    session.select_source(Some(png_blob("photo.png")));
    assert!(session.set_numeric(NumericField::GrainPower, "2.3"));
    assert_eq!(session.params().grain_power, 2.3);

    let transport = ScriptedTransport::succeeding(png_bytes(2, 2));
    session.process(&transport);
    assert_eq!(transport.sent.borrow()[0].field("grain_power"), Some("2.3"));
}

#[test]
fn test_retry_after_failure() {
    let mut session = session();
    session.select_source(Some(png_blob("photo.png")));

    let transport = ScriptedTransport::failing(502);
    transport.push(Ok(png_bytes(2, 2)));

    assert_eq!(session.process(&transport), Some(Settlement::Failed));
    assert!(session.can_process());
    assert_eq!(session.process(&transport), Some(Settlement::Succeeded));
    assert!(session.notice().is_none());
    assert_eq!(transport.sent_count(), 2);
}

// ---------------------------------------------------------------------------
// Handle hygiene across the request lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_new_request_clears_previous_result() {
    let (surface, log) = RecordingSurface::new();
    let mut session = Session::new(surface, GrainParameters::default());
    session.select_source(Some(png_blob("photo.png")));

    let transport = ScriptedTransport::succeeding(png_bytes(2, 2));
    session.process(&transport);
    assert_eq!(log.borrow().live_in(Slot::Result), 1);

    let request = session.begin_process().unwrap();
    assert!(session.result().is_none());
    assert_eq!(log.borrow().live_in(Slot::Result), 0);
    assert!(session.source().is_some());

    session.settle(request.generation(), Ok(png_bytes(3, 3)));
    assert_eq!(log.borrow().live_in(Slot::Result), 1);
    assert_eq!(log.borrow().live_in(Slot::Source), 1);
}

#[test]
fn test_selecting_source_after_success_clears_result() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));
    session.process(&ScriptedTransport::succeeding(png_bytes(2, 2)));
    assert!(session.result().is_some());

    session.select_source(Some(png_blob("b.png")));
    assert!(session.result().is_none());
    assert_eq!(session.state(), RequestState::Idle);
}

#[test]
fn test_selecting_source_after_failure_resets_state() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));
    session.process(&ScriptedTransport::failing(500));
    assert_eq!(session.state(), RequestState::Failed);
    assert!(session.notice().is_some());

    session.select_source(Some(png_blob("b.png")));
    assert_eq!(session.state(), RequestState::Idle);
    assert!(session.notice().is_none());
    assert_eq!(session.source().unwrap().blob().file_name(), "b.png");
    assert!(session.can_process());
}

// ---------------------------------------------------------------------------
// Settlement correlation
// ---------------------------------------------------------------------------

#[test]
fn test_outcome_for_replaced_source_is_discarded() {
    let (surface, log) = RecordingSurface::new();
    let mut session = Session::new(surface, GrainParameters::default());
    session.select_source(Some(png_blob("a.png")));
    let request = session.begin_process().unwrap();

    session.select_source(Some(png_blob("b.png")));
    assert_eq!(session.state(), RequestState::Pending);
    assert!(!session.can_process());

    let settlement = session.settle(request.generation(), Ok(png_bytes(2, 2)));
    assert_eq!(settlement, Settlement::Discarded);
    assert_eq!(session.state(), RequestState::Idle);
    assert!(session.result().is_none());
    assert_eq!(log.borrow().live_in(Slot::Result), 0);
    assert_eq!(session.source().unwrap().blob().file_name(), "b.png");
}

#[test]
fn test_discarded_failure_raises_no_notice() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));
    let request = session.begin_process().unwrap();
    session.select_source(Some(png_blob("b.png")));

    let settlement = session.settle(
        request.generation(),
        Err(FilmGrainError::ServerStatus { status: 500 }),
    );
    assert_eq!(settlement, Settlement::Discarded);
    assert!(session.notice().is_none());
    assert!(session.can_process());
}

#[test]
fn test_settle_without_pending_is_ignored() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));
    let generation = session.assets().generation();

    assert_eq!(
        session.settle(generation, Ok(png_bytes(2, 2))),
        Settlement::Ignored
    );
    assert!(session.result().is_none());
    assert_eq!(session.state(), RequestState::Idle);
}

#[test]
fn test_request_snapshot_ignores_later_edits() {
    let mut session = session();
    session.select_source(Some(png_blob("a.png")));
    let request = session.begin_process().unwrap();

    session.set_numeric(NumericField::GrainPower, "4");
    assert_eq!(request.params.grain_power, 0.75);
    assert_eq!(session.params().grain_power, 4.0);
}
