use super::*;
use crate::channel::test_helpers::fake_channel;
use crate::net::ClientEvent;
use board::surface::NullSurface;
use tokio::sync::mpsc;
use tokio::time::{Duration, timeout};

struct Harness {
    session: BoardSession<NullSurface>,
    sent_rx: mpsc::UnboundedReceiver<Envelope>,
    inbound_tx: mpsc::UnboundedSender<Envelope>,
    events: mpsc::Receiver<ClientEvent>,
}

fn harness() -> Harness {
    let (channel, sent_rx, inbound_tx) = fake_channel();
    let (client, events) = RelayClient::with_channel(Box::new(channel));
    Harness { session: BoardSession::new(NullSurface, client), sent_rx, inbound_tx, events }
}

async fn recv_sent(rx: &mut mpsc::UnboundedReceiver<Envelope>) -> Envelope {
    timeout(Duration::from_millis(500), rx.recv())
        .await
        .expect("sent receive timed out")
        .expect("sent stream closed")
}

async fn assert_nothing_sent(rx: &mut mpsc::UnboundedReceiver<Envelope>) {
    assert!(
        timeout(Duration::from_millis(80), rx.recv()).await.is_err(),
        "expected no outbound envelope"
    );
}

/// Pump one inbound envelope through the client task into the session.
async fn deliver(h: &mut Harness, event: Event) {
    h.inbound_tx.send(Envelope::new(event)).expect("inject inbound");
    let client_event = timeout(Duration::from_millis(500), h.events.recv())
        .await
        .expect("event receive timed out")
        .expect("event stream closed");
    let ClientEvent::Inbound(envelope) = client_event else {
        panic!("expected inbound event");
    };
    h.session.apply_inbound(&envelope);
}

#[tokio::test]
async fn pointer_gesture_broadcasts_chained_segments() {
    let mut h = harness();

    h.session.pointer_down(Point::new(0.0, 0.0));
    h.session.pointer_move(Point::new(1.0, 0.0));
    h.session.pointer_move(Point::new(1.0, 1.0));
    h.session.pointer_up();

    let first = recv_sent(&mut h.sent_rx).await;
    let second = recv_sent(&mut h.sent_rx).await;
    let Event::Draw(first) = first.event else { panic!("expected draw") };
    let Event::Draw(second) = second.event else { panic!("expected draw") };

    assert_eq!(first.last_pos, Point::new(0.0, 0.0));
    assert_eq!(first.end(), Point::new(1.0, 0.0));
    assert_eq!(second.last_pos, Point::new(1.0, 0.0));
    assert_eq!(second.end(), Point::new(1.0, 1.0));
}

#[tokio::test]
async fn text_edit_broadcasts_only_in_text_mode() {
    let mut h = harness();

    // Drawing mode: the edit is ignored outright.
    h.session.edit_text("ignored");
    assert_nothing_sent(&mut h.sent_rx).await;

    h.session.set_mode(Mode::Text);
    h.session.edit_text("hello");
    let sent = recv_sent(&mut h.sent_rx).await;
    assert_eq!(sent.event, Event::Text("hello".to_owned()));
}

#[tokio::test]
async fn mode_toggle_preserves_text_and_sends_nothing() {
    let mut h = harness();

    h.session.set_mode(Mode::Text);
    h.session.edit_text("hello");
    recv_sent(&mut h.sent_rx).await;

    h.session.set_mode(Mode::Drawing);
    h.session.set_mode(Mode::Text);

    assert_eq!(h.session.text(), "hello");
    assert_nothing_sent(&mut h.sent_rx).await;
}

#[tokio::test]
async fn inbound_board_events_land_on_the_board() {
    let mut h = harness();

    deliver(&mut h, Event::Text("remote note".to_owned())).await;
    assert_eq!(h.session.text(), "remote note");

    deliver(&mut h, Event::Text("newer note".to_owned())).await;
    assert_eq!(h.session.text(), "newer note");
}

#[tokio::test]
async fn remote_selection_never_mutates_local_text() {
    let mut h = harness();

    deliver(&mut h, Event::Text("hello world".to_owned())).await;
    let selection = Selection {
        selected_text: "world".to_owned(),
        range: wire::SelectionRange { start: 6, end: 11, text: "world".to_owned() },
    };
    deliver(&mut h, Event::SharedSelection(selection.clone())).await;

    assert_eq!(h.session.text(), "hello world");
    assert_eq!(h.session.shared_selection(), Some(&selection));
    // Nothing is echoed back out.
    assert_nothing_sent(&mut h.sent_rx).await;
}

#[tokio::test]
async fn session_tracks_identity_and_peers() {
    let mut h = harness();
    let own_id = Uuid::new_v4();
    let peer_id = Uuid::new_v4();

    deliver(&mut h, Event::Connected { client_id: own_id }).await;
    deliver(&mut h, Event::PeerJoined { client_id: peer_id }).await;
    assert_eq!(h.session.client_id(), Some(own_id));
    assert!(h.session.peers().contains(&peer_id));

    deliver(&mut h, Event::PeerLeft { client_id: peer_id }).await;
    assert!(h.session.peers().is_empty());
}

#[tokio::test]
async fn clear_wipes_and_broadcasts() {
    let mut h = harness();

    h.session.clear();
    let sent = recv_sent(&mut h.sent_rx).await;
    assert_eq!(sent.event, Event::Clear);
}

#[tokio::test]
async fn selection_requires_text_mode_and_content() {
    let mut h = harness();

    h.session.set_mode(Mode::Text);
    h.session.edit_text("hello world");
    recv_sent(&mut h.sent_rx).await;

    // Empty capture: nothing crosses the wire.
    h.session.select_text(3, 3);
    assert_nothing_sent(&mut h.sent_rx).await;

    h.session.select_text(0, 5);
    let sent = recv_sent(&mut h.sent_rx).await;
    let Event::SharedSelection(selection) = sent.event else {
        panic!("expected selection");
    };
    assert_eq!(selection.selected_text, "hello");
    // The local value is untouched by selecting.
    assert_eq!(h.session.text(), "hello world");
}
