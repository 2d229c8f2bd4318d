//! Opponent link tests - the UDP loop against a fake opponent on localhost

use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::timeout;

use tasktris::core::{LinkRequest, LinkStatus, OpponentPort};
use tasktris::opponent::{connect, run_link, LinkChannels, LinkConfig, OpponentLink};
use tasktris::types::{GameMode, PieceKind};

const WAIT: Duration = Duration::from_secs(2);

fn local_config(send_port: u16) -> LinkConfig {
    LinkConfig {
        host: "127.0.0.1".to_string(),
        recv_port: 0,
        send_port,
        disabled: false,
    }
}

async fn recv_line(socket: &UdpSocket) -> String {
    let mut buf = [0u8; 64];
    let (len, _) = timeout(WAIT, socket.recv_from(&mut buf))
        .await
        .expect("opponent datagram")
        .expect("recv");
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[tokio::test]
async fn test_need_next_round_trip() {
    let opponent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let opponent_port = opponent.local_addr().unwrap().port();

    let (socket, peer) = connect(&local_config(opponent_port)).await.unwrap();
    assert_eq!(peer.port(), opponent_port);

    let (requests, requests_rx) = mpsc::unbounded_channel();
    let (kinds_tx, mut kinds) = mpsc::channel(2);
    let (status_tx, mut status) = watch::channel(LinkStatus::default());
    let (ready_tx, ready_rx) = oneshot::channel();
    let channels = LinkChannels {
        requests: requests_rx,
        kinds: kinds_tx,
        status: status_tx,
    };
    let task = tokio::spawn(run_link(socket, peer, channels, Some(ready_tx)));
    let local: SocketAddr = ready_rx.await.unwrap();
    let link_addr: SocketAddr = format!("127.0.0.1:{}", local.port()).parse().unwrap();

    // the first request primes falling + preview
    requests.send(LinkRequest::NeedNext).unwrap();
    assert_eq!(recv_line(&opponent).await, "NEXT");
    assert_eq!(recv_line(&opponent).await, "NEXT");

    opponent.send_to(b"NEXT=I", link_addr).await.unwrap();
    opponent.send_to(b"NEXT=O\r\n", link_addr).await.unwrap();
    let first = timeout(WAIT, kinds.recv()).await.unwrap();
    let second = timeout(WAIT, kinds.recv()).await.unwrap();
    assert_eq!(first, Some(PieceKind::I));
    assert_eq!(second, Some(PieceKind::O));

    opponent.send_to(b"MODE=EASY", link_addr).await.unwrap();
    timeout(WAIT, status.wait_for(|s| s.mode.is_some()))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(status.borrow().mode, Some(GameMode::Easy));
    assert_eq!(status.borrow().messages, 3);

    // requests go out in a fixed order within one iteration
    requests.send(LinkRequest::NeedNext).unwrap();
    requests.send(LinkRequest::SelectMode(GameMode::Hard)).unwrap();
    assert_eq!(recv_line(&opponent).await, "MODE=HARD");
    assert_eq!(recv_line(&opponent).await, "MODE");
    assert_eq!(recv_line(&opponent).await, "NEXT");

    drop(requests);
    timeout(WAIT, task).await.unwrap().unwrap();
}

#[tokio::test]
async fn test_probe_and_garbage() {
    let opponent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let opponent_port = opponent.local_addr().unwrap().port();
    let (socket, peer) = connect(&local_config(opponent_port)).await.unwrap();

    let (requests, requests_rx) = mpsc::unbounded_channel();
    let (kinds_tx, mut kinds) = mpsc::channel(2);
    let (status_tx, status) = watch::channel(LinkStatus::default());
    let (ready_tx, ready_rx) = oneshot::channel();
    let channels = LinkChannels {
        requests: requests_rx,
        kinds: kinds_tx,
        status: status_tx,
    };
    tokio::spawn(run_link(socket, peer, channels, Some(ready_tx)));
    let local = ready_rx.await.unwrap();
    let link_addr: SocketAddr = format!("127.0.0.1:{}", local.port()).parse().unwrap();

    requests.send(LinkRequest::Probe).unwrap();
    let seed = recv_line(&opponent).await;
    let value: i32 = seed
        .strip_prefix("SEED=")
        .and_then(|s| s.parse().ok())
        .expect("seed message");
    assert!(value >= 0);
    assert_eq!(recv_line(&opponent).await, "MODE");

    for junk in [&b"next=I"[..], b"NEXT=X", b"MODE=", b"\xff\xfe"] {
        opponent.send_to(junk, link_addr).await.unwrap();
    }
    opponent.send_to(b"NEXT=T", link_addr).await.unwrap();
    let kind = timeout(WAIT, kinds.recv()).await.unwrap();
    assert_eq!(kind, Some(PieceKind::T));
    assert_eq!(status.borrow().messages, 1);
    assert!(status.borrow().mode.is_none());
}

#[test]
fn test_background_link_through_the_port() {
    let opponent = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    opponent.set_read_timeout(Some(WAIT)).unwrap();
    let opponent_port = opponent.local_addr().unwrap().port();

    // find a free receive port for the link
    let probe = std::net::UdpSocket::bind("127.0.0.1:0").unwrap();
    let recv_port = probe.local_addr().unwrap().port();
    drop(probe);

    let config = LinkConfig {
        recv_port,
        ..local_config(opponent_port)
    };
    let mut link = OpponentLink::start(&config).unwrap();
    assert!(link.poll_status().is_none());

    link.request(LinkRequest::NeedNext);
    let mut buf = [0u8; 64];
    let (len, _) = opponent.recv_from(&mut buf).unwrap();
    assert_eq!(&buf[..len], b"NEXT");

    let link_addr: SocketAddr = format!("127.0.0.1:{recv_port}").parse().unwrap();
    opponent.send_to(b"NEXT=L", link_addr).unwrap();

    let mut kind = None;
    for _ in 0..200 {
        kind = link.try_next_kind();
        if kind.is_some() {
            break;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(kind, Some(PieceKind::L));
    let status = link.poll_status().expect("status after a valid message");
    assert_eq!(status.messages, 1);
    assert!(link.poll_status().is_none());

    // a reset empties the local buffer immediately
    opponent.send_to(b"NEXT=S", link_addr).unwrap();
    std::thread::sleep(Duration::from_millis(200));
    link.request(LinkRequest::Reset);
    assert!(link.try_next_kind().is_none());
}
