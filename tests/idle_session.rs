//! End-to-end behaviour of an idle session: clip preparation, streaming over
//! UDP loopback, and handing the channel to another producer.

use crossbeam_channel::{unbounded, Sender};
use idleface::{
    clip, crossfade, FaceBlendShape, FrameStore, IdleConfig, IdleError, IdleSession,
    SchedulerPhase, TransmissionError, Transmitter,
};
use std::io::{self, Write};
use std::net::{Ipv4Addr, UdpSocket};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Forwards every datagram to a channel.
struct ChannelTransmitter(Sender<Vec<u8>>);

impl Transmitter for ChannelTransmitter {
    fn transmit(&mut self, datagram: &[u8]) -> Result<(), TransmissionError> {
        self.0
            .send(datagram.to_vec())
            .map_err(|e| TransmissionError::new(datagram.len(), io::Error::other(e.to_string())))
    }
}

/// Fails every other frame.
struct Flaky(u64);

impl Transmitter for Flaky {
    fn transmit(&mut self, datagram: &[u8]) -> Result<(), TransmissionError> {
        self.0 += 1;
        if self.0 % 2 == 0 {
            Err(TransmissionError::new(
                datagram.len(),
                io::Error::new(io::ErrorKind::ConnectionRefused, "port unreachable"),
            ))
        } else {
            Ok(())
        }
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn face_clip(len: usize) -> Arc<FrameStore> {
    let frames: Vec<Vec<f32>> = (0..len)
        .map(|f| vec![f as f32 / len as f32; FaceBlendShape::COUNT])
        .collect();
    Arc::new(FrameStore::from_frames(frames).unwrap())
}

fn receiver() -> UdpSocket {
    let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    socket
        .set_read_timeout(Some(Duration::from_secs(2)))
        .unwrap();
    socket
}

#[test]
fn test_four_frame_seam_blend_scenario() {
    let store = FrameStore::from_frames([[1.0f32, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]).unwrap();
    let blended = store.seam_blend(2).unwrap();

    assert_eq!(blended.len(), 4);
    assert_eq!(blended.frame(0), Some(&[1.0, 0.0][..]));
    assert_eq!(blended.frame(1), Some(&[0.0, 1.0][..]));
    // t = 0: first tail frame keeps its own values
    assert_eq!(blended.frame(2), Some(&[1.0, 1.0][..]));
    // t = 0.5: halfway between [0, 0] and head frame 1
    assert_eq!(blended.frame(3), Some(&[0.0, 0.5][..]));
}

#[test]
fn test_prepare_from_csv_applies_eye_policy_then_blend() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Timecode,BlendShapeCount,EyeBlinkLeft,EyeLookDownLeft,Other").unwrap();
    for (i, row) in [[1.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 0.0]]
        .iter()
        .enumerate()
    {
        writeln!(file, "00:00:00:{i:02}.000,3,{},{},{}", row[0], row[1], row[2]).unwrap();
    }
    file.flush().unwrap();

    let store = clip::prepare(file.path(), 2).unwrap();
    assert_eq!(store.len(), 4);
    assert!(store.iter().all(|frame| frame[1] == 0.0));
    assert_eq!(store.frame(3), Some(&[0.0, 0.0, 0.5][..]));
}

#[test]
fn test_prepare_rejects_oversized_window_before_anything_runs() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Timecode,BlendshapeCount,A").unwrap();
    writeln!(file, "t0,1,0.5").unwrap();
    writeln!(file, "t1,1,0.25").unwrap();
    file.flush().unwrap();

    let err = clip::prepare(file.path(), 16).unwrap_err();
    assert!(matches!(err, IdleError::Configuration { .. }));
}

#[test]
fn test_streams_encoded_frames_over_udp() {
    init_logging();
    let rx = receiver();
    let config = IdleConfig::default()
        .with_destination(rx.local_addr().unwrap())
        .with_subject_name("TestRig");

    let session = IdleSession::connect(face_clip(30), &config).unwrap();

    let mut buf = [0u8; 1024];
    let mut sizes = Vec::new();
    for _ in 0..3 {
        let n = rx.recv(&mut buf).unwrap();
        assert_eq!(&buf[..4], &6u32.to_le_bytes());
        sizes.push(n);
    }
    // fixed-size frames: version, uuid, name, timecode, count, 61 weights
    let expected = 4 + 37 + 4 + "TestRig".len() + 16 + 1 + 61 * 4;
    assert!(sizes.iter().all(|&n| n == expected), "{sizes:?}");

    let transmitter = session.stop().unwrap();
    assert_eq!(transmitter.peer(), rx.local_addr().unwrap());
}

#[test]
fn test_stop_hands_the_channel_to_the_next_producer() {
    let rx = receiver();
    let config = IdleConfig::default().with_destination(rx.local_addr().unwrap());
    let session = IdleSession::connect(face_clip(30), &config).unwrap();

    let mut buf = [0u8; 1024];
    rx.recv(&mut buf).unwrap();
    let mut speech = session.stop().unwrap();

    speech.transmit(b"speech").unwrap();

    // Idle frames may still be queued ahead of it, but nothing follows it.
    rx.set_read_timeout(Some(Duration::from_millis(200))).unwrap();
    let mut last = Vec::new();
    while let Ok(n) = rx.recv(&mut buf) {
        last = buf[..n].to_vec();
    }
    assert_eq!(last, b"speech");
}

#[test]
fn test_immediate_stop_ends_before_a_full_pass() {
    let (tx, frames) = unbounded();
    // ten seconds of clip at 60 fps
    let session =
        IdleSession::start(face_clip(600), ChannelTransmitter(tx), &IdleConfig::default()).unwrap();
    let state = Arc::clone(session.state());

    let requested = Instant::now();
    session.stop().unwrap();
    assert!(requested.elapsed() < Duration::from_millis(500));

    let ticks = state.ticks();
    assert!(ticks < 600);
    assert_eq!(state.passes(), 0);
    assert_eq!(state.phase(), SchedulerPhase::Stopped);
    assert_eq!(state.current_index() as u64, ticks.saturating_sub(1));
    assert_eq!(frames.try_iter().count() as u64, ticks);
}

#[test]
fn test_dropped_frames_do_not_interrupt_playback() {
    init_logging();
    let config = IdleConfig::default().with_target_fps(200);
    let session = IdleSession::start(face_clip(5), Flaky(0), &config).unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while session.state().ticks() < 12 && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    let state = Arc::clone(session.state());
    session.stop().unwrap();

    assert!(state.ticks() >= 12);
    assert!(state.frames_dropped() >= 6);
    assert!(state.passes() >= 2);
    assert_eq!(state.frames_sent() + state.frames_dropped(), state.ticks());
}

#[test]
fn test_crossfade_out_of_the_current_idle_frame() {
    let (tx, _frames) = unbounded();
    let session =
        IdleSession::start(face_clip(10), ChannelTransmitter(tx), &IdleConfig::default()).unwrap();
    session.ticks().recv_timeout(Duration::from_secs(2)).unwrap();

    let from = session.current_frame().unwrap().to_vec();
    session.stop().unwrap();

    let speech = vec![1.0; FaceBlendShape::COUNT];
    let ramp = crossfade(&from, &speech, 8).unwrap();
    assert_eq!(ramp.len(), 8);
    assert_eq!(ramp[0], from);
    assert!(ramp.windows(2).all(|w| w[1][0] >= w[0][0]));
}

#[test]
fn test_restart_begins_at_frame_zero() {
    let (tx, frames) = unbounded();
    let clip = face_clip(10);

    let first = IdleSession::start(Arc::clone(&clip), ChannelTransmitter(tx), &IdleConfig::default())
        .unwrap();
    for _ in 0..3 {
        first.ticks().recv_timeout(Duration::from_secs(2)).unwrap();
    }
    let transmitter = first.stop().unwrap();
    frames.try_iter().for_each(drop);

    let second = IdleSession::start(clip, transmitter, &IdleConfig::default()).unwrap();
    let tick = second.ticks().recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(tick.index, 0);
    assert_eq!(tick.tick, 0);
    second.stop().unwrap();
}
