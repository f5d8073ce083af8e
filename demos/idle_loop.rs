//! Idle Loop Demo: Stream the default idle clip to a local Live Link receiver.
//!
//! Fetches the default clip if it is missing, plays it for ten seconds at
//! 60 fps to 127.0.0.1:11111, then stops and sends one neutral frame over
//! the same socket the way a speech producer would take over.
//!
//! Set `RUST_LOG=idleface=debug` to watch the session.

use idleface::{clip, provision, FaceFrame, IdleConfig, IdleSession, Transmitter};
use std::sync::Arc;
use std::time::Duration;

fn main() -> idleface::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = IdleConfig::default();
    let path = provision::ensure_default_clip()?;
    let clip = Arc::new(clip::prepare(&path, config.blend_frames)?);

    println!("Idleface Idle Loop Demo");
    println!("=======================");
    println!("Clip:        {} ({clip:?})", path.display());
    println!("Destination: {}", config.destination);
    println!();

    let session = IdleSession::connect(Arc::clone(&clip), &config)?;
    for _ in 0..10 {
        std::thread::sleep(Duration::from_secs(1));
        println!(
            "frame {:>5}  sent {:>5}  dropped {}",
            session.current_index(),
            session.state().frames_sent(),
            session.state().frames_dropped()
        );
    }

    let mut transmitter = session.stop()?;
    let neutral = FaceFrame::new(config.subject_name.clone(), config.target_fps);
    transmitter.transmit(&neutral.encode())?;
    println!("Handed the channel over; sent a neutral frame.");
    Ok(())
}
