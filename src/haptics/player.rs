//! Haptic player abstraction
//!
//! The vibration engine lives in a vendor SDK. This trait is the surface the
//! controller drives; the implementations here log, discard, or record calls.

/// Version string reported by the in-crate players
pub const SDK_VERSION: &str = concat!("headless-", env!("CARGO_PKG_VERSION"));

/// Interface to a haptic playback engine
pub trait HapticPlayer {
    /// Prepare the engine for playback
    fn init(&mut self);

    /// Play a pattern. `amplitude` of `None` keeps the pattern's own intensity.
    fn play_pattern(&mut self, pattern: &str, loop_count: u32, amplitude: Option<u8>);

    /// Stop whatever is playing
    fn stop(&mut self);

    /// Release the engine
    fn quit(&mut self);

    /// Engine version shown in the About dialog
    fn sdk_version(&self) -> &str;
}

/// Player that writes every call to the log
#[derive(Debug, Default)]
pub struct LogPlayer {
    ready: bool,
}

impl LogPlayer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HapticPlayer for LogPlayer {
    fn init(&mut self) {
        self.ready = true;
        log::info!("Haptic player ready ({SDK_VERSION})");
    }

    fn play_pattern(&mut self, pattern: &str, loop_count: u32, amplitude: Option<u8>) {
        if !self.ready {
            log::warn!("play_pattern called before init, ignoring");
            return;
        }
        if pattern.is_empty() {
            log::debug!("Empty pattern, nothing to play");
            return;
        }
        match amplitude {
            Some(amp) => log::info!(
                "Play pattern ({} bytes) loop={loop_count} amplitude={amp}",
                pattern.len()
            ),
            None => log::info!(
                "Play pattern ({} bytes) loop={loop_count} amplitude=default",
                pattern.len()
            ),
        }
    }

    fn stop(&mut self) {
        log::info!("Haptic playback stopped");
    }

    fn quit(&mut self) {
        self.ready = false;
        log::info!("Haptic player released");
    }

    fn sdk_version(&self) -> &str {
        SDK_VERSION
    }
}

/// Player that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPlayer;

impl HapticPlayer for NullPlayer {
    fn init(&mut self) {}
    fn play_pattern(&mut self, _pattern: &str, _loop_count: u32, _amplitude: Option<u8>) {}
    fn stop(&mut self) {}
    fn quit(&mut self) {}
    fn sdk_version(&self) -> &str {
        SDK_VERSION
    }
}

/// One recorded player call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerCall {
    Init,
    Play {
        pattern: String,
        loop_count: u32,
        amplitude: Option<u8>,
    },
    Stop,
    Quit,
}

/// Player that keeps every call in order
#[derive(Debug, Default, Clone)]
pub struct RecordingPlayer {
    pub calls: Vec<PlayerCall>,
}

impl RecordingPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the play calls, as (pattern, amplitude)
    pub fn plays(&self) -> Vec<(&str, Option<u8>)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                PlayerCall::Play {
                    pattern, amplitude, ..
                } => Some((pattern.as_str(), *amplitude)),
                _ => None,
            })
            .collect()
    }
}

impl HapticPlayer for RecordingPlayer {
    fn init(&mut self) {
        self.calls.push(PlayerCall::Init);
    }

    fn play_pattern(&mut self, pattern: &str, loop_count: u32, amplitude: Option<u8>) {
        self.calls.push(PlayerCall::Play {
            pattern: pattern.to_string(),
            loop_count,
            amplitude,
        });
    }

    fn stop(&mut self) {
        self.calls.push(PlayerCall::Stop);
    }

    fn quit(&mut self) {
        self.calls.push(PlayerCall::Quit);
    }

    fn sdk_version(&self) -> &str {
        SDK_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_player_order() {
        let mut player = RecordingPlayer::new();
        player.init();
        player.play_pattern("w", 0, Some(12));
        player.play_pattern("b", 0, None);
        player.stop();
        player.quit();

        assert_eq!(player.calls.len(), 5);
        assert_eq!(player.calls[0], PlayerCall::Init);
        assert_eq!(player.plays(), vec![("w", Some(12)), ("b", None)]);
        assert_eq!(player.calls[4], PlayerCall::Quit);
    }

    #[test]
    fn test_sdk_version_mentions_crate() {
        assert!(LogPlayer::new().sdk_version().ends_with(env!("CARGO_PKG_VERSION")));
    }
}
