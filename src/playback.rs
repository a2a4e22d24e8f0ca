//! Play/pause control of the simulation time accumulator.

/// Time added per frame at speed 1.0.
pub const TIME_STEP: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Paused,
    Playing,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Playback {
    pub state: PlaybackState,
    pub time: f64,
    pub speed: f64,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            state: PlaybackState::Paused,
            time: 0.0,
            speed: 1.0,
        }
    }
}

impl Playback {
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn toggle(&mut self) {
        self.state = match self.state {
            PlaybackState::Paused => PlaybackState::Playing,
            PlaybackState::Playing => PlaybackState::Paused,
        };
    }

    /// Advances one frame while playing and returns the current time.
    pub fn advance(&mut self) -> f64 {
        if self.is_playing() {
            self.time += TIME_STEP * self.speed;
        }
        self.time
    }

    pub fn button_label(&self) -> &'static str {
        match self.state {
            PlaybackState::Paused => "▶ Play simulation",
            PlaybackState::Playing => "⏸ Pause simulation",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_starts_paused_and_frozen() {
        let mut playback = Playback::default();
        assert!(!playback.is_playing());
        for _ in 0..10 {
            assert_eq!(playback.advance(), 0.0);
        }
    }

    #[test]
    fn test_playing_advances_by_speed() {
        let mut playback = Playback { speed: 2.5, ..Default::default() };
        playback.toggle();
        for _ in 0..4 {
            playback.advance();
        }
        assert_abs_diff_eq!(playback.time, 4.0 * TIME_STEP * 2.5, epsilon = 1e-12);
    }

    #[test]
    fn test_pause_freezes_time() {
        let mut playback = Playback::default();
        playback.toggle();
        playback.advance();
        playback.advance();
        playback.toggle();
        let frozen = playback.time;
        playback.advance();
        assert_eq!(playback.time, frozen);
        assert_eq!(playback.state, PlaybackState::Paused);
    }
}
