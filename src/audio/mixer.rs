/// Which voices are currently pushing the music down. Game ducking
/// dominates: while the game holds the room, narration ducking is
/// remembered but has no audible effect until the game releases.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuckState {
    pub game: bool,
    pub narration: bool,
}

/// Volume model shared by every sink category. All audible gains are a
/// product of the master volume and a per-category fraction, so a master
/// change rescales everything at once.
#[derive(Debug, Clone, Copy)]
pub struct VolumeModel {
    pub master: f32,
    pub music_base: f32,
    pub ducked_fraction: f32,
}

impl VolumeModel {
    pub fn new(master: f32, music_base: f32, ducked_fraction: f32) -> Self {
        Self {
            master: master.clamp(0.0, 1.0),
            music_base,
            ducked_fraction,
        }
    }

    pub fn set_master(&mut self, master: f32) {
        self.master = master.clamp(0.0, 1.0);
    }

    /// Target music gain for the given duck state.
    pub fn music_target(&self, duck: DuckState) -> f32 {
        let fraction = if duck.game {
            0.0
        } else if duck.narration {
            self.ducked_fraction
        } else {
            self.music_base
        };
        self.master * fraction
    }

    /// Narration sits just under the cues.
    pub fn speech_target(&self) -> f32 {
        self.master * Self::SPEECH_FRACTION
    }

    /// One-shot cues and foley play at full master gain.
    pub fn cue_target(&self) -> f32 {
        self.master
    }

    /// Ambient scares stay in the background.
    pub fn ambient_target(&self) -> f32 {
        self.master * Self::AMBIENT_FRACTION
    }

    const SPEECH_FRACTION: f32 = 0.9;
    const AMBIENT_FRACTION: f32 = 0.6;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn music_target_is_master_times_base() {
        let m = VolumeModel::new(0.7, 0.6, 0.08);
        let t = m.music_target(DuckState::default());
        assert!((t - 0.42).abs() < 1e-6);
    }

    #[test]
    fn narration_duck_drops_to_fraction() {
        let m = VolumeModel::new(0.7, 0.6, 0.08);
        let t = m.music_target(DuckState {
            narration: true,
            ..Default::default()
        });
        assert!((t - 0.7 * 0.08).abs() < 1e-6);
    }

    #[test]
    fn game_duck_dominates_narration() {
        let m = VolumeModel::new(0.7, 0.6, 0.08);
        let t = m.music_target(DuckState {
            game: true,
            narration: true,
        });
        assert_eq!(t, 0.0);
    }

    #[test]
    fn category_gains_scale_with_master() {
        let m = VolumeModel::new(0.5, 0.6, 0.08);
        assert!((m.speech_target() - 0.45).abs() < 1e-6);
        assert!((m.cue_target() - 0.5).abs() < 1e-6);
        assert!((m.ambient_target() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn master_is_clamped() {
        let mut m = VolumeModel::new(1.7, 0.6, 0.08);
        assert_eq!(m.master, 1.0);
        m.set_master(-0.3);
        assert_eq!(m.master, 0.0);
    }
}
