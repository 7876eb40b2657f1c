use super::mixer::{DuckState, VolumeModel};

/// Converging fade: each tick moves the remaining distance divided by the
/// ticks left, so the gain lands exactly on the target at the final step.
#[derive(Debug, Clone, Copy)]
struct SteppedFade {
    target: f32,
    steps_left: u32,
}

impl SteppedFade {
    fn tick(&mut self, current: f32) -> (f32, bool) {
        if self.steps_left <= 1 {
            self.steps_left = 0;
            return (self.target, true);
        }
        let next = current + (self.target - current) / self.steps_left as f32;
        self.steps_left -= 1;
        (next, false)
    }
}

/// Pure ducking policy. The engine owns the sinks and the tick clock; this
/// tracks who is ducking the music and what gain the music sink should
/// carry right now.
#[derive(Debug)]
pub struct Ducker {
    state: DuckState,
    current: f32,
    fade: Option<SteppedFade>,
    steps: u32,
}

impl Ducker {
    pub fn new(model: &VolumeModel, steps: u32) -> Self {
        Self {
            state: DuckState::default(),
            current: model.music_target(DuckState::default()),
            fade: None,
            steps: steps.max(1),
        }
    }

    pub fn current_gain(&self) -> f32 {
        self.current
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    pub fn state(&self) -> DuckState {
        self.state
    }

    /// Game duck owns the room; any narration flag changes while it holds
    /// are recorded but only become audible when the game releases.
    pub fn set_game_duck(&mut self, on: bool, model: &VolumeModel) {
        if self.state.game == on {
            return;
        }
        self.state.game = on;
        self.retarget(model);
    }

    pub fn set_narration_duck(&mut self, on: bool, model: &VolumeModel) {
        if self.state.narration == on {
            return;
        }
        self.state.narration = on;
        if self.state.game {
            // Flag only. The release of the game duck re-evaluates it.
            return;
        }
        self.retarget(model);
    }

    /// Master volume changed mid-flight; aim the fade at the new target.
    pub fn retarget(&mut self, model: &VolumeModel) {
        let target = model.music_target(self.state);
        if (target - self.current).abs() < 1e-6 {
            self.fade = None;
            return;
        }
        self.fade = Some(SteppedFade {
            target,
            steps_left: self.steps,
        });
    }

    /// Advance one fade step. Returns the new gain when it changed.
    pub fn tick(&mut self) -> Option<f32> {
        let fade = self.fade.as_mut()?;
        let (next, done) = fade.tick(self.current);
        self.current = next;
        if done {
            self.fade = None;
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> VolumeModel {
        VolumeModel::new(0.7, 0.6, 0.08)
    }

    fn run_to_rest(d: &mut Ducker) -> u32 {
        let mut ticks = 0;
        while d.tick().is_some() {
            ticks += 1;
            assert!(ticks < 100, "fade never converged");
        }
        ticks
    }

    #[test]
    fn narration_duck_fades_down_and_lands_exactly() {
        let m = model();
        let mut d = Ducker::new(&m, 10);
        d.set_narration_duck(true, &m);
        let ticks = run_to_rest(&mut d);
        assert_eq!(ticks, 10);
        assert!((d.current_gain() - 0.7 * 0.08).abs() < 1e-6);
    }

    #[test]
    fn release_fades_back_to_base() {
        let m = model();
        let mut d = Ducker::new(&m, 10);
        d.set_narration_duck(true, &m);
        run_to_rest(&mut d);
        d.set_narration_duck(false, &m);
        run_to_rest(&mut d);
        assert!((d.current_gain() - 0.42).abs() < 1e-6);
    }

    #[test]
    fn game_duck_fades_to_silence() {
        let m = model();
        let mut d = Ducker::new(&m, 10);
        d.set_game_duck(true, &m);
        run_to_rest(&mut d);
        assert!(d.current_gain().abs() < 1e-6);
    }

    #[test]
    fn narration_flag_during_game_duck_is_silent_until_release() {
        let m = model();
        let mut d = Ducker::new(&m, 10);
        d.set_game_duck(true, &m);
        run_to_rest(&mut d);

        // Narration starts while the game still owns the room: no fade.
        d.set_narration_duck(true, &m);
        assert!(!d.is_fading());
        assert!(d.current_gain().abs() < 1e-6);

        // Game releases with narration still speaking: land on the ducked
        // fraction, not the base gain.
        d.set_game_duck(false, &m);
        run_to_rest(&mut d);
        assert!((d.current_gain() - 0.7 * 0.08).abs() < 1e-6);
    }

    #[test]
    fn retarget_mid_fade_converges_on_new_master() {
        let mut m = model();
        let mut d = Ducker::new(&m, 10);
        d.set_narration_duck(true, &m);
        d.tick();
        d.tick();

        m.set_master(0.2);
        d.retarget(&m);
        run_to_rest(&mut d);
        assert!((d.current_gain() - 0.2 * 0.08).abs() < 1e-6);
    }

    #[test]
    fn redundant_flag_change_is_ignored() {
        let m = model();
        let mut d = Ducker::new(&m, 10);
        d.set_narration_duck(false, &m);
        assert!(!d.is_fading());
    }
}
