use rand::Rng;

use super::prompts::{DARES, PromptPool, TRUTHS};
use crate::audio::CueId;
use crate::presence::{Role, Turn};

/// What the set should do with the player's latest message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStep {
    /// Show and speak a line, optionally firing a one-shot cue with it.
    Spoken {
        text: String,
        stinger: Option<CueId>,
    },
    /// First dare: the candle ritual. Spoken, and the room lights come
    /// into play.
    CandleDare { text: String },
    /// Nothing on screen; the cue carries the whole beat.
    Silent { cue: CueId },
    /// The game is over. The finale cue plays and input is ignored.
    Finale,
    /// Free-form confession: ask the presence for its comeback.
    Consult {
        system_prompt: String,
        history: Vec<Turn>,
    },
}

/// One sitting of the truth-or-dare game. Pure state machine: the caller
/// owns all IO and feeds presence replies back through
/// [`GameSession::format_presence_reply`].
#[derive(Debug)]
pub struct GameSession {
    round_cap: u32,
    dare_count: u32,
    truth_count: u32,
    truths: PromptPool,
    dares: PromptPool,
    history: Vec<Turn>,
    finished: bool,
}

impl GameSession {
    pub fn new(round_cap: u32) -> Self {
        Self {
            round_cap: round_cap.max(1),
            dare_count: 0,
            truth_count: 0,
            truths: PromptPool::new(TRUTHS),
            dares: PromptPool::new(DARES),
            history: Vec::new(),
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn rounds_played(&self) -> u32 {
        self.dare_count + self.truth_count
    }

    pub fn handle_message<R: Rng>(&mut self, message: &str, rng: &mut R) -> GameStep {
        let msg = message.to_lowercase();
        let msg = msg.trim();

        if msg == "start" || msg == "start the game" {
            return GameStep::Spoken {
                text: "truth or dare?".to_owned(),
                stinger: None,
            };
        }

        if self.finished {
            return GameStep::Finale;
        }

        if msg.contains("dare") {
            return self.handle_dare(rng);
        }
        if msg.contains("truth") {
            return self.handle_truth(rng);
        }

        // The cap applies to confessions too: a player who stalls past the
        // last round still meets the finale.
        if self.rounds_played() >= self.round_cap {
            return self.finish();
        }

        self.history.push(Turn {
            role: Role::Viewer,
            text: message.to_owned(),
        });
        GameStep::Consult {
            system_prompt: confession_prompt(message),
            history: self.history.clone(),
        }
    }

    fn handle_dare<R: Rng>(&mut self, rng: &mut R) -> GameStep {
        self.dare_count += 1;
        if self.rounds_played() >= self.round_cap {
            return self.finish();
        }
        match self.dare_count {
            1 => GameStep::CandleDare {
                text: "light the candles for me...".to_owned(),
            },
            2 => GameStep::Silent { cue: CueId::Lullaby },
            n => {
                let text = self.dares.pick(rng).to_owned();
                // Stingers alternate by dare parity.
                let stinger = if n % 2 == 1 {
                    CueId::ScareA
                } else {
                    CueId::ScareB
                };
                GameStep::Spoken {
                    text,
                    stinger: Some(stinger),
                }
            }
        }
    }

    fn handle_truth<R: Rng>(&mut self, rng: &mut R) -> GameStep {
        self.truth_count += 1;
        if self.rounds_played() >= self.round_cap {
            return self.finish();
        }
        GameStep::Spoken {
            text: self.truths.pick(rng).to_owned(),
            stinger: None,
        }
    }

    fn finish(&mut self) -> GameStep {
        self.finished = true;
        GameStep::Finale
    }

    /// Normalize what the presence sent back: lowercase, and always close
    /// with the question so the game keeps its shape.
    pub fn format_presence_reply(&mut self, reply: &str) -> String {
        let mut text = reply.trim().to_lowercase();
        if !text.contains("truth or dare") {
            text.push_str(" ...truth or dare?");
        }
        self.history.push(Turn {
            role: Role::Presence,
            text: text.clone(),
        });
        text
    }

    /// Line used when the presence cannot be reached.
    pub fn fallback_line(&self) -> String {
        "interesting... truth or dare?".to_owned()
    }
}

fn confession_prompt(message: &str) -> String {
    format!(
        "You are a cold, predatory game master. The player just confessed: \"{message}\".\n\
         React briefly (max 10 words) in a disturbing way that implies you know more \
         than they're telling.\n\
         Then end with \"truth or dare?\"\n\
         Be unsettling but not theatrical. No caps. No exclamation marks. \
         Use \"...\" for pauses."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn start_asks_the_question() {
        let mut g = GameSession::new(4);
        let step = g.handle_message("Start The Game", &mut rng());
        assert_eq!(
            step,
            GameStep::Spoken {
                text: "truth or dare?".to_owned(),
                stinger: None
            }
        );
        assert_eq!(g.rounds_played(), 0);
    }

    #[test]
    fn first_dare_is_the_candle_ritual() {
        let mut g = GameSession::new(4);
        let step = g.handle_message("dare", &mut rng());
        assert!(matches!(step, GameStep::CandleDare { .. }));
    }

    #[test]
    fn second_dare_is_the_silent_lullaby() {
        let mut g = GameSession::new(4);
        let mut r = rng();
        g.handle_message("dare", &mut r);
        let step = g.handle_message("dare", &mut r);
        assert_eq!(step, GameStep::Silent { cue: CueId::Lullaby });
    }

    #[test]
    fn third_dare_carries_an_odd_parity_stinger() {
        let mut g = GameSession::new(9);
        let mut r = rng();
        g.handle_message("dare", &mut r);
        g.handle_message("dare", &mut r);
        let step = g.handle_message("dare", &mut r);
        match step {
            GameStep::Spoken { stinger, .. } => assert_eq!(stinger, Some(CueId::ScareA)),
            other => panic!("expected spoken dare, got {other:?}"),
        }
        let step = g.handle_message("dare", &mut r);
        match step {
            GameStep::Spoken { stinger, .. } => assert_eq!(stinger, Some(CueId::ScareB)),
            other => panic!("expected spoken dare, got {other:?}"),
        }
    }

    #[test]
    fn truths_never_fire_a_stinger() {
        let mut g = GameSession::new(10);
        let mut r = rng();
        for _ in 0..3 {
            match g.handle_message("truth", &mut r) {
                GameStep::Spoken { stinger, .. } => assert_eq!(stinger, None),
                other => panic!("expected spoken truth, got {other:?}"),
            }
        }
    }

    #[test]
    fn truth_prompts_do_not_repeat_within_a_sitting() {
        let mut g = GameSession::new(100);
        let mut r = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..TRUTHS.len() {
            match g.handle_message("truth", &mut r) {
                GameStep::Spoken { text, .. } => assert!(seen.insert(text)),
                other => panic!("expected spoken truth, got {other:?}"),
            }
        }
    }

    #[test]
    fn fourth_round_ends_the_game_regardless_of_mix() {
        let mut g = GameSession::new(4);
        let mut r = rng();
        g.handle_message("truth", &mut r);
        g.handle_message("dare", &mut r);
        g.handle_message("truth", &mut r);
        let step = g.handle_message("dare", &mut r);
        assert_eq!(step, GameStep::Finale);
        assert!(g.is_finished());
        // Past the end, everything is the finale.
        assert_eq!(g.handle_message("truth", &mut r), GameStep::Finale);
    }

    #[test]
    fn confession_goes_to_the_presence_with_history() {
        let mut g = GameSession::new(4);
        let mut r = rng();
        let step = g.handle_message("i buried him under the porch", &mut r);
        match step {
            GameStep::Consult { history, .. } => {
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].text, "i buried him under the porch");
            }
            other => panic!("expected consult, got {other:?}"),
        }
    }

    #[test]
    fn presence_reply_always_ends_with_the_question() {
        let mut g = GameSession::new(4);
        let text = g.format_presence_reply("The Porch Was A Good Choice.");
        assert_eq!(text, "the porch was a good choice. ...truth or dare?");
        let text = g.format_presence_reply("i know... truth or dare?");
        assert_eq!(text, "i know... truth or dare?");
    }
}
