use super::messages::TrackId;

/// Walks the background-music playlist: the intro and interlude each play
/// once, then the set settles into the loop pair. Skipping bounces between
/// the two loops only; the intro never comes back.
#[derive(Debug)]
pub struct TrackSequencer {
    current: TrackId,
}

impl TrackSequencer {
    pub fn new() -> Self {
        Self {
            current: TrackId::Intro,
        }
    }

    pub fn current(&self) -> TrackId {
        self.current
    }

    /// Restart from the top, e.g. after music was toggled off and on.
    pub fn reset(&mut self) -> TrackId {
        self.current = TrackId::Intro;
        self.current
    }

    /// Track ended naturally.
    pub fn advance(&mut self) -> TrackId {
        self.current = match self.current {
            TrackId::Intro => TrackId::Interlude,
            TrackId::Interlude => TrackId::LoopA,
            TrackId::LoopA => TrackId::LoopA,
            TrackId::LoopB => TrackId::LoopB,
        };
        self.current
    }

    /// Manual skip. From the one-shot tracks this drops straight into the
    /// loop pair; inside the pair it alternates.
    pub fn skip(&mut self) -> TrackId {
        self.current = match self.current {
            TrackId::Intro | TrackId::Interlude => TrackId::LoopA,
            TrackId::LoopA => TrackId::LoopB,
            TrackId::LoopB => TrackId::LoopA,
        };
        self.current
    }
}

impl Default for TrackSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_settles_into_loop_a() {
        let mut s = TrackSequencer::new();
        assert_eq!(s.current(), TrackId::Intro);
        assert_eq!(s.advance(), TrackId::Interlude);
        assert_eq!(s.advance(), TrackId::LoopA);
        assert_eq!(s.advance(), TrackId::LoopA);
        assert_eq!(s.advance(), TrackId::LoopA);
    }

    #[test]
    fn only_the_loop_pair_repeats_in_place() {
        // The one-shot tracks drain and advance; the loop pair plays as a
        // repeating source and stays put until skipped away.
        assert!(!TrackId::Intro.loops());
        assert!(!TrackId::Interlude.loops());
        assert!(TrackId::LoopA.loops());
        assert!(TrackId::LoopB.loops());
    }

    #[test]
    fn skip_alternates_within_loop_pair() {
        let mut s = TrackSequencer::new();
        s.advance();
        s.advance();
        assert_eq!(s.skip(), TrackId::LoopB);
        assert_eq!(s.skip(), TrackId::LoopA);
        assert_eq!(s.skip(), TrackId::LoopB);
    }

    #[test]
    fn skip_from_intro_jumps_to_loops() {
        let mut s = TrackSequencer::new();
        assert_eq!(s.skip(), TrackId::LoopA);
        // Intro is gone for good after a skip.
        assert_eq!(s.advance(), TrackId::LoopA);
    }

    #[test]
    fn reset_replays_the_intro() {
        let mut s = TrackSequencer::new();
        s.skip();
        s.skip();
        assert_eq!(s.reset(), TrackId::Intro);
        assert_eq!(s.advance(), TrackId::Interlude);
    }
}
