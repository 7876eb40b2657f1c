use rand::Rng;

pub const TRUTHS: &[&str] = &[
    "have you ever thought about killing anyone...",
    "how many have you buried...",
    "if you could kill someone... who would it be...",
    "what's the most wicked thing you've done...",
    "who have you hurt that still haunts you...",
    "what secret would destroy you if it came out...",
    "whose death have you wished for...",
    "what do you see when you close your eyes at night...",
    "who trusted you that shouldn't have...",
    "what memory do you try to erase but can't...",
];

pub const DARES: &[&str] = &[
    "look behind you. slowly.",
    "say your mother's name out loud. now.",
    "go to your window. wave. i want to see.",
    "put your hand on your heart. feel that? that's mine now.",
    "look at your reflection. count to five. don't blink.",
    "whisper 'i'm sorry' to the darkness.",
    "close your eyes for ten seconds. don't open them early.",
    "say your own name three times. like you're calling yourself.",
];

/// Draws prompts without repeating until the pool is exhausted, then
/// resets and keeps going.
#[derive(Debug)]
pub struct PromptPool {
    items: &'static [&'static str],
    used: Vec<usize>,
}

impl PromptPool {
    pub fn new(items: &'static [&'static str]) -> Self {
        Self {
            items,
            used: Vec::new(),
        }
    }

    pub fn pick<R: Rng>(&mut self, rng: &mut R) -> &'static str {
        let available: Vec<usize> = (0..self.items.len())
            .filter(|i| !self.used.contains(i))
            .collect();
        let index = if available.is_empty() {
            self.used.clear();
            rng.gen_range(0..self.items.len())
        } else {
            available[rng.gen_range(0..available.len())]
        };
        self.used.push(index);
        self.items[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn no_repeats_until_pool_exhausted() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut pool = PromptPool::new(TRUTHS);
        let drawn: HashSet<&str> = (0..TRUTHS.len()).map(|_| pool.pick(&mut rng)).collect();
        assert_eq!(drawn.len(), TRUTHS.len());
    }

    #[test]
    fn exhausted_pool_resets_and_keeps_serving() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut pool = PromptPool::new(DARES);
        for _ in 0..DARES.len() {
            pool.pick(&mut rng);
        }
        // One past the end still returns a valid prompt.
        let again = pool.pick(&mut rng);
        assert!(DARES.contains(&again));
    }
}
