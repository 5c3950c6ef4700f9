use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::generator::TextGenerator;

/// Random words drawn with replacement into a pool that is reshuffled for
/// every round and only redrawn on `update`.
pub struct PracticeGenerator {
    words: Vec<String>,
    pool: Vec<String>,
    rng: SmallRng,
}

impl PracticeGenerator {
    pub fn new(words: Vec<String>, rng: SmallRng) -> Self {
        Self {
            words,
            pool: Vec::new(),
            rng,
        }
    }

    pub fn pool(&self) -> &[String] {
        &self.pool
    }

    fn draw(&mut self, word_count: usize) {
        self.pool = (0..word_count)
            .filter_map(|_| self.words.choose(&mut self.rng).cloned())
            .collect();
    }
}

impl TextGenerator for PracticeGenerator {
    fn generate(&mut self, word_count: usize) -> String {
        if self.pool.len() != word_count {
            self.draw(word_count);
        }
        let mut round = self.pool.clone();
        round.shuffle(&mut self.rng);
        round.join(" ")
    }

    fn update(&mut self, word_count: usize) {
        self.draw(word_count);
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    fn words() -> Vec<String> {
        ["alpha", "bravo", "charlie", "delta", "echo"]
            .iter()
            .map(|w| w.to_string())
            .collect()
    }

    #[test]
    fn generates_requested_word_count() {
        let mut generator = PracticeGenerator::new(words(), SmallRng::seed_from_u64(7));
        let text = generator.generate(8);
        assert_eq!(text.split(' ').count(), 8);
        assert!(text.split(' ').all(|w| words().contains(&w.to_string())));
    }

    #[test]
    fn rounds_reuse_the_pool_until_update() {
        let mut generator = PracticeGenerator::new(words(), SmallRng::seed_from_u64(1));
        let mut first: Vec<String> = generator.generate(6).split(' ').map(String::from).collect();
        let mut second: Vec<String> = generator.generate(6).split(' ').map(String::from).collect();
        first.sort();
        second.sort();
        assert_eq!(first, second);

        let mut pool = generator.pool().to_vec();
        pool.sort();
        assert_eq!(pool, first);
    }

    #[test]
    fn update_redraws_the_pool() {
        let many: Vec<String> = (0..500).map(|i| format!("w{i}")).collect();
        let mut generator = PracticeGenerator::new(many, SmallRng::seed_from_u64(3));
        generator.generate(8);
        let before = generator.pool().to_vec();
        generator.update(8);
        assert_eq!(generator.pool().len(), 8);
        assert_ne!(generator.pool(), before.as_slice());
    }
}
