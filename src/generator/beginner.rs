use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

use crate::generator::TextGenerator;

/// One random word repeated, to drill a single motion.
pub struct BeginnerGenerator {
    words: Vec<String>,
    rng: SmallRng,
}

impl BeginnerGenerator {
    pub fn new(words: Vec<String>, rng: SmallRng) -> Self {
        Self { words, rng }
    }
}

impl TextGenerator for BeginnerGenerator {
    fn generate(&mut self, word_count: usize) -> String {
        let Some(word) = self.words.choose(&mut self.rng) else {
            return String::new();
        };
        vec![word.as_str(); word_count].join(" ")
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn repeats_a_single_word() {
        let words = vec!["home".to_string(), "row".to_string()];
        let mut generator = BeginnerGenerator::new(words, SmallRng::seed_from_u64(11));
        let text = generator.generate(5);
        let parts: Vec<&str> = text.split(' ').collect();
        assert_eq!(parts.len(), 5);
        assert!(parts.iter().all(|w| *w == parts[0]));
    }
}
