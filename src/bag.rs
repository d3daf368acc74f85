// Copyright (C) 2020-2026 Andy Kurnia.

use super::alphabet;
use rand::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct Bag(pub Vec<u8>);

impl Bag {
    pub fn new(alphabet: &alphabet::Alphabet) -> Bag {
        let mut bag = Vec::with_capacity(alphabet.num_tiles() as usize);
        for c in alphabet.letters() {
            for _ in 0..alphabet.freq(c) {
                bag.push(c);
            }
        }
        Bag(bag)
    }

    pub fn shuffle(&mut self, mut rng: &mut dyn RngCore) {
        self.0.shuffle(&mut rng);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<u8> {
        self.0.pop()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    // draws until the rack is full or the bag runs out.
    pub fn replenish(&mut self, rack: &mut Vec<u8>, rack_size: usize) {
        while rack.len() < rack_size {
            match self.pop() {
                Some(c) => rack.push(c),
                None => break,
            }
        }
    }

    // takes specific letters out, e.g. when a rack is given rather than drawn.
    pub fn remove_letters(&mut self, letters: &[u8]) -> Result<(), u8> {
        for &c in letters {
            let pos = self.0.iter().rposition(|&t| t == c).ok_or(c)?;
            self.0.swap_remove(pos);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bag_holds_the_whole_supply() {
        let bag = Bag::new(&alphabet::ENGLISH_ALPHABET);
        assert_eq!(bag.len(), 96);
        assert_eq!(bag.0.iter().filter(|&&c| c == b'E').count(), 12);
    }

    #[test]
    fn replenish_stops_when_empty() {
        let mut bag = Bag(vec![b'A', b'B']);
        let mut rack = vec![b'C'];
        bag.replenish(&mut rack, 6);
        assert_eq!(rack, vec![b'C', b'B', b'A']);
        assert!(bag.is_empty());
    }

    #[test]
    fn shuffle_keeps_contents() {
        let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(7);
        let mut bag = Bag::new(&alphabet::ENGLISH_ALPHABET);
        bag.shuffle(&mut rng);
        let mut sorted = bag.0.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, Bag::new(&alphabet::ENGLISH_ALPHABET).0);
    }

    #[test]
    fn remove_letters_reports_missing() {
        let mut bag = Bag(vec![b'A', b'B', b'A']);
        assert_eq!(bag.remove_letters(b"AA"), Ok(()));
        assert_eq!(bag.remove_letters(b"A"), Err(b'A'));
    }
}
