// Copyright (C) 2020-2026 Andy Kurnia.

// Letters are plain uppercase ascii bytes. 0 is never a letter, the board
// uses it for an empty square.

pub const NUM_LETTERS: usize = 26;

pub struct Tile {
    label: u8,
    freq: u8,
    score: i8,
}

pub struct StaticAlphabet<'a> {
    tiles: &'a [Tile],
    num_tiles: u16,
}

pub enum Alphabet<'a> {
    Static(StaticAlphabet<'a>),
}

#[inline(always)]
pub fn is_letter(c: u8) -> bool {
    c.is_ascii_uppercase()
}

// callers must pass a letter.
#[inline(always)]
pub fn index_of(c: u8) -> usize {
    debug_assert!(is_letter(c), "{c:#x} is not a letter");
    (c - b'A') as usize
}

#[inline(always)]
pub fn letter_at(idx: usize) -> u8 {
    b'A' + idx as u8
}

// multiset of letters, used for racks and line contents.
pub type Tally = [u8; NUM_LETTERS];

pub fn tally_of(letters: &[u8]) -> Tally {
    let mut tally = [0u8; NUM_LETTERS];
    for &c in letters {
        if is_letter(c) {
            tally[index_of(c)] += 1;
        }
    }
    tally
}

impl<'a> Alphabet<'a> {
    #[inline(always)]
    pub fn len(&self) -> usize {
        match self {
            Alphabet::Static(x) => x.tiles.len(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    fn get(&self, c: u8) -> &'a Tile {
        match self {
            Alphabet::Static(x) => {
                let tile = &x.tiles[index_of(c)];
                debug_assert_eq!(tile.label, c);
                tile
            }
        }
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> u16 {
        match self {
            Alphabet::Static(x) => x.num_tiles,
        }
    }

    #[inline(always)]
    pub fn score(&self, c: u8) -> i8 {
        self.get(c).score
    }

    #[inline(always)]
    pub fn freq(&self, c: u8) -> u8 {
        self.get(c).freq
    }

    pub fn letters(&self) -> impl Iterator<Item = u8> + 'a {
        let tiles = match self {
            Alphabet::Static(x) => x.tiles,
        };
        tiles.iter().map(|tile| tile.label)
    }

    pub fn fmt_rack(&self, rack: &[u8]) -> String {
        let mut s = String::with_capacity(rack.len());
        for &c in rack {
            s.push(if is_letter(c) { c as char } else { '?' });
        }
        s
    }
}

macro_rules! tile {
    ($label:literal, $freq:literal, $score:literal) => {
        Tile {
            label: $label,
            freq: $freq,
            score: $score,
        }
    };
}

pub static ENGLISH_ALPHABET: Alphabet = Alphabet::Static(StaticAlphabet {
    tiles: &[
        tile!(b'A', 9, 1),
        tile!(b'B', 2, 3),
        tile!(b'C', 2, 3),
        tile!(b'D', 2, 4),
        tile!(b'E', 12, 1),
        tile!(b'F', 2, 4),
        tile!(b'G', 3, 2),
        tile!(b'H', 2, 4),
        tile!(b'I', 9, 1),
        tile!(b'J', 1, 8),
        tile!(b'K', 1, 5),
        tile!(b'L', 4, 1),
        tile!(b'M', 2, 3),
        tile!(b'N', 6, 1),
        tile!(b'O', 8, 1),
        tile!(b'P', 2, 3),
        tile!(b'Q', 1, 10),
        tile!(b'R', 6, 1),
        tile!(b'S', 4, 1),
        tile!(b'T', 6, 1),
        tile!(b'U', 4, 1),
        tile!(b'V', 2, 4),
        tile!(b'W', 2, 4),
        tile!(b'X', 1, 8),
        tile!(b'Y', 2, 4),
        tile!(b'Z', 1, 10),
    ],
    num_tiles: 96,
});
