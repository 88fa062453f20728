//! Bit-parallel Levenshtein distance
//!
//! Exact edit distance using Myers' bit-vector algorithm (in Hyyrö's
//! formulation). The shorter string is the *pattern*: each of its characters
//! owns one bit in a 64-bit word, and the text is consumed one character at
//! a time with a constant number of word operations per character.
//!
//! - Patterns of up to 64 characters use a single word.
//! - Longer patterns are cut into 64-character bands. Every band sweeps the
//!   whole text; the horizontal deltas leaving the bottom of a band are kept
//!   as one carry bit per text position and fed into the next band.
//!
//! The per-character match vectors live in a lookup table owned by
//! [`EditDistance`]. The table is scratch space: it is filled for the
//! current pattern and emptied again before the call returns. The free
//! functions [`distance`] and [`closest`] use one engine per thread.

use std::cell::RefCell;

use ahash::AHashMap;

const WORD_BITS: usize = u64::BITS as usize;

/// Characters below this code point are looked up in a flat array.
const DENSE_CHARS: usize = 256;

/// Match vectors: for every character of the loaded pattern, a mask with
/// bit `i` set where the pattern holds that character at position `i`.
struct MatchTable {
    dense: [u64; DENSE_CHARS],
    sparse: AHashMap<char, u64>,
}

impl MatchTable {
    fn new() -> Self {
        Self {
            dense: [0; DENSE_CHARS],
            sparse: AHashMap::new(),
        }
    }

    #[inline]
    fn get(&self, c: char) -> u64 {
        let idx = c as usize;
        if idx < DENSE_CHARS {
            self.dense[idx]
        } else {
            self.sparse.get(&c).copied().unwrap_or(0)
        }
    }

    #[inline]
    fn set_bit(&mut self, c: char, bit: usize) {
        let idx = c as usize;
        if idx < DENSE_CHARS {
            self.dense[idx] |= 1 << bit;
        } else {
            *self.sparse.entry(c).or_insert(0) |= 1 << bit;
        }
    }

    fn clear(&mut self, pattern: &[char]) {
        for &c in pattern {
            let idx = c as usize;
            if idx < DENSE_CHARS {
                self.dense[idx] = 0;
            }
        }
        self.sparse.clear();
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.dense.iter().all(|&mask| mask == 0) && self.sparse.is_empty()
    }
}

/// A pattern loaded into the match table. Dropping it clears the table.
struct LoadedPattern<'t> {
    table: &'t mut MatchTable,
    pattern: &'t [char],
}

impl<'t> LoadedPattern<'t> {
    fn load(table: &'t mut MatchTable, pattern: &'t [char]) -> Self {
        debug_assert!(pattern.len() <= WORD_BITS);
        for (bit, &c) in pattern.iter().enumerate() {
            table.set_bit(c, bit);
        }
        Self { table, pattern }
    }

    #[inline]
    fn eq(&self, c: char) -> u64 {
        self.table.get(c)
    }
}

impl Drop for LoadedPattern<'_> {
    fn drop(&mut self) {
        self.table.clear(self.pattern);
    }
}

/// Levenshtein distance engine.
///
/// Owns the match-vector table reused across calls. An engine is cheap to
/// create; give each thread its own (`&mut self` enforces this).
///
/// ```rust
/// use namefuzz_core::EditDistance;
///
/// let mut engine = EditDistance::new();
/// assert_eq!(engine.distance("kitten", "sitting"), 3);
/// assert_eq!(engine.closest("jon", &["jane", "john", "joan"]), Some("john"));
/// ```
pub struct EditDistance {
    table: MatchTable,
}

impl Default for EditDistance {
    fn default() -> Self {
        Self::new()
    }
}

impl EditDistance {
    /// Create an engine with an empty match table.
    pub fn new() -> Self {
        Self {
            table: MatchTable::new(),
        }
    }

    /// Minimum number of single-character insertions, deletions and
    /// substitutions turning `a` into `b`, counted in `char`s.
    pub fn distance(&mut self, a: &str, b: &str) -> usize {
        let mut text: Vec<char> = a.chars().collect();
        let mut pattern: Vec<char> = b.chars().collect();
        if text.len() < pattern.len() {
            std::mem::swap(&mut text, &mut pattern);
        }

        if pattern.is_empty() {
            return text.len();
        }

        if pattern.len() <= WORD_BITS {
            self.single_word(&pattern, &text)
        } else {
            self.multi_word(&pattern, &text)
        }
    }

    /// The candidate closest to `query`; the first one wins ties.
    ///
    /// Returns `None` for an empty candidate list.
    pub fn closest<'a, S: AsRef<str>>(&mut self, query: &str, candidates: &'a [S]) -> Option<&'a str> {
        let mut best: Option<(usize, &'a str)> = None;
        for candidate in candidates {
            let candidate = candidate.as_ref();
            let dist = self.distance(query, candidate);
            if best.map_or(true, |(best_dist, _)| dist < best_dist) {
                best = Some((dist, candidate));
            }
        }
        best.map(|(_, candidate)| candidate)
    }

    /// Pattern fits in one word: 1 <= |pattern| <= 64.
    fn single_word(&mut self, pattern: &[char], text: &[char]) -> usize {
        let peq = LoadedPattern::load(&mut self.table, pattern);
        let last = 1u64 << (pattern.len() - 1);

        let mut pv = !0u64;
        let mut mv = 0u64;
        let mut score = pattern.len();

        for &c in text {
            let eq = peq.eq(c);
            let xv = eq | mv;
            let xh = ((eq & pv).wrapping_add(pv) ^ pv) | eq;
            let mut ph = mv | !(xh | pv);
            let mut mh = pv & xh;

            if ph & last != 0 {
                score += 1;
            }
            if mh & last != 0 {
                score -= 1;
            }

            ph = (ph << 1) | 1;
            mh <<= 1;
            pv = mh | !(xv | ph);
            mv = ph & xv;
        }

        score
    }

    /// Banded computation for patterns of any non-zero length.
    fn multi_word(&mut self, pattern: &[char], text: &[char]) -> usize {
        // Horizontal deltas entering the current band, one bit per text
        // position. Row 0 of the DP matrix increases by one per column.
        let carry_words = text.len().div_ceil(WORD_BITS);
        let mut phc = vec![!0u64; carry_words];
        let mut mhc = vec![0u64; carry_words];

        let bands: Vec<&[char]> = pattern.chunks(WORD_BITS).collect();
        let mut score = pattern.len();

        for (band_idx, band) in bands.iter().enumerate() {
            let is_last_band = band_idx + 1 == bands.len();
            let peq = LoadedPattern::load(&mut self.table, band);
            let last_bit = band.len() - 1;

            let mut pv = !0u64;
            let mut mv = 0u64;

            for (i, &c) in text.iter().enumerate() {
                let word = i / WORD_BITS;
                let bit = i % WORD_BITS;

                let eq = peq.eq(c);
                let pb = (phc[word] >> bit) & 1;
                let mb = (mhc[word] >> bit) & 1;

                let xv = eq | mv;
                let xh = (((eq | mb) & pv).wrapping_add(pv) ^ pv) | eq | mb;
                let mut ph = mv | !(xh | pv);
                let mut mh = pv & xh;

                let ph_out = (ph >> last_bit) & 1;
                let mh_out = (mh >> last_bit) & 1;

                if is_last_band {
                    if ph_out != 0 {
                        score += 1;
                    }
                    if mh_out != 0 {
                        score -= 1;
                    }
                }

                if ph_out != pb {
                    phc[word] ^= 1 << bit;
                }
                if mh_out != mb {
                    mhc[word] ^= 1 << bit;
                }

                ph = (ph << 1) | pb;
                mh = (mh << 1) | mb;
                pv = mh | !(xv | ph);
                mv = ph & xv;
            }
        }

        score
    }
}

thread_local! {
    static ENGINE: RefCell<EditDistance> = RefCell::new(EditDistance::new());
}

/// Levenshtein distance using this thread's engine.
pub fn distance(a: &str, b: &str) -> usize {
    ENGINE.with(|engine| engine.borrow_mut().distance(a, b))
}

/// Closest candidate to `query` using this thread's engine.
pub fn closest<'a, S: AsRef<str>>(query: &str, candidates: &'a [S]) -> Option<&'a str> {
    ENGINE.with(|engine| engine.borrow_mut().closest(query, candidates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_identical() {
        assert_eq!(distance("hello", "hello"), 0);
        assert_eq!(distance("", ""), 0);
    }

    #[test]
    fn test_empty_side() {
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abcd", ""), 4);
    }

    #[test]
    fn test_single_edits() {
        assert_eq!(distance("hello", "hallo"), 1);
        assert_eq!(distance("helo", "hello"), 1);
        assert_eq!(distance("hello", "helo"), 1);
    }

    #[test]
    fn test_classic_pairs() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
        assert_eq!(distance("alice", "bob"), 5);
        assert_eq!(distance("smith", "johnson"), 7);
        assert_eq!(distance("a b", "b a"), 2);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(distance("jingleheimer", "jacob"), distance("jacob", "jingleheimer"));
    }

    #[test]
    fn test_full_word_pattern() {
        let a = "a".repeat(64);
        let b = format!("{}b", "a".repeat(63));
        assert_eq!(distance(&a, &b), 1);
        assert_eq!(distance(&a, &"b".repeat(64)), 64);
    }

    #[test]
    fn test_long_patterns() {
        let a = "abcdefghij".repeat(13);
        let mut b = a.clone();
        b.replace_range(5..6, "x");
        b.push_str("yz");
        assert_eq!(distance(&a, &b), 3);
        assert_eq!(distance(&a, &a), 0);
        assert_eq!(distance(&"a".repeat(150), &"b".repeat(70)), 150);
        assert_eq!(distance(&"ab".repeat(40), &"ba".repeat(40)), 2);
    }

    #[test]
    fn test_long_pattern_matches_dynamic_programming() {
        let a = "the quick brown fox jumps over the lazy dog and keeps running far away";
        let b = "a quick brown cat jumped over two lazy dogs and kept running very far off";
        assert!(a.chars().count() > WORD_BITS);
        assert_eq!(distance(a, b), strsim::levenshtein(a, b));
    }

    #[test]
    fn test_bands_reduce_to_single_word() {
        let mut engine = EditDistance::new();
        let pairs = [
            ("john", "jon"),
            ("kitten", "sitting"),
            ("jingleheimer", "schmidt"),
            ("x", "yyyy"),
        ];
        for (pattern, text) in pairs {
            let (p, t) = (chars(pattern), chars(text));
            assert_eq!(
                engine.single_word(&p, &t),
                engine.multi_word(&p, &t),
                "{pattern} / {text}"
            );
        }
    }

    #[test]
    fn test_non_latin_characters() {
        assert_eq!(distance("日本語", "日本"), 1);
        assert_eq!(distance("Москва", "Масква"), 1);
        assert_eq!(distance("🚀🚀", "🚀"), 1);
    }

    #[test]
    fn test_table_is_cleared() {
        let mut engine = EditDistance::new();
        engine.distance("josé", "jose");
        assert!(engine.table.is_empty());
        engine.distance(&"é".repeat(100), &"日".repeat(90));
        assert!(engine.table.is_empty());
        engine.distance("", "abc");
        assert!(engine.table.is_empty());
    }

    #[test]
    fn test_reuse_has_no_residue() {
        let mut engine = EditDistance::new();
        assert_eq!(engine.distance("abc", "abd"), 1);
        assert_eq!(engine.distance("xyz", "abc"), 3);
        assert_eq!(engine.distance("abc", "abd"), 1);
    }

    #[test]
    fn test_closest() {
        assert_eq!(closest("jon", &["jane", "john", "joan"]), Some("john"));
        assert_eq!(closest("x", &["aa", "bb"]), Some("aa"));
        let empty: [&str; 0] = [];
        assert_eq!(closest("x", &empty), None);
    }
}
