//! Token frequency histogram that remembers first-seen order.

use std::fmt;

use crate::Segmenter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterFrequency {
    entries: Vec<(String, usize)>,
}

impl CharacterFrequency {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Counts the tokens `segmenter` produces for `text`.
    #[must_use]
    pub fn from_segments<S: Segmenter + ?Sized>(segmenter: &S, text: &str) -> Self {
        segmenter.segment(text).into_iter().collect()
    }

    pub fn add(&mut self, token: &str) {
        if let Some((_, count)) = self.entries.iter_mut().find(|(t, _)| t == token) {
            *count += 1;
        } else {
            self.entries.push((token.to_string(), 1));
        }
    }

    #[must_use]
    pub fn get(&self, token: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, c)| *c)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(t, c)| (t.as_str(), *c))
    }
}

impl<'a> FromIterator<&'a str> for CharacterFrequency {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut freq = Self::new();
        for token in iter {
            freq.add(token);
        }
        freq
    }
}

/// `token:count` pairs joined by `"; "`.
impl fmt::Display for CharacterFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (token, count)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{token}:{count}")?;
        }
        Ok(())
    }
}
