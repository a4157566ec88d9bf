//! Deck loading — a deck is an ordered list of text cards.
//!
//! File format: cards separated by lines containing only `---`.  The first
//! non-empty line of a card is its title, the rest is the body.  Order in
//! the file is stacking order.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeckError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no cards found in {path}")]
    Empty { path: PathBuf },
}

/// One card — a passive visual container.  Its position in [`Deck::cards`]
/// is its stack index.
#[derive(Debug, Clone)]
pub struct Card {
    pub title: String,
    pub body: Vec<String>,
}

/// An ordered deck of cards.
#[derive(Debug, Clone)]
pub struct Deck {
    pub cards: Vec<Card>,
    /// Where the deck came from, for the title bar.  `None` = built-in demo.
    pub source: Option<PathBuf>,
}

impl Deck {
    /// Load a deck from a `---`-separated text file.
    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let text = std::fs::read_to_string(path).map_err(|source| DeckError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let cards = parse_cards(&text);
        if cards.is_empty() {
            return Err(DeckError::Empty {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!("loaded {} cards from {}", cards.len(), path.display());
        Ok(Self {
            cards,
            source: Some(path.to_path_buf()),
        })
    }

    /// Built-in demo deck shown when no file is given.
    pub fn demo() -> Self {
        let cards = [
            (
                "Scroll me",
                "Scroll down with the mouse wheel or j/k.\nEach card pins near the top of the viewport\nand shrinks as the next one slides over it.",
            ),
            (
                "Pinning",
                "While pinned, a card tracks the scroll\nposition exactly — one row of scroll, one\nrow of movement.  No easing, no lag.",
            ),
            (
                "Stacking",
                "Cards stagger by a fixed offset per index,\nso the pinned pile reads as a fanned deck\nrather than a single flat card.",
            ),
            (
                "Release",
                "Once the end marker reaches mid-viewport\nthe whole stack lets go together and normal\nscrolling resumes below it.",
            ),
            (
                "The end",
                "When this card pins, the stack is complete —\nwatch the status bar.  Scroll back up and\ndown again and it re-fires.",
            ),
        ];
        Self {
            cards: cards
                .iter()
                .map(|(title, body)| Card {
                    title: (*title).to_string(),
                    body: body.lines().map(str::to_string).collect(),
                })
                .collect(),
            source: None,
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

fn parse_cards(text: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    for block in text.split("\n---") {
        // Re-check the separator on line boundaries: a block may still
        // start with a stray "---" when the file opens with one.
        let block = block.strip_prefix("---").unwrap_or(block);
        let mut lines = block.lines().skip_while(|l| l.trim().is_empty());
        let Some(title) = lines.next() else {
            continue;
        };
        let body: Vec<String> = lines.map(|l| l.trim_end().to_string()).collect();
        // Drop trailing blank lines left by the separator.
        let trailing_blanks = body.iter().rev().take_while(|l| l.is_empty()).count();
        let body = body[..body.len() - trailing_blanks].to_vec();
        cards.push(Card {
            title: title.trim().to_string(),
            body,
        });
    }
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_separated_cards() {
        let cards = parse_cards("First\nline a\nline b\n---\nSecond\nline c\n");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].title, "First");
        assert_eq!(cards[0].body, vec!["line a", "line b"]);
        assert_eq!(cards[1].title, "Second");
        assert_eq!(cards[1].body, vec!["line c"]);
    }

    #[test]
    fn single_card_without_separator() {
        let cards = parse_cards("Only\nbody\n");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "Only");
    }

    #[test]
    fn blank_input_yields_no_cards() {
        assert!(parse_cards("").is_empty());
        assert!(parse_cards("\n\n---\n\n").is_empty());
    }

    #[test]
    fn leading_separator_is_tolerated() {
        let cards = parse_cards("---\nFirst\nbody\n");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].title, "First");
    }

    #[test]
    fn demo_deck_is_nonempty_and_ordered() {
        let deck = Deck::demo();
        assert!(deck.len() >= 3);
        assert_eq!(deck.cards[0].title, "Scroll me");
        assert_eq!(deck.cards.last().map(|c| c.title.as_str()), Some("The end"));
    }
}
