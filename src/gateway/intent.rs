//! Two-branch chat intent classification.
//!
//! The conversational layer only has to decide one thing: is the message
//! small talk, or should it hit the search engine? A lexicon check covers
//! the small-talk branch; everything else is treated as a product query.

/// What a chat message asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Greeting, thanks, goodbye — answer without searching.
    Chat,
    /// Anything else — run it through the engine.
    Search,
}

const SMALL_TALK: &[&str] = &[
    "hello", "hi", "hey", "hola", "howdy", "morning", "afternoon", "evening", "thanks",
    "thank", "thx", "bye", "goodbye", "ciao", "ok", "okay", "cool", "great", "nice", "please",
    "you", "how", "are", "doing", "good", "there",
];

/// Classifies a chat message.
///
/// A message is small talk only if every word is in the small-talk lexicon;
/// a single product-ish word tips it to [`Intent::Search`].
pub fn classify(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    let mut words = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .peekable();

    if words.peek().is_none() {
        return Intent::Chat;
    }

    if words.all(|w| SMALL_TALK.contains(&w)) {
        Intent::Chat
    } else {
        Intent::Search
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greetings_are_chat() {
        assert_eq!(classify("hello"), Intent::Chat);
        assert_eq!(classify("Hi there!"), Intent::Chat);
        assert_eq!(classify("how are you doing"), Intent::Chat);
        assert_eq!(classify("thanks, bye"), Intent::Chat);
    }

    #[test]
    fn test_product_queries_are_search() {
        assert_eq!(classify("red summer dress"), Intent::Search);
        assert_eq!(classify("hi, show me blue sneakers"), Intent::Search);
        assert_eq!(classify("nike"), Intent::Search);
    }

    #[test]
    fn test_blank_message_is_chat() {
        assert_eq!(classify(""), Intent::Chat);
        assert_eq!(classify("   "), Intent::Chat);
        assert_eq!(classify("!?"), Intent::Chat);
    }
}
