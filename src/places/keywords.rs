//! Keyword sentiment scoring over free-text reviews.

/// Phrases signalling a lively, pleasant or recommended spot.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    // atmosphere
    "great atmosphere",
    "great vibe",
    "love this",
    "amazing",
    "perfect spot",
    "favorite",
    "always busy",
    "bustling",
    "lively",
    "vibrant",
    "energy",
    "fun",
    // recommendation
    "recommend",
    "must visit",
    "come back",
    "worth it",
    "definitely",
    "enjoyed",
    "awesome",
    "wonderful",
    // crowds
    "crowded",
    "packed",
    "lots of people",
    "popular",
    "full",
    "busy",
    "everyone",
    "gathering",
    // lingering
    "stayed for",
    "sat for",
    "spent time",
    "hang out",
    "relaxing",
    "chill",
    "comfortable",
    "cozy",
    // activity
    "people watching",
    "watched people",
    "great for",
    "nice place to sit",
    "good spot",
    "loved it",
];

/// Phrases signalling an avoided, empty or unpleasant spot.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    // avoidance
    "nothing here",
    "nothing special",
    "not much",
    "pass by",
    "passing through",
    "just walked",
    "keep walking",
    "wouldn't stop",
    "didn't stay",
    // disappointment
    "disappointed",
    "expected more",
    "overhyped",
    "not worth",
    "waste",
    "skip",
    "avoid",
    "better places",
    "meh",
    "okay at best",
    // emptiness
    "empty",
    "dead",
    "quiet",
    "nobody",
    "deserted",
    "no one",
    "closed",
    "abandoned",
    // discomfort
    "uncomfortable",
    "sketchy",
    "unsafe",
    "dirty",
    "smelly",
    "run down",
    "needs work",
    "neglected",
    // dullness
    "boring",
    "dull",
    "nothing to do",
    "bland",
];

/// Tally of keyword hits over a batch of reviews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeywordScore {
    /// Reviews containing at least one positive phrase.
    pub positive: usize,
    /// Reviews containing at least one negative phrase.
    pub negative: usize,
    /// Reviews inspected.
    pub total: usize,
    /// `(positive - negative) / total * 10`, or `0` with no reviews.
    pub score: f64,
}

/// Score reviews against the built-in keyword lists.
pub fn score_reviews<S: AsRef<str>>(texts: &[S]) -> KeywordScore {
    score_with(texts, POSITIVE_KEYWORDS, NEGATIVE_KEYWORDS)
}

/// Score reviews against arbitrary lowercase keyword lists.
///
/// Matching is a case-insensitive substring test. A review may count towards
/// both tallies; overlaps are not deduplicated.
pub fn score_with<S: AsRef<str>>(texts: &[S], positive: &[&str], negative: &[&str]) -> KeywordScore {
    let mut pos = 0usize;
    let mut neg = 0usize;
    for text in texts {
        let lower = text.as_ref().to_lowercase();
        if mentions_any(&lower, positive) {
            pos += 1;
        }
        if mentions_any(&lower, negative) {
            neg += 1;
        }
    }

    let total = texts.len();
    let score = if total > 0 {
        (pos as f64 - neg as f64) / total as f64 * 10.0
    } else {
        0.0
    };

    KeywordScore {
        positive: pos,
        negative: neg,
        total,
        score,
    }
}

fn mentions_any(lower: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
}
