//! Crate-wide constants.

/// Canned refusal returned when the banned-term pre-check trips.
pub const REFUSAL_INPUT: &str =
    "Sorry, I cannot process requests containing inappropriate content.";

/// Canned refusal substituted when the safety judge flags an answer.
pub const REFUSAL_OUTPUT: &str = "Sorry, I cannot provide that response.";

/// Exact fallback answer when neither internal documents nor web results
/// produced anything. Callers match on this string, keep it stable.
pub const NO_ANSWER: &str = "Information not found.";

/// Canned redirect for queries outside the supported topical domains.
pub const IRRELEVANT_ANSWER: &str =
    "I can only help with IT and finance questions. Please ask about company IT \
     or finance topics.";

/// Maximum number of ranked excerpts returned by the document relevance search.
pub const MAX_EXCERPTS: usize = 10;

/// Tokens this short carry no signal and are dropped during normalization.
pub const MIN_TOKEN_LEN: usize = 3;

/// Top-k documents fetched from the vector store per query.
pub const RETRIEVAL_TOP_K: usize = 4;

/// Web search result cap.
pub const WEB_SEARCH_MAX_RESULTS: usize = 5;
