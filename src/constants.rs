//! Cross-cutting, shared constants.
//!
//! Values that are tunable at runtime (threshold, entity groups, batch cap) are only
//! defaults here; [`crate::config::Config`] carries the effective values.

/// Placeholder stored for any field no extraction strategy could fill.
pub const SENTINEL: &str = "N/A";

/// Score at or above which a candidate is marked Selected.
pub const DEFAULT_SELECTION_THRESHOLD: f32 = 50.0;

/// Scale from cosine similarity to match score.
pub const SCORE_SCALE: f32 = 100.0;

/// Entity group whose spans are treated as skill candidates.
pub const DEFAULT_SKILL_ENTITY_GROUP: &str = "MISC";

/// Entity group whose spans are treated as person names.
pub const DEFAULT_PERSON_ENTITY_GROUP: &str = "PER";

/// Upper bound on documents accepted in one batch.
pub const DEFAULT_MAX_DOCUMENTS: usize = 25;

/// Embedding width of all-MiniLM-L6-v2.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// BERT-family positional limit, shared by the embedder and the tagger.
pub const BERT_MAX_SEQ_LEN: usize = 512;

/// Encoder input limit for the seq2seq generator (tokens).
pub const GENERATOR_MAX_INPUT_TOKENS: usize = 512;

pub mod summary {
    //! Summarizer bounds and fixed responses.

    /// Input is cut to this many characters before generation.
    pub const MAX_INPUT_CHARS: usize = 512;
    /// Hard cap on generated summary length (tokens).
    pub const MAX_SUMMARY_TOKENS: usize = 130;
    /// Preferred minimum summary length (tokens), clamped to the cap.
    pub const MIN_SUMMARY_TOKENS: usize = 30;
    /// Inputs shorter than this many characters are not summarized.
    pub const MIN_INPUT_CHARS: usize = 10;

    pub const EMPTY_MESSAGE: &str = "No content to summarize.";
    pub const TOO_SHORT_MESSAGE: &str = "Text too short to summarize.";
    pub const ERROR_MESSAGE: &str = "Error during summarization.";

    /// T5 task prefix for abstractive summarization.
    pub const TASK_PREFIX: &str = "summarize: ";
}

pub mod education {
    //! Generative education fallback.

    pub const PROMPT_PREFIX: &str = "Extract the educational qualifications from this CV: ";
    /// Characters of CV text included in the prompt.
    pub const PROMPT_SLICE_CHARS: usize = 1000;
    pub const MAX_NEW_TOKENS: usize = 64;
}

/// Entity-tagger terms too broad to count as skills.
pub const SKILL_STOPLIST: &[&str] = &[
    "Data",
    "Language",
    "Development",
    "Tech",
    "Testing",
    "Control",
];

/// Skills matched by case-insensitive substring even when the tagger misses them.
pub const CANONICAL_SKILLS: &[&str] = &[
    "Python",
    "Java",
    "C++",
    "SQL",
    "Machine Learning",
    "AI",
    "JavaScript",
    "AWS",
    "React",
    "Node.js",
    "Swift",
    "Django",
    "PostgreSQL",
    "Git",
    "Jira",
    "CSS",
    "MySQL",
    "Pandas",
    "Redux",
];
