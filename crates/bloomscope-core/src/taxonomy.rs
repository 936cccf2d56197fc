//! Bloom's Taxonomy keyword table.
//!
//! Every level carries two keyword lists: ordinary keywords (weight 1) and
//! strong indicators (weight 4). Keywords are lowercase substring patterns,
//! not whole words, so "use" also fires inside "because". The table is a
//! process-wide constant; [`all_levels`] yields levels in declaration order,
//! which is the tie-break order everywhere else in the crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A cognitive level of Bloom's Taxonomy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Level {
    #[serde(rename = "L1-Remember")]
    Remember,
    #[serde(rename = "L2-Understand")]
    Understand,
    #[serde(rename = "L3-Apply")]
    Apply,
    #[serde(rename = "L4-Analyze")]
    Analyze,
    #[serde(rename = "L5-Evaluate")]
    Evaluate,
    #[serde(rename = "L6-Create")]
    Create,
}

/// Keyword lists for a single level.
#[derive(Debug)]
pub struct KeywordSet {
    /// Ordinary keywords, +1 per substring match.
    pub keywords: &'static [&'static str],
    /// Strong indicators, +4 per substring match.
    pub strong_indicators: &'static [&'static str],
}

/// Number of taxonomy levels.
pub const LEVEL_COUNT: usize = 6;

static LEVELS: [Level; LEVEL_COUNT] = [
    Level::Remember,
    Level::Understand,
    Level::Apply,
    Level::Analyze,
    Level::Evaluate,
    Level::Create,
];

/// All levels in declaration order (Remember → Create).
pub fn all_levels() -> &'static [Level] {
    &LEVELS
}

/// Keyword lists for `level`.
pub fn level_keywords(level: Level) -> &'static KeywordSet {
    match level {
        Level::Remember => &REMEMBER,
        Level::Understand => &UNDERSTAND,
        Level::Apply => &APPLY,
        Level::Analyze => &ANALYZE,
        Level::Evaluate => &EVALUATE,
        Level::Create => &CREATE,
    }
}

impl Level {
    /// 1-based rank (Remember = 1, Create = 6).
    pub fn rank(self) -> u8 {
        self.index() as u8 + 1
    }

    /// Zero-based position in declaration order.
    pub fn index(self) -> usize {
        match self {
            Level::Remember => 0,
            Level::Understand => 1,
            Level::Apply => 2,
            Level::Analyze => 3,
            Level::Evaluate => 4,
            Level::Create => 5,
        }
    }

    /// Short name, e.g. "Remember".
    pub fn name(self) -> &'static str {
        match self {
            Level::Remember => "Remember",
            Level::Understand => "Understand",
            Level::Apply => "Apply",
            Level::Analyze => "Analyze",
            Level::Evaluate => "Evaluate",
            Level::Create => "Create",
        }
    }

    /// Prefixed label, e.g. "L1-Remember".
    pub fn label(self) -> &'static str {
        match self {
            Level::Remember => "L1-Remember",
            Level::Understand => "L2-Understand",
            Level::Apply => "L3-Apply",
            Level::Analyze => "L4-Analyze",
            Level::Evaluate => "L5-Evaluate",
            Level::Create => "L6-Create",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Level::Remember => "Recall facts and basic concepts",
            Level::Understand => "Explain ideas and concepts",
            Level::Apply => "Use information in new situations",
            Level::Analyze => "Draw connections among ideas",
            Level::Evaluate => "Justify a stand or decision",
            Level::Create => "Produce new or original work",
        }
    }

    /// Hex display color used by report renderers.
    pub fn color(self) -> &'static str {
        match self {
            Level::Remember => "#FF6B6B",
            Level::Understand => "#4ECDC4",
            Level::Apply => "#45B7D1",
            Level::Analyze => "#96CEB4",
            Level::Evaluate => "#FFEAA7",
            Level::Create => "#DDA0DD",
        }
    }

    pub fn keywords(self) -> &'static KeywordSet {
        level_keywords(self)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Level {
    type Err = String;

    /// Accepts the short name, the label, `L<n>` or the bare rank.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        LEVELS
            .iter()
            .copied()
            .find(|level| {
                let rank = level.rank().to_string();
                needle == level.name().to_lowercase()
                    || needle == level.label().to_lowercase()
                    || needle == format!("l{rank}")
                    || needle == rank
            })
            .ok_or_else(|| format!("unknown level: {s}"))
    }
}

static REMEMBER: KeywordSet = KeywordSet {
    keywords: &[
        "define", "describe", "identify", "list", "name", "recall", "recognize", "state", "tell",
        "what", "when", "where", "who", "which", "how many", "what is", "can you name", "find",
        "locate", "match", "select", "choose", "label", "memorize", "repeat", "reproduce",
        "retrieve", "write", "recite", "record", "relate", "underline", "arrange", "duplicate",
        "order", "quote", "cite", "enumerate", "tabulate", "specify", "mention", "point out",
        "show", "indicate", "pick", "spell", "count", "draw", "outline", "trace", "copy",
        "fill in", "complete", "mark", "tick", "circle", "highlight", "note", "jot down",
    ],
    strong_indicators: &[
        "what is", "define", "list", "name", "identify", "recall", "state", "who", "when",
        "where", "cite", "enumerate", "specify", "mention",
    ],
};

static UNDERSTAND: KeywordSet = KeywordSet {
    keywords: &[
        "explain", "describe", "discuss", "interpret", "summarize", "paraphrase", "translate",
        "illustrate", "demonstrate", "compare", "contrast", "classify", "categorize", "organize",
        "outline", "restate", "clarify", "elaborate", "give examples", "what does this mean",
        "how would you explain", "what is the main idea", "comprehend", "convert", "defend",
        "distinguish", "estimate", "extend", "generalize", "infer", "predict", "rewrite",
        "associate", "compute", "discuss", "express", "locate", "recognize", "report", "review",
        "transform", "characterize", "conclude", "differentiate", "expand", "interpolate",
        "rephrase", "substitute", "visualize", "decode", "decipher", "grasp", "perceive",
        "understand", "comprehend",
    ],
    strong_indicators: &[
        "explain", "describe", "interpret", "summarize", "paraphrase", "discuss", "outline",
        "clarify", "comprehend", "convert", "translate", "illustrate",
    ],
};

static APPLY: KeywordSet = KeywordSet {
    keywords: &[
        "apply", "use", "implement", "solve", "calculate", "demonstrate", "execute", "perform",
        "show", "illustrate", "practice", "construct", "build", "create", "develop", "design",
        "produce", "make", "build", "how would you use", "what would happen if",
        "solve this problem", "apply this to", "employ", "utilize", "operate", "manipulate",
        "modify", "prepare", "relate", "schedule", "sketch", "dramatize", "experiment",
        "interview", "paint", "simulate", "adapt", "carry out", "complete", "examine", "exercise",
        "interpret", "model", "organize", "restructure", "role-play", "sequence", "transfer",
        "adopt", "capitalize on", "consume", "deploy", "handle", "put to use",
        "take advantage of", "work with",
    ],
    strong_indicators: &[
        "apply", "use", "implement", "solve", "calculate", "demonstrate", "show", "illustrate",
        "practice", "employ", "utilize", "execute", "perform",
    ],
};

static ANALYZE: KeywordSet = KeywordSet {
    keywords: &[
        "analyze", "examine", "investigate", "compare", "contrast", "differentiate",
        "distinguish", "examine", "explore", "identify", "infer", "outline", "structure",
        "organize", "relate", "connect", "break down", "classify", "categorize",
        "what are the parts", "how does this relate to", "what evidence",
        "what are the differences", "what are the similarities", "appraise", "calculate",
        "criticize", "discriminate", "examine", "experiment", "question", "test", "detect",
        "diagnose", "dissect", "illustrate", "inspect", "relate", "select", "separate",
        "subdivide", "survey", "take apart", "deconstruct", "parse", "scrutinize", "audit",
        "blueprint", "characterize", "correlate", "deduce", "determine", "diagram", "divide",
        "focus", "isolate", "limit", "prioritize", "reduce", "simplify", "uncover",
    ],
    strong_indicators: &[
        "analyze", "examine", "compare", "contrast", "differentiate", "investigate",
        "break down", "categorize", "dissect", "deconstruct", "scrutinize",
    ],
};

static EVALUATE: KeywordSet = KeywordSet {
    keywords: &[
        "evaluate", "assess", "judge", "critique", "appraise", "rate", "rank", "grade", "score",
        "measure", "test", "examine", "review", "analyze", "compare", "contrast", "justify",
        "defend", "argue", "support", "what do you think about", "how would you rate",
        "what is your opinion", "is this good or bad", "what are the pros and cons", "conclude",
        "criticize", "decide", "discriminate", "prioritize", "recommend", "summarize",
        "validate", "verify", "award", "choose", "estimate", "interpret", "predict", "value",
        "weigh", "attach", "check", "monitor", "perceive", "prize", "select", "agree",
        "convince", "dispute", "influence", "persuade", "prove", "disprove", "assess merit",
        "determine value", "make judgment", "form opinion", "reach conclusion",
        "establish criteria", "set standards",
    ],
    strong_indicators: &[
        "evaluate", "assess", "judge", "critique", "rate", "justify", "argue", "defend",
        "support", "appraise", "validate", "criticize",
    ],
};

static CREATE: KeywordSet = KeywordSet {
    keywords: &[
        "create", "design", "develop", "build", "construct", "produce", "make", "compose",
        "write", "draw", "paint", "sculpt", "invent", "formulate", "plan", "organize",
        "assemble", "generate", "compose", "what would you create", "how would you design",
        "what would you build", "can you make", "invent a solution", "combine", "compile",
        "devise", "modify", "originate", "rearrange", "reconstruct", "reorganize", "revise",
        "rewrite", "transform", "adapt", "anticipate", "collaborate", "communicate", "compare",
        "facilitate", "integrate", "intervene", "model", "negotiate", "propose", "synthesize",
        "systematize", "theorize", "validate", "establish", "fabricate", "fashion",
        "hypothesize", "incorporate", "initiate", "innovate", "institute", "network", "perform",
        "portray", "substitute",
    ],
    strong_indicators: &[
        "create", "design", "develop", "build", "construct", "produce", "make", "compose",
        "generate", "invent", "formulate", "devise",
    ],
};
