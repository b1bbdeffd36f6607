//! Action verbs that mark free text as a goal.

use std::collections::HashSet;

use lazy_static::lazy_static;

pub const GOAL_ACTION_VERBS: &[&str] = &[
    // Physical & Health
    "run", "walk", "exercise", "train", "swim", "bike", "hike", "climb", "dance", "stretch",
    "lift", "jog", "sprint", "jump", "play", "practice", "perform", "compete", "strengthen",
    "condition",
    // Learning & Development
    "learn", "study", "read", "write", "understand", "master", "acquire", "develop", "improve",
    "enhance", "research", "analyze", "explore", "discover", "investigate", "examine", "review",
    "memorize", "comprehend", "grasp",
    // Creation & Building
    "build", "create", "design", "make", "construct", "produce", "generate", "craft", "compose",
    "paint", "draw", "sculpt", "code", "program", "engineer", "architect", "formulate",
    "invent", "innovate",
    // Professional & Career
    "achieve", "complete", "finish", "accomplish", "deliver", "implement", "execute", "launch",
    "release", "publish", "present", "pitch", "sell", "market", "promote", "negotiate", "close",
    "secure", "obtain", "earn",
    // Organization & Management
    "organize", "manage", "lead", "coordinate", "plan", "schedule", "arrange", "structure",
    "systematize", "streamline", "optimize", "automate", "delegate", "supervise", "oversee",
    "direct", "guide", "facilitate", "administer", "govern",
    // Personal Growth
    "become", "transform", "change", "grow", "evolve", "advance", "progress", "elevate",
    "ascend", "transcend", "overcome", "conquer", "defeat", "surpass", "excel", "thrive",
    "flourish", "prosper", "succeed", "win",
    // Habits & Behavior
    "start", "begin", "initiate", "establish", "adopt", "maintain", "sustain", "continue",
    "persist", "commit", "stop", "quit", "eliminate", "reduce", "minimize", "avoid", "prevent",
    "refrain", "abstain", "cease",
    // Financial & Business
    "save", "invest", "budget", "raise", "fund", "finance", "monetize", "profit", "accumulate",
    "increase", "boost", "expand", "scale", "multiply", "compound", "diversify", "liquidate",
    // Social & Relationships
    "connect", "network", "collaborate", "partner", "join", "participate", "contribute",
    "volunteer", "help", "assist", "teach", "mentor", "coach", "educate", "inspire", "motivate",
    "influence", "persuade", "convince",
    // Communication
    "communicate", "speak", "articulate", "express", "convey", "share", "discuss", "debate",
    "listen", "hear", "empathize", "relate", "bond", "unite", "reconcile", "mediate", "resolve",
    // Mindfulness & Wellness
    "meditate", "reflect", "contemplate", "focus", "concentrate", "center", "ground", "balance",
    "harmonize", "align", "relax", "unwind", "destress", "rejuvenate", "restore", "heal",
    "recover", "regenerate", "revitalize", "energize",
    // Achievement & Measurement
    "reach", "attain", "realize", "fulfill", "satisfy", "meet", "exceed", "break", "track",
    "measure", "monitor", "assess", "evaluate", "quantify", "benchmark", "gauge", "calculate",
    "determine",
    // Adventure & Experience
    "travel", "visit", "adventure", "experience", "try", "taste", "sample", "experiment",
    "test", "challenge", "dare", "risk", "venture", "embark", "undertake", "pursue", "seek",
    "hunt", "quest",
    // Additional Action Verbs
    "fix", "repair", "solve", "troubleshoot", "debug", "patch", "mend", "renovate", "upgrade",
    "update", "modernize", "revolutionize", "disrupt", "pioneer", "champion", "advocate",
    "support", "defend", "protect", "preserve", "conserve", "nurture", "cultivate", "foster",
    "encourage", "enable", "empower", "simplify", "clarify", "document", "record", "capture",
    "chronicle", "archive", "catalog", "index", "categorize", "prioritize", "rank", "sort",
    "filter", "select", "choose", "decide", "conclude", "finalize", "integrate", "merge",
    "combine", "blend", "fuse", "synthesize", "consolidate", "unify", "standardize",
    "normalize",
];

lazy_static! {
    static ref VERB_SET: HashSet<&'static str> = GOAL_ACTION_VERBS.iter().copied().collect();
}

/// True when `text` contains a vocabulary verb as a whole word.
///
/// Words are maximal runs of ASCII letters, digits and `_`, compared
/// case-insensitively.
pub fn contains_action_verb(text: &str) -> bool {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|word| !word.is_empty())
        .any(|word| VERB_SET.contains(word.to_ascii_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_has_no_duplicates() {
        assert_eq!(VERB_SET.len(), GOAL_ACTION_VERBS.len());
        assert!(GOAL_ACTION_VERBS.len() > 250);
    }

    #[test]
    fn test_whole_word_match() {
        assert!(contains_action_verb("learn to code"));
        assert!(contains_action_verb("I want to RUN a marathon"));
        assert!(contains_action_verb("finish: the thesis"));
        // "running" and "relearn" are not vocabulary words
        assert!(!contains_action_verb("running shoes"));
        assert!(!contains_action_verb("relearned nothing"));
        assert!(!contains_action_verb("learn_more"));
    }

    #[test]
    fn test_non_ascii_letters_split_words() {
        assert!(contains_action_verb("ñread more"));
        assert!(!contains_action_verb("aprender algo nuevo"));
    }
}
