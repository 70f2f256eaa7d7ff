//! Crisis-language screening and the companion's keyword replies.

use rand::seq::SliceRandom;

use crate::models::helpline::{CRISIS_LINE_NAME, CRISIS_LINE_NUMBER};

const CRITICAL_PHRASES: &[&str] = &[
    "suicide",
    "kill myself",
    "end my life",
    "want to die",
    "harm myself",
    "self harm",
    "cut myself",
    "overdose",
    "jump off",
    "hang myself",
    "end it all",
    "hurt myself",
    "no point living",
    "better off dead",
    "आत्महत्या",
    "मरना चाहता हूं",
    "जीना नहीं चाहता",
    "खुद को मारना",
];

struct KeywordReply {
    keywords: &'static [&'static str],
    reply: &'static str,
}

const KEYWORD_REPLIES: &[KeywordReply] = &[
    KeywordReply {
        keywords: &["anxious", "anxiety", "worried", "panic"],
        reply: "I understand you're feeling anxious. That's a very common experience among students. Try the 4-7-8 breathing technique: breathe in for 4 counts, hold for 7, exhale for 8. Would you like me to guide you through some other anxiety management strategies?",
    },
    KeywordReply {
        keywords: &["depressed", "sad", "hopeless", "down"],
        reply: "I hear that you're going through a difficult time. These feelings are valid, and you're not alone. Many students experience similar challenges. Have you been able to maintain your daily routines like eating and sleeping?",
    },
    KeywordReply {
        keywords: &["stressed", "overwhelmed", "pressure", "exam"],
        reply: "Academic stress is very common, especially during exam periods. Let's break this down - what specific aspect is causing you the most stress? Sometimes organizing tasks into smaller, manageable pieces can help.",
    },
    KeywordReply {
        keywords: &["lonely", "isolated", "alone", "friends"],
        reply: "Feeling lonely, especially in college, is more common than you might think. Many students struggle with social connections. Have you considered joining any clubs or study groups?",
    },
];

const DEFAULT_REPLIES: &[&str] = &[
    "Thank you for sharing that with me. Can you tell me more about what's on your mind?",
    "I hear you. It sounds like a lot to handle. What has this experience been like for you?",
    "That sounds really challenging. I'm here to listen without judgment.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionReply {
    pub text: String,
    pub is_crisis: bool,
}

pub fn contains_crisis_language(text: &str) -> bool {
    let lower = text.to_lowercase();
    CRITICAL_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

pub fn crisis_message() -> String {
    format!(
        "I'm really concerned by what you've shared. It's incredibly brave of you to talk about it. \
         Please know that your life is valuable, and immediate help is available. \
         You can reach the {CRISIS_LINE_NAME} at {CRISIS_LINE_NUMBER}. Help is just a call away."
    )
}

pub fn companion_reply(text: &str) -> CompanionReply {
    if contains_crisis_language(text) {
        return CompanionReply {
            text: crisis_message(),
            is_crisis: true,
        };
    }

    let lower = text.to_lowercase();
    let reply = KEYWORD_REPLIES
        .iter()
        .find(|entry| entry.keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|entry| entry.reply)
        .or_else(|| DEFAULT_REPLIES.choose(&mut rand::thread_rng()).copied())
        .unwrap_or(DEFAULT_REPLIES[0]);

    CompanionReply {
        text: reply.to_string(),
        is_crisis: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crisis_phrases_match_case_insensitively() {
        assert!(contains_crisis_language("Sometimes I want to DIE"));
        assert!(contains_crisis_language("thinking about Suicide lately"));
        assert!(contains_crisis_language("मैं आत्महत्या के बारे में सोचता हूँ"));
        assert!(!contains_crisis_language("my exams are killing me"));
        assert!(!contains_crisis_language(""));
    }

    #[test]
    fn crisis_reply_wins_over_keywords() {
        let reply = companion_reply("I'm anxious and want to end it all");
        assert!(reply.is_crisis);
        assert!(reply.text.contains("080-26995000"));
    }

    #[test]
    fn first_matching_keyword_group_replies() {
        let reply = companion_reply("Feeling so worried and lonely");
        assert!(!reply.is_crisis);
        assert!(reply.text.starts_with("I understand you're feeling anxious"));

        let reply = companion_reply("exam tomorrow");
        assert!(reply.text.starts_with("Academic stress"));
    }

    #[test]
    fn unmatched_text_gets_a_default_reply() {
        let reply = companion_reply("hello there");
        assert!(!reply.is_crisis);
        assert!(DEFAULT_REPLIES.contains(&reply.text.as_str()));
    }
}
