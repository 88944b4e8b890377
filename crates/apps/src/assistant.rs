//! Keyword-matched help about the three models.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Back to the main menu.
    Leave,
    Say(&'static str),
}

pub const GREETING: &str =
    "\n=== RetailPredict 360 - Assistant ===\nType 'exit' to go back to main menu.\n";

// Continuation lines line up under the text after the "Bot: " prefix.
const FOOTFALL: &str = concat!(
    "The footfall model predicts how many people will visit the store on a given day.\n",
    "     It uses features like day of week, weekend, holiday, and promotions.",
);
const DELIVERY: &str = concat!(
    "The delivery model predicts expected delivery time in minutes,\n",
    "     using distance, items, order value, time of day, traffic, and rider experience.",
);
const CLV: &str = concat!(
    "CLV (Customer Lifetime Value) estimates how much revenue a customer will bring\n",
    "     in the next 12 months. We use tenure, order frequency, order value, recency,\n",
    "     discount usage, and return rate to estimate this.",
);
const HELP: &str = concat!(
    "I can explain the three models (footfall, delivery, CLV),\n",
    "     guide you on how to use them, and suggest which module to run.",
);
const WHICH: &str = concat!(
    "Use Footfall if you're planning staff and promotions,\n",
    "     Delivery Time if you're optimizing logistics,\n",
    "     and CLV if you're designing marketing and loyalty programs.",
);
const UNKNOWN: &str =
    "I'm not sure about that yet. Try asking about 'footfall', 'delivery', or 'CLV'.";

/// Rules are checked in order; the first keyword hit answers.
pub fn reply(message: &str) -> Reply {
    let text = message.trim().to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| text.contains(w));

    if matches!(text.as_str(), "exit" | "quit" | "back") {
        Reply::Leave
    } else if has(&["footfall"]) {
        Reply::Say(FOOTFALL)
    } else if has(&["delivery", "time"]) {
        Reply::Say(DELIVERY)
    } else if has(&["clv", "lifetime"]) {
        Reply::Say(CLV)
    } else if has(&["help", "what can you do"]) {
        Reply::Say(HELP)
    } else if has(&["which model", "use"]) {
        Reply::Say(WHICH)
    } else {
        Reply::Say(UNKNOWN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_on_exit_words() {
        for w in ["exit", " QUIT ", "back"] {
            assert_eq!(reply(w), Reply::Leave);
        }
        assert_ne!(reply("go back please"), Reply::Leave);
    }

    #[test]
    fn first_matching_topic_wins() {
        assert_eq!(reply("Tell me about FOOTFALL and delivery"), Reply::Say(FOOTFALL));
        assert_eq!(reply("how long does delivery take"), Reply::Say(DELIVERY));
        assert_eq!(reply("explain CLV please"), Reply::Say(CLV));
        assert_eq!(reply("what can you do"), Reply::Say(HELP));
        assert_eq!(reply("which model should I pick"), Reply::Say(WHICH));
        assert_eq!(reply("weather tomorrow"), Reply::Say(UNKNOWN));
    }

    #[test]
    fn continuation_lines_keep_their_indent() {
        for answer in [FOOTFALL, DELIVERY, CLV, HELP, WHICH] {
            for line in answer.lines().skip(1) {
                assert!(line.starts_with("     ") && !line.starts_with("      "), "{line:?}");
            }
        }
        assert_eq!(CLV.lines().count(), 3);
    }
}
