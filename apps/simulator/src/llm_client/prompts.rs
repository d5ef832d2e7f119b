// Shared prompt fragments.
// Each module that needs LLM calls defines its own prompts.rs alongside it;
// this file holds the pieces reused across them.

/// Appended to prompts whose output is stored verbatim.
pub const PLAIN_TEXT_INSTRUCTION: &str = "\
    Respond in plain text. Do NOT describe your reasoning or planning steps. \
    Do NOT prefix the response with labels such as 'Thought:' or 'Answer:'.";

/// Appended to prompts that must yield exactly one item and nothing else.
pub const SINGLE_ITEM_INSTRUCTION: &str = "Return ONLY the requested text, nothing else.";
