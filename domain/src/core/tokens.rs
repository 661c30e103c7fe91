//! Character-based token estimation.
//!
//! The proxy never runs a tokenizer; both estimates use four characters
//! per token. Text the relay writes itself (recovery turns) rounds up so
//! that any guidance costs at least one token. Input counts for
//! `count_tokens` round down, with a floor of one.

const CHARS_PER_TOKEN: usize = 4;

/// Estimate the token cost of `text`.
///
/// Empty text costs nothing; any non-empty text costs at least one token.
pub fn estimate_tokens(text: &str) -> u32 {
    estimate_tokens_for_chars(text.chars().count())
}

/// Estimate the token cost of `chars` characters of text.
pub fn estimate_tokens_for_chars(chars: usize) -> u32 {
    if chars == 0 {
        return 0;
    }
    let tokens = chars.div_ceil(CHARS_PER_TOKEN);
    u32::try_from(tokens).unwrap_or(u32::MAX)
}

/// Input token count for `chars` characters of request text: whole tokens
/// only, never less than one.
pub fn input_tokens_for_chars(chars: usize) -> u32 {
    u32::try_from(chars / CHARS_PER_TOKEN)
        .unwrap_or(u32::MAX)
        .max(1)
}
