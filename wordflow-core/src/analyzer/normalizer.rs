//! Policy-driven text normalization.

use wordflow_types::CleaningPolicy;

use super::cleaner;

/// Whitespace as understood by `str::split_whitespace` for ASCII input.
#[inline(always)]
const fn is_ascii_ws(b: u8) -> bool {
    matches!(b, b' ' | 0x09..=0x0D)
}

/// Policy-driven text normalizer.
///
/// Output always satisfies the tokenizer contract: lowercase, tokens
/// separated by exactly one ASCII space, no leading or trailing space.
///
/// - [`CleaningPolicy::Basic`] lowercases (Unicode-aware) and collapses any
///   whitespace run into one space. Punctuation and digits stay attached to
///   their words.
/// - [`CleaningPolicy::Aggressive`] first strips tags, entities and URLs,
///   then keeps ASCII letters only: every other character (digits,
///   punctuation, non-ASCII) acts as a separator.
///
/// # Examples
///
/// ```
/// use wordflow_core::analyzer::TextNormalizer;
/// use wordflow_types::CleaningPolicy;
///
/// let basic = TextNormalizer::new(CleaningPolicy::Basic);
/// assert_eq!(basic.normalize("  HELLO,  World  "), "hello, world");
///
/// let aggressive = TextNormalizer::new(CleaningPolicy::Aggressive);
/// assert_eq!(aggressive.normalize("<p>HELLO, World 42</p>"), "hello world");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer {
    policy: CleaningPolicy,
}

impl TextNormalizer {
    /// Creates a normalizer for the given policy.
    pub const fn new(policy: CleaningPolicy) -> Self {
        Self { policy }
    }

    /// The policy this normalizer applies.
    #[inline]
    pub const fn policy(&self) -> CleaningPolicy {
        self.policy
    }

    /// Normalizes text into an existing buffer.
    ///
    /// The buffer is cleared first; its capacity is reused.
    #[inline]
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        match self.policy {
            CleaningPolicy::Basic => fold_whitespace_into(input, out),
            CleaningPolicy::Aggressive => {
                let cleaned = cleaner::strip_markup(input);
                fold_alpha_into(&cleaned, out);
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }
}

/// Lowercases `input` and collapses whitespace runs into single spaces.
///
/// ASCII bytes take a table-free fast path; anything else is decoded and
/// lowercased per `char`, which may expand (`İ` → `i̇`).
pub fn fold_whitespace_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let bytes = input.as_bytes();
    let mut i = 0usize;
    let mut pending_space = false;

    while i < bytes.len() {
        let b = bytes[i];

        if b < 0x80 {
            i += 1;
            if is_ascii_ws(b) {
                pending_space = true;
                continue;
            }
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(b.to_ascii_lowercase() as char);
            continue;
        }

        // `i` always sits on a char boundary: ASCII steps by one byte,
        // everything else by its encoded length.
        let Some(ch) = input[i..].chars().next() else {
            break;
        };
        i += ch.len_utf8();

        if ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.extend(ch.to_lowercase());
    }
}

/// Keeps lowercased ASCII letters and turns every other byte into a separator.
///
/// Multi-byte UTF-8 sequences never contain ASCII letters, so working on raw
/// bytes cannot split a letter run inside a character.
pub fn fold_alpha_into(input: &str, out: &mut String) {
    out.clear();
    out.reserve(input.len());

    let mut pending_space = false;

    for &b in input.as_bytes() {
        if b.is_ascii_alphabetic() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(b.to_ascii_lowercase() as char);
        } else {
            pending_space = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(input: &str) -> String {
        TextNormalizer::new(CleaningPolicy::Basic).normalize(input)
    }

    fn aggressive(input: &str) -> String {
        TextNormalizer::new(CleaningPolicy::Aggressive).normalize(input)
    }

    #[test]
    fn basic_lowercases_ascii() {
        assert_eq!(basic("HELLO"), "hello");
        assert_eq!(basic("HeLlO"), "hello");
        assert_eq!(basic("123 ABC!"), "123 abc!");
    }

    #[test]
    fn basic_collapses_and_trims_whitespace() {
        assert_eq!(basic("hello   world"), "hello world");
        assert_eq!(basic("hello\t\nworld"), "hello world");
        assert_eq!(basic("   hello \r\n world   "), "hello world");
        assert_eq!(basic("a\x0bb\x0cc"), "a b c");
    }

    #[test]
    fn basic_whitespace_only_is_empty() {
        assert_eq!(basic(""), "");
        assert_eq!(basic(" \t\n\r "), "");
        assert_eq!(basic("\u{3000}\u{00A0}"), "");
    }

    #[test]
    fn basic_unicode_lowercase() {
        assert_eq!(basic("ÜBER Café"), "über café");
        assert_eq!(basic("ПРИВЕТ мир"), "привет мир");
    }

    #[test]
    fn basic_unicode_whitespace_separates() {
        assert_eq!(basic("alpha\u{00A0}beta\u{2003}gamma"), "alpha beta gamma");
    }

    #[test]
    fn basic_expanding_lowercase_stays_valid() {
        let out = basic("İstanbul");
        assert!(std::str::from_utf8(out.as_bytes()).is_ok());
        assert!(out.ends_with("stanbul"));
    }

    #[test]
    fn basic_is_idempotent() {
        for s in ["hello world", "foo   bar", "ÜBER Café", "  x  "] {
            let once = basic(s);
            assert_eq!(basic(&once), once);
        }
    }

    #[test]
    fn aggressive_keeps_letters_only() {
        assert_eq!(aggressive("Hello, World!"), "hello world");
        assert_eq!(aggressive("abc123def"), "abc def");
        assert_eq!(aggressive("e-mail"), "e mail");
    }

    #[test]
    fn aggressive_splits_on_non_ascii() {
        assert_eq!(aggressive("café society"), "caf society");
        assert_eq!(aggressive("naïve"), "na ve");
    }

    #[test]
    fn aggressive_strips_markup_first() {
        assert_eq!(aggressive("<span class=\"x\">Net&nbsp;Sales</span>"), "net sales");
    }

    #[test]
    fn aggressive_non_letters_only_is_empty() {
        assert_eq!(aggressive("123 456 !!! ---"), "");
        assert_eq!(aggressive("こんにちは"), "");
    }

    #[test]
    fn output_has_no_double_or_edge_spaces() {
        for s in ["  a  b  ", "<p> x </p>", "1 2 abc 3 def 4"] {
            for out in [basic(s), aggressive(s)] {
                assert!(!out.contains("  "), "{out:?}");
                assert!(!out.starts_with(' '), "{out:?}");
                assert!(!out.ends_with(' '), "{out:?}");
            }
        }
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = TextNormalizer::new(CleaningPolicy::Basic);
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.normalize_into("HELLO", &mut buf);
        assert_eq!(buf, "hello");
        normalizer.normalize_into("WORLD", &mut buf);
        assert_eq!(buf, "world");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn default_policy_is_aggressive() {
        assert_eq!(TextNormalizer::default().policy(), CleaningPolicy::Aggressive);
    }
}
