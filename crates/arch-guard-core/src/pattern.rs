//! Glob-with-captures pattern language: compilation, lists, and maps.
//!
//! A pattern is a literal path string interleaved with four meta-constructs
//! (`*`, `**`, `$*`/`$**`, `$N`). Compilation is parameterized by a
//! [`DollarMode`] that controls which of those constructs are legal in a
//! given configuration position (a simple list, a map key, or a map value).

use regex::Regex;
use thiserror::Error;

/// Controls which `$`-constructs are legal while compiling a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DollarMode {
    /// `$` is not allowed at all (simple lists: `tool`, `db`, `god`).
    None,
    /// `$` must be followed by `*` or `**`, recording a named capture
    /// (map keys: `allowOnlyIn`/`allowAdditionally`).
    KeyStars,
    /// `$` must be followed by a single digit `1..=9`, a back-reference to
    /// one of `key_captures` captures carried from the paired key
    /// (map values).
    ValueDigits {
        /// Number of captures available from the paired key pattern.
        key_captures: usize,
    },
}

/// Errors returned while compiling a pattern to a regular expression.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A `$` appears where [`DollarMode::None`] forbids it.
    #[error("a '$' has to be escaped for this configuration key (pattern `{pattern}`)")]
    NoDollarAllowed {
        /// The offending pattern text.
        pattern: String,
    },
    /// [`DollarMode::KeyStars`] saw `$` not followed by `*`/`**`.
    #[error(
        "a '$' has to be escaped or followed by one or two unescaped '*'s (pattern `{pattern}`)"
    )]
    DollarMustBeFollowedByStar {
        /// The offending pattern text.
        pattern: String,
    },
    /// [`DollarMode::ValueDigits`] saw `$` not followed by a digit `1..=9`.
    #[error(
        "a '$' has to be escaped or followed by a single digit (1-9) (pattern `{pattern}`)"
    )]
    DollarMustBeFollowedByDigit {
        /// The offending pattern text.
        pattern: String,
    },
    /// `$N` requested an index beyond the key's capture count.
    #[error("the maximum possible dollar index is {max}, found index {found} (pattern `{pattern}`)")]
    CaptureIndexOutOfRange {
        /// Highest legal index.
        max: usize,
        /// Index requested by the pattern.
        found: usize,
        /// The offending pattern text.
        pattern: String,
    },
    /// The expression assembled from the pattern failed to compile.
    #[error("illegal regular expression for pattern `{pattern}`: {source}")]
    IllegalRegex {
        /// The offending pattern text.
        pattern: String,
        /// The underlying regex compile error.
        #[source]
        source: regex::Error,
    },
}

/// A literal pattern paired with its compiled regular expression.
///
/// The literal text is kept alongside the compiled form: error messages and
/// the [`std::fmt::Display`] impl quote the literal, never the regex.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    regex: Regex,
    dollar_indices: Vec<usize>,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}
impl Eq for Pattern {}

impl std::fmt::Display for Pattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self.text)
    }
}

impl Pattern {
    /// Returns the original literal pattern text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the 0-based key-capture indices this pattern's `$N`
    /// back-references refer to, in the order they appear as capturing
    /// groups in the compiled regex. Empty for patterns with no `$N`.
    #[must_use]
    pub fn dollar_indices(&self) -> &[usize] {
        &self.dollar_indices
    }
}

/// Compiles `text` into a [`Pattern`] under the given capture mode.
///
/// On success, also returns the number of key-captures (`$*`/`$**`)
/// encountered, which callers pass as `key_captures` when compiling the
/// paired value patterns.
///
/// # Errors
///
/// Returns a [`CompileError`] variant describing why `text` could not be
/// compiled; see the type's documentation for conditions.
pub fn compile_pattern(text: &str, mode: DollarMode) -> Result<(Pattern, usize), CompileError> {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::new();
    let mut i = 0usize;
    let mut key_capture_count = 0usize;
    let mut dollar_indices = Vec::new();

    while i < chars.len() {
        let c = chars[i];
        match c {
            '\\' => {
                let (backslashes, next) = count_backslashes(&chars, i);
                let escapes_next = backslashes % 2 == 1;
                if escapes_next && next < chars.len() {
                    // odd number of backslashes: the following '$'/'*' is escaped.
                    push_literal_run(&mut out, &chars, i, backslashes);
                    push_escaped_literal(&mut out, chars[next]);
                    i = next + 1;
                } else {
                    // even number: backslashes pass through untouched, then
                    // re-examine the following construct normally.
                    push_literal_run(&mut out, &chars, i, backslashes);
                    i = next;
                }
            }
            '$' => {
                let (pat, consumed, cap) =
                    handle_dollar(&chars, i, mode, key_capture_count, text)?;
                out.push_str(&pat);
                if let Some(idx) = cap {
                    dollar_indices.push(idx);
                } else {
                    key_capture_count += 1;
                }
                i += consumed;
            }
            '*' => {
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push_str("(?:.*)");
                    i += 2;
                } else {
                    out.push_str("(?:[^/]*)");
                    i += 1;
                }
            }
            _ => {
                out.push_str(&regex::escape(&c.to_string()));
                i += 1;
            }
        }
    }

    let anchored = if mode == DollarMode::KeyStars {
        format!("^{out}$")
    } else {
        format!("^{out}")
    };

    let regex = Regex::new(&anchored).map_err(|source| CompileError::IllegalRegex {
        pattern: text.to_string(),
        source,
    })?;

    let dollar_indices = if matches!(mode, DollarMode::ValueDigits { .. }) {
        dollar_indices
    } else {
        Vec::new()
    };

    Ok((
        Pattern {
            text: text.to_string(),
            regex,
            dollar_indices,
        },
        key_capture_count,
    ))
}

/// Counts leading backslashes starting at `start`; returns
/// `(count, index_after_the_run)`.
fn count_backslashes(chars: &[char], start: usize) -> (usize, usize) {
    let mut n = 0;
    let mut i = start;
    while i < chars.len() && chars[i] == '\\' {
        n += 1;
        i += 1;
    }
    (n, i)
}

/// Emits `count / 2` literal backslashes (each pair collapses to one
/// literal `\`), starting at `start` in `chars`.
fn push_literal_run(out: &mut String, chars: &[char], start: usize, count: usize) {
    let literal_backslashes = count / 2;
    for _ in 0..literal_backslashes {
        out.push_str(r"\\");
    }
    let _ = chars.get(start);
}

fn push_escaped_literal(out: &mut String, c: char) {
    out.push_str(&regex::escape(&c.to_string()));
}

/// Handles a `$` construct at `chars[i]` (known unescaped). Returns the
/// regex fragment, the number of source chars consumed (including the
/// `$`), and `Some(index)` if this is a `$N` back-reference (as opposed to
/// a `$*`/`$**` key-capture, which returns `None`).
fn handle_dollar(
    chars: &[char],
    i: usize,
    mode: DollarMode,
    key_capture_count: usize,
    full_text: &str,
) -> Result<(String, usize, Option<usize>), CompileError> {
    if mode == DollarMode::None {
        return Err(CompileError::NoDollarAllowed {
            pattern: full_text.to_string(),
        });
    }

    let next = chars.get(i + 1).copied();

    match mode {
        DollarMode::KeyStars => match next {
            Some('*') => {
                if chars.get(i + 2).copied() == Some('*') {
                    Ok(("(.*)".to_string(), 3, None))
                } else {
                    Ok(("([^/]*)".to_string(), 2, None))
                }
            }
            _ => Err(CompileError::DollarMustBeFollowedByStar {
                pattern: full_text.to_string(),
            }),
        },
        DollarMode::ValueDigits { key_captures } => match next {
            Some(d) if d.is_ascii_digit() && d != '0' => {
                let idx = (d as u8 - b'1') as usize;
                if idx >= key_captures {
                    return Err(CompileError::CaptureIndexOutOfRange {
                        max: key_captures,
                        found: idx + 1,
                        pattern: full_text.to_string(),
                    });
                }
                Ok(("(.*)".to_string(), 2, Some(idx)))
            }
            _ => Err(CompileError::DollarMustBeFollowedByDigit {
                pattern: full_text.to_string(),
            }),
        },
        DollarMode::None => unreachable!("handled above"),
    }
}

/// An ordered sequence of patterns, matched first-match with the tie-breaks
/// from spec §4.1.
#[derive(Debug, Clone, Default)]
pub struct PatternList(Vec<Pattern>);

impl PatternList {
    /// Builds a pattern list from raw strings, all compiled under
    /// [`DollarMode::None`] (the mode used for `tool`/`db`/`god`).
    ///
    /// # Errors
    ///
    /// Returns the first [`CompileError`] hit while compiling `patterns`.
    pub fn from_simple(patterns: &[String]) -> Result<Self, CompileError> {
        let mut out = Vec::with_capacity(patterns.len());
        for p in patterns {
            let (pattern, _) = compile_pattern(p, DollarMode::None)?;
            out.push(pattern);
        }
        Ok(Self(out))
    }

    /// Builds a pattern list from already-compiled patterns (used for
    /// map values, compiled under `ValueDigits` by the caller).
    #[must_use]
    pub fn from_compiled(patterns: Vec<Pattern>) -> Self {
        Self(patterns)
    }

    /// Returns true if the list has no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the patterns in declared order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.0
    }

    /// Returns `(matched_at_all, full)`. See [`Self::match_index`].
    #[must_use]
    pub fn match_str(&self, s: &str, dollars: &[String]) -> (bool, bool) {
        let (idx, full) = self.match_index(s, dollars);
        (idx >= 0, full)
    }

    /// Returns `(index, full)`: the index of the matching pattern (`-1` if
    /// none), and whether that match consumed the entire input.
    ///
    /// Tie-break for partial matches: the *last* matching pattern's index
    /// is returned (spec §4.1, §8).
    #[must_use]
    pub fn match_index(&self, s: &str, dollars: &[String]) -> (isize, bool) {
        let mut idx: isize = -1;
        for (i, p) in self.0.iter().enumerate() {
            if let Some(m) = p.regex.find(s) {
                if m.start() != 0 {
                    continue;
                }
                let captured = captures_as_strings(&p.regex, s);
                if !match_dollars(dollars, &captured, &p.dollar_indices) {
                    continue;
                }
                let len = m.end();
                if len >= s.len() {
                    return (i as isize, true);
                }
                if s.as_bytes().get(len) == Some(&b'/') {
                    idx = i as isize;
                }
            }
        }
        (idx, false)
    }

    /// Returns the matched prefix length of the last pattern that matches
    /// `s` starting at position 0 (full or partial), or `None` if no
    /// pattern in the list matches at all. Used to compare match "depth"
    /// between two lists (e.g. `db` vs `tool`) when neither fully matches.
    #[must_use]
    pub fn last_match_len(&self, s: &str) -> Option<usize> {
        let mut best = None;
        for p in &self.0 {
            if let Some(m) = p.regex.find(s) {
                if m.start() == 0 {
                    best = Some(m.end());
                }
            }
        }
        best
    }

    /// Returns true if `s` is a strict prefix of some pattern's match,
    /// ending exactly at a `/` boundary in `s`, OR `s + "/"` itself is a
    /// prefix boundary — used by downstream consumers to test "is `s` a
    /// sub-package of one of these patterns". See spec §4.1 trailing-`/`
    /// edge case.
    #[must_use]
    pub fn is_prefix_of_any(&self, s: &str) -> bool {
        let (idx, full) = self.match_index(s, &[]);
        if full {
            return true;
        }
        if idx >= 0 {
            return true;
        }
        let with_slash = format!("{s}/");
        let (idx2, full2) = self.match_index(&with_slash, &[]);
        full2 || idx2 >= 0
    }
}

fn captures_as_strings(regex: &Regex, s: &str) -> Vec<String> {
    regex
        .captures(s)
        .map(|c| {
            (1..c.len())
                .map(|i| c.get(i).map(|m| m.as_str().to_string()).unwrap_or_default())
                .collect()
        })
        .unwrap_or_default()
}

fn match_dollars(given: &[String], found: &[String], idxs: &[usize]) -> bool {
    for (f, &idx) in found.iter().zip(idxs.iter()) {
        match given.get(idx) {
            Some(g) if g == f => {}
            _ => return false,
        }
    }
    true
}

/// A key pattern paired with the value [`PatternList`] it guards.
#[derive(Debug, Clone)]
pub struct PatternGroup {
    /// The key-side pattern (compiled under [`DollarMode::KeyStars`]).
    pub left: Pattern,
    /// The value-side list (compiled under `ValueDigits` carrying `left`'s
    /// capture count).
    pub right: PatternList,
}

/// A mapping from key-pattern text to a [`PatternGroup`].
///
/// Stored as an insertion-ordered `Vec`, not a `HashMap`: iteration order
/// is part of the documented (if deliberately unspecified by the upstream
/// policy author) first-match behavior, and hashing would make tie-breaks
/// depend on hash-seed rather than declaration order. See DESIGN.md.
#[derive(Debug, Clone, Default)]
pub struct PatternMap(Vec<(String, PatternGroup)>);

impl PatternMap {
    /// Builds an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Inserts a key/group pair, preserving insertion order.
    pub fn insert(&mut self, key: String, group: PatternGroup) {
        self.0.push((key, group));
    }

    /// Returns true if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates `(key, group)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PatternGroup)> {
        self.0.iter().map(|(k, g)| (k.as_str(), g))
    }

    /// Finds the first entry whose key-regex matches `s` fully (map keys
    /// are anchored at both ends). Returns the group and its captures.
    #[must_use]
    pub fn lookup(&self, s: &str) -> Option<(&PatternGroup, Vec<String>)> {
        if s.is_empty() {
            return None;
        }
        for (_, group) in &self.0 {
            if group.left.regex.is_match(s) {
                let dollars = captures_as_strings(&group.left.regex, s);
                return Some((group, dollars));
            }
        }
        None
    }

    /// Checks the map for the given key/value pair, trying the four
    /// `(strict, loose)` combinations in the documented order:
    /// `(strict_key, strict_value)`, `(strict_key, value)`,
    /// `(key, strict_value)`, `(key, value)`. Returns `(has_key, has_value)`;
    /// the first positive `has_value` wins, otherwise `has_key` reflects
    /// whether any key matched at all.
    #[must_use]
    pub fn has_key_value(
        &self,
        key: &str,
        strict_key: &str,
        value: &str,
        strict_value: &str,
    ) -> (bool, bool) {
        let mut has_key = false;
        for (k, v) in [
            (strict_key, strict_value),
            (strict_key, value),
            (key, strict_value),
            (key, value),
        ] {
            if k.is_empty() {
                continue;
            }
            if let Some((group, dollars)) = self.lookup(k) {
                has_key = true;
                if !v.is_empty() {
                    let (_, full) = group.right.match_str(v, &dollars);
                    if full {
                        return (true, true);
                    }
                }
            }
        }
        (has_key, false)
    }
}
