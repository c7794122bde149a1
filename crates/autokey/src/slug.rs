//! Module: slug
//! Responsibility: turning joined key-source text into a URL-safe slug.
//! Does not own: joining, uniqueness, or fallback-to-identity policy.
//!
//! Invariants:
//! - Output contains only lowercase alphanumerics and single interior `-`.
//! - Pure and deterministic for a given (text, locale) pair.

/// Separator characters that normalize to a hyphen rather than vanish.
const SEPARATORS: &[char] = &[' ', '\t', '\n', '\r', '-', '_', '.', '/', '\\', ':'];

/// Slugify arbitrary text: lowercase, transliterate common Latin
/// diacritics, collapse separators to single hyphens, drop the rest.
///
/// `locale` tweaks transliteration; a `de*` locale expands umlauts to
/// digraphs (`ä` → `ae`) instead of stripping the diacritic.
#[must_use]
pub fn slug(text: &str, locale: Option<&str>) -> String {
    let german = locale.is_some_and(|l| l.starts_with("de"));

    let mut out = String::with_capacity(text.len());
    let mut pending_sep = false;

    for ch in text.chars() {
        for lower in ch.to_lowercase() {
            if SEPARATORS.contains(&lower) {
                pending_sep = !out.is_empty();
                continue;
            }
            let Some(mapped) = transliterate(lower, german) else {
                // Unmapped punctuation and symbols contribute nothing.
                if !lower.is_alphanumeric() {
                    continue;
                }
                if pending_sep {
                    out.push('-');
                    pending_sep = false;
                }
                out.push(lower);
                continue;
            };
            if pending_sep {
                out.push('-');
                pending_sep = false;
            }
            out.push_str(mapped);
        }
    }

    out
}

// Lowercase-input transliteration table for common Latin diacritics.
const fn transliterate(ch: char, german: bool) -> Option<&'static str> {
    let mapped = match ch {
        'à' | 'á' | 'â' | 'ã' | 'å' => "a",
        'ä' => {
            if german {
                "ae"
            } else {
                "a"
            }
        }
        'è' | 'é' | 'ê' | 'ë' => "e",
        'ì' | 'í' | 'î' | 'ï' => "i",
        'ò' | 'ó' | 'ô' | 'õ' => "o",
        'ö' => {
            if german {
                "oe"
            } else {
                "o"
            }
        }
        'ù' | 'ú' | 'û' => "u",
        'ü' => {
            if german {
                "ue"
            } else {
                "u"
            }
        }
        'ç' => "c",
        'ñ' => "n",
        'ß' => "ss",
        'æ' => "ae",
        'ø' => "o",
        _ => return None,
    };

    Some(mapped)
}
