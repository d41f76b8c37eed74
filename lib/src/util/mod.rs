mod sink;

pub use sink::*;

use std::borrow::Cow;

/// Characters that separate words in a slug. Everything else that isn't
/// alphanumeric is dropped without introducing a word break.
const SLUG_SEPARATORS: &[char] = &[' ', '-', '.', '/', '_'];

/// Lowercases `string` and joins its alphanumeric words with hyphens.
///
/// Spaces, hyphens, periods, slashes, and underscores separate words. All
/// other non-alphanumeric characters are removed, so `"Article's"` becomes
/// `"articles"` rather than `"article-s"`. Uppercase characters without a
/// lowercase form, such as `𝐀`, are removed too. The result never starts or
/// ends with a hyphen, and `slugify(slugify(s)) == slugify(s)`.
///
/// ```
/// use vitrine::util::slugify;
///
/// assert_eq!(slugify("[Some] _ Article's Title--"), "some-articles-title");
/// assert_eq!(slugify("  ...  "), "");
/// ```
pub fn slugify(string: &str) -> String {
    let lowered = string.to_lowercase();
    let mut output = String::with_capacity(lowered.len());

    for word in lowered.split(SLUG_SEPARATORS) {
        let mut chars = word.chars()
            .filter(|c| c.is_alphanumeric() && !c.is_uppercase())
            .peekable();
        if chars.peek().is_none() {
            continue;
        }

        if !output.is_empty() {
            output.push('-');
        }

        output.extend(chars);
    }

    output
}

/// Delimiters and their defused forms, in the order they're applied.
const TEMPLATE_ESCAPES: [(&str, &str); 4] = [
    ("{{", "{{/*"),
    ("}}", "*/}}"),
    ("{%", "{%/*"),
    ("%}", "*/%}"),
];

/// Defuses template delimiters in `input` by placing a comment marker just
/// inside each one, so `{{ x }}` is rendered as the text `{{/* x */}}` by the
/// site generator instead of being evaluated.
///
/// [`unescape_template()`] reverses the transformation.
pub fn escape_template(input: &str) -> Cow<'_, str> {
    if memchr::memchr2(b'{', b'}', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }

    let escaped = TEMPLATE_ESCAPES.iter()
        .fold(input.to_string(), |text, (from, to)| text.replace(from, to));

    Cow::Owned(escaped)
}

/// The inverse of [`escape_template()`].
pub fn unescape_template(input: &str) -> Cow<'_, str> {
    if memchr::memchr2(b'{', b'}', input.as_bytes()).is_none() {
        return Cow::Borrowed(input);
    }

    let unescaped = TEMPLATE_ESCAPES.iter()
        .rev()
        .fold(input.to_string(), |text, (from, to)| text.replace(to, from));

    Cow::Owned(unescaped)
}

#[cfg(test)]
mod slug_tests {
    use crate::util::slugify;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("[Some] _ Article's Title--"), "some-articles-title");
        assert_eq!(slugify("My Test String!!!1!1"), "my-test-string111");
        assert_eq!(slugify("test\nit   now!"), "testit-now");
        assert_eq!(slugify("  --test_-_cool- -  "), "test-cool");
        assert_eq!(slugify("You & Me"), "you-me");
        assert_eq!(slugify("  user@-- example.com  "), "user-example-com");
        assert_eq!(slugify("path/to/Theme.v2"), "path-to-theme-v2");
        assert_eq!(slugify("\u{1D400}bc \u{1D400} Def"), "bc-def");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("-_./ !?&"), "");
    }

    #[test]
    fn test_slugify_shape_and_idempotence() {
        let inputs = [
            "[Some] _ Article's Title--",
            "  --test_-_cool- -  ",
            "Ünïcödé Thème",
            "UPPER lower 123",
            "a....b////c____d----e",
            "\t\ttabs\tand\nnewlines ",
            "-leading and trailing-",
            "\u{1D400}\u{1D401} MATH \u{1D7CE}",
        ];

        for input in inputs {
            let slug = slugify(input);
            assert!(!slug.starts_with('-') && !slug.ends_with('-'), "{slug:?}");
            assert!(!slug.contains("--"), "{slug:?}");
            assert!(slug.chars().all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase())));
            assert_eq!(slugify(&slug), slug);
        }
    }
}
