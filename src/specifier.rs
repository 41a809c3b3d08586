use regex::Regex;
use std::sync::LazyLock;

/// Leading package identifier, optional extras, and whatever constraint text
/// follows (e.g. `requests[security]>=2.28.0`).
static SPECIFIER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9_-]+)(\[[^\]]+\])?(.*)$").expect("specifier regex is valid")
});

/// First version token after a comparison operator. Accepts dotted numerics
/// (`1.2.3`), short forms (`25.1`), pre-releases (`1.2.3a1`, `2.0.0b2`,
/// `3.1.0rc1`), post/dev segments (`1.0.0.post1`, `18.0.1.dev0`) and local
/// versions (`1.2.3+abc123`).
static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[><=~!]+\s*([0-9]+(?:\.[0-9]+)*(?:[A-Za-z]+[0-9]*)*(?:\.[0-9A-Za-z_]+)*(?:\+[0-9A-Za-z_]+)*)")
        .expect("version regex is valid")
});

/// A dependency declaration split into its literal parts. No version
/// semantics are attached; comparison elsewhere is exact-string only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSpecifier {
    pub name: String,
    /// Version literal from the constraint, or empty when unconstrained.
    /// Empty never means "latest".
    pub requested_version: String,
}

/// Parse a single declaration string like `requests>=2.28.0`.
///
/// Returns `None` when the string has no valid leading identifier. Extras
/// (`[...]`) and environment markers (`; python_version >= "3.8"`) are
/// recognized and discarded.
pub fn parse_specifier(input: &str) -> Option<ParsedSpecifier> {
    let input = input.trim();
    let input = input.split(';').next()?.trim();

    let caps = SPECIFIER_RE.captures(input)?;
    let name = caps.get(1)?.as_str().to_string();
    let constraint = caps.get(3).map_or("", |m| m.as_str());

    let requested_version = VERSION_RE
        .captures(constraint)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    Some(ParsedSpecifier {
        name,
        requested_version,
    })
}
