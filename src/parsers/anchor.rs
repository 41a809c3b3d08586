/// Where a declaration lives in the manifest text. `NotFound` marks a record
/// whose line could not be located; such records must never be edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Zero-based line index in the manifest.
    Line(usize),
    NotFound,
}

impl Anchor {
    pub fn line(&self) -> Option<usize> {
        match self {
            Anchor::Line(idx) => Some(*idx),
            Anchor::NotFound => None,
        }
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self, Anchor::Line(_))
    }
}

/// Locate the source line of a declaration string, best-effort.
///
/// Three tiers, each tried over the whole document before falling through:
/// the exact declaration wrapped in either quoting style, then the
/// declaration substring next to a comparison or equality symbol, then the
/// bare package name in quotes.
pub fn locate_declaration(lines: &[&str], declaration: &str, name: &str) -> Anchor {
    let declaration = declaration.trim();

    let double_quoted = format!("\"{declaration}\"");
    let single_quoted = format!("'{declaration}'");
    for (idx, line) in lines.iter().enumerate() {
        if line.contains(&double_quoted) || line.contains(&single_quoted) {
            return Anchor::Line(idx);
        }
    }

    for (idx, line) in lines.iter().enumerate() {
        if line.contains(declaration)
            && line.chars().any(|c| matches!(c, '=' | '>' | '<' | '~'))
        {
            return Anchor::Line(idx);
        }
    }

    let double_quoted_name = format!("\"{name}\"");
    let single_quoted_name = format!("'{name}'");
    for (idx, line) in lines.iter().enumerate() {
        if line.contains(&double_quoted_name) || line.contains(&single_quoted_name) {
            return Anchor::Line(idx);
        }
    }

    Anchor::NotFound
}
