//! Lightweight text scanners for import statements and stage annotations.
//!
//! Neither scanner tokenizes the language. Comments, strings and conditional
//! compilation are invisible to them, so an `import` inside a block comment is
//! still reported.

/// Marker token that opens a stage annotation comment.
const ANNOTATION_MARKER: &str = "moe";

/// Returns the dotted module names of every `import <name>;` statement in
/// `text`, in order of appearance.
///
/// A statement is the keyword `import` (not preceded by an identifier
/// character), at least one whitespace character, a name starting with an
/// ASCII letter or `_` followed by word characters or dots, and an immediate
/// `;`. Anything else, such as aliased or multi-line imports, is skipped.
pub fn scan_imports(text: &str) -> Vec<&str> {
    let mut imports = Vec::new();
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find("import") {
        let start = search_from + rel;
        let after_keyword = start + "import".len();
        search_from = after_keyword;

        let preceded_by_ident = text[..start]
            .chars()
            .next_back()
            .is_some_and(is_word_char);
        if preceded_by_ident {
            continue;
        }

        let rest = &text[after_keyword..];
        let name_offset = rest.len() - rest.trim_start().len();
        if name_offset == 0 {
            continue;
        }

        let candidate = &rest[name_offset..];
        let mut chars = candidate.char_indices();
        match chars.next() {
            Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => continue,
        }
        let name_len = chars
            .find(|&(_, c)| !(is_word_char(c) || c == '.'))
            .map_or(candidate.len(), |(i, _)| i);

        if candidate[name_len..].starts_with(';') {
            imports.push(&candidate[..name_len]);
            search_from = after_keyword + name_offset + name_len + 1;
        }
    }

    imports
}

/// Finds the first `// [moe(<list>)]` annotation and returns the raw text
/// between the parentheses.
///
/// Whitespace is allowed between `//` and `[`, and between the marker and
/// `(`. The list must close with `)]` on the same line.
pub fn find_stage_annotation(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(rel) = text[search_from..].find("//") {
        let comment = search_from + rel + 2;
        // `///` holds two overlapping `//` starts.
        search_from += rel + 1;

        let Some(body) = text[comment..]
            .trim_start_matches([' ', '\t'])
            .strip_prefix('[')
        else {
            continue;
        };
        let Some(body) = body.strip_prefix(ANNOTATION_MARKER) else {
            continue;
        };
        let Some(body) = body.trim_start_matches([' ', '\t']).strip_prefix('(') else {
            continue;
        };

        let line = body.split('\n').next().unwrap_or(body);
        if let Some(end) = line.find(")]") {
            return Some(&line[..end]);
        }
    }

    None
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
