use super::model::Span;

/// Splits a line into spans using `***bold italic***`, `**bold**` and
/// `*italic*` markers. A marker without its closing pair is kept as text.
pub fn parse_inline(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut rest = line;

    while let Some(pos) = rest.find('*') {
        plain.push_str(&rest[..pos]);
        let from_marker = &rest[pos..];
        let run = from_marker.bytes().take_while(|b| *b == b'*').count().min(3);
        let (marker, body) = from_marker.split_at(run);

        match body.find(marker) {
            Some(end) if end > 0 => {
                flush(&mut spans, &mut plain);
                spans.push(Span {
                    text: body[..end].to_string(),
                    bold: run >= 2,
                    italic: run != 2,
                });
                rest = &body[end + run..];
            }
            _ => {
                plain.push_str(marker);
                rest = body;
            }
        }
    }

    plain.push_str(rest);
    flush(&mut spans, &mut plain);
    spans
}

fn flush(spans: &mut Vec<Span>, plain: &mut String) {
    if !plain.is_empty() {
        spans.push(Span::plain(std::mem::take(plain)));
    }
}

/// Concatenated text of `spans` without emphasis.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_line_is_one_span() {
        assert_eq!(parse_inline("Santiago, 15 de octubre"), vec![Span::plain("Santiago, 15 de octubre")]);
    }

    #[test]
    fn emphasis_markers() {
        let spans = parse_inline("a *b* **c** ***d***");
        assert_eq!(
            spans,
            vec![
                Span::plain("a "),
                Span { text: "b".to_string(), bold: false, italic: true },
                Span::plain(" "),
                Span::bold("c"),
                Span::plain(" "),
                Span { text: "d".to_string(), bold: true, italic: true },
            ]
        );
    }

    #[test]
    fn unmatched_marker_is_literal() {
        assert_eq!(parse_inline("2 * 3 = 6"), vec![Span::plain("2 * 3 = 6")]);
        assert_eq!(parse_inline("**abierto"), vec![Span::plain("**abierto")]);
    }

    #[test]
    fn empty_line_has_no_spans() {
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn plain_text_drops_markers() {
        assert_eq!(plain_text(&parse_inline("**Total:** $10")), "Total: $10");
    }
}
