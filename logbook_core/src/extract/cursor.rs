//! Line cursor for field rules that consume more than one line.

use crate::fields::{find_url, is_section_delimiter, looks_like_label};
use crate::normalize::normalize;

/// Maximum number of lines a lookahead block may span.
pub const LOOKAHEAD_LINES: usize = 6;

/// Lines after the current one searched for a screenshot URL.
pub const URL_SEARCH_LINES: usize = 3;

/// A message line in raw and normalised form.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    pub raw: &'a str,
    pub clean: String,
}

/// Text gathered by a lookahead, with the index of the last line it used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookahead {
    pub text: String,
    pub last: usize,
}

/// Explicit position over a message's lines.
///
/// Rules that read past the current line move the cursor onto the last line
/// they consumed; the engine then steps past it.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    lines: Vec<Line<'a>>,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(lines: impl IntoIterator<Item = &'a str>) -> Self {
        let lines = lines
            .into_iter()
            .map(|raw| Line {
                raw,
                clean: normalize(raw),
            })
            .collect();
        Self { lines, pos: 0 }
    }

    pub fn current(&self) -> Option<&Line<'a>> {
        self.lines.get(self.pos)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Move forward to `index`; never moves backwards.
    pub fn seek(&mut self, index: usize) {
        if index > self.pos {
            self.pos = index.min(self.lines.len());
        }
    }

    /// Non-empty lines after the current one, up to `max` lines ahead and
    /// stopping at the next `Label:` line or `--` delimiter, joined with spaces.
    pub fn lookahead(&self, max: usize) -> Option<Lookahead> {
        let start = self.pos + 1;
        let end = start.saturating_add(max);
        let mut parts = Vec::new();
        let mut last = None;

        for (index, line) in self.lines.iter().enumerate().take(end).skip(start) {
            if line.clean.is_empty() {
                continue;
            }
            if is_section_delimiter(line.raw) || looks_like_label(&line.clean) {
                break;
            }
            parts.push(line.clean.as_str());
            last = Some(index);
        }

        last.map(|last| Lookahead {
            text: parts.join(" "),
            last,
        })
    }

    /// Like [`Cursor::lookahead`], but consumes the lines it used.
    pub fn take_lookahead(&mut self, max: usize) -> Option<String> {
        let block = self.lookahead(max)?;
        self.seek(block.last);
        Some(block.text)
    }

    /// Consume every following line up to the next `Label:` line or `--`
    /// delimiter. Lines keep their original text, blank ones included.
    pub fn take_block(&mut self) -> String {
        let mut parts = Vec::new();
        let mut index = self.pos + 1;

        while let Some(line) = self.lines.get(index) {
            if is_section_delimiter(line.raw) || looks_like_label(&line.clean) {
                break;
            }
            parts.push(line.raw.trim());
            index += 1;
        }

        let text = parts.join("\n").trim().to_string();
        self.seek(index - 1);
        text
    }

    /// First URL literal on the current line or the `span` lines after it.
    pub fn url_nearby(&self, span: usize) -> Option<&'a str> {
        self.lines
            .iter()
            .skip(self.pos)
            .take(span + 1)
            .find_map(|line| find_url(line.raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str) -> Cursor<'_> {
        Cursor::new(text.lines())
    }

    #[test]
    fn lookahead_stops_at_next_label() {
        let mut c = cursor("Resources:\n\n- Copper\n- Gold\nWeather: Calm");
        let block = c.lookahead(LOOKAHEAD_LINES);
        assert_eq!(
            block,
            Some(Lookahead {
                text: "Copper Gold".to_string(),
                last: 3,
            })
        );
        assert_eq!(c.take_lookahead(LOOKAHEAD_LINES).as_deref(), Some("Copper Gold"));
        c.advance();
        assert_eq!(c.current().map(|l| l.clean.as_str()), Some("Weather: Calm"));
    }

    #[test]
    fn lookahead_is_bounded() {
        let text = "Glyphs:\n1\n2\n3\n4\n5\n6\n7\n8";
        let block = cursor(text).lookahead(LOOKAHEAD_LINES);
        assert_eq!(block.map(|b| b.text), Some("1 2 3 4 5 6".to_string()));
    }

    #[test]
    fn empty_lookahead_does_not_move() {
        let mut c = cursor("Resources:\nWeather: Calm");
        assert_eq!(c.take_lookahead(LOOKAHEAD_LINES), None);
        c.advance();
        assert_eq!(c.current().map(|l| l.raw), Some("Weather: Calm"));
    }

    #[test]
    fn lookahead_stops_at_delimiter() {
        let mut c = cursor("Resources:\n-- Screenshot\nhttps://img.example/p.png");
        assert_eq!(c.take_lookahead(LOOKAHEAD_LINES), None);
        c.advance();
        assert_eq!(c.current().map(|l| l.raw), Some("-- Screenshot"));

        let c = cursor("Glyphs:\nportal1 portal2\n-- Screenshot");
        assert_eq!(
            c.lookahead(LOOKAHEAD_LINES),
            Some(Lookahead {
                text: "portal1 portal2".to_string(),
                last: 1,
            })
        );
    }

    #[test]
    fn block_stops_at_label_or_delimiter() {
        let mut c = cursor("Special Note: a\nline two\n\n  - line three\n-- Screenshot\nmore");
        assert_eq!(c.take_block(), "line two\n\n- line three");
        c.advance();
        assert_eq!(c.current().map(|l| l.raw), Some("-- Screenshot"));

        let mut c = cursor("Description:\nfirst\nRarity: Rare");
        assert_eq!(c.take_block(), "first");
        c.advance();
        assert_eq!(c.current().map(|l| l.raw), Some("Rarity: Rare"));
    }

    #[test]
    fn finds_url_on_following_lines() {
        let c = cursor("Screenshot:\n\nhttps://img.example/x.png\nlater");
        assert_eq!(c.url_nearby(URL_SEARCH_LINES), Some("https://img.example/x.png"));

        let c = cursor("Screenshot:\na\nb\nc\nhttps://too.far/x.png");
        assert_eq!(c.url_nearby(URL_SEARCH_LINES), None);
    }
}
