//! Cleaning, wrapping and paging of alert text.

use std::sync::LazyLock;

use regex::Regex;

static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"http\S+").expect("valid regex"));
static MORE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bMore:").expect("valid regex"));

/// Strip links and the trailing `More:` marker from a status post.
///
/// ```
/// use arrival_board::alerts::clean_post;
///
/// assert_eq!(
///     clean_post("[Red Line] Trains are delayed. More: https://t.co/abc"),
///     "[Red Line] Trains are delayed."
/// );
/// ```
pub fn clean_post(text: &str) -> String {
    let text = URL.replace_all(text, "");
    let text = MORE_MARKER.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Greedy word wrap to at most `width` characters per line.
///
/// Lines break at spaces and after the hyphen of a hyphenated word, so
/// `Cermak-Chinatown` may end one line with `Cermak-`. Words longer than
/// `width` are split across lines.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        for (i, piece) in hyphen_pieces(word).into_iter().enumerate() {
            let mut chars: Vec<char> = piece.chars().collect();
            let gap = usize::from(current_len > 0 && i == 0);

            if current_len + gap + chars.len() <= width {
                if gap == 1 {
                    current.push(' ');
                }
                current_len += gap + chars.len();
                current.extend(chars);
                continue;
            }

            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
            }
            while chars.len() > width {
                lines.push(chars.drain(..width).collect());
            }
            current_len = chars.len();
            current = chars.into_iter().collect();
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Split after each hyphen that has two letters before it and a letter
/// after it.
fn hyphen_pieces(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let letter = |k: usize| chars.get(k).is_some_and(|(_, c)| c.is_alphabetic());

    let mut pieces = Vec::new();
    let mut start = 0;
    for (k, &(i, c)) in chars.iter().enumerate() {
        if c == '-' && k >= 2 && letter(k - 2) && letter(k - 1) && letter(k + 1) {
            pieces.push(&word[start..=i]);
            start = i + 1;
        }
    }
    pieces.push(&word[start..]);
    pieces
}

/// One screen of an alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertPage {
    pub lines: Vec<String>,
    /// 1-based page number.
    pub page: usize,
    pub total: usize,
}

impl AlertPage {
    /// The footer line, e.g. `Page 1 / 3`.
    pub fn footer(&self) -> String {
        format!("Page {} / {}", self.page, self.total)
    }
}

/// Split wrapped lines into pages of `per_page` lines.
pub fn paginate(lines: &[String], per_page: usize) -> Vec<AlertPage> {
    let per_page = per_page.max(1);
    let total = lines.len().div_ceil(per_page);
    lines
        .chunks(per_page)
        .enumerate()
        .map(|(i, chunk)| AlertPage {
            lines: chunk.to_vec(),
            page: i + 1,
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_links_and_marker() {
        assert_eq!(
            clean_post("[Blue Line] Minor delays near O'Hare. More: http://t.co/x1 https://t.co/y2"),
            "[Blue Line] Minor delays near O'Hare."
        );
        assert_eq!(clean_post("Furthermore: keep it"), "Furthermore: keep it");
    }

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap("Red Line trains are running with delays due to a signal problem", 25);
        assert_eq!(
            lines,
            vec![
                "Red Line trains are",
                "running with delays due",
                "to a signal problem"
            ]
        );
    }

    #[test]
    fn breaks_long_words() {
        let lines = wrap("abcdefghij xy", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij", "xy"]);
    }

    #[test]
    fn breaks_after_hyphens() {
        assert_eq!(
            wrap("Trains stopped at Cermak-Chinatown station", 25),
            vec!["Trains stopped at Cermak-", "Chinatown station"]
        );
        assert_eq!(wrap("Cermak-Chinatown", 25), vec!["Cermak-Chinatown"]);
    }

    #[test]
    fn hyphen_pieces_need_letters() {
        assert_eq!(hyphen_pieces("Cermak-Chinatown"), vec!["Cermak-", "Chinatown"]);
        assert_eq!(hyphen_pieces("Harlem-Lake-Bound"), vec!["Harlem-", "Lake-", "Bound"]);
        assert_eq!(hyphen_pieces("95th-Dan"), vec!["95th-", "Dan"]);
        assert_eq!(hyphen_pieces("I-90"), vec!["I-90"]);
        assert_eq!(hyphen_pieces("-ab"), vec!["-ab"]);
        assert_eq!(hyphen_pieces("ab-"), vec!["ab-"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(wrap("   ", 25).is_empty());
        assert!(paginate(&[], 4).is_empty());
    }

    #[test]
    fn pages_of_four() {
        let lines: Vec<String> = (1..=9).map(|i| format!("line {i}")).collect();
        let pages = paginate(&lines, 4);

        assert_eq!(pages.len(), 3);
        assert_eq!(pages[0].lines.len(), 4);
        assert_eq!(pages[2].lines, vec!["line 9"]);
        assert_eq!(pages[1].footer(), "Page 2 / 3");
        assert!(pages.iter().all(|p| p.total == 3));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// No wrapped line exceeds the width.
        #[test]
        fn lines_fit(text in "[a-zA-Z -]{0,200}", width in 1usize..40) {
            for line in wrap(&text, width) {
                prop_assert!(line.chars().count() <= width);
            }
        }

        /// Wrapping keeps every non-space character, in order.
        #[test]
        fn wrap_preserves_content(text in "[a-zA-Z -]{0,200}", width in 1usize..40) {
            let original: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let wrapped: String = wrap(&text, width).concat().chars().filter(|c| !c.is_whitespace()).collect();
            prop_assert_eq!(original, wrapped);
        }

        /// Pages cover every line exactly once.
        #[test]
        fn pages_cover_lines(count in 0usize..50, per_page in 1usize..8) {
            let lines: Vec<String> = (0..count).map(|i| i.to_string()).collect();
            let pages = paginate(&lines, per_page);
            let flattened: Vec<String> = pages.iter().flat_map(|p| p.lines.clone()).collect();
            prop_assert_eq!(flattened, lines);
        }
    }
}
