// file: src/transform/old_japanese.rs
// description: built-in Old Japanese preprocessor (annotations, repeat marks, punctuation)
// reference: https://doc.rust-lang.org/std/string/struct.String.html

use super::TextTransform;

const LEFT_BRACKETS: &[char] = &['（', '(', '［', '[', '〔', '｛', '{', '【'];
const RIGHT_BRACKETS: &[char] = &['）', ')', '］', ']', '〕', '｝', '}', '】'];
const QUOTE_BRACKETS: &[char] = &['｢', '｣', '「', '」', '『', '』'];
const SEPARATED_PUNCTUATION: &[char] = &['、', '。'];

const UNVOICED: &str = "かきくけこさしすせそたちつてとはひふへほカキクケコサシスセソタチツテトハヒフヘホう";
const VOICED: &str = "がぎぐげござじずぜぞだぢづでどばびぶべぼガギグゲゴザジズゼゾダヂヅデドバビブベボゔ";

#[derive(Debug, Default, Clone, Copy)]
pub struct OldJapanesePreprocessor;

impl OldJapanesePreprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Drops bracketed annotations, innermost first. A stray right bracket is
    /// dropped on its own; an unclosed left bracket loses only the bracket.
    fn remove_annotations(text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut open: Vec<usize> = Vec::new();

        for c in text.chars() {
            if LEFT_BRACKETS.contains(&c) {
                open.push(out.len());
                out.push(c);
            } else if RIGHT_BRACKETS.contains(&c) {
                if let Some(start) = open.pop() {
                    out.truncate(start);
                }
            } else {
                out.push(c);
            }
        }

        for start in open.into_iter().rev() {
            out.remove(start);
        }

        out
    }

    fn voiced(c: char) -> char {
        UNVOICED
            .chars()
            .position(|u| u == c)
            .and_then(|i| VOICED.chars().nth(i))
            .unwrap_or(c)
    }

    /// Expands odoriji: `ゝ`/`ヽ` repeat the previous kana, `ゞ`/`ヾ` repeat it
    /// voiced, `／＼` repeats the previous two characters and `／〃＼` repeats
    /// them with the first one voiced. Mirrored marks behave the same.
    fn expand_repeat_marks(text: &str) -> String {
        let chars: Vec<char> = text.chars().collect();
        let mut out: Vec<char> = Vec::with_capacity(chars.len());
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            let after = chars.get(i + 2).copied();

            match (c, next, after) {
                ('ゝ' | 'ヽ', _, _) => {
                    if let Some(&prev) = out.last() {
                        out.push(prev);
                    }
                    i += 1;
                }
                ('ゞ' | 'ヾ', _, _) => {
                    if let Some(&prev) = out.last() {
                        out.push(Self::voiced(prev));
                    }
                    i += 1;
                }
                ('／', Some('〃'), Some('＼')) | ('＼', Some('〃'), Some('／')) => {
                    Self::repeat_pair(&mut out, true);
                    i += 3;
                }
                ('／', Some('＼'), _) | ('＼', Some('／'), _) => {
                    Self::repeat_pair(&mut out, false);
                    i += 2;
                }
                _ => {
                    out.push(c);
                    i += 1;
                }
            }
        }

        out.into_iter().collect()
    }

    fn repeat_pair(out: &mut Vec<char>, voice_first: bool) {
        let n = out.len();
        if n < 2 {
            return;
        }

        let (first, second) = (out[n - 2], out[n - 1]);
        out.push(if voice_first {
            Self::voiced(first)
        } else {
            first
        });
        out.push(second);
    }

    fn separate_punctuation(text: &str) -> String {
        let mut spaced = String::with_capacity(text.len() + 8);

        for c in text.chars() {
            if SEPARATED_PUNCTUATION.contains(&c) {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            } else {
                spaced.push(c);
            }
        }

        spaced
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl TextTransform for OldJapanesePreprocessor {
    fn name(&self) -> &str {
        "ojp-preprocessor"
    }

    fn apply(&self, text: &str) -> anyhow::Result<String> {
        let text = Self::remove_annotations(text);
        let text: String = text
            .chars()
            .filter(|c| !QUOTE_BRACKETS.contains(c) && *c != '\u{3000}')
            .collect();
        let text = Self::expand_repeat_marks(&text);

        Ok(Self::separate_punctuation(&text))
    }
}
