//! Groups per-token BIO predictions into entity spans.

use super::Entity;

/// Classifier output for one sub-word token.
#[derive(Debug, Clone)]
pub struct TokenPrediction {
    pub label: String,
    pub score: f32,
    /// Byte offsets into the tagged text.
    pub start: usize,
    pub end: usize,
    /// Word index from the tokenizer; equal ids mark pieces of one word.
    pub word_id: Option<u32>,
}

/// Splits `B-PER` into `(Some('B'), "PER")`; `O` yields `(None, "O")`.
fn split_tag(label: &str) -> (Option<char>, &str) {
    match label.split_once('-') {
        Some((prefix, group)) if prefix.len() == 1 => (prefix.chars().next(), group),
        _ => (None, label),
    }
}

struct OpenSpan {
    group: String,
    start: usize,
    end: usize,
    score_sum: f32,
    tokens: usize,
}

impl OpenSpan {
    fn close(self, text: &str) -> Option<Entity> {
        let word = text.get(self.start..self.end)?.trim();
        if word.is_empty() {
            return None;
        }
        Some(Entity {
            group: self.group,
            word: word.to_string(),
            score: self.score_sum / self.tokens as f32,
            start: self.start,
            end: self.end,
        })
    }
}

/// Merges consecutive tokens of one entity group into spans.
///
/// A `B-` tag always opens a new span unless it continues the previous token's
/// word; continuation pieces follow the tag of their word's first piece.
pub fn aggregate(text: &str, predictions: &[TokenPrediction]) -> Vec<Entity> {
    let mut entities = Vec::new();
    let mut open: Option<OpenSpan> = None;
    let mut previous_word: Option<u32> = None;
    let mut previous_in_entity = false;

    for token in predictions {
        let continues_word = token.word_id.is_some() && token.word_id == previous_word;
        previous_word = token.word_id;

        if continues_word {
            if previous_in_entity && let Some(span) = open.as_mut() {
                span.end = token.end;
                span.score_sum += token.score;
                span.tokens += 1;
            }
            continue;
        }

        let (prefix, group) = split_tag(&token.label);
        if prefix.is_none() {
            // `O` or an unprefixed label closes any open span.
            if let Some(span) = open.take() {
                entities.extend(span.close(text));
            }
            previous_in_entity = false;
            continue;
        }

        let extends = matches!(&open, Some(span) if span.group == group && prefix != Some('B'));
        if extends {
            if let Some(span) = open.as_mut() {
                span.end = token.end;
                span.score_sum += token.score;
                span.tokens += 1;
            }
        } else {
            if let Some(span) = open.take() {
                entities.extend(span.close(text));
            }
            open = Some(OpenSpan {
                group: group.to_string(),
                start: token.start,
                end: token.end,
                score_sum: token.score,
                tokens: 1,
            });
        }
        previous_in_entity = true;
    }

    if let Some(span) = open.take() {
        entities.extend(span.close(text));
    }

    entities
}
