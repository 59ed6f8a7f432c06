use crate::regex::compiled::MAX_CAPTURE_GROUPS;
use crate::regex::token::Token;

type Captures = [Option<(usize, usize)>; MAX_CAPTURE_GROUPS];

/// One character-consuming step for the deterministic single-char token
/// kinds. Returns the byte index just past the consumed character (or,
/// for the zero-width anchors, the unchanged index).
fn match_one(token: &Token, text: &str, text_idx: usize) -> Option<usize> {
    match token {
        Token::Char(expected) => {
            let c = text[text_idx..].chars().next()?;
            if *expected == '.' || c == *expected {
                Some(text_idx + c.len_utf8())
            } else {
                None
            }
        }
        Token::Start => (text_idx == 0).then_some(text_idx),
        Token::End => (text_idx == text.len()).then_some(text_idx),
        Token::PredefinedClass(class) => {
            let c = text[text_idx..].chars().next()?;
            class.matches(c).then_some(text_idx + c.len_utf8())
        }
        Token::CharacterClass { set, negated } => {
            let c = text[text_idx..].chars().next()?;
            let in_set = set.contains(&c);
            let matched = if *negated {
                !in_set && c.is_alphabetic()
            } else {
                in_set
            };
            matched.then_some(text_idx + c.len_utf8())
        }
        _ => unreachable!("match_one called with a non-deterministic token"),
    }
}

/// One application of a quantifier's prior token at `idx`. The prior token
/// may itself be compound (a `Group`, a nested quantifier, a
/// `Backreference`), so this dispatches through `match_here` on a
/// single-token slice rather than the restricted `match_one`.
fn match_prev(prev: &Token, text: &str, idx: usize, captures: &mut Captures) -> Option<usize> {
    match prev {
        Token::Char(_) | Token::Start | Token::End | Token::PredefinedClass(_) | Token::CharacterClass { .. } => {
            match_one(prev, text, idx)
        }
        _ => match_here(text, idx, std::slice::from_ref(prev), captures),
    }
}

/// Backtracking executor for a single `match_here` invocation: a LIFO
/// worklist of `(text_index, token_index)` continuations. Depth-first,
/// right-bias exploration gives quantifiers their greediness, since the
/// longest-consumption continuation is pushed last and so popped first.
pub fn match_here(
    text: &str,
    start: usize,
    tokens: &[Token],
    captures: &mut Captures,
) -> Option<usize> {
    let mut worklist: Vec<(usize, usize)> = vec![(start, 0)];

    while let Some((mut text_idx, mut token_idx)) = worklist.pop() {
        loop {
            if token_idx == tokens.len() {
                return Some(text_idx);
            }

            match &tokens[token_idx] {
                Token::Char(_)
                | Token::Start
                | Token::End
                | Token::PredefinedClass(_)
                | Token::CharacterClass { .. } => match match_one(&tokens[token_idx], text, text_idx) {
                    Some(new_idx) => {
                        text_idx = new_idx;
                        token_idx += 1;
                    }
                    None => break,
                },

                Token::Star(prev) => {
                    // Pushed first so it is popped (tried) last: the empty case loses to
                    // every non-empty greedy continuation pushed below.
                    worklist.push((text_idx, token_idx + 1));
                    let mut cursor = text_idx;
                    while let Some(next) = match_prev(prev, text, cursor, captures) {
                        worklist.push((next, token_idx + 1));
                        if next == cursor {
                            break;
                        }
                        cursor = next;
                    }
                    break;
                }

                Token::Plus(prev) => {
                    let mut cursor = text_idx;
                    while let Some(next) = match_prev(prev, text, cursor, captures) {
                        worklist.push((next, token_idx + 1));
                        if next == cursor {
                            break;
                        }
                        cursor = next;
                    }
                    break;
                }

                Token::Optional(prev) => {
                    worklist.push((text_idx, token_idx + 1));
                    if let Some(next) = match_prev(prev, text, text_idx, captures) {
                        worklist.push((next, token_idx + 1));
                    }
                    break;
                }

                Token::Range { prev, min, max } => {
                    let mut cursor = text_idx;
                    let mut satisfied_min = true;
                    for _ in 0..*min {
                        match match_prev(prev, text, cursor, captures) {
                            Some(next) => cursor = next,
                            None => {
                                satisfied_min = false;
                                break;
                            }
                        }
                    }
                    if !satisfied_min {
                        break;
                    }

                    worklist.push((cursor, token_idx + 1));

                    let mut consumed = *min;
                    while max.is_none_or(|m| consumed < m) {
                        match match_prev(prev, text, cursor, captures) {
                            Some(next) => {
                                worklist.push((next, token_idx + 1));
                                if next == cursor {
                                    break;
                                }
                                cursor = next;
                                consumed += 1;
                            }
                            None => break,
                        }
                    }
                    break;
                }

                Token::Group { alternatives, number } => {
                    let group = *number;
                    for alt in alternatives {
                        if let Some(end) = match_here(text, text_idx, alt, captures) {
                            captures[group - 1] = Some((text_idx, end));
                            worklist.push((end, token_idx + 1));
                        }
                    }
                    break;
                }

                Token::Backreference(g) => match captures.get(*g - 1).copied().flatten() {
                    Some((cap_start, cap_end)) => {
                        let captured = &text[cap_start..cap_end];
                        if text[text_idx..].starts_with(captured) {
                            text_idx += captured.len();
                            token_idx += 1;
                        } else {
                            break;
                        }
                    }
                    None => break,
                },
            }
        }
    }

    None
}
