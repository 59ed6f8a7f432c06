use std::collections::HashSet;

use crate::regex::error::CompileError;
use crate::regex::token::{PredefinedClass, Token};

/// Compiles a pattern string into a token sequence. Single left-to-right
/// scan with a manual index; recurses into itself for group bodies. The
/// capture-group counter is shared across every recursive call so that
/// numbering follows pattern position rather than recursion depth.
pub fn compile(pattern: &str) -> Result<Vec<Token>, CompileError> {
    if pattern.is_empty() {
        return Err(CompileError::invalid("empty pattern"));
    }
    let chars: Vec<char> = pattern.chars().collect();
    let mut group_counter = 1usize;
    compile_tokens(&chars, &mut group_counter)
}

fn compile_tokens(pattern: &[char], group_counter: &mut usize) -> Result<Vec<Token>, CompileError> {
    let mut tokens: Vec<Token> = Vec::new();
    let mut idx = 0usize;

    while idx < pattern.len() {
        let c = pattern[idx];

        match c {
            '^' => {
                if idx != 0 {
                    return Err(CompileError::invalid("'^' must be first character in pattern"));
                }
                tokens.push(Token::Start);
            }

            '$' => {
                if idx != pattern.len() - 1 {
                    return Err(CompileError::invalid("'$' must be last character in pattern"));
                }
                tokens.push(Token::End);
            }

            '\\' => {
                idx += 1;
                if idx >= pattern.len() {
                    return Err(CompileError::invalid("expected character class after '\\'"));
                }
                let escaped = pattern[idx];
                if let Some(d) = escaped.to_digit(10) {
                    let group_num = d as usize;
                    if group_num == 0 || group_num >= *group_counter {
                        return Err(CompileError::invalid(format!(
                            "invalid capture group number '{escaped}'"
                        )));
                    }
                    tokens.push(Token::Backreference(group_num));
                } else {
                    let class = match escaped {
                        'd' => PredefinedClass::Digit,
                        'w' => PredefinedClass::Word,
                        '\\' => PredefinedClass::Backslash,
                        other => {
                            return Err(CompileError::invalid(format!(
                                "invalid character class '\\{other}'"
                            )));
                        }
                    };
                    tokens.push(Token::PredefinedClass(class));
                }
            }

            '[' => {
                idx += 1;
                let mut negated = false;
                if pattern.get(idx) == Some(&'^') {
                    negated = true;
                    idx += 1;
                }

                let mut set = HashSet::new();
                let mut seen_closing = false;
                while idx < pattern.len() {
                    if pattern[idx] == ']' {
                        seen_closing = true;
                        break;
                    }
                    set.insert(pattern[idx]);
                    idx += 1;
                }
                if !seen_closing {
                    return Err(CompileError::invalid("no closing bracket ']'"));
                }
                tokens.push(Token::CharacterClass { set, negated });
            }

            '(' => {
                idx += 1;
                let group_number = *group_counter;
                *group_counter += 1;

                let mut depth = 1usize;
                let mut sub_pattern: Vec<char> = Vec::new();
                let mut seen_closing = false;
                let mut parts: Vec<Vec<char>> = Vec::new();

                while idx < pattern.len() {
                    let inner = pattern[idx];
                    if inner == '(' {
                        depth += 1;
                        sub_pattern.push(inner);
                    } else if inner == ')' {
                        depth -= 1;
                        if depth == 0 {
                            seen_closing = true;
                            idx += 1;
                            break;
                        }
                        sub_pattern.push(inner);
                    } else if inner == '|' && depth == 1 {
                        parts.push(std::mem::take(&mut sub_pattern));
                    } else {
                        sub_pattern.push(inner);
                    }
                    idx += 1;
                }

                if !seen_closing {
                    return Err(CompileError::invalid("no closing brace ')'"));
                }
                parts.push(sub_pattern);
                idx -= 1; // compensate for the unconditional += 1 at the bottom of the loop

                let mut alternatives = Vec::with_capacity(parts.len());
                for part in &parts {
                    alternatives.push(compile_tokens(part, group_counter)?);
                }

                tokens.push(Token::Group {
                    alternatives,
                    number: group_number,
                });
            }

            '*' => {
                let prev = tokens
                    .pop()
                    .ok_or_else(|| CompileError::invalid("no previous pattern to repeat zero or more times"))?;
                tokens.push(Token::Star(Box::new(prev)));
            }

            '+' => {
                let prev = tokens
                    .pop()
                    .ok_or_else(|| CompileError::invalid("no previous pattern to repeat one or more times"))?;
                tokens.push(Token::Plus(Box::new(prev)));
            }

            '?' => {
                let prev = tokens
                    .pop()
                    .ok_or_else(|| CompileError::invalid("no previous pattern to make optional"))?;
                tokens.push(Token::Optional(Box::new(prev)));
            }

            '{' => {
                let prev = tokens
                    .pop()
                    .ok_or_else(|| CompileError::invalid("no previous pattern to repeat"))?;

                idx += 1;
                let mut minimum = String::new();
                let mut maximum = String::new();
                let mut seen_comma = false;
                let mut seen_closing = false;

                while idx < pattern.len() {
                    match pattern[idx] {
                        d if d.is_ascii_digit() => {
                            if !seen_comma {
                                minimum.push(d);
                            } else {
                                maximum.push(d);
                            }
                        }
                        ',' => seen_comma = true,
                        '}' => {
                            seen_closing = true;
                            break;
                        }
                        other => {
                            return Err(CompileError::invalid(format!(
                                "invalid character '{other}' in range statement"
                            )));
                        }
                    }
                    idx += 1;
                }

                if !seen_closing {
                    return Err(CompileError::invalid("no closing brace '}'"));
                }
                if minimum.is_empty() {
                    return Err(CompileError::invalid("no minimum value given in range statement"));
                }

                let min: usize = minimum
                    .parse()
                    .map_err(|_| CompileError::invalid("malformed minimum in range statement"))?;
                let max = if !maximum.is_empty() {
                    Some(
                        maximum
                            .parse()
                            .map_err(|_| CompileError::invalid("malformed maximum in range statement"))?,
                    )
                } else if seen_comma {
                    None
                } else {
                    Some(min)
                };

                tokens.push(Token::Range {
                    prev: Box::new(prev),
                    min,
                    max,
                });
            }

            '.' => tokens.push(Token::Char('.')),

            other => tokens.push(Token::Char(other)),
        }

        idx += 1;
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compiles(pattern: &str) -> Vec<Token> {
        compile(pattern).unwrap_or_else(|e| panic!("expected {pattern:?} to compile, got {e:?}"))
    }

    #[test]
    fn compiles_literal_and_wildcard() {
        assert!(matches!(compiles("a")[0], Token::Char('a')));
        assert!(matches!(compiles(".")[0], Token::Char('.')));
    }

    #[test]
    fn compiles_anchors() {
        assert!(matches!(compiles("^a")[0], Token::Start));
        let end = compiles("a$");
        assert!(matches!(end[end.len() - 1], Token::End));
    }

    #[test]
    fn rejects_misplaced_anchors() {
        assert!(compile("a^b").is_err());
        assert!(compile("a$b").is_err());
    }

    #[test]
    fn compiles_predefined_classes() {
        assert!(matches!(
            compiles(r"\d")[0],
            Token::PredefinedClass(PredefinedClass::Digit)
        ));
        assert!(matches!(
            compiles(r"\w")[0],
            Token::PredefinedClass(PredefinedClass::Word)
        ));
        assert!(matches!(
            compiles(r"\\")[0],
            Token::PredefinedClass(PredefinedClass::Backslash)
        ));
    }

    #[test]
    fn rejects_dangling_and_unknown_escapes() {
        assert!(compile(r"a\").is_err());
        assert!(compile(r"\q").is_err());
    }

    #[test]
    fn compiles_character_classes() {
        match &compiles("[abc]")[0] {
            Token::CharacterClass { set, negated } => {
                assert!(!negated);
                assert_eq!(set.len(), 3);
            }
            other => panic!("unexpected token {other:?}"),
        }
        match &compiles("[^abc]")[0] {
            Token::CharacterClass { negated, .. } => assert!(negated),
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[test]
    fn rejects_unterminated_class() {
        assert!(compile("[abc").is_err());
    }

    #[test]
    fn rejects_quantifier_without_antecedent() {
        assert!(compile("*abc").is_err());
        assert!(compile("+abc").is_err());
        assert!(compile("?abc").is_err());
    }

    #[test]
    fn compiles_bounded_repetition() {
        match &compiles("a{3}")[0] {
            Token::Range { min, max, .. } => assert_eq!((*min, *max), (3, Some(3))),
            other => panic!("unexpected token {other:?}"),
        }
        match &compiles("a{2,}")[0] {
            Token::Range { min, max, .. } => assert_eq!((*min, *max), (2, None)),
            other => panic!("unexpected token {other:?}"),
        }
        match &compiles("a{2,4}")[0] {
            Token::Range { min, max, .. } => assert_eq!((*min, *max), (2, Some(4))),
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_range() {
        assert!(compile("a{").is_err());
        assert!(compile("a{,3}").is_err());
        assert!(compile("{3}").is_err());
    }

    #[test]
    fn compiles_groups_and_nested_alternation() {
        let tokens = compiles("(a(b|c)d)");
        assert_eq!(tokens.len(), 1);
        match &tokens[0] {
            Token::Group { alternatives, number } => {
                assert_eq!(*number, 1);
                assert_eq!(alternatives.len(), 1);
                // The single alternative contains a literal, a nested group, a literal.
                assert_eq!(alternatives[0].len(), 3);
                match &alternatives[0][1] {
                    Token::Group { number, .. } => assert_eq!(*number, 2),
                    other => panic!("expected nested group, got {other:?}"),
                }
            }
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[test]
    fn group_numbering_follows_pattern_position_not_depth() {
        let tokens = compiles("((a)(b))");
        match &tokens[0] {
            Token::Group { number, alternatives } => {
                assert_eq!(*number, 1);
                match (&alternatives[0][0], &alternatives[0][1]) {
                    (Token::Group { number: n1, .. }, Token::Group { number: n2, .. }) => {
                        assert_eq!(*n1, 2);
                        assert_eq!(*n2, 3);
                    }
                    other => panic!("unexpected tokens {other:?}"),
                }
            }
            other => panic!("unexpected token {other:?}"),
        }
    }

    #[test]
    fn rejects_unterminated_group() {
        assert!(compile("(abc").is_err());
    }

    #[test]
    fn compiles_backreference() {
        assert!(matches!(compiles(r"(a)\1")[1], Token::Backreference(1)));
    }

    #[test]
    fn rejects_undefined_backreference() {
        assert!(compile(r"\2").is_err());
        assert!(compile(r"(a)\2").is_err());
    }

    #[test]
    fn determinism_of_compilation() {
        let p = "(a(b|c)+)*\\1$";
        let first = format!("{:?}", compile(p).unwrap());
        let second = format!("{:?}", compile(p).unwrap());
        assert_eq!(first, second);
    }
}
