//! Identifier tokenization and naming-convention variants.
//!
//! Field names reach the engine in many conventions: struct members
//! (`first_name`), map keys (`FirstName`, `first-name`) and wire payloads
//! (`firstName`). Everything here reduces a name to lowercase word tokens so
//! rules can be matched regardless of the convention a producer used.

/// Splits an identifier into lowercase word tokens.
///
/// `-` and `_` separate words, as does whitespace. Inside each part a token
/// boundary is placed at a lowercase-to-uppercase transition and at the end of
/// an uppercase run that is followed by a lowercase letter, so `HTTPServer`
/// yields `["http", "server"]` and `AccountNumber` yields `["account", "number"]`.
///
/// Names without letters come back as a single verbatim token.
pub fn tokenize(name: &str) -> Vec<String> {
    let spaced: String = name
        .trim()
        .chars()
        .map(|ch| if ch == '-' || ch == '_' { ' ' } else { ch })
        .collect();

    let mut tokens = Vec::new();
    for part in spaced.split_whitespace() {
        let chars: Vec<char> = part.chars().collect();
        let mut start = 0;
        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let curr = chars[i];
            let next = chars.get(i + 1).copied();

            let lower_to_upper = prev.is_lowercase() && curr.is_uppercase();
            let end_of_upper_run = prev.is_uppercase()
                && curr.is_uppercase()
                && next.is_some_and(char::is_lowercase);

            if lower_to_upper || end_of_upper_run {
                push_token(&mut tokens, &chars[start..i]);
                start = i;
            }
        }
        push_token(&mut tokens, &chars[start..]);
    }
    tokens
}

fn push_token(tokens: &mut Vec<String>, segment: &[char]) {
    if segment.is_empty() {
        return;
    }
    let token: String = segment.iter().collect::<String>().to_lowercase();
    if !token.trim().is_empty() {
        tokens.push(token);
    }
}

/// Joins tokens with no separator: the canonical form used for substring matching.
///
/// `"sender_account_no"` and `"SenderAccountNo"` both canonicalize to
/// `"senderaccountno"`.
pub fn canonicalize(name: &str) -> String {
    tokenize(name).concat()
}

/// Naming-convention spellings of one token sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleVariants {
    /// `first_name`
    pub snake: String,
    /// `first-name`
    pub kebab: String,
    /// `FirstName`
    pub pascal: String,
    /// `firstName`
    pub camel: String,
}

impl StyleVariants {
    /// Builds every variant for already tokenized input.
    pub fn of(tokens: &[String]) -> Self {
        let pascal: String = tokens.iter().map(|token| upper_first(token)).collect();
        let camel = match tokens.split_first() {
            Some((first, rest)) => {
                let mut camel = first.clone();
                camel.extend(rest.iter().map(|token| upper_first(token)));
                camel
            }
            None => String::new(),
        };

        Self {
            snake: tokens.join("_"),
            kebab: tokens.join("-"),
            pascal,
            camel,
        }
    }

    /// Tokenizes `name` and builds its variants.
    pub fn of_name(name: &str) -> Self {
        Self::of(&tokenize(name))
    }

    /// Variants in lookup order: snake, kebab, Pascal, camel.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        [
            self.snake.as_str(),
            self.kebab.as_str(),
            self.pascal.as_str(),
            self.camel.as_str(),
        ]
        .into_iter()
    }
}

fn upper_first(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
