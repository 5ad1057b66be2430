use super::BodyMutation;
use regex::Regex;

#[derive(Debug)]
enum Pattern {
    Text(String),
    Regex(Regex),
}

#[derive(Debug)]
pub struct BodyReplaceMutation {
    pattern: Pattern,
    substitution: String,
}

impl BodyReplaceMutation {
    pub fn text<S1: Into<String>, S2: Into<String>>(text: S1, substitution: S2) -> Self {
        Self {
            pattern: Pattern::Text(text.into()),
            substitution: substitution.into(),
        }
    }

    pub fn regex<S: Into<String>>(pattern: Regex, substitution: S) -> Self {
        Self {
            pattern: Pattern::Regex(pattern),
            substitution: substitution.into(),
        }
    }
}

impl BodyMutation for BodyReplaceMutation {
    fn mutate(&self, body: &mut String) {
        *body = match &self.pattern {
            Pattern::Text(text) => body.replace(text.as_str(), &self.substitution),
            Pattern::Regex(regex) => regex
                .replace_all(body.as_str(), self.substitution.as_str())
                .into_owned(),
        };
    }
}
