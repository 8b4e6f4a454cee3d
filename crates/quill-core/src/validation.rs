//! Declarative request validation.
//!
//! Endpoints describe their inputs as an ordered list of [`Rule`]s built with
//! [`FieldRules`]. One runner, [`RuleSet::apply`], evaluates every rule against
//! a [`RequestInput`], normalizing values in place and collecting every failed
//! assertion instead of stopping at the first one.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

pub static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern"));

pub static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("username pattern"));

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@.]{2,}$").expect("email pattern")
});

/// Where in the request a field lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Body,
    Param,
    Query,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Body => "body",
            Source::Param => "params",
            Source::Query => "query",
        }
    }
}

/// The parts of a request that rules can inspect.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestInput {
    pub params: Map<String, Value>,
    pub query: Map<String, Value>,
    pub body: Value,
}

impl Default for RequestInput {
    fn default() -> Self {
        Self {
            params: Map::new(),
            query: Map::new(),
            body: Value::Object(Map::new()),
        }
    }
}

impl RequestInput {
    fn get(&self, source: Source, field: &str) -> Option<&Value> {
        match source {
            Source::Body => self.body.get(field),
            Source::Param => self.params.get(field),
            Source::Query => self.query.get(field),
        }
    }

    fn get_mut(&mut self, source: Source, field: &str) -> Option<&mut Value> {
        match source {
            Source::Body => self.body.get_mut(field),
            Source::Param => self.params.get_mut(field),
            Source::Query => self.query.get_mut(field),
        }
    }
}

/// A single assertion over one field value.
#[derive(Debug, Clone)]
pub enum Predicate {
    NotEmpty,
    Length { min: usize, max: Option<usize> },
    IsArray,
    OneOf(&'static [&'static str]),
    Matches(Regex),
    Email,
    Uuid,
}

/// Scalars are compared as text; anything else has no text form.
fn as_text(value: Option<&Value>) -> Option<Cow<'_, str>> {
    match value {
        None | Some(Value::Null) => Some(Cow::Borrowed("")),
        Some(Value::String(s)) => Some(Cow::Borrowed(s.as_str())),
        Some(Value::Number(n)) => Some(Cow::Owned(n.to_string())),
        Some(Value::Bool(b)) => Some(Cow::Owned(b.to_string())),
        Some(Value::Array(_) | Value::Object(_)) => None,
    }
}

impl Predicate {
    pub fn holds(&self, value: Option<&Value>) -> bool {
        if let Predicate::IsArray = self {
            return matches!(value, Some(Value::Array(_)));
        }

        let Some(text) = as_text(value) else {
            return false;
        };

        match self {
            Predicate::NotEmpty => !text.is_empty(),
            Predicate::Length { min, max } => {
                let len = text.chars().count();
                len >= *min && max.is_none_or(|max| len <= max)
            }
            Predicate::OneOf(allowed) => allowed.contains(&text.as_ref()),
            Predicate::Matches(re) => re.is_match(&text),
            Predicate::Email => EMAIL.is_match(&text),
            Predicate::Uuid => Uuid::parse_str(&text).is_ok(),
            Predicate::IsArray => unreachable!("handled above"),
        }
    }
}

/// What a rule does to its field.
#[derive(Debug, Clone)]
pub enum Step {
    /// Strip surrounding whitespace from string values.
    Trim,
    /// Record `message` when `predicate` does not hold.
    Check {
        predicate: Predicate,
        message: Cow<'static, str>,
    },
}

/// One rule descriptor: a field, where to find it, and one step.
#[derive(Debug, Clone)]
pub struct Rule {
    pub source: Source,
    pub field: &'static str,
    pub optional: bool,
    pub step: Step,
}

/// A failed assertion, reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub location: &'static str,
    pub message: String,
}

/// Builder for the rule chain of a single field.
#[derive(Debug, Clone)]
pub struct FieldRules {
    source: Source,
    field: &'static str,
    optional: bool,
    steps: Vec<Step>,
}

impl FieldRules {
    pub fn new(source: Source, field: &'static str) -> Self {
        Self {
            source,
            field,
            optional: false,
            steps: Vec::new(),
        }
    }

    pub fn body(field: &'static str) -> Self {
        Self::new(Source::Body, field)
    }

    pub fn param(field: &'static str) -> Self {
        Self::new(Source::Param, field)
    }

    pub fn query(field: &'static str) -> Self {
        Self::new(Source::Query, field)
    }

    /// Skip the whole chain when the field is absent or null.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn trim(mut self) -> Self {
        self.steps.push(Step::Trim);
        self
    }

    pub fn check(mut self, predicate: Predicate, message: impl Into<Cow<'static, str>>) -> Self {
        self.steps.push(Step::Check {
            predicate,
            message: message.into(),
        });
        self
    }

    pub fn not_empty(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Predicate::NotEmpty, message)
    }

    pub fn length(
        self,
        min: usize,
        max: Option<usize>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.check(Predicate::Length { min, max }, message)
    }

    pub fn is_array(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Predicate::IsArray, message)
    }

    pub fn one_of(
        self,
        allowed: &'static [&'static str],
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.check(Predicate::OneOf(allowed), message)
    }

    pub fn matches(self, pattern: &Regex, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Predicate::Matches(pattern.clone()), message)
    }

    pub fn email(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Predicate::Email, message)
    }

    pub fn uuid(self, message: impl Into<Cow<'static, str>>) -> Self {
        self.check(Predicate::Uuid, message)
    }

    fn into_rules(self) -> impl Iterator<Item = Rule> {
        let (source, field, optional) = (self.source, self.field, self.optional);
        self.steps.into_iter().map(move |step| Rule {
            source,
            field,
            optional,
            step,
        })
    }
}

/// The ordered rules guarding one endpoint.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(fields: impl IntoIterator<Item = FieldRules>) -> Self {
        Self {
            rules: fields.into_iter().flat_map(FieldRules::into_rules).collect(),
        }
    }

    /// Run every rule in order against `input`.
    ///
    /// Trim steps rewrite string values in place. All failed checks are
    /// returned together; an empty rule set always succeeds.
    pub fn apply(&self, input: &mut RequestInput) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        for rule in &self.rules {
            let present = !matches!(
                input.get(rule.source, rule.field),
                None | Some(Value::Null)
            );
            if rule.optional && !present {
                continue;
            }

            match &rule.step {
                Step::Trim => {
                    if let Some(Value::String(s)) = input.get_mut(rule.source, rule.field) {
                        let trimmed = s.trim();
                        if trimmed.len() != s.len() {
                            *s = trimmed.to_string();
                        }
                    }
                }
                Step::Check { predicate, message } => {
                    if !predicate.holds(input.get(rule.source, rule.field)) {
                        errors.push(FieldError {
                            field: rule.field.to_string(),
                            location: rule.source.as_str(),
                            message: message.to_string(),
                        });
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
