//! Filter expressions and node visibility.
//!
//! An expression is a chain of named predicate stages, e.g.
//! `filter:query | limitTo:max`. Parameters are either literals or
//! references to variables of a [`FilterScope`]; only references are
//! watched. A node is visible iff running the whole chain over `[node]`
//! leaves something behind.

use crate::error::FilterError;
use crate::node::NodeAttributes;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

// ===== EXPRESSION =====

#[derive(Debug, Clone, PartialEq)]
pub enum FilterParam {
    /// Dotted variable reference such as `query` or `search.text`
    Variable(Vec<String>),
    Literal(Value),
}

impl FilterParam {
    pub fn resolve(&self, scope: &FilterScope) -> Value {
        match self {
            FilterParam::Variable(path) => scope.lookup(path),
            FilterParam::Literal(value) => value.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterStage {
    pub name: String,
    pub params: Vec<FilterParam>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpression {
    source: String,
    stages: Vec<FilterStage>,
}

impl FilterExpression {
    /// Parse `stage1:a,b | stage2:c`. Parameters may also be separated by `:`.
    pub fn parse(source: &str) -> Result<Self, FilterError> {
        let segments = split_unquoted(source, &['|']).map_err(|_| FilterError::UnterminatedString {
            stage: source.trim().to_string(),
        })?;

        let mut stages = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(FilterError::EmptyStage { index });
            }
            stages.push(parse_stage(segment)?);
        }
        Ok(Self {
            source: source.trim().to_string(),
            stages,
        })
    }

    /// Blank input, or the literal `undefined`, means "no filter"
    pub fn parse_optional(source: Option<&str>) -> Result<Option<Self>, FilterError> {
        match source.map(str::trim) {
            None | Some("") | Some("undefined") => Ok(None),
            Some(source) => Self::parse(source).map(Some),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn stages(&self) -> &[FilterStage] {
        &self.stages
    }

    /// Union of the variable names referenced across all stages
    pub fn variables(&self) -> BTreeSet<String> {
        self.stages
            .iter()
            .flat_map(|stage| stage.params.iter())
            .filter_map(|param| match param {
                FilterParam::Variable(path) => path.first().cloned(),
                FilterParam::Literal(_) => None,
            })
            .collect()
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

fn parse_stage(segment: &str) -> Result<FilterStage, FilterError> {
    let parts = split_unquoted(segment, &[':', ',']).map_err(|_| FilterError::UnterminatedString {
        stage: segment.to_string(),
    })?;

    let name = parts.first().map(|name| name.trim()).unwrap_or_default();
    if !is_identifier(name) {
        return Err(FilterError::InvalidStageName {
            stage: segment.to_string(),
        });
    }

    let params = parts[1..]
        .iter()
        .map(|parameter| {
            parse_param(parameter.trim()).ok_or_else(|| FilterError::InvalidParameter {
                stage: segment.to_string(),
                parameter: parameter.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FilterStage {
        name: name.to_string(),
        params,
    })
}

fn parse_param(text: &str) -> Option<FilterParam> {
    if let Some(quote) = text.chars().next().filter(|c| *c == '"' || *c == '\'') {
        let inner = text.strip_prefix(quote)?.strip_suffix(quote)?;
        return Some(FilterParam::Literal(Value::String(unescape(inner))));
    }
    match text {
        "true" => return Some(FilterParam::Literal(Value::Bool(true))),
        "false" => return Some(FilterParam::Literal(Value::Bool(false))),
        "null" => return Some(FilterParam::Literal(Value::Null)),
        _ => {}
    }
    if text.starts_with(|c: char| c.is_ascii_digit() || c == '-') {
        return match serde_json::from_str::<Value>(text) {
            Ok(number @ Value::Number(_)) => Some(FilterParam::Literal(number)),
            _ => None,
        };
    }

    let path: Vec<String> = text.split('.').map(str::to_string).collect();
    if path.iter().all(|segment| is_identifier(segment)) {
        Some(FilterParam::Variable(path))
    } else {
        None
    }
}

fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Split on any of `separators` that sit outside quoted literals
fn split_unquoted(text: &str, separators: &[char]) -> Result<Vec<String>, ()> {
    let mut parts = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for c in text.chars() {
        if let Some(open) = quote {
            current.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == open {
                quote = None;
            }
            continue;
        }
        if c == '"' || c == '\'' {
            quote = Some(c);
            current.push(c);
        } else if separators.contains(&c) {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }
    if quote.is_some() {
        return Err(());
    }
    parts.push(current);
    Ok(parts)
}

fn unescape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }
    result
}

// ===== SCOPE =====

/// Named filter variables, the live inputs of a filter expression
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterScope {
    variables: BTreeMap<String, Value>,
}

impl FilterScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(name, value);
        self
    }

    /// Returns `true` when the stored value actually changed
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> bool {
        let value = value.into();
        let name = name.into();
        if self.variables.get(&name) == Some(&value) {
            return false;
        }
        self.variables.insert(name, value);
        true
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Missing variables and missing nested keys resolve to `null`
    pub fn lookup(&self, path: &[String]) -> Value {
        let Some((root, rest)) = path.split_first() else {
            return Value::Null;
        };
        let mut value = match self.variables.get(root) {
            Some(value) => value,
            None => return Value::Null,
        };
        for key in rest {
            match value.get(key) {
                Some(nested) => value = nested,
                None => return Value::Null,
            }
        }
        value.clone()
    }
}

// ===== PREDICATES =====

/// A filter stage implementation: takes the running sequence and the
/// resolved parameters, returns the retained items.
pub type Predicate = Arc<
    dyn for<'n> Fn(Vec<&'n Value>, &[Value], &NodeAttributes) -> Vec<&'n Value> + Send + Sync,
>;

#[derive(Clone, Default)]
pub struct PredicateRegistry {
    predicates: BTreeMap<String, Predicate>,
}

impl fmt::Debug for PredicateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.predicates.keys()).finish()
    }
}

impl PredicateRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `filter`, `contains` and `limitTo`
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register("filter", |items, args, attrs| {
            let expected = args.first().unwrap_or(&Value::Null);
            items
                .into_iter()
                .filter(|node| matches_expected(node, expected, attrs))
                .collect()
        });
        registry.register("contains", |items, args, attrs| {
            let Some(needle) = args.first().and_then(search_text) else {
                return items;
            };
            items
                .into_iter()
                .filter(|node| attrs.label(node).to_lowercase().contains(&needle))
                .collect()
        });
        registry.register("limitTo", |items, args, _| {
            let Some(limit) = args.first().and_then(Value::as_f64) else {
                return items;
            };
            let limit = limit.trunc();
            let len = items.len();
            if limit >= 0.0 {
                items.into_iter().take(limit as usize).collect()
            } else {
                let keep = (-limit as usize).min(len);
                items.into_iter().skip(len - keep).collect()
            }
        });
        registry
    }

    pub fn register<F>(&mut self, name: impl Into<String>, predicate: F)
    where
        F: for<'n> Fn(Vec<&'n Value>, &[Value], &NodeAttributes) -> Vec<&'n Value>
            + Send
            + Sync
            + 'static,
    {
        self.predicates.insert(name.into(), Arc::new(predicate));
    }

    pub fn get(&self, name: &str) -> Option<&Predicate> {
        self.predicates.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }
}

/// Lowercased search text; `None` means "match everything"
fn search_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(text) => text.clone(),
        other => other.to_string(),
    };
    if text.is_empty() {
        None
    } else {
        Some(text.to_lowercase())
    }
}

fn matches_expected(node: &Value, expected: &Value, attrs: &NodeAttributes) -> bool {
    match expected {
        Value::Object(fields) => fields.iter().all(|(key, expected)| {
            let Some(needle) = search_text(expected) else {
                return true;
            };
            if key == "$" {
                deep_contains(node, &needle, attrs)
            } else {
                node.get(key)
                    .is_some_and(|actual| deep_contains(actual, &needle, attrs))
            }
        }),
        Value::Array(_) => true,
        scalar => match search_text(scalar) {
            Some(needle) => deep_contains(node, &needle, attrs),
            None => true,
        },
    }
}

/// Case-insensitive substring search through a record and everything nested
/// in it, skipping the tree's own state attributes.
fn deep_contains(value: &Value, needle: &str, attrs: &NodeAttributes) -> bool {
    match value {
        Value::Null => false,
        Value::String(text) => text.to_lowercase().contains(needle),
        Value::Bool(_) | Value::Number(_) => value.to_string().contains(needle),
        Value::Array(items) => items.iter().any(|item| deep_contains(item, needle, attrs)),
        Value::Object(fields) => fields.iter().any(|(key, field)| {
            !key.starts_with('$')
                && !attrs.is_state_attribute(key)
                && deep_contains(field, needle, attrs)
        }),
    }
}

// ===== EVALUATOR =====

/// Computes the `visible` flag of nodes for one tree instance.
#[derive(Debug, Clone, Default)]
pub struct FilterEvaluator {
    expression: Option<FilterExpression>,
    registry: PredicateRegistry,
}

impl FilterEvaluator {
    /// Every stage must name a registered predicate
    pub fn new(
        expression: Option<FilterExpression>,
        registry: PredicateRegistry,
    ) -> Result<Self, FilterError> {
        if let Some(expression) = &expression {
            if let Some(stage) = expression
                .stages()
                .iter()
                .find(|stage| !registry.contains(&stage.name))
            {
                return Err(FilterError::UnknownPredicate(stage.name.clone()));
            }
        }
        Ok(Self {
            expression,
            registry,
        })
    }

    /// No expression: every node is visible
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn expression(&self) -> Option<&FilterExpression> {
        self.expression.as_ref()
    }

    /// Whether a change of variable `name` requires recomputing visibility
    pub fn watches(&self, name: &str) -> bool {
        self.expression
            .as_ref()
            .is_some_and(|expression| expression.variables().contains(name))
    }

    pub fn evaluate(
        &self,
        node: &Value,
        scope: &FilterScope,
        attrs: &NodeAttributes,
    ) -> Result<bool, FilterError> {
        let Some(expression) = &self.expression else {
            return Ok(true);
        };

        let mut items = vec![node];
        for stage in expression.stages() {
            let predicate = self
                .registry
                .get(&stage.name)
                .ok_or_else(|| FilterError::UnknownPredicate(stage.name.clone()))?;
            let args: Vec<Value> = stage.params.iter().map(|param| param.resolve(scope)).collect();
            items = predicate(items, &args, attrs);
        }
        Ok(!items.is_empty())
    }

    /// Recompute `visible` for every node of the forest.
    ///
    /// Nodes whose evaluation fails stay visible; the first error is returned.
    pub fn refresh(
        &self,
        roots: &mut [Value],
        scope: &FilterScope,
        attrs: &NodeAttributes,
    ) -> Result<(), FilterError> {
        let mut first_error = None;
        attrs.walk_mut(roots, &mut |_, node| {
            let visible = match self.evaluate(node, scope, attrs) {
                Ok(visible) => visible,
                Err(error) => {
                    first_error.get_or_insert(error);
                    true
                }
            };
            attrs.set_visible(node, visible);
        });
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}
