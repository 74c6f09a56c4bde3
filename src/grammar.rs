use crate::cursor::Cursor;
use crate::error::{GrammarError, ParseError};
use crate::parser::Parser;
use crate::result::Expected;
use crate::rule::{AnySlot, Rule, Slot};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which labels a failed parse reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DiagnosticMode {
    /// Every label collected on the returned failure path
    #[default]
    AllAlternatives,
    /// Only the labels expected at the furthest offset any alternative reached
    FurthestFailure,
}

/// Wires named rules into a [`Grammar`]
///
/// Rules are declared first, which hands out a [`Rule`] handle, and defined
/// afterwards in terms of any declared rule. This is what lets rules be
/// mutually recursive.
///
/// ```
/// use pegcomb::grammar::GrammarBuilder;
/// use pegcomb::map::MapExt;
/// use pegcomb::choice::ChoiceExt;
/// use pegcomb::sequence::SequenceExt;
/// use pegcomb::terminal::literal;
///
/// // parens := "(" parens ")" | "x"
/// let mut builder = GrammarBuilder::new("parens");
/// let parens = builder.declare::<usize>("parens").unwrap();
/// builder
///     .define(
///         &parens,
///         literal("(", "'('")
///             .then(parens.clone())
///             .then(literal(")", "')'"))
///             .map(|(_, depth, _)| depth + 1)
///             .or(literal("x", "'x'").map(|_| 0)),
///     )
///     .unwrap();
/// let grammar = builder.build(&parens).unwrap();
///
/// assert_eq!(grammar.parse("((x))"), Some(2));
/// assert_eq!(grammar.parse("((x)"), None);
/// ```
pub struct GrammarBuilder {
    name: Cow<'static, str>,
    mode: DiagnosticMode,
    rules: BTreeMap<Cow<'static, str>, Arc<dyn AnySlot>>,
}

impl GrammarBuilder {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        GrammarBuilder {
            name: name.into(),
            mode: DiagnosticMode::default(),
            rules: BTreeMap::new(),
        }
    }

    pub fn diagnostic_mode(mut self, mode: DiagnosticMode) -> Self {
        self.mode = mode;
        self
    }

    /// Reserve a named rule without defining it yet
    pub fn declare<V: 'static>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
    ) -> Result<Rule<V>, GrammarError> {
        let name = name.into();
        if self.rules.contains_key(&name) {
            return Err(GrammarError::DuplicateRule(name));
        }

        let slot = Arc::new(Slot::<V>::new(name.clone()));
        let rule = Rule::new(&slot);
        self.rules.insert(name, slot);
        Ok(rule)
    }

    /// Give a declared rule its definition. Each rule is defined exactly once.
    pub fn define<V, P>(&mut self, rule: &Rule<V>, parser: P) -> Result<(), GrammarError>
    where
        V: 'static,
        P: Parser<Output = V> + Send + Sync + 'static,
    {
        if !self.owns(rule) {
            return Err(GrammarError::ForeignRule(rule.name().to_string().into()));
        }
        let Some(slot) = rule.slot() else {
            return Err(GrammarError::ForeignRule(rule.name().to_string().into()));
        };
        if !slot.fill(Box::new(parser)) {
            return Err(GrammarError::Redefined(rule.name().to_string().into()));
        }
        Ok(())
    }

    /// Declare and define a rule in one step
    pub fn rule<V, P>(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        parser: P,
    ) -> Result<Rule<V>, GrammarError>
    where
        V: 'static,
        P: Parser<Output = V> + Send + Sync + 'static,
    {
        let rule = self.declare(name)?;
        self.define(&rule, parser)?;
        Ok(rule)
    }

    /// Finish the grammar with `start` as its entry rule
    ///
    /// Fails if any declared rule was left undefined.
    pub fn build<V: 'static>(self, start: &Rule<V>) -> Result<Grammar<V>, GrammarError> {
        if !self.owns(start) {
            return Err(GrammarError::ForeignRule(start.name().to_string().into()));
        }
        if let Some(slot) = self.rules.values().find(|slot| !slot.is_defined()) {
            return Err(GrammarError::Undefined(slot.name().to_string().into()));
        }

        debug!(
            grammar = %self.name,
            rules = self.rules.len(),
            start = start.name(),
            "grammar built"
        );
        Ok(Grammar {
            name: self.name,
            mode: self.mode,
            rules: self.rules,
            start: start.clone(),
        })
    }

    fn owns<V>(&self, rule: &Rule<V>) -> bool {
        self.rules
            .get(rule.name())
            .is_some_and(|slot| Arc::as_ptr(slot) as *const () == rule.slot_ptr())
    }
}

/// A set of named rules with one start rule
///
/// Immutable once built. Parsing shares no mutable state, so one grammar can be
/// used from several threads at once.
pub struct Grammar<V> {
    name: Cow<'static, str>,
    mode: DiagnosticMode,
    rules: BTreeMap<Cow<'static, str>, Arc<dyn AnySlot>>,
    start: Rule<V>,
}

impl<V> Grammar<V> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn diagnostic_mode(&self) -> DiagnosticMode {
        self.mode
    }

    pub fn start_name(&self) -> &str {
        self.start.name()
    }

    /// Names of all rules, sorted
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(|name| name.as_ref())
    }

    /// Parse the whole of `text`
    ///
    /// On failure the diagnostic line is logged as a warning and `None` is returned.
    pub fn parse(&self, text: &str) -> Option<V> {
        match self.try_parse(text) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    grammar = %self.name,
                    row = err.location.row,
                    col = err.location.col,
                    "{err}"
                );
                None
            }
        }
    }

    /// Parse the whole of `text`, returning the diagnostic on failure
    pub fn try_parse(&self, text: &str) -> Result<V, ParseError> {
        self.parse_range(Cursor::new(text), Cursor::end_of(text))
    }

    /// Run the start rule from `start` and require it to stop exactly at `end`
    pub fn parse_range<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> Result<V, ParseError> {
        debug!(
            grammar = %self.name,
            offset = start.offset(),
            len = end.offset().saturating_sub(start.offset()),
            "parse"
        );
        let result = self.start.parse(start, end);
        let matched = result.value.is_some();

        match result.value {
            Some(value) if result.remainder == end => {
                debug!(grammar = %self.name, "parse complete");
                Ok(value)
            }
            _ => {
                let mut expected = result.expected;
                if expected.is_empty() {
                    // Nothing was pending: either the start rule stopped short or failed silently
                    let label = if matched {
                        Cow::Borrowed("end of input")
                    } else {
                        Cow::Owned(self.start.name().to_string())
                    };
                    expected = Expected::single(label, result.remainder.location());
                }
                Err(self.diagnose(&expected, result.remainder))
            }
        }
    }

    fn diagnose(&self, expected: &Expected, remainder: Cursor<'_>) -> ParseError {
        let (location, furthest) = expected
            .furthest()
            .unwrap_or((remainder.location(), Default::default()));

        let labels = match self.mode {
            DiagnosticMode::AllAlternatives => expected.labels(),
            DiagnosticMode::FurthestFailure => furthest,
        };

        ParseError {
            expected: labels.into_iter().map(str::to_string).collect(),
            location,
        }
    }
}

impl<V> std::fmt::Debug for Grammar<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.name)
            .field("mode", &self.mode)
            .field("start", &self.start.name())
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::ChoiceExt;
    use crate::map::MapExt;
    use crate::repeat::repeat1;
    use crate::sequence::SequenceExt;
    use crate::terminal::{literal, pattern};
    use pretty_assertions::assert_eq;

    fn number_grammar() -> Grammar<u32> {
        let mut builder = GrammarBuilder::new("number");
        let number = builder
            .rule(
                "number",
                pattern("[0-9]+", "NUMBER")
                    .unwrap()
                    .map(|s| s.parse::<u32>().unwrap_or_default()),
            )
            .unwrap();
        builder.build(&number).unwrap()
    }

    #[test]
    fn test_total_consumption() {
        let grammar = number_grammar();
        assert_eq!(grammar.parse("12"), Some(12));
        assert_eq!(grammar.parse("12abc"), None);
    }

    #[test]
    fn test_under_consumption_reports_end_of_input() {
        let grammar = number_grammar();
        let err = grammar.try_parse("12abc").unwrap_err();
        assert_eq!(err.expected, ["end of input"]);
        assert_eq!(err.location.offset, 2);
        assert_eq!(err.to_string(), "expected one of end of input.");
    }

    #[test]
    fn test_failure_reports_terminal_label() {
        let grammar = number_grammar();
        let err = grammar.try_parse("+").unwrap_err();
        assert_eq!(err.expected, ["NUMBER"]);
        assert_eq!(err.to_string(), "expected one of NUMBER.");
    }

    #[test]
    fn test_mutual_recursion() {
        // list := "[" items "]"; items := item+; item := "x" | list
        let mut builder = GrammarBuilder::new("lists");
        let list = builder.declare::<usize>("list").unwrap();
        let item = builder.declare::<usize>("item").unwrap();
        let items = builder
            .rule("items", repeat1(item.clone()).map(|xs| xs.into_iter().sum::<usize>()))
            .unwrap();
        builder
            .define(
                &list,
                literal("[", "'['")
                    .then(items.clone())
                    .then(literal("]", "']'"))
                    .map(|(_, n, _)| n),
            )
            .unwrap();
        builder
            .define(&item, literal("x", "'x'").map(|_| 1).or(list.clone()))
            .unwrap();
        let grammar = builder.build(&list).unwrap();

        assert_eq!(grammar.parse("[x[xx]x]"), Some(4));
        assert_eq!(grammar.parse("[x[xx]x"), None);
        assert_eq!(grammar.rule_names().collect::<Vec<_>>(), ["item", "items", "list"]);
        assert_eq!(grammar.start_name(), "list");
    }

    #[test]
    fn test_duplicate_declaration() {
        let mut builder = GrammarBuilder::new("dup");
        builder.declare::<String>("a").unwrap();
        let err = builder.declare::<String>("a").unwrap_err();
        assert_eq!(err, GrammarError::DuplicateRule("a".into()));
    }

    #[test]
    fn test_redefinition() {
        let mut builder = GrammarBuilder::new("redef");
        let a = builder.declare::<String>("a").unwrap();
        builder.define(&a, literal("a", "'a'")).unwrap();
        let err = builder.define(&a, literal("b", "'b'")).unwrap_err();
        assert_eq!(err, GrammarError::Redefined("a".into()));
    }

    #[test]
    fn test_undefined_rule_blocks_build() {
        let mut builder = GrammarBuilder::new("undef");
        let a = builder.declare::<String>("a").unwrap();
        let b = builder.declare::<String>("b").unwrap();
        builder.define(&a, b.clone()).unwrap();
        let err = builder.build(&a).unwrap_err();
        assert_eq!(err, GrammarError::Undefined("b".into()));
    }

    #[test]
    fn test_foreign_rule() {
        let mut first = GrammarBuilder::new("first");
        let a = first.declare::<String>("a").unwrap();

        let mut second = GrammarBuilder::new("second");
        second.declare::<String>("a").unwrap();
        let err = second.define(&a, literal("a", "'a'")).unwrap_err();
        assert_eq!(err, GrammarError::ForeignRule("a".into()));
    }

    #[test]
    fn test_diagnostic_modes() {
        // start := "a" "b" | "c"
        let build = |mode| {
            let mut builder = GrammarBuilder::new("modes").diagnostic_mode(mode);
            let start = builder
                .rule(
                    "start",
                    literal("a", "'a'")
                        .then(literal("b", "'b'"))
                        .map(|(a, b)| a + &b)
                        .or(literal("c", "'c'")),
                )
                .unwrap();
            builder.build(&start).unwrap()
        };

        let all = build(DiagnosticMode::AllAlternatives).try_parse("ax").unwrap_err();
        assert_eq!(all.expected, ["'b'", "'c'"]);
        assert_eq!(all.location.offset, 1);

        let furthest = build(DiagnosticMode::FurthestFailure)
            .try_parse("ax")
            .unwrap_err();
        assert_eq!(furthest.expected, ["'b'"]);
        assert_eq!(furthest.location.offset, 1);
    }

    #[test]
    fn test_rules_fail_after_grammar_is_dropped() {
        let mut builder = GrammarBuilder::new("short-lived");
        let a = builder.rule("a", literal("a", "'a'")).unwrap();
        let grammar = builder.build(&a).unwrap();
        assert_eq!(grammar.parse("a").as_deref(), Some("a"));
        drop(grammar);

        let text = "a";
        let result = a.parse(Cursor::new(text), Cursor::end_of(text));
        assert!(result.value.is_none());
        assert!(result.expected.contains("a"));
    }

    #[test]
    fn test_grammar_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Grammar<u32>>();
        assert_send_sync::<Rule<String>>();
    }
}
