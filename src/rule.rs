use crate::cursor::Cursor;
use crate::parser::{BoxedParser, Parser};
use crate::result::{Expected, ParseResult};
use std::borrow::Cow;
use std::fmt;
use std::sync::{Arc, OnceLock, Weak};
use tracing::{trace, warn};

/// Storage behind a rule: a name and a parser that is set exactly once
pub(crate) struct Slot<V> {
    name: Cow<'static, str>,
    parser: OnceLock<BoxedParser<V>>,
}

impl<V> Slot<V> {
    pub(crate) fn new(name: Cow<'static, str>) -> Self {
        Slot {
            name,
            parser: OnceLock::new(),
        }
    }

    /// Returns false if the slot was already filled
    pub(crate) fn fill(&self, parser: BoxedParser<V>) -> bool {
        self.parser.set(parser).is_ok()
    }
}

/// Type-erased view of a slot, so one grammar can own rules of different output types
pub(crate) trait AnySlot: Send + Sync {
    fn name(&self) -> &str;
    fn is_defined(&self) -> bool;
}

impl<V: 'static> AnySlot for Slot<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_defined(&self) -> bool {
        self.parser.get().is_some()
    }
}

/// Named reference to a grammar rule
///
/// A rule is declared first and defined later, so rules can refer to each other
/// (and to themselves) before any of them is complete. The grammar owns the
/// definition; a `Rule` is a weak handle that looks it up on every call. Cloning
/// a rule clones the handle, not the definition.
///
/// Calling a rule that is not defined yet, or whose grammar has been dropped,
/// fails with the rule's name as the expected label.
pub struct Rule<V> {
    name: Cow<'static, str>,
    slot: Weak<Slot<V>>,
}

impl<V> Rule<V> {
    pub(crate) fn new(slot: &Arc<Slot<V>>) -> Self {
        Rule {
            name: slot.name.clone(),
            slot: Arc::downgrade(slot),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn slot(&self) -> Option<Arc<Slot<V>>> {
        self.slot.upgrade()
    }

    pub(crate) fn slot_ptr(&self) -> *const () {
        self.slot.as_ptr() as *const ()
    }

    fn unavailable<'src>(&self, start: Cursor<'src>, reason: &str) -> ParseResult<'src, V> {
        warn!(rule = %self.name, reason, "rule invoked without a definition");
        ParseResult::failure(start, Expected::single(self.name.clone(), start.location()))
    }
}

impl<V> Clone for Rule<V> {
    fn clone(&self) -> Self {
        Rule {
            name: self.name.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<V> fmt::Debug for Rule<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule").field("name", &self.name).finish()
    }
}

impl<V> Parser for Rule<V> {
    type Output = V;

    fn parse<'src>(
        &self,
        start: Cursor<'src>,
        end: Cursor<'src>,
    ) -> ParseResult<'src, Self::Output> {
        let Some(slot) = self.slot.upgrade() else {
            return self.unavailable(start, "grammar dropped");
        };
        let Some(parser) = slot.parser.get() else {
            return self.unavailable(start, "not defined");
        };

        trace!(rule = %self.name, offset = start.offset(), "enter");
        let result = parser.parse(start, end);
        trace!(
            rule = %self.name,
            matched = result.is_success(),
            offset = result.remainder.offset(),
            "exit"
        );
        result
    }
}
