//! Child-sequence grammars for parents whose children follow a fixed shape.

use serde::{Deserialize, Deserializer};

use super::AsNode;
use crate::error::TreeError;

/// How many times a step of a [`Shape`] may repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    One,
    Optional,
    ZeroOrMore,
    OneOrMore,
}

impl Repeat {
    fn min(self) -> usize {
        match self {
            Repeat::One | Repeat::OneOrMore => 1,
            Repeat::Optional | Repeat::ZeroOrMore => 0,
        }
    }

    fn max(self) -> Option<usize> {
        match self {
            Repeat::One | Repeat::Optional => Some(1),
            Repeat::ZeroOrMore | Repeat::OneOrMore => None,
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Repeat::One => "",
            Repeat::Optional => "?",
            Repeat::ZeroOrMore => "*",
            Repeat::OneOrMore => "+",
        }
    }
}

/// One legal child sequence, written as `(kind, repeat)` steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape(pub &'static [(&'static str, Repeat)]);

impl Shape {
    pub fn accepts(&self, kinds: &[&str]) -> bool {
        matches(self.0, kinds, false)
    }

    /// Whether `kinds` can still be extended into a legal sequence.
    pub fn accepts_prefix(&self, kinds: &[&str]) -> bool {
        matches(self.0, kinds, true)
    }

    pub fn describe(&self) -> String {
        let steps: Vec<String> = self
            .0
            .iter()
            .map(|(kind, repeat)| format!("{kind}{}", repeat.suffix()))
            .collect();
        format!("[{}]", steps.join(", "))
    }
}

fn matches(steps: &[(&str, Repeat)], kinds: &[&str], prefix: bool) -> bool {
    let Some((&(kind, repeat), rest)) = steps.split_first() else {
        return kinds.is_empty();
    };

    let available = kinds.iter().take_while(|candidate| **candidate == kind).count();
    let within_max = repeat.max().is_none_or(|max| available <= max);
    if prefix && available == kinds.len() && within_max {
        return true;
    }

    let most = repeat.max().map_or(available, |max| available.min(max));
    (repeat.min()..=most).any(|taken| matches(rest, &kinds[taken..], prefix))
}

/// The legal shapes of one parent kind.
#[derive(Debug)]
pub struct ChildGrammar {
    pub parent: &'static str,
    pub shapes: &'static [Shape],
}

impl ChildGrammar {
    pub const fn new(parent: &'static str, shapes: &'static [Shape]) -> Self {
        ChildGrammar { parent, shapes }
    }

    pub fn accepts(&self, kinds: &[&str]) -> bool {
        self.shapes.iter().any(|shape| shape.accepts(kinds))
    }

    pub fn accepts_prefix(&self, kinds: &[&str]) -> bool {
        self.shapes.iter().any(|shape| shape.accepts_prefix(kinds))
    }

    pub fn describe(&self) -> String {
        let shapes: Vec<String> = self.shapes.iter().map(Shape::describe).collect();
        shapes.join(" | ")
    }

    /// Checks that `child` may follow the `existing` children.
    pub fn check_next(&self, existing: &[&'static str], child: &'static str) -> Result<(), TreeError> {
        let mut kinds = existing.to_vec();
        kinds.push(child);

        if self.accepts_prefix(&kinds) {
            Ok(())
        } else {
            Err(TreeError::invalid_child_placement(
                self.parent,
                child,
                self.describe(),
            ))
        }
    }

    /// Checks a finished child sequence.
    pub fn check_complete(&self, kinds: &[&'static str]) -> Result<(), TreeError> {
        if self.accepts(kinds) {
            Ok(())
        } else {
            Err(TreeError::malformed(
                self.parent,
                self.describe(),
                format!("children [{}] match no legal shape", kinds.join(", ")),
            ))
        }
    }

    /// Reads a child list and rejects it unless it is a complete legal shape.
    pub(crate) fn deserialize_children<'de, D, T>(
        &self,
        deserializer: D,
    ) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + AsNode,
    {
        let children = Vec::<T>::deserialize(deserializer)?;
        let kinds: Vec<&'static str> = children.iter().map(|child| child.as_node().kind()).collect();
        self.check_complete(&kinds).map_err(serde::de::Error::custom)?;
        Ok(children)
    }
}
