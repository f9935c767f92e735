use core::fmt;

use indexmap::IndexMap;

use crate::{
    scalar,
    value::{Map, Value},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BlockKind {
    Map,
    List,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            BlockKind::Map => "mapping",
            BlockKind::List => "list",
        })
    }
}

/// Where a closed frame's value goes in its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Slot {
    Root,
    Key(String),
    Item,
}

#[derive(Debug)]
enum ListItem {
    /// A scalar whose type is decided when the list closes.
    Raw(String),
    Nested(Value),
}

#[derive(Debug)]
enum Container {
    /// Every value seen for each key, in order. Coalesced on close.
    Map(IndexMap<String, Vec<Value>>),
    List(Vec<ListItem>),
}

/// Stack entry: one per open container.
#[derive(Debug)]
pub(crate) struct Frame {
    container: Container,
    slot: Slot,
    /// Offset of the opening `{`; `None` for an implicit root.
    opened_at: Option<usize>,
}

impl Frame {
    pub(crate) fn new(kind: BlockKind, slot: Slot, opened_at: Option<usize>) -> Self {
        let container = match kind {
            BlockKind::Map => Container::Map(IndexMap::new()),
            BlockKind::List => Container::List(Vec::new()),
        };
        Self {
            container,
            slot,
            opened_at,
        }
    }

    pub(crate) fn kind(&self) -> BlockKind {
        match self.container {
            Container::Map(_) => BlockKind::Map,
            Container::List(_) => BlockKind::List,
        }
    }

    pub(crate) fn opened_at(&self) -> Option<usize> {
        self.opened_at
    }

    /// Whether the frame was opened by a `{` and must be closed by a `}`.
    pub(crate) fn is_explicit(&self) -> bool {
        self.opened_at.is_some()
    }

    /// Stores a typed value under `key`. Repeated keys keep every value.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        match &mut self.container {
            Container::Map(entries) => entries.entry(key).or_default().push(value),
            Container::List(items) => items.push(ListItem::Nested(value)),
        }
    }

    /// Appends a list item whose type is decided when the list closes.
    pub(crate) fn push_raw(&mut self, raw: String) {
        match &mut self.container {
            Container::List(items) => items.push(ListItem::Raw(raw)),
            Container::Map(_) => unreachable!("raw items only go into lists"),
        }
    }

    /// Moves a closed child into this frame.
    pub(crate) fn attach(&mut self, slot: Slot, value: Value) {
        match (&mut self.container, slot) {
            (Container::Map(entries), Slot::Key(key)) => entries.entry(key).or_default().push(value),
            (Container::List(items), _) => items.push(ListItem::Nested(value)),
            (Container::Map(_), Slot::Item | Slot::Root) => {
                unreachable!("a mapping child always has a key")
            }
        }
    }

    /// Finalizes the container: repeated keys become lists of their values,
    /// and a list of scalars gets least-common-denominator typing.
    pub(crate) fn close(self) -> (Slot, Value) {
        let value = match self.container {
            Container::Map(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, values)| (key, coalesce(values)))
                    .collect::<Map>(),
            ),
            Container::List(items) => Value::List(normalize_items(items)),
        };
        (self.slot, value)
    }
}

fn coalesce(values: Vec<Value>) -> Value {
    match <[Value; 1]>::try_from(values) {
        Ok([single]) => single,
        Err(values) => Value::List(values),
    }
}

fn normalize_items(items: Vec<ListItem>) -> Vec<Value> {
    if items.iter().all(|item| matches!(item, ListItem::Raw(_))) {
        let raw = items
            .into_iter()
            .filter_map(|item| match item {
                ListItem::Raw(s) => Some(s),
                ListItem::Nested(_) => None,
            })
            .collect();
        return scalar::normalize(raw);
    }
    items
        .into_iter()
        .map(|item| match item {
            ListItem::Raw(s) => Value::String(s),
            ListItem::Nested(v) => v,
        })
        .collect()
}
