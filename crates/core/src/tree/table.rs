//! Data tables.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::arity::{ChildGrammar, Repeat, Shape};
use super::{Append, Node, Phrasing, TableChild, push};
use crate::error::TreeError;

string_enum! {
    TableLayoutWidth {
        #[default]
        Auto => "auto",
        FullGrid => "full-grid",
        InsetLeft => "inset-left",
        InsetRight => "inset-right",
        FullBleed => "full-bleed",
    }
}

string_enum! {
    /// How a wide table behaves on narrow screens.
    TableResponsiveStyle {
        #[default]
        Overflow => "overflow",
        Flat => "flat",
        Scroll => "scroll",
    }
}

string_enum! {
    SortType {
        #[default]
        Text => "text",
        Number => "number",
        Date => "date",
        Currency => "currency",
        Percent => "percent",
    }
}

static TABLE_GRAMMAR: ChildGrammar = ChildGrammar::new(
    Table::KIND,
    &[Shape(&[
        (TableCaption::KIND, Repeat::Optional),
        (TableBody::KIND, Repeat::One),
        (TableFooter::KIND, Repeat::Optional),
    ])],
);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnSettings {
    #[serde(default)]
    pub hide_on_mobile: bool,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub sort_type: SortType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    #[serde(default)]
    pub stripes: bool,
    #[serde(default)]
    pub compact: bool,
    #[serde(default)]
    pub layout_width: TableLayoutWidth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapse_after_how_many_rows: Option<u32>,
    #[serde(default)]
    pub responsive_style: TableResponsiveStyle,
    #[serde(default)]
    pub column_settings: Vec<TableColumnSettings>,
    #[serde(deserialize_with = "table_children")]
    pub children: Vec<TableChild>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Table {
    pub fn grammar() -> &'static ChildGrammar {
        &TABLE_GRAMMAR
    }

    pub(crate) fn child_kinds(&self) -> Vec<&'static str> {
        self.children.iter().map(TableChild::kind).collect()
    }

    fn continues_body(&self, kind: &str) -> bool {
        kind == TableBody::KIND && matches!(self.children.last(), Some(TableChild::TableBody(_)))
    }
}

fn table_children<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<TableChild>, D::Error> {
    TABLE_GRAMMAR.deserialize_children(deserializer)
}

impl Append for Table {
    fn kind(&self) -> &'static str {
        Self::KIND
    }

    fn admits(&self, kind: &'static str) -> Result<(), TreeError> {
        if self.continues_body(kind) {
            return Ok(());
        }
        TABLE_GRAMMAR.check_next(&self.child_kinds(), kind)
    }

    /// A body appended directly after another body is merged into it, so header and body row
    /// groups end up in one `table-body`.
    fn append(&mut self, child: Node) -> Result<(), TreeError> {
        let child = match child {
            Node::TableBody(body) => match self.children.last_mut() {
                Some(TableChild::TableBody(existing)) => {
                    existing.children.extend(body.children);
                    return Ok(());
                }
                _ => Node::TableBody(body),
            },
            other => other,
        };

        self.admits(child.kind())?;
        push(Self::KIND, &mut self.children, child)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCaption {
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableBody {
    #[serde(default, with = "super::tagged")]
    pub children: Vec<TableRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TableBody {
    pub fn new(children: Vec<TableRow>) -> Self {
        TableBody {
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    #[serde(default, with = "super::tagged")]
    pub children: Vec<TableCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TableRow {
    pub fn new(children: Vec<TableCell>) -> Self {
        TableRow {
            children,
            data: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_span: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_span: Option<u32>,
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl TableCell {
    pub fn new(children: Vec<Phrasing>) -> Self {
        TableCell {
            children,
            ..Default::default()
        }
    }

    pub fn is_heading(&self) -> bool {
        self.heading.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableFooter {
    #[serde(default)]
    pub children: Vec<Phrasing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Text;

    fn row(label: &str) -> TableRow {
        TableRow::new(vec![TableCell::new(vec![Text::new(label).into()])])
    }

    #[test]
    fn consecutive_bodies_merge() {
        let mut table = Table::default();
        table.append(TableBody::new(vec![row("head")]).into()).unwrap();
        table.append(TableBody::new(vec![row("a"), row("b")]).into()).unwrap();

        assert_eq!(table.children.len(), 1);
        match &table.children[0] {
            TableChild::TableBody(body) => assert_eq!(body.children.len(), 3),
            other => panic!("unexpected child {other:?}"),
        }
    }

    #[test]
    fn caption_must_come_first() {
        let mut table = Table::default();
        table.append(TableBody::default().into()).unwrap();

        let err = table.append(TableCaption::default().into()).unwrap_err();
        assert!(matches!(
            err,
            TreeError::InvalidChildPlacement {
                parent: "table",
                child: "table-caption",
                ..
            }
        ));
    }

    #[test]
    fn body_is_required() {
        let mut table = Table::default();
        table.append(TableCaption::default().into()).unwrap();

        assert!(!Table::grammar().accepts(&table.child_kinds()));
        table.append(TableBody::default().into()).unwrap();
        table.append(TableFooter::default().into()).unwrap();
        assert!(Table::grammar().accepts(&table.child_kinds()));
    }
}
