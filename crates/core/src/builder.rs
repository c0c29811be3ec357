//! Builds a content tree from bodyXML in one depth-first pass over the parsed document.

use roxmltree::{Document, NodeId};
use tracing::{debug, instrument, trace};

use crate::error::TreeError;
use crate::options::{BuildOptions, Fidelity};
use crate::transform::{Construction, Element, TransformerTable};
use crate::tree::{Append, Body, Node, Root, Text};

/// Deepest chain of nested nodes below the body. Deeper trees would not survive a JSON round trip.
pub const MAX_NESTING: usize = 60;

/// Markup → tree conversion driven by an injected [`TransformerTable`].
#[derive(Debug, Clone, Copy)]
pub struct TreeBuilder<'t> {
    table: &'t TransformerTable,
    options: BuildOptions,
}

impl<'t> TreeBuilder<'t> {
    pub fn new(table: &'t TransformerTable, options: BuildOptions) -> Self {
        TreeBuilder { table, options }
    }

    /// Parses `markup` and builds the tree under its `<body>` element.
    #[instrument(skip_all, fields(fidelity = ?self.options.fidelity, bytes = markup.len()))]
    pub fn build(&self, markup: &str) -> Result<Root, TreeError> {
        let document = Document::parse(markup)?;
        let body_element = find_body(&document)?;

        let mut body = Body::new(self.options.version, Vec::new());
        self.build_children(body_element, &mut body, &[], 0)?;

        debug!(blocks = body.children.len(), "built content tree");
        Ok(Root::new(body))
    }

    fn build_children<P: Append>(
        &self,
        element: roxmltree::Node<'_, '_>,
        parent: &mut P,
        detached: &[NodeId],
        depth: usize,
    ) -> Result<(), TreeError> {
        for child in element.children() {
            if detached.contains(&child.id()) {
                continue;
            }

            if child.is_element() {
                self.build_element(Element::new(child), parent, depth)?;
            } else if child.is_text() {
                self.append_text(child.text().unwrap_or_default(), parent)?;
            }
        }
        Ok(())
    }

    fn build_element<P: Append>(
        &self,
        element: Element<'_, '_>,
        parent: &mut P,
        depth: usize,
    ) -> Result<(), TreeError> {
        match self.table.transform(&element) {
            Construction::Leaf(node) => parent.append(node),
            Construction::Parent { mut node, detached } => {
                parent.admits(node.kind())?;
                if depth >= MAX_NESTING {
                    return Err(TreeError::parse_failure(format!(
                        "markup nests deeper than {MAX_NESTING} nodes at <{}>",
                        element.tag()
                    )));
                }
                self.build_children(element.node(), &mut node, &detached, depth + 1)?;
                check_complete(&node)?;
                parent.append(node)
            }
            Construction::LiftChildren => {
                self.build_children(element.node(), parent, &[], depth)
            }
            Construction::Unknown => self.unknown(&element),
        }
    }

    fn append_text<P: Append>(&self, text: &str, parent: &mut P) -> Result<(), TreeError> {
        match parent.admits(Text::KIND) {
            Ok(()) => parent.append(Text::new(text).into()),
            Err(_) if text.trim().is_empty() => {
                trace!(parent = parent.kind(), "dropping inter-element whitespace");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn unknown(&self, element: &Element<'_, '_>) -> Result<(), TreeError> {
        let err = TreeError::unknown_element(element.tag(), element.discriminator());
        match self.options.fidelity {
            Fidelity::Strict => Err(err),
            Fidelity::Lenient => {
                debug!(%err, "skipping unknown element");
                Ok(())
            }
        }
    }
}

fn find_body<'a, 'input>(
    document: &'a Document<'input>,
) -> Result<roxmltree::Node<'a, 'input>, TreeError> {
    let root = document.root_element();
    if root.has_tag_name("body") {
        return Ok(root);
    }
    root.descendants()
        .find(|node| node.has_tag_name("body"))
        .ok_or_else(|| TreeError::parse_failure("document has no <body> element"))
}

/// A finished fixed-arity parent must match one of its shapes.
fn check_complete(node: &Node) -> Result<(), TreeError> {
    match node.as_node_ref().child_shape() {
        Some((grammar, kinds)) if !grammar.accepts(&kinds) => {
            Err(TreeError::invalid_child_placement(
                grammar.parent,
                kinds.last().copied().unwrap_or("nothing"),
                grammar.describe(),
            ))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{
        BodyBlock, HeadingLevel, LayoutChild, ListItemChild, NodeRef, Phrasing, ScrollySectionChild,
        TableChild, TimelineEventChild,
    };
    use pretty_assertions::assert_eq;

    fn build(markup: &str, options: BuildOptions) -> Result<Root, TreeError> {
        TreeBuilder::new(&TransformerTable::standard(), options).build(markup)
    }

    fn strict(markup: &str) -> Root {
        build(markup, BuildOptions::strict()).expect("markup should build")
    }

    #[test]
    fn builds_paragraph_with_link() {
        let root = strict(r#"<body><p>Hello <a href="https://www.ft.com/content/abc123">world</a></p></body>"#);

        let BodyBlock::Paragraph(paragraph) = &root.body.children[0] else {
            panic!("expected a paragraph");
        };
        assert_eq!(paragraph.children.len(), 2);
        assert!(matches!(&paragraph.children[0], Phrasing::Text(text) if text.value == "Hello "));
        match &paragraph.children[1] {
            Phrasing::Link(link) => {
                assert_eq!(link.url, "https://www.ft.com/content/abc123");
                assert_eq!(link.title, "");
            }
            other => panic!("unexpected child {other:?}"),
        }
    }

    #[test]
    fn unknown_element_lenient_vs_strict() {
        let lenient = build("<body><foo/></body>", BuildOptions::lenient()).unwrap();
        assert_eq!(lenient.body.version, 1);
        assert!(lenient.body.children.is_empty());

        let err = build("<body><foo/></body>", BuildOptions::strict()).unwrap_err();
        match err {
            TreeError::UnknownElement { tag, discriminator } => {
                assert_eq!(tag, "foo");
                assert_eq!(discriminator, None);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn lenient_skips_the_whole_unknown_subtree() {
        let root = build(
            "<body><p>kept</p><aside><p>dropped</p></aside><hr/></body>",
            BuildOptions::lenient(),
        )
        .unwrap();

        let kinds: Vec<&str> = root.body.children.iter().map(BodyBlock::kind).collect();
        assert_eq!(kinds, vec!["paragraph", "thematic-break"]);
    }

    #[test]
    fn strict_reports_unknown_content_type() {
        let err = build(
            r#"<body><ft-content type="http://www.ft.com/ontology/content/Podcast" url="http://api.ft.com/content/p1"></ft-content></body>"#,
            BuildOptions::strict(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TreeError::UnknownElement { ref discriminator, .. }
                if discriminator.as_deref() == Some("http://www.ft.com/ontology/content/Podcast")
        ));
    }

    #[test]
    fn inter_block_whitespace_is_dropped() {
        let root = strict("<body>\n  <p>a</p>\n  <ul>\n    <li>b</li>\n  </ul>\n</body>");

        let kinds: Vec<&str> = root.body.children.iter().map(BodyBlock::kind).collect();
        assert_eq!(kinds, vec!["paragraph", "list"]);
    }

    #[test]
    fn stray_body_text_is_misplaced() {
        let err = build("<body>loose words</body>", BuildOptions::lenient()).unwrap_err();

        assert!(matches!(
            err,
            TreeError::InvalidChildPlacement {
                parent: "body",
                child: "text",
                ..
            }
        ));
    }

    #[test]
    fn list_items_hold_phrasing() {
        let root = strict("<body><ol><li>one <em>two</em></li></ol></body>");

        let BodyBlock::List(list) = &root.body.children[0] else {
            panic!("expected a list");
        };
        assert!(list.ordered);
        let kinds: Vec<&str> = list.children[0]
            .children
            .iter()
            .map(ListItemChild::kind)
            .collect();
        assert_eq!(kinds, vec!["text", "emphasis"]);
    }

    #[test]
    fn pullquote_extracts_text_and_source() {
        let root = strict(
            "<body><pull-quote><pull-quote-text><p>Quote me</p></pull-quote-text><pull-quote-source>Someone</pull-quote-source></pull-quote></body>",
        );

        match root.body.children[0].embedded() {
            NodeRef::Pullquote(quote) => {
                assert_eq!(quote.text, "Quote me");
                assert_eq!(quote.source.as_deref(), Some("Someone"));
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn layout_lifts_container_children() {
        let root = strict(
            r#"<body><div class="n-content-layout" data-layout-name="card"><div class="n-content-layout__container"><h2>Title</h2><div class="n-content-layout__slot"><p>Copy</p></div></div></div></body>"#,
        );

        let BodyBlock::Layout(layout) = &root.body.children[0] else {
            panic!("expected a layout");
        };
        let kinds: Vec<&str> = layout.children.iter().map(LayoutChild::kind).collect();
        assert_eq!(kinds, vec!["heading", "layout-slot"]);
    }

    #[test]
    fn layout_image_before_heading_is_rejected() {
        let err = build(
            r#"<body><div class="n-content-layout"><img src="a.jpg"/><div class="n-content-layout__slot"/></div></body>"#,
            BuildOptions::lenient(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TreeError::InvalidChildPlacement {
                parent: "layout",
                child: "layout-image",
                ..
            }
        ));
    }

    #[test]
    fn layout_heading_without_slot_is_incomplete() {
        let err = build(
            r#"<body><div class="n-content-layout"><h2>Only a title</h2></div></body>"#,
            BuildOptions::strict(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            TreeError::InvalidChildPlacement { parent: "layout", .. }
        ));
    }

    #[test]
    fn table_merges_head_and_body() {
        let root = strict(
            "<body><table><caption>Prices</caption><thead><tr><th>Item</th></tr></thead><tbody><tr><td>Tea</td></tr><tr><td>Coffee</td></tr></tbody></table></body>",
        );

        let BodyBlock::Table(table) = &root.body.children[0] else {
            panic!("expected a table");
        };
        let kinds: Vec<&str> = table.children.iter().map(TableChild::kind).collect();
        assert_eq!(kinds, vec!["table-caption", "table-body"]);
        let TableChild::TableBody(body) = &table.children[1] else {
            panic!("expected a table body");
        };
        assert_eq!(body.children.len(), 3);
        assert!(body.children[0].children[0].is_heading());
    }

    #[test]
    fn timeline_detaches_titles() {
        let root = strict(
            r#"<body><timeline><h3>History</h3><timeline-event><h4>1990</h4><p>Founded</p></timeline-event></timeline></body>"#,
        );

        let BodyBlock::Timeline(timeline) = &root.body.children[0] else {
            panic!("expected a timeline");
        };
        assert_eq!(timeline.title, "History");
        let event = &timeline.children[0];
        assert_eq!(event.title, "1990");
        assert!(matches!(event.children.as_slice(), [TimelineEventChild::Paragraph(_)]));
    }

    #[test]
    fn scrolly_sections_resolve_context() {
        let root = strict(
            r#"<body><scrollable-block theme="serif"><scrollable-section position="left"><ft-content type="http://www.ft.com/ontology/content/ImageSet" url="http://api.ft.com/content/img-1"></ft-content><scrollable-text><h1>Chapter one</h1><p>Copy</p></scrollable-text></scrollable-section></scrollable-block></body>"#,
        );

        let BodyBlock::ScrollyBlock(block) = &root.body.children[0] else {
            panic!("expected a scrolly block");
        };
        let section = &block.children[0];
        match &section.children[..] {
            [ScrollySectionChild::ScrollyImage(image), ScrollySectionChild::ScrollyCopy(copy)] => {
                assert_eq!(image.id, "img-1");
                assert_eq!(copy.children[0].kind(), "scrolly-heading");
            }
            other => panic!("unexpected section children {other:?}"),
        }
    }

    #[test]
    fn headings_record_fragment_identifier() {
        let root = strict(r#"<body><h4 id="notes">Notes</h4></body>"#);

        match root.body.children[0].embedded() {
            NodeRef::Heading(heading) => {
                assert_eq!(heading.level, HeadingLevel::Label);
                assert_eq!(heading.fragment_identifier.as_deref(), Some("notes"));
            }
            other => panic!("unexpected node {other:?}"),
        }
    }

    #[test]
    fn experimental_wrapper_is_transparent() {
        let root = strict("<body><experimental><p>inside</p></experimental></body>");
        assert_eq!(root.body.children.len(), 1);
        assert_eq!(root.body.children[0].kind(), "paragraph");
    }

    #[test]
    fn body_may_be_nested() {
        let root = strict("<article><body><hr/></body></article>");
        assert_eq!(root.body.children.len(), 1);
    }

    #[test]
    fn malformed_markup_is_a_parse_failure() {
        let err = build("<body><p>open", BuildOptions::strict()).unwrap_err();
        assert!(matches!(err, TreeError::ParseFailure(_)));

        let err = build("<article/>", BuildOptions::strict()).unwrap_err();
        assert!(matches!(err, TreeError::ParseFailure(ref message) if message.contains("<body>")));
    }

    fn nested_strong(levels: usize) -> String {
        format!(
            "<body><p>{}deep{}</p></body>",
            "<strong>".repeat(levels),
            "</strong>".repeat(levels)
        )
    }

    #[test]
    fn over_deep_markup_is_rejected() {
        let err = build(&nested_strong(70), BuildOptions::strict()).unwrap_err();
        assert!(
            matches!(err, TreeError::ParseFailure(ref message) if message.contains("<strong>")),
            "{err:?}"
        );
    }

    #[test]
    fn deepest_allowed_tree_survives_json() {
        let root = strict(&nested_strong(MAX_NESTING - 1));
        let json = root.to_json().unwrap();
        assert_eq!(Root::from_json(&json).unwrap(), root);

        assert!(build(&nested_strong(MAX_NESTING), BuildOptions::strict()).is_err());
    }

    #[test]
    fn table_without_a_tag_treats_it_as_unknown() {
        let table = TransformerTable::standard().without_tag("div");
        assert!(!table.handles_tag("div"));
        assert!(table.handles_tag("p"));

        let markup = r#"<body><div class="n-content-layout"><p>gone</p></div><p>kept</p></body>"#;
        let root = TreeBuilder::new(&table, BuildOptions::lenient())
            .build(markup)
            .unwrap();
        assert_eq!(root.body.children.len(), 1);
        assert_eq!(root.body.children[0].kind(), "paragraph");

        let err = TreeBuilder::new(&table, BuildOptions::strict())
            .build(markup)
            .unwrap_err();
        assert!(matches!(err, TreeError::UnknownElement { .. }), "{err:?}");
    }

    #[test]
    fn version_comes_from_options() {
        let root = build("<body/>", BuildOptions::strict().version(3)).unwrap();
        assert_eq!(root.body.version, 3);
    }
}
