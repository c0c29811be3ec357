use std::io::Write;

use url::Url;

use crate::error::TreeError;
use crate::options::{LinkDialect, RenderOptions};
use crate::transform::{API_CONTENT_BASE, content_type};
use crate::tree::{AsNode, NodeRef, Root, ScrollyHeading};

/// Renders a content tree back to bodyXML.
pub struct XmlRenderer<W: Write> {
    writer: W,
    options: RenderOptions,
}

type Attrs<'v> = [(&'static str, Option<&'v str>)];

impl<W: Write> XmlRenderer<W> {
    pub fn new(writer: W, options: RenderOptions) -> Self {
        Self { writer, options }
    }

    pub fn render(mut self, root: &Root) -> Result<W, TreeError> {
        self.render_node(root.as_node())?;
        self.writer.flush()?;
        Ok(self.writer)
    }

    /// Renders any node with its descendants.
    pub fn render_node(&mut self, node: NodeRef<'_>) -> Result<(), TreeError> {
        match node {
            NodeRef::Root(root) => self.render_node(NodeRef::Body(&root.body)),
            NodeRef::Body(_) => self.wrap("body", &[], node),
            NodeRef::Text(text) => self.escape_text(&text.value),
            NodeRef::Break(_) => self.write_raw("<br/>"),
            NodeRef::ThematicBreak(_) => self.write_raw("<hr/>"),
            NodeRef::Paragraph(_) => self.wrap("p", &[], node),
            NodeRef::Heading(heading) => self.wrap(
                heading.level.tag(),
                &[("id", heading.fragment_identifier.as_deref())],
                node,
            ),
            NodeRef::Strong(_) => self.wrap("strong", &[], node),
            NodeRef::Emphasis(_) => self.wrap("em", &[], node),
            NodeRef::Strikethrough(_) => self.wrap("s", &[], node),
            NodeRef::Link(link) => {
                let title = non_empty(&link.title);
                match (ft_content_id(&link.url), self.options.dialect) {
                    (Some(id), LinkDialect::FtContent) => {
                        let url = format!("{API_CONTENT_BASE}{id}");
                        self.wrap(
                            "ft-content",
                            &[
                                ("type", Some(content_type::ARTICLE)),
                                ("url", Some(url.as_str())),
                                ("title", title),
                            ],
                            node,
                        )
                    }
                    (Some(id), LinkDialect::Html) => {
                        let href = format!("https://ft.com/content/{id}");
                        self.wrap("a", &[("href", Some(href.as_str())), ("title", title)], node)
                    }
                    (None, _) => self.wrap("a", &[("href", Some(link.url.as_str())), ("title", title)], node),
                }
            }
            NodeRef::List(list) => self.wrap(if list.ordered { "ol" } else { "ul" }, &[], node),
            NodeRef::ListItem(_) => self.wrap("li", &[], node),
            NodeRef::Blockquote(_) => self.wrap("blockquote", &[], node),
            NodeRef::Pullquote(quote) => {
                self.write_raw("<pull-quote><pull-quote-text><p>")?;
                self.escape_text(&quote.text)?;
                self.write_raw("</p></pull-quote-text>")?;
                if let Some(source) = &quote.source {
                    self.text_element("pull-quote-source", source)?;
                }
                self.write_raw("</pull-quote>")
            }
            NodeRef::BigNumber(number) => {
                self.write_raw("<big-number>")?;
                self.text_element("big-number-headline", &number.number)?;
                self.text_element("big-number-intro", &number.description)?;
                self.write_raw("</big-number>")
            }
            NodeRef::ImageSet(image_set) => {
                let id = required(node, &image_set.id, "id", IMAGE_SET_MARKUP)?;
                self.content_reference(
                    content_type::IMAGE_SET,
                    id,
                    &[
                        ("data-embedded", Some("true")),
                        (
                            "data-fragment-identifier",
                            image_set.fragment_identifier.as_deref(),
                        ),
                    ],
                )
            }
            NodeRef::ScrollyImage(image) => {
                let id = required(node, &image.id, "id", IMAGE_SET_MARKUP)?;
                self.content_reference(
                    content_type::IMAGE_SET,
                    id,
                    &[("data-embedded", Some("true"))],
                )
            }
            NodeRef::Video(video) => {
                let id = required(node, &video.id, "id", VIDEO_MARKUP)?;
                let embedded = if video.embedded { "true" } else { "false" };
                self.content_reference(content_type::VIDEO, id, &[("data-embedded", Some(embedded))])
            }
            NodeRef::YoutubeVideo(video) => {
                let url = required(node, &video.url, "url", "<a data-asset-type=\"video\">")?;
                self.start_tag(
                    "a",
                    &[
                        ("data-asset-type", Some("video")),
                        ("data-embedded", Some("true")),
                        ("href", Some(url)),
                    ],
                )?;
                self.end_tag("a")
            }
            NodeRef::Tweet(tweet) => {
                let id = required(node, &tweet.id, "id", "<blockquote class=\"twitter-tweet\">")?;
                self.start_tag("blockquote", &[("class", Some("twitter-tweet"))])?;
                self.start_tag("a", &[("href", Some(id))])?;
                self.write_raw("</a></blockquote>")
            }
            NodeRef::Flourish(flourish) => {
                let id = required(node, &flourish.id, "id", "<div class=\"flourish-embed\">")?;
                self.start_tag(
                    "div",
                    &[
                        ("class", Some("flourish-embed")),
                        ("data-src", Some(id)),
                        ("data-flourish-type", Some(flourish.flourish_type.as_str())),
                        ("data-layout-width", Some(flourish.layout_width.as_str())),
                        ("data-description", flourish.description.as_deref()),
                        ("data-time-stamp", flourish.timestamp.as_deref()),
                        (
                            "data-fragment-identifier",
                            flourish.fragment_identifier.as_deref(),
                        ),
                    ],
                )?;
                self.end_tag("div")
            }
            NodeRef::Recommended(recommended) => {
                let id = required(node, &recommended.id, "id", "<recommended>")?;
                self.write_raw("<recommended>")?;
                if let Some(heading) = &recommended.heading {
                    self.text_element("recommended-title", heading)?;
                }
                let url = format!("{API_CONTENT_BASE}{id}");
                self.start_tag(
                    "ft-content",
                    &[("type", Some(content_type::ARTICLE)), ("url", Some(url.as_str()))],
                )?;
                if let Some(title) = &recommended.teaser_title_override {
                    self.escape_text(title)?;
                }
                self.write_raw("</ft-content></recommended>")
            }
            NodeRef::Layout(layout) => {
                node.check_shape()?;
                self.start_tag(
                    "div",
                    &[
                        ("class", Some("n-content-layout")),
                        ("data-layout-name", Some(layout.layout_name.as_str())),
                        ("data-layout-width", Some(layout.layout_width.as_str())),
                    ],
                )?;
                self.wrap("div", &[("class", Some("n-content-layout__container"))], node)?;
                self.end_tag("div")
            }
            NodeRef::LayoutSlot(_) => {
                self.wrap("div", &[("class", Some("n-content-layout__slot"))], node)
            }
            NodeRef::LayoutImage(image) => {
                let src = required(node, &image.id, "id", "<img src>")?;
                self.empty_element(
                    "img",
                    &[
                        ("src", Some(src)),
                        ("alt", Some(image.alt.as_str())),
                        ("longdesc", Some(image.caption.as_str())),
                        ("data-copyright", Some(image.credit.as_str())),
                    ],
                )
            }
            NodeRef::Table(table) => {
                node.check_shape()?;
                let collapse = table.collapse_after_how_many_rows.map(|rows| rows.to_string());
                self.start_tag(
                    "table",
                    &[
                        ("class", Some("data-table")),
                        ("data-table-stripes", Some(bool_str(table.stripes))),
                        ("data-table-compact", Some(bool_str(table.compact))),
                        ("data-table-layout-width", Some(table.layout_width.as_str())),
                        ("data-table-collapse-rownum", collapse.as_deref()),
                        (
                            "data-table-responsive-style",
                            Some(table.responsive_style.as_str()),
                        ),
                    ],
                )?;
                if !table.column_settings.is_empty() {
                    self.write_raw("<colgroup>")?;
                    for column in &table.column_settings {
                        self.empty_element(
                            "col",
                            &[
                                ("data-hide-on-mobile", Some(bool_str(column.hide_on_mobile))),
                                ("data-sortable", Some(bool_str(column.sortable))),
                                ("data-sort-type", Some(column.sort_type.as_str())),
                            ],
                        )?;
                    }
                    self.write_raw("</colgroup>")?;
                }
                self.render_children(node)?;
                self.end_tag("table")
            }
            NodeRef::TableCaption(_) => self.wrap("caption", &[], node),
            NodeRef::TableBody(_) => self.wrap("tbody", &[], node),
            NodeRef::TableRow(_) => self.wrap("tr", &[], node),
            NodeRef::TableCell(cell) => {
                let colspan = cell.column_span.map(|span| span.to_string());
                let rowspan = cell.row_span.map(|span| span.to_string());
                self.wrap(
                    if cell.is_heading() { "th" } else { "td" },
                    &[("colspan", colspan.as_deref()), ("rowspan", rowspan.as_deref())],
                    node,
                )
            }
            NodeRef::TableFooter(_) => self.wrap("tfoot", &[], node),
            NodeRef::ScrollyBlock(block) => {
                self.wrap("scrollable-block", &[("theme", Some(block.theme.as_str()))], node)
            }
            NodeRef::ScrollySection(section) => {
                node.check_shape()?;
                self.wrap(
                    "scrollable-section",
                    &[
                        ("theme-style", Some(section.display.as_str())),
                        ("position", Some(section.position.as_str())),
                        ("transition", section.transition.map(|t| t.as_str())),
                        ("no-box", section.no_box.map(bool_str)),
                    ],
                    node,
                )
            }
            NodeRef::ScrollyCopy(_) => self.wrap("scrollable-text", &[], node),
            NodeRef::ScrollyHeading(ScrollyHeading { level, .. }) => {
                self.wrap(level.tag(), &[], node)
            }
            NodeRef::CustomCodeComponent(component) => {
                let id = required(
                    node,
                    &component.id,
                    "id",
                    "<ft-content type=\"…/CustomCodeComponent\">",
                )?;
                self.content_reference(
                    content_type::CUSTOM_CODE_COMPONENT,
                    id,
                    &[("data-layout-width", Some(component.layout_width.as_str()))],
                )
            }
            NodeRef::ClipSet(_) => Ok(()),
            NodeRef::Timeline(timeline) => {
                self.write_raw("<timeline>")?;
                if !timeline.title.is_empty() {
                    self.text_element("h3", &timeline.title)?;
                }
                self.render_children(node)?;
                self.write_raw("</timeline>")
            }
            NodeRef::TimelineEvent(event) => {
                self.write_raw("<timeline-event>")?;
                if !event.title.is_empty() {
                    self.text_element("h4", &event.title)?;
                }
                self.render_children(node)?;
                self.write_raw("</timeline-event>")
            }
        }
    }

    fn render_children(&mut self, node: NodeRef<'_>) -> Result<(), TreeError> {
        if let Some(children) = node.children() {
            for child in children {
                self.render_node(child)?;
            }
        }
        Ok(())
    }

    fn wrap(&mut self, tag: &str, attrs: &Attrs<'_>, node: NodeRef<'_>) -> Result<(), TreeError> {
        self.start_tag(tag, attrs)?;
        self.render_children(node)?;
        self.end_tag(tag)
    }

    /// `<ft-content type=… url=…>` for a content id.
    fn content_reference(
        &mut self,
        content_type: &str,
        id: &str,
        extra: &Attrs<'_>,
    ) -> Result<(), TreeError> {
        let url = format!("{API_CONTENT_BASE}{id}");
        self.writer.write_all(b"<ft-content")?;
        self.write_attr("type", content_type)?;
        self.write_attr("url", &url)?;
        self.write_attrs(extra)?;
        self.write_raw("></ft-content>")
    }

    fn text_element(&mut self, tag: &str, text: &str) -> Result<(), TreeError> {
        self.start_tag(tag, &[])?;
        self.escape_text(text)?;
        self.end_tag(tag)
    }

    fn start_tag(&mut self, tag: &str, attrs: &Attrs<'_>) -> Result<(), TreeError> {
        write!(self.writer, "<{tag}")?;
        self.write_attrs(attrs)?;
        self.write_raw(">")
    }

    fn empty_element(&mut self, tag: &str, attrs: &Attrs<'_>) -> Result<(), TreeError> {
        write!(self.writer, "<{tag}")?;
        self.write_attrs(attrs)?;
        self.write_raw("/>")
    }

    fn end_tag(&mut self, tag: &str) -> Result<(), TreeError> {
        write!(self.writer, "</{tag}>")?;
        Ok(())
    }

    fn write_attrs(&mut self, attrs: &Attrs<'_>) -> Result<(), TreeError> {
        for (key, value) in attrs {
            if let Some(value) = value {
                self.write_attr(key, value)?;
            }
        }
        Ok(())
    }

    fn write_attr(&mut self, key: &str, value: &str) -> Result<(), TreeError> {
        write!(self.writer, " {key}=\"")?;
        self.escape(value, true)?;
        self.write_raw("\"")
    }

    fn write_raw(&mut self, markup: &str) -> Result<(), TreeError> {
        self.writer.write_all(markup.as_bytes())?;
        Ok(())
    }

    fn escape_text(&mut self, text: &str) -> Result<(), TreeError> {
        self.escape(text, false)
    }

    fn escape(&mut self, text: &str, in_attribute: bool) -> Result<(), TreeError> {
        let mut start = 0;
        for (index, ch) in text.char_indices() {
            let entity = match ch {
                '&' => "&amp;",
                '<' => "&lt;",
                '>' => "&gt;",
                '"' if in_attribute => "&quot;",
                _ => continue,
            };
            self.writer.write_all(text[start..index].as_bytes())?;
            self.writer.write_all(entity.as_bytes())?;
            start = index + ch.len_utf8();
        }
        self.writer.write_all(text[start..].as_bytes())?;
        Ok(())
    }
}

const IMAGE_SET_MARKUP: &str = "<ft-content type=\"…/ImageSet\">";
const VIDEO_MARKUP: &str = "<ft-content type=\"…/Video\">";

fn required<'v>(
    node: NodeRef<'_>,
    value: &'v str,
    field: &str,
    expected: &str,
) -> Result<&'v str, TreeError> {
    if value.trim().is_empty() {
        Err(TreeError::malformed(
            node.kind(),
            expected,
            format!("missing {field}"),
        ))
    } else {
        Ok(value)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    (!value.is_empty()).then_some(value)
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// The content id of an `ft.com/content/{id}` URL.
fn ft_content_id(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.host_str(), Some("ft.com" | "www.ft.com")) {
        return None;
    }

    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        ["content", .., id] => Some((*id).to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{
        Body, BodyBlock, ClipSet, CustomCodeComponent, Flourish, Heading, HeadingLevel, ImageSet,
        Layout, LayoutChild, LayoutImage, LayoutName, LayoutSlot, LayoutWidth, Link, List,
        ListItem, Paragraph, Pullquote, Recommended, ScrollyBlock, ScrollyImage, ScrollySection,
        Strong, Table, Text, Tweet, Video, YoutubeVideo,
    };
    use pretty_assertions::assert_eq;

    fn render(blocks: Vec<BodyBlock>) -> Result<String, TreeError> {
        render_with(blocks, RenderOptions::default())
    }

    fn render_with(blocks: Vec<BodyBlock>, options: RenderOptions) -> Result<String, TreeError> {
        let root = Root::new(Body::new(1, blocks));
        let bytes = XmlRenderer::new(Vec::new(), options).render(&root)?;
        Ok(String::from_utf8(bytes).unwrap())
    }

    fn hello_world() -> Vec<BodyBlock> {
        vec![
            Paragraph::new(vec![
                Text::new("Hello ").into(),
                Link::new(
                    "https://www.ft.com/content/abc123",
                    "",
                    vec![Text::new("world").into()],
                )
                .into(),
            ])
            .into(),
        ]
    }

    #[test]
    fn renders_ft_links_canonically() {
        assert_eq!(
            render(hello_world()).unwrap(),
            r#"<body><p>Hello <a href="https://ft.com/content/abc123">world</a></p></body>"#
        );
    }

    #[test]
    fn renders_ft_links_as_ft_content() {
        let output = render_with(
            hello_world(),
            RenderOptions {
                dialect: LinkDialect::FtContent,
            },
        )
        .unwrap();

        assert_eq!(
            output,
            r#"<body><p>Hello <ft-content type="http://www.ft.com/ontology/content/Article" url="http://api.ft.com/content/abc123">world</ft-content></p></body>"#
        );
    }

    #[test]
    fn other_links_render_verbatim() {
        let link = Link::new("https://example.com/?a=1&b=2", "Ex", vec![Text::new("x").into()]);
        let output = render(vec![Paragraph::new(vec![link.into()]).into()]).unwrap();

        assert_eq!(
            output,
            r#"<body><p><a href="https://example.com/?a=1&amp;b=2" title="Ex">x</a></p></body>"#
        );
    }

    #[test]
    fn renders_lists() {
        let items = || {
            vec![
                ListItem::new(vec![Text::new("a").into()]),
                ListItem::new(vec![Text::new("b").into()]),
            ]
        };

        assert_eq!(
            render(vec![List::new(true, items()).into()]).unwrap(),
            "<body><ol><li>a</li><li>b</li></ol></body>"
        );
        assert_eq!(
            render(vec![List::new(false, items()).into()]).unwrap(),
            "<body><ul><li>a</li><li>b</li></ul></body>"
        );
    }

    #[test]
    fn kinds_map_to_tags() {
        let heading = |level: HeadingLevel| -> BodyBlock {
            Heading::new(level, vec![Text::new("t").into()]).into()
        };
        let output = render(vec![
            heading(HeadingLevel::Chapter),
            heading(HeadingLevel::Subheading),
            heading(HeadingLevel::Label),
            Paragraph::new(vec![Strong::new(vec![Text::new("s").into()]).into()]).into(),
        ])
        .unwrap();

        assert_eq!(
            output,
            "<body><h1>t</h1><h2>t</h2><h4>t</h4><p><strong>s</strong></p></body>"
        );
    }

    #[test]
    fn escapes_text_and_attributes() {
        let output = render(vec![
            Paragraph::new(vec![Text::new("a < b & \"c\"").into()]).into(),
            Pullquote::new("x > y", Some("\"Q\" & A".into())).into(),
        ])
        .unwrap();

        assert_eq!(
            output,
            "<body><p>a &lt; b &amp; \"c\"</p><pull-quote><pull-quote-text><p>x &gt; y</p></pull-quote-text><pull-quote-source>\"Q\" &amp; A</pull-quote-source></pull-quote></body>"
        );
    }

    #[test]
    fn renders_image_sets_and_videos() {
        let output = render(vec![
            ImageSet::new("img-1").into(),
            Video::new("vid-1", false).into(),
        ])
        .unwrap();

        assert_eq!(
            output,
            concat!(
                r#"<body><ft-content type="http://www.ft.com/ontology/content/ImageSet" url="http://api.ft.com/content/img-1" data-embedded="true"></ft-content>"#,
                r#"<ft-content type="http://www.ft.com/ontology/content/Video" url="http://api.ft.com/content/vid-1" data-embedded="false"></ft-content></body>"#
            )
        );
    }

    #[test]
    fn image_set_without_id_is_malformed() {
        let err = render(vec![ImageSet::new("").into()]).unwrap_err();

        match err {
            TreeError::MalformedNode { kind, expected, reason } => {
                assert_eq!(kind, "image-set");
                assert!(expected.contains("ImageSet"));
                assert_eq!(reason, "missing id");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn missing_identifiers_are_malformed() {
        let heading: LayoutChild =
            Heading::new(HeadingLevel::Chapter, vec![Text::new("t").into()]).into();
        let layout = Layout {
            children: vec![heading, LayoutImage::new("").into(), LayoutSlot::default().into()],
            ..Layout::default()
        };
        let section = ScrollySection {
            children: vec![ScrollyImage::new("").into()],
            ..ScrollySection::default()
        };
        let scrolly = ScrollyBlock {
            children: vec![section],
            ..ScrollyBlock::default()
        };

        let cases: Vec<(BodyBlock, &str, &str)> = vec![
            (Video::new("", true).into(), "video", "missing id"),
            (Tweet::new("").into(), "tweet", "missing id"),
            (Flourish::new("", "chart").into(), "flourish", "missing id"),
            (Recommended::new("").into(), "recommended", "missing id"),
            (
                CustomCodeComponent::new("", LayoutWidth::InLine).into(),
                "custom-code-component",
                "missing id",
            ),
            (YoutubeVideo::new(" ").into(), "youtube-video", "missing url"),
            (layout.into(), "layout-image", "missing id"),
            (scrolly.into(), "scrolly-image", "missing id"),
        ];

        for (block, expected_kind, expected_reason) in cases {
            match render(vec![block]) {
                Err(TreeError::MalformedNode { kind, reason, .. }) => {
                    assert_eq!(kind, expected_kind);
                    assert_eq!(reason, expected_reason);
                }
                other => panic!("{expected_kind}: unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn illegal_fixed_arity_shapes_are_malformed() {
        let mut layout = Layout::new(LayoutName::Auto, LayoutWidth::FullWidth);
        layout.children.push(LayoutImage::new("https://example.com/a.jpg").into());
        layout.children.push(LayoutSlot::default().into());

        for (block, expected_kind) in [
            (BodyBlock::from(layout), "layout"),
            (BodyBlock::from(Table::default()), "table"),
        ] {
            match render(vec![block]) {
                Err(TreeError::MalformedNode { kind, reason, .. }) => {
                    assert_eq!(kind, expected_kind);
                    assert!(reason.contains("match no legal shape"));
                }
                other => panic!("{expected_kind}: unexpected result {other:?}"),
            }
        }
    }

    #[test]
    fn clip_sets_render_nothing() {
        assert_eq!(
            render(vec![ClipSet::new("clips-1").into()]).unwrap(),
            "<body></body>"
        );
    }

    #[test]
    fn recognises_ft_content_urls() {
        assert_eq!(
            ft_content_id("https://www.ft.com/content/abc123"),
            Some("abc123".to_owned())
        );
        assert_eq!(
            ft_content_id("https://ft.com/content/abc123?ref=x"),
            Some("abc123".to_owned())
        );
        assert_eq!(ft_content_id("https://www.ft.com/markets"), None);
        assert_eq!(ft_content_id("https://example.com/content/abc123"), None);
        assert_eq!(ft_content_id("not a url"), None);
    }
}
