//! The standard table for the bodyXML dialect.

use roxmltree::NodeId;

use super::{Construction, Element, TransformerTable};
use crate::tree::{
    BigNumber, Blockquote, Break, CustomCodeComponent, Emphasis, Flourish,
    FlourishLayoutWidth, Heading, HeadingLevel, ImageSet, Layout, LayoutImage, LayoutName,
    LayoutSlot, LayoutWidth, Link, List, ListItem, Paragraph, Pullquote, Recommended,
    ScrollyBlock, ScrollyCopy, ScrollyDisplay, ScrollyHeading, ScrollyHeadingLevel, ScrollyImage,
    ScrollyPosition, ScrollySection, ScrollyTheme, ScrollyTransition, SortType, Strikethrough,
    Strong, Table, TableBody, TableCaption, TableCell, TableColumnSettings, TableFooter,
    TableLayoutWidth, TableResponsiveStyle, TableRow, ThematicBreak, Timeline, TimelineEvent,
    Tweet, Video, YoutubeVideo,
};

/// Prefix of every typed content `type` URI.
pub const CONTENT_TYPE_BASE: &str = "http://www.ft.com/ontology/content/";

/// Prefix of typed content `url` attributes.
pub const API_CONTENT_BASE: &str = "http://api.ft.com/content/";

pub mod content_type {
    pub const IMAGE_SET: &str = "http://www.ft.com/ontology/content/ImageSet";
    pub const VIDEO: &str = "http://www.ft.com/ontology/content/Video";
    pub const ARTICLE: &str = "http://www.ft.com/ontology/content/Article";
    pub const CONTENT: &str = "http://www.ft.com/ontology/content/Content";
    pub const CUSTOM_CODE_COMPONENT: &str =
        "http://www.ft.com/ontology/content/CustomCodeComponent";
}

const SCROLLY_COPY_TAG: &str = "scrollable-text";
const SCROLLY_SECTION_TAG: &str = "scrollable-section";

pub(super) fn standard_table() -> TransformerTable {
    TransformerTable::new()
        .with_tag("p", paragraph)
        .with_tag("h1", heading)
        .with_tag("h2", heading)
        .with_tag("h3", heading)
        .with_tag("h4", heading)
        .with_tag("h5", heading)
        .with_tag("h6", heading)
        .with_tag("strong", strong)
        .with_tag("b", strong)
        .with_tag("em", emphasis)
        .with_tag("i", emphasis)
        .with_tag("s", strikethrough)
        .with_tag("del", strikethrough)
        .with_tag("br", line_break)
        .with_tag("hr", thematic_break)
        .with_tag("a", anchor)
        .with_tag("ul", unordered_list)
        .with_tag("ol", ordered_list)
        .with_tag("li", list_item)
        .with_tag("blockquote", blockquote)
        .with_tag("pull-quote", pullquote)
        .with_tag("big-number", big_number)
        .with_tag("recommended", recommended)
        .with_tag("experimental", lift_children)
        .with_tag("div", division)
        .with_tag("img", layout_image)
        .with_tag("table", table)
        .with_tag("caption", table_caption)
        .with_tag("thead", table_body)
        .with_tag("tbody", table_body)
        .with_tag("tfoot", table_footer)
        .with_tag("tr", table_row)
        .with_tag("th", table_cell)
        .with_tag("td", table_cell)
        .with_tag("scrollable-block", scrolly_block)
        .with_tag(SCROLLY_SECTION_TAG, scrolly_section)
        .with_tag(SCROLLY_COPY_TAG, scrolly_copy)
        .with_tag("timeline", timeline)
        .with_tag("timeline-event", timeline_event)
        .with_content_type(content_type::IMAGE_SET, image_set)
        .with_content_type(content_type::VIDEO, video)
        .with_content_type(content_type::ARTICLE, content_link)
        .with_content_type(content_type::CONTENT, content_link)
        .with_content_type(content_type::CUSTOM_CODE_COMPONENT, custom_code_component)
}

fn paragraph(_: &Element<'_, '_>) -> Construction {
    Construction::parent(Paragraph::default())
}

fn heading(element: &Element<'_, '_>) -> Construction {
    if element.parent_tag() == Some(SCROLLY_COPY_TAG) {
        if let Some(level) = ScrollyHeadingLevel::from_tag(element.tag()) {
            return Construction::parent(ScrollyHeading::new(level, Vec::new()));
        }
    }

    let level = match element.tag() {
        "h1" => HeadingLevel::Chapter,
        "h2" | "h3" => HeadingLevel::Subheading,
        _ => HeadingLevel::Label,
    };
    let mut heading = Heading::new(level, Vec::new());
    heading.fragment_identifier = element.attr_owned("id");
    Construction::parent(heading)
}

fn strong(_: &Element<'_, '_>) -> Construction {
    Construction::parent(Strong::default())
}

fn emphasis(_: &Element<'_, '_>) -> Construction {
    Construction::parent(Emphasis::default())
}

fn strikethrough(_: &Element<'_, '_>) -> Construction {
    Construction::parent(Strikethrough::default())
}

fn line_break(_: &Element<'_, '_>) -> Construction {
    Construction::leaf(Break::default())
}

fn thematic_break(_: &Element<'_, '_>) -> Construction {
    Construction::leaf(ThematicBreak::default())
}

fn anchor(element: &Element<'_, '_>) -> Construction {
    let href = element.attr_or_empty("href");
    if element.attr("data-asset-type") == Some("video") {
        return Construction::leaf(YoutubeVideo::new(href));
    }
    Construction::parent(Link::new(href, element.attr_or_empty("title"), Vec::new()))
}

fn unordered_list(_: &Element<'_, '_>) -> Construction {
    Construction::parent(List::new(false, Vec::new()))
}

fn ordered_list(_: &Element<'_, '_>) -> Construction {
    Construction::parent(List::new(true, Vec::new()))
}

fn list_item(_: &Element<'_, '_>) -> Construction {
    Construction::parent(ListItem::default())
}

fn blockquote(element: &Element<'_, '_>) -> Construction {
    if element.has_class("twitter-tweet") {
        let id = element
            .find("a")
            .map(|link| link.attr_or_empty("href"))
            .unwrap_or_default();
        return Construction::leaf(Tweet::new(id));
    }
    Construction::parent(Blockquote::default())
}

fn pullquote(element: &Element<'_, '_>) -> Construction {
    let text = element
        .find("pull-quote-text")
        .and_then(|text| text.trimmed_text())
        .unwrap_or_default();
    let source = element
        .find("pull-quote-source")
        .and_then(|source| source.trimmed_text());
    Construction::leaf(Pullquote::new(text, source))
}

fn big_number(element: &Element<'_, '_>) -> Construction {
    let part = |tag: &str| {
        element
            .find(tag)
            .and_then(|part| part.trimmed_text())
            .unwrap_or_default()
    };
    Construction::leaf(BigNumber::new(
        part("big-number-headline"),
        part("big-number-intro"),
    ))
}

fn recommended(element: &Element<'_, '_>) -> Construction {
    let link = element.descendants().find(|child| child.is_typed_content());

    let mut recommended = Recommended::new(link.map(|link| link.content_id()).unwrap_or_default());
    recommended.heading = element
        .find("recommended-title")
        .and_then(|title| title.trimmed_text());
    recommended.teaser_title_override = link.and_then(|link| link.trimmed_text());
    Construction::leaf(recommended)
}

fn lift_children(_: &Element<'_, '_>) -> Construction {
    Construction::LiftChildren
}

fn division(element: &Element<'_, '_>) -> Construction {
    if element.has_class("n-content-layout") {
        Construction::parent(Layout::new(
            LayoutName::parse_or_default(element.attr("data-layout-name")),
            LayoutWidth::parse_or_default(element.attr("data-layout-width")),
        ))
    } else if element.has_class("n-content-layout__container") {
        Construction::LiftChildren
    } else if element.has_class("n-content-layout__slot") {
        Construction::parent(LayoutSlot::default())
    } else if element.has_class("flourish-embed") {
        let mut flourish = Flourish::new(
            element.attr_or_empty("data-src"),
            element.attr_or_empty("data-flourish-type"),
        );
        flourish.layout_width =
            FlourishLayoutWidth::parse_or_default(element.attr("data-layout-width"));
        flourish.description = element.attr_owned("data-description");
        flourish.timestamp = element.attr_owned("data-time-stamp");
        flourish.fragment_identifier = element.attr_owned("data-fragment-identifier");
        Construction::leaf(flourish)
    } else {
        Construction::Unknown
    }
}

fn layout_image(element: &Element<'_, '_>) -> Construction {
    let mut image = LayoutImage::new(element.attr_or_empty("src"));
    image.alt = element.attr_or_empty("alt");
    image.caption = element.attr_or_empty("longdesc");
    image.credit = element.attr_or_empty("data-copyright");
    Construction::leaf(image)
}

fn table(element: &Element<'_, '_>) -> Construction {
    let colgroup = element.children().find(|child| child.tag() == "colgroup");
    let column_settings = colgroup
        .map(|group| {
            group
                .children()
                .filter(|child| child.tag() == "col")
                .map(|col| TableColumnSettings {
                    hide_on_mobile: col.flag("data-hide-on-mobile"),
                    sortable: col.flag("data-sortable"),
                    sort_type: SortType::parse_or_default(col.attr("data-sort-type")),
                })
                .collect()
        })
        .unwrap_or_default();

    let table = Table {
        stripes: element.flag("data-table-stripes"),
        compact: element.flag("data-table-compact"),
        layout_width: TableLayoutWidth::parse_or_default(element.attr("data-table-layout-width")),
        collapse_after_how_many_rows: element.number("data-table-collapse-rownum"),
        responsive_style: TableResponsiveStyle::parse_or_default(
            element.attr("data-table-responsive-style"),
        ),
        column_settings,
        ..Table::default()
    };
    let detached = colgroup.map(|group| vec![group.id()]).unwrap_or_default();
    Construction::parent_detaching(table, detached)
}

fn table_caption(_: &Element<'_, '_>) -> Construction {
    Construction::parent(TableCaption::default())
}

fn table_body(_: &Element<'_, '_>) -> Construction {
    Construction::parent(TableBody::default())
}

fn table_footer(_: &Element<'_, '_>) -> Construction {
    Construction::parent(TableFooter::default())
}

fn table_row(_: &Element<'_, '_>) -> Construction {
    Construction::parent(TableRow::default())
}

fn table_cell(element: &Element<'_, '_>) -> Construction {
    Construction::parent(TableCell {
        heading: (element.tag() == "th").then_some(true),
        column_span: element.number("colspan"),
        row_span: element.number("rowspan"),
        ..TableCell::default()
    })
}

fn scrolly_block(element: &Element<'_, '_>) -> Construction {
    Construction::parent(ScrollyBlock {
        theme: ScrollyTheme::parse_or_default(element.attr("theme")),
        ..ScrollyBlock::default()
    })
}

fn scrolly_section(element: &Element<'_, '_>) -> Construction {
    Construction::parent(ScrollySection {
        display: ScrollyDisplay::parse_or_default(element.attr("theme-style")),
        no_box: element.attr("no-box").map(|value| value == "true"),
        position: ScrollyPosition::parse_or_default(element.attr("position")),
        transition: element.attr("transition").and_then(ScrollyTransition::parse),
        ..ScrollySection::default()
    })
}

fn scrolly_copy(_: &Element<'_, '_>) -> Construction {
    Construction::parent(ScrollyCopy::default())
}

fn timeline(element: &Element<'_, '_>) -> Construction {
    let (title, detached) = leading_heading(element);
    Construction::parent_detaching(Timeline::new(title, Vec::new()), detached)
}

fn timeline_event(element: &Element<'_, '_>) -> Construction {
    let (title, detached) = leading_heading(element);
    Construction::parent_detaching(TimelineEvent::new(title, Vec::new()), detached)
}

/// Extracts the first child element as a title when it is a heading.
fn leading_heading(element: &Element<'_, '_>) -> (String, Vec<NodeId>) {
    match element.first_child_element() {
        Some(first) if is_heading_tag(first.tag()) => (
            first.trimmed_text().unwrap_or_default(),
            vec![first.id()],
        ),
        _ => (String::new(), Vec::new()),
    }
}

fn is_heading_tag(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn image_set(element: &Element<'_, '_>) -> Construction {
    let id = element.content_id();
    if element.parent_tag() == Some(SCROLLY_SECTION_TAG) {
        return Construction::leaf(ScrollyImage::new(id));
    }

    let mut image_set = ImageSet::new(id);
    image_set.fragment_identifier = element.attr_owned("data-fragment-identifier");
    Construction::leaf(image_set)
}

fn video(element: &Element<'_, '_>) -> Construction {
    Construction::leaf(Video::new(
        element.content_id(),
        element.flag("data-embedded"),
    ))
}

fn content_link(element: &Element<'_, '_>) -> Construction {
    Construction::parent(Link::new(
        format!("https://www.ft.com/content/{}", element.content_id()),
        element.attr_or_empty("title"),
        Vec::new(),
    ))
}

fn custom_code_component(element: &Element<'_, '_>) -> Construction {
    Construction::leaf(CustomCodeComponent::new(
        element.content_id(),
        LayoutWidth::parse_or_default(element.attr("data-layout-width")),
    ))
}
