//! SVG export of the rendered floor.
//!
//! The document starts with a stylesheet driving the interactive states of
//! the viewer (table hover, badge status colours), followed by one group per
//! layer. Table groups and badges receive the `table-item` and `id-wrapper`
//! classes so the stylesheet and downstream viewers can address them;
//! viewers add `dine-in` or `reserved` to a badge to colour it by status.

use crate::render::{BADGE_PREFIX, TABLE_PREFIX};
use crate::scene::{Layer, Node, NodeKind, Placement, Scene, Style};
use svg::node::element::{self as svg_element, Group};
use svg::Document;

/// Stylesheet prepended to every exported plan.
pub const PLAN_STYLESHEET: &str = r#"
#bg > * { pointer-events: none; }
.table-item { cursor: pointer; }
.table-item:hover > g > * { stroke: transparent; }
.table-item:hover > .id-wrapper { fill: #E8E8E8; }
.table-item:hover > .id-wrapper.dine-in { fill: #D9E7F7; }
.table-item:hover > .id-wrapper.reserved { fill: #FDECEC; }
.id-wrapper { fill: #F5F5F5; }
.id-wrapper.dine-in { fill: #9ABEEA; }
.id-wrapper.reserved { fill: #F8B8B9; }
text {
  -webkit-touch-callout: none;
  -webkit-user-select: none;
  -moz-user-select: none;
  -ms-user-select: none;
  user-select: none;
}
"#;

/// Class attached to an element by its naming convention.
pub fn style_class(name: &str) -> Option<&'static str> {
    if name.starts_with(TABLE_PREFIX) {
        Some("table-item")
    } else if name.starts_with(BADGE_PREFIX) {
        Some("id-wrapper")
    } else {
        None
    }
}

/// Build the plan document for the scene.
pub fn plan_document(scene: &Scene) -> Document {
    let surface = scene.surface();
    let mut doc = Document::new()
        .set("viewBox", format!("0 0 {} {}", surface.width, surface.height))
        .set("width", surface.width)
        .set("height", surface.height)
        .add(svg_element::Style::new(PLAN_STYLESHEET));

    for layer in scene.layers() {
        doc = doc.add(render_layer(layer));
    }
    doc
}

/// Serialized plan markup.
pub fn plan_markup(scene: &Scene) -> String {
    plan_document(scene).to_string()
}

fn render_layer(layer: &Layer) -> Group {
    layer
        .nodes()
        .iter()
        .fold(Group::new().set("id", layer.name()), |group, node| {
            group.add(render_node(node))
        })
}

macro_rules! paint_attrs {
    ($element:expr, $style:expr) => {{
        let style: &Style = $style;
        let mut element = $element;
        if style.fill.is_some() || style.stroke.is_some() {
            element = element.set("fill", style.fill.as_deref().unwrap_or("none"));
        }
        if let Some(stroke) = &style.stroke {
            element = element.set("stroke", stroke.as_str());
        }
        if let Some(width) = style.stroke_width {
            element = element.set("stroke-width", width);
        }
        element
    }};
}

/// Applies the attributes every element shares.
macro_rules! common_attrs {
    ($element:expr, $node:expr) => {{
        let node: &Node = $node;
        let mut element = $element;
        if let Some(name) = &node.name {
            element = element.set("id", name.as_str());
            if let Some(class) = style_class(name) {
                element = element.set("class", class);
            }
        }
        if let Some(transform) = transform_attr(&node.placement) {
            element = element.set("transform", transform);
        }
        paint_attrs!(element, &node.style)
    }};
}

fn render_node(node: &Node) -> Box<dyn svg::Node> {
    match &node.kind {
        NodeKind::Line { from, to } => common_attrs!(
            svg_element::Line::new()
                .set("x1", from.x)
                .set("y1", from.y)
                .set("x2", to.x)
                .set("y2", to.y),
            node
        )
        .into(),
        NodeKind::Rect { bounds, radius } => {
            let mut rect = svg_element::Rectangle::new()
                .set("x", bounds.min_x)
                .set("y", bounds.min_y)
                .set("width", bounds.width())
                .set("height", bounds.height());
            if *radius > 0.0 {
                rect = rect.set("rx", *radius);
            }
            common_attrs!(rect, node).into()
        }
        NodeKind::Ellipse { center, rx, ry } => common_attrs!(
            svg_element::Ellipse::new()
                .set("cx", center.x)
                .set("cy", center.y)
                .set("rx", *rx)
                .set("ry", *ry),
            node
        )
        .into(),
        NodeKind::Polygon { points } => {
            let points = points
                .iter()
                .map(|p| format!("{},{}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(" ");
            common_attrs!(svg_element::Polygon::new().set("points", points), node).into()
        }
        NodeKind::Text(span) => common_attrs!(
            svg_element::Text::new(span.content.as_str())
                .set("x", span.bounds.center().x)
                .set("y", span.baseline)
                .set("text-anchor", "middle")
                .set("font-family", span.font_family.as_str())
                .set("font-weight", span.font_weight.as_str())
                .set("font-size", span.font_size),
            node
        )
        .into(),
        NodeKind::Group(children) => {
            let mut group = common_attrs!(Group::new(), node);
            if let Some(meta) = &node.table {
                group = group.set("data-type", "table").set("data-chairs", meta.chairs);
            }
            children
                .iter()
                .fold(group, |group, child| group.add(render_node(child)))
                .into()
        }
    }
}

fn transform_attr(placement: &Placement) -> Option<String> {
    let mut parts = Vec::new();
    let t = placement.translation;
    if t.x != 0.0 || t.y != 0.0 {
        parts.push(format!("translate({}, {})", t.x, t.y));
    }
    if placement.rotation != 0.0 {
        parts.push(format!("rotate({})", placement.rotation));
    }
    (!parts.is_empty()).then(|| parts.join(" "))
}
