//! SVG import for table drawings.
//!
//! Converts SVG markup into a group of scene primitives. Supported elements:
//! `rect` (with `rx`), `circle`, `ellipse`, `line`, `polygon`, `polyline` and
//! `path`. Curves and arcs in paths are flattened into polygon outlines with
//! lyon. Nested `<g>` groups contribute inherited
//! `fill`/`stroke` and `translate(..)` offsets; other transforms are ignored.
//! Content inside `<defs>` is skipped.
//!
//! The resulting group is recentred so its bounding box is centred on the
//! origin.

use crate::error::AssetError;
use crate::scene::{Node, Style};
use floorkit_core::{Bounds, Point};
use lyon::geom::ArcFlags;
use lyon::math::{point, vector, Angle};
use lyon::path::builder::SvgPathBuilder;
use lyon::path::iterator::PathIterator;
use lyon::path::{Path, PathEvent};
use svg::node::element::path::{Command, Data, Position};
use svg::node::element::tag::Type;
use svg::node::Attributes;
use svg::parser::Event;

/// Fill used when neither the element nor an ancestor sets one
const DEFAULT_FILL: &str = "black";

/// Maximum distance between a curve and its flattened outline
const PATH_TOLERANCE: f32 = 0.1;

/// Paint inherited from enclosing groups.
#[derive(Debug, Clone, Default)]
struct Inherited {
    /// `Some(None)` when an ancestor set `none`
    fill: Option<Option<String>>,
    stroke: Option<Option<String>>,
    stroke_width: Option<f64>,
    offset: Point,
}

#[derive(Debug, Default)]
struct ImportState {
    saw_root: bool,
    skip_depth: usize,
    stack: Vec<Inherited>,
    nodes: Vec<Node>,
}

impl ImportState {
    fn inherited(&self) -> Inherited {
        self.stack.last().cloned().unwrap_or_default()
    }
}

/// Parses table drawings into scene primitives.
#[derive(Debug, Clone, Default)]
pub struct SvgAssetImporter;

impl SvgAssetImporter {
    pub fn new() -> Self {
        Self
    }

    /// Import `content`; `source` names the drawing in errors and logs.
    pub fn import_str(&self, source: &str, content: &str) -> Result<Node, AssetError> {
        let parser = svg::read(content)
            .map_err(|e| AssetError::InvalidSvg(format!("{source}: {e}")))?;

        let mut state = ImportState::default();
        for event in parser {
            match event {
                Event::Error(e) => {
                    return Err(AssetError::InvalidSvg(format!("{source}: {e}")));
                }
                Event::Tag(name, kind, attrs) => {
                    self.handle_tag(&mut state, name, kind, &attrs)
                        .map_err(|reason| AssetError::InvalidSvg(format!("{source}: {reason}")))?;
                }
                _ => {}
            }
        }

        if !state.saw_root {
            return Err(AssetError::InvalidSvg(format!(
                "{source}: missing <svg> root element"
            )));
        }
        if state.nodes.is_empty() {
            return Err(AssetError::EmptyDrawing(source.to_string()));
        }

        tracing::debug!(
            source,
            primitives = state.nodes.len(),
            "Imported table drawing"
        );
        Ok(Node::group(state.nodes).recentered())
    }

    fn handle_tag(
        &self,
        state: &mut ImportState,
        name: &str,
        kind: Type,
        attrs: &Attributes,
    ) -> Result<(), String> {
        match (name, kind) {
            ("svg", Type::Start | Type::Empty) => {
                state.saw_root = true;
                return Ok(());
            }
            ("defs", Type::Start) => {
                state.skip_depth += 1;
                return Ok(());
            }
            ("defs", Type::End) => {
                state.skip_depth = state.skip_depth.saturating_sub(1);
                return Ok(());
            }
            _ => {}
        }

        if state.skip_depth > 0 {
            return Ok(());
        }

        match (name, kind) {
            ("g", Type::Start) => {
                let parent = state.inherited();
                let offset = attr(attrs, "transform")
                    .and_then(|t| parse_translate(&t))
                    .map(|t| parent.offset + t)
                    .unwrap_or(parent.offset);
                state.stack.push(Inherited {
                    fill: paint(attrs, "fill").or(parent.fill),
                    stroke: paint(attrs, "stroke").or(parent.stroke),
                    stroke_width: number(attrs, "stroke-width").or(parent.stroke_width),
                    offset,
                });
            }
            ("g", Type::End) => {
                state.stack.pop();
            }
            (_, Type::End) => {}
            (element, _) => {
                let inherited = state.inherited();
                let shapes = self.build_element(element, attrs)?;
                for shape in shapes {
                    let shape = shape.with_style(resolve_style(element, attrs, &inherited));
                    state.nodes.push(offset_node(shape, inherited.offset));
                }
            }
        }
        Ok(())
    }

    fn build_element(&self, element: &str, attrs: &Attributes) -> Result<Vec<Node>, String> {
        let n = |key: &str| number(attrs, key).unwrap_or(0.0);
        let node = match element {
            "rect" => {
                let (x, y) = (n("x"), n("y"));
                let (w, h) = (n("width"), n("height"));
                if w <= 0.0 || h <= 0.0 {
                    return Ok(Vec::new());
                }
                let radius = number(attrs, "rx").or_else(|| number(attrs, "ry")).unwrap_or(0.0);
                Node::rect(Bounds::new(x, y, x + w, y + h), radius)
            }
            "circle" => Node::ellipse(Point::new(n("cx"), n("cy")), n("r"), n("r")),
            "ellipse" => Node::ellipse(Point::new(n("cx"), n("cy")), n("rx"), n("ry")),
            "line" => Node::line(Point::new(n("x1"), n("y1")), Point::new(n("x2"), n("y2"))),
            "polygon" | "polyline" => {
                let points = parse_points(&attr(attrs, "points").unwrap_or_default())?;
                if points.len() < 2 {
                    return Ok(Vec::new());
                }
                Node::polygon(points)
            }
            "path" => {
                let d = attr(attrs, "d").unwrap_or_default();
                return Ok(flatten_path(&d)?
                    .into_iter()
                    .filter(|outline| outline.len() >= 2)
                    .map(Node::polygon)
                    .collect());
            }
            _ => return Ok(Vec::new()),
        };
        Ok(vec![node])
    }
}

fn attr(attrs: &Attributes, key: &str) -> Option<String> {
    attrs.get(key).map(|v| v.to_string())
}

/// Value of `key` from the attribute or the inline `style` declaration.
fn style_value(attrs: &Attributes, key: &str) -> Option<String> {
    if let Some(value) = attr(attrs, key) {
        return Some(value.trim().to_string());
    }
    let style = attr(attrs, "style")?;
    style.split(';').find_map(|decl| {
        let (k, v) = decl.split_once(':')?;
        (k.trim() == key).then(|| v.trim().to_string())
    })
}

fn paint(attrs: &Attributes, key: &str) -> Option<Option<String>> {
    style_value(attrs, key).map(|v| if v == "none" { None } else { Some(v) })
}

fn number(attrs: &Attributes, key: &str) -> Option<f64> {
    style_value(attrs, key).and_then(|v| parse_length(&v))
}

fn parse_length(value: &str) -> Option<f64> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

fn resolve_style(element: &str, attrs: &Attributes, inherited: &Inherited) -> Style {
    let fill = if element == "line" {
        None
    } else {
        paint(attrs, "fill")
            .or_else(|| inherited.fill.clone())
            .unwrap_or_else(|| Some(DEFAULT_FILL.to_string()))
    };
    Style {
        fill,
        stroke: paint(attrs, "stroke")
            .or_else(|| inherited.stroke.clone())
            .flatten(),
        stroke_width: number(attrs, "stroke-width").or(inherited.stroke_width),
    }
}

fn offset_node(mut node: Node, offset: Point) -> Node {
    if offset != Point::default() {
        node.placement.translation = node.placement.translation + offset;
    }
    node
}

fn parse_points(value: &str) -> Result<Vec<Point>, String> {
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| format!("bad coordinate '{s}'")))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(numbers
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect())
}

/// `translate(x[, y])`, or `None` for any other transform.
fn parse_translate(value: &str) -> Option<Point> {
    let inner = value.trim().strip_prefix("translate(")?.strip_suffix(')')?;
    let mut parts = inner
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>());
    let x = parts.next()?.ok()?;
    let y = match parts.next() {
        Some(v) => v.ok()?,
        None => 0.0,
    };
    Some(Point::new(x, y))
}

/// Flattened outline of every subpath of `d`.
fn flatten_path(d: &str) -> Result<Vec<Vec<Point>>, String> {
    let data = Data::parse(d).map_err(|e| format!("bad path data: {e}"))?;
    let path = build_path(&data);

    let mut outlines = Vec::new();
    let mut outline = Vec::new();
    for event in path.iter().flattened(PATH_TOLERANCE) {
        match event {
            PathEvent::Begin { at } => outline.push(to_point(at)),
            PathEvent::Line { to, .. }
            | PathEvent::Quadratic { to, .. }
            | PathEvent::Cubic { to, .. } => outline.push(to_point(to)),
            PathEvent::End { .. } => {
                if !outline.is_empty() {
                    outlines.push(std::mem::take(&mut outline));
                }
            }
        }
    }
    Ok(outlines)
}

/// Replay parsed path commands into a lyon path.
fn build_path(data: &Data) -> Path {
    let mut builder = Path::svg_builder();
    for command in data.iter() {
        match command {
            Command::Move(position, params) => {
                // Pairs after the first are implicit line-tos
                for (i, p) in params.chunks_exact(2).enumerate() {
                    let to = vector(p[0], p[1]);
                    match (position, i) {
                        (Position::Absolute, 0) => {
                            builder.move_to(to.to_point());
                        }
                        (Position::Relative, 0) => {
                            builder.relative_move_to(to);
                        }
                        (Position::Absolute, _) => {
                            builder.line_to(to.to_point());
                        }
                        (Position::Relative, _) => {
                            builder.relative_line_to(to);
                        }
                    }
                }
            }
            Command::Line(position, params) => {
                for p in params.chunks_exact(2) {
                    match position {
                        Position::Absolute => {
                            builder.line_to(point(p[0], p[1]));
                        }
                        Position::Relative => builder.relative_line_to(vector(p[0], p[1])),
                    };
                }
            }
            Command::HorizontalLine(position, params) => {
                for x in params.iter().copied() {
                    match position {
                        Position::Absolute => builder.horizontal_line_to(x),
                        Position::Relative => builder.relative_horizontal_line_to(x),
                    };
                }
            }
            Command::VerticalLine(position, params) => {
                for y in params.iter().copied() {
                    match position {
                        Position::Absolute => builder.vertical_line_to(y),
                        Position::Relative => builder.relative_vertical_line_to(y),
                    };
                }
            }
            Command::QuadraticCurve(position, params) => {
                for p in params.chunks_exact(4) {
                    match position {
                        Position::Absolute => {
                            builder.quadratic_bezier_to(point(p[0], p[1]), point(p[2], p[3]));
                        }
                        Position::Relative => builder
                            .relative_quadratic_bezier_to(vector(p[0], p[1]), vector(p[2], p[3])),
                    };
                }
            }
            Command::SmoothQuadraticCurve(position, params) => {
                for p in params.chunks_exact(2) {
                    match position {
                        Position::Absolute => builder.smooth_quadratic_bezier_to(point(p[0], p[1])),
                        Position::Relative => {
                            builder.smooth_relative_quadratic_bezier_to(vector(p[0], p[1]))
                        }
                    };
                }
            }
            Command::CubicCurve(position, params) => {
                for p in params.chunks_exact(6) {
                    match position {
                        Position::Absolute => {
                            builder.cubic_bezier_to(
                                point(p[0], p[1]),
                                point(p[2], p[3]),
                                point(p[4], p[5]),
                            );
                        }
                        Position::Relative => builder.relative_cubic_bezier_to(
                            vector(p[0], p[1]),
                            vector(p[2], p[3]),
                            vector(p[4], p[5]),
                        ),
                    };
                }
            }
            Command::SmoothCubicCurve(position, params) => {
                for p in params.chunks_exact(4) {
                    match position {
                        Position::Absolute => {
                            builder.smooth_cubic_bezier_to(point(p[0], p[1]), point(p[2], p[3]))
                        }
                        Position::Relative => builder.smooth_relative_cubic_bezier_to(
                            vector(p[0], p[1]),
                            vector(p[2], p[3]),
                        ),
                    };
                }
            }
            Command::EllipticalArc(position, params) => {
                for p in params.chunks_exact(7) {
                    let radii = vector(p[0], p[1]);
                    let x_rotation = Angle::degrees(p[2]);
                    let flags = ArcFlags {
                        large_arc: p[3] != 0.0,
                        sweep: p[4] != 0.0,
                    };
                    match position {
                        Position::Absolute => {
                            builder.arc_to(radii, x_rotation, flags, point(p[5], p[6]))
                        }
                        Position::Relative => {
                            builder.relative_arc_to(radii, x_rotation, flags, vector(p[5], p[6]))
                        }
                    };
                }
            }
            Command::Close => builder.close(),
        }
    }
    builder.build()
}

fn to_point(p: lyon::math::Point) -> Point {
    Point::new(p.x as f64, p.y as f64)
}
