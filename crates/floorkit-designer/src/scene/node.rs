//! Drawable scene nodes.

use floorkit_core::{Bounds, Point};

/// Identifier of a node attached to a [`Scene`](super::Scene).
///
/// Nodes built outside the scene carry [`NodeId::DETACHED`] until the scene
/// adopts them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u64);

impl NodeId {
    pub const DETACHED: NodeId = NodeId(0);
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Paint of a primitive. `fill: None` means unfilled, which also makes the
/// primitive invisible to hit-testing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Style {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

impl Style {
    pub fn filled(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    pub fn stroked(stroke: impl Into<String>, width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(stroke.into()),
            stroke_width: Some(width),
        }
    }
}

/// Translation plus rotation (degrees, about the local origin) mapping a
/// node's local frame into its parent's.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub translation: Point,
    pub rotation: f64,
}

impl Placement {
    pub fn new(translation: Point, rotation: f64) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation == Point::default() && self.rotation == 0.0
    }

    pub fn to_parent(&self, p: Point) -> Point {
        p.rotated(self.rotation) + self.translation
    }

    pub fn to_local(&self, p: Point) -> Point {
        (p - self.translation).rotated(-self.rotation)
    }
}

/// A run of text. `bounds` is the measured box, `baseline` the y the glyphs
/// sit on; the text is horizontally centred in the box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub content: String,
    pub bounds: Bounds,
    pub baseline: f64,
    pub font_family: String,
    pub font_weight: String,
    pub font_size: f64,
}

/// Metadata tagging a group as a selectable table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    /// Id of the schema entry the group was built from
    pub entry_id: String,
    pub table_ref: String,
    pub chairs: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Line { from: Point, to: Point },
    Rect { bounds: Bounds, radius: f64 },
    Ellipse { center: Point, rx: f64, ry: f64 },
    /// Closed outline; also used for polylines and flattened paths
    Polygon { points: Vec<Point> },
    Text(TextSpan),
    Group(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub name: Option<String>,
    pub kind: NodeKind,
    pub style: Style,
    pub placement: Placement,
    /// Locked nodes are drawn but never hit
    pub locked: bool,
    pub selected: bool,
    pub table: Option<TableMeta>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            id: NodeId::DETACHED,
            name: None,
            kind,
            style: Style::default(),
            placement: Placement::default(),
            locked: false,
            selected: false,
            table: None,
        }
    }

    pub fn line(from: Point, to: Point) -> Self {
        Self::new(NodeKind::Line { from, to })
    }

    pub fn rect(bounds: Bounds, radius: f64) -> Self {
        Self::new(NodeKind::Rect { bounds, radius })
    }

    pub fn ellipse(center: Point, rx: f64, ry: f64) -> Self {
        Self::new(NodeKind::Ellipse { center, rx, ry })
    }

    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(NodeKind::Polygon { points })
    }

    pub fn text(span: TextSpan) -> Self {
        Self::new(NodeKind::Text(span))
    }

    pub fn group(children: Vec<Node>) -> Self {
        Self::new(NodeKind::Group(children))
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_table(mut self, meta: TableMeta) -> Self {
        self.table = Some(meta);
        self
    }

    pub fn locked(mut self) -> Self {
        self.locked = true;
        self
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group(_))
    }

    pub fn is_table(&self) -> bool {
        self.is_group() && self.table.is_some()
    }

    pub fn children(&self) -> &[Node] {
        match &self.kind {
            NodeKind::Group(children) => children,
            _ => &[],
        }
    }

    /// Walks `path` (child indices) down from this node.
    pub fn descendant(&self, path: &[usize]) -> Option<&Node> {
        match path.split_first() {
            None => Some(self),
            Some((first, rest)) => self.children().get(*first)?.descendant(rest),
        }
    }

    /// Bounds in the node's own frame.
    pub fn local_bounds(&self) -> Option<Bounds> {
        match &self.kind {
            NodeKind::Line { from, to } => Bounds::from_points([from, to]),
            NodeKind::Rect { bounds, .. } => Some(*bounds),
            NodeKind::Ellipse { center, rx, ry } => Some(Bounds::new(
                center.x - rx,
                center.y - ry,
                center.x + rx,
                center.y + ry,
            )),
            NodeKind::Polygon { points } => Bounds::from_points(points),
            NodeKind::Text(span) => Some(span.bounds),
            NodeKind::Group(children) => children
                .iter()
                .filter_map(Node::bounds_in_parent)
                .reduce(|a, b| a.union(&b)),
        }
    }

    /// Axis-aligned bounds after applying the node's placement.
    pub fn bounds_in_parent(&self) -> Option<Bounds> {
        let local = self.local_bounds()?;
        if self.placement.is_identity() {
            return Some(local);
        }
        let corners = local.corners().map(|c| self.placement.to_parent(c));
        Bounds::from_points(&corners)
    }

    /// Shifts the placement so the node's bounds are centred on its parent
    /// origin.
    pub fn recentered(mut self) -> Self {
        if let Some(bounds) = self.bounds_in_parent() {
            self.placement.translation = self.placement.translation - bounds.center();
        }
        self
    }

    /// Whether a filled leaf covers `p` (in the node's local frame).
    pub(crate) fn fill_contains(&self, p: Point, tolerance: f64) -> bool {
        match &self.kind {
            NodeKind::Rect { bounds, .. } => bounds.expanded(tolerance).contains(&p),
            NodeKind::Ellipse { center, rx, ry } => {
                let (ex, ey) = (rx + tolerance, ry + tolerance);
                if ex <= 0.0 || ey <= 0.0 {
                    return false;
                }
                let dx = (p.x - center.x) / ex;
                let dy = (p.y - center.y) / ey;
                dx * dx + dy * dy <= 1.0
            }
            NodeKind::Polygon { points } => {
                points.len() >= 3
                    && (polygon_contains(points, p) || edge_distance(points, p) <= tolerance)
            }
            NodeKind::Text(span) => span.bounds.expanded(tolerance).contains(&p),
            NodeKind::Line { .. } | NodeKind::Group(_) => false,
        }
    }
}

/// Even-odd point-in-polygon test.
fn polygon_contains(points: &[Point], p: Point) -> bool {
    let mut inside = false;
    let mut j = points.len() - 1;
    for i in 0..points.len() {
        let (a, b) = (points[i], points[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Distance from `p` to the closest edge of the closed outline.
fn edge_distance(points: &[Point], p: Point) -> f64 {
    let mut best = f64::INFINITY;
    for (i, a) in points.iter().enumerate() {
        let b = points[(i + 1) % points.len()];
        best = best.min(segment_distance(*a, b, p));
    }
    best
}

fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + ab.x * t, a.y + ab.y * t))
}
