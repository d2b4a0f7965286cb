use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Index into an external color palette.
pub type ColorIndex = usize;

/// A single drawing instruction handed to a backend.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DrawPrimitive {
    /// Lift the pen and place it at the point.
    MoveTo(DVec3),
    /// Draw a straight segment from the current pen position to the point.
    LineTo(DVec3),
    /// Switch the pen to another palette entry.
    SetColor(ColorIndex),
    /// Current step length relative to the configured unit length.
    SetScale(f64),
}

/// The engine-agnostic output of turtle interpretation.
///
/// Primitives are stored in emission order. Backends decide how points map to pixels
/// and how color indices map to RGB.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DrawingPath {
    primitives: Vec<DrawPrimitive>,
}

/// A connected pen-down run of points drawn with a single color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub color: ColorIndex,
    pub points: Vec<DVec3>,
}

impl DrawingPath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, primitive: DrawPrimitive) {
        self.primitives.push(primitive);
    }

    pub fn primitives(&self) -> &[DrawPrimitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Number of `LineTo` segments.
    pub fn line_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, DrawPrimitive::LineTo(_)))
            .count()
    }

    /// Pen positions in emission order (targets of `MoveTo` and `LineTo`).
    pub fn points(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            DrawPrimitive::MoveTo(v) | DrawPrimitive::LineTo(v) => Some(*v),
            _ => None,
        })
    }

    /// Axis-aligned `(min, max)` corners over every pen position, or `None` for an empty path.
    pub fn bounds(&self) -> Option<(DVec3, DVec3)> {
        self.points().fold(None, |acc, p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }

    /// True when any pen position leaves the XY plane.
    pub fn is_3d(&self) -> bool {
        self.points().any(|p| p.z.abs() > f64::EPSILON)
    }

    /// Splits the path into pen-down runs.
    ///
    /// A run ends at every `MoveTo` and every color change; runs with fewer than two points
    /// draw nothing and are dropped.
    pub fn polylines(&self) -> Vec<Polyline> {
        let mut out = Vec::new();
        let mut color = 0;
        let mut pen = DVec3::ZERO;
        let mut run = vec![pen];

        let flush = |run: &mut Vec<DVec3>, color, out: &mut Vec<Polyline>| {
            if run.len() > 1 {
                out.push(Polyline {
                    color,
                    points: std::mem::take(run),
                });
            } else {
                run.clear();
            }
        };

        for primitive in &self.primitives {
            match *primitive {
                DrawPrimitive::MoveTo(p) => {
                    flush(&mut run, color, &mut out);
                    pen = p;
                    run.push(pen);
                }
                DrawPrimitive::LineTo(p) => {
                    pen = p;
                    run.push(pen);
                }
                DrawPrimitive::SetColor(c) => {
                    if c != color {
                        flush(&mut run, color, &mut out);
                        color = c;
                        run.push(pen);
                    }
                }
                DrawPrimitive::SetScale(_) => {}
            }
        }
        flush(&mut run, color, &mut out);
        out
    }
}
