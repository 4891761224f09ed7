//! Retained-mode drawing surface.
//!
//! Faces never paint pixels themselves. They create items on a [`Surface`]
//! once and then move or relabel those items through the handles they were
//! given. [`Scene`] keeps the items as a display list which the terminal
//! renderer rasterizes on every frame.

use colors_transform::Rgb;
use log::debug;

use crate::error::{ClockError, Result};
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanvasId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId(usize);

/// The primitives a clock face needs from whatever draws it.
pub trait Surface {
    /// A fixed-size square canvas filled with `background`.
    fn create_canvas(&mut self, size: u32, background: Rgb) -> CanvasId;

    fn draw_circle(
        &mut self,
        canvas: CanvasId,
        center: Point,
        radius: f32,
        outline: Rgb,
        width: u32,
    ) -> Result<()>;

    /// Static text centered on `at`.
    fn draw_text(
        &mut self,
        canvas: CanvasId,
        at: Point,
        text: &str,
        font_size: u32,
        color: Rgb,
    ) -> Result<()>;

    fn create_line(
        &mut self,
        canvas: CanvasId,
        from: Point,
        to: Point,
        width: u32,
        color: Rgb,
    ) -> Result<LineId>;

    fn set_line_coords(&mut self, line: LineId, from: Point, to: Point) -> Result<()>;

    /// An initially empty text label centered on `at`.
    fn create_label(
        &mut self,
        canvas: CanvasId,
        at: Point,
        font_size: u32,
        color: Rgb,
    ) -> Result<LabelId>;

    fn set_label_text(&mut self, label: LabelId, text: &str) -> Result<()>;
}

#[derive(Clone, Debug)]
pub enum Shape {
    Circle {
        center: Point,
        radius: f32,
        outline: Rgb,
        width: u32,
    },
    Text {
        at: Point,
        text: String,
        font_size: u32,
        color: Rgb,
    },
}

#[derive(Clone, Debug)]
pub struct Canvas {
    pub size: u32,
    pub background: Rgb,
    pub shapes: Vec<Shape>,
}

#[derive(Clone, Copy, Debug)]
pub struct Line {
    pub canvas: CanvasId,
    pub from: Point,
    pub to: Point,
    pub width: u32,
    pub color: Rgb,
}

#[derive(Clone, Debug)]
pub struct Label {
    pub canvas: CanvasId,
    pub at: Point,
    pub text: String,
    pub font_size: u32,
    pub color: Rgb,
}

#[derive(Default)]
pub struct Scene {
    canvases: Vec<Canvas>,
    lines: Vec<Line>,
    labels: Vec<Label>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn canvases(&self) -> impl Iterator<Item = (CanvasId, &Canvas)> {
        self.canvases
            .iter()
            .enumerate()
            .map(|(index, canvas)| (CanvasId(index), canvas))
    }

    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.get(id.0)
    }

    pub fn line(&self, id: LineId) -> Option<&Line> {
        self.lines.get(id.0)
    }

    pub fn label(&self, id: LabelId) -> Option<&Label> {
        self.labels.get(id.0)
    }

    /// Lines of one canvas in creation order.
    pub fn lines_on(&self, canvas: CanvasId) -> impl Iterator<Item = &Line> {
        self.lines.iter().filter(move |line| line.canvas == canvas)
    }

    pub fn labels_on(&self, canvas: CanvasId) -> impl Iterator<Item = &Label> {
        self.labels.iter().filter(move |label| label.canvas == canvas)
    }

    fn canvas_mut(&mut self, id: CanvasId) -> Result<&mut Canvas> {
        self.canvases
            .get_mut(id.0)
            .ok_or_else(|| ClockError::UnknownItem(format!("{:?}", id)))
    }

    fn check_canvas(&self, id: CanvasId) -> Result<()> {
        match self.canvases.get(id.0) {
            Some(_) => Ok(()),
            None => Err(ClockError::UnknownItem(format!("{:?}", id))),
        }
    }
}

impl Surface for Scene {
    fn create_canvas(&mut self, size: u32, background: Rgb) -> CanvasId {
        let id = CanvasId(self.canvases.len());
        debug!("creating canvas {:?} of {}px", id, size);
        self.canvases.push(Canvas {
            size,
            background,
            shapes: Vec::new(),
        });
        id
    }

    fn draw_circle(
        &mut self,
        canvas: CanvasId,
        center: Point,
        radius: f32,
        outline: Rgb,
        width: u32,
    ) -> Result<()> {
        self.canvas_mut(canvas)?.shapes.push(Shape::Circle {
            center,
            radius,
            outline,
            width,
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        canvas: CanvasId,
        at: Point,
        text: &str,
        font_size: u32,
        color: Rgb,
    ) -> Result<()> {
        self.canvas_mut(canvas)?.shapes.push(Shape::Text {
            at,
            text: text.to_string(),
            font_size,
            color,
        });
        Ok(())
    }

    fn create_line(
        &mut self,
        canvas: CanvasId,
        from: Point,
        to: Point,
        width: u32,
        color: Rgb,
    ) -> Result<LineId> {
        self.check_canvas(canvas)?;
        self.lines.push(Line {
            canvas,
            from,
            to,
            width,
            color,
        });
        Ok(LineId(self.lines.len() - 1))
    }

    fn set_line_coords(&mut self, line: LineId, from: Point, to: Point) -> Result<()> {
        let line = self
            .lines
            .get_mut(line.0)
            .ok_or_else(|| ClockError::UnknownItem(format!("{:?}", line)))?;
        line.from = from;
        line.to = to;
        Ok(())
    }

    fn create_label(
        &mut self,
        canvas: CanvasId,
        at: Point,
        font_size: u32,
        color: Rgb,
    ) -> Result<LabelId> {
        self.check_canvas(canvas)?;
        self.labels.push(Label {
            canvas,
            at,
            text: String::new(),
            font_size,
            color,
        });
        Ok(LabelId(self.labels.len() - 1))
    }

    fn set_label_text(&mut self, label: LabelId, text: &str) -> Result<()> {
        let label = self
            .labels
            .get_mut(label.0)
            .ok_or_else(|| ClockError::UnknownItem(format!("{:?}", label)))?;
        label.text.clear();
        label.text.push_str(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black() -> Rgb {
        Rgb::from(0.0, 0.0, 0.0)
    }

    #[test]
    fn lines_move_in_place() {
        let mut scene = Scene::new();
        let canvas = scene.create_canvas(100, black());
        let line = scene
            .create_line(canvas, Point::new(0.0, 0.0), Point::new(1.0, 1.0), 2, black())
            .unwrap();
        scene
            .set_line_coords(line, Point::new(5.0, 5.0), Point::new(9.0, 9.0))
            .unwrap();

        assert_eq!(scene.lines_on(canvas).count(), 1);
        assert_eq!(scene.line(line).unwrap().to, Point::new(9.0, 9.0));
    }

    #[test]
    fn items_stay_on_their_own_canvas() {
        let mut scene = Scene::new();
        let left = scene.create_canvas(100, black());
        let right = scene.create_canvas(100, black());
        scene
            .create_label(left, Point::new(50.0, 50.0), 20, black())
            .unwrap();
        scene
            .draw_text(right, Point::new(1.0, 1.0), "x", 8, black())
            .unwrap();

        assert_eq!(scene.labels_on(left).count(), 1);
        assert_eq!(scene.labels_on(right).count(), 0);
        assert_eq!(scene.canvas(right).unwrap().shapes.len(), 1);
        assert!(scene.canvas(left).unwrap().shapes.is_empty());
    }

    #[test]
    fn label_text_is_replaced() {
        let mut scene = Scene::new();
        let canvas = scene.create_canvas(100, black());
        let label = scene
            .create_label(canvas, Point::new(50.0, 50.0), 20, black())
            .unwrap();
        scene.set_label_text(label, "first").unwrap();
        scene.set_label_text(label, "B").unwrap();
        assert_eq!(scene.label(label).unwrap().text, "B");
    }

    #[test]
    fn foreign_canvas_is_rejected() {
        let mut scene = Scene::new();
        let mut other = Scene::new();
        let canvas = other.create_canvas(10, black());
        let result = scene.draw_circle(canvas, Point::new(0.0, 0.0), 1.0, black(), 1);
        assert!(matches!(result, Err(ClockError::UnknownItem(_))));
    }
}
