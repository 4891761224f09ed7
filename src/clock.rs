use chrono::Timelike;

use crate::error::Result;
use crate::geometry::{slot_angle, HandAngles, Point};
use crate::markers::{MarkerSet, HOURS_PER_DAY};
use crate::surface::{CanvasId, LabelId, LineId, Surface};
use crate::theme::Theme;

const RADIUS_FACTOR: f32 = 0.45;
const MARKER_DISTANCE: f32 = 0.85;
const FACE_WIDTH: u32 = 3;

struct Hand {
    line: LineId,
    /// In terms of the dial radius. 0 is shortest, 1 reaches the rim.
    length: f32,
}

/// One 24-hour dial drawn on its own canvas.
pub struct ClockFace {
    size: u32,
    center: Point,
    radius: f32,
    theme: Theme,
    markers: MarkerSet,
    canvas: CanvasId,
    hour_hand: Hand,
    minute_hand: Hand,
    second_hand: Hand,
    center_label: LabelId,
}

impl ClockFace {
    /// Draws the static dial and creates the hands and the center label.
    ///
    /// Markers default to the canonical order and the theme to gold on black.
    /// The center label starts out showing the marker of `now`'s hour.
    pub fn new<S: Surface, T: Timelike>(
        surface: &mut S,
        size: u32,
        markers: Option<MarkerSet>,
        theme: Option<Theme>,
        now: &T,
    ) -> Result<Self> {
        debug_assert!(size > 0, "a clock face needs a positive size");

        let markers = markers.unwrap_or_default();
        let theme = theme.unwrap_or_default();
        let colors = theme.resolve()?;

        let half = size as f32 / 2.0;
        let center = Point::new(half, half);
        let radius = size as f32 * RADIUS_FACTOR;

        let canvas = surface.create_canvas(size, colors.background);

        // Dial
        surface.draw_circle(canvas, center, radius, colors.face, FACE_WIDTH)?;
        for (i, glyph) in markers.0.iter().enumerate() {
            let at = center.polar(radius * MARKER_DISTANCE, slot_angle(i, HOURS_PER_DAY));
            surface.draw_text(canvas, at, &glyph.to_string(), size / 12, colors.marker)?;
        }

        // Hands start at the top of the dial
        let mut hand = |length: f32, width: u32, color| -> Result<Hand> {
            let tip = Point::new(center.x, center.y - radius * length);
            let line = surface.create_line(canvas, center, tip, width, color)?;
            Ok(Hand { line, length })
        };
        let hour_hand = hand(0.5, 4, colors.hour_hand)?;
        let minute_hand = hand(0.7, 3, colors.minute_hand)?;
        let second_hand = hand(0.8, 2, colors.second_hand)?;

        let center_label = surface.create_label(canvas, center, size / 5, colors.center)?;

        let face = Self {
            size,
            center,
            radius,
            theme,
            markers,
            canvas,
            hour_hand,
            minute_hand,
            second_hand,
            center_label,
        };
        face.update_center_symbol(surface, now)?;
        Ok(face)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn canvas(&self) -> CanvasId {
        self.canvas
    }

    pub fn hand_lines(&self) -> [LineId; 3] {
        [
            self.hour_hand.line,
            self.minute_hand.line,
            self.second_hand.line,
        ]
    }

    pub fn center_label(&self) -> LabelId {
        self.center_label
    }

    /// Shows the marker of the current hour in the middle of the dial.
    pub fn update_center_symbol<S: Surface, T: Timelike>(
        &self,
        surface: &mut S,
        now: &T,
    ) -> Result<()> {
        let glyph = self.markers.for_hour(now.hour());
        surface.set_label_text(self.center_label, &glyph.to_string())
    }

    /// Points the three hands at `now` and refreshes the center symbol.
    pub fn update<S: Surface, T: Timelike>(&self, surface: &mut S, now: &T) -> Result<()> {
        let angles = HandAngles::at(now);

        for (hand, angle) in [
            (&self.hour_hand, angles.hour),
            (&self.minute_hand, angles.minute),
            (&self.second_hand, angles.second),
        ]
        .iter()
        {
            let tip = self.center.polar(self.radius * hand.length, *angle);
            surface.set_line_coords(hand.line, self.center, tip)?;
        }

        self.update_center_symbol(surface, now)
    }
}
