use ratatui::{
    buffer::Buffer,
    layout::Rect,
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Circle},
        Widget,
    },
};

use crate::animator::Petal;

/// Half-extent of the figure in unit coordinates: orbit plus largest radius.
const EXTENT: f64 = 1.0;

/// Canvas bounds that keep circles round on terminal cells, which are about
/// twice as tall as they are wide.
pub fn bounds(width: u16, height: u16) -> ([f64; 2], [f64; 2]) {
    let w = f64::from(width.max(1));
    let h = f64::from(height.max(1)) * 2.0;
    if w >= h {
        let x = EXTENT * w / h;
        ([-x, x], [-EXTENT, EXTENT])
    } else {
        let y = EXTENT * h / w;
        ([-EXTENT, EXTENT], [-y, y])
    }
}

/// The breathing figure: one braille circle per petal.
pub struct Flower<'a> {
    petals: &'a [Petal],
}

impl<'a> Flower<'a> {
    pub fn new(petals: &'a [Petal]) -> Self {
        Self { petals }
    }
}

impl Widget for Flower<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let (x_bounds, y_bounds) = bounds(area.width, area.height);
        let petals = self.petals;
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds(y_bounds)
            .paint(|ctx| {
                for petal in petals {
                    ctx.draw(&Circle {
                        x: petal.x,
                        y: petal.y,
                        radius: petal.radius,
                        color: petal.color.into(),
                    });
                }
            })
            .render(area, buf);
    }
}
