use crate::config::WINDOW_TITLE;
use crate::game::note::{BAR_SLOTS, NoteValue, Voice};
use crate::ui::canvas::Canvas;
use crate::ui::color::{self, BLACK, BLUE, GREEN, RED, WHITE};
use crate::ui::frame::{Frame, SlotTint};
use crate::ui::text::TextRenderer;

const LINE_WIDTH: i32 = 5;
const STAFF_LINES: i32 = 5;
const SMALL_TEXT: f32 = 16.0;

/// Screen geometry derived from the canvas size: each staff spans the middle
/// half of the width, the left hand on top and the right hand below.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub width: i32,
    pub height: i32,
    qx: i32,
    qy: i32,
    dx: i32,
    dy: i32,
}

impl Layout {
    pub fn for_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            qx: width / 4,
            qy: height / 4,
            dx: width / 2 / BAR_SLOTS as i32,
            dy: height / 2 / STAFF_LINES,
        }
    }

    #[inline(always)]
    pub fn staff_top(&self, voice: Voice) -> i32 {
        match voice {
            Voice::Left => self.dy / 2,
            Voice::Right => self.dy / 2 + self.qy * 2,
        }
    }

    #[inline(always)]
    pub fn note_center(&self, voice: Voice, slot: usize) -> (i32, i32) {
        let slot = slot as i32;
        (self.qx + self.dx * slot * 7 / 8 + self.dx / 2, self.staff_top(voice) + self.dy * 3)
    }

    #[inline(always)]
    pub fn head_radius(&self) -> i32 {
        self.dy / 2
    }

    /// x of the stem, just right of the note head.
    #[inline(always)]
    pub fn stem_x(&self, x: i32) -> i32 {
        x + self.head_radius() * 3 / 4 + LINE_WIDTH
    }
}

#[inline(always)]
fn tint_color(tint: SlotTint) -> u32 {
    match tint {
        SlotTint::Highlight => BLUE,
        SlotTint::Correct => GREEN,
        SlotTint::Incorrect => RED,
        SlotTint::Pending => WHITE,
    }
}

pub fn draw(frame: &Frame, canvas: &mut Canvas, text: &TextRenderer) {
    canvas.fill(BLACK);
    let layout = Layout::for_size(canvas.width() as i32, canvas.height() as i32);

    text.draw(canvas, WINDOW_TITLE, 0, 0, SMALL_TEXT, WHITE);
    text.draw_right(canvas, &frame.header(), layout.width, 0, SMALL_TEXT, WHITE);

    for voice in Voice::ALL {
        draw_staff(canvas, &layout, frame, voice);
        draw_label(canvas, &layout, text, voice);
    }
    if let (Some(acc), Some(label)) = (frame.accuracy, frame.accuracy_label()) {
        text.draw_right(canvas, &label, layout.width, layout.height - layout.dy, layout.dy as f32, WHITE);
        draw_meter(canvas, &layout, acc);
    }
}

fn draw_label(canvas: &mut Canvas, layout: &Layout, text: &TextRenderer, voice: Voice) {
    let label = match voice {
        Voice::Left => "L",
        Voice::Right => "R",
    };
    let y = layout.staff_top(voice) + layout.dy * 3 / 2;
    text.draw(canvas, label, layout.qx / 3, y, layout.dy as f32, WHITE);
}

fn draw_staff(canvas: &mut Canvas, layout: &Layout, frame: &Frame, voice: Voice) {
    let top = layout.staff_top(voice);
    let (qx, dx, dy) = (layout.qx, layout.dx, layout.dy);

    for line in 0..STAFF_LINES {
        let y = top + line * dy;
        canvas.line((qx, y), (qx * 3, y), LINE_WIDTH, WHITE);
    }
    let bottom = top + (STAFF_LINES - 1) * dy;
    for x in [qx, qx * 3 - dx / 4, qx * 3] {
        canvas.line((x, top), (x, bottom), LINE_WIDTH, WHITE);
    }

    let marker = frame.silent_marker();
    let pattern = &frame.row(voice).pattern;
    for slot in 0..BAR_SLOTS {
        let (x, y) = layout.note_center(voice, slot);
        if marker && slot == frame.pos {
            canvas.disc(x, y, dy / 8, BLUE);
            continue;
        }
        draw_note(canvas, layout, x, y, pattern.slot(slot), tint_color(frame.tint(voice, slot)));
    }
}

fn draw_note(canvas: &mut Canvas, layout: &Layout, x: i32, y: i32, value: NoteValue, color: u32) {
    let lw = LINE_WIDTH * 3 / 2;
    let radius = layout.head_radius();
    let xp = layout.stem_x(x);
    let stem_top = y - layout.dy * 3;

    match value {
        NoteValue::Rest => {
            // Silence is invisible unless it was broken.
            if color == RED {
                canvas.line((xp - radius, y - radius), (xp + radius, y + radius), lw, RED);
                canvas.line((xp + radius, y - radius), (xp - radius, y + radius), lw, RED);
            }
        }
        NoteValue::Quarter => {
            canvas.disc(x, y, radius, color);
            canvas.line((xp, y), (xp, stem_top), lw, color);
        }
        NoteValue::EighthPair => {
            canvas.ring(x, y, radius, lw, color);
            canvas.line((xp, y), (xp, stem_top), lw, color);
        }
        NoteValue::Whole => canvas.ring(x, y, radius, lw, color),
    }
}

/// Accuracy bar in the bottom left corner.
fn draw_meter(canvas: &mut Canvas, layout: &Layout, accuracy: f64) {
    let w = layout.qx / 2;
    let h = (layout.dy / 4).max(2);
    let x = h;
    let y = layout.height - layout.dy / 2;
    canvas.fill_rect(x, y, w, h, color::METER_EMPTY);
    let filled = (w as f64 * accuracy.clamp(0.0, 100.0) / 100.0).round() as i32;
    canvas.fill_rect(x, y, filled, h, GREEN);
}
