//! Break timeline grid
//!
//! Renders the session as a vertical ruler sized by total session duration,
//! one pixel row per minute at the reference scale. Clicking empty grid
//! space creates a break there; clicking an existing break interval selects
//! it for editing. The grid also owns the popup state machine: while a
//! break editor is open, pointer-downs do not create anything.

use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path, Program, Stroke, Text};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Renderer, Theme};
use respite_core::{Break, GridScale, TimeValue};

/// Fixed width of the grid area, from the reference design.
pub const GRID_WIDTH: f32 = 500.0;

/// Left gutter reserved for hour labels.
const LABEL_GUTTER: f32 = 60.0;

/// Height used when the session duration is missing or zero.
const MIN_GRID_HEIGHT: f32 = 16.0;

/// Popup state: at most one break is targeted for editing at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Idle,
    Editing(usize),
}

/// Messages produced by pointer interaction with the grid
#[derive(Debug, Clone)]
pub enum BreakGridMessage {
    /// Empty grid space was pressed at this y offset; the application
    /// should create a break there and open the editor on it.
    CreateRequested(f32),
    /// An existing break interval was pressed.
    BreakSelected(usize),
}

/// Timeline grid state and configuration
#[derive(Debug, Clone)]
pub struct BreakGrid {
    /// Total session length; sets the grid's vertical extent
    session_duration: TimeValue,
    scale: GridScale,
    editor: EditorState,
}

impl BreakGrid {
    /// Create a grid for a session of the given duration. The scale is
    /// passed in explicitly; the grid reads no ambient configuration.
    pub fn new(session_duration: TimeValue, scale: GridScale) -> Self {
        Self {
            session_duration,
            scale,
            editor: EditorState::Idle,
        }
    }

    pub fn session_duration(&self) -> TimeValue {
        self.session_duration
    }

    pub fn scale(&self) -> GridScale {
        self.scale
    }

    /// Vertical extent of the grid in pixels. A zero-duration session
    /// still renders a minimal single-row grid.
    pub fn grid_height(&self) -> f32 {
        self.scale.offset_of(self.session_duration).max(MIN_GRID_HEIGHT)
    }

    pub fn editor(&self) -> EditorState {
        self.editor
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.editor, EditorState::Editing(_))
    }

    /// Target the editor at one break. Called by the application after a
    /// creation or selection message.
    pub fn open_editor(&mut self, index: usize) {
        self.editor = EditorState::Editing(index);
    }

    pub fn close_editor(&mut self) {
        self.editor = EditorState::Idle;
    }

    /// Hour labels with their pixel rows. One label per whole hour plus
    /// one more when a partial hour remains; that last label sits at the
    /// session-end row.
    pub fn hour_label_rows(&self) -> Vec<(u32, f32)> {
        let mut count = self.session_duration.hours;
        if self.session_duration.minutes != 0 {
            count += 1;
        }

        let end_row = self.scale.offset_of(self.session_duration);
        (0..=count)
            .map(|hour| {
                let row = self.scale.offset_of(TimeValue::new(hour, 0, 0));
                (hour, row.min(end_row))
            })
            .collect()
    }

    /// Index of the topmost-drawn break interval covering `y`, if any.
    /// Later breaks draw over earlier ones, so search back to front.
    pub fn break_at(&self, y: f32, breaks: &[Break]) -> Option<usize> {
        breaks.iter().enumerate().rev().find_map(|(index, b)| {
            let top = self.scale.offset_of(b.start);
            let bottom = top + self.scale.offset_of(b.duration);
            (y >= top && y < bottom).then_some(index)
        })
    }

    /// Resolve a pointer-down at grid offset `y` into a message. While the
    /// editor popup is open this is a no-op.
    pub fn handle_press(&self, y: f32, breaks: &[Break]) -> Option<BreakGridMessage> {
        if self.is_editing() {
            return None;
        }

        match self.break_at(y, breaks) {
            Some(index) => Some(BreakGridMessage::BreakSelected(index)),
            None => Some(BreakGridMessage::CreateRequested(y)),
        }
    }

    /// Build the grid view over the current break collection.
    pub fn view<'a>(&'a self, breaks: &'a [Break]) -> Element<'a, BreakGridMessage> {
        Canvas::new(BreakGridProgram { grid: self, breaks })
            .width(Length::Fixed(LABEL_GUTTER + GRID_WIDTH))
            .height(Length::Fixed(self.grid_height() + 20.0))
            .into()
    }
}

/// Canvas program for rendering the grid
struct BreakGridProgram<'a> {
    grid: &'a BreakGrid,
    breaks: &'a [Break],
}

impl<'a> Program<BreakGridMessage> for BreakGridProgram<'a> {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        let grid_height = self.grid.grid_height();

        // Grid background
        frame.fill_rectangle(
            Point::new(LABEL_GUTTER, 0.0),
            iced::Size::new(GRID_WIDTH, grid_height),
            Color::from_rgb(0.68, 0.85, 0.90),
        );

        // Hour ruler along the left edge
        for (hour, row) in self.grid.hour_label_rows() {
            frame.stroke(
                &Path::line(
                    Point::new(10.0, row),
                    Point::new(LABEL_GUTTER + GRID_WIDTH, row),
                ),
                Stroke::default()
                    .with_color(Color::from_rgb(0.3, 0.3, 0.3))
                    .with_width(1.0),
            );

            frame.fill_text(Text {
                content: hour.to_string(),
                position: Point::new(10.0, (row - 14.0).max(0.0)),
                color: Color::from_rgb(0.2, 0.2, 0.2),
                size: iced::Pixels(12.0),
                ..Text::default()
            });
        }

        // Break intervals
        for (index, b) in self.breaks.iter().enumerate() {
            let top = self.grid.scale().offset_of(b.start);
            let height = self.grid.scale().offset_of(b.duration);
            let selected = self.grid.editor() == EditorState::Editing(index);

            let fill = if selected {
                Color::from_rgb(0.95, 0.65, 0.35)
            } else {
                Color::from_rgb(0.98, 0.80, 0.45)
            };
            frame.fill_rectangle(
                Point::new(LABEL_GUTTER, top),
                iced::Size::new(GRID_WIDTH, height),
                fill,
            );

            frame.fill_text(Text {
                content: format!("Break at {}", b.start),
                position: Point::new(LABEL_GUTTER + 8.0, top + 2.0),
                color: Color::from_rgb(0.25, 0.15, 0.0),
                size: iced::Pixels(11.0),
                ..Text::default()
            });
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        _state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> (canvas::event::Status, Option<BreakGridMessage>) {
        match event {
            canvas::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                if let Some(position) = cursor.position_in(bounds) {
                    // Only presses inside the grid area count, not the gutter.
                    let inside_grid = position.x >= LABEL_GUTTER
                        && position.x <= LABEL_GUTTER + GRID_WIDTH
                        && position.y <= self.grid.grid_height();
                    if inside_grid {
                        if let Some(message) = self.grid.handle_press(position.y, self.breaks) {
                            return (canvas::event::Status::Captured, Some(message));
                        }
                        return (canvas::event::Status::Captured, None);
                    }
                }
                (canvas::event::Status::Ignored, None)
            }
            _ => (canvas::event::Status::Ignored, None),
        }
    }
}
