use egui::{Context, Pos2, Rect, Response};

/// A primary-button pointer event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button was pressed over the surface
    Down(Pos2),
    /// Pointer moved, with or without the button held
    Move(Pos2),
    /// Button was released, anywhere
    Up(Pos2),
}

impl PointerEvent {
    pub fn position(&self) -> Pos2 {
        match self {
            Self::Down(pos) | Self::Move(pos) | Self::Up(pos) => *pos,
        }
    }
}

/// One frame's worth of raw pointer input, in screen coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub pressed: bool,
    pub released: bool,
    /// Another layer (a window, a modal) is on top of the surface under the pointer
    pub covered: bool,
}

/// Converts raw egui input into [`PointerEvent`]s relative to the surface
#[derive(Debug, Clone)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    surface_rect: Rect,
}

impl InputHandler {
    pub fn new(surface_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            surface_rect,
        }
    }

    /// Update where the surface is on screen (e.g. after a scroll or resize)
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface_rect = rect;
    }

    pub fn surface_rect(&self) -> Rect {
        self.surface_rect
    }

    /// Screen position to surface position
    pub fn to_surface(&self, pos: Pos2) -> Pos2 {
        pos - self.surface_rect.min.to_vec2()
    }

    /// Process raw egui input and generate pointer events.
    ///
    /// `response` is the surface's own response; presses that land on
    /// whatever covers it are not forwarded.
    pub fn process_input(&mut self, ctx: &Context, response: &Response) -> Vec<PointerEvent> {
        let sample = ctx.input(|input| PointerSample {
            position: input.pointer.latest_pos(),
            pressed: input.pointer.primary_pressed(),
            released: input.pointer.primary_released(),
            covered: !response.contains_pointer(),
        });
        self.interpret(sample)
    }

    /// Turn a sample into events: the move first, then press, then release
    pub fn interpret(&mut self, sample: PointerSample) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let Some(pos) = sample.position else {
            return events;
        };

        if Some(pos) != self.last_pointer_pos {
            events.push(PointerEvent::Move(self.to_surface(pos)));
            self.last_pointer_pos = Some(pos);
        }
        if sample.pressed && !sample.covered && self.surface_rect.contains(pos) {
            events.push(PointerEvent::Down(self.to_surface(pos)));
        }
        if sample.released {
            events.push(PointerEvent::Up(self.to_surface(pos)));
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn create_handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(Pos2::new(50.0, 20.0), Vec2::new(200.0, 100.0)))
    }

    #[test]
    fn test_positions_are_surface_relative() {
        let mut handler = create_handler();
        let events = handler.interpret(PointerSample {
            position: Some(Pos2::new(60.0, 30.0)),
            pressed: true,
            released: false,
            covered: false,
        });
        assert_eq!(
            events,
            vec![
                PointerEvent::Move(Pos2::new(10.0, 10.0)),
                PointerEvent::Down(Pos2::new(10.0, 10.0)),
            ]
        );
    }

    #[test]
    fn test_unchanged_position_is_not_a_move() {
        let mut handler = create_handler();
        let sample = PointerSample {
            position: Some(Pos2::new(70.0, 40.0)),
            ..Default::default()
        };
        assert_eq!(handler.interpret(sample).len(), 1);
        assert!(handler.interpret(sample).is_empty());
    }

    #[test]
    fn test_press_outside_surface_is_ignored() {
        let mut handler = create_handler();
        let events = handler.interpret(PointerSample {
            position: Some(Pos2::new(10.0, 10.0)),
            pressed: true,
            released: false,
            covered: false,
        });
        assert_eq!(events, vec![PointerEvent::Move(Pos2::new(-40.0, -10.0))]);
    }

    #[test]
    fn test_press_on_covering_window_is_ignored() {
        let mut handler = create_handler();
        let events = handler.interpret(PointerSample {
            position: Some(Pos2::new(60.0, 30.0)),
            pressed: true,
            released: false,
            covered: true,
        });
        assert_eq!(events, vec![PointerEvent::Move(Pos2::new(10.0, 10.0))]);

        // a release still ends a drag that started on the surface
        let events = handler.interpret(PointerSample {
            position: Some(Pos2::new(60.0, 30.0)),
            pressed: false,
            released: true,
            covered: true,
        });
        assert_eq!(events, vec![PointerEvent::Up(Pos2::new(10.0, 10.0))]);
    }

    #[test]
    fn test_release_outside_surface_is_forwarded() {
        let mut handler = create_handler();
        let events = handler.interpret(PointerSample {
            position: Some(Pos2::new(400.0, 10.0)),
            pressed: false,
            released: true,
            covered: false,
        });
        assert_eq!(events.last(), Some(&PointerEvent::Up(Pos2::new(350.0, -10.0))));
    }

    #[test]
    fn test_no_pointer_no_events() {
        let mut handler = create_handler();
        assert!(handler.interpret(PointerSample::default()).is_empty());
    }
}
