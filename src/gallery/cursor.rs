use eframe::egui::Vec2;

/// Latest pointer position relative to the viewport center.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CursorField {
    pub position: Vec2,
    pub inside: bool,
}

impl CursorField {
    pub fn moved(&mut self, position: Vec2) {
        self.position = position;
        self.inside = true;
    }

    /// Keeps the last position; only the force field switches off.
    pub fn left(&mut self) {
        self.inside = false;
    }
}
