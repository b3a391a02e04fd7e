use chouraqui_core::adjacency::VerseAdjacency;
use chouraqui_core::model::VerseRef;

/// Selected verse and, once resolved, its neighbours.
pub struct SelectionState {
    pub position: VerseRef,
    pub adjacency: Option<VerseAdjacency>,
}

impl SelectionState {
    pub fn new(position: VerseRef, adjacency: Option<VerseAdjacency>) -> Self {
        Self {
            position,
            adjacency: adjacency.filter(|adjacency| adjacency.position == position),
        }
    }

    /// Adjacency is only trusted for the position it was computed for.
    pub fn adjacency(&self) -> Option<&VerseAdjacency> {
        self.adjacency
            .as_ref()
            .filter(|adjacency| adjacency.position == self.position)
    }
}

/// Last geometry reported by the reader scrollable.
pub struct ViewportState {
    pub scroll_top: f32,
    pub width: f32,
    pub height: f32,
    /// `None` until the scrollable reports a measurement for the current
    /// content.
    pub content_height: Option<f32>,
}

impl ViewportState {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            scroll_top: 0.0,
            width,
            height,
            content_height: None,
        }
    }
}
