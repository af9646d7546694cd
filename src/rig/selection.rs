use super::joint::JointId;

/// Outcome of a selection, so the host can move the highlight from the
/// previous component to the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Option<JointId>,
    pub current: JointId,
}

/// The single currently selected joint, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<JointId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<JointId> {
        self.selected
    }

    pub fn is_selected(&self, id: JointId) -> bool {
        self.selected == Some(id)
    }

    pub fn select(&mut self, id: JointId) -> SelectionChange {
        let previous = self.selected.replace(id);
        SelectionChange { previous, current: id }
    }

    pub fn clear(&mut self) -> Option<JointId> {
        self.selected.take()
    }
}
