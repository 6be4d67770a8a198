use crate::suggest::SourceId;

/// Completion list shown under the field. Only candidates from the bound
/// source are accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionPopup {
    bound: Option<SourceId>,
    items: Vec<String>,
    selected: Option<usize>,
    open: bool,
}

impl CompletionPopup {
    pub fn bind(&mut self, source: SourceId) {
        self.bound = Some(source);
        self.clear();
    }

    pub fn unbind(&mut self) {
        self.bound = None;
        self.clear();
    }

    pub fn bound_source(&self) -> Option<SourceId> {
        self.bound
    }

    /// Replaces the rows; the popup opens when `show` is set and there is
    /// something to show.
    pub fn set_candidates(&mut self, source: SourceId, candidates: &[String], show: bool) -> bool {
        if self.bound != Some(source) {
            return false;
        }
        self.items = candidates.to_vec();
        self.selected = None;
        self.open = show && !self.items.is_empty();
        true
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.selected = None;
        self.open = false;
    }

    /// Returns whether the popup was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        self.selected = None;
        was_open
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select_next(&mut self) {
        if !self.open || self.items.is_empty() {
            return;
        }
        let last = self.items.len() - 1;
        self.selected = Some(match self.selected {
            None => 0,
            Some(index) => (index + 1).min(last),
        });
    }

    pub fn select_prev(&mut self) {
        if !self.open {
            return;
        }
        self.selected = match self.selected {
            None | Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    pub fn selected_text(&self) -> Option<&str> {
        let index = self.selected?;
        self.items.get(index).map(String::as_str)
    }
}
