use crate::store::scheme::LabelScheme;

/// Cursor-plus-selector state machine behind the interactive viewer.
///
/// `selected` mirrors the radio group: the space-bar toggle only cycles it;
/// committing the value to the store is the GUI's job.
pub struct ViewerState {
    current: usize,
    count: usize,
    pub selected: Option<i64>,
}

impl ViewerState {
    pub fn new(starting_segment: usize, count: usize) -> Self {
        Self {
            current: starting_segment,
            count,
            selected: None,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Advance the cursor; a no-op at the last valid segment. Returns whether
    /// the segment changed.
    pub fn next(&mut self) -> bool {
        if self.current + 1 < self.count {
            self.current += 1;
            true
        } else {
            false
        }
    }

    /// Step the cursor back; a no-op at segment 0.
    pub fn prev(&mut self) -> bool {
        if self.current > 0 {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    /// Cycle the selector through the scheme's categories without writing
    /// anything.
    pub fn toggle(&mut self, scheme: &LabelScheme) {
        self.selected = Some(scheme.next_category(self.selected));
    }

    /// Re-derive the selector from the stored value after a segment change.
    pub fn refresh(&mut self, stored: Option<i64>, scheme: &LabelScheme) {
        self.selected = scheme.selector_for(stored);
    }
}
