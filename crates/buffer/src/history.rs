/// Reversible edit recorded by the buffer.
///
/// Positions are char offsets into the rope at the time the edit happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Insert { at: usize, text: String },
    Delete { at: usize, text: String },
    /// Edits that undo and redo as one step (selection replacement, whole-text rewrite)
    Group { actions: Vec<Action> },
}

impl Action {
    /// Get inverse action
    pub fn inverse(&self) -> Action {
        match self {
            Action::Insert { at, text } => Action::Delete {
                at: *at,
                text: text.clone(),
            },
            Action::Delete { at, text } => Action::Insert {
                at: *at,
                text: text.clone(),
            },
            Action::Group { actions } => Action::Group {
                actions: actions.iter().rev().map(Action::inverse).collect(),
            },
        }
    }

    /// Check if `other`, recorded right after `self`, continues the same typing run
    pub fn can_merge_with(&self, other: &Action) -> bool {
        match (self, other) {
            (Action::Insert { at: at1, text: text1 }, Action::Insert { at: at2, text: text2 }) => {
                is_single_char(text2)
                    && !text1.contains('\n')
                    && *at2 == at1 + text1.chars().count()
            }
            (Action::Delete { at: at1, text: text1 }, Action::Delete { at: at2, text: text2 }) => {
                if !is_single_char(text2) || text1.contains('\n') {
                    return false;
                }
                // Backspace run moves left, Delete-key run stays put
                *at2 + 1 == *at1 || at2 == at1
            }
            _ => false,
        }
    }

    /// Merge with another action
    pub fn merge(&mut self, other: Action) {
        match (self, other) {
            (Action::Insert { text: text1, .. }, Action::Insert { text: text2, .. }) => {
                text1.push_str(&text2);
            }
            (Action::Delete { at, text: text1 }, Action::Delete { at: at2, text: text2 }) => {
                if at2 < *at {
                    *at = at2;
                    text1.insert_str(0, &text2);
                } else {
                    text1.push_str(&text2);
                }
            }
            _ => {}
        }
    }
}

fn is_single_char(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c != '\n')
}

/// Edit history for undo/redo
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Action>,
    redo_stack: Vec<Action>,
    max_size: usize,
    /// Typing run still being accumulated
    pending_action: Option<Action>,
}

impl History {
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_size: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_size,
            pending_action: None,
        }
    }

    /// Record action to history
    pub fn push(&mut self, action: Action) {
        self.redo_stack.clear();

        match self.pending_action.take() {
            Some(mut pending) if pending.can_merge_with(&action) => {
                pending.merge(action);
                self.pending_action = Some(pending);
                return;
            }
            Some(pending) => self.undo_stack.push(pending),
            None => {}
        }

        self.pending_action = Some(action);

        if self.undo_stack.len() > self.max_size {
            self.undo_stack.remove(0);
        }
    }

    /// Close the current typing run (caret moved, selection changed)
    pub fn commit_pending(&mut self) {
        if let Some(action) = self.pending_action.take() {
            self.undo_stack.push(action);
        }
    }

    /// Pop the last edit and return the action that reverts it
    pub fn undo(&mut self) -> Option<Action> {
        self.commit_pending();

        let action = self.undo_stack.pop()?;
        let inverse = action.inverse();
        self.redo_stack.push(action);
        Some(inverse)
    }

    /// Pop the last undone edit and return it for replay
    pub fn redo(&mut self) -> Option<Action> {
        self.commit_pending();

        let action = self.redo_stack.pop()?;
        self.undo_stack.push(action.clone());
        Some(action)
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.pending_action = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
