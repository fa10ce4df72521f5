//! Two-button confirmation gate in front of a deferred action.

/// Which entity a delete dialog is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    ProjectDelete,
    TaskDelete,
    LogDelete,
}

impl DialogKind {
    pub fn title(self) -> &'static str {
        match self {
            DialogKind::ProjectDelete => "Delete project",
            DialogKind::TaskDelete => "Delete task",
            DialogKind::LogDelete => "Delete log",
        }
    }
}

/// The highlighted button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogChoice {
    #[default]
    Cancel,
    Confirm,
}

impl DialogChoice {
    fn toggled(self) -> Self {
        match self {
            DialogChoice::Cancel => DialogChoice::Confirm,
            DialogChoice::Confirm => DialogChoice::Cancel,
        }
    }
}

/// Input understood by a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKey {
    /// Move between the two buttons
    Toggle,
    /// Activate the highlighted button
    Submit,
    /// Confirm regardless of the highlighted button
    Accept,
    /// Close without acting
    Dismiss,
}

/// Result of feeding a key to a dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<A> {
    /// Still open, possibly with a moved cursor
    Open(ConfirmDialog<A>),
    /// Closed without running the action
    Dismissed,
    /// Closed; the caller must run this action
    Confirmed(A),
}

/// A modal confirm/cancel prompt bound to one action at open time.
///
/// The cursor always starts on Cancel, so a stray Enter never confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog<A> {
    kind: DialogKind,
    choice: DialogChoice,
    action: A,
}

impl<A> ConfirmDialog<A> {
    pub fn new(kind: DialogKind, action: A) -> Self {
        ConfirmDialog {
            kind,
            choice: DialogChoice::Cancel,
            action,
        }
    }

    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    pub fn choice(&self) -> DialogChoice {
        self.choice
    }

    pub fn action(&self) -> &A {
        &self.action
    }

    pub fn handle(mut self, key: DialogKey) -> DialogOutcome<A> {
        match key {
            DialogKey::Toggle => {
                self.choice = self.choice.toggled();
                DialogOutcome::Open(self)
            }
            DialogKey::Submit => match self.choice {
                DialogChoice::Confirm => DialogOutcome::Confirmed(self.action),
                DialogChoice::Cancel => DialogOutcome::Dismissed,
            },
            DialogKey::Accept => DialogOutcome::Confirmed(self.action),
            DialogKey::Dismiss => DialogOutcome::Dismissed,
        }
    }
}
