use std::cell::Cell;
use std::rc::Rc;

use crate::observers::LayoutObserver;
use crate::table::Column;

/// Column and direction of the last applied sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SortState {
    pub(crate) column: Column,
    pub(crate) ascending: bool,
}

impl SortState {
    /// Pressing the active column flips direction; any other column starts
    /// ascending.
    pub(crate) fn next(current: Option<SortState>, column: Column) -> SortState {
        match current {
            Some(state) if state.column == column => SortState {
                column,
                ascending: !state.ascending,
            },
            _ => SortState {
                column,
                ascending: true,
            },
        }
    }

    pub(crate) fn arrow(&self) -> &'static str {
        if self.ascending {
            "▲"
        } else {
            "▼"
        }
    }
}

/// Raises a shared flag whenever the table reorders, telling the app its row
/// selection must be reacquired.
pub(crate) struct SelectionReset {
    flag: Rc<Cell<bool>>,
}

impl SelectionReset {
    pub(crate) fn new(flag: Rc<Cell<bool>>) -> Self {
        Self { flag }
    }
}

impl LayoutObserver for SelectionReset {
    fn layout_about_to_change(&self) {
        self.flag.set(false);
    }

    fn layout_changed(&self) {
        self.flag.set(true);
    }
}
