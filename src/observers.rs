/// Receives layout notices from a [`crate::BookTable`].
///
/// Both hooks fire exactly once per applied sort, in order, so a view can drop
/// row-based state (selection, scroll anchors) before the rows move and
/// reacquire it afterwards.
pub trait LayoutObserver {
    /// Called right before the rows are reordered.
    fn layout_about_to_change(&self) {}

    /// Called after the new order is in place.
    fn layout_changed(&self);
}

/// Writes every layout notice to the tracing log.
#[derive(Debug)]
pub struct LayoutLogger;

impl LayoutObserver for LayoutLogger {
    fn layout_about_to_change(&self) {
        tracing::debug!("table layout about to change");
    }

    fn layout_changed(&self) {
        tracing::debug!("table layout changed");
    }
}
