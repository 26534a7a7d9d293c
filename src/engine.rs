use std::time::Duration;

/// Lifecycle shared by every animated piece of the stage.
///
/// `update` is a no-op unless the widget is mounted, and `unmount` cancels
/// every timer the widget armed, so nothing changes after teardown.
pub trait Widget {
    fn mount(&mut self);
    fn update(&mut self, dt: Duration);
    fn unmount(&mut self);
    fn is_mounted(&self) -> bool;
}
