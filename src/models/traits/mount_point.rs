/// The element a widget is mounted under.
pub trait MountPoint: Send + Sync {
    /// Removes whatever a previous widget left under this element.
    fn clear(&self);
}
