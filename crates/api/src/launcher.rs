use crate::error::BoxError;
use crate::models::{LaunchExtras, TargetDescriptor};

/// External collaborator that starts a resolved target (window, screen,
/// worker...). The router only hands over the descriptor and marshalled extras.
pub trait Launcher: Send + Sync {
    fn start(&self, descriptor: &TargetDescriptor, extras: &LaunchExtras) -> Result<(), BoxError>;
}
