// Observer Port - reaction to subject state changes

/// Reaction to a change of a subject of type `S`
///
/// `A` is the optional change description; it defaults to the subject type.
/// A type may observe several subject types by implementing this trait once
/// per `(S, A)` pair.
///
/// # Example
/// ```text
/// struct RenameLogger;
///
/// impl Observer<Module, ModuleEvent> for RenameLogger {
///     fn update(&self, module: &Module, event: Option<&ModuleEvent>) {
///         if let Some(ModuleEvent::Renamed { from, to }) = event {
///             info!(module_id = %module.id(), %from, %to, "Module renamed");
///         }
///     }
/// }
/// ```
pub trait Observer<S: ?Sized, A: ?Sized = S>: Send + Sync {
    /// `subject` has changed its state
    ///
    /// By default, it does nothing.
    fn update(&self, subject: &S, arg: Option<&A>) {
        let _ = (subject, arg);
    }
}
