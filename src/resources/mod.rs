//! Declared resources and the check-then-apply contract they share.
pub mod file_line;

use anyhow::Result;

/// How the file currently relates to a declaration.
///
/// # Examples
///
/// ```
/// use file_line::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let correct = ResourceState::Correct;
/// let extra = ResourceState::Incorrect { current: "2 occurrence(s)".into() };
///
/// assert_ne!(missing, correct);
/// assert_ne!(extra, correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// The declared line is not in the file (or the file does not exist).
    Missing,
    /// Nothing to do.
    Correct,
    /// The file holds something the declaration forbids.
    Incorrect {
        /// What is there now, for log messages.
        current: String,
    },
}

/// Outcome of [`Resource::apply`].
///
/// # Examples
///
/// ```
/// use file_line::resources::ResourceChange;
///
/// let applied = ResourceChange::Applied;
/// let noop = ResourceChange::AlreadyCorrect;
///
/// assert_eq!(applied, ResourceChange::Applied);
/// assert_ne!(applied, noop);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceChange {
    /// The file was written.
    Applied,
    /// The file was left as it was.
    AlreadyCorrect,
}

/// Something on disk that can be compared with its declaration and brought
/// into line with it.
///
/// Callers check [`current_state`](Resource::current_state) first; only a
/// resource that is not [`Correct`](ResourceState::Correct) is previewed
/// with [`would_change`](Resource::would_change) or converged with
/// [`apply`](Resource::apply).
pub trait Resource {
    /// Human-readable description used in logs and the run summary.
    fn description(&self) -> String;

    /// Inspect the file and report how it relates to the declaration.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Return `true` if [`apply`](Resource::apply) would write anything.
    ///
    /// A resource can be out of state and still have nothing to write, for
    /// example when its placement policy declines to add the line.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be computed.
    fn would_change(&self) -> Result<bool>;

    /// Bring the resource into its declared state.
    ///
    /// # Errors
    ///
    /// Returns an error if the change cannot be computed or written.
    fn apply(&self) -> Result<ResourceChange>;
}
