//! Typed event topics.
//!
//! An event is a marker type implementing [`EventKind`]; its payload type is
//! fixed at the type level. The closed set of events a scope understands is
//! simply the set of marker types the caller defines, so a subscriber can
//! never receive a payload typed for a different event.

/// Marker trait declaring one event and its payload type.
///
/// # Example
/// ```
/// use hookset::EventKind;
///
/// struct UserLoggedIn;
///
/// impl EventKind for UserLoggedIn {
///     type Payload = String;
///
///     fn name() -> &'static str {
///         "user_logged_in"
///     }
/// }
/// ```
pub trait EventKind: 'static {
    /// Payload delivered to subscribers of this event.
    type Payload: Send + Sync + 'static;

    /// Human-readable event name (for logs).
    fn name() -> &'static str {
        std::any::type_name::<Self>()
    }
}
