//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing an entity deletion.
#[derive(Clone, Copy, Debug)]
pub struct Deletion;

/// Marker type describing an entity registration.
#[derive(Clone, Copy, Debug)]
pub struct Registration;

/// Marker type describing a start of employment.
#[derive(Clone, Copy, Debug)]
pub struct Hiring;

/// Marker type describing an end of employment.
#[derive(Clone, Copy, Debug)]
pub struct Dismissal;

/// Marker type describing an issue of a document.
#[derive(Clone, Copy, Debug)]
pub struct Issue;
