//! Namespace paths for reported errors
//!
//! A namespace addresses one position in the validated object graph. Struct
//! boundaries are dotted and sequence or map elements are bracketed:
//!
//! ```text
//! Order.Customer.Email
//! Order.Items[2].Sku
//! Config.Limits[burst]
//! ```
//!
//! Every position has two spellings. The *display* namespace uses display
//! names (for example serialized keys), the *actual* namespace uses the
//! struct field names. [`Namespace`] keeps both in lockstep.
//!
//! # Examples
//!
//! ```
//! use plumbline::namespace::Namespace;
//!
//! let mut ns = Namespace::new();
//! ns.push_field("User", "User");
//! ns.push_field("addresses", "Addresses");
//! ns.push_index(2);
//! ns.push_field("zip", "Zip");
//!
//! assert_eq!(ns.display(), "User.addresses[2].zip");
//! assert_eq!(ns.actual(), "User.Addresses[2].Zip");
//! ```

/// Join a namespace suffix onto a base using the path grammar.
///
/// Bracketed suffixes attach directly, anything else is separated by a dot.
/// Empty sides are ignored, as are stray dots at the seam.
///
/// ```
/// use plumbline::namespace::join;
///
/// assert_eq!(join("Order", "Customer"), "Order.Customer");
/// assert_eq!(join("Order.Items", "[0]"), "Order.Items[0]");
/// assert_eq!(join("", "Email"), "Email");
/// assert_eq!(join("Order.", "Email"), "Order.Email");
/// assert_eq!(join("Order", ""), "Order");
/// ```
pub fn join(base: &str, suffix: &str) -> String {
    let base = base.trim_end_matches('.');
    let suffix = suffix.trim_start_matches('.');

    if suffix.is_empty() {
        return base.to_string();
    }
    if base.is_empty() {
        return suffix.to_string();
    }

    let mut joined = String::with_capacity(base.len() + suffix.len() + 1);
    joined.push_str(base);
    if !suffix.starts_with('[') {
        joined.push('.');
    }
    joined.push_str(suffix);
    joined
}

/// Paired display/actual path segments for the current traversal position.
///
/// Both stacks always hold the same number of segments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    display: Vec<String>,
    actual: Vec<String>,
}

impl Namespace {
    /// An empty namespace (the position of the root value).
    pub fn new() -> Self {
        Self::default()
    }

    /// Descend into a struct field.
    pub fn push_field(&mut self, display: &str, actual: &str) {
        self.display.push(display.to_string());
        self.actual.push(actual.to_string());
    }

    /// Descend into a sequence element.
    pub fn push_index(&mut self, index: usize) {
        let segment = format!("[{}]", index);
        self.display.push(segment.clone());
        self.actual.push(segment);
    }

    /// Descend into a map entry.
    pub fn push_key(&mut self, key: &str) {
        let segment = format!("[{}]", key);
        self.display.push(segment.clone());
        self.actual.push(segment);
    }

    /// Ascend one level. No-op at the root.
    pub fn pop(&mut self) {
        self.display.pop();
        self.actual.pop();
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        debug_assert_eq!(self.display.len(), self.actual.len());
        self.display.len()
    }

    /// Whether this is the root position.
    pub fn is_empty(&self) -> bool {
        self.depth() == 0
    }

    /// Render the display namespace.
    pub fn display(&self) -> String {
        render(&self.display)
    }

    /// Render the actual (struct field) namespace.
    pub fn actual(&self) -> String {
        render(&self.actual)
    }
}

fn render(segments: &[String]) -> String {
    segments
        .iter()
        .fold(String::new(), |acc, segment| join(&acc, segment))
}
