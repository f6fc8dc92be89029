//! Engine configuration

/// Options for a [`Validate`](crate::Validate) instance.
///
/// Configuration is plain data, fixed when the engine is built.
///
/// # Examples
///
/// ```rust
/// use plumbline::Config;
///
/// let config = Config::new()
///     .with_root_name(false)
///     .with_max_unwrap_depth(4);
///
/// assert!(!config.include_root_name());
/// assert_eq!(config.max_unwrap_depth(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    include_root_name: bool,
    max_unwrap_depth: usize,
}

impl Config {
    /// Default limit on chained custom-type unwraps.
    pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 32;

    /// Configuration with defaults: root type name included, default unwrap depth.
    pub fn new() -> Self {
        Config {
            include_root_name: true,
            max_unwrap_depth: Self::DEFAULT_MAX_UNWRAP_DEPTH,
        }
    }

    /// Whether namespaces start with the root struct's type name
    /// (`User.Name`) or with its first field (`Name`).
    pub fn with_root_name(mut self, include: bool) -> Self {
        self.include_root_name = include;
        self
    }

    /// Cap the number of custom-type unwraps applied to a single value.
    ///
    /// An unwrap function that keeps returning registered types stops here
    /// instead of looping forever.
    pub fn with_max_unwrap_depth(mut self, depth: usize) -> Self {
        self.max_unwrap_depth = depth;
        self
    }

    /// See [`Config::with_root_name`].
    pub fn include_root_name(&self) -> bool {
        self.include_root_name
    }

    /// See [`Config::with_max_unwrap_depth`].
    pub fn max_unwrap_depth(&self) -> usize {
        self.max_unwrap_depth
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
