//! Domain layer constants
//!
//! Naming conventions shared by the fragment generator and the discovery
//! protocol. Discovery locates fragments by these names alone.

/// Reserved namespace every discoverable fragment is registered under
pub const DISCOVERY_NAMESPACE: &str = "waymark.generated";

/// Prefix of root fragments: `<Prefix>Root_<moduleName>`
pub const ROOT_FRAGMENT_PREFIX: &str = "Waymark_Root_";

/// Prefix of group fragments: `<Prefix>Group_<groupName>`
pub const GROUP_FRAGMENT_PREFIX: &str = "Waymark_Group_";

/// Suffix of injector fragments: `<TargetSimpleName>_Extra`
pub const EXTRA_FRAGMENT_SUFFIX: &str = "_Extra";

/// Path separator of the route grammar
pub const PATH_SEPARATOR: char = '/';

/// Default limit on nested service dependency resolution
pub const DEFAULT_MAX_DEPENDENCY_DEPTH: usize = 32;
