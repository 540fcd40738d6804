//! Structural policy configuration for diagrams.
//!
//! Two structural questions have no single right answer for an editor:
//! whether a line may loop from a vertex back to itself, and whether two
//! vertices may be connected by more than one line. Both are policy, not
//! invariants, so they are configurable here. The type implements
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Example
//!
//! ```
//! # use feyngraph::config::DiagramPolicy;
//! let policy = DiagramPolicy::default();
//! assert!(!policy.allow_self_loops());
//! assert!(policy.allow_parallel_lines());
//! ```

use serde::Deserialize;

/// Structural policy applied by the integrity layer.
///
/// Defaults: self-loops rejected, parallel lines allowed. Loop corrections
/// routinely need two propagators between the same pair of vertices, so the
/// permissive parallel default matches editing practice; self-loops have no
/// editing gesture and stay off unless a caller opts in.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DiagramPolicy {
    /// Permit lines whose endpoints are the same vertex.
    #[serde(default)]
    allow_self_loops: bool,

    /// Permit more than one line between the same pair of vertices.
    #[serde(default = "default_allow_parallel")]
    allow_parallel_lines: bool,
}

fn default_allow_parallel() -> bool {
    true
}

impl Default for DiagramPolicy {
    fn default() -> Self {
        Self {
            allow_self_loops: false,
            allow_parallel_lines: true,
        }
    }
}

impl DiagramPolicy {
    /// Creates a policy with explicit settings.
    ///
    /// # Arguments
    ///
    /// * `allow_self_loops` - Permit lines from a vertex to itself.
    /// * `allow_parallel_lines` - Permit multiple lines between one vertex pair.
    pub fn new(allow_self_loops: bool, allow_parallel_lines: bool) -> Self {
        Self {
            allow_self_loops,
            allow_parallel_lines,
        }
    }

    /// Whether lines from a vertex to itself are permitted.
    pub fn allow_self_loops(&self) -> bool {
        self.allow_self_loops
    }

    /// Whether multiple lines between the same vertex pair are permitted.
    pub fn allow_parallel_lines(&self) -> bool {
        self.allow_parallel_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = DiagramPolicy::default();
        assert!(!policy.allow_self_loops());
        assert!(policy.allow_parallel_lines());
    }

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let policy: DiagramPolicy = toml::from_str("").unwrap();
        assert!(!policy.allow_self_loops());
        assert!(policy.allow_parallel_lines());
    }

    #[test]
    fn test_deserialize_overrides() {
        let policy: DiagramPolicy = toml::from_str(
            "allow_self_loops = true\nallow_parallel_lines = false\n",
        )
        .unwrap();
        assert!(policy.allow_self_loops());
        assert!(!policy.allow_parallel_lines());
    }
}
