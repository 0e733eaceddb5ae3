//! Example program catalog
//!
//! The catalog is a two-tier source: the active backend is asked first, and
//! any failure or empty reply degrades to the built-in list below so the
//! editor is never empty, even fully offline.

use crate::backend::Backend;
use crate::inputs::StackInputs;
use tracing::warn;

/// A named example program with its default input payload
///
/// The default inputs are an explicit field here; backends that only ship
/// `(name, source)` pairs get them assigned from [`preset_inputs`] when the
/// pairs are converted to entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleEntry {
    pub name: String,
    pub source: String,
    pub inputs: StackInputs,
}

impl ExampleEntry {
    fn new(name: &str, source: &str, inputs: StackInputs) -> Self {
        Self {
            name: name.to_string(),
            source: source.to_string(),
            inputs,
        }
    }
}

/// Default input payload for a catalog entry, by naming convention
///
/// Entries whose name contains one of the designated substrings get a
/// preset operand stack; everything else starts from the empty stack.
pub fn preset_inputs(name: &str) -> StackInputs {
    const PRESETS: &[(&str, &[&str])] = &[
        ("Input Stack Demo", &["10", "20"]),
        ("Input Stack Add", &["10", "20"]),
        ("Counter with Input", &["7"]),
        ("Prime Generator", &["10"]),
    ];

    for (needle, tokens) in PRESETS {
        if name.contains(needle) {
            return StackInputs::from_tokens(tokens.iter().copied());
        }
    }
    StackInputs::empty()
}

/// Load the example catalog through the given backend
///
/// Never fails: an erroring or empty primary source falls back to the
/// built-in list.
pub async fn load(backend: &dyn Backend) -> Vec<ExampleEntry> {
    match backend.list_examples().await {
        Ok(pairs) if !pairs.is_empty() => pairs
            .into_iter()
            .map(|(name, source)| {
                let inputs = preset_inputs(&name);
                ExampleEntry {
                    name,
                    source,
                    inputs,
                }
            })
            .collect(),
        Ok(_) => {
            warn!(backend = backend.name(), "Backend returned no examples, using built-in catalog");
            fallback_examples()
        }
        Err(e) => {
            warn!(backend = backend.name(), error = %e, "Failed to load examples, using built-in catalog");
            fallback_examples()
        }
    }
}

/// The built-in example catalog, usable entirely offline
pub fn fallback_examples() -> Vec<ExampleEntry> {
    vec![
        ExampleEntry::new(
            "Basic Addition",
            "# Adds 3 + 5 and leaves 8 on the stack\n\
             begin\n    push.3\n    push.5\n    add\n    swap\n    drop\nend",
            StackInputs::empty(),
        ),
        ExampleEntry::new(
            "Fibonacci (8th)",
            "# Computes the 8th Fibonacci number using a repeat loop\n\
             begin\n    push.1    # fib(1)\n    push.1    # fib(2)\n    push.6    # loop 6 times (8-2)\n    repeat.6\n        dup.1\n        add\n        swap\n    end\n    drop      # clean extra copy\nend",
            StackInputs::empty(),
        ),
        ExampleEntry::new(
            "Simple Loop Sum",
            "# Sums 0 to 9 -> result = 45\n\
             begin\n    push.0    # acc\n    push.10   # counter\n    repeat.10\n        dup add.1\n    end\n    drop\nend",
            StackInputs::empty(),
        ),
        ExampleEntry::new(
            "Conditional Example",
            "# Push 5 and 3, swap if 5 > 3 (which is true)\n\
             begin\n    push.5\n    push.3\n    dup.1 gt\n    if.true\n        swap\n    end\nend",
            StackInputs::empty(),
        ),
        ExampleEntry::new(
            "Stack Manipulation",
            "# Demonstrates swap.2 and dup\n\
             begin\n    push.1\n    push.2\n    push.3\n    push.4\n    swap.2\n    drop\n    dup\nend",
            StackInputs::empty(),
        ),
        ExampleEntry::new(
            "Memory Operations",
            "# Stores 42 in memory at index 0 and loads it back\n\
             begin\n    push.42\n    push.0\n    mem_store\n    push.0\n    mem_load\nend",
            StackInputs::empty(),
        ),
        ExampleEntry::new(
            "Prime Generator (nprime)",
            "# Outputs the first n primes (n from input)\n\
             # Provide input like: { \"operand_stack\": [\"10\"] }\n\
             begin\n    nprime\nend",
            StackInputs::from_tokens(["10"]),
        ),
        ExampleEntry::new(
            "Input Stack Add",
            "# Adds two input values\n\
             # Input: { \"operand_stack\": [\"10\", \"20\"] }\n\
             begin\n    add\nend",
            StackInputs::from_tokens(["10", "20"]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendError, ExamplePair, ExecutionResult, HealthStatus, ProofResult};
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// Backend double whose catalog call is scripted
    struct CatalogBackend {
        examples: Result<Vec<ExamplePair>, ()>,
    }

    #[async_trait]
    impl Backend for CatalogBackend {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn execute(&self, _: &str, _: Option<&StackInputs>) -> ExecutionResult {
            unreachable!("catalog tests never execute")
        }

        async fn prove(&self, _: &str, _: Option<&StackInputs>) -> ProofResult {
            unreachable!("catalog tests never prove")
        }

        async fn list_examples(&self) -> Result<Vec<ExamplePair>, BackendError> {
            self.examples
                .clone()
                .map_err(|_| BackendError::Bridge("scripted failure".to_string()))
        }

        async fn health_check(&self) -> HealthStatus {
            HealthStatus {
                connected: true,
                latency_ms: None,
                error: None,
            }
        }
    }

    #[test]
    fn test_fallback_is_nonempty_with_unique_names() {
        let examples = fallback_examples();
        assert!(examples.len() >= 8);

        let names: HashSet<_> = examples.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names.len(), examples.len());
    }

    #[test]
    fn test_fallback_covers_expected_programs() {
        let examples = fallback_examples();
        for needle in [
            "Basic Addition",
            "Fibonacci",
            "Loop Sum",
            "Conditional",
            "Stack Manipulation",
            "Memory Operations",
            "Prime Generator",
            "Input Stack Add",
        ] {
            assert!(
                examples.iter().any(|e| e.name.contains(needle)),
                "missing fallback example: {needle}"
            );
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(
            preset_inputs("Input Stack Demo"),
            StackInputs::from_tokens(["10", "20"])
        );
        assert_eq!(
            preset_inputs("Counter with Input"),
            StackInputs::from_tokens(["7"])
        );
        assert_eq!(
            preset_inputs("Prime Generator (nprime)"),
            StackInputs::from_tokens(["10"])
        );
        assert!(preset_inputs("Basic Addition").is_empty());
    }

    #[tokio::test]
    async fn test_load_converts_pairs_and_assigns_presets() {
        let backend = CatalogBackend {
            examples: Ok(vec![
                ("Basic Addition".to_string(), "begin add end".to_string()),
                ("Counter with Input".to_string(), "begin push.5 add end".to_string()),
            ]),
        };

        let entries = load(&backend).await;
        assert_eq!(entries.len(), 2);
        assert!(entries[0].inputs.is_empty());
        assert_eq!(entries[1].inputs, StackInputs::from_tokens(["7"]));
    }

    #[tokio::test]
    async fn test_load_falls_back_on_error() {
        let backend = CatalogBackend { examples: Err(()) };
        let entries = load(&backend).await;
        assert_eq!(entries, fallback_examples());
    }

    #[tokio::test]
    async fn test_load_falls_back_on_empty_reply() {
        let backend = CatalogBackend {
            examples: Ok(Vec::new()),
        };
        let entries = load(&backend).await;
        assert_eq!(entries, fallback_examples());
    }
}
