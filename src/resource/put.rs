//! The put (out) operation, which this read-only resource does not offer

use std::path::Path;

use crate::error::ResourceError;

/// Always fails: versions are published by the Initializr instance, not by pipelines
pub fn run_put(_sources: &Path) -> Result<(), ResourceError> {
    Err(ResourceError::Unsupported("put"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_put_reports_unsupported_operation() {
        let result = run_put(Path::new("/tmp/build"));

        assert!(matches!(result, Err(ResourceError::Unsupported("put"))));
    }
}
