//! Schema document loading.
//!
//! A [`SchemaDocument`] is the raw SDL source of one independently-authored
//! schema file plus an origin identifier used in conflict reports. The two
//! documents the bridge ships are embedded in the binary; documents can also
//! be loaded from an external location, in which case a load failure is
//! fatal to startup.

use std::path::Path;

use crate::error::GraphQLError;

/// Origin identifier of the vendor-neutral CDP schema document.
pub const CDP_SCHEMA_ORIGIN: &str = "cdp-schema.graphqls";

/// Origin identifier of the Unomi implementation schema document.
pub const UNOMI_SCHEMA_ORIGIN: &str = "unomi-schema.graphqls";

/// Raw schema source text plus its origin identifier.
///
/// Immutable once created; parsing happens during the merge.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    /// Where the document came from, used in conflict reports.
    pub origin: String,
    /// The SDL source text.
    pub source: String,
}

impl SchemaDocument {
    /// Creates a document from in-memory source.
    #[must_use]
    pub fn new(origin: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Loads a document from a file path. The file name becomes the origin.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaResource` if the file cannot be read;
    /// callers treat this as fatal to startup.
    pub fn load(path: &Path) -> Result<Self, GraphQLError> {
        let origin = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let source = std::fs::read_to_string(path).map_err(|e| GraphQLError::SchemaResource {
            origin: origin.clone(),
            message: e.to_string(),
        })?;

        Ok(Self { origin, source })
    }
}

/// The two schema documents embedded in the bridge, in merge order: the
/// vendor-neutral CDP document first, the Unomi implementation document
/// second.
#[must_use]
pub fn embedded_documents() -> Vec<SchemaDocument> {
    vec![
        SchemaDocument::new(
            CDP_SCHEMA_ORIGIN,
            include_str!("../../schema/cdp-schema.graphqls"),
        ),
        SchemaDocument::new(
            UNOMI_SCHEMA_ORIGIN,
            include_str!("../../schema/unomi-schema.graphqls"),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_documents_present_in_merge_order() {
        let docs = embedded_documents();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].origin, CDP_SCHEMA_ORIGIN);
        assert_eq!(docs[1].origin, UNOMI_SCHEMA_ORIGIN);
        assert!(docs[0].source.contains("CDP_Query"));
        assert!(docs[1].source.contains("Unomi_PageViewEvent"));
    }

    #[test]
    fn test_load_missing_file_is_schema_resource_error() {
        let err = SchemaDocument::load(Path::new("/nonexistent/missing.graphqls")).unwrap_err();
        assert!(matches!(err, GraphQLError::SchemaResource { .. }));
        assert!(err.is_fatal());
    }
}
