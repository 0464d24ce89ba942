//! Download URL resolution for document references.
//!
//! The API returns attachments either as absolute URLs or as bare file
//! names. Bare names are served from the static uploads directory that
//! sits next to the `/api` prefix:
//!
//! ```text
//! base_url  = http://host:3000/api
//! reference = certificado.pdf
//! resolved  = http://host:3000/uploads/certificado.pdf
//! ```

/// Path under the server root where uploaded documents are served.
pub const UPLOADS_PATH: &str = "/uploads/";

/// Resolves a document reference to a URL the user can open.
///
/// Returns `None` for empty references.
pub fn resolve_document_url(base_url: &str, reference: &str) -> Option<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }

    if reference.starts_with("http://") || reference.starts_with("https://") {
        return Some(reference.to_string());
    }

    let base = base_url.trim_end_matches('/');
    let root = base.strip_suffix("/api").unwrap_or(base);
    let file = reference.trim_start_matches('/');
    let file = file.strip_prefix("uploads/").unwrap_or(file);

    Some(format!("{root}{UPLOADS_PATH}{file}"))
}
