//! Route path to template classification.

use bizboost_model::TemplateId;

/// Derive the template context of a route path.
///
/// Query strings and fragments are stripped first, then the path is matched
/// against each template's base path in [`TemplateId::ALL`] order. Matching
/// is a plain prefix test, so trailing slashes and sub-pages classify the
/// same as the bare prefix.
pub fn classify(path: &str) -> Option<TemplateId> {
    let path = strip_suffixes(path);
    TemplateId::ALL
        .into_iter()
        .find(|template| path.starts_with(template.base_path()))
}

fn strip_suffixes(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    &path[..end]
}
