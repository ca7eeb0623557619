//! Path templates for the sobjects REST endpoints.
//!
//! The collection segment is the type name exactly as given. Nothing here
//! pluralizes: `Account` stays `Account`, never `Accounts`.

/// Root of the REST API, listing available versions.
pub const VERSIONS_ROOT: &str = "/services/data/";

/// `/services/data/{version}/`
pub fn resources_root(version: &str) -> String {
    format!("{VERSIONS_ROOT}{version}/")
}

/// `/services/data/{version}/sobjects/`
pub fn sobjects_root(version: &str) -> String {
    format!("{}sobjects/", resources_root(version))
}

/// `/services/data/{version}/sobjects/{Type}/`
pub fn sobject_collection(version: &str, type_name: &str) -> String {
    format!("{}{type_name}/", sobjects_root(version))
}

/// `/services/data/{version}/sobjects/{Type}/{id}`
pub fn sobject_element(version: &str, type_name: &str, id: &str) -> String {
    format!("{}{id}", sobject_collection(version, type_name))
}

/// `/services/data/{version}/sobjects/{Type}/describe`
pub fn sobject_describe(version: &str, type_name: &str) -> String {
    format!("{}describe", sobject_collection(version, type_name))
}

/// `/services/data/{version}/query?q={query}`; `query` is inserted as is.
pub fn soql(version: &str, query: &str) -> String {
    format!("{}query?q={query}", resources_root(version))
}

/// `/services/data/{version}/search/?q={search}`; `search` is inserted as is.
pub fn sosl(version: &str, search: &str) -> String {
    format!("{}search/?q={search}", resources_root(version))
}

/// `{prefix}{collection}/{id}{query}` with no format extension.
pub fn element_path(prefix: &str, collection: &str, id: &str, query: &[(&str, &str)]) -> String {
    format!("{prefix}{collection}/{id}{}", query_string(query))
}

/// `{prefix}{collection}{query}` with no format extension.
pub fn collection_path(prefix: &str, collection: &str, query: &[(&str, &str)]) -> String {
    format!("{prefix}{collection}{}", query_string(query))
}

/// Render options as `?k=v&k2=v2`, sorted by key, values URL-encoded.
/// Empty options render as an empty string.
fn query_string(query: &[(&str, &str)]) -> String {
    if query.is_empty() {
        return String::new();
    }
    let mut pairs: Vec<_> = query.to_vec();
    pairs.sort_by(|a, b| a.0.cmp(b.0));
    let rendered: Vec<String> = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect();
    format!("?{}", rendered.join("&"))
}
