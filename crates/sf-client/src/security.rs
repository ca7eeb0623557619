//! Security utilities for building sobjects requests.
//!
//! The adapter inserts SOQL and SOSL strings into the URL exactly as given.
//! Callers are responsible for escaping literals and URL-encoding the whole
//! query before handing it over.
//!
//! ```rust
//! use asf_client::security::{soql, url};
//!
//! let name = soql::escape_string("O'Brien");
//! let query = format!("SELECT Id FROM Account WHERE Name = '{}'", name);
//! let encoded = url::encode_param(&query);
//! assert!(!encoded.contains(' '));
//! ```

/// SOQL escaping and identifier validation.
pub mod soql {
    /// Escape a string value for use in SOQL queries.
    ///
    /// Single quotes, backslashes, newlines, carriage returns and tabs are
    /// backslash-escaped.
    ///
    /// ```rust
    /// use asf_client::security::soql;
    ///
    /// let safe = soql::escape_string("O'Brien & Co.");
    /// assert_eq!(safe, "O\\'Brien & Co.");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Validate that a field name contains only safe characters.
    ///
    /// Names start with a letter and continue with letters, digits and
    /// underscores (so `Custom_Field__c` passes).
    ///
    /// ```rust
    /// use asf_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("Custom_Field__c"));
    /// assert!(!soql::is_safe_field_name("Bad'; DROP TABLE--"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {}
            _ => return false,
        }
        chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }

    /// Validate that a sobject type name is safe to put in a URL path.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }
}

/// URL encoding utilities.
pub mod url {
    /// URL-encode a parameter value.
    ///
    /// ```rust
    /// use asf_client::security::url;
    ///
    /// assert_eq!(url::encode_param("SELECT Id FROM Account"), "SELECT%20Id%20FROM%20Account");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }
}
