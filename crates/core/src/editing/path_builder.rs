//! Placeholder substitution for FOAAS operation templates.
//!
//! A template such as `/ballmer/:name/:company/:from` names its placeholders
//! with `:token` segments. The builder keeps the current value of every token
//! for one editing session and renders the request URL on demand.

use std::collections::HashMap;

use byt_domain::constants::{TOKEN_DELIMITER, TOKEN_PREFIX};
use byt_domain::FoaasOperation;

/// Editing state for one operation template.
///
/// A placeholder is only substituted when it fills a whole path segment
/// (`:token` followed by `/` or the end of the template), so tokens that are
/// prefixes of each other (`:name`, `:nameShort`) never interfere.
///
/// # Examples
///
/// ```
/// use byt_core::editing::FoaasPathBuilder;
///
/// let mut builder = FoaasPathBuilder::new(
///     "https://foaas.onrender.com",
///     "/bus/:name/:from",
///     [("name", "Nala Cat"), ("from", "Grumpy Cat")],
/// );
/// assert_eq!(builder.build(), "https://foaas.onrender.com/bus/Nala%20Cat/Grumpy%20Cat");
///
/// builder.update("name", "  Tom ");
/// assert_eq!(builder.path(), "/bus/Tom/Grumpy%20Cat");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoaasPathBuilder {
    base_url: String,
    template: String,
    tokens: Vec<String>,
    defaults: HashMap<String, String>,
    values: HashMap<String, String>,
}

impl FoaasPathBuilder {
    /// Create a builder for `template`; every token starts at its default.
    ///
    /// Tokens without a default start empty. Defaults for names that do not
    /// appear in the template are ignored.
    pub fn new<I, K, V>(base_url: impl Into<String>, template: impl Into<String>, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let template = template.into();
        let tokens = extract_tokens(&template);
        let mut provided: HashMap<String, String> =
            defaults.into_iter().map(|(k, v)| (k.into(), v.into())).collect();

        let defaults: HashMap<String, String> = tokens
            .iter()
            .map(|token| (token.clone(), provided.remove(token).unwrap_or_default()))
            .collect();
        let values = defaults.clone();

        Self { base_url: base_url.into(), template, tokens, defaults, values }
    }

    /// Builder for a FOAAS operation, using each field's label as its default.
    pub fn for_operation(base_url: impl Into<String>, operation: &FoaasOperation) -> Self {
        Self::new(
            base_url,
            operation.url.clone(),
            operation.fields.iter().map(|field| (field.key(), field.default_value())),
        )
    }

    /// Tokens in the order they appear in the template.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Current (unencoded) value of `token`.
    pub fn value(&self, token: &str) -> Option<&str> {
        self.values.get(token).map(String::as_str)
    }

    /// Assign a value to `token`.
    ///
    /// Surrounding whitespace is trimmed; a blank value restores the token's
    /// default. Unknown tokens are ignored.
    pub fn update(&mut self, token: &str, value: &str) {
        let Some(default) = self.defaults.get(token) else {
            return;
        };

        let trimmed = value.trim();
        let next = if trimmed.is_empty() { default.clone() } else { trimmed.to_string() };
        self.values.insert(token.to_string(), next);
    }

    /// Template with every placeholder replaced by its percent-encoded value.
    pub fn path(&self) -> String {
        self.template
            .split('/')
            .map(|segment| {
                segment
                    .strip_prefix(TOKEN_PREFIX)
                    .and_then(|token| self.values.get(token))
                    .map(|value| urlencoding::encode(value).into_owned())
                    .unwrap_or_else(|| segment.to_string())
            })
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Full request URL: base URL followed by [`FoaasPathBuilder::path`].
    pub fn build(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.path())
    }

    /// `true` when every token currently has a non-empty value.
    pub fn is_valid(&self) -> bool {
        self.tokens.iter().all(|token| self.values.get(token).is_some_and(|v| !v.is_empty()))
    }

    /// Position of `token` in the template, matching the bare name only.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.tokens.iter().position(|candidate| candidate == token)
    }
}

/// Tokens are the components after each `/:` delimiter, cut at the next `/`.
fn extract_tokens(template: &str) -> Vec<String> {
    template
        .split(TOKEN_DELIMITER)
        .skip(1)
        .filter_map(|component| {
            let token = component.split('/').next().unwrap_or_default();
            (!token.is_empty()).then(|| token.to_string())
        })
        .collect()
}
