//! Utility functions and helpers.

pub mod http;
#[cfg(test)]
pub(crate) mod testing;

/// Fill `{url}` placeholders in a message template.
pub fn render(template: &str, url: &str) -> String {
    template.replace("{url}", url)
}
