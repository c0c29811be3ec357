//! Caller-supplied configuration for building and rendering.

use serde::{Deserialize, Serialize};

/// How the builder treats elements without a transformer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Fidelity {
    /// Skip unknown subtrees.
    Lenient,
    /// Fail on the first unknown element.
    Strict,
}

/// Options for [`crate::TreeBuilder`]. The fidelity mode has no default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    pub fidelity: Fidelity,
    /// Schema version recorded on the produced body.
    #[serde(default = "default_version")]
    pub version: u32,
}

impl BuildOptions {
    pub fn strict() -> Self {
        Self::with_fidelity(Fidelity::Strict)
    }

    pub fn lenient() -> Self {
        Self::with_fidelity(Fidelity::Lenient)
    }

    pub fn with_fidelity(fidelity: Fidelity) -> Self {
        BuildOptions {
            fidelity,
            version: default_version(),
        }
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}

fn default_version() -> u32 {
    1
}

/// Markup used for links pointing at FT content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkDialect {
    /// `<a href="https://ft.com/content/{id}">`
    #[default]
    Html,
    /// `<ft-content type="…/Article" url="http://api.ft.com/content/{id}">`
    FtContent,
}

/// Options for [`crate::XmlRenderer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub dialect: LinkDialect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_options_require_fidelity() {
        let options: BuildOptions = serde_json::from_str(r#"{"fidelity":"strict"}"#).unwrap();
        assert_eq!(options, BuildOptions::strict());
        assert_eq!(options.version, 1);

        assert!(serde_json::from_str::<BuildOptions>(r#"{"version":2}"#).is_err());
    }

    #[test]
    fn render_options_default_to_html_links() {
        let options: RenderOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options.dialect, LinkDialect::Html);

        let options: RenderOptions =
            serde_json::from_str(r#"{"dialect":"ft-content"}"#).unwrap();
        assert_eq!(options.dialect, LinkDialect::FtContent);
    }
}
