//! Formatting and type-annotation policy after defaulting.

use serde::Serialize;

use crate::config::{
    IndentStyle, InferrableTypes, InferrableTypesTag, QuoteStyle, SemicolonStyle, StyleOptions,
};

/// Default indentation.
pub const DEFAULT_INDENT: IndentStyle = IndentStyle::Tab;
/// Default quote style.
pub const DEFAULT_QUOTES: QuoteStyle = QuoteStyle::Single;
/// Default semicolon policy.
pub const DEFAULT_SEMI: SemicolonStyle = SemicolonStyle::Never;

/// Source language a policy applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// TypeScript sources.
    TypeScript,
    /// JavaScript sources, annotated through JSDoc.
    JavaScript,
}

/// Whether each position's type may be inferred (`true`) or must be annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPolicy {
    /// Variable declarations.
    pub variables: bool,
    /// Function parameters.
    pub parameters: bool,
    /// Class properties.
    pub properties: bool,
    /// Function return values.
    pub return_values: bool,
}

impl PositionPolicy {
    /// The same answer for every position.
    #[must_use]
    pub const fn uniform(inferred: bool) -> Self {
        Self {
            variables: inferred,
            parameters: inferred,
            properties: inferred,
            return_values: inferred,
        }
    }
}

/// Per-language inference policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferrablePolicy {
    /// Policy for TypeScript files.
    pub typescript: PositionPolicy,
    /// Policy for JavaScript files.
    pub javascript: PositionPolicy,
}

impl InferrablePolicy {
    /// Policy for one language.
    #[must_use]
    pub const fn for_language(&self, language: Language) -> PositionPolicy {
        match language {
            Language::TypeScript => self.typescript,
            Language::JavaScript => self.javascript,
        }
    }
}

impl InferrableTypesTag {
    /// Whether this tag lets types be inferred in `language`.
    #[must_use]
    pub const fn infers(self, language: Language) -> bool {
        match (self, language) {
            (Self::Always, _)
            | (Self::TsNever, Language::JavaScript)
            | (Self::JsNever, Language::TypeScript) => true,
            (Self::Never, _)
            | (Self::TsNever, Language::TypeScript)
            | (Self::JsNever, Language::JavaScript) => false,
        }
    }
}

impl InferrableTypes {
    /// Expand into a per-language, per-position policy.
    ///
    /// Explicit switches override the tag for their position in both
    /// languages; unset switches follow the tag.
    ///
    /// # Examples
    ///
    /// ```
    /// use flatlint::config::{InferrableTypes, InferrableTypesFlags, InferrableTypesTag};
    ///
    /// let policy = InferrableTypes::Detailed(
    ///     InferrableTypesTag::Always,
    ///     InferrableTypesFlags { parameters: Some(false), ..Default::default() },
    /// )
    /// .policy();
    /// assert!(!policy.typescript.parameters);
    /// assert!(policy.typescript.properties);
    /// ```
    #[must_use]
    pub fn policy(&self) -> InferrablePolicy {
        let tag = self.tag();
        let flags = self.flags();
        let expand = |language: Language| {
            let inferred = tag.infers(language);
            PositionPolicy {
                variables: inferred,
                parameters: flags.parameters.unwrap_or(inferred),
                properties: flags.properties.unwrap_or(inferred),
                return_values: flags.return_values.unwrap_or(inferred),
            }
        };
        InferrablePolicy {
            typescript: expand(Language::TypeScript),
            javascript: expand(Language::JavaScript),
        }
    }
}

/// Default `inferrableTypes` for the given strictness.
#[must_use]
pub const fn default_inferrable_types(strict: bool) -> InferrableTypes {
    if strict {
        InferrableTypes::Bare(InferrableTypesTag::Never)
    } else {
        InferrableTypes::Bare(InferrableTypesTag::JsNever)
    }
}

/// Style settings with every default applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedStyle {
    /// Indentation character.
    pub indent: IndentStyle,
    /// Quote style.
    pub quotes: QuoteStyle,
    /// Semicolon policy.
    pub semi: SemicolonStyle,
    /// The effective `inferrableTypes` option.
    pub inferrable_types: InferrableTypes,
    /// Its expansion.
    pub inferrable: InferrablePolicy,
}

impl ResolvedStyle {
    /// Apply defaults to `options`.
    #[must_use]
    pub fn resolve(options: Option<StyleOptions>, strict: bool) -> Self {
        let options = options.unwrap_or_default();
        let inferrable_types = options
            .inferrable_types
            .unwrap_or_else(|| default_inferrable_types(strict));

        Self {
            indent: options.indent.unwrap_or(DEFAULT_INDENT),
            quotes: options.quotes.unwrap_or(DEFAULT_QUOTES),
            semi: options.semi.unwrap_or(DEFAULT_SEMI),
            inferrable_types,
            inferrable: inferrable_types.policy(),
        }
    }
}
