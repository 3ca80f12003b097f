//! The shape of `flatlint.yaml`.
//!
//! Every field is optional; defaults are applied by the resolver, never
//! here.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::Error;
use crate::overrides::Overrides;

/// One configuration layer, or the merge of several.
///
/// YAML keys follow the option names users already know from JavaScript
/// linter presets (`tsconfig`, `strict`, `rootDir`, `environment`,
/// `options`, `overrides`); the longer descriptive names are accepted as
/// aliases.
///
/// # Examples
///
/// ```
/// use flatlint::config::{Config, StyleOptions, QuoteStyle};
///
/// let config = Config {
///     strict: Some(true),
///     options: Some(StyleOptions {
///         quotes: Some(QuoteStyle::Double),
///         ..Default::default()
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.strict, Some(true));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Type-config location(s), or `true` to auto-discover.
    #[serde(default, alias = "tsconfigPath", skip_serializing_if = "Option::is_none")]
    pub tsconfig: Option<TsconfigSetting>,

    /// Escalate type-annotation requirements.
    #[serde(default, alias = "strictMode", skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Base directory for relative path resolution.
    #[serde(default, alias = "rootDirectory", skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<PathBuf>,

    /// Environment and language settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<EnvironmentOptions>,

    /// Formatting preferences.
    #[serde(default, alias = "styleOptions", skip_serializing_if = "Option::is_none")]
    pub options: Option<StyleOptions>,

    /// Final-stage rule customization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overrides: Option<Overrides>,
}

/// Where to find the TypeScript project configuration.
///
/// # Examples
///
/// ```
/// use flatlint::config::TsconfigSetting;
///
/// let auto: TsconfigSetting = serde_yaml::from_str("true").unwrap();
/// assert_eq!(auto, TsconfigSetting::Enabled(true));
///
/// let many: TsconfigSetting = serde_yaml::from_str("[a.json, b.json]").unwrap();
/// assert!(matches!(many, TsconfigSetting::Paths(ref p) if p.len() == 2));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TsconfigSetting {
    /// `true` auto-discovers the nearest tsconfig; `false` disables type information.
    Enabled(bool),
    /// A single tsconfig path.
    Path(PathBuf),
    /// Several tsconfig paths, in order.
    Paths(Vec<PathBuf>),
}

/// Environment and language settings.
///
/// When every field is unset the resolver infers the runtime from its
/// global probe.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EnvironmentOptions {
    /// Enable Node.js globals (CommonJS globals are not included).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<bool>,

    /// Enable the `Deno` namespace and web-standard globals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deno: Option<bool>,

    /// Enable browser globals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<bool>,

    /// ECMAScript version to parse (defaults to `latest`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecma_version: Option<EcmaVersion>,

    /// Extra globals, name to "writable". Never overrides flag-derived globals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_globals: Option<BTreeMap<String, bool>>,
}

impl EnvironmentOptions {
    /// True when no flag, no custom global and no ecmaVersion is given.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.node.is_none()
            && self.deno.is_none()
            && self.browser.is_none()
            && self.ecma_version.is_none()
            && self.custom_globals.as_ref().map_or(true, BTreeMap::is_empty)
    }
}

/// ECMAScript language level.
///
/// Accepts `latest`, an edition number (`3`, `5`, `6`..) or a year (`2015`..).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EcmaVersion {
    /// The most recent version the parser supports.
    #[default]
    Latest,
    /// A specific edition number or year.
    Version(u16),
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Version(v) => write!(f, "{v}"),
        }
    }
}

impl FromStr for EcmaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("latest") {
            return Ok(Self::Latest);
        }
        trimmed
            .parse()
            .map(Self::Version)
            .map_err(|_| Error::validation("environment.ecmaVersion", format!("invalid version: '{s}'")))
    }
}

impl Serialize for EcmaVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Latest => serializer.serialize_str("latest"),
            Self::Version(v) => serializer.serialize_u16(*v),
        }
    }
}

impl<'de> Deserialize<'de> for EcmaVersion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Number(u16),
            String(String),
        }

        match Helper::deserialize(deserializer)? {
            Helper::Number(v) => Ok(Self::Version(v)),
            Helper::String(s) => s.parse().map_err(|e: Error| D::Error::custom(e.to_string())),
        }
    }
}

/// Formatting preferences.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StyleOptions {
    /// Indentation character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indent: Option<IndentStyle>,

    /// Preferred string quote.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quotes: Option<QuoteStyle>,

    /// Semicolon policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semi: Option<SemicolonStyle>,

    /// Whether inferrable types may be left unannotated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inferrable_types: Option<InferrableTypes>,
}

/// Declares a string-backed option enum with `Display`, `FromStr` and serde.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            /// Every accepted spelling, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($text),+];

            /// The spelling used in configuration files.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($text => Ok(Self::$variant),)+
                    _ => Err(Error::validation(
                        $field,
                        format!("unknown value '{s}' (expected one of: {})", Self::VALUES.join(", ")),
                    )),
                }
            }
        }
    };
}

string_enum! {
    /// Indentation character.
    IndentStyle, "options.indent" {
        /// Hard tabs.
        Tab => "tab",
        /// Spaces.
        Space => "space",
    }
}

string_enum! {
    /// Preferred string quote.
    QuoteStyle, "options.quotes" {
        /// `'single'`
        Single => "single",
        /// `"double"`
        Double => "double",
    }
}

string_enum! {
    /// Semicolon policy.
    SemicolonStyle, "options.semi" {
        /// Never terminate statements with semicolons.
        Never => "never",
        /// Always terminate statements with semicolons.
        Always => "always",
    }
}

string_enum! {
    /// Type-annotation policy tag.
    ///
    /// - `never`: types are always explicit, in JavaScript (JSDoc) and TypeScript
    /// - `always`: types are always inferred
    /// - `ts-never`: explicit in TypeScript, inferred in JavaScript
    /// - `js-never`: explicit in JavaScript, inferred in TypeScript
    InferrableTypesTag, "options.inferrableTypes" {
        /// Annotations mandated everywhere.
        Never => "never",
        /// Annotations optional everywhere.
        Always => "always",
        /// Annotations mandated in TypeScript only.
        TsNever => "ts-never",
        /// Annotations mandated in JavaScript only.
        JsNever => "js-never",
    }
}

/// Fine-grained switches for the detailed `inferrableTypes` form.
///
/// An unset switch follows the tag it is paired with.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct InferrableTypesFlags {
    /// Whether parameter types may be inferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<bool>,

    /// Whether class property types may be inferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<bool>,

    /// Whether function return types may be inferred.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_values: Option<bool>,
}

/// The `inferrableTypes` option: a bare tag or a tag with switches.
///
/// # Examples
///
/// ```
/// use flatlint::config::{InferrableTypes, InferrableTypesTag};
///
/// let bare: InferrableTypes = serde_yaml::from_str("ts-never").unwrap();
/// assert_eq!(bare, InferrableTypes::Bare(InferrableTypesTag::TsNever));
///
/// let detailed: InferrableTypes =
///     serde_yaml::from_str("[always, {parameters: false}]").unwrap();
/// assert_eq!(detailed.tag(), InferrableTypesTag::Always);
///
/// assert!(serde_yaml::from_str::<InferrableTypes>("sometimes").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InferrableTypes {
    /// Just the tag.
    Bare(InferrableTypesTag),
    /// The tag with per-position switches.
    Detailed(InferrableTypesTag, InferrableTypesFlags),
}

impl InferrableTypes {
    /// The policy tag.
    #[must_use]
    pub const fn tag(&self) -> InferrableTypesTag {
        match self {
            Self::Bare(tag) | Self::Detailed(tag, _) => *tag,
        }
    }

    /// The switches, all unset for the bare form.
    #[must_use]
    pub fn flags(&self) -> InferrableTypesFlags {
        match self {
            Self::Bare(_) => InferrableTypesFlags::default(),
            Self::Detailed(_, flags) => *flags,
        }
    }
}

impl From<InferrableTypesTag> for InferrableTypes {
    fn from(tag: InferrableTypesTag) -> Self {
        Self::Bare(tag)
    }
}

impl FromStr for InferrableTypes {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self::Bare)
    }
}

impl Serialize for InferrableTypes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Bare(tag) => tag.serialize(serializer),
            Self::Detailed(tag, flags) => (tag, flags).serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for InferrableTypes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error as _;

        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Helper {
            Bare(String),
            Detailed(String, InferrableTypesFlags),
        }

        let parse_tag =
            |s: &str| -> Result<InferrableTypesTag, D::Error> {
                s.parse().map_err(|e: Error| D::Error::custom(e.to_string()))
            };

        match Helper::deserialize(deserializer)? {
            Helper::Bare(tag) => Ok(Self::Bare(parse_tag(&tag)?)),
            Helper::Detailed(tag, flags) => Ok(Self::Detailed(parse_tag(&tag)?, flags)),
        }
    }
}
