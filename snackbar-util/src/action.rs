use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

/// Name of the click-handler property. Caller-supplied overrides carrying it
/// are stripped so descriptors cannot bypass the registry's own handler.
pub(crate) const CLICK_HANDLER_PROP: &str = "onclick";

/// Future produced by one activation of an action handler.
pub type ActionFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// Callable behind an action button. Every activation produces a fresh future.
pub type ActionHandler = Arc<dyn Fn() -> ActionFuture + Send + Sync>;

/// Per-action policy for what activating the action does to the toast.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeepOpen {
    /// Activation dismisses the toast.
    #[default]
    Never,
    /// Activation leaves the toast open.
    Always,
    /// The toast stays open until the handler's future settles, then closes.
    UntilResolved,
}

impl KeepOpen {
    /// Canonical keyword, matching the wire format.
    pub fn keyword(self) -> &'static str {
        match self {
            KeepOpen::Never => "never",
            KeepOpen::Always => "always",
            KeepOpen::UntilResolved => "until-resolved",
        }
    }

    /// Parse a keyword. Unrecognized values fall back to `Never`.
    pub fn from_keyword(value: &str) -> Self {
        match value {
            "always" | "true" => KeepOpen::Always,
            "until-resolved" => KeepOpen::UntilResolved,
            "never" | "false" => KeepOpen::Never,
            other => {
                debug!("Unrecognized keep-open keyword: {}", other);
                KeepOpen::Never
            }
        }
    }
}

impl Serialize for KeepOpen {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.keyword())
    }
}

impl<'de> Deserialize<'de> for KeepOpen {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeywordVisitor;

        impl Visitor<'_> for KeywordVisitor {
            type Value = KeepOpen;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a keep-open keyword")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<KeepOpen, E> {
                Ok(KeepOpen::from_keyword(value))
            }

            fn visit_bool<E: de::Error>(self, value: bool) -> Result<KeepOpen, E> {
                Ok(if value {
                    KeepOpen::Always
                } else {
                    KeepOpen::Never
                })
            }
        }

        deserializer.deserialize_any(KeywordVisitor)
    }
}

/// Style and attribute overrides for a rendered action button.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonProps {
    attrs: BTreeMap<String, String>,
}

impl ButtonProps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an attribute, replacing any previous value for the name.
    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Copy with any click-handler property removed, matched without regard
    /// to case.
    pub(crate) fn sanitized(&self) -> Self {
        Self {
            attrs: self
                .attrs
                .iter()
                .filter(|(name, _)| !name.eq_ignore_ascii_case(CLICK_HANDLER_PROP))
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
        }
    }
}

/// Caller-supplied description of one action button.
///
/// `execute` is optional so partial data from composition call sites can be
/// represented directly; descriptors without a callable (or with an empty
/// label) are filtered out before rendering.
#[derive(Clone)]
pub struct ActionDescriptor {
    pub label: String,
    pub execute: Option<ActionHandler>,
    pub keep_open: KeepOpen,
    /// `None` resolves to `keep_open != Always` at render time.
    pub disable_after_execute: Option<bool>,
    pub button: ButtonProps,
}

impl ActionDescriptor {
    /// Descriptor around a synchronous callable.
    pub fn new(label: impl Into<String>, execute: impl Fn() + Send + Sync + 'static) -> Self {
        Self::new_async(label, move || {
            execute();
            Box::pin(async { Ok::<_, anyhow::Error>(()) }) as ActionFuture
        })
    }

    /// Descriptor around a callable returning a future.
    pub fn new_async<F, Fut>(label: impl Into<String>, execute: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        Self {
            label: label.into(),
            execute: Some(Arc::new(move || Box::pin(execute()) as ActionFuture)),
            keep_open: KeepOpen::default(),
            disable_after_execute: None,
            button: ButtonProps::new(),
        }
    }

    pub fn keep_open(mut self, keep_open: KeepOpen) -> Self {
        self.keep_open = keep_open;
        self
    }

    pub fn disable_after_execute(mut self, disable: bool) -> Self {
        self.disable_after_execute = Some(disable);
        self
    }

    pub fn button_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.button = self.button.set(name, value);
        self
    }

    /// A descriptor is renderable when it names a non-empty label and carries
    /// a callable.
    pub(crate) fn is_renderable(&self) -> bool {
        !self.label.is_empty() && self.execute.is_some()
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("label", &self.label)
            .field("execute", &self.execute.as_ref().map(|_| "Fn"))
            .field("keep_open", &self.keep_open)
            .field("disable_after_execute", &self.disable_after_execute)
            .field("button", &self.button)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_open_keywords() {
        assert_eq!(KeepOpen::from_keyword("always"), KeepOpen::Always);
        assert_eq!(KeepOpen::from_keyword("true"), KeepOpen::Always);
        assert_eq!(KeepOpen::from_keyword("until-resolved"), KeepOpen::UntilResolved);
        assert_eq!(KeepOpen::from_keyword("never"), KeepOpen::Never);
        assert_eq!(KeepOpen::from_keyword("false"), KeepOpen::Never);
    }

    #[test]
    fn test_keep_open_unrecognized_falls_back() {
        assert_eq!(KeepOpen::from_keyword("sometimes"), KeepOpen::Never);
        assert_eq!(KeepOpen::from_keyword(""), KeepOpen::Never);
    }

    #[test]
    fn test_keep_open_wire_format() {
        let parsed: KeepOpen = serde_json::from_str(r#""until-resolved""#).unwrap();
        assert_eq!(parsed, KeepOpen::UntilResolved);

        let from_bool: KeepOpen = serde_json::from_str("true").unwrap();
        assert_eq!(from_bool, KeepOpen::Always);

        let unknown: KeepOpen = serde_json::from_str(r#""later""#).unwrap();
        assert_eq!(unknown, KeepOpen::Never);

        let json = serde_json::to_string(&KeepOpen::UntilResolved).unwrap();
        assert_eq!(json, r#""until-resolved""#);
    }

    #[test]
    fn test_button_props_sanitized_strips_click_handler() {
        let props = ButtonProps::new()
            .set("variant", "outlined")
            .set("onClick", "stealFocus()")
            .set("ONCLICK", "again()");

        let clean = props.sanitized();
        assert_eq!(clean.get("variant"), Some("outlined"));
        assert_eq!(clean.get("onClick"), None);
        assert_eq!(clean.get("ONCLICK"), None);
    }

    #[test]
    fn test_button_props_sanitized_keeps_everything_else() {
        let props = ButtonProps::new().set("class", "primary");
        assert_eq!(props.sanitized(), props);
    }

    #[test]
    fn test_descriptor_renderable() {
        let action = ActionDescriptor::new("Undo", || {});
        assert!(action.is_renderable());

        let unlabeled = ActionDescriptor::new("", || {});
        assert!(!unlabeled.is_renderable());

        let mut without_handler = ActionDescriptor::new("Undo", || {});
        without_handler.execute = None;
        assert!(!without_handler.is_renderable());
    }

    #[test]
    fn test_descriptor_debug_format() {
        let action = ActionDescriptor::new("Retry", || {}).keep_open(KeepOpen::Always);
        let debug_str = format!("{:?}", action);
        assert!(debug_str.contains("Retry"));
        assert!(debug_str.contains("Always"));
    }
}
