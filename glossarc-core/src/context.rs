//! Context handles.
//!
//! Operations that work on behalf of a glossary take a [`Context`] so their
//! log lines can be correlated with it. The handle is only ever read.

/// A caller-supplied handle used to label log output.
pub trait Context {
    /// Short label to prefix log lines with, if any.
    fn label(&self) -> Option<&str> {
        None
    }
}

impl Context for () {}

impl Context for str {
    fn label(&self) -> Option<&str> {
        Some(self)
    }
}

impl Context for String {
    fn label(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

impl<C: Context + ?Sized> Context for &C {
    fn label(&self) -> Option<&str> {
        (**self).label()
    }
}

/// A context that is nothing more than a name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedContext(pub String);

impl NamedContext {
    /// Create a context with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Context for NamedContext {
    fn label(&self) -> Option<&str> {
        Some(&self.0)
    }
}

/// Render a context label as a log prefix, e.g. `"[mydict] "`.
pub fn log_prefix(ctx: &(impl Context + ?Sized)) -> String {
    match ctx.label() {
        Some(label) if !label.is_empty() => format!("[{}] ", label),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(().label(), None);
        assert_eq!("wordnet".label(), Some("wordnet"));
        assert_eq!(NamedContext::new("jmdict").label(), Some("jmdict"));
    }

    #[test]
    fn test_log_prefix() {
        assert_eq!(log_prefix(&()), "");
        assert_eq!(log_prefix(""), "");
        assert_eq!(log_prefix(&NamedContext::new("cedict")), "[cedict] ");
    }
}
