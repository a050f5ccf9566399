//! Application namespace gate.
//!
//! Type names are fully-qualified Rust paths as reported by
//! [`std::any::type_name`], e.g. `pilot_vehicle_service::service::DefaultVehicleCommandService`.
//! A type is *application code* when its leading path segments equal every
//! segment of the configured root (`app` or `app::services`); it is *framework
//! code* when it is application code and one of its module segments below the
//! root equals the reserved framework segment.
//!
//! Field types are judged by their pointee: `Arc`, `Box`, `Option`, `Proxy` and
//! friends are peeled off, so `Arc<Proxy<dyn app::framework::Clock>>` is
//! framework code while `Arc<dyn app::Commands<app::framework::Tag>>` is not.

/// Default reserved framework segment.
pub const DEFAULT_FRAMEWORK_SEGMENT: &str = "framework";

/// Wrapper types looked through when resolving a field's pointee.
const WRAPPERS: &[&str] = &["Arc", "Rc", "Weak", "Box", "Option", "Proxy"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceScope {
    root: String,
    framework_segment: String,
}

impl NamespaceScope {
    /// Scope rooted at `root` with the default framework segment.
    ///
    /// Package names are accepted as-is: hyphens are mapped to underscores the
    /// same way cargo derives crate names. Nested roots (`app::services`) are
    /// matched segment by segment.
    #[must_use]
    pub fn new(root: impl Into<String>) -> Self {
        Self::with_framework_segment(root, DEFAULT_FRAMEWORK_SEGMENT)
    }

    #[must_use]
    pub fn with_framework_segment(root: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            root: normalize_path(&root.into()),
            framework_segment: normalize_path(&segment.into()),
        }
    }

    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    #[must_use]
    pub fn framework_segment(&self) -> &str {
        &self.framework_segment
    }

    /// True if the pointee of `type_name` lies under the application root.
    #[must_use]
    pub fn is_application(&self, type_name: &str) -> bool {
        self.below_root(pointee_path(type_name)).is_some()
    }

    /// True if the pointee of `type_name` is application code inside the
    /// framework segment. `Arc<dyn app::framework::Clock>` qualifies.
    #[must_use]
    pub fn is_framework(&self, type_name: &str) -> bool {
        self.path_is_framework(pointee_path(type_name))
    }

    /// Components are checked only when their own type is application code
    /// outside the framework segment.
    #[must_use]
    pub fn is_checked(&self, type_name: &str) -> bool {
        let path = outer_path(type_name);
        self.below_root(path).is_some() && !self.path_is_framework(path)
    }

    /// Segments of `path` after the root, or `None` outside the root.
    fn below_root<'p>(&self, path: &'p str) -> Option<Vec<&'p str>> {
        if self.root.is_empty() {
            return None;
        }
        let mut segments = path.split("::").map(str::trim);
        for expected in self.root.split("::") {
            if segments.next() != Some(expected) {
                return None;
            }
        }
        Some(segments.collect())
    }

    fn path_is_framework(&self, path: &str) -> bool {
        // Only module segments count, never the item name itself.
        self.below_root(path).is_some_and(|rest| {
            rest.split_last().is_some_and(|(_, modules)| {
                modules
                    .iter()
                    .any(|segment| *segment == self.framework_segment)
            })
        })
    }
}

fn normalize_path(raw: &str) -> String {
    raw.split("::")
        .map(|segment| segment.trim().replace('-', "_"))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("::")
}

/// Outermost path of a type name: everything before the first generic bracket.
fn outer_path(type_name: &str) -> &str {
    let end = type_name.find('<').unwrap_or(type_name.len());
    type_name[..end].trim()
}

/// Path of the type a field ultimately points at, past any wrapper types.
fn pointee_path(type_name: &str) -> &str {
    let mut current = strip_indirection(type_name);
    loop {
        let Some(open) = current.find('<') else {
            return current;
        };
        let outer = current[..open].trim();
        let item = outer.rsplit("::").next().unwrap_or(outer);
        if !WRAPPERS.contains(&item) {
            return outer;
        }
        let Some(close) = current.rfind('>') else {
            return outer;
        };
        current = strip_indirection(until_top_level(&current[open + 1..close], ','));
    }
}

/// Drops references, `dyn` and auto-trait bounds: `&dyn a::B + Send` is `a::B`.
fn strip_indirection(type_name: &str) -> &str {
    let trimmed = type_name.trim().trim_start_matches('&').trim_start();
    let trimmed = trimmed.strip_prefix("mut ").unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix("dyn ").unwrap_or(trimmed);
    until_top_level(trimmed, '+')
}

/// Prefix of `text` up to the first `stop` outside any brackets.
fn until_top_level(text: &str, stop: char) -> &str {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '<' | '(' | '[' => depth += 1,
            '>' | ')' | ']' => depth = depth.saturating_sub(1),
            _ if c == stop && depth == 0 => return text[..index].trim(),
            _ => {}
        }
    }
    text.trim()
}
