//! Value interpolation
//!
//! Two grammars are supported, selected by [`InterpolationMode`]:
//!
//! - **Basic**: `%(name)s` is replaced by the resolved value of `name` in the
//!   same section (falling back to the defaults), `%%` yields a literal `%`.
//! - **Extended**: `${name}` or `${section:name}` is replaced by the resolved
//!   value of the referenced option, `$$` yields a literal `$`.
//!
//! Resolution only reads the store. Self-referencing values are cut off by
//! the depth limit rather than by cycle tracking.

use crate::error::{IniError, Result};
use crate::options::{InterpolationMode, ParseOptions};
use crate::store::{Store, fold_key};

/// Resolves substitution tokens against a store snapshot
#[derive(Debug, Clone, Copy)]
pub struct Interpolator<'a> {
    store: &'a Store,
    mode: InterpolationMode,
    max_depth: usize,
}

impl<'a> Interpolator<'a> {
    /// Creates a resolver using the grammar and depth limit of `options`
    pub fn new(store: &'a Store, options: &ParseOptions) -> Self {
        Self {
            store,
            mode: options.interpolation,
            max_depth: options.max_interpolation_depth,
        }
    }

    /// Resolves a top-level value read from `section`/`option`
    pub fn resolve_value(&self, section: &str, option: &str, raw: &str) -> Result<String> {
        self.resolve(section, option, raw, 1)
    }

    /// Resolves `raw` at nesting level `depth`
    pub fn resolve(&self, section: &str, option: &str, raw: &str, depth: usize) -> Result<String> {
        let expand = match self.mode {
            InterpolationMode::None => return Ok(raw.to_string()),
            InterpolationMode::Basic => Self::expand_basic,
            InterpolationMode::Extended => Self::expand_extended,
        };
        if depth > self.max_depth {
            return Err(IniError::InterpolationDepth {
                section: section.to_string(),
                option: option.to_string(),
                max_depth: self.max_depth,
            });
        }

        expand(self, section, option, raw, depth)
    }

    fn expand_basic(&self, section: &str, option: &str, raw: &str, depth: usize) -> Result<String> {
        let mut result = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(pos) = rest.find('%') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            match after.chars().next() {
                Some('%') => {
                    result.push('%');
                    rest = &after[1..];
                }
                Some('(') => {
                    let body = &after[1..];
                    let close = body.find(")s").ok_or_else(|| {
                        IniError::interpolation_syntax(
                            section,
                            option,
                            format!("bad interpolation variable reference '{rest}'"),
                        )
                    })?;

                    let key = fold_key(&body[..close]);
                    self.substitute(section, &key, depth, &mut result)?;
                    rest = &body[close + 2..];
                }
                _ => {
                    return Err(IniError::interpolation_syntax(
                        section,
                        option,
                        format!("'%' must be followed by '%' or '(', found: '{rest}'"),
                    ));
                }
            }
        }

        result.push_str(rest);
        Ok(result)
    }

    fn expand_extended(
        &self,
        section: &str,
        option: &str,
        raw: &str,
        depth: usize,
    ) -> Result<String> {
        let mut result = String::with_capacity(raw.len());
        let mut rest = raw;

        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            match after.chars().next() {
                Some('$') => {
                    result.push('$');
                    rest = &after[1..];
                }
                Some('{') => {
                    let body = &after[1..];
                    let close = body.find('}').ok_or_else(|| {
                        IniError::interpolation_syntax(
                            section,
                            option,
                            format!("bad interpolation variable reference '{rest}'"),
                        )
                    })?;

                    let token = &body[..close];
                    let (target_section, key) = match token.split_once(':') {
                        Some((target, name)) => (target, fold_key(name)),
                        None => (section, fold_key(token)),
                    };
                    self.substitute(target_section, &key, depth, &mut result)?;
                    rest = &body[close + 1..];
                }
                _ => {
                    return Err(IniError::interpolation_syntax(
                        section,
                        option,
                        format!("'$' must be followed by '$' or '{{', found: '{rest}'"),
                    ));
                }
            }
        }

        result.push_str(rest);
        Ok(result)
    }

    /// Appends the resolved value of `section`/`key`; no-value entries add nothing
    fn substitute(&self, section: &str, key: &str, depth: usize, out: &mut String) -> Result<()> {
        if let Some(raw) = self.store.lookup(section, key)? {
            out.push_str(&self.resolve(section, key, raw, depth + 1)?);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn store_with(entries: &[(&str, &str, Option<&str>)]) -> Store {
        let mut store = Store::new("DEFAULT");
        for (section, key, value) in entries {
            if *section != "DEFAULT" {
                store.insert_section(section);
            }
            store
                .items_mut(section)
                .unwrap()
                .insert(key.to_string(), value.map(str::to_string));
        }
        store
    }

    fn options(mode: InterpolationMode) -> ParseOptions {
        ParseOptions::default().with_interpolation(mode)
    }

    #[test]
    fn test_basic_reference_and_escape() {
        let store = store_with(&[("DEFAULT", "base", Some("/tmp")), ("app", "name", Some("demo"))]);
        let opts = options(InterpolationMode::Basic);
        let interpolator = Interpolator::new(&store, &opts);

        let value = interpolator
            .resolve_value("app", "path", "%(base)s/%(NAME)s at 100%%")
            .unwrap();
        assert_eq!(value, "/tmp/demo at 100%");
    }

    #[test]
    fn test_basic_nested_references() {
        let store = store_with(&[
            ("app", "a", Some("%(b)s!")),
            ("app", "b", Some("%(c)s%(c)s")),
            ("app", "c", Some("x")),
        ]);
        let opts = options(InterpolationMode::Basic);
        let interpolator = Interpolator::new(&store, &opts);
        assert_eq!(interpolator.resolve_value("app", "x", "%(a)s").unwrap(), "xx!");
    }

    #[test]
    fn test_basic_syntax_errors() {
        let store = store_with(&[("app", "a", Some("1"))]);
        let opts = options(InterpolationMode::Basic);
        let interpolator = Interpolator::new(&store, &opts);

        for raw in ["50%", "%d", "%(a)", "%(a"] {
            let err = interpolator.resolve_value("app", "x", raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InterpolationSyntaxError, "input {raw:?}");
        }
    }

    #[test]
    fn test_basic_missing_reference_fails() {
        let store = store_with(&[("app", "a", Some("1"))]);
        let opts = options(InterpolationMode::Basic);
        let interpolator = Interpolator::new(&store, &opts);
        let err = interpolator.resolve_value("app", "x", "%(nope)s").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OptionNotFound);
    }

    #[test]
    fn test_no_value_reference_is_empty() {
        let store = store_with(&[("app", "flag", None)]);
        let opts = options(InterpolationMode::Basic);
        let interpolator = Interpolator::new(&store, &opts);
        assert_eq!(interpolator.resolve_value("app", "x", "[%(flag)s]").unwrap(), "[]");

        let opts = options(InterpolationMode::Extended);
        let interpolator = Interpolator::new(&store, &opts);
        assert_eq!(interpolator.resolve_value("app", "x", "[${flag}]").unwrap(), "[]");
    }

    #[test]
    fn test_extended_cross_section_reference() {
        let store = store_with(&[
            ("paths", "root", Some("/srv")),
            ("app", "dir", Some("${paths:ROOT}/app")),
            ("app", "log", Some("${dir}/log")),
        ]);
        let opts = options(InterpolationMode::Extended);
        let interpolator = Interpolator::new(&store, &opts);

        let value = interpolator.resolve_value("app", "x", "${log} costs $$5").unwrap();
        assert_eq!(value, "/srv/app/log costs $5");
    }

    #[test]
    fn test_extended_section_name_is_case_sensitive() {
        let store = store_with(&[("Paths", "root", Some("/srv"))]);
        let opts = options(InterpolationMode::Extended);
        let interpolator = Interpolator::new(&store, &opts);
        let err = interpolator.resolve_value("app", "x", "${paths:root}").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SectionNotFound);
    }

    #[test]
    fn test_extended_syntax_errors() {
        let store = store_with(&[("app", "a", Some("1"))]);
        let opts = options(InterpolationMode::Extended);
        let interpolator = Interpolator::new(&store, &opts);

        for raw in ["cost $", "$a", "${a"] {
            let err = interpolator.resolve_value("app", "x", raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InterpolationSyntaxError, "input {raw:?}");
        }
    }

    #[test]
    fn test_percent_is_literal_in_extended_mode() {
        let store = store_with(&[("app", "a", Some("1"))]);
        let opts = options(InterpolationMode::Extended);
        let interpolator = Interpolator::new(&store, &opts);
        assert_eq!(interpolator.resolve_value("app", "x", "%(a)s").unwrap(), "%(a)s");
    }

    #[test]
    fn test_none_mode_returns_raw() {
        let store = store_with(&[("app", "a", Some("%(a)s"))]);
        let opts = options(InterpolationMode::None);
        let interpolator = Interpolator::new(&store, &opts);
        assert_eq!(interpolator.resolve("app", "a", "%(a)s ${x", 99).unwrap(), "%(a)s ${x");
    }

    #[test]
    fn test_depth_limit_is_configurable() {
        let store = store_with(&[("app", "a", Some("%(b)s")), ("app", "b", Some("end"))]);
        let opts = options(InterpolationMode::Basic).with_max_interpolation_depth(1);
        let interpolator = Interpolator::new(&store, &opts);

        // Level 1 is the value itself; the reference needs level 2
        let err = interpolator.resolve_value("app", "x", "%(b)s").unwrap_err();
        match err {
            IniError::InterpolationDepth { section, option, max_depth } => {
                assert_eq!(section, "app");
                assert_eq!(option, "b");
                assert_eq!(max_depth, 1);
            }
            other => panic!("Expected InterpolationDepth, got: {other:?}"),
        }
        assert_eq!(interpolator.resolve_value("app", "x", "plain").unwrap(), "plain");
    }
}
