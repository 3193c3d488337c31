//! Serialization back to INI text
//!
//! Output is a header line per section followed by its entries and a blank
//! line. Embedded newlines are written as `\n\t` so the continuation lines are
//! indented and read back as part of the same value.

use crate::error::{IniError, Result};
use crate::options::{ParseOptions, UNNAMED_SECTION_NAME};
use crate::store::{SectionItems, Store};

/// Renders the whole store.
///
/// Sections are written in this order: the unnamed section without a header
/// (if present), then the defaults (if non-empty), then the named sections in
/// creation order. Every section ends with a blank line.
pub fn render(
    store: &Store,
    options: &ParseOptions,
    space_around_delimiters: bool,
) -> Result<String> {
    let delimiter = if space_around_delimiters {
        format!(" {} ", options.primary_delimiter())
    } else {
        options.primary_delimiter().to_string()
    };

    let mut out = String::new();

    // Headerless entries must come first or they would be read back into
    // whatever section precedes them
    if let Some(items) = store.items(UNNAMED_SECTION_NAME) {
        write_section(&mut out, None, items, options, &delimiter)?;
    }

    if !store.defaults().is_empty() {
        write_section(
            &mut out,
            Some(store.default_name()),
            store.defaults(),
            options,
            &delimiter,
        )?;
    }

    for (name, items) in store.sections() {
        if name != UNNAMED_SECTION_NAME {
            write_section(&mut out, Some(name), items, options, &delimiter)?;
        }
    }

    Ok(out)
}

fn write_section(
    out: &mut String,
    header: Option<&str>,
    items: &SectionItems,
    options: &ParseOptions,
    delimiter: &str,
) -> Result<()> {
    if let Some(name) = header {
        out.push_str(&format!("[{name}]\n"));
    }

    for (key, value) in items {
        match value {
            None if options.allow_no_value => {
                out.push_str(key);
                out.push('\n');
            }
            _ => {
                validate_key(key, options)?;
                let value = value.as_deref().unwrap_or_default().replace('\n', "\n\t");
                out.push_str(&format!("{key}{delimiter}{value}\n"));
            }
        }
    }

    out.push('\n');
    Ok(())
}

/// Rejects keys that would read back as a header or split differently
fn validate_key(key: &str, options: &ParseOptions) -> Result<()> {
    if key.starts_with('[') {
        return Err(IniError::InvalidWriteKey {
            key: key.to_string(),
            reason: "begins with section pattern".to_string(),
        });
    }

    if let Some(delimiter) = options
        .delimiters
        .iter()
        .find(|d| !d.is_empty() && key.contains(d.as_str()))
    {
        return Err(IniError::InvalidWriteKey {
            key: key.to_string(),
            reason: format!("contains delimiter '{delimiter}'"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> Store {
        let mut store = Store::new("DEFAULT");
        store
            .items_mut("DEFAULT")
            .unwrap()
            .insert("base".to_string(), Some("/tmp".to_string()));
        store.insert_section("app");
        let app = store.items_mut("app").unwrap();
        app.insert("name".to_string(), Some("demo".to_string()));
        app.insert("note".to_string(), Some("a\nb".to_string()));
        store
    }

    #[test]
    fn test_render_with_spacing() {
        let text = render(&store(), &ParseOptions::default(), true).unwrap();
        assert_eq!(
            text,
            "[DEFAULT]\nbase = /tmp\n\n[app]\nname = demo\nnote = a\n\tb\n\n"
        );
    }

    #[test]
    fn test_render_without_spacing_uses_first_delimiter() {
        let options = ParseOptions::default().with_delimiters([":", "="]);
        let text = render(&store(), &options, false).unwrap();
        assert!(text.contains("name:demo\n"));
    }

    #[test]
    fn test_empty_defaults_are_omitted() {
        let mut store = Store::new("DEFAULT");
        store.insert_section("only");
        let text = render(&store, &ParseOptions::default(), true).unwrap();
        assert_eq!(text, "[only]\n\n");
    }

    #[test]
    fn test_no_value_entries() {
        let mut store = Store::new("DEFAULT");
        store.insert_section("app");
        store
            .items_mut("app")
            .unwrap()
            .insert("flag".to_string(), None);

        let allow = ParseOptions::default().with_allow_no_value(true);
        assert_eq!(render(&store, &allow, true).unwrap(), "[app]\nflag\n\n");

        let deny = ParseOptions::default();
        assert_eq!(render(&store, &deny, true).unwrap(), "[app]\nflag = \n\n");
    }

    #[test]
    fn test_unnamed_section_has_no_header() {
        let mut store = Store::new("DEFAULT");
        store.insert_section(UNNAMED_SECTION_NAME);
        store
            .items_mut(UNNAMED_SECTION_NAME)
            .unwrap()
            .insert("top".to_string(), Some("1".to_string()));
        store
            .items_mut("DEFAULT")
            .unwrap()
            .insert("base".to_string(), Some("/tmp".to_string()));
        let text = render(&store, &ParseOptions::default(), true).unwrap();
        assert_eq!(text, "top = 1\n\n[DEFAULT]\nbase = /tmp\n\n");
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["[oops", "a=b", "a:b"] {
            let mut store = Store::new("DEFAULT");
            store.insert_section("app");
            store
                .items_mut("app")
                .unwrap()
                .insert(key.to_string(), Some("v".to_string()));
            let err = render(&store, &ParseOptions::default(), true).unwrap_err();
            assert!(
                matches!(err, IniError::InvalidWriteKey { .. }),
                "key {key:?} gave {err:?}"
            );
        }
    }
}
