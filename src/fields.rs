//! Table-aware edits of single-line `key = "value"` assignments.
//!
//! Unlike [`crate::updater`], which takes the first `version` match anywhere
//! in the text, these helpers only touch assignments that start a line
//! inside one of the named tables. The root table is named `""`.

use crate::error::Result;
use regex::{Captures, Regex};
use std::sync::LazyLock;

static TABLE_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[\[?\s*([^\[\]]+?)\s*\]\]?\s*(?:#.*)?$").expect("table header pattern is valid")
});

/// Result of [`write_field`]: the new text and how many assignments changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEdit {
    pub contents: String,
    pub replaced: usize,
}

fn field_pattern(key: &str) -> Result<Regex> {
    let pattern = format!(
        r#"^(\s*){}\s*=\s*"([^"]*)"(\s*(?:#.*)?)$"#,
        regex::escape(key)
    );
    Ok(Regex::new(&pattern)?)
}

/// Strips the line terminator, returning `(body, terminator)`.
fn split_terminator(line: &str) -> (&str, &str) {
    let body = line.trim_end_matches(['\r', '\n']);
    (body, &line[body.len()..])
}

/// Walks `contents` line by line, handing each line and the table it sits
/// in to `visit`.
fn for_each_line<'a>(contents: &'a str, mut visit: impl FnMut(&str, &'a str, &'a str)) {
    let mut table = String::new();

    for line in contents.split_inclusive('\n') {
        let (body, terminator) = split_terminator(line);
        if let Some(caps) = TABLE_HEADER.captures(body) {
            table = caps[1].split('.').map(str::trim).collect::<Vec<_>>().join(".");
        }
        visit(&table, body, terminator);
    }
}

/// Value of the first `key = "..."` line in `table`.
pub fn read_field(contents: &str, table: &str, key: &str) -> Result<Option<String>> {
    let pattern = field_pattern(key)?;
    let mut found = None;

    for_each_line(contents, |current, body, _| {
        if found.is_none() && current == table {
            if let Some(caps) = pattern.captures(body) {
                found = Some(caps[2].to_string());
            }
        }
    });

    Ok(found)
}

/// Sets every `key = "..."` line inside `tables` to `value`.
///
/// Indentation and trailing comments on the line are kept; the value is
/// inserted verbatim. Lines in other tables are left alone.
pub fn write_field(contents: &str, tables: &[&str], key: &str, value: &str) -> Result<FieldEdit> {
    let pattern = field_pattern(key)?;
    let mut out = String::with_capacity(contents.len());
    let mut replaced = 0;

    for_each_line(contents, |current, body, terminator| {
        if tables.contains(&current) && pattern.is_match(body) {
            let line = pattern.replace(body, |caps: &Captures| {
                format!(r#"{}{key} = "{value}"{}"#, &caps[1], &caps[3])
            });
            if line != body {
                replaced += 1;
            }
            out.push_str(&line);
        } else {
            out.push_str(body);
        }
        out.push_str(terminator);
    });

    Ok(FieldEdit {
        contents: out,
        replaced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = r#"[project]
name = "songshgeo"
description = "Template"  # shown on PyPI
version = "0.1.0"

[tool.poetry]
name = "songshgeo"
description = "Template"

[[tool.poetry.source]]
name = "tsinghua"
url = "https://pypi.tuna.tsinghua.edu.cn/simple"
"#;

    const METADATA: &[&str] = &["project", "tool.poetry"];

    #[test]
    fn reads_field_from_named_table() {
        assert_eq!(
            read_field(TEMPLATE, "tool.poetry.source", "name").unwrap().as_deref(),
            Some("tsinghua")
        );
        assert_eq!(read_field(TEMPLATE, "project", "name").unwrap().as_deref(), Some("songshgeo"));
        assert_eq!(read_field(TEMPLATE, "project", "license").unwrap(), None);
    }

    #[test]
    fn rewrites_only_listed_tables() {
        let edit = write_field(TEMPLATE, METADATA, "name", "my-project").unwrap();

        assert_eq!(edit.replaced, 2);
        assert_eq!(read_field(&edit.contents, "project", "name").unwrap().as_deref(), Some("my-project"));
        assert_eq!(
            read_field(&edit.contents, "tool.poetry", "name").unwrap().as_deref(),
            Some("my-project")
        );
        assert_eq!(
            read_field(&edit.contents, "tool.poetry.source", "name").unwrap().as_deref(),
            Some("tsinghua")
        );
    }

    #[test]
    fn keeps_comments_and_indentation() {
        let edit = write_field(TEMPLATE, METADATA, "description", "Flood models").unwrap();
        assert!(edit.contents.contains("description = \"Flood models\"  # shown on PyPI\n"));

        let indented = "[project]\r\n    name=\"a\"\r\n";
        let edit = write_field(indented, &["project"], "name", "b").unwrap();
        assert_eq!(edit.contents, "[project]\r\n    name = \"b\"\r\n");
    }

    #[test]
    fn ignores_prefixed_keys_and_multiline_strings() {
        let contents = "[project]\npackage_name = \"x\"\ndescription = \"\"\"\nlong\n\"\"\"\n";
        let edit = write_field(contents, &["project"], "name", "y").unwrap();
        assert_eq!(edit.replaced, 0);

        let edit = write_field(contents, &["project"], "description", "short").unwrap();
        assert_eq!(edit.contents, contents);
    }

    #[test]
    fn root_table_is_empty_name() {
        let contents = "name = \"root\"\n[project]\nname = \"inner\"\n";
        let edit = write_field(contents, &[""], "name", "top").unwrap();
        assert_eq!(edit.contents, "name = \"top\"\n[project]\nname = \"inner\"\n");
    }

    #[test]
    fn rewritten_template_still_parses() {
        let edit = write_field(TEMPLATE, METADATA, "name", "my-project").unwrap();
        let parsed: toml::Table = toml::from_str(&edit.contents).unwrap();
        assert_eq!(parsed["project"]["name"].as_str(), Some("my-project"));
        assert_eq!(parsed["project"]["version"].as_str(), Some("0.1.0"));
    }

    #[test]
    fn same_value_counts_as_no_replacement() {
        let edit = write_field(TEMPLATE, METADATA, "name", "songshgeo").unwrap();
        assert_eq!(edit.replaced, 0);
        assert_eq!(edit.contents, TEMPLATE);
    }
}
