//! Writes trees back out in the parsed format, for idempotence checks.
use core::fmt::Write;

use chrono::Datelike;

use super::arbitrary::Document;
use crate::{Map, Value};

pub(crate) fn write_document(doc: &Document) -> String {
    let mut out = String::from("# generated\n");
    write_entries(&mut out, &doc.0, "\n");
    out
}

fn write_entries(out: &mut String, entries: &Map, separator: &str) {
    for (key, value) in entries {
        out.push_str(key);
        out.push('=');
        write_value(out, value);
        out.push_str(separator);
    }
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => {
            out.push('"');
            out.push_str(s);
            out.push('"');
        }
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::Date(d) => {
            let _ = write!(out, "{}.{}.{}", d.year(), d.month(), d.day());
        }
        Value::List(items) => {
            out.push('{');
            for item in items {
                out.push(' ');
                write_value(out, item);
            }
            out.push_str(" }");
        }
        Value::Map(entries) => {
            out.push_str("{ ");
            write_entries(out, entries, " ");
            out.push('}');
        }
    }
}

#[test]
fn writes_every_kind() {
    let root = crate::parse("a=\"x y\" b=1.5 c=1444.11.11 d={1 2} e={f=g}").unwrap();
    let doc = Document(root.as_map().unwrap().clone());
    assert_eq!(
        write_document(&doc),
        "# generated\na=\"x y\"\nb=1.5\nc=1444.11.11\nd={ 1 2 }\ne={ f=\"g\" }\n"
    );
}
