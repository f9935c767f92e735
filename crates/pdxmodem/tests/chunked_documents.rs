#![expect(missing_docs)]

use pdxmodem::{ErrorKind, Malformed, ParserOptions, Status, StreamingParser, Value, produce_chunks};

const SAVE: &str = r#"# save header
date=1444.11.11
player="SWE"
savegame_version={ first=1 second=37 third=3 }
countries={
    SWE={
        tag=SWE
        treasury=104.250
        capital=1
        owned_provinces={ 1 2 3 4 25 }
        flags={ has_won_war=yes "quoted flag"=1620.1.1 }
        leader={ name="Gustav Vasa" type=general }
        leader={ name="Axel Oxenstierna" type=admiral }
    }
    DAN={
        tag=DAN
        treasury=-12.5
        owned_provinces={}
        history={ 1444.11.11 1500.1.1 }
    }
}
"#;

fn parse_in(parts: usize) -> Value {
    let mut parser = StreamingParser::default();
    for chunk in produce_chunks(SAVE.as_bytes(), parts) {
        assert_eq!(parser.feed(chunk).unwrap(), Status::NeedMore);
    }
    parser.finish().unwrap()
}

#[test]
fn chunk_count_does_not_matter() {
    let whole = pdxmodem::parse(SAVE).unwrap();
    for parts in [1, 2, 3, 10, 64, SAVE.len()] {
        assert_eq!(parse_in(parts), whole, "{parts} parts");
    }
}

#[test]
fn save_tree() {
    let root = parse_in(17);
    let swe = root.get("countries").and_then(|c| c.get("SWE")).unwrap();

    assert_eq!(swe.get("treasury").and_then(Value::as_f64), Some(104.25));
    assert_eq!(
        swe.get("owned_provinces").and_then(Value::as_list).map(<[Value]>::len),
        Some(5)
    );
    let leaders = swe.get("leader").and_then(Value::as_list).unwrap();
    assert_eq!(leaders.len(), 2);
    assert_eq!(
        leaders[1].get("name").and_then(Value::as_str),
        Some("Axel Oxenstierna")
    );
    assert!(
        swe.get("flags")
            .and_then(|f| f.get("quoted flag"))
            .is_some_and(Value::is_date)
    );

    let dan = root.get("countries").and_then(|c| c.get("DAN")).unwrap();
    assert_eq!(dan.get("owned_provinces"), Some(&Value::List(vec![])));
    assert!(
        dan.get("history")
            .and_then(Value::as_list)
            .is_some_and(|h| h.iter().all(Value::is_date))
    );
}

#[test]
fn display_is_valid_ordered_json() {
    let root = parse_in(5);
    let json: serde_json::Value = serde_json::from_str(&root.to_string()).unwrap();
    let keys: Vec<&str> = json
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, ["date", "player", "savegame_version", "countries"]);
    assert_eq!(json["date"], "1444-11-11T00:00:00.000Z");
    assert_eq!(json["savegame_version"]["second"], 37.0);
}

#[test]
fn truncated_save_reports_unclosed_blocks() {
    let truncated = &SAVE.as_bytes()[..SAVE.find("DAN={").unwrap()];
    let mut parser = StreamingParser::default();
    for chunk in produce_chunks(truncated, 4) {
        parser.feed(chunk).unwrap();
    }
    let err = parser.finish().unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MalformedStructure(Malformed::UnclosedBlocks(1))
    );
    assert_eq!(err.offset(), truncated.len());
}

#[test]
fn small_token_capacity() {
    let mut parser = StreamingParser::new(ParserOptions {
        token_capacity: 12,
        ..Default::default()
    });
    let err = produce_chunks(SAVE.as_bytes(), 8)
        .into_iter()
        .try_for_each(|chunk| parser.feed(chunk).map(drop))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::CapacityExceeded { capacity: 12 });
    assert_eq!(err.offset(), SAVE.find("savegame_version").unwrap());
}
