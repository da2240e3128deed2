use csv_transcode::hooks::{cast_to_scalar, HookOutcome};
use csv_transcode::{
    parse_document, parse_field, parse_line, parse_objects, record, row, split_lines,
    write_arrays, write_objects, Config, Converter, Error, Field, MalformedKind, ParsePosition,
    Record, Row, SortOrder,
};
use std::sync::{Arc, Mutex};

fn strings(records: &[Record]) -> Vec<Vec<String>> {
    records
        .iter()
        .map(|r| r.iter().map(ToString::to_string).collect())
        .collect()
}

fn no_headers() -> Config {
    Config::new().with_headers(false)
}

#[test]
fn test_parse_line_with_quoted_separator() {
    let record = parse_line("a,\"b,c\",d", &Config::new(), &mut ParsePosition::new()).unwrap();
    assert_eq!(record, record!["a", "b,c", "d"]);
}

#[test]
fn test_parse_document_without_headers() {
    let records = parse_document("a,b\n1,2\n3,4", &no_headers()).unwrap();
    assert_eq!(
        strings(&records),
        vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]]
    );
}

#[test]
fn test_parse_objects() {
    let rows = parse_objects("name,age\nJoe,10\nNancy,20", &Config::new()).unwrap();
    assert_eq!(
        rows,
        vec![
            row! { "name" => "Joe", "age" => "10" },
            row! { "name" => "Nancy", "age" => "20" },
        ]
    );
}

#[test]
fn test_parse_field_with_escaped_quotes() {
    let field = parse_field("\"He said \"\"hi\"\"\"", &Config::new()).unwrap();
    assert_eq!(field, Field::from("He said \"hi\""));
}

#[test]
fn test_window_with_header() {
    let text = "id\n1\n2\n3\n4\n5\n";
    let converter = Converter::new(Config::new().with_window(2, 3)).unwrap();

    let mut position = ParsePosition::new();
    let records = converter.parse_document_at(text, &mut position).unwrap();
    assert_eq!(strings(&records), vec![vec!["2"], vec!["3"]]);
    assert_eq!(position.row_num, 6);

    let mut position = ParsePosition::new();
    let rows = converter.parse_objects_at(text, &mut position).unwrap();
    assert_eq!(rows, vec![row! { "id" => "2" }, row! { "id" => "3" }]);
    assert_eq!(position.row_num, 6);
}

#[test]
fn test_row_count_without_window() {
    let converter = Converter::new(Config::new()).unwrap();
    let mut position = ParsePosition::new();
    converter
        .parse_document_at("id\n1\n2\n3\n4\n5", &mut position)
        .unwrap();
    assert_eq!(position.row_num, 6);
}

#[test]
fn test_unterminated_field() {
    match parse_field("\"unterminated,", &Config::new()) {
        Err(Error::MalformedInput { row, col, kind }) => {
            assert_eq!(kind, MalformedKind::IllegalQuote);
            assert_eq!((row, col), (1, 1));
        }
        other => panic!("expected malformed input, got {:?}", other),
    }
}

#[test]
fn test_malformed_document_positions() {
    let err = parse_document("a,b\n1,2\n3,\"4\"x", &no_headers()).unwrap_err();
    assert_eq!(err, Error::malformed(3, 2, MalformedKind::IllegalState));
    assert_eq!(err.to_string(), "CSVDataError: Illegal State [Row:3][Col:2]");

    let err = parse_document("a,b\"", &no_headers()).unwrap_err();
    assert_eq!(err.malformed_kind(), Some(MalformedKind::IllegalQuote));
}

#[test]
fn test_malformed_objects_report_row() {
    let err = parse_objects("a,b\n1,2\n\"x\ny\",z\n3,4\"", &Config::new()).unwrap_err();
    assert_eq!(err, Error::malformed(4, 2, MalformedKind::IllegalQuote));
}

#[test]
fn test_manual_order() {
    let rows = vec![row! { "name" => "Joe", "age" => 10 }];
    let config = Config::new().with_manual_order(["age"]);
    let text = write_objects(&rows, &config).unwrap();
    assert_eq!(text.lines().next(), Some("age,name"));
    assert_eq!(text, "age,name\n10,Joe\n");
}

#[test]
fn test_manual_order_from_line() {
    let rows = vec![row! { "a" => 1, "b" => 2, "c" => 3 }];
    let config = Config::new().with_manual_order_line("c,b").unwrap();
    assert_eq!(write_objects(&rows, &config).unwrap(), "c,b,a\n3,2,1\n");
}

#[test]
fn test_alpha_sort_order() {
    let rows = vec![
        row! { "zeta" => 1, "alpha" => 2 },
        row! { "mid" => 3 },
    ];
    let config = Config::new().with_sort_order(SortOrder::Alpha);
    assert_eq!(
        write_objects(&rows, &config).unwrap(),
        "alpha,mid,zeta\n2,,1\n,3,\n"
    );
}

#[test]
fn test_write_arrays_escaping() {
    let records = vec![
        record!["plain", "with,comma", "with \"quote\""],
        record!["multi\nline", "", 42],
    ];
    let text = write_arrays(&records, &Config::new()).unwrap();
    assert_eq!(
        text,
        "plain,\"with,comma\",\"with \"\"quote\"\"\"\n\"multi\nline\",,42\n"
    );
}

#[test]
fn test_round_trip_and_idempotence() {
    let records = vec![
        record!["a", "b,c", "\"q\""],
        record!["", "x\r\ny", "z"],
        record![""],
    ];
    let config = no_headers();

    let text = write_arrays(&records, &config).unwrap();
    let parsed = parse_document(&text, &config).unwrap();
    assert_eq!(strings(&parsed), strings(&records));

    let again = write_arrays(&parsed, &config).unwrap();
    assert_eq!(again, text);
}

#[test]
fn test_custom_dialect() {
    let config = Config::new()
        .with_separator('|')
        .with_delimiter('\'')
        .with_headers(false);
    let records = parse_document("a|'b|''c'''\n", &config).unwrap();
    assert_eq!(strings(&records), vec![vec!["a", "b|'c'"]]);
    assert_eq!(write_arrays(&records, &config).unwrap(), "a|'b|''c'''\n");
}

#[test]
fn test_invalid_dialect_is_rejected() {
    let config = Config::new().with_separator('"');
    assert!(matches!(
        parse_document("a", &config),
        Err(Error::Configuration(_))
    ));
    assert!(matches!(
        write_arrays(&[], &Config::new().with_delimiter('\n')),
        Err(Error::Configuration(_))
    ));
}

#[test]
fn test_cast_to_scalar_hook() {
    let config = Config::new().with_on_parse_value(cast_to_scalar);
    let records = parse_document("n,x\n1,2.5\n,abc", &config).unwrap();
    assert_eq!(records[0], record!["n", "x"]);
    assert_eq!(records[1], record![1, 2.5]);
    assert_eq!(records[2], vec![Field::Empty, Field::from("abc")]);
}

#[test]
fn test_value_hook_skip_drops_field() {
    let config = no_headers().with_on_parse_value(|value, position| {
        if position.col_num == 2 {
            HookOutcome::Skip
        } else {
            HookOutcome::Keep(value)
        }
    });
    let records = parse_document("a,b,c\n1,2,3", &config).unwrap();
    assert_eq!(strings(&records), vec![vec!["a", "c"], vec!["1", "3"]]);
}

#[test]
fn test_entry_hook_in_objects() {
    let config = Config::new().with_on_parse_entry(|record, _| {
        if record.first() == Some(&Field::from("skip")) {
            HookOutcome::Skip
        } else {
            HookOutcome::Keep(record)
        }
    });
    let rows = parse_objects("k,v\nskip,1\nkeep,2", &config).unwrap();
    assert_eq!(rows, vec![row! { "k" => "keep", "v" => "2" }]);
}

#[test]
fn test_transform_on_both_paths() {
    let config = Config::new().with_transform(|row| {
        row.into_iter()
            .map(|(k, v)| (k.to_uppercase(), v))
            .collect::<Row>()
    });
    let rows = parse_objects("a,b\n1,2", &config).unwrap();
    assert_eq!(rows, vec![row! { "A" => "1", "B" => "2" }]);

    let text = write_objects(&[row! { "x" => 1 }], &config).unwrap();
    assert_eq!(text, "X\n1\n");
}

#[test]
fn test_hooks_observe_positions() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = no_headers().with_on_parse_entry(move |record, position| {
        sink.lock().unwrap().push(position.row_num);
        HookOutcome::Keep(record)
    });

    parse_document("a\n\"b\nb\"\nc", &config).unwrap();
    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3]);
}

#[test]
fn test_split_lines() {
    let lines = split_lines("a,\"b\nc\"\nd", &no_headers()).unwrap();
    let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["a,\"b\nc\"", "d"]);
    assert_eq!(lines[1].row_num, 2);
}

#[test]
fn test_threaded_position_across_header_and_body() {
    let config = Config::new().with_on_parse_value(|value, position| {
        HookOutcome::Keep(Field::from(format!(
            "{}@{}:{}",
            value, position.row_num, position.col_num
        )))
    });
    let converter = Converter::new(config).unwrap();
    let mut position = ParsePosition::new();

    let header = converter.parse_line("name,age", &mut position).unwrap();
    assert_eq!(strings(&[header]), vec![vec!["name@1:1", "age@1:2"]]);
    assert_eq!(position, ParsePosition { row_num: 1, col_num: 3 });

    position.next_row();
    let body = converter
        .parse_document_at("Joe,10\nAnn,12", &mut position)
        .unwrap();
    assert_eq!(
        strings(&body),
        vec![vec!["Joe@2:1", "10@2:2"], vec!["Ann@3:1", "12@3:2"]]
    );
    assert_eq!(position, ParsePosition { row_num: 3, col_num: 1 });
}

#[test]
fn test_threaded_position_never_moves_back() {
    let converter = Converter::new(Config::new()).unwrap();

    let mut position = ParsePosition::at_row(7);
    assert!(converter.parse_document_at("", &mut position).unwrap().is_empty());
    assert_eq!(position.row_num, 7);

    let mut position = ParsePosition::at_row(7);
    assert!(converter.parse_objects_at("", &mut position).unwrap().is_empty());
    assert_eq!(position.row_num, 7);

    let mut position = ParsePosition::at_row(7);
    converter.parse_document_at("a\nb", &mut position).unwrap();
    assert_eq!(position.row_num, 8);
}

#[test]
fn test_converter_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Converter>();

    let converter = Arc::new(Converter::new(no_headers()).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let converter = Arc::clone(&converter);
            std::thread::spawn(move || {
                let text = format!("{},x\n", i);
                converter.parse_document(&text).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let records = handle.join().unwrap();
        assert_eq!(records[0][0], Field::from(i.to_string()));
    }
}

#[test]
fn test_empty_inputs() {
    assert!(parse_document("", &Config::new()).unwrap().is_empty());
    assert!(parse_objects("", &Config::new()).unwrap().is_empty());
    assert_eq!(write_objects(&[], &Config::new()).unwrap(), "");
}
