use csv_transcode::{record, row, write_arrays, write_objects, Config, Field, Number, Row};

#[test]
fn test_record_macro_mixed_values() {
    let record = record!["Joe", 10, 2.5, None::<&str>, Some("x")];
    assert_eq!(
        record,
        vec![
            Field::String("Joe".to_string()),
            Field::Number(Number::Integer(10)),
            Field::Number(Number::Float(2.5)),
            Field::Empty,
            Field::String("x".to_string()),
        ]
    );
}

#[test]
fn test_record_macro_writes() {
    let records = vec![record!["a", "b"], record![1, None::<i32>]];
    assert_eq!(
        write_arrays(&records, &Config::new()).unwrap(),
        "a,b\n1,\n"
    );
}

#[test]
fn test_row_macro_keeps_order() {
    let row = row! {
        "name" => "Joe",
        "age" => 10,
        "city" => "Oslo",
    };
    let keys: Vec<_> = row.keys().cloned().collect();
    assert_eq!(keys, vec!["name", "age", "city"]);
}

#[test]
fn test_row_macro_with_expression_keys() {
    let column = String::from("dynamic");
    let row = row! { column.clone() => 1, format!("{}_2", column) => 2 };
    assert!(row.contains_key("dynamic"));
    assert_eq!(row.get("dynamic_2"), Some(&Field::from(2)));
}

#[test]
fn test_empty_macros() {
    assert!(record![].is_empty());
    assert_eq!(row! {}, Row::new());
    assert_eq!(write_objects(&[row! {}], &Config::new()).unwrap(), "\n");
}
