/// Builds a [`Record`](crate::Record) from values convertible into [`Field`](crate::Field).
///
/// ```rust
/// use csv_transcode::{record, Field};
///
/// let record = record!["Joe", 10, 1.5, None::<i32>];
/// assert_eq!(record[1], Field::from(10));
/// assert_eq!(record[3], Field::Empty);
/// ```
#[macro_export]
macro_rules! record {
    () => {
        ::std::vec::Vec::<$crate::Field>::new()
    };

    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Field::from($value)),+]
    };
}

/// Builds a [`Row`](crate::Row) from `name => value` pairs, keeping their order.
///
/// ```rust
/// use csv_transcode::{row, Field};
///
/// let row = row! { "name" => "Joe", "age" => 10 };
/// assert_eq!(row.keys().collect::<Vec<_>>(), vec!["name", "age"]);
/// assert_eq!(row.get("age"), Some(&Field::from(10)));
/// ```
#[macro_export]
macro_rules! row {
    () => {
        $crate::Row::new()
    };

    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut row = $crate::Row::new();
        $(
            row.insert($key, $crate::Field::from($value));
        )+
        row
    }};
}
