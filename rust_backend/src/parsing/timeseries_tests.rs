#[cfg(test)]
mod tests {
    use crate::core::Variable;
    use crate::error::MetoceanError;
    use crate::parsing::timeseries::{
        parse_timeseries_file, parse_timeseries_reader, parse_timestamp, ColumnLayout,
    };
    use chrono::NaiveDate;
    use std::io::Write;
    use std::path::Path;
    use tempfile::NamedTempFile;

    /// Helper to create a temp data file
    fn create_temp_file(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    fn wind_layout() -> ColumnLayout {
        ColumnLayout::new(
            vec![
                Variable::WindSpeed,
                Variable::WindDirection,
                Variable::AirTemperature,
                Variable::AirDensity,
            ],
            "wind data with 10m = false",
        )
    }

    #[test]
    fn test_parse_basic_file() {
        let content = "20210101\t0\t5.2\t180\t10.1\t1.225\n20210101\t100\t6.0\t190\t10.0\t1.224\n";
        let file = create_temp_file(content);

        let set = parse_timeseries_file(file.path(), &wind_layout()).unwrap();
        assert_eq!(set.height(), 2);
        assert_eq!(set.column(Variable::WindSpeed).unwrap(), &[5.2, 6.0]);
        assert_eq!(set.column(Variable::AirDensity).unwrap(), &[1.225, 1.224]);
        assert_eq!(
            set.timestamps()[1],
            NaiveDate::from_ymd_opt(2021, 1, 1)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_missing_values_are_nan() {
        let content = "20210101\t0000\tNaN\t180\t\t1.2\n";
        let set = parse_timeseries_reader(content.as_bytes(), Path::new("mem"), &wind_layout())
            .unwrap();
        assert!(set.column(Variable::WindSpeed).unwrap()[0].is_nan());
        assert!(set.column(Variable::AirTemperature).unwrap()[0].is_nan());
    }

    #[test]
    fn test_rows_are_sorted() {
        let content = "20210102\t0000\t1\t1\t1\t1\n20210101\t0000\t2\t2\t2\t2\n";
        let set = parse_timeseries_reader(content.as_bytes(), Path::new("mem"), &wind_layout())
            .unwrap();
        assert_eq!(set.column(Variable::WindSpeed).unwrap(), &[2.0, 1.0]);
    }

    #[test]
    fn test_wrong_field_count_names_layout() {
        let content = "20210101\t0000\t5.2\t180\n";
        let err = parse_timeseries_reader(content.as_bytes(), Path::new("wind.txt"), &wind_layout())
            .unwrap_err();
        assert!(matches!(err, MetoceanError::Schema { .. }));
        let msg = err.to_string();
        assert!(msg.contains("wind.txt"), "unexpected message: {}", msg);
        assert!(msg.contains("10m = false"), "unexpected message: {}", msg);
        assert!(msg.contains("expected 6"), "unexpected message: {}", msg);
    }

    #[test]
    fn test_invalid_value_rejected() {
        let content = "20210101\t0000\tfast\t180\t10\t1.2\n";
        let err = parse_timeseries_reader(content.as_bytes(), Path::new("mem"), &wind_layout())
            .unwrap_err();
        assert!(err.to_string().contains("invalid WS value"));
    }

    #[test]
    fn test_duplicate_timestamps_are_fatal() {
        let content = "20210101\t0000\t1\t1\t1\t1\n20210101\t0000\t2\t2\t2\t2\n";
        let err = parse_timeseries_reader(content.as_bytes(), Path::new("dup.txt"), &wind_layout())
            .unwrap_err();
        assert!(matches!(err, MetoceanError::Precondition(_)));
        assert!(err.to_string().contains("dup.txt"));
    }

    #[test]
    fn test_parse_timestamp() {
        let ts = parse_timestamp("20200229", "1230").unwrap();
        assert_eq!(
            ts,
            NaiveDate::from_ymd_opt(2020, 2, 29)
                .unwrap()
                .and_hms_opt(12, 30, 0)
                .unwrap()
        );
        assert!(parse_timestamp("20210230", "0000").is_none());
        assert!(parse_timestamp("20210101", "2400").is_none());
        assert!(parse_timestamp("20210101", "1260").is_none());
        assert!(parse_timestamp("2021-01-01", "0000").is_none());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_timeseries_file(Path::new("/nonexistent/wind_data.txt"), &wind_layout())
            .unwrap_err();
        assert!(matches!(err, MetoceanError::Io { .. }));
    }
}
