#[cfg(test)]
mod tests {
    use crate::parsing::station::{parse_line, parse_station_file, parse_station_str, parse_timestamp};
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn line(date: &str, time: &str, temp: &str, solar: &str) -> String {
        format!(
            "23803 {} {} 20181231 1805      3  -89.43   34.82 {:>7} 0.0 {:>6} 0    10.9 C 0    88 0 -99.000 -9999.0  1115 0   0.79 0",
            date, time, temp, solar
        )
    }

    /// Helper to create a temp station file
    fn create_temp_station(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", content).unwrap();
        temp_file
    }

    #[test]
    fn test_parse_line_fields() {
        let sample = parse_line(&line("20190702", "1335", "27.5", "812")).unwrap();
        let expected = NaiveDate::from_ymd_opt(2019, 7, 2)
            .unwrap()
            .and_hms_opt(13, 35, 0)
            .unwrap();
        assert_eq!(sample.timestamp, expected);
        assert_eq!(sample.air_temp, 27.5);
        assert_eq!(sample.solar, 812.0);
    }

    #[test]
    fn test_sentinel_reads_as_nan() {
        let sample = parse_line(&line("20190101", "0010", "-9999.0", "-99999")).unwrap();
        assert!(sample.air_temp.is_nan());
        assert!(sample.solar.is_nan());

        let sample = parse_line(&line("20190101", "0010", "nan", "3")).unwrap();
        assert!(sample.air_temp.is_nan());
        assert_eq!(sample.solar, 3.0);
    }

    #[test]
    fn test_short_line_rejected() {
        let err = parse_line("23803 20190101 0005 12.4").unwrap_err();
        assert!(err.to_string().contains("Expected at least"));
    }

    #[test]
    fn test_bad_timestamp_rejected() {
        assert!(parse_timestamp("20191301", "0000").is_err());
        assert!(parse_timestamp("20190101", "2460").is_err());
        assert!(parse_line(&line("2019-01-01", "0005", "1.0", "0")).is_err());
    }

    #[test]
    fn test_parse_str_skips_blank_lines() {
        let content = format!(
            "{}\n\n{}\n   \n",
            line("20190101", "0005", "1.0", "0"),
            line("20190101", "0010", "1.5", "0")
        );
        let samples = parse_station_str(&content).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1].air_temp, 1.5);
    }

    #[test]
    fn test_parse_str_reports_line_number() {
        let content = format!(
            "{}\n{}\nnot a station line\n",
            line("20190101", "0005", "1.0", "0"),
            line("20190101", "0010", "1.5", "0")
        );
        let err = parse_station_str(&content).unwrap_err();
        assert!(format!("{:#}", err).contains("line 3"));
    }

    #[test]
    fn test_parse_station_file() {
        let content = format!("{}\n", line("20190101", "0005", "4.0", "10"));
        let temp_file = create_temp_station(&content);
        let samples = parse_station_file(temp_file.path()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].solar, 10.0);
    }

    #[test]
    fn test_parse_empty_station_file() {
        let temp_file = create_temp_station("\n\n");
        assert!(parse_station_file(temp_file.path()).is_err());
    }
}
