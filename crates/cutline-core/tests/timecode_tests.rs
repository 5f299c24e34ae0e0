use cutline_core::error::CoreError;
use cutline_core::timecode::*;
use cutline_test_harness::assertions::assert_approx;

#[test]
fn test_format_timecode() {
    assert_eq!(format_timecode(0.0, 30), "00:00:00:00");
    assert_eq!(format_timecode(3661.5, 30), "01:01:01:15");
    assert_eq!(format_timecode(12.5, 24), "00:00:12:12");
}

#[test]
fn test_format_rounds_to_nearest_frame() {
    // 59.99 s is 1799.7 frames, which rounds up into the next minute.
    assert_eq!(format_timecode(59.99, 30), "00:01:00:00");
}

#[test]
fn test_format_placeholder_for_bad_input() {
    assert_eq!(format_timecode(-1.0, 30), TIMECODE_PLACEHOLDER);
    assert_eq!(format_timecode(f64::NAN, 30), TIMECODE_PLACEHOLDER);
    assert_eq!(format_timecode(f64::INFINITY, 30), TIMECODE_PLACEHOLDER);
}

#[test]
fn test_parse_all_forms() {
    assert_approx(parse_timecode("01:02:03:15", 30).unwrap(), 3723.5);
    assert_approx(parse_timecode("01:02:03", 30).unwrap(), 3723.0);
    assert_approx(parse_timecode("2:30", 30).unwrap(), 150.0);
    assert_approx(parse_timecode(" 00 : 00 : 10 ", 30).unwrap(), 10.0);
}

#[test]
fn test_parse_clamps_fields() {
    assert_approx(
        parse_timecode("120:75:80:45", 30).unwrap(),
        99.0 * 3600.0 + 59.0 * 60.0 + 59.0 + 29.0 / 30.0,
    );
    assert_approx(parse_timecode("150:10", 30).unwrap(), 99.0 * 60.0 + 10.0);
}

#[test]
fn test_parse_rejects_malformed() {
    for input in ["", "10", "1:2:3:4:5", "a:b", "1::2", "-1:00"] {
        let err = parse_timecode(input, 30).unwrap_err();
        assert!(
            matches!(err, CoreError::InvalidTimecode(_)),
            "{input:?} gave {err:?}"
        );
    }
}

#[test]
fn test_parse_reads_back_formatted() {
    let formatted = format_timecode(12.5, DEFAULT_FPS);
    assert_approx(parse_timecode(&formatted, DEFAULT_FPS).unwrap(), 12.5);
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(3725.9), "01:02:05");
    assert_eq!(format_clock(-4.0), "00:00:00");
}
