#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (old, new) = data;
    // inputs past the line ceiling are rejected up front
    let Ok(report) = blockdiff::create_report_from_str(old, new) else {
        return;
    };
    let backward = blockdiff::create_report_from_str(new, old).unwrap();
    assert_eq!(report.has_differences(), backward.has_differences());

    let same = blockdiff::create_report_from_str(old, old).unwrap();
    assert!(same.is_identical());

    let _ = blockdiff::ReportFormatter::new()
        .with_color()
        .fmt_report(&report)
        .to_string();
});
