#![no_main]
use libarith::grade;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|files: (String, String)| {
    let grading = grade(&files.0, &files.1);
    let report = grading.report.to_string();
    assert_eq!(report.lines().count(), 2);
});
