use libtest_mimic::{run_tests, Arguments, Outcome, Test};
use std::error::Error;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[macro_use]
mod common;
mod roundtrip_test;

use grade_test::GradeTest;
use roundtrip_test::RoundtripTest;

fn main() -> Result<(), Box<dyn Error>> {
    let args = Arguments::from_args();
    let tests = collect_test_files()?
        .into_iter()
        .map(TestCase::new)
        .collect();
    let conclusion = run_tests(&args, tests, TestCase::drive_test);
    // Scratch directories of failed tests are left behind; clean up the root if nothing is.
    let _ = fs::remove_dir(&*common::SCRATCH);
    conclusion.exit();
}

/// Collects all `.grade` and `.roundtrip` system test files, starting from arith/src/test and
/// visiting all nested directories.
fn collect_test_files() -> Result<Vec<Test<PathBuf>>, Box<dyn Error>> {
    let root_test_path = Path::new("src/test");
    let mut dirs_to_visit = vec![root_test_path.to_path_buf()];
    let mut tests = Vec::with_capacity(32);
    while let Some(dir) = dirs_to_visit.pop() {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                dirs_to_visit.push(path);
                continue;
            }
            let kind = match path.extension().and_then(OsStr::to_str) {
                Some(kind @ "grade") | Some(kind @ "roundtrip") => kind.to_owned(),
                _ => continue,
            };
            tests.push(Test {
                name: path.strip_prefix(root_test_path)?.display().to_string(),
                kind,
                is_ignored: false,
                is_bench: false,
                data: path,
            });
        }
    }
    tests.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(tests)
}

#[derive(Clone)]
struct TestCase {
    path: PathBuf,
    variant: TestCaseVariant,
}

#[derive(Clone)]
enum TestCaseVariant {
    Grade(GradeTest),
    Roundtrip(RoundtripTest),
    FailedTestConstruction(String),
}

impl TestCase {
    /// Executes an arith system test.
    fn drive_test(test: &Test<Self>) -> Outcome {
        let path = &test.data.path;
        match test.data.variant.clone() {
            TestCaseVariant::FailedTestConstruction(msg) => fail!("{}", msg),
            TestCaseVariant::Grade(tc) => tc.drive_test(&test.name, path),
            TestCaseVariant::Roundtrip(tc) => tc.drive_test(&test.name, path),
        }
    }

    /// Creates a test case from a system test file.
    fn new(test_file: Test<PathBuf>) -> Test<Self> {
        let Test {
            name,
            kind,
            is_ignored,
            is_bench,
            data: path,
        } = test_file;
        let variant = match fs::read_to_string(&path) {
            Err(e) => TestCaseVariant::FailedTestConstruction(e.to_string()),
            Ok(content) => {
                let made = if kind == "grade" {
                    GradeTest::new(&content).map(TestCaseVariant::Grade)
                } else {
                    RoundtripTest::new(&content).map(TestCaseVariant::Roundtrip)
                };
                made.unwrap_or_else(TestCaseVariant::FailedTestConstruction)
            }
        };
        Test {
            name,
            kind,
            is_ignored,
            is_bench,
            data: TestCase { path, variant },
        }
    }
}
