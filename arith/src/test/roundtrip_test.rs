use super::common::*;

use libtest_mimic::Outcome;
use std::fs;
use std::path::Path;

/// Describes a test case that generates exercises, then grades the generated answers against
/// them.
#[derive(Clone)]
pub struct RoundtripTest {
    pub args: String,
    pub report: String,
}

impl RoundtripTest {
    /// Creates a roundtrip test case from the contents of a .roundtrip test file.
    pub fn new(content: &str) -> Result<Self, String> {
        let args = get_clause(content, "args")
            .ok_or_else(|| "===args clause missing in test case.".to_owned())?;
        let report = match get_clause(content, "report") {
            Some(report) => report,
            None if *BLESS => String::new(),
            None => return Err("===report clause missing in test case.".to_owned()),
        };
        Ok(Self { args, report })
    }

    pub fn drive_test(self, test_name: &str, test_path: &Path) -> Outcome {
        let dir = t!(scratch_dir(test_name));
        let exercises = dir.join("Exercises.txt").display().to_string();
        let answers = dir.join("Answers.txt").display().to_string();
        let grade = dir.join("Grade.txt").display().to_string();

        let mut args: Vec<String> = self.args.split_whitespace().map(str::to_owned).collect();
        args.extend(vec![
            "--exercise-out".to_owned(),
            exercises.clone(),
            "--answer-out".to_owned(),
            answers.clone(),
        ]);
        let generated = t!(run(&args));
        if generated.code != 0 {
            return fail!("Generation exited with {}:\n{}", generated.code, generated.stderr);
        }

        let args: Vec<String> = vec![
            "-e".into(),
            exercises,
            "-a".into(),
            answers,
            "--grade-out".into(),
            grade.clone(),
        ];
        let graded = t!(run(&args));
        if graded.code != 0 || !graded.stderr.is_empty() {
            return fail!("Grading exited with {}:\n{}", graded.code, graded.stderr);
        }
        let report = t!(fs::read_to_string(&grade));
        t!(fs::remove_dir_all(&dir));

        if *BLESS {
            let blessed = [
                make_clause("args", &self.args),
                make_clause("report", report.trim_end()),
            ]
            .join("\n");
            return match fs::write(test_path, blessed) {
                Ok(_) => Outcome::Passed,
                Err(e) => fail!("{}", e),
            };
        }

        if report.trim_end() != self.report.trim_end() {
            return fail!(
                "Mismatch in report:\n{}Hint: If this is expected, try running `{}`.",
                diff(self.report.trim_end(), report.trim_end()),
                get_bless_cmd(test_name)
            );
        }
        Outcome::Passed
    }
}
